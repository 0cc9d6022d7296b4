//! The facility map: terrain grid, legend, kiosk position and the registry of
//! what has been placed where. Routes always start at the kiosk.

mod error;
pub mod grid;
pub mod path;
pub mod registry;
pub mod render;

pub use error::MapError;
pub use grid::{Direction, Grid, WALKABLE};
pub use path::{find_path, Path, RouteError, SearchStrategy, Target};
pub use registry::CoordinateRegistry;

use tracing::debug;

use crate::model::{Coord, Media, Resource};
use crate::observability;

/// One `symbol,label` line of the map legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub symbol: char,
    pub label: String,
}

impl LegendEntry {
    pub fn parse(entry: &str) -> Result<Self, MapError> {
        let invalid = || MapError::InvalidLegend(entry.to_string());
        let (symbol, label) = entry.split_once(',').ok_or_else(invalid)?;
        let mut chars = symbol.trim().chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let label = label.trim();
        if label.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            symbol,
            label: label.to_string(),
        })
    }
}

impl std::fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.symbol, self.label)
    }
}

#[derive(Debug, Clone)]
pub struct LibraryMap {
    grid: Grid,
    legend: Vec<LegendEntry>,
    kiosk: Coord,
    registry: CoordinateRegistry,
}

impl LibraryMap {
    /// A map with an empty registry. The legend must have at least one entry
    /// and the kiosk must lie on the grid.
    pub fn new(grid: Grid, legend: Vec<LegendEntry>, kiosk: Coord) -> Result<Self, MapError> {
        if legend.is_empty() {
            return Err(MapError::EmptyLegend);
        }
        if !grid.contains(kiosk) {
            return Err(MapError::OutOfBounds(kiosk));
        }
        let registry = CoordinateRegistry::new(grid.rows(), grid.cols());
        Ok(Self {
            grid,
            legend,
            kiosk,
            registry,
        })
    }

    /// Parse grid text and `symbol,label` legend lines in one go.
    pub fn parse<S: AsRef<str>>(map: &str, legend: &[S], kiosk: Coord) -> Result<Self, MapError> {
        let grid = Grid::parse(map)?;
        let legend = legend
            .iter()
            .map(|entry| LegendEntry::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(grid, legend, kiosk)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn kiosk(&self) -> Coord {
        self.kiosk
    }

    pub fn registry(&self) -> &CoordinateRegistry {
        &self.registry
    }

    pub fn place_media(&mut self, media: &Media) -> Result<bool, MapError> {
        self.registry.place_media(media.coord)
    }

    pub fn place_resource(&mut self, resource: &Resource) -> Result<bool, MapError> {
        self.registry.place_resource(resource.coords())
    }

    pub fn route_to_media(&self, media: &Media, strategy: SearchStrategy) -> Result<Path, RouteError> {
        if !self.registry.is_media_placed(media.coord) {
            return record_route(Err(RouteError::NotPlaced), strategy);
        }
        let result = find_path(&self.grid, self.kiosk, Target::Cell(media.coord), strategy);
        debug!(title = %media.title, strategy = strategy.label(), ok = result.is_ok(), "route to media");
        record_route(result, strategy)
    }

    pub fn route_to_resource(
        &self,
        resource: &Resource,
        strategy: SearchStrategy,
    ) -> Result<Path, RouteError> {
        if !self.registry.is_resource_placed(resource.coords()) {
            return record_route(Err(RouteError::NotPlaced), strategy);
        }
        let result = find_path(&self.grid, self.kiosk, Target::Area(resource.coords()), strategy);
        debug!(name = resource.name(), strategy = strategy.label(), ok = result.is_ok(), "route to resource");
        record_route(result, strategy)
    }

    pub fn render(&self) -> String {
        render::render_map(&self.grid, self.kiosk)
    }

    pub fn render_path(&self, path: &Path) -> String {
        render::render_path(&self.grid, self.kiosk, path)
    }

    pub fn render_legend(&self) -> String {
        render::render_legend(&self.legend)
    }
}

fn record_route(
    result: Result<Path, RouteError>,
    strategy: SearchStrategy,
) -> Result<Path, RouteError> {
    let outcome = match &result {
        Ok(path) => {
            metrics::histogram!(observability::ROUTE_LENGTH, "strategy" => strategy.label())
                .record(path.steps() as f64);
            "found"
        }
        Err(e) => e.label(),
    };
    metrics::counter!(observability::ROUTES_TOTAL, "outcome" => outcome).increment(1);
    result
}
