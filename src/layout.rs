//! Library setup described as JSON: the floor map, its legend, the kiosk and
//! everything placed on it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::library::{Library, LibraryError};
use crate::map::{LibraryMap, MapError};
use crate::model::{Coord, Media, Minutes, ModelError, Resource};

const BUILTIN_MAP: &str = "9 12
W W W W W W W W W W W W
W . . . . . . . G G G W
W . M F . . . . G G G W
W . . . . . . . . . . W
W . . W W W W W W . I W
W . . W . U . . W . . W
W . . W . . . . W . . W
W . . . . . . . . . . W
W W W W W W W W W W W W";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryLayout {
    pub name: String,
    /// Grid text: a `"<rows> <cols>"` header then one line per row.
    pub map: String,
    /// `symbol,label` lines.
    pub legend: Vec<String>,
    pub kiosk: Coord,
    #[serde(default)]
    pub media: Vec<MediaLayout>,
    #[serde(default)]
    pub resources: Vec<ResourceLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLayout {
    pub title: String,
    pub author: String,
    pub kind: String,
    pub coord: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLayout {
    pub name: String,
    /// `HH:MM`
    pub opening: String,
    /// `HH:MM`
    pub closing: String,
    pub timeslot: Minutes,
    pub coords: Vec<Coord>,
}

#[derive(Debug)]
pub enum LayoutError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Map(MapError),
    Model(ModelError),
    Library(LibraryError),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::Io(e) => write!(f, "cannot read layout: {e}"),
            LayoutError::Json(e) => write!(f, "invalid layout JSON: {e}"),
            LayoutError::Map(e) => write!(f, "invalid map: {e}"),
            LayoutError::Model(e) => write!(f, "invalid layout entry: {e}"),
            LayoutError::Library(e) => write!(f, "cannot place layout entry: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io(e) => Some(e),
            LayoutError::Json(e) => Some(e),
            LayoutError::Map(e) => Some(e),
            LayoutError::Model(e) => Some(e),
            LayoutError::Library(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        LayoutError::Io(e)
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::Json(e)
    }
}

impl From<MapError> for LayoutError {
    fn from(e: MapError) -> Self {
        LayoutError::Map(e)
    }
}

impl From<ModelError> for LayoutError {
    fn from(e: ModelError) -> Self {
        LayoutError::Model(e)
    }
}

impl From<LibraryError> for LayoutError {
    fn from(e: LibraryError) -> Self {
        LayoutError::Library(e)
    }
}

impl LibraryLayout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let layout = Self::from_json(&text)?;
        info!(path = %path.display(), name = %layout.name, "layout loaded");
        Ok(layout)
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The default floor: fiction and music shelves, a group study room in
    /// the north-east corner and an individual study room off the east aisle.
    pub fn builtin() -> Self {
        let legend = [
            "W,Wall",
            ".,Path/Walking Space",
            "M,Music",
            "F,Fiction",
            "I,Individual Study Room",
            "G,Group Study Room",
            "U,You are here",
        ];
        let group_room = (1..=2)
            .flat_map(|row| (8..=10).map(move |col| Coord::new(row, col)))
            .collect();
        Self {
            name: "Main Library".to_string(),
            map: BUILTIN_MAP.to_string(),
            legend: legend.iter().map(|s| s.to_string()).collect(),
            kiosk: Coord::new(5, 5),
            media: vec![
                MediaLayout {
                    title: "The Hobbit".to_string(),
                    author: "J.R.R. Tolkien".to_string(),
                    kind: "Book".to_string(),
                    coord: Coord::new(2, 3),
                },
                MediaLayout {
                    title: "Thriller".to_string(),
                    author: "Michael Jackson".to_string(),
                    kind: "CD".to_string(),
                    coord: Coord::new(2, 2),
                },
            ],
            resources: vec![
                ResourceLayout {
                    name: "Group Study Room".to_string(),
                    opening: "09:00".to_string(),
                    closing: "21:00".to_string(),
                    timeslot: 60,
                    coords: group_room,
                },
                ResourceLayout {
                    name: "Pod1".to_string(),
                    opening: "12:00".to_string(),
                    closing: "20:00".to_string(),
                    timeslot: 60,
                    coords: vec![Coord::new(4, 10)],
                },
            ],
        }
    }

    /// Validate every entry and place it. Resources go first so that media
    /// placement sees their cells.
    pub fn into_library(self) -> Result<Library, LayoutError> {
        let map = LibraryMap::parse(&self.map, &self.legend, self.kiosk)?;
        let mut library = Library::new(self.name, map);
        for r in self.resources {
            let resource = Resource::builder()
                .name(r.name)
                .opening(r.opening)
                .closing(r.closing)
                .timeslot(r.timeslot)
                .coords(r.coords)
                .build()?;
            library.add_resource(resource)?;
        }
        for m in self.media {
            library.add_media(Media::new(m.title, m.author, m.kind, m.coord)?)?;
        }
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{RouteError, SearchStrategy};

    #[test]
    fn builtin_library_routes() {
        let lib = LibraryLayout::builtin().into_library().unwrap();
        assert_eq!(lib.map().kiosk(), Coord::new(5, 5));
        assert_eq!(lib.media().len(), 2);
        assert_eq!(lib.resources().len(), 2);

        let hobbit = lib.route_to_media("The Hobbit", SearchStrategy::DepthFirst).unwrap();
        assert_eq!(hobbit.origin(), Coord::new(5, 5));
        assert_eq!(hobbit.destination(), Coord::new(2, 3));

        let shortest = lib.route_to_media("The Hobbit", SearchStrategy::BreadthFirst).unwrap();
        assert!(shortest.steps() <= hobbit.steps());

        let room = lib.route_to_resource("group study room", SearchStrategy::DepthFirst).unwrap();
        assert!(lib.find_resource("Group Study Room").unwrap().coords().contains(&room.destination()));
        assert!(lib.route_to_resource("Pod1", SearchStrategy::DepthFirst).is_ok());
    }

    #[test]
    fn other_shelves_are_walked_around() {
        let lib = LibraryLayout::builtin().into_library().unwrap();
        let path = lib.route_to_media("Thriller", SearchStrategy::BreadthFirst).unwrap();
        assert_eq!(path.destination(), Coord::new(2, 2));
        assert!(!path.intermediate().contains(&Coord::new(2, 3)));
    }

    #[test]
    fn json_round_trip() {
        let layout = LibraryLayout::builtin();
        let text = layout.to_json().unwrap();
        assert_eq!(LibraryLayout::from_json(&text).unwrap(), layout);
    }

    #[test]
    fn media_and_resources_default_to_empty() {
        let layout = LibraryLayout::from_json(
            r#"{"name":"Annex","map":"3 3\nW W W\nW . W\nW W W","legend":["W,Wall"],"kiosk":{"row":1,"col":1}}"#,
        )
        .unwrap();
        let lib = layout.into_library().unwrap();
        assert!(lib.media().is_empty());
        assert!(lib.resources().is_empty());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("kiosk-layout-{}.json", ulid::Ulid::new()));
        std::fs::write(&path, LibraryLayout::builtin().to_json().unwrap()).unwrap();
        let layout = LibraryLayout::load(&path).unwrap();
        assert_eq!(layout.name, "Main Library");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("kiosk-missing-{}.json", ulid::Ulid::new()));
        assert!(matches!(LibraryLayout::load(&path), Err(LayoutError::Io(_))));
    }

    #[test]
    fn bad_entries_are_reported() {
        assert!(matches!(LibraryLayout::from_json("{"), Err(LayoutError::Json(_))));

        let mut layout = LibraryLayout::builtin();
        layout.kiosk = Coord::new(40, 40);
        assert!(matches!(layout.into_library(), Err(LayoutError::Map(MapError::OutOfBounds(_)))));

        let mut layout = LibraryLayout::builtin();
        layout.resources[0].closing = "08:00".to_string();
        assert!(matches!(layout.into_library(), Err(LayoutError::Model(ModelError::ClosingNotAfterOpening { .. }))));

        let mut layout = LibraryLayout::builtin();
        layout.media[0].coord = Coord::new(1, 8);
        assert!(matches!(
            layout.into_library(),
            Err(LayoutError::Library(LibraryError::CellTaken(_)))
        ));
    }

    #[test]
    fn walled_in_kiosk_is_unreachable() {
        let mut layout = LibraryLayout::builtin();
        // Wall in the kiosk room completely.
        layout.map = layout.map.replace("W . . W . U . . W . . W", "W . . W W U W W W . . W");
        layout.map = layout.map.replace("W . . W . . . . W . . W", "W . . W W W W W W . . W");
        let lib = layout.into_library().unwrap();
        let err = lib.route_to_media("Thriller", SearchStrategy::DepthFirst).unwrap_err();
        assert_eq!(err, LibraryError::Route(RouteError::Unreachable));
    }
}
