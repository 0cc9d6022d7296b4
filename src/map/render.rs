use crate::model::Coord;

use super::grid::Grid;
use super::path::Path;
use super::LegendEntry;

const KIOSK: char = 'U';
const DESTINATION: char = 'X';
const ROUTE: char = '*';

/// The grid with a route drawn over it.
///
/// Route cells between origin and destination become `*`, the kiosk `U` and
/// the destination `X`. When the kiosk is itself the destination it is drawn
/// as `X`.
pub fn render_path(grid: &Grid, kiosk: Coord, path: &Path) -> String {
    render_with(grid, |c| {
        if c == path.destination() {
            Some(DESTINATION)
        } else if c == kiosk {
            Some(KIOSK)
        } else if path.intermediate().contains(&c) {
            Some(ROUTE)
        } else {
            None
        }
    })
}

/// The bare grid with the kiosk marked `U`.
pub fn render_map(grid: &Grid, kiosk: Coord) -> String {
    render_with(grid, |c| (c == kiosk).then_some(KIOSK))
}

pub fn render_legend(legend: &[LegendEntry]) -> String {
    let mut out = String::from("=== Map Legend ===\n");
    for entry in legend {
        out.push_str(&format!("{} = {}\n", entry.symbol, entry.label));
    }
    out.push_str("U = You are here (Kiosk)\n");
    out.push_str("X = Destination\n");
    out.push_str("* = Path\n");
    out.push_str("==================\n");
    out
}

fn render_with(grid: &Grid, overlay: impl Fn(Coord) -> Option<char>) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() * 2 + 1));
    for (row, symbols) in grid.iter_rows().enumerate() {
        for (col, &symbol) in symbols.iter().enumerate() {
            out.push(overlay(Coord::new(row, col)).unwrap_or(symbol));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::path::{find_path, SearchStrategy, Target};

    const CORRIDOR: &str = "3 5\nW W W W W\nW . . M W\nW W W W W";

    #[test]
    fn path_overlay() {
        let g = Grid::parse(CORRIDOR).unwrap();
        let kiosk = Coord::new(1, 1);
        let path = find_path(&g, kiosk, Target::Cell(Coord::new(1, 3)), SearchStrategy::DepthFirst).unwrap();
        assert_eq!(
            render_path(&g, kiosk, &path),
            "W W W W W \nW U * X W \nW W W W W \n"
        );
    }

    #[test]
    fn kiosk_as_destination() {
        let g = Grid::parse(CORRIDOR).unwrap();
        let kiosk = Coord::new(1, 1);
        let path = find_path(&g, kiosk, Target::Cell(kiosk), SearchStrategy::DepthFirst).unwrap();
        assert_eq!(
            render_path(&g, kiosk, &path),
            "W W W W W \nW X . M W \nW W W W W \n"
        );
    }

    #[test]
    fn map_marks_kiosk() {
        let g = Grid::parse(CORRIDOR).unwrap();
        assert_eq!(
            render_map(&g, Coord::new(1, 2)),
            "W W W W W \nW . U M W \nW W W W W \n"
        );
    }

    #[test]
    fn legend_lists_entries_then_markers() {
        let legend = vec![
            LegendEntry::parse("W,Wall").unwrap(),
            LegendEntry::parse("M,Music").unwrap(),
        ];
        assert_eq!(
            render_legend(&legend),
            "=== Map Legend ===\n\
             W = Wall\n\
             M = Music\n\
             U = You are here (Kiosk)\n\
             X = Destination\n\
             * = Path\n\
             ==================\n"
        );
    }
}
