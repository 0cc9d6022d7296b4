use crate::model::Coord;

use super::MapError;

/// Which grid cells are claimed by media (one cell each) and by resources
/// (one or more cells each).
///
/// Media may not be placed on a cell any resource claims. Resources are not
/// checked against anything, so a resource can be placed over media or over
/// another resource.
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    rows: usize,
    cols: usize,
    media: Vec<Coord>,
    resources: Vec<Vec<Coord>>,
}

impl CoordinateRegistry {
    /// An empty registry for a `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            media: Vec::new(),
            resources: Vec::new(),
        }
    }

    fn check_bounds(&self, c: Coord) -> Result<(), MapError> {
        if c.row < self.rows && c.col < self.cols {
            Ok(())
        } else {
            Err(MapError::OutOfBounds(c))
        }
    }

    /// Record a media placement. `Ok(false)` if a resource already claims
    /// the cell, in which case nothing is recorded.
    pub fn place_media(&mut self, c: Coord) -> Result<bool, MapError> {
        self.check_bounds(c)?;
        if self.is_resource_cell(c) {
            return Ok(false);
        }
        self.media.push(c);
        Ok(true)
    }

    /// Record a resource placement covering `coords`.
    pub fn place_resource(&mut self, coords: &[Coord]) -> Result<bool, MapError> {
        if coords.is_empty() {
            return Err(MapError::EmptyPlacement);
        }
        for &c in coords {
            self.check_bounds(c)?;
        }
        self.resources.push(coords.to_vec());
        Ok(true)
    }

    pub fn is_media_placed(&self, c: Coord) -> bool {
        self.media.contains(&c)
    }

    /// True if some resource placement covers exactly the cells in
    /// `coords`, in any order.
    pub fn is_resource_placed(&self, coords: &[Coord]) -> bool {
        let wanted = sorted_cells(coords);
        self.resources.iter().any(|placed| sorted_cells(placed) == wanted)
    }

    /// True if any resource placement covers `c`.
    pub fn is_resource_cell(&self, c: Coord) -> bool {
        self.resources.iter().any(|placed| placed.contains(&c))
    }

    pub fn media(&self) -> &[Coord] {
        &self.media
    }

    pub fn resources(&self) -> &[Vec<Coord>] {
        &self.resources
    }
}

fn sorted_cells(coords: &[Coord]) -> Vec<Coord> {
    let mut cells = coords.to_vec();
    cells.sort_unstable();
    cells.dedup();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn media_placement_round_trip() {
        let mut reg = CoordinateRegistry::new(5, 5);
        assert_eq!(reg.place_media(c(2, 3)), Ok(true));
        assert!(reg.is_media_placed(c(2, 3)));
        assert!(!reg.is_media_placed(c(3, 2)));
    }

    #[test]
    fn media_refused_on_resource_cell() {
        let mut reg = CoordinateRegistry::new(5, 5);
        reg.place_resource(&[c(1, 1), c(1, 2)]).unwrap();
        assert_eq!(reg.place_media(c(1, 2)), Ok(false));
        assert!(!reg.is_media_placed(c(1, 2)));
        assert!(reg.media().is_empty());
    }

    #[test]
    fn resource_over_media_is_accepted() {
        let mut reg = CoordinateRegistry::new(5, 5);
        reg.place_media(c(1, 1)).unwrap();
        assert_eq!(reg.place_resource(&[c(1, 1)]), Ok(true));
        assert!(reg.is_media_placed(c(1, 1)));
        assert!(reg.is_resource_placed(&[c(1, 1)]));
    }

    #[test]
    fn overlapping_resources_are_accepted() {
        let mut reg = CoordinateRegistry::new(5, 5);
        reg.place_resource(&[c(1, 1), c(1, 2)]).unwrap();
        assert_eq!(reg.place_resource(&[c(1, 2), c(1, 3)]), Ok(true));
        assert_eq!(reg.resources().len(), 2);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut reg = CoordinateRegistry::new(3, 4);
        assert_eq!(reg.place_media(c(3, 0)), Err(MapError::OutOfBounds(c(3, 0))));
        assert_eq!(reg.place_media(c(0, 4)), Err(MapError::OutOfBounds(c(0, 4))));
        assert_eq!(
            reg.place_resource(&[c(0, 0), c(9, 9)]),
            Err(MapError::OutOfBounds(c(9, 9)))
        );
        assert!(reg.resources().is_empty());
    }

    #[test]
    fn empty_resource_placement_is_an_error() {
        let mut reg = CoordinateRegistry::new(3, 3);
        assert_eq!(reg.place_resource(&[]), Err(MapError::EmptyPlacement));
    }

    #[test]
    fn resource_match_is_exact_and_order_independent() {
        let mut reg = CoordinateRegistry::new(5, 5);
        reg.place_resource(&[c(1, 1), c(1, 2), c(2, 1)]).unwrap();
        assert!(reg.is_resource_placed(&[c(2, 1), c(1, 1), c(1, 2)]));
        assert!(!reg.is_resource_placed(&[c(1, 1), c(1, 2)]));
        assert!(!reg.is_resource_placed(&[c(1, 1), c(1, 2), c(2, 1), c(2, 2)]));
        assert!(reg.is_resource_cell(c(2, 1)));
        assert!(!reg.is_resource_cell(c(2, 2)));
    }
}
