use crate::limits::MAX_GRID_DIM;
use crate::model::Coord;

use super::MapError;

/// Terrain symbol for open floor.
pub const WALKABLE: char = '.';

/// Immutable rectangular grid of terrain symbols, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

/// Neighbour directions, in the order the pathfinder expands them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

impl Grid {
    /// Build from explicit rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self, MapError> {
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(MapError::Empty);
        }
        if rows.len() > MAX_GRID_DIM || cols > MAX_GRID_DIM {
            return Err(MapError::TooLarge(rows.len(), cols));
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(MapError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                    what: "columns",
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Parse the textual map format: a `"<rows> <cols>"` header line, then
    /// `rows` lines of `cols` space-separated tokens. Each token contributes
    /// its first character.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let text = text.trim_end();
        if text.trim().is_empty() {
            return Err(MapError::Empty);
        }
        let mut lines = text.lines();
        let header = lines.next().ok_or(MapError::Empty)?;
        let (rows, cols) = parse_header(header)?;
        if rows > MAX_GRID_DIM || cols > MAX_GRID_DIM {
            return Err(MapError::TooLarge(rows, cols));
        }

        let mut grid_rows: Vec<Vec<char>> = Vec::with_capacity(rows);
        for line in lines {
            let row: Vec<char> = line
                .split_whitespace()
                .filter_map(|token| token.chars().next())
                .collect();
            if row.len() != cols {
                return Err(MapError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                    what: "columns",
                });
            }
            grid_rows.push(row);
        }
        if grid_rows.len() != rows {
            return Err(MapError::DimensionMismatch {
                expected: rows,
                found: grid_rows.len(),
                what: "rows",
            });
        }
        Self::from_rows(grid_rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.row < self.rows && c.col < self.cols
    }

    pub fn get(&self, c: Coord) -> Option<char> {
        if self.contains(c) {
            Some(self.cells[self.index(c)])
        } else {
            None
        }
    }

    pub fn is_walkable(&self, c: Coord) -> bool {
        self.get(c) == Some(WALKABLE)
    }

    /// Row-major index of an in-bounds cell.
    pub(crate) fn index(&self, c: Coord) -> usize {
        c.row * self.cols + c.col
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// The neighbour of `c` in direction `dir`, if it lies on the grid.
    pub fn step(&self, c: Coord, dir: Direction) -> Option<Coord> {
        let next = match dir {
            Direction::Up => Coord::new(c.row.checked_sub(1)?, c.col),
            Direction::Down => Coord::new(c.row + 1, c.col),
            Direction::Left => Coord::new(c.row, c.col.checked_sub(1)?),
            Direction::Right => Coord::new(c.row, c.col + 1),
        };
        self.contains(next).then_some(next)
    }

    /// Rows of symbols, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.cols)
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), MapError> {
    let malformed = || MapError::MalformedHeader(line.to_string());
    let mut parts = line.split_whitespace();
    let rows = parts.next().and_then(|s| s.parse().ok()).ok_or_else(malformed)?;
    let cols = parts.next().and_then(|s| s.parse().ok()).ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok((rows, cols))
}
