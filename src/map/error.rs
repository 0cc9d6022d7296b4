use crate::model::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    Empty,
    MalformedHeader(String),
    /// Declared and actual grid shape disagree.
    DimensionMismatch {
        expected: usize,
        found: usize,
        what: &'static str,
    },
    TooLarge(usize, usize),
    OutOfBounds(Coord),
    EmptyPlacement,
    EmptyLegend,
    InvalidLegend(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Empty => write!(f, "map data must not be empty"),
            MapError::MalformedHeader(line) => {
                write!(f, "map header must be \"<rows> <cols>\", got {line:?}")
            }
            MapError::DimensionMismatch {
                expected,
                found,
                what,
            } => write!(f, "expected {expected} {what}, found {found}"),
            MapError::TooLarge(rows, cols) => write!(f, "map {rows}x{cols} is too large"),
            MapError::OutOfBounds(c) => write!(f, "coordinate {c} is outside the map"),
            MapError::EmptyPlacement => write!(f, "placement must cover at least one cell"),
            MapError::EmptyLegend => write!(f, "legend must have at least one entry"),
            MapError::InvalidLegend(entry) => {
                write!(f, "legend entry must be \"<symbol>,<label>\", got {entry:?}")
            }
        }
    }
}

impl std::error::Error for MapError {}
