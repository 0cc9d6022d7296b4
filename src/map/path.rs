use std::collections::VecDeque;

use crate::model::Coord;

use super::grid::{Direction, Grid};

/// How the pathfinder orders its frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// LIFO frontier. Neighbours are pushed UP, DOWN, LEFT, RIGHT, so RIGHT
    /// is explored first. Routes are deterministic but not always shortest.
    #[default]
    DepthFirst,
    /// FIFO frontier. Routes are shortest in steps.
    BreadthFirst,
}

impl SearchStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            SearchStrategy::DepthFirst => "dfs",
            SearchStrategy::BreadthFirst => "bfs",
        }
    }
}

/// Where a route may end.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A single shelf cell.
    Cell(Coord),
    /// Any one cell of a multi-cell area.
    Area(&'a [Coord]),
}

impl Target<'_> {
    pub fn contains(&self, c: Coord) -> bool {
        match self {
            Target::Cell(t) => *t == c,
            Target::Area(cells) => cells.contains(&c),
        }
    }
}

/// Why no route was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// The target was never registered on this map.
    NotPlaced,
    /// The target is registered but no walkable route reaches it.
    Unreachable,
}

impl RouteError {
    pub fn label(&self) -> &'static str {
        match self {
            RouteError::NotPlaced => "not_placed",
            RouteError::Unreachable => "unreachable",
        }
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::NotPlaced => write!(f, "target is not on the map"),
            RouteError::Unreachable => write!(f, "no walkable route to target"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Cells from origin to destination, both inclusive. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Coord>);

impl Path {
    pub fn cells(&self) -> &[Coord] {
        &self.0
    }

    pub fn origin(&self) -> Coord {
        self.0[0]
    }

    pub fn destination(&self) -> Coord {
        self.0[self.0.len() - 1]
    }

    /// Cells strictly between origin and destination.
    pub fn intermediate(&self) -> &[Coord] {
        if self.0.len() <= 2 {
            &[]
        } else {
            &self.0[1..self.0.len() - 1]
        }
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }
}

enum Frontier {
    Stack(Vec<Coord>),
    Queue(VecDeque<Coord>),
}

impl Frontier {
    fn new(strategy: SearchStrategy) -> Self {
        match strategy {
            SearchStrategy::DepthFirst => Frontier::Stack(Vec::new()),
            SearchStrategy::BreadthFirst => Frontier::Queue(VecDeque::new()),
        }
    }

    fn push(&mut self, c: Coord) {
        match self {
            Frontier::Stack(s) => s.push(c),
            Frontier::Queue(q) => q.push_back(c),
        }
    }

    fn pop(&mut self) -> Option<Coord> {
        match self {
            Frontier::Stack(s) => s.pop(),
            Frontier::Queue(q) => q.pop_front(),
        }
    }
}

/// Search `grid` from `origin` to any cell of `target`.
///
/// A neighbour is entered if it is walkable floor or part of the target.
/// Cells are marked visited when pushed and never pushed twice, so the
/// search always terminates. The origin itself is entered whatever its
/// symbol.
pub fn find_path(
    grid: &Grid,
    origin: Coord,
    target: Target<'_>,
    strategy: SearchStrategy,
) -> Result<Path, RouteError> {
    if !grid.contains(origin) {
        return Err(RouteError::Unreachable);
    }
    let mut visited = vec![false; grid.len()];
    let mut parent: Vec<Option<Coord>> = vec![None; grid.len()];
    let mut frontier = Frontier::new(strategy);

    frontier.push(origin);
    visited[grid.index(origin)] = true;

    while let Some(curr) = frontier.pop() {
        if target.contains(curr) {
            return Ok(reconstruct(grid, &parent, curr));
        }
        for dir in Direction::ALL {
            let Some(next) = grid.step(curr, dir) else {
                continue;
            };
            let i = grid.index(next);
            if visited[i] {
                continue;
            }
            if grid.is_walkable(next) || target.contains(next) {
                visited[i] = true;
                parent[i] = Some(curr);
                frontier.push(next);
            }
        }
    }
    Err(RouteError::Unreachable)
}

/// Follow parent links back to the origin (the only cell without a parent).
fn reconstruct(grid: &Grid, parent: &[Option<Coord>], end: Coord) -> Path {
    let mut cells = vec![end];
    let mut cur = end;
    while let Some(prev) = parent[grid.index(cur)] {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    Path(cells)
}
