// Move legality checks
//
// A move is legal if it:
// - Doesn't go out of bounds
// - Doesn't land on any snake body (tails included, see Grid::from_board)
// - Doesn't reverse onto our own neck

use std::fmt;

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// True if `coord` is on the board and not occupied by any snake
pub fn is_safe(coord: &Coord, grid: &Grid) -> bool {
    grid.contains(coord) && !grid.is_occupied(coord)
}

/// Direction pointing from the head toward the neck, if there is one.
///
/// A stacked body (head and neck on the same cell, as on turn 0) excludes
/// nothing.
pub fn neck_direction(body: &[Coord]) -> Option<Direction> {
    match body {
        [head, neck, ..] => Direction::between(head, neck),
        _ => None,
    }
}

/// Set of directions backed by a fixed-size table indexed by `Direction::index()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSet {
    slots: [bool; 4],
}

impl MoveSet {
    pub fn empty() -> Self {
        MoveSet { slots: [false; 4] }
    }

    pub fn full() -> Self {
        MoveSet { slots: [true; 4] }
    }

    pub fn insert(&mut self, dir: Direction) {
        self.slots[dir.index()] = true;
    }

    pub fn remove(&mut self, dir: Direction) {
        self.slots[dir.index()] = false;
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.slots[dir.index()]
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&s| s).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in `Direction::all()` order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::all()
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.iter().collect()
    }
}

impl FromIterator<Direction> for MoveSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = MoveSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|d| d.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Computes the legal-direction set for a snake with the given body.
///
/// Starts from all four directions, removes the neck direction, then every
/// direction whose destination is out of bounds or occupied.
pub fn legal_moves(grid: &Grid, body: &[Coord]) -> MoveSet {
    let Some(head) = body.first() else {
        return MoveSet::empty();
    };

    let mut moves = MoveSet::full();

    if let Some(neck) = neck_direction(body) {
        moves.remove(neck);
    }

    for dir in Direction::all() {
        if !is_safe(&dir.apply(head), grid) {
            moves.remove(dir);
        }
    }

    moves
}
