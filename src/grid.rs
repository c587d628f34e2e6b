// Immutable per-turn view of the board
//
// Built once from the API snapshot; occupancy lookups are O(1) via a
// row-major boolean grid sized to the board.

use log::warn;

use crate::types::{Battlesnake, Board, Coord};

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    occupied: Vec<bool>,
    food: Vec<Coord>,
}

impl Grid {
    /// Builds the grid from a board snapshot.
    ///
    /// Every body segment of every snake is marked occupied, tails included:
    /// whether a tail vacates depends on whether that snake just ate, which the
    /// snapshot does not reliably tell us.
    pub fn from_board(board: &Board) -> Self {
        let width = board.width.max(0);
        let height = board.height.max(0);
        let mut grid = Grid {
            width,
            height,
            occupied: vec![false; (width as usize) * (height as usize)],
            food: Vec::with_capacity(board.food.len()),
        };

        for snake in &board.snakes {
            grid.occupy(snake);
        }

        for food in &board.food {
            if grid.contains(food) && !grid.food.contains(food) {
                grid.food.push(*food);
            }
        }

        grid
    }

    /// Grid for deciding `you`'s move. Our own body is occupied even when the
    /// snapshot left us out of `board.snakes`.
    pub fn for_snake(board: &Board, you: &Battlesnake) -> Self {
        let mut grid = Self::from_board(board);
        if !board.snakes.iter().any(|s| s.id == you.id) {
            grid.occupy(you);
        }
        grid
    }

    fn occupy(&mut self, snake: &Battlesnake) {
        for segment in &snake.body {
            match self.index(segment) {
                Some(idx) => self.occupied[idx] = true,
                None => warn!(
                    "Ignoring out-of-bounds segment {} of snake {}",
                    segment, snake.id
                ),
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.occupied.len()
    }

    /// Food positions in snapshot order, duplicates removed
    pub fn food(&self) -> &[Coord] {
        &self.food
    }

    pub fn has_food_at(&self, coord: &Coord) -> bool {
        self.food.contains(coord)
    }

    /// Both coordinates lie within [0, width) x [0, height)
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Out-of-bounds cells count as occupied
    pub fn is_occupied(&self, coord: &Coord) -> bool {
        self.index(coord).map_or(true, |idx| self.occupied[idx])
    }

    fn index(&self, coord: &Coord) -> Option<usize> {
        // usize arithmetic: y * width can exceed i32::MAX on very large boards
        if self.contains(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            head: None,
            length: body.len() as i32,
            latency: serde_json::Value::Null,
            shout: None,
        }
    }

    #[test]
    fn test_every_segment_is_occupied_including_tail() {
        let board = Board {
            width: 5,
            height: 5,
            food: vec![],
            snakes: vec![snake("a", &[(2, 2), (2, 1), (2, 0)])],
            hazards: vec![],
        };
        let grid = Grid::from_board(&board);

        assert!(grid.is_occupied(&Coord::new(2, 2)));
        assert!(grid.is_occupied(&Coord::new(2, 1)));
        assert!(grid.is_occupied(&Coord::new(2, 0)));
        assert!(!grid.is_occupied(&Coord::new(3, 0)));
    }

    #[test]
    fn test_for_snake_occupies_missing_self() {
        let board = Board {
            width: 5,
            height: 5,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        };
        let me = snake("me", &[(1, 1), (1, 2)]);

        assert!(!Grid::from_board(&board).is_occupied(&Coord::new(1, 2)));
        assert!(Grid::for_snake(&board, &me).is_occupied(&Coord::new(1, 2)));
    }

    #[test]
    fn test_out_of_bounds_counts_as_occupied() {
        let board = Board {
            width: 3,
            height: 4,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        };
        let grid = Grid::from_board(&board);

        assert_eq!(grid.cell_count(), 12);
        assert_eq!((grid.width(), grid.height()), (3, 4));
        assert!(grid.is_occupied(&Coord::new(-1, 0)));
        assert!(grid.is_occupied(&Coord::new(3, 0)));
        assert!(grid.is_occupied(&Coord::new(0, 4)));
        assert!(!grid.is_occupied(&Coord::new(2, 3)));
    }

    #[test]
    fn test_out_of_bounds_segments_and_duplicate_food_are_dropped() {
        let board = Board {
            width: 3,
            height: 3,
            food: vec![Coord::new(1, 1), Coord::new(1, 1), Coord::new(7, 7)],
            snakes: vec![snake("a", &[(0, 0), (-1, 0)])],
            hazards: vec![],
        };
        let grid = Grid::from_board(&board);

        assert_eq!(grid.food(), &[Coord::new(1, 1)]);
        assert!(grid.is_occupied(&Coord::new(0, 0)));
        assert!(grid.has_food_at(&Coord::new(1, 1)));
    }

    #[test]
    fn test_index_does_not_overflow_on_huge_boards() {
        // Only the index arithmetic is exercised; no occupancy table is allocated
        let grid = Grid {
            width: 50_000,
            height: 50_000,
            occupied: Vec::new(),
            food: Vec::new(),
        };

        assert_eq!(grid.index(&Coord::new(49_999, 49_999)), Some(2_499_999_999));
        assert_eq!(grid.index(&Coord::new(0, 49_999)), Some(2_499_950_000));
        assert_eq!(grid.index(&Coord::new(50_000, 0)), None);
    }
}
