// A* search over the 4-connected board grid
//
// Edges join adjacent cells that are in bounds and unoccupied; every edge
// costs 1. Manhattan distance is admissible and consistent on this grid, so
// the first time the goal is expanded its path is a shortest one.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::Grid;
use crate::safety::is_safe;
use crate::types::{Coord, Direction};

/// Frontier entry, ordered so that `BinaryHeap` pops the lowest `f` first.
/// Equal `f` prefers the deeper node, then falls back to position so that
/// `Ord` agrees with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    pos: Coord,
    g: u32,
    f: u32,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| (self.pos.x, self.pos.y).cmp(&(other.pos.x, other.pos.y)))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(from: &Coord, goal: &Coord) -> u32 {
    from.manhattan_distance(goal) as u32
}

/// Shortest path from `start` to `goal`.
///
/// The returned cells are the steps taken after `start`, the last one being
/// `goal`. An empty vector means the goal is unreachable (or `start == goal`).
/// The start cell itself is never checked for safety: it is our head.
pub fn find_path(start: Coord, goal: Coord, grid: &Grid) -> Vec<Coord> {
    if start == goal || !is_safe(&goal, grid) {
        return Vec::new();
    }

    let mut frontier = BinaryHeap::new();
    let mut best_g: HashMap<Coord, u32> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();

    best_g.insert(start, 0);
    frontier.push(SearchNode {
        pos: start,
        g: 0,
        f: heuristic(&start, &goal),
    });

    while let Some(current) = frontier.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        // Stale entry, a cheaper route to this cell was queued later
        if best_g.get(&current.pos).is_some_and(|&g| current.g > g) {
            continue;
        }

        for dir in Direction::all() {
            let next = dir.apply(&current.pos);
            if !is_safe(&next, grid) {
                continue;
            }

            let tentative_g = current.g + 1;
            if best_g.get(&next).is_some_and(|&g| tentative_g >= g) {
                continue;
            }

            best_g.insert(next, tentative_g);
            came_from.insert(next, current.pos);
            frontier.push(SearchNode {
                pos: next,
                g: tentative_g,
                f: tentative_g + heuristic(&next, &goal),
            });
        }
    }

    Vec::new()
}

fn reconstruct_path(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&prev) = came_from.get(&cursor) {
        if prev == start {
            break;
        }
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}

/// Manhattan-nearest food to `head`; the first listed wins ties
pub fn nearest_food(head: &Coord, food: &[Coord]) -> Option<Coord> {
    food.iter()
        .min_by_key(|f| head.manhattan_distance(f))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board};

    fn grid_with_walls(width: i32, height: i32, walls: &[(i32, i32)]) -> Grid {
        let snakes = if walls.is_empty() {
            vec![]
        } else {
            vec![Battlesnake {
                id: "wall".to_string(),
                name: String::new(),
                health: 100,
                body: walls.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
                head: None,
                length: walls.len() as i32,
                latency: serde_json::Value::Null,
                shout: None,
            }]
        };
        Grid::from_board(&Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        })
    }

    #[test]
    fn test_straight_path_on_open_grid() {
        let grid = grid_with_walls(11, 11, &[]);
        let start = Coord::new(0, 0);
        let goal = Coord::new(3, 0);
        let path = find_path(start, goal, &grid);

        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&goal));

        let mut prev = start;
        for step in &path {
            assert_eq!(prev.manhattan_distance(step), 1);
            assert_eq!(
                step.manhattan_distance(&goal),
                prev.manhattan_distance(&goal) - 1
            );
            prev = *step;
        }
    }

    #[test]
    fn test_path_detours_around_wall() {
        // Vertical wall at x=2 from y=0..=3, gap at y=4
        let grid = grid_with_walls(5, 5, &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        let path = find_path(Coord::new(0, 0), Coord::new(4, 0), &grid);

        // 4 up, 4 right, 4 down
        assert_eq!(path.len(), 12);
        assert!(path.contains(&Coord::new(2, 4)));
        assert!(path.iter().all(|c| !grid.is_occupied(c)));
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let grid = grid_with_walls(7, 7, &[(3, 4), (4, 3), (3, 2), (2, 3)]);
        let path = find_path(Coord::new(0, 0), Coord::new(3, 3), &grid);
        assert!(path.is_empty());
    }

    #[test]
    fn test_occupied_goal_is_unreachable() {
        let grid = grid_with_walls(5, 5, &[(2, 2)]);
        assert!(find_path(Coord::new(0, 0), Coord::new(2, 2), &grid).is_empty());
    }

    #[test]
    fn test_start_equal_goal_is_empty() {
        let grid = grid_with_walls(5, 5, &[]);
        assert!(find_path(Coord::new(1, 1), Coord::new(1, 1), &grid).is_empty());
    }

    #[test]
    fn test_start_cell_may_be_occupied() {
        // Our head is always occupied on the real grid
        let grid = grid_with_walls(5, 5, &[(0, 0), (0, 1)]);
        let path = find_path(Coord::new(0, 0), Coord::new(2, 0), &grid);
        assert_eq!(path, vec![Coord::new(1, 0), Coord::new(2, 0)]);
    }

    #[test]
    fn test_search_node_order_agrees_with_equality() {
        let node = |x, g, f| SearchNode {
            pos: Coord::new(x, 0),
            g,
            f,
        };

        // Lower f pops first
        assert!(node(0, 0, 3) > node(0, 0, 5));
        // Same f: deeper node pops first
        assert!(node(0, 4, 5) > node(0, 2, 5));

        let a = node(1, 2, 5);
        let b = node(2, 2, 5);
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_short_search_on_large_board() {
        let grid = grid_with_walls(2_000, 2_000, &[]);
        let path = find_path(Coord::new(1_000, 1_000), Coord::new(1_003, 1_000), &grid);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_nearest_food_prefers_first_on_ties() {
        let head = Coord::new(5, 5);
        let food = vec![Coord::new(5, 8), Coord::new(8, 5), Coord::new(5, 7)];
        assert_eq!(nearest_food(&head, &food), Some(Coord::new(5, 7)));

        let tied = vec![Coord::new(5, 7), Coord::new(7, 5)];
        assert_eq!(nearest_food(&head, &tied), Some(Coord::new(5, 7)));

        assert_eq!(nearest_food(&head, &[]), None);
    }
}
