// Static positional heuristic
//
// score = w_h * health - w_f * nearest_food - w_e * nearest_enemy_head
//
// This looks at a single situation; there is no lookahead. Both distance
// terms are Manhattan and contribute zero when their source collection is
// empty. Note the enemy term: being far from opponents lowers the score.

use crate::config::{Config, EvaluationConfig, GameRulesConfig};
use crate::grid::Grid;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Inputs to the heuristic
#[derive(Debug, Clone)]
pub struct Situation<'a> {
    pub health: i32,
    pub head: Coord,
    pub food: &'a [Coord],
    pub enemy_heads: Vec<Coord>,
}

impl<'a> Situation<'a> {
    /// Current situation of `you` on `board`. Food comes from the grid, so it
    /// is already deduplicated and in bounds.
    pub fn from_board(board: &Board, grid: &'a Grid, you: &Battlesnake) -> Option<Self> {
        let head = you.head_position()?;
        Some(Situation {
            health: you.health,
            head,
            food: grid.food(),
            enemy_heads: enemy_heads(board, &you.id),
        })
    }
}

/// Heads of every snake other than `you_id`
pub fn enemy_heads(board: &Board, you_id: &str) -> Vec<Coord> {
    board
        .snakes
        .iter()
        .filter(|s| s.id != you_id)
        .filter_map(|s| s.head_position())
        .collect()
}

fn min_distance(from: &Coord, targets: &[Coord]) -> i32 {
    targets
        .iter()
        .map(|t| from.manhattan_distance(t))
        .min()
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: EvaluationConfig,
    rules: GameRulesConfig,
}

impl Evaluator {
    pub fn new(config: &Config) -> Self {
        Evaluator {
            weights: config.evaluation.clone(),
            rules: config.game_rules.clone(),
        }
    }

    /// Higher is better
    pub fn score(&self, situation: &Situation) -> f64 {
        let food_distance = min_distance(&situation.head, situation.food);
        let enemy_distance = min_distance(&situation.head, &situation.enemy_heads);

        self.weights.health_weight * f64::from(situation.health)
            - self.weights.food_distance_weight * f64::from(food_distance)
            - self.weights.enemy_distance_weight * f64::from(enemy_distance)
    }

    /// Scores the situation one step after `you` moves in `dir`.
    ///
    /// Health drops by the per-turn loss, or resets on food. Enemy heads are
    /// left where they are.
    pub fn score_move(
        &self,
        grid: &Grid,
        situation: &Situation,
        dir: Direction,
    ) -> f64 {
        let next = dir.apply(&situation.head);
        let health = if grid.has_food_at(&next) {
            self.rules.health_on_food
        } else {
            (situation.health - self.rules.health_loss_per_turn).max(0)
        };

        self.score(&Situation {
            health,
            head: next,
            food: situation.food,
            enemy_heads: situation.enemy_heads.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> Evaluator {
        Evaluator::new(&Config::default_hardcoded())
    }

    fn situation<'a>(health: i32, food: &'a [Coord], enemies: &[Coord]) -> Situation<'a> {
        Situation {
            health,
            head: Coord::new(5, 5),
            food,
            enemy_heads: enemies.to_vec(),
        }
    }

    #[test]
    fn test_weights_match_formula() {
        let food = [Coord::new(5, 8)];
        let enemies = [Coord::new(1, 5)];
        let score = evaluator().score(&situation(80, &food, &enemies));
        // 0.5*80 - 0.2*3 - 0.3*4
        assert!((score - 38.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_collections_are_not_penalised() {
        let score = evaluator().score(&situation(100, &[], &[]));
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_more_health_scores_higher() {
        let food = [Coord::new(2, 2)];
        let enemies = [Coord::new(9, 9)];
        let eval = evaluator();

        let mut previous = f64::NEG_INFINITY;
        for health in 0..=100 {
            let score = eval.score(&situation(health, &food, &enemies));
            assert!(score > previous, "health {} did not increase score", health);
            previous = score;
        }
    }

    #[test]
    fn test_farther_food_scores_lower() {
        let enemies = [Coord::new(0, 0)];
        let eval = evaluator();

        let mut previous = f64::INFINITY;
        for dy in 1..=5 {
            let food = [Coord::new(5, 5 + dy)];
            let score = eval.score(&situation(60, &food, &enemies));
            assert!(score < previous, "food distance {} did not decrease score", dy);
            previous = score;
        }
    }

    #[test]
    fn test_farther_enemy_scores_lower() {
        let food = [Coord::new(5, 6)];
        let eval = evaluator();

        let near = eval.score(&situation(60, &food, &[Coord::new(5, 3)]));
        let far = eval.score(&situation(60, &food, &[Coord::new(0, 0)]));
        assert!(far < near);
    }

    #[test]
    fn test_only_nearest_enemy_counts() {
        let eval = evaluator();
        let one = eval.score(&situation(60, &[], &[Coord::new(5, 7)]));
        let two = eval.score(&situation(60, &[], &[Coord::new(0, 0), Coord::new(5, 7)]));
        assert!((one - two).abs() < 1e-9);
    }

    #[test]
    fn test_situation_food_is_the_grid_food() {
        let me = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 70,
            body: vec![Coord::new(2, 2)],
            head: None,
            length: 1,
            latency: serde_json::Value::Null,
            shout: None,
        };
        let board = Board {
            width: 5,
            height: 5,
            // Duplicate and off-board entries
            food: vec![Coord::new(20, 2), Coord::new(2, 4), Coord::new(2, 4)],
            snakes: vec![me.clone()],
            hazards: vec![],
        };
        let grid = Grid::from_board(&board);
        let current = Situation::from_board(&board, &grid, &me).unwrap();

        assert_eq!(current.food, &[Coord::new(2, 4)]);
        // 0.5*70 - 0.2*2
        assert!((evaluator().score(&current) - 34.6).abs() < 1e-9);
    }

    #[test]
    fn test_score_move_restores_health_on_food() {
        let food = vec![Coord::new(5, 6)];
        let board = Board {
            width: 11,
            height: 11,
            food: food.clone(),
            snakes: vec![],
            hazards: vec![],
        };
        let grid = Grid::from_board(&board);
        let eval = evaluator();
        let current = situation(40, &food, &[]);

        // Eats: 0.5*100, food term 0 at the eaten cell
        let onto_food = eval.score_move(&grid, &current, Direction::Up);
        assert!((onto_food - 50.0).abs() < 1e-9);

        // 0.5*39 - 0.2*2
        let away = eval.score_move(&grid, &current, Direction::Down);
        assert!((away - 19.1).abs() < 1e-9);
    }
}
