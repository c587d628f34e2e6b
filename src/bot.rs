// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file can be a nice home for your Battlesnake logic and helper functions.
//
// For more info see docs.battlesnake.com

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::evaluation::{Evaluator, Situation};
use crate::grid::Grid;
use crate::pathfinder::{find_path, nearest_food};
use crate::safety::{legal_moves, MoveSet};
use crate::types::{Battlesnake, Board, Direction, Game};

/// Returned when no legal move exists. Never varies, so replays agree.
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Which branch of the selector produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Surrounded; returned `FALLBACK_DIRECTION`
    NoLegalMoves,
    /// First step of the shortest path to the nearest food
    PathToFood,
    /// Uniform pick among the legal moves
    RandomSafe,
}

impl DecisionReason {
    /// Whether the same board always produces the same move
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, DecisionReason::RandomSafe)
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DecisionReason::NoLegalMoves => "no legal moves",
            DecisionReason::PathToFood => "path to food",
            DecisionReason::RandomSafe => "random safe move",
        })
    }
}

/// Outcome of one turn plus the reasoning trace behind it
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
    pub legal_moves: MoveSet,
    /// Length of the path to the nearest food, when one was found
    pub path_length: Option<usize>,
    /// Heuristic score one step after each legal move
    pub scores: Vec<(Direction, f64)>,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    evaluator: Evaluator,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug log
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let evaluator = Evaluator::new(&config);
        Bot {
            config,
            evaluator,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": env!("CARGO_PKG_VERSION"),
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &u32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &u32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, game: &Game, turn: &u32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();

        let decision = self.decide_turn(*turn, board, you);

        info!(
            "MOVE {}: {} ({}, legal: {}, time: {}us)",
            turn,
            decision.direction.as_str(),
            decision.reason,
            decision.legal_moves,
            start_time.elapsed().as_micros()
        );

        self.debug_logger
            .log_move(*turn, &game.id, &you.id, board, &decision);

        json!({ "move": decision.direction.as_str() })
    }

    /// `decide` with the configured random source: a generator seeded from
    /// `rng_seed ^ turn` when a seed is set, the thread RNG otherwise.
    pub fn decide_turn(&self, turn: u32, board: &Board, you: &Battlesnake) -> Decision {
        match self.config.selection.rng_seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ u64::from(turn));
                self.decide(board, you, &mut rng)
            }
            None => self.decide(board, you, &mut rand::rng()),
        }
    }

    /// Picks a direction for `you` on `board`.
    ///
    /// 1. Legal set: all four directions minus the neck, out-of-bounds and
    ///    occupied destinations.
    /// 2. Empty legal set: `FALLBACK_DIRECTION`.
    /// 3. Food on the board: A* toward the Manhattan-nearest food; its first
    ///    step is returned if it is legal.
    /// 4. Otherwise a uniform pick from the legal set using `rng`.
    pub fn decide<R: Rng + ?Sized>(&self, board: &Board, you: &Battlesnake, rng: &mut R) -> Decision {
        let grid = Grid::for_snake(board, you);
        let legal = legal_moves(&grid, &you.body);

        let situation = match Situation::from_board(board, &grid, you) {
            Some(situation) if !legal.is_empty() => situation,
            _ => {
                info!("No safe moves detected! Moving {}", FALLBACK_DIRECTION.as_str());
                return Decision {
                    direction: FALLBACK_DIRECTION,
                    reason: DecisionReason::NoLegalMoves,
                    legal_moves: legal,
                    path_length: None,
                    scores: Vec::new(),
                };
            }
        };
        let head = situation.head;

        let scores: Vec<(Direction, f64)> = legal
            .iter()
            .map(|dir| (dir, self.evaluator.score_move(&grid, &situation, dir)))
            .collect();
        debug!("Legal moves {} scored {:?}", legal, scores);

        let mut path_length = None;
        if let Some(target) = nearest_food(&head, grid.food()) {
            let path = find_path(head, target, &grid);
            debug!("Path to food at {}: {} steps", target, path.len());

            if let Some(first) = path.first() {
                path_length = Some(path.len());
                match Direction::between(&head, first) {
                    Some(dir) if legal.contains(dir) => {
                        return Decision {
                            direction: dir,
                            reason: DecisionReason::PathToFood,
                            legal_moves: legal,
                            path_length,
                            scores,
                        };
                    }
                    step => debug!("First path step {:?} is not legal, ignoring path", step),
                }
            }
        }

        let candidates = legal.to_vec();
        let direction = candidates
            .choose(rng)
            .copied()
            .unwrap_or(FALLBACK_DIRECTION);

        Decision {
            direction,
            reason: DecisionReason::RandomSafe,
            legal_moves: legal,
            path_length,
            scores,
        }
    }
}
