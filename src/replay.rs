// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs written by `DebugLogger`
// 2. Re-run the move selector on each logged board
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports
//
// Random safe moves only reproduce when the log was written with a fixed
// `selection.rng_seed` and the replay uses the same one; otherwise they are
// reported but not counted as mismatches.

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{Bot, Decision, DecisionReason};
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::types::{Board, Direction};

/// A single line of the debug JSONL file
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_move: Direction,
    pub original_reason: DecisionReason,
    pub replayed_move: Direction,
    pub replayed_reason: DecisionReason,
    pub legal_moves: Vec<Direction>,
    /// Whether the two moves are expected to agree
    pub comparable: bool,
    pub matches: bool,
    pub computation_time_us: u128,
}

impl ReplayResult {
    pub fn is_mismatch(&self) -> bool {
        self.comparable && !self.matches
    }
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub comparable: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-runs the selector for the snake `you_id` on `board`
    pub fn replay_turn(&self, turn: u32, board: &Board, you_id: &str) -> Result<Decision, String> {
        let you = board
            .snakes
            .iter()
            .find(|s| s.id == you_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", you_id))?;

        Ok(self.bot.decide_turn(turn, board, you))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let original_move: Direction = entry.chosen_move.parse()?;

        let start_time = Instant::now();
        let decision = self.replay_turn(entry.turn, &entry.board, &entry.you_id)?;
        let computation_time_us = start_time.elapsed().as_micros();

        let seeded = self.bot.config().selection.rng_seed.is_some();
        let comparable = seeded
            || (entry.reason.is_deterministic() && decision.reason.is_deterministic());
        let matches = original_move == decision.direction;

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            original_reason: entry.reason,
            replayed_move: decision.direction,
            replayed_reason: decision.reason,
            legal_moves: decision.legal_moves.to_vec(),
            comparable,
            matches,
            computation_time_us,
        };

        if self.verbose {
            if result.is_mismatch() {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({}), Replayed: {} ({})",
                    entry.turn,
                    original_move.as_str(),
                    entry.reason,
                    decision.direction.as_str(),
                    decision.reason
                );
            } else {
                info!(
                    "Turn {}: {} {} ({}, legal: {}, time: {}us)",
                    entry.turn,
                    if matches { "✓ MATCH" } else { "~ RANDOM" },
                    decision.direction.as_str(),
                    decision.reason,
                    decision.legal_moves,
                    computation_time_us
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in parallel. Turns are independent, so order of
    /// evaluation does not matter; results keep log order.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .map(|entry| (entry.turn, self.replay_entry(entry)))
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|(turn, result)| match result {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let comparable = results.iter().filter(|r| r.comparable).count();
        let matches = results.iter().filter(|r| r.comparable && r.matches).count();
        let mismatches = comparable - matches;
        let match_rate = if comparable > 0 {
            (matches as f64 / comparable as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            comparable,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Comparable:     {}", stats.comparable);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| r.is_mismatch()).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({}) → {} ({}), legal: {:?}",
                    result.turn,
                    result.original_move.as_str(),
                    result.original_reason,
                    result.replayed_move.as_str(),
                    result.replayed_reason,
                    result.legal_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Coord};

    fn entry(turn: u32, chosen_move: &str, reason: DecisionReason) -> LogEntry {
        LogEntry {
            turn,
            game_id: "game".to_string(),
            you_id: "me".to_string(),
            chosen_move: chosen_move.to_string(),
            reason,
            board: Board {
                width: 11,
                height: 11,
                food: vec![Coord::new(5, 8)],
                snakes: vec![Battlesnake {
                    id: "me".to_string(),
                    name: "me".to_string(),
                    health: 100,
                    body: vec![Coord::new(5, 5), Coord::new(5, 4)],
                    head: Some(Coord::new(5, 5)),
                    length: 2,
                    latency: serde_json::Value::Null,
                    shout: None,
                }],
                hazards: vec![],
            },
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_matching_entry() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let result = engine
            .replay_entry(&entry(0, "up", DecisionReason::PathToFood))
            .unwrap();

        assert!(result.comparable);
        assert!(result.matches);
        assert_eq!(result.replayed_reason, DecisionReason::PathToFood);
    }

    #[test]
    fn test_mismatching_entry_is_reported() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let result = engine
            .replay_entry(&entry(0, "left", DecisionReason::PathToFood))
            .unwrap();

        assert!(result.is_mismatch());
        let stats = engine.generate_stats(&[result]);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.match_rate, 0.0);
    }

    #[test]
    fn test_logged_random_move_is_not_compared_without_seed() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let result = engine
            .replay_entry(&entry(0, "left", DecisionReason::RandomSafe))
            .unwrap();

        assert!(!result.comparable);
        assert!(!result.is_mismatch());
    }

    #[test]
    fn test_unknown_snake_is_an_error() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let mut bad = entry(0, "up", DecisionReason::PathToFood);
        bad.you_id = "ghost".to_string();
        assert!(engine.replay_entry(&bad).is_err());
    }

    #[test]
    fn test_invalid_logged_direction_is_an_error() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        assert!(engine
            .replay_entry(&entry(0, "sideways", DecisionReason::PathToFood))
            .is_err());
    }

    #[test]
    fn test_replay_all_keeps_log_order() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries: Vec<LogEntry> = (0..32)
            .map(|turn| entry(turn, "up", DecisionReason::PathToFood))
            .collect();

        let results = engine.replay_all(&entries);
        let turns: Vec<u32> = results.iter().map(|r| r.turn).collect();
        assert_eq!(turns, (0..32).collect::<Vec<_>>());
        assert!(results.iter().all(|r| r.matches));
    }
}
