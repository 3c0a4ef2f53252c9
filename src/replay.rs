// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the decision engine on historical states
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports
//
// Random picks cannot be reproduced exactly, so a turn decided at random counts
// as a match when the logged move is still in the replayed safe set.

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::board::TurnContext;
use crate::bot::{Bot, Decision, DecisionReason};
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::types::{Direction, GameState};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed: Decision,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    pub food_turns: usize,
    pub random_turns: usize,
    pub fallback_turns: usize,
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
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        Self::parse_log(BufReader::new(file))
    }

    /// Parses JSONL entries from any buffered reader, skipping blank lines
    pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<DebugLogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move: Direction = entry.chosen_move.parse()?;

        let state = GameState {
            game: Default::default(),
            turn: entry.turn,
            board: entry.board.clone(),
            you: entry.you.clone(),
        };
        let ctx = TurnContext::from_state(&state).map_err(|e| e.to_string())?;

        let start_time = Instant::now();
        let replayed = self.bot.decide(&ctx, &mut rand::rng());
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = Self::is_consistent(original_move, &replayed);

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({}, safe: {:?})",
                    entry.turn,
                    original_move.as_str(),
                    replayed.reason.as_str(),
                    replayed.safe_moves
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} ({}, safe: {:?})",
                    entry.turn,
                    original_move.as_str(),
                    replayed.direction.as_str(),
                    replayed.reason.as_str(),
                    replayed.safe_moves
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed,
            matches,
            computation_time_us,
        })
    }

    /// Whether a logged move could have come from the replayed decision
    pub fn is_consistent(original: Direction, replayed: &Decision) -> bool {
        match replayed.reason {
            DecisionReason::Random => replayed.safe_moves.contains(&original),
            DecisionReason::Food | DecisionReason::Fallback => replayed.direction == original,
        }
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i32],
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
        let matches = results.iter().filter(|r| r.matches).count();
        let count_reason = |reason: DecisionReason| {
            results
                .iter()
                .filter(|r| r.replayed.reason == reason)
                .count()
        };
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            match_rate,
            food_turns: count_reason(DecisionReason::Food),
            random_turns: count_reason(DecisionReason::Random),
            fallback_turns: count_reason(DecisionReason::Fallback),
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!(
            "Decided by:     food {}, random {}, fallback {}",
            stats.food_turns, stats.random_turns, stats.fallback_turns
        );
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Decision Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} ({}, safe: {:?})",
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed.direction.as_str(),
                    result.replayed.reason.as_str(),
                    result.replayed.safe_moves
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
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
