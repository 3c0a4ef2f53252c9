// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Move decision: safety filters first, then food seeking when the snake is
// short of its target length, then a random pick among what is left.

use log::{info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::board::{TurnContext, TurnError};
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::food::move_towards_food;
use crate::safety::{run_pipeline, PipelineSettings};
use crate::space::target_length;
use crate::types::{Battlesnake, Board, Direction, Game, GameState};

/// Which stage produced the final move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionReason {
    Food,
    Random,
    Fallback,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::Food => "food",
            DecisionReason::Random => "random",
            DecisionReason::Fallback => "fallback",
        }
    }
}

/// Outcome of one turn's decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
    /// Directions that survived the safety filters
    pub safe_moves: Vec<Direction>,
    pub target_length: usize,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging turned off
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    pub fn with_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME START {} as {}", game.id, you.name);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes the next move for POST /move using thread-local randomness
    pub fn get_move(&self, state: &GameState) -> Result<Value, TurnError> {
        self.get_move_with_rng(state, &mut rand::rng())
    }

    /// Same as `get_move` with an explicit random source
    ///
    /// # Returns
    /// * `Ok(Value)` - JSON response containing the chosen move and the reason as a shout
    /// * `Err(TurnError)` - the request was missing data the engine needs
    pub fn get_move_with_rng<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Value, TurnError> {
        let ctx = TurnContext::from_state(state)?;
        let decision = self.decide(&ctx, rng);

        match decision.reason {
            DecisionReason::Fallback => warn!(
                "MOVE {}: No safe moves detected! Moving {}",
                ctx.turn,
                decision.direction.as_str()
            ),
            _ => info!(
                "MOVE {}: {} ({}, safe: {:?}, length {}/{})",
                ctx.turn,
                decision.direction.as_str(),
                decision.reason.as_str(),
                decision.safe_moves,
                ctx.length(),
                decision.target_length
            ),
        }

        self.debug_logger
            .log_move(state.turn, state.board.clone(), state.you.clone(), &decision);

        Ok(json!({
            "move": decision.direction.as_str(),
            "shout": decision.reason.as_str(),
        }))
    }

    /// Runs the full decision for one turn
    pub fn decide<R: Rng + ?Sized>(&self, ctx: &TurnContext, rng: &mut R) -> Decision {
        let strategy = &self.config.strategy;
        let settings = PipelineSettings {
            tunnel_wall_threshold: strategy.tunnel_wall_threshold,
        };

        let moves = run_pipeline(ctx, &settings);
        let safe_moves = moves.safe_moves();
        let target = target_length(ctx, strategy.target_length_divisor);

        let decision = |direction, reason| Decision {
            direction,
            reason,
            safe_moves: safe_moves.clone(),
            target_length: target,
        };

        if strategy.seek_food && ctx.length() < target {
            if let Some(dir) = move_towards_food(&ctx.food, &ctx.head, &moves) {
                return decision(dir, DecisionReason::Food);
            }
        }

        match safe_moves.choose(rng) {
            Some(&dir) => decision(dir, DecisionReason::Random),
            None => decision(strategy.fallback_direction(), DecisionReason::Fallback),
        }
    }
}
