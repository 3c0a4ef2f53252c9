// Per-turn board model
//
// Turns the raw GameState into a read-only TurnContext that every filter stage
// reads from. Built once per move request and dropped with the response.

use log::warn;
use std::collections::HashSet;
use std::fmt;

use crate::types::{Battlesnake, Coord, GameState};

/// Reasons a move request cannot be turned into a TurnContext
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    EmptyBody,
    HeadMismatch { head: Coord, first_segment: Coord },
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::EmptyBody => write!(f, "own snake has an empty body"),
            TurnError::HeadMismatch {
                head,
                first_segment,
            } => write!(
                f,
                "own head ({}, {}) does not match first body segment ({}, {})",
                head.x, head.y, first_segment.x, first_segment.y
            ),
            TurnError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for TurnError {}

/// An opponent as the filters see it
#[derive(Debug, Clone)]
pub struct Opponent {
    pub head: Coord,
    pub body: Vec<Coord>,
}

/// Read-only snapshot of everything the engine needs for one turn
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub turn: i32,
    pub width: i32,
    pub height: i32,
    pub head: Coord,
    /// Own body, head first
    pub body: Vec<Coord>,
    pub opponents: Vec<Opponent>,
    pub food: Vec<Coord>,
}

impl TurnContext {
    pub fn from_state(state: &GameState) -> Result<Self, TurnError> {
        let board = &state.board;
        let you = &state.you;

        if board.width <= 0 || board.height <= 0 {
            return Err(TurnError::InvalidDimensions {
                width: board.width,
                height: board.height,
            });
        }

        let first_segment = *you.body.first().ok_or(TurnError::EmptyBody)?;
        if first_segment != you.head {
            return Err(TurnError::HeadMismatch {
                head: you.head,
                first_segment,
            });
        }

        Ok(TurnContext {
            turn: state.turn,
            width: board.width,
            height: board.height,
            head: you.head,
            body: you.body.clone(),
            opponents: opponents_of(you, &board.snakes),
            food: board.food.clone(),
        })
    }

    pub fn in_bounds(&self, c: &Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Own body plus every opponent body
    pub fn occupied(&self) -> HashSet<Coord> {
        self.body
            .iter()
            .chain(self.opponents.iter().flat_map(|o| o.body.iter()))
            .copied()
            .collect()
    }
}

/// Ids decide when both sides carry one; otherwise head and body must match
fn is_self(you: &Battlesnake, snake: &Battlesnake) -> bool {
    if !you.id.is_empty() && !snake.id.is_empty() {
        snake.id == you.id
    } else {
        snake.head == you.head && snake.body == you.body
    }
}

/// Every snake on the board except our own
///
/// The game server lists the requesting snake first; that is checked rather than
/// assumed, and a snake matching us anywhere in the list is excluded.
fn opponents_of(you: &Battlesnake, snakes: &[Battlesnake]) -> Vec<Opponent> {
    match snakes.iter().position(|s| is_self(you, s)) {
        Some(0) => {}
        Some(idx) => warn!("Own snake listed at index {} instead of 0", idx),
        None => warn!("Own snake '{}' missing from board snakes", you.id),
    }

    snakes
        .iter()
        .filter(|s| !is_self(you, s))
        .map(|s| Opponent {
            head: s.head,
            body: s.body.clone(),
        })
        .collect()
}
