// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Game {
    pub id: String,
    pub ruleset: Value,
    pub timeout: u32,
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    #[serde(default)]
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
///
/// Only `head` and `body` are required on the wire; everything else falls back
/// to its default so that trimmed-down requests still parse.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        self.apply_n(coord, 1)
    }

    /// Calculates the coordinate `steps` cells away in this direction
    pub fn apply_n(&self, coord: &Coord, steps: i32) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + steps },
            Direction::Down => Coord { x: coord.x, y: coord.y - steps },
            Direction::Left => Coord { x: coord.x - steps, y: coord.y },
            Direction::Right => Coord { x: coord.x + steps, y: coord.y },
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_moves_one_cell() {
        let c = Coord::new(5, 5);
        assert_eq!(Direction::Up.apply(&c), Coord::new(5, 6));
        assert_eq!(Direction::Down.apply(&c), Coord::new(5, 4));
        assert_eq!(Direction::Left.apply(&c), Coord::new(4, 5));
        assert_eq!(Direction::Right.apply(&c), Coord::new(6, 5));
        assert_eq!(Direction::Right.apply_n(&c, 2), Coord::new(7, 5));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" left ".parse::<Direction>().unwrap(), Direction::Left);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_minimal_move_request_parses() {
        let raw = r#"{
            "turn": 3,
            "board": {
                "width": 11,
                "height": 11,
                "food": [{"x": 1, "y": 1}],
                "snakes": [
                    {"id": "me", "head": {"x": 5, "y": 5}, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}], "length": 2}
                ]
            },
            "you": {"id": "me", "head": {"x": 5, "y": 5}, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}], "length": 2}
        }"#;

        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.turn, 3);
        assert_eq!(state.board.snakes.len(), 1);
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.head, Coord::new(5, 5));
    }

    #[test]
    fn test_missing_head_is_rejected() {
        let raw = r#"{
            "turn": 0,
            "board": {"width": 11, "height": 11},
            "you": {"body": [{"x": 5, "y": 5}]}
        }"#;

        assert!(serde_json::from_str::<GameState>(raw).is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
    }
}
