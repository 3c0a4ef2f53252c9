// Fixed four-slot record of which directions are still considered safe

use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSet {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl Default for MoveSet {
    fn default() -> Self {
        Self::all_safe()
    }
}

impl MoveSet {
    pub fn all_safe() -> Self {
        MoveSet {
            up: true,
            down: true,
            left: true,
            right: true,
        }
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Marks a direction unsafe; entries never go back to safe
    pub fn forbid(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }

    /// Safe directions in up, down, left, right order
    pub fn safe_moves(&self) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|&d| self.is_safe(d))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// True when every direction safe here is also safe in `other`
    pub fn is_subset_of(&self, other: &MoveSet) -> bool {
        Direction::all()
            .into_iter()
            .all(|d| !self.is_safe(d) || other.is_safe(d))
    }
}
