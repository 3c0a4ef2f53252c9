// Greedy food seeking
//
// Picks the nearest food by Manhattan distance and steps toward it along
// whichever safe axis the delta favours. No pathfinding.

use crate::move_set::MoveSet;
use crate::types::{Coord, Direction};

/// First food item at minimal Manhattan distance from `head`
pub fn nearest_food(food: &[Coord], head: &Coord) -> Option<Coord> {
    food.iter().min_by_key(|f| f.manhattan(head)).copied()
}

/// Safe direction toward the nearest food, checked left, right, down, up
pub fn move_towards_food(food: &[Coord], head: &Coord, moves: &MoveSet) -> Option<Direction> {
    let target = nearest_food(food, head)?;

    let candidates = [
        (target.x < head.x, Direction::Left),
        (target.x > head.x, Direction::Right),
        (target.y < head.y, Direction::Down),
        (target.y > head.y, Direction::Up),
    ];

    candidates
        .into_iter()
        .find(|&(favoured, dir)| favoured && moves.is_safe(dir))
        .map(|(_, dir)| dir)
}
