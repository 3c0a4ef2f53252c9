// Free-space estimate driving how long the snake wants to be

use std::collections::HashSet;

use crate::board::TurnContext;
use crate::types::Coord;

/// Number of cells on a width x height board not covered by `occupied`
pub fn free_cell_count(width: i32, height: i32, occupied: &HashSet<Coord>) -> usize {
    (0..width)
        .flat_map(|x| (0..height).map(move |y| Coord { x, y }))
        .filter(|c| !occupied.contains(c))
        .count()
}

/// Body length below which the snake goes looking for food
pub fn target_length(ctx: &TurnContext, divisor: usize) -> usize {
    free_cell_count(ctx.width, ctx.height, &ctx.occupied()) / divisor.max(1)
}
