// Safety filter pipeline
//
// Each stage reads the TurnContext and may only clear entries in the MoveSet.
// Stages are independent of each other; the order below only saves work for the
// tunnel check, which skips directions already ruled out.

use log::debug;

use crate::board::TurnContext;
use crate::move_set::MoveSet;
use crate::types::{Coord, Direction};

/// A single narrowing step
pub type Stage = fn(&TurnContext, &mut MoveSet, &PipelineSettings);

/// Tuning shared by the stages
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub tunnel_wall_threshold: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            tunnel_wall_threshold: 3,
        }
    }
}

/// The stages in the order they run
pub const STAGES: [(&str, Stage); 7] = [
    ("reverse", avoid_reverse),
    ("bounds", avoid_bounds),
    ("self", avoid_self),
    ("opponents", avoid_opponent_bodies),
    ("tunnel", avoid_tunnels),
    ("head_on", avoid_head_on),
    ("head_following", avoid_head_following),
];

/// Runs every stage over a fresh MoveSet and returns what survives
pub fn run_pipeline(ctx: &TurnContext, settings: &PipelineSettings) -> MoveSet {
    let mut moves = MoveSet::all_safe();

    for (name, stage) in STAGES.iter() {
        let before = moves;
        stage(ctx, &mut moves, settings);
        if moves != before {
            debug!(
                "Turn {}: {} filter narrowed {:?} -> {:?}",
                ctx.turn,
                name,
                before.safe_moves(),
                moves.safe_moves()
            );
        }
    }

    moves
}

/// Don't turn back onto the neck
pub fn avoid_reverse(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    let Some(neck) = ctx.neck() else {
        return;
    };
    let head = ctx.head;

    if neck.x < head.x {
        moves.forbid(Direction::Left);
    } else if neck.x > head.x {
        moves.forbid(Direction::Right);
    } else if neck.y < head.y {
        moves.forbid(Direction::Down);
    } else if neck.y > head.y {
        moves.forbid(Direction::Up);
    }
}

pub fn avoid_bounds(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    let head = ctx.head;

    if head.x == 0 {
        moves.forbid(Direction::Left);
    }
    if head.x == ctx.width - 1 {
        moves.forbid(Direction::Right);
    }
    if head.y == 0 {
        moves.forbid(Direction::Down);
    }
    if head.y == ctx.height - 1 {
        moves.forbid(Direction::Up);
    }
}

/// Tail included: it has not moved yet when this turn resolves
pub fn avoid_self(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    for dir in Direction::all() {
        if ctx.body.contains(&dir.apply(&ctx.head)) {
            moves.forbid(dir);
        }
    }
}

pub fn avoid_opponent_bodies(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    for dir in Direction::all() {
        let next = dir.apply(&ctx.head);
        if ctx.opponents.iter().any(|o| o.body.contains(&next)) {
            moves.forbid(dir);
        }
    }
}

/// Counts the blocked neighbours of `cell`: off-board or on any body
pub fn blocked_neighbours(ctx: &TurnContext, cell: &Coord) -> usize {
    Direction::all()
        .iter()
        .map(|d| d.apply(cell))
        .filter(|n| {
            !ctx.in_bounds(n)
                || ctx.body.contains(n)
                || ctx.opponents.iter().any(|o| o.body.contains(n))
        })
        .count()
}

/// Skip destinations that are close to a dead end
pub fn avoid_tunnels(ctx: &TurnContext, moves: &mut MoveSet, settings: &PipelineSettings) {
    for dir in Direction::all() {
        if !moves.is_safe(dir) {
            continue;
        }
        let next = dir.apply(&ctx.head);
        if blocked_neighbours(ctx, &next) >= settings.tunnel_wall_threshold {
            moves.forbid(dir);
        }
    }
}

/// Any opponent may step to any cell next to its head, regardless of its own safety
pub fn avoid_head_on(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    for opponent in &ctx.opponents {
        let reachable: Vec<Coord> = Direction::all()
            .iter()
            .map(|d| d.apply(&opponent.head))
            .collect();

        for dir in Direction::all() {
            if reachable.contains(&dir.apply(&ctx.head)) {
                moves.forbid(dir);
            }
        }
    }
}

/// Don't step onto an opponent head unless its own body continues straight behind it
pub fn avoid_head_following(ctx: &TurnContext, moves: &mut MoveSet, _: &PipelineSettings) {
    for opponent in &ctx.opponents {
        for dir in Direction::all() {
            let next = dir.apply(&ctx.head);
            let beyond = dir.apply_n(&ctx.head, 2);
            if next == opponent.head && !opponent.body.contains(&beyond) {
                moves.forbid(dir);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Opponent;

    fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
        cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn ctx(body: &[(i32, i32)], opponents: &[&[(i32, i32)]]) -> TurnContext {
        let body = coords(body);
        TurnContext {
            turn: 1,
            width: 11,
            height: 11,
            head: body[0],
            body,
            opponents: opponents
                .iter()
                .map(|o| {
                    let body = coords(o);
                    Opponent {
                        head: body[0],
                        body,
                    }
                })
                .collect(),
            food: vec![],
        }
    }

    fn apply(stage: Stage, ctx: &TurnContext) -> MoveSet {
        let mut moves = MoveSet::all_safe();
        stage(ctx, &mut moves, &PipelineSettings::default());
        moves
    }

    #[test]
    fn test_reverse_guard_blocks_neck() {
        let c = ctx(&[(5, 5), (5, 4)], &[]);
        let moves = apply(avoid_reverse, &c);
        assert_eq!(
            moves.safe_moves(),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_reverse_guard_noop_for_single_segment() {
        let c = ctx(&[(5, 5)], &[]);
        assert_eq!(apply(avoid_reverse, &c), MoveSet::all_safe());
    }

    #[test]
    fn test_reverse_guard_noop_for_stacked_start() {
        let c = ctx(&[(5, 5), (5, 5), (5, 5)], &[]);
        assert_eq!(apply(avoid_reverse, &c), MoveSet::all_safe());
    }

    #[test]
    fn test_bounds_guard_corners() {
        let c = ctx(&[(0, 0)], &[]);
        assert_eq!(
            apply(avoid_bounds, &c).safe_moves(),
            vec![Direction::Up, Direction::Right]
        );

        let c = ctx(&[(10, 10)], &[]);
        assert_eq!(
            apply(avoid_bounds, &c).safe_moves(),
            vec![Direction::Down, Direction::Left]
        );
    }

    #[test]
    fn test_self_guard_includes_tail() {
        // Curled up: tail sits right of the head
        let c = ctx(&[(5, 5), (5, 4), (6, 4), (6, 5)], &[]);
        let moves = apply(avoid_self, &c);
        assert!(!moves.is_safe(Direction::Down));
        assert!(!moves.is_safe(Direction::Right));
        assert!(moves.is_safe(Direction::Up));
        assert!(moves.is_safe(Direction::Left));
    }

    #[test]
    fn test_opponent_body_guard() {
        let c = ctx(&[(5, 5), (5, 4)], &[&[(4, 7), (4, 6), (4, 5)]]);
        let moves = apply(avoid_opponent_bodies, &c);
        assert!(!moves.is_safe(Direction::Left));
        assert_eq!(moves.safe_moves().len(), 3);
    }

    #[test]
    fn test_tunnel_guard_blocks_dead_end() {
        // Cell (0, 6) above the head is walled on the left, by the head below
        // and by our body at (1, 6)
        let c = ctx(&[(0, 5), (1, 5), (1, 6), (1, 7)], &[]);
        let moves = apply(avoid_tunnels, &c);
        assert!(!moves.is_safe(Direction::Up));
    }

    #[test]
    fn test_tunnel_guard_counts_opponent_bodies() {
        // (5, 6) above the head is flanked by two opponent bodies; our head is the third wall
        let c = ctx(
            &[(5, 5), (5, 4)],
            &[&[(4, 8), (4, 7), (4, 6)], &[(6, 8), (6, 7), (6, 6)]],
        );
        assert_eq!(blocked_neighbours(&c, &Coord::new(5, 6)), 3);

        let moves = apply(avoid_tunnels, &c);
        assert!(!moves.is_safe(Direction::Up));
        assert!(moves.is_safe(Direction::Left));
        assert!(moves.is_safe(Direction::Right));
    }

    #[test]
    fn test_tunnel_guard_allows_open_cell() {
        let c = ctx(&[(5, 5), (5, 4)], &[]);
        assert_eq!(apply(avoid_tunnels, &c), MoveSet::all_safe());
    }

    #[test]
    fn test_tunnel_guard_skips_already_unsafe() {
        let c = ctx(&[(0, 5), (1, 5), (1, 6), (1, 7)], &[]);
        let mut moves = MoveSet::all_safe();
        moves.forbid(Direction::Up);
        avoid_tunnels(&c, &mut moves, &PipelineSettings::default());
        assert!(!moves.is_safe(Direction::Up));
    }

    #[test]
    fn test_tunnel_threshold_is_configurable() {
        // Open board: every destination has exactly one blocked neighbour (our head)
        let c = ctx(&[(5, 5)], &[]);
        let mut moves = MoveSet::all_safe();
        avoid_tunnels(
            &c,
            &mut moves,
            &PipelineSettings {
                tunnel_wall_threshold: 1,
            },
        );
        assert!(moves.is_empty());
    }

    #[test]
    fn test_head_on_guard() {
        // Opponent head two cells to the right can reach (6, 5)
        let c = ctx(&[(5, 5), (4, 5)], &[&[(7, 5), (8, 5)]]);
        let moves = apply(avoid_head_on, &c);
        assert!(!moves.is_safe(Direction::Right));
        assert!(moves.is_safe(Direction::Up));
        assert!(moves.is_safe(Direction::Down));
    }

    #[test]
    fn test_head_on_guard_diagonal() {
        let c = ctx(&[(5, 5), (4, 5)], &[&[(6, 6), (7, 6)]]);
        let moves = apply(avoid_head_on, &c);
        assert!(!moves.is_safe(Direction::Right));
        assert!(!moves.is_safe(Direction::Up));
        assert!(moves.is_safe(Direction::Down));
    }

    #[test]
    fn test_head_following_guard() {
        let c = ctx(&[(5, 5), (4, 5)], &[&[(6, 5), (6, 6)]]);
        let moves = apply(avoid_head_following, &c);
        assert!(!moves.is_safe(Direction::Right));
    }

    #[test]
    fn test_head_following_allowed_when_body_continues() {
        let c = ctx(&[(5, 5), (4, 5)], &[&[(6, 5), (7, 5)]]);
        let moves = apply(avoid_head_following, &c);
        assert!(moves.is_safe(Direction::Right));
    }

    #[test]
    fn test_every_stage_is_monotonic() {
        let c = ctx(
            &[(1, 1), (1, 0), (0, 0)],
            &[&[(3, 1), (3, 2), (2, 2)], &[(1, 3), (0, 3)]],
        );
        let settings = PipelineSettings::default();

        // Start every stage from a partially narrowed set too
        let mut seeded = MoveSet::all_safe();
        seeded.forbid(Direction::Up);

        for start in [MoveSet::all_safe(), seeded] {
            for (name, stage) in STAGES.iter() {
                let mut moves = start;
                stage(&c, &mut moves, &settings);
                assert!(moves.is_subset_of(&start), "{} stage grew the set", name);
            }
        }
    }

    #[test]
    fn test_pipeline_open_board() {
        let c = ctx(&[(5, 5), (5, 4)], &[]);
        let moves = run_pipeline(&c, &PipelineSettings::default());
        assert_eq!(
            moves.safe_moves(),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_pipeline_boxed_in() {
        // Head in the corner with body and opponent blocking the rest
        let c = ctx(&[(0, 0), (1, 0), (1, 1)], &[&[(0, 2), (0, 1)]]);
        assert!(run_pipeline(&c, &PipelineSettings::default()).is_empty());
    }
}
