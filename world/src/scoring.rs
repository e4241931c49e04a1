//! Target completion, score recomputation and win detection.

use box_pusher_core::{
    Event, GameStatus, Score, MOVE_EFFICIENCY_BONUS, PERFECT_SOLUTION_BONUS, TARGET_POINTS,
};
use tracing::info;

use crate::PuzzleState;

/// Computes the points owed for the provided completion count and score.
///
/// The perfect-solution bonus is included whenever it has already been
/// earned, so later recomputations do not strip it.
#[must_use]
pub fn points_for(completed: u32, score: &Score, perfect_solution: bool) -> u32 {
    let coverage = completed.saturating_mul(TARGET_POINTS);
    let efficiency = score.time_bonus.saturating_sub(score.moves);
    let perfect = if perfect_solution {
        PERFECT_SOLUTION_BONUS
    } else {
        0
    };
    coverage.saturating_add(efficiency).saturating_add(perfect)
}

/// Refreshes derived flags, recomputes points and detects the first win.
pub fn recompute_and_check_win(state: &mut PuzzleState, out_events: &mut Vec<Event>) {
    let completed = state.refresh_overlays();
    let total = u32::try_from(state.targets.len()).unwrap_or(u32::MAX);

    state.score.points = points_for(completed, &state.score, state.rewards.perfect_solution);

    if completed == total && state.status == GameStatus::Playing {
        state.score.level_complete = true;
        state.status = GameStatus::Won;

        let boxes = u32::try_from(state.boxes.len()).unwrap_or(u32::MAX);
        let moves = state.score.moves;
        if moves <= boxes.saturating_mul(2) {
            state.rewards.move_efficiency_bonus = MOVE_EFFICIENCY_BONUS;
        }
        if u64::from(moves) * 2 <= u64::from(boxes) * 3 {
            state.rewards.perfect_solution = true;
            state.score.points = state.score.points.saturating_add(PERFECT_SOLUTION_BONUS);
        }

        info!(
            event = "level_completed",
            level = state.level,
            moves,
            pushes = state.score.pushes,
            points = state.score.points,
            perfect = state.rewards.perfect_solution,
        );
        out_events.push(Event::TargetsUpdated {
            completed,
            total,
            points: state.score.points,
        });
        out_events.push(Event::LevelCompleted {
            moves,
            pushes: state.score.pushes,
            points: state.score.points,
            perfect_solution: state.rewards.perfect_solution,
        });
        return;
    }

    out_events.push(Event::TargetsUpdated {
        completed,
        total,
        points: state.score.points,
    });
}
