//! Cosmetic box selection.
//!
//! Nothing in movement or push resolution reads the selection.

use box_pusher_core::{Direction, Event};

use crate::PuzzleState;

/// Toggles the selection of a box adjacent to the player.
///
/// Neighbours are scanned up, down, left, right. When a box is adjacent the
/// first one found becomes selected if nothing was selected, otherwise the
/// selection is cleared. Returns whether the selection changed.
pub fn toggle_selection(state: &mut PuzzleState, out_events: &mut Vec<Event>) -> bool {
    let origin = state.player.cell;
    let adjacent = Direction::ALL
        .iter()
        .filter_map(|direction| state.neighbor_within_grid(origin, *direction))
        .find_map(|cell| state.box_index_at(cell))
        .map(|index| state.boxes[index].id);

    let Some(candidate) = adjacent else {
        return false;
    };

    state.player.selected_box = match state.player.selected_box {
        Some(_) => None,
        None => Some(candidate),
    };
    state.advance_turn();
    out_events.push(Event::SelectionChanged {
        selected: state.player.selected_box,
    });
    true
}
