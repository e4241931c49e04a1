//! Projection of the puzzle state into a renderable scene.

use box_pusher_rendering::{BoxPresentation, HudPresentation, Scene, TargetPresentation};
use box_pusher_world::{query, PuzzleState};

/// Builds the scene drawn for the provided state.
pub(crate) fn from_state(state: &PuzzleState) -> Scene {
    let grid = query::grid(state);
    let selected = query::player(state).selected_box();
    let score = query::score(state);

    Scene {
        columns: grid.columns(),
        rows: grid.rows(),
        walls: grid
            .iter()
            .filter(|(_, kind)| kind.is_wall())
            .map(|(cell, _)| cell)
            .collect(),
        targets: query::targets(state)
            .iter()
            .map(|target| TargetPresentation {
                cell: target.cell(),
                completed: target.completed(),
            })
            .collect(),
        boxes: query::boxes(state)
            .iter()
            .map(|entry| BoxPresentation {
                id: entry.id(),
                cell: entry.cell(),
                on_target: entry.on_target(),
                selected: selected == Some(entry.id()),
            })
            .collect(),
        player: query::player(state).cell(),
        hud: HudPresentation {
            points: score.points,
            moves: score.moves,
            pushes: score.pushes,
            level: query::level(state),
            status: query::status(state),
            completed_targets: query::completed_targets(state),
            total_targets: query::targets(state).len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_pusher_core::{CellCoord, Direction, Event};
    use box_pusher_rendering::render_ascii;
    use box_pusher_world::{apply_move, toggle_selection};

    #[test]
    fn scene_mirrors_generated_level() {
        let state = box_pusher_system_generator::generate(12, 10, 3).expect("level");
        let scene = from_state(&state);

        assert_eq!((scene.columns, scene.rows), (12, 10));
        assert_eq!(scene.player, query::player(&state).cell());
        assert_eq!(scene.boxes.len(), scene.targets.len());
        assert_eq!(scene.hud.level, 1);
        assert_eq!(scene.hud.total_targets, scene.targets.len());
        assert!(scene.is_wall(CellCoord::new(0, 0)));
        assert!(scene.is_wall(CellCoord::new(11, 9)));
        assert!(!scene.is_wall(scene.player));
        assert_eq!(render_ascii(&scene).lines().count(), 10);
    }

    #[test]
    fn selection_and_score_are_projected() {
        let mut state = box_pusher_system_generator::generate(12, 10, 11).expect("level");
        let mut events: Vec<Event> = Vec::new();

        let mut toggled = toggle_selection(&mut state, &mut events);
        for direction in Direction::ALL {
            if toggled {
                break;
            }
            if apply_move(&mut state, direction, &mut events) {
                toggled = toggle_selection(&mut state, &mut events);
            }
        }

        let scene = from_state(&state);
        let selected: Vec<_> = scene.boxes.iter().filter(|entry| entry.selected).collect();
        assert_eq!(selected.len(), usize::from(toggled));
        assert_eq!(scene.hud.moves, query::score(&state).moves);
        assert_eq!(scene.hud.points, query::score(&state).points);
    }
}
