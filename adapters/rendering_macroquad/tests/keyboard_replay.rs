use box_pusher_core::{Direction, PlayerAction};
use box_pusher_rendering_macroquad::KeyboardState;

fn replay(frames: &[KeyboardState]) -> Vec<Option<PlayerAction>> {
    frames
        .iter()
        .map(|keys| keys.frame_input().action)
        .collect()
}

#[test]
fn keyboard_sequence_resolves_deterministically() {
    let frames = [
        KeyboardState {
            right: true,
            ..KeyboardState::default()
        },
        KeyboardState::default(),
        KeyboardState {
            up: true,
            down: true,
            ..KeyboardState::default()
        },
        KeyboardState {
            select: true,
            ..KeyboardState::default()
        },
        KeyboardState {
            new_level: true,
            ..KeyboardState::default()
        },
    ];
    let expected = vec![
        Some(PlayerAction::Move(Direction::Right)),
        None,
        Some(PlayerAction::Move(Direction::Up)),
        Some(PlayerAction::ToggleSelection),
        Some(PlayerAction::NewLevel),
    ];

    assert_eq!(replay(&frames), expected);
    assert_eq!(replay(&frames), replay(&frames));
}
