mod common;

use box_pusher_core::{
    BoxId, CellCoord, Command, Direction, Event, MoveRejection, PushRejection,
};
use box_pusher_world::{self as world, apply_move, query};

use common::puzzle;

#[test]
fn stepping_onto_floor_counts_one_move() {
    let mut state = puzzle(
        "
        ######
        #@   #
        # $. #
        ######
        ",
    );
    let mut events = Vec::new();

    assert!(apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(query::player(&state).cell(), CellCoord::new(2, 1));
    let score = query::score(&state);
    assert_eq!(score.moves, 1);
    assert_eq!(score.pushes, 0);
    assert_eq!(query::turn_number(&state), 1);
    assert_eq!(
        events.first(),
        Some(&Event::PlayerMoved {
            from: CellCoord::new(1, 1),
            to: CellCoord::new(2, 1),
        })
    );
    assert!(matches!(events.last(), Some(Event::TargetsUpdated { .. })));
}

#[test]
fn wall_blocks_move_without_mutation() {
    let mut state = puzzle(
        "
        ######
        #@#  #
        # $. #
        ######
        ",
    );
    let before = state.clone();
    let mut events = Vec::new();

    assert!(!apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(state, before);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Right,
            reason: MoveRejection::Wall,
        }]
    );
}

#[test]
fn box_against_wall_cannot_be_pushed() {
    let mut state = puzzle(
        "
        #####
        #@$##
        #  .#
        #####
        ",
    );
    let before = state.clone();
    let mut events = Vec::new();

    assert!(!apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(state, before);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Right,
            reason: MoveRejection::PushBlocked {
                box_id: BoxId::new(0),
                reason: PushRejection::Wall,
            },
        }]
    );
}

#[test]
fn box_against_box_cannot_be_pushed() {
    let mut state = puzzle(
        "
        ######
        #@$$ #
        # .. #
        ######
        ",
    );
    let before = state.clone();
    let mut events = Vec::new();

    assert!(!apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(state, before);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Right,
            reason: MoveRejection::PushBlocked {
                box_id: BoxId::new(0),
                reason: PushRejection::Occupied { by: BoxId::new(1) },
            },
        }]
    );
}

#[test]
fn grid_edges_reject_player_and_boxes() {
    let mut state = puzzle(".@$");
    let before = state.clone();
    let mut events = Vec::new();

    assert!(!apply_move(&mut state, Direction::Up, &mut events));
    assert!(!apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(state, before);
    assert_eq!(
        events,
        vec![
            Event::MoveRejected {
                direction: Direction::Up,
                reason: MoveRejection::OutOfBounds,
            },
            Event::MoveRejected {
                direction: Direction::Right,
                reason: MoveRejection::PushBlocked {
                    box_id: BoxId::new(0),
                    reason: PushRejection::OutOfBounds,
                },
            },
        ]
    );
}

#[test]
fn push_moves_box_and_player_together() {
    let mut state = puzzle(
        "
        #######
        #@$ . #
        #######
        ",
    );
    let mut events = Vec::new();

    assert!(apply_move(&mut state, Direction::Right, &mut events));

    assert_eq!(query::player(&state).cell(), CellCoord::new(2, 1));
    let pushed = query::box_at(&state, CellCoord::new(3, 1)).expect("box moved");
    assert_eq!(pushed.id(), BoxId::new(0));
    assert!(!pushed.on_target());
    assert!(query::box_at(&state, CellCoord::new(2, 1)).is_none());

    let score = query::score(&state);
    assert_eq!(score.moves, 1);
    assert_eq!(score.pushes, 1);
    assert_eq!(
        events[0],
        Event::BoxPushed {
            box_id: BoxId::new(0),
            from: CellCoord::new(2, 1),
            to: CellCoord::new(3, 1),
            on_target: false,
        }
    );
    assert_eq!(
        events[1],
        Event::PlayerMoved {
            from: CellCoord::new(1, 1),
            to: CellCoord::new(2, 1),
        }
    );
}

#[test]
fn pushing_onto_target_flags_box_and_target() {
    let mut state = puzzle(
        "
        ######
        #@$.$#
        #   .#
        ######
        ",
    );
    let mut events = Vec::new();

    assert!(apply_move(&mut state, Direction::Right, &mut events));

    let pushed = query::box_at(&state, CellCoord::new(3, 1)).expect("box on target");
    assert!(pushed.on_target());
    assert!(query::target_at(&state, CellCoord::new(3, 1))
        .expect("target")
        .completed());
    assert!(!query::target_at(&state, CellCoord::new(4, 2))
        .expect("target")
        .completed());
    assert_eq!(query::completed_targets(&state), 1);
}

#[test]
fn pushing_off_target_clears_flags() {
    let mut state = puzzle(
        "
        #######
        #@* $.#
        #######
        ",
    );
    let mut events = Vec::new();

    assert!(apply_move(&mut state, Direction::Right, &mut events));

    let pushed = query::box_at(&state, CellCoord::new(3, 1)).expect("box moved");
    assert!(!pushed.on_target());
    assert_eq!(query::completed_targets(&state), 0);
}

#[test]
fn move_command_dispatches_to_engine() {
    let mut state = puzzle(
        "
        #####
        #@$.#
        #####
        ",
    );
    let mut events = Vec::new();

    world::apply(
        &mut state,
        Command::Move {
            direction: Direction::Right,
        },
        &mut events,
    );

    assert_eq!(query::player(&state).cell(), CellCoord::new(2, 1));
    assert!(query::is_won(&state));
}
