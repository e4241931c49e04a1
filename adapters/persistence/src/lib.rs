#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! JSON persistence for puzzle snapshots.
//!
//! Snapshots are pretty-printed JSON documents named
//! `game_state_step_<n>.json`. Decoding validates the document shape and every
//! puzzle invariant before a state is handed back to the caller.

mod document;
mod store;

use std::{io, path::PathBuf};

use box_pusher_world::{PuzzleState, StateError};
use thiserror::Error;

pub use document::{SavedBox, SavedPlayer, SavedState, SavedTarget};
pub use store::{SnapshotStore, SNAPSHOT_EXTENSION, SNAPSHOT_PREFIX};

/// Failures raised while reading or writing snapshots.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A filesystem operation failed.
    #[error("failed to access {}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The document is not valid snapshot JSON.
    #[error("malformed snapshot document")]
    Json(#[from] serde_json::Error),
    /// The grid does not match its declared dimensions.
    #[error(
        "grid does not match declared size {declared_width}x{declared_height} \
         (row {row:?} has {actual} entries)"
    )]
    DimensionMismatch {
        /// Declared column count.
        declared_width: u32,
        /// Declared row count.
        declared_height: u32,
        /// Offending row, or `None` when the row count itself is wrong.
        row: Option<usize>,
        /// Observed length.
        actual: usize,
    },
    /// The document describes a state that violates puzzle invariants.
    #[error("snapshot describes an invalid puzzle")]
    InvalidState(#[from] StateError),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Serializes the state as pretty JSON with two-space indentation.
pub fn encode(state: &PuzzleState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&SavedState::capture(state))?)
}

/// Parses and validates a JSON snapshot.
pub fn decode(json: &str) -> Result<PuzzleState, PersistenceError> {
    let document: SavedState = serde_json::from_str(json)?;
    document.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_pusher_core::{BoxId, CellCoord, CellKind, Direction, GameStatus};
    use box_pusher_world::{apply_move, query, toggle_selection, Grid, PuzzleParts};

    fn corridor() -> PuzzleState {
        let mut grid = Grid::new(6, 3);
        grid.stamp_border();
        let _ = grid.set(CellCoord::new(3, 1), CellKind::Target);
        let _ = grid.set(CellCoord::new(2, 1), CellKind::Box);
        let mut parts = PuzzleParts::new(grid, CellCoord::new(1, 1));
        parts.targets = vec![CellCoord::new(3, 1)];
        parts.boxes = vec![(BoxId::new(0), CellCoord::new(2, 1))];
        PuzzleState::from_parts(parts).expect("valid corridor")
    }

    #[test]
    fn decode_restores_every_field() {
        let mut state = corridor();
        let mut events = Vec::new();
        assert!(toggle_selection(&mut state, &mut events));
        assert!(apply_move(&mut state, Direction::Right, &mut events));
        assert_eq!(query::status(&state), GameStatus::Won);

        let json = encode(&state).expect("encode");
        let restored = decode(&json).expect("decode");

        assert_eq!(restored, state);
    }

    #[test]
    fn encoding_uses_documented_field_names() {
        let json = encode(&corridor()).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["player"]["x"], 1);
        assert_eq!(value["player"]["selected_box"], serde_json::Value::Null);
        assert_eq!(value["grid"][0][0], "wall");
        assert_eq!(value["grid"][1][2], "box");
        assert_eq!(value["grid"][1][3], "target");
        assert_eq!(value["boxes"][0]["id"], 0);
        assert_eq!(value["targets"][0]["completed"], false);
        assert_eq!(value["score"]["time_bonus"], 1_000);
        assert_eq!(value["rewards"]["perfect_solution"], false);
        assert_eq!(value["game_status"], "playing");
        assert_eq!(value["grid_width"], 6);
        assert_eq!(value["grid_height"], 3);
        assert!(json.contains("\n  \"player\": {"), "expected two-space indentation");
    }

    #[test]
    fn stored_overlay_flags_are_rederived() {
        let json = encode(&corridor()).expect("encode");
        let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        value["boxes"][0]["on_target"] = serde_json::Value::Bool(true);
        value["targets"][0]["completed"] = serde_json::Value::Bool(true);

        let restored = decode(&value.to_string()).expect("decode");

        assert!(!query::boxes(&restored)[0].on_target());
        assert_eq!(query::completed_targets(&restored), 0);
    }

    #[test]
    fn unknown_cell_kind_is_rejected() {
        let json = encode(&corridor()).expect("encode");
        let tampered = json.replacen("\"wall\"", "\"lava\"", 1);
        assert!(matches!(decode(&tampered), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn declared_dimensions_must_match_grid() {
        let json = encode(&corridor()).expect("encode");
        let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        value["grid_width"] = serde_json::Value::from(7);

        assert!(matches!(
            decode(&value.to_string()),
            Err(PersistenceError::DimensionMismatch {
                row: Some(0),
                actual: 6,
                ..
            })
        ));
    }

    #[test]
    fn invariant_violations_are_rejected() {
        let json = encode(&corridor()).expect("encode");
        let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        value["boxes"][0]["x"] = serde_json::Value::from(0);

        assert!(matches!(
            decode(&value.to_string()),
            Err(PersistenceError::InvalidState(StateError::OnWall { .. }))
        ));
    }
}
