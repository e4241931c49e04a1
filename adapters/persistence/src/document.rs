//! Serializable mirror of a puzzle state.

use box_pusher_core::{BoxId, CellCoord, CellKind, GameStatus, Rewards, Score};
use box_pusher_world::{query, Grid, PuzzleParts, PuzzleState};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PersistenceError;

/// Snapshot document written to and read from disk.
///
/// Field names and nesting match the on-disk JSON layout exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    /// Player position and selection.
    pub player: SavedPlayer,
    /// Cell kinds indexed as `grid[y][x]`.
    pub grid: Vec<Vec<CellKind>>,
    /// Boxes in generation order.
    pub boxes: Vec<SavedBox>,
    /// Targets in generation order.
    pub targets: Vec<SavedTarget>,
    /// Running score.
    pub score: Score,
    /// Completion rewards.
    pub rewards: Rewards,
    /// Level number.
    pub level: u32,
    /// Accepted action counter.
    pub turn_number: u32,
    /// Lifecycle status.
    pub game_status: GameStatus,
    /// Snapshot step counter.
    pub step: u64,
    /// Declared number of grid columns.
    pub grid_width: u32,
    /// Declared number of grid rows.
    pub grid_height: u32,
}

/// Persisted player entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    /// Column of the player.
    pub x: u32,
    /// Row of the player.
    pub y: u32,
    /// Identifier of the selected box.
    pub selected_box: Option<BoxId>,
}

/// Persisted box entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBox {
    /// Column of the box.
    pub x: u32,
    /// Row of the box.
    pub y: u32,
    /// Box identifier.
    pub id: BoxId,
    /// Whether the box covered a target when saved.
    pub on_target: bool,
}

/// Persisted target entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTarget {
    /// Column of the target.
    pub x: u32,
    /// Row of the target.
    pub y: u32,
    /// Whether a box covered the target when saved.
    pub completed: bool,
}

impl SavedState {
    /// Captures every field of the provided state.
    #[must_use]
    pub fn capture(state: &PuzzleState) -> Self {
        let grid = query::grid(state);
        let player = query::player(state);
        Self {
            player: SavedPlayer {
                x: player.cell().column(),
                y: player.cell().row(),
                selected_box: player.selected_box(),
            },
            grid: grid.iter_rows().map(<[CellKind]>::to_vec).collect(),
            boxes: query::boxes(state)
                .iter()
                .map(|entry| SavedBox {
                    x: entry.cell().column(),
                    y: entry.cell().row(),
                    id: entry.id(),
                    on_target: entry.on_target(),
                })
                .collect(),
            targets: query::targets(state)
                .iter()
                .map(|target| SavedTarget {
                    x: target.cell().column(),
                    y: target.cell().row(),
                    completed: target.completed(),
                })
                .collect(),
            score: query::score(state),
            rewards: query::rewards(state),
            level: query::level(state),
            turn_number: query::turn_number(state),
            game_status: query::status(state),
            step: query::step(state),
            grid_width: grid.columns(),
            grid_height: grid.rows(),
        }
    }

    /// Validates the document and rebuilds the puzzle state it describes.
    ///
    /// Stored `on_target` and `completed` flags are ignored and re-derived
    /// from positions.
    pub fn restore(self) -> Result<PuzzleState, PersistenceError> {
        let declared_rows = usize::try_from(self.grid_height).unwrap_or(usize::MAX);
        if self.grid.len() != declared_rows {
            return Err(PersistenceError::DimensionMismatch {
                declared_width: self.grid_width,
                declared_height: self.grid_height,
                row: None,
                actual: self.grid.len(),
            });
        }
        let declared_columns = usize::try_from(self.grid_width).unwrap_or(usize::MAX);
        if let Some((row, cells)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != declared_columns)
        {
            return Err(PersistenceError::DimensionMismatch {
                declared_width: self.grid_width,
                declared_height: self.grid_height,
                row: Some(row),
                actual: cells.len(),
            });
        }

        let stored_flags = self.boxes.iter().filter(|entry| entry.on_target).count()
            + self.targets.iter().filter(|target| target.completed).count();

        let grid = Grid::from_rows(self.grid)?;
        let mut parts = PuzzleParts::new(grid, CellCoord::new(self.player.x, self.player.y));
        parts.selected_box = self.player.selected_box;
        parts.boxes = self
            .boxes
            .iter()
            .map(|entry| (entry.id, CellCoord::new(entry.x, entry.y)))
            .collect();
        parts.targets = self
            .targets
            .iter()
            .map(|target| CellCoord::new(target.x, target.y))
            .collect();
        parts.score = self.score;
        parts.rewards = self.rewards;
        parts.level = self.level;
        parts.turn_number = self.turn_number;
        parts.status = self.game_status;
        parts.step = self.step;

        let state = PuzzleState::from_parts(parts)?;
        let derived = query::completed_targets(&state) * 2;
        if derived != stored_flags {
            debug!(
                event = "overlay_flags_rederived",
                stored = stored_flags,
                derived,
            );
        }
        Ok(state)
    }
}
