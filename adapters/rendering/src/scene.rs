//! Backend-agnostic description of a single frame.

use box_pusher_core::{BoxId, CellCoord, GameStatus};

/// Key bindings shown at the bottom of the window.
pub const INSTRUCTIONS: &str = "WASD: Move | SPACE: Select Box | R: New Game";

/// Banner shown while the level is won.
pub const WIN_BANNER: &str = "LEVEL COMPLETE! Press R for new level";

/// Target drawn beneath boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetPresentation {
    /// Cell the target is anchored to.
    pub cell: CellCoord,
    /// Whether a box covers the target.
    pub completed: bool,
}

/// Box drawn above targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxPresentation {
    /// Identifier of the box.
    pub id: BoxId,
    /// Cell occupied by the box.
    pub cell: CellCoord,
    /// Whether the box rests on a target.
    pub on_target: bool,
    /// Whether the player has selected the box.
    pub selected: bool,
}

/// Score and status readouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudPresentation {
    /// Current points.
    pub points: u32,
    /// Accepted moves.
    pub moves: u32,
    /// Accepted pushes.
    pub pushes: u32,
    /// Level number.
    pub level: u32,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Targets covered by a box.
    pub completed_targets: usize,
    /// Targets in the level.
    pub total_targets: usize,
}

impl HudPresentation {
    /// `Score: P | Moves: M | Pushes: Q`
    #[must_use]
    pub fn score_line(&self) -> String {
        format!(
            "Score: {} | Moves: {} | Pushes: {}",
            self.points, self.moves, self.pushes
        )
    }

    /// `Level: L | Status: S`
    #[must_use]
    pub fn level_line(&self) -> String {
        format!("Level: {} | Status: {}", self.level, self.status)
    }

    /// `Targets: c/t`
    #[must_use]
    pub fn targets_line(&self) -> String {
        format!(
            "Targets: {}/{}",
            self.completed_targets, self.total_targets
        )
    }

    /// Win banner while the level is won.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        (self.status == GameStatus::Won).then_some(WIN_BANNER)
    }
}

/// Scene description combining the board, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Wall cells; every other cell is floor.
    pub walls: Vec<CellCoord>,
    /// Targets in generation order.
    pub targets: Vec<TargetPresentation>,
    /// Boxes in generation order.
    pub boxes: Vec<BoxPresentation>,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Score and status readouts.
    pub hud: HudPresentation,
}

impl Scene {
    /// Reports whether the cell is drawn as a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.walls.contains(&cell)
    }

    /// Box drawn at the cell, if any.
    #[must_use]
    pub fn box_at(&self, cell: CellCoord) -> Option<&BoxPresentation> {
        self.boxes.iter().find(|entry| entry.cell == cell)
    }

    /// Target drawn at the cell, if any.
    #[must_use]
    pub fn target_at(&self, cell: CellCoord) -> Option<&TargetPresentation> {
        self.targets.iter().find(|target| target.cell == cell)
    }
}
