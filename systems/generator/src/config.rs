use box_pusher_core::DEFAULT_TIME_BONUS;
use serde::Deserialize;

use crate::GenerationError;

/// Smallest grid that still leaves an interior cell inside the border.
pub const MIN_DIMENSION: u32 = 3;

/// Tuning knobs controlling level layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Number of grid columns, border included.
    pub width: u32,
    /// Number of grid rows, border included.
    pub height: u32,
    /// Fewest interior wall placement attempts drawn per layout.
    pub min_wall_attempts: u32,
    /// Most interior wall placement attempts drawn per layout.
    pub max_wall_attempts: u32,
    /// Fewest targets placed per level.
    pub min_targets: u32,
    /// Most targets placed per level.
    pub max_targets: u32,
    /// Time bonus baseline stamped into the score.
    pub time_bonus: u32,
    /// Random draws allowed for a single player, target or box placement.
    pub placement_attempts: u32,
    /// Layouts abandoned before generation gives up.
    pub layout_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 10,
            min_wall_attempts: 8,
            max_wall_attempts: 15,
            min_targets: 3,
            max_targets: 6,
            time_bonus: DEFAULT_TIME_BONUS,
            placement_attempts: 1_000,
            layout_attempts: 32,
        }
    }
}

impl GeneratorConfig {
    /// Default configuration resized to the provided grid dimensions.
    #[must_use]
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Rejects configurations the generator cannot honour.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(GenerationError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        check_range("wall_attempts", self.min_wall_attempts, self.max_wall_attempts)?;
        check_range("targets", self.min_targets, self.max_targets)?;
        if self.min_targets == 0 {
            return Err(GenerationError::InvalidRange {
                name: "targets",
                min: self.min_targets,
                max: self.max_targets,
            });
        }
        if self.placement_attempts == 0 {
            return Err(GenerationError::ZeroBudget {
                name: "placement_attempts",
            });
        }
        if self.layout_attempts == 0 {
            return Err(GenerationError::ZeroBudget {
                name: "layout_attempts",
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: u32, max: u32) -> Result<(), GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidRange { name, min, max });
    }
    Ok(())
}
