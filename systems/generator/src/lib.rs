#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic level generator producing fresh puzzle states from a seed.
//!
//! Layouts are drawn from a [`ChaCha8Rng`] stream, so identical seeds and
//! configurations always yield identical levels. Every rejection-sampling loop
//! is bounded; a placement that runs out of draws abandons the layout and the
//! generator starts over on the same stream.

mod config;

use box_pusher_core::{BoxId, CellCoord, CellKind, Score};
use box_pusher_world::{Grid, PuzzleParts, PuzzleState, StateError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info};

pub use config::{GeneratorConfig, MIN_DIMENSION};

/// Level number assigned when the caller does not track progression.
pub const FIRST_LEVEL: u32 = 1;

/// Failures surfaced while generating a level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The grid cannot hold a border and an interior.
    #[error("grid {width}x{height} is smaller than {min}x{min}", min = MIN_DIMENSION)]
    GridTooSmall {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
    /// A configured range is empty or otherwise unusable.
    #[error("{name} range {min}..={max} is invalid")]
    InvalidRange {
        /// Name of the offending range.
        name: &'static str,
        /// Configured lower bound.
        min: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// A sampling budget was configured as zero.
    #[error("{name} must be greater than zero")]
    ZeroBudget {
        /// Name of the offending budget.
        name: &'static str,
    },
    /// Every layout attempt ran out of placement draws.
    #[error("no valid layout found after {layouts} attempts")]
    Exhausted {
        /// Number of layouts abandoned.
        layouts: u32,
    },
    /// The assembled layout violated a puzzle invariant.
    #[error("generated layout is invalid: {0}")]
    InvalidState(#[from] StateError),
}

/// Level generator driven by a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator after validating the provided configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration the generator was created with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the level identified by the seed, stamped with the provided level number.
    pub fn generate(&self, seed: u64, level: u32) -> Result<PuzzleState, GenerationError> {
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for attempt in 1..=config.layout_attempts {
            let Some(layout) = Layout::sample(config, &mut rng) else {
                debug!(event = "layout_abandoned", seed, attempt);
                continue;
            };

            let targets = layout.targets.len();
            let mut parts = PuzzleParts::new(layout.grid, layout.player);
            parts.boxes = layout
                .boxes
                .into_iter()
                .zip(0..)
                .map(|(cell, index)| (BoxId::new(index), cell))
                .collect();
            parts.targets = layout.targets;
            parts.score = Score::with_time_bonus(config.time_bonus);
            parts.level = level;

            let state = PuzzleState::from_parts(parts)?;
            info!(
                event = "level_generated",
                seed,
                level,
                width = config.width,
                height = config.height,
                targets,
                attempt,
            );
            return Ok(state);
        }

        Err(GenerationError::Exhausted {
            layouts: config.layout_attempts,
        })
    }
}

/// Generates a first-level puzzle of the requested size with default tuning.
pub fn generate(width: u32, height: u32, seed: u64) -> Result<PuzzleState, GenerationError> {
    Generator::new(GeneratorConfig::with_dimensions(width, height))?.generate(seed, FIRST_LEVEL)
}

struct Layout {
    grid: Grid,
    player: CellCoord,
    targets: Vec<CellCoord>,
    boxes: Vec<CellCoord>,
}

impl Layout {
    fn sample(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> Option<Self> {
        let mut grid = Grid::new(config.width, config.height);
        grid.stamp_border();
        scatter_walls(&mut grid, config, rng);

        let budget = config.placement_attempts;
        let player = sample_interior(&grid, budget, rng, |kind, _| kind == CellKind::Empty)?;

        let target_count = rng.gen_range(config.min_targets..=config.max_targets);
        let mut targets = Vec::with_capacity(target_count as usize);
        for _ in 0..target_count {
            let cell = sample_interior(&grid, budget, rng, |kind, cell| {
                kind == CellKind::Empty && cell != player
            })?;
            let _ = grid.set(cell, CellKind::Target);
            targets.push(cell);
        }

        let mut boxes = Vec::with_capacity(targets.len());
        for _ in 0..targets.len() {
            let cell = sample_interior(&grid, budget, rng, |kind, cell| {
                kind == CellKind::Empty && cell != player
            })?;
            let _ = grid.set(cell, CellKind::Box);
            boxes.push(cell);
        }

        Some(Self {
            grid,
            player,
            targets,
            boxes,
        })
    }
}

/// Scatters interior walls two cells away from the border.
///
/// Attempts are counted rather than successes, so collisions leave fewer walls.
fn scatter_walls(grid: &mut Grid, config: &GeneratorConfig, rng: &mut ChaCha8Rng) {
    let attempts = rng.gen_range(config.min_wall_attempts..=config.max_wall_attempts);
    if config.width < 5 || config.height < 5 {
        return;
    }
    for _ in 0..attempts {
        let cell = CellCoord::new(
            rng.gen_range(2..=config.width - 3),
            rng.gen_range(2..=config.height - 3),
        );
        if grid.kind(cell) == Some(CellKind::Empty) {
            let _ = grid.set(cell, CellKind::Wall);
        }
    }
}

fn sample_interior<F>(
    grid: &Grid,
    budget: u32,
    rng: &mut ChaCha8Rng,
    accept: F,
) -> Option<CellCoord>
where
    F: Fn(CellKind, CellCoord) -> bool,
{
    let max_column = grid.columns() - 2;
    let max_row = grid.rows() - 2;
    (0..budget).find_map(|_| {
        let cell = CellCoord::new(rng.gen_range(1..=max_column), rng.gen_range(1..=max_row));
        let kind = grid.kind(cell)?;
        accept(kind, cell).then_some(cell)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_pusher_world::query;

    #[test]
    fn generated_level_uses_configured_time_bonus_and_level() {
        let generator = Generator::new(GeneratorConfig {
            time_bonus: 750,
            ..GeneratorConfig::default()
        })
        .expect("valid config");

        let state = generator.generate(11, 4).expect("level generated");

        assert_eq!(query::level(&state), 4);
        assert_eq!(query::score(&state).time_bonus, 750);
        assert_eq!(query::score(&state).moves, 0);
        assert_eq!(query::turn_number(&state), 0);
        assert_eq!(query::step(&state), 0);
    }

    #[test]
    fn box_ids_follow_placement_order() {
        let state = generate(12, 10, 3).expect("level generated");
        let ids: Vec<u32> = query::boxes(&state).iter().map(|entry| entry.id().get()).collect();
        let expected: Vec<u32> = (0..ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn crowded_grid_exhausts_layouts() {
        let generator = Generator::new(GeneratorConfig {
            width: 3,
            height: 3,
            layout_attempts: 4,
            placement_attempts: 8,
            ..GeneratorConfig::default()
        })
        .expect("valid config");

        assert_eq!(
            generator.generate(0, FIRST_LEVEL).map(|_| ()),
            Err(GenerationError::Exhausted { layouts: 4 })
        );
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        assert_eq!(
            generate(2, 2, 0).map(|_| ()),
            Err(GenerationError::GridTooSmall {
                width: 2,
                height: 2
            })
        );
    }
}
