#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative puzzle state management for Box Pusher.
//!
//! A [`PuzzleState`] can only be assembled through [`PuzzleState::from_parts`],
//! which validates the placement invariants, and is afterwards mutated solely
//! through [`apply`] and the engine operations it dispatches to. Every accepted
//! action ends with a single refresh pass that re-derives box and target
//! flags, so those flags cannot drift from the entity positions.

mod grid;
mod scoring;
mod selection;

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use box_pusher_core::{
    BoxId, CellCoord, Command, Direction, Event, GameStatus, MoveRejection, PushRejection,
    Rewards, Score,
};
use thiserror::Error;
use tracing::debug;

pub use grid::Grid;
pub use scoring::{points_for, recompute_and_check_win};
pub use selection::toggle_selection;

/// Player avatar and its cosmetic box selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    cell: CellCoord,
    selected_box: Option<BoxId>,
}

impl Player {
    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Box highlighted by the player, if any. Has no effect on movement.
    #[must_use]
    pub const fn selected_box(&self) -> Option<BoxId> {
        self.selected_box
    }
}

/// Pushable box tracked as an overlay entity on top of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleBox {
    id: BoxId,
    cell: CellCoord,
    on_target: bool,
}

impl PuzzleBox {
    /// Identifier assigned at generation time.
    #[must_use]
    pub const fn id(&self) -> BoxId {
        self.id
    }

    /// Cell currently occupied by the box.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Whether a target shares the box's cell.
    #[must_use]
    pub const fn on_target(&self) -> bool {
        self.on_target
    }
}

/// Fixed goal cell that is complete while a box covers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    cell: CellCoord,
    completed: bool,
}

impl Target {
    /// Cell the target is anchored to.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Whether a box currently covers the target.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }
}

/// Raw ingredients used to assemble a [`PuzzleState`].
///
/// Generators and persistence adapters fill this in and hand it to
/// [`PuzzleState::from_parts`] for validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleParts {
    /// Static cell layout.
    pub grid: Grid,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Box highlighted by the player.
    pub selected_box: Option<BoxId>,
    /// Boxes keyed by identifier.
    pub boxes: Vec<(BoxId, CellCoord)>,
    /// Target cells.
    pub targets: Vec<CellCoord>,
    /// Score carried by the state.
    pub score: Score,
    /// Rewards carried by the state.
    pub rewards: Rewards,
    /// Level number shown to the player.
    pub level: u32,
    /// Count of accepted player actions.
    pub turn_number: u32,
    /// Lifecycle status of the level.
    pub status: GameStatus,
    /// Persistence step counter.
    pub step: u64,
}

impl PuzzleParts {
    /// Creates parts for a fresh level with zeroed counters and no entities besides the player.
    #[must_use]
    pub fn new(grid: Grid, player: CellCoord) -> Self {
        Self {
            grid,
            player,
            selected_box: None,
            boxes: Vec::new(),
            targets: Vec::new(),
            score: Score::default(),
            rewards: Rewards::default(),
            level: 1,
            turn_number: 0,
            status: GameStatus::Playing,
            step: 0,
        }
    }
}

/// Entity referenced by a [`StateError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// The player avatar.
    Player,
    /// A box with the provided identifier.
    Box(BoxId),
    /// A target.
    Target,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Box(id) => write!(f, "box {}", id.get()),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Invariant violations detected while assembling a [`PuzzleState`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The grid holds no cells.
    #[error("grid must contain at least one cell")]
    EmptyGrid,
    /// A grid row does not match the width of the first row.
    #[error("grid row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        actual: u32,
    },
    /// An entity lies outside the grid.
    #[error("{entity} at {cell} lies outside the grid")]
    OutOfBounds {
        /// Offending entity.
        entity: Entity,
        /// Cell the entity claimed.
        cell: CellCoord,
    },
    /// An entity sits on a wall cell.
    #[error("{entity} at {cell} sits on a wall")]
    OnWall {
        /// Offending entity.
        entity: Entity,
        /// Wall cell the entity claimed.
        cell: CellCoord,
    },
    /// Two boxes claim the same cell.
    #[error("boxes {} and {} share cell {cell}", first.get(), second.get())]
    SharedBoxCell {
        /// Box placed first.
        first: BoxId,
        /// Box placed second.
        second: BoxId,
        /// Contested cell.
        cell: CellCoord,
    },
    /// Two targets claim the same cell.
    #[error("more than one target at {cell}")]
    DuplicateTarget {
        /// Contested cell.
        cell: CellCoord,
    },
    /// Two boxes share an identifier.
    #[error("box id {} is used more than once", id.get())]
    DuplicateBoxId {
        /// Repeated identifier.
        id: BoxId,
    },
    /// The player and a box claim the same cell.
    #[error("player shares cell {cell} with box {}", box_id.get())]
    PlayerOnBox {
        /// Contested cell.
        cell: CellCoord,
        /// Box on the player's cell.
        box_id: BoxId,
    },
    /// Box and target counts differ.
    #[error("{boxes} boxes cannot match {targets} targets")]
    CountMismatch {
        /// Number of boxes supplied.
        boxes: usize,
        /// Number of targets supplied.
        targets: usize,
    },
    /// The selection references a box that does not exist.
    #[error("selected box {} does not exist", id.get())]
    UnknownSelection {
        /// Dangling identifier.
        id: BoxId,
    },
}

/// Represents the authoritative state of one level instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleState {
    grid: Grid,
    player: Player,
    boxes: Vec<PuzzleBox>,
    targets: Vec<Target>,
    score: Score,
    rewards: Rewards,
    level: u32,
    turn_number: u32,
    status: GameStatus,
    step: u64,
}

impl PuzzleState {
    /// Validates the provided parts and assembles a puzzle state.
    ///
    /// Box `on_target` and target `completed` flags are derived from the
    /// positions; every other field is taken verbatim.
    pub fn from_parts(parts: PuzzleParts) -> Result<Self, StateError> {
        let PuzzleParts {
            grid,
            player,
            selected_box,
            boxes,
            targets,
            score,
            rewards,
            level,
            turn_number,
            status,
            step,
        } = parts;

        if grid.is_empty() {
            return Err(StateError::EmptyGrid);
        }
        check_placement(&grid, Entity::Player, player)?;

        let mut target_cells = HashSet::with_capacity(targets.len());
        for cell in &targets {
            check_placement(&grid, Entity::Target, *cell)?;
            if !target_cells.insert(*cell) {
                return Err(StateError::DuplicateTarget { cell: *cell });
            }
        }

        let mut ids = HashSet::with_capacity(boxes.len());
        let mut occupied: HashMap<CellCoord, BoxId> = HashMap::with_capacity(boxes.len());
        for (id, cell) in &boxes {
            check_placement(&grid, Entity::Box(*id), *cell)?;
            if !ids.insert(*id) {
                return Err(StateError::DuplicateBoxId { id: *id });
            }
            if let Some(first) = occupied.insert(*cell, *id) {
                return Err(StateError::SharedBoxCell {
                    first,
                    second: *id,
                    cell: *cell,
                });
            }
            if *cell == player {
                return Err(StateError::PlayerOnBox {
                    cell: player,
                    box_id: *id,
                });
            }
        }

        if boxes.len() != targets.len() {
            return Err(StateError::CountMismatch {
                boxes: boxes.len(),
                targets: targets.len(),
            });
        }

        if let Some(id) = selected_box {
            if !ids.contains(&id) {
                return Err(StateError::UnknownSelection { id });
            }
        }

        let mut state = Self {
            grid,
            player: Player {
                cell: player,
                selected_box,
            },
            boxes: boxes
                .into_iter()
                .map(|(id, cell)| PuzzleBox {
                    id,
                    cell,
                    on_target: false,
                })
                .collect(),
            targets: targets
                .into_iter()
                .map(|cell| Target {
                    cell,
                    completed: false,
                })
                .collect(),
            score,
            rewards,
            level,
            turn_number,
            status,
            step,
        };
        let _ = state.refresh_overlays();
        Ok(state)
    }

    /// Re-derives every box and target flag in one pass, returning the completed target count.
    fn refresh_overlays(&mut self) -> u32 {
        let box_cells: HashSet<CellCoord> = self.boxes.iter().map(|entry| entry.cell).collect();
        let target_cells: HashSet<CellCoord> =
            self.targets.iter().map(|target| target.cell).collect();

        for entry in &mut self.boxes {
            entry.on_target = target_cells.contains(&entry.cell);
        }

        let mut completed = 0;
        for target in &mut self.targets {
            target.completed = box_cells.contains(&target.cell);
            if target.completed {
                completed += 1;
            }
        }
        completed
    }

    fn neighbor_within_grid(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.neighbor(direction)
            .filter(|neighbor| self.grid.contains(*neighbor))
    }

    fn box_index_at(&self, cell: CellCoord) -> Option<usize> {
        self.boxes.iter().position(|entry| entry.cell == cell)
    }

    fn has_target_at(&self, cell: CellCoord) -> bool {
        self.targets.iter().any(|target| target.cell == cell)
    }

    fn advance_turn(&mut self) {
        self.turn_number = self.turn_number.saturating_add(1);
    }
}

fn check_placement(grid: &Grid, entity: Entity, cell: CellCoord) -> Result<(), StateError> {
    if !grid.contains(cell) {
        return Err(StateError::OutOfBounds { entity, cell });
    }
    if grid.is_wall(cell) {
        return Err(StateError::OnWall { entity, cell });
    }
    Ok(())
}

/// Applies the provided command to the state, reporting what changed.
pub fn apply(state: &mut PuzzleState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => {
            let _ = apply_move(state, direction, out_events);
        }
        Command::ToggleSelection => {
            let _ = toggle_selection(state, out_events);
        }
        Command::RecordStep { step } => {
            state.step = step;
            out_events.push(Event::StepRecorded { step });
        }
    }
}

/// Attempts to step the player one cell, pushing a box that stands in the way.
///
/// Returns `false` and leaves the state untouched when the destination is out
/// of bounds, a wall, or holds a box that cannot be pushed.
pub fn apply_move(
    state: &mut PuzzleState,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> bool {
    let from = state.player.cell;
    let Some(destination) = state.neighbor_within_grid(from, direction) else {
        reject_move(direction, MoveRejection::OutOfBounds, out_events);
        return false;
    };

    if state.grid.is_wall(destination) {
        reject_move(direction, MoveRejection::Wall, out_events);
        return false;
    }

    if let Some(index) = state.box_index_at(destination) {
        if let Err(reason) = push_box(state, index, direction, out_events) {
            let box_id = state.boxes[index].id;
            reject_move(direction, MoveRejection::PushBlocked { box_id, reason }, out_events);
            return false;
        }
        state.score.pushes = state.score.pushes.saturating_add(1);
    }

    state.player.cell = destination;
    state.score.moves = state.score.moves.saturating_add(1);
    state.advance_turn();
    out_events.push(Event::PlayerMoved {
        from,
        to: destination,
    });

    recompute_and_check_win(state, out_events);
    true
}

fn push_box(
    state: &mut PuzzleState,
    index: usize,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Result<(), PushRejection> {
    let from = state.boxes[index].cell;
    let to = state
        .neighbor_within_grid(from, direction)
        .ok_or(PushRejection::OutOfBounds)?;

    if state.grid.is_wall(to) {
        return Err(PushRejection::Wall);
    }
    if let Some(other) = state.box_index_at(to) {
        return Err(PushRejection::Occupied {
            by: state.boxes[other].id,
        });
    }

    let on_target = state.has_target_at(to);
    let pushed = &mut state.boxes[index];
    pushed.cell = to;
    out_events.push(Event::BoxPushed {
        box_id: pushed.id,
        from,
        to,
        on_target,
    });
    Ok(())
}

fn reject_move(direction: Direction, reason: MoveRejection, out_events: &mut Vec<Event>) {
    debug!(event = "move_rejected", direction = %direction, reason = ?reason);
    out_events.push(Event::MoveRejected { direction, reason });
}

/// Query functions that provide read-only access to the puzzle state.
pub mod query {
    use box_pusher_core::{CellCoord, GameStatus, Rewards, Score};

    use super::{Grid, Player, PuzzleBox, PuzzleState, Target};

    /// Provides read-only access to the static grid.
    #[must_use]
    pub fn grid(state: &PuzzleState) -> &Grid {
        &state.grid
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(state: &PuzzleState) -> &Player {
        &state.player
    }

    /// Boxes in generation order.
    #[must_use]
    pub fn boxes(state: &PuzzleState) -> &[PuzzleBox] {
        &state.boxes
    }

    /// Targets in generation order.
    #[must_use]
    pub fn targets(state: &PuzzleState) -> &[Target] {
        &state.targets
    }

    /// Returns the box occupying the provided cell, if any.
    #[must_use]
    pub fn box_at(state: &PuzzleState, cell: CellCoord) -> Option<&PuzzleBox> {
        state.boxes.iter().find(|entry| entry.cell == cell)
    }

    /// Returns the target anchored at the provided cell, if any.
    #[must_use]
    pub fn target_at(state: &PuzzleState, cell: CellCoord) -> Option<&Target> {
        state.targets.iter().find(|target| target.cell == cell)
    }

    /// Number of targets currently covered by a box.
    #[must_use]
    pub fn completed_targets(state: &PuzzleState) -> usize {
        state.targets.iter().filter(|target| target.completed).count()
    }

    /// Current score.
    #[must_use]
    pub fn score(state: &PuzzleState) -> Score {
        state.score
    }

    /// Rewards evaluated when the level was completed.
    #[must_use]
    pub fn rewards(state: &PuzzleState) -> Rewards {
        state.rewards
    }

    /// Lifecycle status of the level.
    #[must_use]
    pub fn status(state: &PuzzleState) -> GameStatus {
        state.status
    }

    /// Level number shown to the player.
    #[must_use]
    pub fn level(state: &PuzzleState) -> u32 {
        state.level
    }

    /// Count of accepted player actions.
    #[must_use]
    pub fn turn_number(state: &PuzzleState) -> u32 {
        state.turn_number
    }

    /// Persistence step counter.
    #[must_use]
    pub fn step(state: &PuzzleState) -> u64 {
        state.step
    }

    /// Reports whether the level has been won.
    #[must_use]
    pub fn is_won(state: &PuzzleState) -> bool {
        state.status == GameStatus::Won
    }
}
