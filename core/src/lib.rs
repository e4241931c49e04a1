#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Box Pusher engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative puzzle state, and the level generator. Adapters translate
//! player input into [`Command`] values, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values describing what
//! changed so drivers can react without diffing the state.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Box Pusher.";

/// Points awarded for every target covered by a box.
pub const TARGET_POINTS: u32 = 100;

/// Baseline time bonus assigned to a freshly generated level.
///
/// The bonus is never decremented by elapsed wall-clock time; only the move
/// counter eats into it when points are computed.
pub const DEFAULT_TIME_BONUS: u32 = 1_000;

/// Reward granted when a level is solved within two moves per box.
pub const MOVE_EFFICIENCY_BONUS: u32 = 500;

/// Points added when a level is solved within one and a half moves per box.
pub const PERFECT_SOLUTION_BONUS: u32 = 1_000;

/// Commands that express all permissible puzzle mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the player step one cell, pushing a box if one is in the way.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the selection of a neighbouring box be toggled.
    ToggleSelection,
    /// Stamps the persistence step counter into the state before it is saved.
    RecordStep {
        /// Number of snapshots recorded so far in the current session.
        step: u64,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that a box was pushed one cell.
    BoxPushed {
        /// Identifier of the pushed box.
        box_id: BoxId,
        /// Cell the box occupied before the push.
        from: CellCoord,
        /// Cell the box occupies after the push.
        to: CellCoord,
        /// Whether the box now rests on a target.
        on_target: bool,
    },
    /// Reports that a move request was rejected without mutating the state.
    MoveRejected {
        /// Direction provided in the rejected request.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Announces that the selected box changed.
    SelectionChanged {
        /// Box selected after the toggle, if any.
        selected: Option<BoxId>,
    },
    /// Reports target completion and score after a recomputation pass.
    TargetsUpdated {
        /// Number of targets currently covered by a box.
        completed: u32,
        /// Total number of targets in the level.
        total: u32,
        /// Points after the recomputation.
        points: u32,
    },
    /// Announces that every target became covered for the first time.
    LevelCompleted {
        /// Moves spent to solve the level.
        moves: u32,
        /// Pushes spent to solve the level.
        pushes: u32,
        /// Points after rewards were applied.
        points: u32,
        /// Whether the solution qualified for the perfect-solution bonus.
        perfect_solution: bool,
    },
    /// Confirms that the persistence step counter was stamped.
    StepRecorded {
        /// Step value now stored in the state.
        step: u64,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a wall cell.
    Wall,
    /// The destination holds a box that could not be pushed.
    PushBlocked {
        /// Box that refused to move.
        box_id: BoxId,
        /// Reason the push failed.
        reason: PushRejection,
    },
}

/// Reasons a box push may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushRejection {
    /// The box destination lies outside the grid.
    OutOfBounds,
    /// The box destination is a wall cell.
    Wall,
    /// Another box already occupies the destination.
    Occupied {
        /// Box currently sitting on the destination cell.
        by: BoxId,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the fixed neighbour scan order: up, down, left, right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta applied to `(column, row)` when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Lowercase label used in logs and scripts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unique identifier assigned to a box.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BoxId(u32);

impl BoxId {
    /// Creates a new box identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` coordinate).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` coordinate).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's concern.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(CellCoord::new(column, row))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Static kind of a grid cell.
///
/// `Target` and `Box` are stamped by the generator and are cosmetic once play
/// starts; live box and target state is tracked by overlay entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Open floor.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
    /// Floor stamped with a target at generation time.
    Target,
    /// Floor stamped with a box at generation time.
    Box,
}

impl CellKind {
    /// Reports whether the cell blocks both the player and boxes.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Lifecycle status of a level instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Targets remain uncovered or the win has not been observed yet.
    #[default]
    Playing,
    /// Every target was covered; terminal for the level instance.
    Won,
}

impl GameStatus {
    /// Lowercase label matching the persisted representation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Won => "won",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Running score of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Points derived from completed targets, move efficiency and rewards.
    pub points: u32,
    /// Accepted moves, pushes included.
    pub moves: u32,
    /// Accepted moves that pushed a box.
    pub pushes: u32,
    /// Fixed baseline reduced by the move counter when computing points.
    pub time_bonus: u32,
    /// Whether every target has been covered.
    pub level_complete: bool,
}

impl Score {
    /// Creates a zeroed score with the provided time bonus baseline.
    #[must_use]
    pub const fn with_time_bonus(time_bonus: u32) -> Self {
        Self {
            points: 0,
            moves: 0,
            pushes: 0,
            time_bonus,
            level_complete: false,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::with_time_bonus(DEFAULT_TIME_BONUS)
    }
}

/// Bonuses evaluated when a level is first completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rewards {
    /// Bonus granted for solving within two moves per box.
    pub move_efficiency_bonus: u32,
    /// Reserved speed bonus; never awarded.
    pub speed_bonus: u32,
    /// Whether the solution used at most one and a half moves per box.
    pub perfect_solution: bool,
}

/// Discrete actions a driver may issue on behalf of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Step or push in the provided direction.
    Move(Direction),
    /// Toggle the selection of an adjacent box.
    ToggleSelection,
    /// Replace the current level with a freshly generated one.
    NewLevel,
}

impl PlayerAction {
    /// Maps a keyboard character to an action using the W/A/S/D layout.
    ///
    /// Space toggles the selection and `r` requests a new level.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::Move(Direction::Up)),
            's' => Some(Self::Move(Direction::Down)),
            'a' => Some(Self::Move(Direction::Left)),
            'd' => Some(Self::Move(Direction::Right)),
            ' ' => Some(Self::ToggleSelection),
            'r' => Some(Self::NewLevel),
            _ => None,
        }
    }

    /// Translates the action into an engine command, if it targets the engine.
    ///
    /// New-level requests replace the state wholesale and therefore have no
    /// command counterpart.
    #[must_use]
    pub const fn command(self) -> Option<Command> {
        match self {
            Self::Move(direction) => Some(Command::Move { direction }),
            Self::ToggleSelection => Some(Command::ToggleSelection),
            Self::NewLevel => None,
        }
    }
}

impl FromStr for PlayerAction {
    type Err = ParseActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim().to_ascii_lowercase();
        let action = match token.as_str() {
            "w" | "up" | "move-up" => Self::Move(Direction::Up),
            "s" | "down" | "move-down" => Self::Move(Direction::Down),
            "a" | "left" | "move-left" => Self::Move(Direction::Left),
            "d" | "right" | "move-right" => Self::Move(Direction::Right),
            "space" | "select" | "toggle-selection" => Self::ToggleSelection,
            "r" | "new" | "new-level" => Self::NewLevel,
            _ => return Err(ParseActionError(value.trim().to_owned())),
        };
        Ok(action)
    }
}

/// Error returned when an action token cannot be recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseActionError(String);

impl ParseActionError {
    /// Token that failed to parse.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl Error for ParseActionError {}

#[cfg(test)]
mod tests {
    use super::{
        BoxId, CellCoord, CellKind, Command, Direction, GameStatus, MoveRejection, PlayerAction,
        PushRejection, Rewards, Score, DEFAULT_TIME_BONUS,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn neighbor_follows_direction_deltas() {
        let origin = CellCoord::new(3, 4);
        assert_eq!(origin.neighbor(Direction::Up), Some(CellCoord::new(3, 3)));
        assert_eq!(origin.neighbor(Direction::Down), Some(CellCoord::new(3, 5)));
        assert_eq!(origin.neighbor(Direction::Left), Some(CellCoord::new(2, 4)));
        assert_eq!(origin.neighbor(Direction::Right), Some(CellCoord::new(4, 4)));
    }

    #[test]
    fn neighbor_refuses_negative_coordinates() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::Up), None);
        assert_eq!(corner.neighbor(Direction::Left), None);
    }

    #[test]
    fn scan_order_is_up_down_left_right() {
        assert_eq!(
            Direction::ALL,
            [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(11, 9));
    }

    #[test]
    fn rejection_reasons_round_trip_through_bincode() {
        assert_round_trip(&MoveRejection::PushBlocked {
            box_id: BoxId::new(2),
            reason: PushRejection::Occupied { by: BoxId::new(4) },
        });
        assert_round_trip(&MoveRejection::Wall);
    }

    #[test]
    fn score_defaults_to_baseline_time_bonus() {
        let score = Score::default();
        assert_eq!(score.time_bonus, DEFAULT_TIME_BONUS);
        assert_eq!(score.points, 0);
        assert!(!score.level_complete);
        assert_round_trip(&score);
        assert_round_trip(&Rewards::default());
    }

    #[test]
    fn labels_match_persisted_spelling() {
        assert_eq!(GameStatus::Playing.to_string(), "playing");
        assert_eq!(GameStatus::Won.to_string(), "won");
        assert!(CellKind::Wall.is_wall());
        assert!(!CellKind::Target.is_wall());
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(
            PlayerAction::from_key('W'),
            Some(PlayerAction::Move(Direction::Up))
        );
        assert_eq!(PlayerAction::from_key(' '), Some(PlayerAction::ToggleSelection));
        assert_eq!(PlayerAction::from_key('r'), Some(PlayerAction::NewLevel));
        assert_eq!(PlayerAction::from_key('x'), None);
    }

    #[test]
    fn action_tokens_parse() {
        assert_eq!(
            "move-left".parse::<PlayerAction>(),
            Ok(PlayerAction::Move(Direction::Left))
        );
        assert_eq!(" d ".parse::<PlayerAction>(), Ok(PlayerAction::Move(Direction::Right)));
        assert_eq!("space".parse::<PlayerAction>(), Ok(PlayerAction::ToggleSelection));
        let error = "jump".parse::<PlayerAction>().expect_err("unknown token");
        assert_eq!(error.token(), "jump");
    }

    #[test]
    fn new_level_has_no_engine_command() {
        assert_eq!(PlayerAction::NewLevel.command(), None);
        assert_eq!(
            PlayerAction::Move(Direction::Down).command(),
            Some(Command::Move {
                direction: Direction::Down
            })
        );
    }
}
