//! Directory of numbered snapshot files.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use box_pusher_world::{query, PuzzleState};
use tracing::{debug, info};

use crate::{decode, encode, PersistenceError};

/// File name prefix shared by every snapshot.
pub const SNAPSHOT_PREFIX: &str = "game_state_step_";

/// File name extension shared by every snapshot.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Snapshot files stored in a single directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotStore {
    directory: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at the provided directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory holding the snapshots.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the snapshot recorded at the provided step.
    #[must_use]
    pub fn snapshot_path(&self, step: u64) -> PathBuf {
        self.directory
            .join(format!("{SNAPSHOT_PREFIX}{step}.{SNAPSHOT_EXTENSION}"))
    }

    /// Writes the state under its own step number and returns the file path.
    ///
    /// The document is written to a temporary sibling first and renamed into
    /// place, so readers never observe a partially written snapshot.
    pub fn save(&self, state: &PuzzleState) -> Result<PathBuf, PersistenceError> {
        let step = query::step(state);
        let json = encode(state)?;

        fs::create_dir_all(&self.directory)
            .map_err(|error| PersistenceError::io(&self.directory, error))?;

        let path = self.snapshot_path(step);
        let staging = self
            .directory
            .join(format!(".{SNAPSHOT_PREFIX}{step}.{SNAPSHOT_EXTENSION}.tmp"));
        fs::write(&staging, json).map_err(|error| PersistenceError::io(&staging, error))?;
        fs::rename(&staging, &path).map_err(|error| PersistenceError::io(&path, error))?;

        info!(event = "snapshot_saved", step, path = %path.display());
        Ok(path)
    }

    /// Step numbers of every snapshot in the directory, ascending.
    ///
    /// A missing directory holds no snapshots.
    pub fn steps(&self) -> Result<Vec<u64>, PersistenceError> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(PersistenceError::io(&self.directory, error)),
        };

        let mut steps = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| PersistenceError::io(&self.directory, error))?;
            if let Some(step) = entry.file_name().to_str().and_then(parse_step) {
                steps.push(step);
            }
        }
        steps.sort_unstable();
        Ok(steps)
    }

    /// Loads the snapshot with the highest step number, if any exists.
    pub fn load_latest(&self) -> Result<Option<(PathBuf, PuzzleState)>, PersistenceError> {
        let Some(step) = self.steps()?.last().copied() else {
            debug!(event = "no_snapshots", directory = %self.directory.display());
            return Ok(None);
        };
        let path = self.snapshot_path(step);
        let state = self.load(&path)?;
        info!(event = "snapshot_loaded", step, path = %path.display());
        Ok(Some((path, state)))
    }

    /// Loads and validates a single snapshot file.
    pub fn load(&self, path: &Path) -> Result<PuzzleState, PersistenceError> {
        let json = fs::read_to_string(path).map_err(|error| PersistenceError::io(path, error))?;
        decode(&json)
    }
}

fn parse_step(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_numbers_parse_from_snapshot_names() {
        assert_eq!(parse_step("game_state_step_12.json"), Some(12));
        assert_eq!(parse_step("game_state_step_0.json"), Some(0));
        assert_eq!(parse_step("game_state_step_x.json"), None);
        assert_eq!(parse_step(".game_state_step_3.json.tmp"), None);
        assert_eq!(parse_step("game_state_step_3.txt"), None);
        assert_eq!(parse_step("notes.json"), None);
    }

    #[test]
    fn snapshot_paths_follow_naming_scheme() {
        let store = SnapshotStore::new("saves");
        assert_eq!(
            store.snapshot_path(9),
            Path::new("saves").join("game_state_step_9.json")
        );
    }
}
