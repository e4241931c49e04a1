//! Play session that owns the puzzle state between frames.

use anyhow::{Context, Result};
use box_pusher_core::{Event, PlayerAction};
use box_pusher_persistence::SnapshotStore;
use box_pusher_system_generator::Generator;
use box_pusher_world::{apply, query, PuzzleState};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

/// Drives the engine on behalf of the player and snapshots every accepted action.
#[derive(Debug)]
pub(crate) struct Session {
    state: PuzzleState,
    generator: Generator,
    seeds: ChaCha8Rng,
    store: SnapshotStore,
    saving: bool,
    step: u64,
    events: Vec<Event>,
}

impl Session {
    /// Starts a session, resuming the latest snapshot when allowed.
    pub(crate) fn start(config: &AppConfig) -> Result<Self> {
        let generator =
            Generator::new(config.generator).context("failed to configure level generator")?;
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(event = "session_started", seed);

        let mut seeds = ChaCha8Rng::seed_from_u64(seed);
        let store = SnapshotStore::new(config.persistence.save_dir.clone());

        let resumed = if config.persistence.resume {
            resume(&store)
        } else {
            None
        };
        let state = match resumed {
            Some(state) => state,
            None => generator
                .generate(seeds.next_u64(), 1)
                .context("failed to generate the first level")?,
        };

        let step = query::step(&state).max(latest_step(&store));

        Ok(Self {
            step,
            state,
            generator,
            seeds,
            store,
            saving: config.persistence.enabled,
            events: Vec::new(),
        })
    }

    pub(crate) fn state(&self) -> &PuzzleState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn step(&self) -> u64 {
        self.step
    }

    /// Applies one player action. Returns whether it changed the state.
    pub(crate) fn handle(&mut self, action: PlayerAction) -> bool {
        let accepted = match action.command() {
            Some(command) => {
                self.events.clear();
                apply(&mut self.state, command, &mut self.events);
                self.events.iter().any(|event| {
                    matches!(
                        event,
                        Event::PlayerMoved { .. } | Event::SelectionChanged { .. }
                    )
                })
            }
            None => self.new_level(),
        };

        if accepted {
            self.record_step();
        }
        accepted
    }

    fn new_level(&mut self) -> bool {
        let level = query::level(&self.state).saturating_add(1);
        match self.generator.generate(self.seeds.next_u64(), level) {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(error) => {
                warn!(event = "new_level_failed", level, %error);
                false
            }
        }
    }

    fn record_step(&mut self) {
        self.step += 1;
        self.events.clear();
        apply(
            &mut self.state,
            box_pusher_core::Command::RecordStep { step: self.step },
            &mut self.events,
        );

        if !self.saving {
            return;
        }
        match self.store.save(&self.state) {
            Ok(path) => debug!(event = "step_saved", step = self.step, path = %path.display()),
            Err(error) => warn!(event = "snapshot_save_failed", step = self.step, %error),
        }
    }
}

/// Highest step already on disk, so new snapshots never overwrite older ones.
fn latest_step(store: &SnapshotStore) -> u64 {
    match store.steps() {
        Ok(steps) => steps.last().copied().unwrap_or(0),
        Err(error) => {
            warn!(
                event = "snapshot_scan_failed",
                directory = %store.directory().display(),
                %error,
            );
            0
        }
    }
}

fn resume(store: &SnapshotStore) -> Option<PuzzleState> {
    match store.load_latest() {
        Ok(Some((path, state))) => {
            info!(
                event = "session_resumed",
                path = %path.display(),
                step = query::step(&state),
                level = query::level(&state),
            );
            Some(state)
        }
        Ok(None) => None,
        Err(error) => {
            warn!(
                event = "snapshot_load_failed",
                directory = %store.directory().display(),
                %error,
            );
            None
        }
    }
}
