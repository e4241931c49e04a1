//! Scripted action sequences for automation and headless runs.

use box_pusher_core::{ParseActionError, PlayerAction};
use tracing::info;

use crate::session::Session;

/// Parses a comma or whitespace separated list of action tokens.
pub(crate) fn parse(script: &str) -> Result<Vec<PlayerAction>, ParseActionError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Feeds the actions to the session in order.
pub(crate) fn run(session: &mut Session, actions: &[PlayerAction]) {
    let accepted = actions
        .iter()
        .filter(|&&action| session.handle(action))
        .count();
    info!(
        event = "script_finished",
        actions = actions.len(),
        accepted,
    );
}
