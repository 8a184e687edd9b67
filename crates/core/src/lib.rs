// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod apply;
mod command;
mod error;
mod roster;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use aggregate::{CAPTAIN_FACTOR, compute_team_score, score_team};
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use roster::{lock_roster, record_roster};
pub use state::{
    DEFAULT_MAX_ROSTER_SIZE, LeagueRules, PlayerScore, RosterCommit, ScoreTransition,
    TeamScoreResult, TransitionResult, team_snapshot,
};
