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

mod error;
mod roster_history;
mod scoring;
mod team;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use roster_history::{RosterHistoryEntry, resolve_captain, validate_roster_snapshot};
pub use scoring::{
    ScoreBreakdown, apply_multiplier, compute_score, div_round_half_away_from_zero,
    raw_half_points, weights,
};
pub use team::{RosterSlot, Team, add_member, remove_member, set_captain};
pub use types::{
    Club, ClubId, MatchDayConfig, MatchDayId, Multiplier, Player, PlayerId, Position, StatsRecord,
    TeamId,
};
pub use validation::{MAX_NAME_LENGTH, validate_name, validate_owner_id};
