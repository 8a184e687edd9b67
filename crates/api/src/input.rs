// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of raw request fields into domain values.

use std::str::FromStr;

use fantasy_domain::{
    ClubId, DomainError, MatchDayId, Multiplier, PlayerId, Position, TeamId,
};
use num_traits::ToPrimitive;
use thiserror::Error;

/// Largest stat count the store accepts.
pub const MAX_STAT_COUNT: u32 = i32::MAX.unsigned_abs();

/// Request field errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// The position is neither field player nor goalkeeper.
    #[error("'{value}' is not a position (expected Field or Goalkeeper)")]
    Position { value: String },

    /// The multiplier cannot be parsed.
    #[error("'{value}' is not a valid multiplier: {reason}")]
    Multiplier { value: String, reason: String },

    /// An identifier is zero or negative.
    #[error("{field} must be a positive id, got {value}")]
    NonPositiveId { field: &'static str, value: i64 },

    /// A stat count is negative or too large.
    #[error("{field} must be between 0 and {max}, got {value}")]
    CountOutOfRange {
        field: &'static str,
        value: i64,
        max: u32,
    },
}

impl InputError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Position { .. } => "position",
            Self::Multiplier { .. } => "multiplier",
            Self::NonPositiveId { field, .. } | Self::CountOutOfRange { field, .. } => *field,
        }
    }
}

/// Parses a player position.
///
/// # Errors
///
/// Returns `InputError::Position` if the value is not recognised.
pub fn parse_position(value: &str) -> Result<Position, InputError> {
    Position::from_str(value).map_err(|_| InputError::Position {
        value: value.to_string(),
    })
}

/// Parses a matchday multiplier such as `"1.5"`, `"3/2"` or `"2"`.
///
/// # Errors
///
/// Returns `InputError::Multiplier` if the value is malformed or negative.
pub fn parse_multiplier(value: &str) -> Result<Multiplier, InputError> {
    Multiplier::from_str(value).map_err(|err| InputError::Multiplier {
        value: value.to_string(),
        reason: match err {
            DomainError::InvalidMultiplier(reason) => reason,
            other => other.to_string(),
        },
    })
}

fn positive_id(field: &'static str, value: i64) -> Result<i64, InputError> {
    if value <= 0 {
        return Err(InputError::NonPositiveId { field, value });
    }
    Ok(value)
}

/// # Errors
///
/// Returns `InputError::NonPositiveId` if the value is not positive.
pub fn parse_team_id(value: i64) -> Result<TeamId, InputError> {
    positive_id("team_id", value).map(TeamId::new)
}

/// # Errors
///
/// Returns `InputError::NonPositiveId` if the value is not positive.
pub fn parse_player_id(value: i64) -> Result<PlayerId, InputError> {
    positive_id("player_id", value).map(PlayerId::new)
}

/// # Errors
///
/// Returns `InputError::NonPositiveId` if the value is not positive.
pub fn parse_matchday_id(value: i64) -> Result<MatchDayId, InputError> {
    positive_id("matchday_id", value).map(MatchDayId::new)
}

/// # Errors
///
/// Returns `InputError::NonPositiveId` if the value is not positive.
pub fn parse_club_id(value: i64) -> Result<ClubId, InputError> {
    positive_id("club_id", value).map(ClubId::new)
}

/// Converts a raw stat count.
///
/// # Errors
///
/// Returns `InputError::CountOutOfRange` if the count is negative or above
/// `MAX_STAT_COUNT`.
pub fn parse_stat_count(field: &'static str, value: i64) -> Result<u32, InputError> {
    value
        .to_u32()
        .filter(|count| *count <= MAX_STAT_COUNT)
        .ok_or(InputError::CountOutOfRange {
            field,
            value,
            max: MAX_STAT_COUNT,
        })
}
