// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Errors returned to callers of the league API.

use fantasy::CoreError;
use fantasy_domain::DomainError;
use fantasy_persistence::PersistenceError;
use tracing::error;

use crate::input::InputError;

/// Failures while establishing or checking who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The request carried no usable actor.
    AuthenticationFailed {
        /// What was missing or malformed.
        reason: String,
    },
    /// The actor may not act on this resource.
    Unauthorized {
        /// The operation that was refused.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors exposed by the league API.
///
/// Lower-layer errors are mapped into these before they leave the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request carried no usable actor.
    AuthenticationFailed {
        /// What was missing or malformed.
        reason: String,
    },
    /// The actor does not own the resource.
    Unauthorized {
        /// The operation that was refused.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A league rule rejected the operation.
    DomainRuleViolation {
        /// Short rule name, e.g. `single_captain`.
        rule: String,
        /// Details for the caller.
        message: String,
    },
    /// A request field failed validation.
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// Details for the caller.
        message: String,
    },
    /// The addressed club, player, team or matchday does not exist.
    ResourceNotFound {
        /// Kind of entity, e.g. `Team`.
        resource_type: String,
        /// Which entity was looked up.
        message: String,
    },
    /// A concurrent write won; the operation may be retried.
    Conflict {
        /// Details for the caller.
        message: String,
    },
    /// Storage did not answer in time; the operation may be retried.
    Timeout {
        /// Details for the caller.
        message: String,
    },
    /// Stored data breaks an invariant and cannot be used.
    IntegrityViolation {
        /// Details for the caller.
        message: String,
    },
    /// Anything else; never retryable.
    Internal {
        /// Details for logs.
        message: String,
    },
}

impl ApiError {
    /// Returns true if repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Timeout { message } => write!(f, "Timed out: {message}"),
            Self::IntegrityViolation { message } => {
                write!(f, "Integrity violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Maps a domain error onto the API contract.
///
/// Bad input becomes `InvalidInput` and rule breaks become `DomainRuleViolation`.
/// `InvalidRosterState` means stored roster history is corrupt and is logged
/// at error level.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::PlayerNotOnTeam { team_id, player_id } => ApiError::DomainRuleViolation {
            rule: String::from("player_on_team"),
            message: format!("Player {player_id} is not a member of team {team_id}"),
        },
        DomainError::InvalidRosterState {
            team_id,
            matchday_id,
            captain_count,
        } => {
            error!(
                %team_id,
                %matchday_id,
                captain_count,
                "Recorded roster holds more than one captain"
            );
            ApiError::IntegrityViolation {
                message: format!(
                    "Roster of team {team_id} on matchday {matchday_id} has {captain_count} captains"
                ),
            }
        }
        DomainError::DuplicateCaptain {
            team_id,
            matchday_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_captain"),
            message: format!(
                "Roster of team {team_id} on matchday {matchday_id} already has a captain"
            ),
        },
        DomainError::DuplicateEntry {
            team_id,
            matchday_id,
            player_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_roster_entry"),
            message: format!(
                "Player {player_id} is already on the roster of team {team_id} for matchday {matchday_id}"
            ),
        },
        DomainError::RosterAlreadyRecorded {
            team_id,
            matchday_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("roster_already_recorded"),
            message: format!(
                "Roster of team {team_id} on matchday {matchday_id} is already recorded"
            ),
        },
        DomainError::DuplicateMember { team_id, player_id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_member"),
            message: format!("Player {player_id} is already a member of team {team_id}"),
        },
        DomainError::RosterFull { team_id, max_size } => ApiError::DomainRuleViolation {
            rule: String::from("max_roster_size"),
            message: format!("Team {team_id} already has the maximum of {max_size} players"),
        },
        DomainError::InvalidMultiplier(msg) => ApiError::InvalidInput {
            field: String::from("multiplier"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidPosition(value) => ApiError::InvalidInput {
            field: String::from("position"),
            message: format!("'{value}' is not a position"),
        },
        DomainError::InvalidOwner(msg) => ApiError::InvalidInput {
            field: String::from("owner_id"),
            message: msg,
        },
        DomainError::TeamNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Team"),
            message: format!("Team {id} does not exist"),
        },
        DomainError::PlayerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Player"),
            message: format!("Player {id} does not exist"),
        },
        DomainError::MatchDayNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Matchday"),
            message: format!("Matchday {id} does not exist"),
        },
        DomainError::ClubNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Club"),
            message: format!("Club {id} does not exist"),
        },
    }
}

/// Maps a core error onto the API contract.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage conflicts and timeouts map to the retryable variants.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ConstraintViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::StorageConflict { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::StorageTimeout(msg) => ApiError::Timeout { message: msg },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::ForeignKeyViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("referential_integrity"),
            message: msg,
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: format!("Persistence error: {other}"),
            }
        }
    }
}
