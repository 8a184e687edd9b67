// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use fantasy_domain::{DomainError, MatchDayId, TeamId};

/// Failures of the league store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Any other Diesel error.
    DatabaseError(String),
    /// The database file could not be opened.
    DatabaseConnectionFailed(String),
    /// A schema migration did not apply.
    MigrationFailed(String),
    /// A raw statement failed.
    QueryFailed(String),
    /// Audit JSON could not be encoded or decoded.
    SerializationError(String),
    /// Stored data could not be turned back into domain values.
    ReconstructionError(String),
    /// The store could not be set up.
    InitializationError(String),
    /// `PRAGMA foreign_keys` reads back as off.
    ForeignKeyEnforcementNotEnabled,
    /// A write referenced a row that does not exist.
    ForeignKeyViolation(String),
    /// No row matched.
    NotFound(String),
    /// A uniqueness constraint rejected a roster write.
    ConstraintViolation(DomainError),
    /// The stored score version no longer matches the caller's expectation.
    StorageConflict {
        team_id: TeamId,
        matchday_id: MatchDayId,
        expected_version: Option<i64>,
        actual_version: Option<i64>,
    },
    /// The database stayed locked past the storage timeout.
    StorageTimeout(String),
}

impl PersistenceError {
    /// Returns true if repeating the same operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageConflict { .. } | Self::StorageTimeout(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Reconstruction error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key violation: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ConstraintViolation(err) => write!(f, "Constraint violation: {err}"),
            Self::StorageConflict {
                team_id,
                matchday_id,
                expected_version,
                actual_version,
            } => {
                write!(
                    f,
                    "Score for team {team_id} on matchday {matchday_id} changed concurrently (expected version {}, found {})",
                    format_version(*expected_version),
                    format_version(*actual_version)
                )
            }
            Self::StorageTimeout(msg) => write!(f, "Storage timeout: {msg}"),
        }
    }
}

fn format_version(version: Option<i64>) -> String {
    version.map_or_else(|| String::from("none"), |v| v.to_string())
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        if let diesel::result::Error::DatabaseError(kind, info) = &err {
            if matches!(kind, DatabaseErrorKind::ForeignKeyViolation) {
                return Self::ForeignKeyViolation(info.message().to_string());
            }
            if is_busy_message(info.message()) {
                return Self::StorageTimeout(info.message().to_string());
            }
        }
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

/// `SQLite` reports an exhausted busy handler as a locked or busy database.
pub(crate) fn is_busy_message(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database is busy")
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
