// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Functions here never open transactions themselves. The `Persistence`
//! adapter wraps each public operation, together with its audit event, in a
//! single immediate transaction.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `clubs`, `players`, `teams`, `matchdays`: Entity writes
//! - `stats`: Stats record replacement
//! - `roster`: Roster history appends
//! - `scores`: Versioned score history writes

pub mod audit;
pub mod clubs;
pub mod matchdays;
pub mod players;
pub mod roster;
pub mod scores;
pub mod stats;
pub mod teams;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Returns the current UTC time as an RFC 3339 string.
pub(crate) fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
