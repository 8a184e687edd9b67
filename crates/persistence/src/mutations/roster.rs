// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use fantasy_domain::{DomainError, RosterHistoryEntry};
use tracing::debug;

use crate::diesel_schema::roster_entries;
use crate::error::PersistenceError;

/// Maps a uniqueness failure on `roster_entries` back to the rule it enforces.
///
/// The `(team, matchday, player)` constraint names `player_id` in its message;
/// the one-captain partial index does not.
fn map_roster_error(err: DieselError, entry: &RosterHistoryEntry) -> PersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        let domain_error: DomainError = if info.message().contains("player_id") {
            DomainError::DuplicateEntry {
                team_id: entry.team_id,
                matchday_id: entry.matchday_id,
                player_id: entry.player_id,
            }
        } else {
            DomainError::DuplicateCaptain {
                team_id: entry.team_id,
                matchday_id: entry.matchday_id,
            }
        };
        return PersistenceError::ConstraintViolation(domain_error);
    }
    PersistenceError::from(err)
}

/// Appends entries to roster history.
///
/// The storage constraints re-check entry uniqueness and the single captain,
/// so a commit racing another writer still cannot break either rule.
///
/// # Errors
///
/// Returns `ConstraintViolation` if a uniqueness rule rejects an entry, or a
/// database error if the write fails.
pub fn append_roster_entries(
    conn: &mut SqliteConnection,
    entries: &[RosterHistoryEntry],
) -> Result<(), PersistenceError> {
    for entry in entries {
        diesel::insert_into(roster_entries::table)
            .values((
                roster_entries::team_id.eq(entry.team_id.value()),
                roster_entries::matchday_id.eq(entry.matchday_id.value()),
                roster_entries::player_id.eq(entry.player_id.value()),
                roster_entries::is_captain.eq(i32::from(entry.is_captain)),
            ))
            .execute(conn)
            .map_err(|err| map_roster_error(err, entry))?;
    }

    debug!(count = entries.len(), "Appended roster entries");
    Ok(())
}
