// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::ClubId;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::clubs;
use crate::error::PersistenceError;

/// Inserts a club and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_club(conn: &mut SqliteConnection, name: &str) -> Result<ClubId, PersistenceError> {
    diesel::insert_into(clubs::table)
        .values(clubs::name.eq(name))
        .execute(conn)?;
    let club_id: ClubId = ClubId::new(get_last_insert_rowid(conn)?);
    debug!(%club_id, name, "Inserted club");
    Ok(club_id)
}

/// Deletes a club. Players of the club lose their affiliation.
///
/// # Returns
///
/// The number of deleted rows (0 or 1).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_club(
    conn: &mut SqliteConnection,
    club_id: ClubId,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(clubs::table.filter(clubs::club_id.eq(club_id.value()))).execute(conn)?;
    debug!(%club_id, deleted, "Deleted club");
    Ok(deleted)
}
