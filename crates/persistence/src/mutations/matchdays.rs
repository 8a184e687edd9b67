// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{MatchDayId, Multiplier};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::matchdays;
use crate::error::PersistenceError;

/// Inserts a matchday and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_matchday(
    conn: &mut SqliteConnection,
    label: &str,
    multiplier: Multiplier,
) -> Result<MatchDayId, PersistenceError> {
    diesel::insert_into(matchdays::table)
        .values((
            matchdays::label.eq(label),
            matchdays::multiplier_numerator.eq(i64::from(multiplier.numerator())),
            matchdays::multiplier_denominator.eq(i64::from(multiplier.denominator())),
        ))
        .execute(conn)?;
    let matchday_id: MatchDayId = MatchDayId::new(get_last_insert_rowid(conn)?);
    debug!(%matchday_id, label, %multiplier, "Inserted matchday");
    Ok(matchday_id)
}

/// Deletes a matchday. Stats, roster history and scores for it go with it.
///
/// # Returns
///
/// The number of deleted rows (0 or 1).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_matchday(
    conn: &mut SqliteConnection,
    matchday_id: MatchDayId,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(matchdays::table.filter(matchdays::matchday_id.eq(matchday_id.value())))
            .execute(conn)?;
    debug!(%matchday_id, deleted, "Deleted matchday");
    Ok(deleted)
}
