// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{Club, ClubId};

use crate::diesel_schema::clubs;
use crate::error::PersistenceError;

fn club_from_row((club_id, name): (i64, String)) -> Club {
    Club {
        club_id: ClubId::new(club_id),
        name,
    }
}

/// Lists all clubs ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clubs(conn: &mut SqliteConnection) -> Result<Vec<Club>, PersistenceError> {
    let rows: Vec<(i64, String)> = clubs::table
        .select((clubs::club_id, clubs::name))
        .order(clubs::club_id.asc())
        .load::<(i64, String)>(conn)?;
    Ok(rows.into_iter().map(club_from_row).collect())
}

/// Looks up a club by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_club(
    conn: &mut SqliteConnection,
    club_id: ClubId,
) -> Result<Option<Club>, PersistenceError> {
    let row: Option<(i64, String)> = clubs::table
        .filter(clubs::club_id.eq(club_id.value()))
        .select((clubs::club_id, clubs::name))
        .first::<(i64, String)>(conn)
        .optional()?;
    Ok(row.map(club_from_row))
}
