// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{ClubId, PlayerId, Position};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::players;
use crate::error::PersistenceError;

/// Inserts a player and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the club does not exist.
pub fn insert_player(
    conn: &mut SqliteConnection,
    name: &str,
    position: Position,
    club_id: Option<ClubId>,
) -> Result<PlayerId, PersistenceError> {
    diesel::insert_into(players::table)
        .values((
            players::name.eq(name),
            players::position.eq(position.as_str()),
            players::club_id.eq(club_id.map(ClubId::value)),
        ))
        .execute(conn)?;
    let player_id: PlayerId = PlayerId::new(get_last_insert_rowid(conn)?);
    debug!(%player_id, name, %position, "Inserted player");
    Ok(player_id)
}
