// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{ClubId, Player, PlayerId, Position};

use crate::diesel_schema::players;
use crate::error::PersistenceError;

type PlayerRow = (i64, String, String, Option<i64>);

fn player_from_row(
    (player_id, name, position, club_id): PlayerRow,
) -> Result<Player, PersistenceError> {
    let position: Position = position.parse().map_err(|e: fantasy_domain::DomainError| {
        PersistenceError::ReconstructionError(format!("player {player_id}: {e}"))
    })?;
    Ok(Player {
        player_id: PlayerId::new(player_id),
        name,
        position,
        club_id: club_id.map(ClubId::new),
    })
}

/// Looks up a player by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored position is unknown.
pub fn get_player(
    conn: &mut SqliteConnection,
    player_id: PlayerId,
) -> Result<Option<Player>, PersistenceError> {
    let row: Option<PlayerRow> = players::table
        .filter(players::player_id.eq(player_id.value()))
        .select((
            players::player_id,
            players::name,
            players::position,
            players::club_id,
        ))
        .first::<PlayerRow>(conn)
        .optional()?;
    row.map(player_from_row).transpose()
}

/// Lists all players ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored position is unknown.
pub fn list_players(conn: &mut SqliteConnection) -> Result<Vec<Player>, PersistenceError> {
    let rows: Vec<PlayerRow> = players::table
        .select((
            players::player_id,
            players::name,
            players::position,
            players::club_id,
        ))
        .order(players::player_id.asc())
        .load::<PlayerRow>(conn)?;
    rows.into_iter().map(player_from_row).collect()
}
