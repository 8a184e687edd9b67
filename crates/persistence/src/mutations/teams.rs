// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{PlayerId, Team, TeamId};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{team_members, teams};
use crate::error::PersistenceError;

/// Inserts a team with an empty roster and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_team(
    conn: &mut SqliteConnection,
    owner_id: &str,
    name: &str,
) -> Result<TeamId, PersistenceError> {
    diesel::insert_into(teams::table)
        .values((teams::owner_id.eq(owner_id), teams::name.eq(name)))
        .execute(conn)?;
    let team_id: TeamId = TeamId::new(get_last_insert_rowid(conn)?);
    debug!(%team_id, owner_id, name, "Inserted team");
    Ok(team_id)
}

/// Replaces the stored live roster and captain with the given team snapshot.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn sync_team_roster(conn: &mut SqliteConnection, team: &Team) -> Result<(), PersistenceError> {
    let team_id: i64 = team.team_id.value();

    // Clear the captain first so no stale reference survives the member rewrite.
    diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set(teams::captain_player_id.eq(None::<i64>))
        .execute(conn)?;

    diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
        .execute(conn)?;

    for (slot, player_id) in team.members().iter().enumerate() {
        let slot: i32 = slot.to_i32().ok_or_else(|| {
            PersistenceError::QueryFailed(format!("roster slot {slot} out of range"))
        })?;
        diesel::insert_into(team_members::table)
            .values((
                team_members::team_id.eq(team_id),
                team_members::player_id.eq(player_id.value()),
                team_members::slot.eq(slot),
            ))
            .execute(conn)?;
    }

    diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set(teams::captain_player_id.eq(team.captain().map(PlayerId::value)))
        .execute(conn)?;

    debug!(
        %team_id,
        members = team.members().len(),
        captain = ?team.captain(),
        "Synced live roster"
    );
    Ok(())
}
