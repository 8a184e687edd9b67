// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{PlayerId, Team, TeamId};

use crate::diesel_schema::{team_members, teams};
use crate::error::PersistenceError;

type TeamRow = (i64, String, String, Option<i64>);

fn load_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<PlayerId>, PersistenceError> {
    let members: Vec<i64> = team_members::table
        .filter(team_members::team_id.eq(team_id))
        .order(team_members::slot.asc())
        .select(team_members::player_id)
        .load::<i64>(conn)?;
    Ok(members.into_iter().map(PlayerId::new).collect())
}

fn team_from_row(
    conn: &mut SqliteConnection,
    (team_id, owner_id, name, captain): TeamRow,
) -> Result<Team, PersistenceError> {
    let members: Vec<PlayerId> = load_members(conn, team_id)?;
    Team::from_parts(
        TeamId::new(team_id),
        owner_id,
        name,
        members,
        captain.map(PlayerId::new),
    )
    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Loads a team with its live roster.
///
/// # Errors
///
/// Returns an error if the query fails or the stored roster is inconsistent.
pub fn get_team(
    conn: &mut SqliteConnection,
    team_id: TeamId,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = teams::table
        .filter(teams::team_id.eq(team_id.value()))
        .select((
            teams::team_id,
            teams::owner_id,
            teams::name,
            teams::captain_player_id,
        ))
        .first::<TeamRow>(conn)
        .optional()?;
    row.map(|row| team_from_row(conn, row)).transpose()
}

/// Lists `(team_id, name, owner_id)` for every team, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_team_headers(
    conn: &mut SqliteConnection,
) -> Result<Vec<(TeamId, String, String)>, PersistenceError> {
    let rows: Vec<(i64, String, String)> = teams::table
        .select((teams::team_id, teams::name, teams::owner_id))
        .order(teams::team_id.asc())
        .load::<(i64, String, String)>(conn)?;
    Ok(rows
        .into_iter()
        .map(|(team_id, name, owner_id)| (TeamId::new(team_id), name, owner_id))
        .collect())
}
