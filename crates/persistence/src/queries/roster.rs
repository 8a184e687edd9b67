// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use fantasy_domain::{MatchDayId, PlayerId, RosterHistoryEntry, TeamId};

use crate::diesel_schema::roster_entries;
use crate::error::PersistenceError;

/// Returns the roster recorded for `(team, matchday)` in slot order.
///
/// An unrecorded roster is an empty list.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_roster(
    conn: &mut SqliteConnection,
    team_id: TeamId,
    matchday_id: MatchDayId,
) -> Result<Vec<RosterHistoryEntry>, PersistenceError> {
    let rows: Vec<(i64, i32)> = roster_entries::table
        .filter(roster_entries::team_id.eq(team_id.value()))
        .filter(roster_entries::matchday_id.eq(matchday_id.value()))
        .order(roster_entries::roster_entry_id.asc())
        .select((roster_entries::player_id, roster_entries::is_captain))
        .load::<(i64, i32)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(player_id, is_captain)| RosterHistoryEntry {
            team_id,
            matchday_id,
            player_id: PlayerId::new(player_id),
            is_captain: is_captain != 0,
        })
        .collect())
}

/// Returns true if any entry is recorded for `(team, matchday)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn roster_recorded(
    conn: &mut SqliteConnection,
    team_id: TeamId,
    matchday_id: MatchDayId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        roster_entries::table
            .filter(roster_entries::team_id.eq(team_id.value()))
            .filter(roster_entries::matchday_id.eq(matchday_id.value())),
    ))
    .get_result::<bool>(conn)?)
}
