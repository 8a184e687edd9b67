// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{MatchDayId, PlayerId, TeamId};

use crate::data_models::{PlayerScoreEntry, StandingRow, TeamScoreEntry};
use crate::diesel_schema::{player_scores, team_scores};
use crate::error::PersistenceError;
use crate::queries::teams::list_team_headers;

/// Diesel Queryable struct for team score rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = team_scores)]
struct TeamScoreRow {
    team_id: i64,
    matchday_id: i64,
    score: i64,
    version: i64,
    computed_at: String,
}

impl From<TeamScoreRow> for TeamScoreEntry {
    fn from(row: TeamScoreRow) -> Self {
        Self {
            team_id: TeamId::new(row.team_id),
            matchday_id: MatchDayId::new(row.matchday_id),
            score: row.score,
            version: row.version,
            computed_at: row.computed_at,
        }
    }
}

/// Diesel Queryable struct for player score rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = player_scores)]
struct PlayerScoreRow {
    player_id: i64,
    matchday_id: i64,
    team_id: i64,
    base_score: i64,
    score: i64,
    version: i64,
    computed_at: String,
}

impl From<PlayerScoreRow> for PlayerScoreEntry {
    fn from(row: PlayerScoreRow) -> Self {
        Self {
            player_id: PlayerId::new(row.player_id),
            matchday_id: MatchDayId::new(row.matchday_id),
            team_id: TeamId::new(row.team_id),
            base_score: row.base_score,
            score: row.score,
            version: row.version,
            computed_at: row.computed_at,
        }
    }
}

/// Looks up the stored score for `(team, matchday)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_team_score(
    conn: &mut SqliteConnection,
    team_id: TeamId,
    matchday_id: MatchDayId,
) -> Result<Option<TeamScoreEntry>, PersistenceError> {
    let row: Option<TeamScoreRow> = team_scores::table
        .filter(team_scores::team_id.eq(team_id.value()))
        .filter(team_scores::matchday_id.eq(matchday_id.value()))
        .select(TeamScoreRow::as_select())
        .first::<TeamScoreRow>(conn)
        .optional()?;
    Ok(row.map(TeamScoreEntry::from))
}

/// Returns a team's score history in matchday order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_team_scores(
    conn: &mut SqliteConnection,
    team_id: TeamId,
) -> Result<Vec<TeamScoreEntry>, PersistenceError> {
    let rows: Vec<TeamScoreRow> = team_scores::table
        .filter(team_scores::team_id.eq(team_id.value()))
        .order(team_scores::matchday_id.asc())
        .select(TeamScoreRow::as_select())
        .load::<TeamScoreRow>(conn)?;
    Ok(rows.into_iter().map(TeamScoreEntry::from).collect())
}

/// Returns a player's score history, one entry per matchday and team.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_player_scores(
    conn: &mut SqliteConnection,
    player_id: PlayerId,
) -> Result<Vec<PlayerScoreEntry>, PersistenceError> {
    let rows: Vec<PlayerScoreRow> = player_scores::table
        .filter(player_scores::player_id.eq(player_id.value()))
        .order((player_scores::matchday_id.asc(), player_scores::team_id.asc()))
        .select(PlayerScoreRow::as_select())
        .load::<PlayerScoreRow>(conn)?;
    Ok(rows.into_iter().map(PlayerScoreEntry::from).collect())
}

/// Builds the league table.
///
/// Every team appears, including teams without a recorded score. Teams are
/// ranked by total score descending, ties broken by ascending team id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_standings(conn: &mut SqliteConnection) -> Result<Vec<StandingRow>, PersistenceError> {
    let scores: Vec<(i64, i64)> = team_scores::table
        .select((team_scores::team_id, team_scores::score))
        .load::<(i64, i64)>(conn)?;

    let mut totals: HashMap<i64, (i64, usize)> = HashMap::new();
    for (team_id, score) in scores {
        let entry: &mut (i64, usize) = totals.entry(team_id).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(score);
        entry.1 += 1;
    }

    let mut standings: Vec<StandingRow> = list_team_headers(conn)?
        .into_iter()
        .map(|(team_id, name, owner_id)| {
            let (total_score, matchdays_scored): (i64, usize) =
                totals.get(&team_id.value()).copied().unwrap_or((0, 0));
            StandingRow {
                team_id,
                name,
                owner_id,
                total_score,
                matchdays_scored,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    Ok(standings)
}
