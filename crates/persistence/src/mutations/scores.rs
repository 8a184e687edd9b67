// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy::{PlayerScore, TeamScoreResult};
use tracing::debug;

use crate::data_models::TeamScoreEntry;
use crate::diesel_schema::{player_scores, team_scores};
use crate::error::PersistenceError;
use crate::mutations::timestamp;

/// Upserts one player's entry for `(player, matchday, team)`.
///
/// A player on several rosters for the same matchday keeps one entry per team.
fn write_player_score(
    conn: &mut SqliteConnection,
    result: &TeamScoreResult,
    player_score: &PlayerScore,
    computed_at: &str,
) -> Result<(), PersistenceError> {
    let player_id: i64 = player_score.player_id.value();
    let matchday_id: i64 = result.matchday_id.value();
    let team_id: i64 = result.team_id.value();

    let current: Option<i64> = player_scores::table
        .filter(player_scores::player_id.eq(player_id))
        .filter(player_scores::matchday_id.eq(matchday_id))
        .filter(player_scores::team_id.eq(team_id))
        .select(player_scores::version)
        .first::<i64>(conn)
        .optional()?;

    match current {
        Some(version) => {
            diesel::update(
                player_scores::table
                    .filter(player_scores::player_id.eq(player_id))
                    .filter(player_scores::matchday_id.eq(matchday_id))
                    .filter(player_scores::team_id.eq(team_id)),
            )
            .set((
                player_scores::base_score.eq(player_score.base_score),
                player_scores::score.eq(player_score.score),
                player_scores::version.eq(version.saturating_add(1)),
                player_scores::computed_at.eq(computed_at),
            ))
            .execute(conn)?;
        }
        None => {
            diesel::insert_into(player_scores::table)
                .values((
                    player_scores::player_id.eq(player_id),
                    player_scores::matchday_id.eq(matchday_id),
                    player_scores::team_id.eq(team_id),
                    player_scores::base_score.eq(player_score.base_score),
                    player_scores::score.eq(player_score.score),
                    player_scores::version.eq(1_i64),
                    player_scores::computed_at.eq(computed_at),
                ))
                .execute(conn)?;
        }
    }
    Ok(())
}

/// Writes a computed team score and its player scores to score history.
///
/// The stored version is compared with `expected_version` before anything is
/// written. `None` expects no score to be stored yet. On a match, the team
/// score and every player score are overwritten and their versions advance.
///
/// Must run inside a transaction that also covers the read of
/// `expected_version`'s source, so the comparison and the write are atomic.
///
/// # Errors
///
/// - `StorageConflict` if the stored version differs from `expected_version`
/// - A database error if a write fails
pub fn write_team_score(
    conn: &mut SqliteConnection,
    result: &TeamScoreResult,
    expected_version: Option<i64>,
) -> Result<TeamScoreEntry, PersistenceError> {
    let team_id: i64 = result.team_id.value();
    let matchday_id: i64 = result.matchday_id.value();

    let current: Option<i64> = team_scores::table
        .filter(team_scores::team_id.eq(team_id))
        .filter(team_scores::matchday_id.eq(matchday_id))
        .select(team_scores::version)
        .first::<i64>(conn)
        .optional()?;

    if current != expected_version {
        return Err(PersistenceError::StorageConflict {
            team_id: result.team_id,
            matchday_id: result.matchday_id,
            expected_version,
            actual_version: current,
        });
    }

    let computed_at: String = timestamp()?;
    let version: i64 = current.map_or(1, |v| v.saturating_add(1));

    if current.is_some() {
        diesel::update(
            team_scores::table
                .filter(team_scores::team_id.eq(team_id))
                .filter(team_scores::matchday_id.eq(matchday_id)),
        )
        .set((
            team_scores::score.eq(result.team_score),
            team_scores::version.eq(version),
            team_scores::computed_at.eq(&computed_at),
        ))
        .execute(conn)?;
    } else {
        diesel::insert_into(team_scores::table)
            .values((
                team_scores::team_id.eq(team_id),
                team_scores::matchday_id.eq(matchday_id),
                team_scores::score.eq(result.team_score),
                team_scores::version.eq(version),
                team_scores::computed_at.eq(&computed_at),
            ))
            .execute(conn)?;
    }

    for player_score in &result.player_scores {
        write_player_score(conn, result, player_score, &computed_at)?;
    }

    debug!(
        team_id,
        matchday_id,
        score = result.team_score,
        version,
        players = result.player_scores.len(),
        "Wrote team score"
    );

    Ok(TeamScoreEntry {
        team_id: result.team_id,
        matchday_id: result.matchday_id,
        score: result.team_score,
        version,
        computed_at,
    })
}
