// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{MatchDayId, PlayerId, StatsRecord};
use num_traits::ToPrimitive;

use crate::diesel_schema::stats_records;
use crate::error::PersistenceError;

/// Diesel Queryable struct for stats rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = stats_records)]
struct StatsRow {
    player_id: i64,
    matchday_id: i64,
    goals: i32,
    assists: i32,
    blocks: i32,
    steals: i32,
    pf_drawn: i32,
    saves: i32,
    wins: i32,
    pf: i32,
    balls_lost: i32,
    contra_fouls: i32,
    brutality: i32,
    #[allow(dead_code)]
    recorded_at: String,
}

impl StatsRow {
    fn into_record(self) -> Result<StatsRecord, PersistenceError> {
        let player_id: i64 = self.player_id;
        let matchday_id: i64 = self.matchday_id;
        let count = |value: i32, field: &str| -> Result<u32, PersistenceError> {
            value.to_u32().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "stats for player {player_id} matchday {matchday_id}: negative {field}"
                ))
            })
        };
        Ok(StatsRecord {
            player_id: PlayerId::new(player_id),
            matchday_id: MatchDayId::new(matchday_id),
            goals: count(self.goals, "goals")?,
            assists: count(self.assists, "assists")?,
            blocks: count(self.blocks, "blocks")?,
            steals: count(self.steals, "steals")?,
            pf_drawn: count(self.pf_drawn, "pf_drawn")?,
            saves: count(self.saves, "saves")?,
            wins: count(self.wins, "wins")?,
            pf: count(self.pf, "pf")?,
            balls_lost: count(self.balls_lost, "balls_lost")?,
            contra_fouls: count(self.contra_fouls, "contra_fouls")?,
            brutality: count(self.brutality, "brutality")?,
        })
    }
}

/// Looks up the stats record for `(player, matchday)`.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_stats(
    conn: &mut SqliteConnection,
    player_id: PlayerId,
    matchday_id: MatchDayId,
) -> Result<Option<StatsRecord>, PersistenceError> {
    let row: Option<StatsRow> = stats_records::table
        .filter(stats_records::player_id.eq(player_id.value()))
        .filter(stats_records::matchday_id.eq(matchday_id.value()))
        .select(StatsRow::as_select())
        .first::<StatsRow>(conn)
        .optional()?;
    row.map(StatsRow::into_record).transpose()
}

/// Lists a player's stats history in matchday order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_player_stats(
    conn: &mut SqliteConnection,
    player_id: PlayerId,
) -> Result<Vec<StatsRecord>, PersistenceError> {
    let rows: Vec<StatsRow> = stats_records::table
        .filter(stats_records::player_id.eq(player_id.value()))
        .order(stats_records::matchday_id.asc())
        .select(StatsRow::as_select())
        .load::<StatsRow>(conn)?;
    rows.into_iter().map(StatsRow::into_record).collect()
}

/// Loads the stats recorded on a matchday for the given players.
///
/// Players without a record are absent from the map.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn get_matchday_stats(
    conn: &mut SqliteConnection,
    matchday_id: MatchDayId,
    player_ids: &[PlayerId],
) -> Result<HashMap<PlayerId, StatsRecord>, PersistenceError> {
    let ids: Vec<i64> = player_ids.iter().map(|id| id.value()).collect();
    let rows: Vec<StatsRow> = stats_records::table
        .filter(stats_records::matchday_id.eq(matchday_id.value()))
        .filter(stats_records::player_id.eq_any(ids))
        .select(StatsRow::as_select())
        .load::<StatsRow>(conn)?;
    rows.into_iter()
        .map(|row| row.into_record().map(|record| (record.player_id, record)))
        .collect()
}
