// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::StatsRecord;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::stats_records;
use crate::error::PersistenceError;
use crate::mutations::timestamp;

fn count(value: u32, field: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("{field} count {value} exceeds storage range"))
    })
}

/// Stores a stats record, replacing any earlier record for the same
/// `(player, matchday)`.
///
/// Stored scores are not touched; they change only on recomputation.
///
/// # Errors
///
/// Returns an error if a count exceeds the storage range, the player or
/// matchday does not exist, or the write fails.
pub fn replace_stats(
    conn: &mut SqliteConnection,
    stats: &StatsRecord,
) -> Result<(), PersistenceError> {
    let player_id: i64 = stats.player_id.value();
    let matchday_id: i64 = stats.matchday_id.value();

    diesel::delete(
        stats_records::table
            .filter(stats_records::player_id.eq(player_id))
            .filter(stats_records::matchday_id.eq(matchday_id)),
    )
    .execute(conn)?;

    diesel::insert_into(stats_records::table)
        .values((
            stats_records::player_id.eq(player_id),
            stats_records::matchday_id.eq(matchday_id),
            stats_records::goals.eq(count(stats.goals, "goals")?),
            stats_records::assists.eq(count(stats.assists, "assists")?),
            stats_records::blocks.eq(count(stats.blocks, "blocks")?),
            stats_records::steals.eq(count(stats.steals, "steals")?),
            stats_records::pf_drawn.eq(count(stats.pf_drawn, "pf_drawn")?),
            stats_records::saves.eq(count(stats.saves, "saves")?),
            stats_records::wins.eq(count(stats.wins, "wins")?),
            stats_records::pf.eq(count(stats.pf, "pf")?),
            stats_records::balls_lost.eq(count(stats.balls_lost, "balls_lost")?),
            stats_records::contra_fouls.eq(count(stats.contra_fouls, "contra_fouls")?),
            stats_records::brutality.eq(count(stats.brutality, "brutality")?),
            stats_records::recorded_at.eq(timestamp()?),
        ))
        .execute(conn)?;

    debug!(player_id, matchday_id, "Stored stats record");
    Ok(())
}
