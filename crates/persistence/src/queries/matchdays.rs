// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_domain::{MatchDayConfig, MatchDayId, Multiplier};
use num_traits::ToPrimitive;

use crate::diesel_schema::matchdays;
use crate::error::PersistenceError;

type MatchDayRow = (i64, String, i64, i64);

fn matchday_from_row(
    (matchday_id, label, numerator, denominator): MatchDayRow,
) -> Result<MatchDayConfig, PersistenceError> {
    let out_of_range = || {
        PersistenceError::ReconstructionError(format!(
            "matchday {matchday_id}: multiplier {numerator}/{denominator} out of range"
        ))
    };
    let numerator: u32 = numerator.to_u32().ok_or_else(out_of_range)?;
    let denominator: u32 = denominator.to_u32().ok_or_else(out_of_range)?;
    let multiplier: Multiplier = Multiplier::new(numerator, denominator)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    Ok(MatchDayConfig::new(
        MatchDayId::new(matchday_id),
        label,
        multiplier,
    ))
}

/// Looks up a matchday configuration.
///
/// # Errors
///
/// Returns an error if the query fails or the stored multiplier is invalid.
pub fn get_matchday(
    conn: &mut SqliteConnection,
    matchday_id: MatchDayId,
) -> Result<Option<MatchDayConfig>, PersistenceError> {
    let row: Option<MatchDayRow> = matchdays::table
        .filter(matchdays::matchday_id.eq(matchday_id.value()))
        .select((
            matchdays::matchday_id,
            matchdays::label,
            matchdays::multiplier_numerator,
            matchdays::multiplier_denominator,
        ))
        .first::<MatchDayRow>(conn)
        .optional()?;
    row.map(matchday_from_row).transpose()
}

/// Lists all matchdays in schedule order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored multiplier is invalid.
pub fn list_matchdays(
    conn: &mut SqliteConnection,
) -> Result<Vec<MatchDayConfig>, PersistenceError> {
    let rows: Vec<MatchDayRow> = matchdays::table
        .select((
            matchdays::matchday_id,
            matchdays::label,
            matchdays::multiplier_numerator,
            matchdays::multiplier_denominator,
        ))
        .order(matchdays::matchday_id.asc())
        .load::<MatchDayRow>(conn)?;
    rows.into_iter().map(matchday_from_row).collect()
}
