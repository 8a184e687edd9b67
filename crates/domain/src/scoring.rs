// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Player score calculation.
//!
//! Scores are computed in exact integer arithmetic. Every stat weight is a
//! multiple of one half, so the raw score is carried in *half-points*
//! (twice the raw value). The matchday multiplier is a rational number and the
//! final score is rounded half away from zero.
//!
//! Raw score formula:
//!
//! ```text
//! raw = 5*goals + 3*assists + 2*blocks + 2*steals + 1*pf_drawn + 4*saves
//!     + 3*wins - 1*pf - 0.5*balls_lost - 1*contra_fouls - 2*brutality
//! ```

use crate::types::{MatchDayConfig, Multiplier, StatsRecord};
use serde::{Deserialize, Serialize};

/// Per-stat weights, expressed in half-points.
pub mod weights {
    pub const GOAL: i64 = 10;
    pub const ASSIST: i64 = 6;
    pub const BLOCK: i64 = 4;
    pub const STEAL: i64 = 4;
    pub const PF_DRAWN: i64 = 2;
    pub const SAVE: i64 = 8;
    pub const WIN: i64 = 6;
    pub const PF: i64 = -2;
    pub const BALL_LOST: i64 = -1;
    pub const CONTRA_FOUL: i64 = -2;
    pub const BRUTALITY: i64 = -4;
}

/// The contribution of each counted event to a raw score, in half-points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub goals: i64,
    pub assists: i64,
    pub blocks: i64,
    pub steals: i64,
    pub pf_drawn: i64,
    pub saves: i64,
    pub wins: i64,
    pub pf: i64,
    pub balls_lost: i64,
    pub contra_fouls: i64,
    pub brutality: i64,
}

impl ScoreBreakdown {
    /// Builds the breakdown for a stats record.
    #[must_use]
    pub fn from_stats(stats: &StatsRecord) -> Self {
        Self {
            goals: i64::from(stats.goals) * weights::GOAL,
            assists: i64::from(stats.assists) * weights::ASSIST,
            blocks: i64::from(stats.blocks) * weights::BLOCK,
            steals: i64::from(stats.steals) * weights::STEAL,
            pf_drawn: i64::from(stats.pf_drawn) * weights::PF_DRAWN,
            saves: i64::from(stats.saves) * weights::SAVE,
            wins: i64::from(stats.wins) * weights::WIN,
            pf: i64::from(stats.pf) * weights::PF,
            balls_lost: i64::from(stats.balls_lost) * weights::BALL_LOST,
            contra_fouls: i64::from(stats.contra_fouls) * weights::CONTRA_FOUL,
            brutality: i64::from(stats.brutality) * weights::BRUTALITY,
        }
    }

    /// Returns the raw score in half-points.
    #[must_use]
    pub const fn total_half_points(&self) -> i64 {
        self.goals
            + self.assists
            + self.blocks
            + self.steals
            + self.pf_drawn
            + self.saves
            + self.wins
            + self.pf
            + self.balls_lost
            + self.contra_fouls
            + self.brutality
    }
}

/// Returns the raw (unmultiplied) score in half-points.
#[must_use]
pub fn raw_half_points(stats: &StatsRecord) -> i64 {
    ScoreBreakdown::from_stats(stats).total_half_points()
}

/// Divides `numerator` by a positive `denominator`, rounding half away from zero.
#[must_use]
pub const fn div_round_half_away_from_zero(numerator: i128, denominator: i128) -> i128 {
    let magnitude: i128 = (numerator.abs() * 2 + denominator) / (denominator * 2);
    if numerator < 0 { -magnitude } else { magnitude }
}

/// Applies a multiplier to a half-point value and rounds to whole points.
///
/// Results beyond the `i64` range saturate.
#[must_use]
pub fn apply_multiplier(half_points: i64, multiplier: Multiplier) -> i64 {
    let numerator: i128 = i128::from(half_points) * i128::from(multiplier.numerator());
    let denominator: i128 = 2 * i128::from(multiplier.denominator());
    let rounded: i128 = div_round_half_away_from_zero(numerator, denominator);
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Computes a player's score for one matchday.
///
/// Deterministic and side-effect free. Negative scores are valid.
#[must_use]
pub fn compute_score(stats: &StatsRecord, matchday: &MatchDayConfig) -> i64 {
    apply_multiplier(raw_half_points(stats), matchday.multiplier)
}
