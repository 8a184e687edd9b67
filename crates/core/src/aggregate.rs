// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team score aggregation.
//!
//! A team's matchday score is read from the roster *recorded* for that
//! matchday, never from the live team. Captaincy comes from the same recorded
//! roster.

use crate::error::CoreError;
use crate::state::{PlayerScore, ScoreTransition, TeamScoreResult};
use fantasy_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{
    MatchDayConfig, PlayerId, RosterHistoryEntry, StatsRecord, TeamId, compute_score,
    resolve_captain,
};
use std::collections::HashMap;

/// The factor applied to the captain's score.
pub const CAPTAIN_FACTOR: i64 = 2;

/// Computes a team's score for one matchday from its recorded roster.
///
/// Players without a stats record contribute 0 but still get a player score
/// entry. The captain's score is doubled exactly once. An empty roster
/// yields 0 with no player entries.
///
/// # Arguments
///
/// * `team_id` - The team being scored
/// * `matchday` - The matchday configuration
/// * `roster` - The roster entries recorded for `(team_id, matchday)`
/// * `stats_by_player` - Stats records for the matchday, keyed by player
///
/// # Errors
///
/// - `InvalidRosterState` if the recorded roster has more than one captain
/// - `Internal` if a roster entry or stats record belongs to another key
pub fn compute_team_score<S>(
    team_id: TeamId,
    matchday: &MatchDayConfig,
    roster: &[RosterHistoryEntry],
    stats_by_player: &HashMap<PlayerId, StatsRecord, S>,
) -> Result<TeamScoreResult, CoreError>
where
    S: std::hash::BuildHasher,
{
    let matchday_id = matchday.matchday_id;

    if let Some(stray) = roster
        .iter()
        .find(|entry| entry.team_id != team_id || entry.matchday_id != matchday_id)
    {
        return Err(CoreError::Internal(format!(
            "roster entry for team {} matchday {} passed while scoring team {team_id} matchday {matchday_id}",
            stray.team_id, stray.matchday_id
        )));
    }

    let captain: Option<PlayerId> = resolve_captain(team_id, matchday_id, roster)?;

    let mut player_scores: Vec<PlayerScore> = Vec::with_capacity(roster.len());
    let mut team_score: i64 = 0;
    for entry in roster {
        let base_score: i64 = match stats_by_player.get(&entry.player_id) {
            Some(stats) => {
                if stats.player_id != entry.player_id || stats.matchday_id != matchday_id {
                    return Err(CoreError::Internal(format!(
                        "stats for player {} matchday {} filed under player {}",
                        stats.player_id, stats.matchday_id, entry.player_id
                    )));
                }
                compute_score(stats, matchday)
            }
            None => 0,
        };
        let is_captain: bool = captain == Some(entry.player_id);
        let score: i64 = if is_captain {
            base_score.saturating_mul(CAPTAIN_FACTOR)
        } else {
            base_score
        };
        team_score = team_score.saturating_add(score);
        player_scores.push(PlayerScore {
            player_id: entry.player_id,
            base_score,
            score,
            is_captain,
        });
    }

    Ok(TeamScoreResult {
        team_id,
        matchday_id,
        team_score,
        player_scores,
    })
}

/// Computes a team score and wraps it with the audit event for persisting it.
///
/// `previous_score` is the currently stored team score, if any.
///
/// # Errors
///
/// Same as [`compute_team_score`].
pub fn score_team<S>(
    team_id: TeamId,
    matchday: &MatchDayConfig,
    roster: &[RosterHistoryEntry],
    stats_by_player: &HashMap<PlayerId, StatsRecord, S>,
    previous_score: Option<i64>,
    actor: Actor,
    cause: Cause,
) -> Result<ScoreTransition, CoreError>
where
    S: std::hash::BuildHasher,
{
    let result: TeamScoreResult =
        compute_team_score(team_id, matchday, roster, stats_by_player)?;

    let before: StateSnapshot = previous_score.map_or_else(StateSnapshot::empty, |score| {
        StateSnapshot::new(format!("team_score={score}"))
    });
    let after: StateSnapshot = StateSnapshot::new(format!(
        "team_score={},players={}",
        result.team_score,
        result.player_scores.len()
    ));
    let action: Action = Action::new(
        String::from("ComputeTeamScore"),
        Some(format!(
            "Computed score {} for team {team_id} on matchday {}",
            result.team_score, matchday.matchday_id
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after)
        .for_team(team_id)
        .for_matchday(matchday.matchday_id);

    Ok(ScoreTransition {
        result,
        audit_event,
    })
}
