// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fantasy_audit::{AuditEvent, StateSnapshot};
use fantasy_domain::{MatchDayId, PlayerId, RosterHistoryEntry, Team, TeamId};

/// Default maximum number of players on a live roster.
pub const DEFAULT_MAX_ROSTER_SIZE: usize = 15;

/// League-wide rules applied to live roster commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueRules {
    /// Maximum number of members a team may hold.
    pub max_roster_size: usize,
}

impl LeagueRules {
    /// Creates league rules.
    #[must_use]
    pub const fn new(max_roster_size: usize) -> Self {
        Self { max_roster_size }
    }
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROSTER_SIZE)
    }
}

/// Converts a team to a snapshot for audit purposes.
#[must_use]
pub fn team_snapshot(team: &Team) -> StateSnapshot {
    let members: Vec<String> = team.members().iter().map(ToString::to_string).collect();
    let captain: String = team
        .captain()
        .map_or_else(|| String::from("none"), |captain| captain.to_string());
    StateSnapshot::new(format!(
        "team={},members=[{}],captain={captain}",
        team.team_id,
        members.join(",")
    ))
}

/// The result of a successful live roster transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new team after the transition.
    pub new_team: Team,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// A validated roster snapshot ready to be appended to roster history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterCommit {
    /// The team the roster belongs to.
    pub team_id: TeamId,
    /// The matchday the roster is recorded for.
    pub matchday_id: MatchDayId,
    /// The entries to append, in slot order.
    pub entries: Vec<RosterHistoryEntry>,
    /// The audit event recording the commit.
    pub audit_event: AuditEvent,
}

/// One player's contribution to a team score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    /// The player's own score for the matchday.
    pub base_score: i64,
    /// The score counted for the team (doubled for the captain).
    pub score: i64,
    pub is_captain: bool,
}

/// A team's aggregated score for one matchday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScoreResult {
    pub team_id: TeamId,
    pub matchday_id: MatchDayId,
    /// Sum of every `PlayerScore::score`.
    pub team_score: i64,
    /// Per-player contributions in roster order.
    pub player_scores: Vec<PlayerScore>,
}

/// A computed team score together with its audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTransition {
    pub result: TeamScoreResult,
    pub audit_event: AuditEvent,
}
