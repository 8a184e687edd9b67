// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fantasy_domain::{MatchDayId, PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// One entry of a team's score history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScoreEntry {
    pub team_id: TeamId,
    pub matchday_id: MatchDayId,
    pub score: i64,
    /// Optimistic-concurrency token. Starts at 1 and grows on every recomputation.
    pub version: i64,
    /// RFC 3339 timestamp of the last computation.
    pub computed_at: String,
}

/// One entry of a player's score history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScoreEntry {
    pub player_id: PlayerId,
    pub matchday_id: MatchDayId,
    /// The team this entry was scored for.
    pub team_id: TeamId,
    pub base_score: i64,
    /// The score counted for `team_id`, doubled when the player captained it.
    pub score: i64,
    pub version: i64,
    pub computed_at: String,
}

/// A team's position in the league table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub name: String,
    pub owner_id: String,
    /// Sum of every recorded matchday score.
    pub total_score: i64,
    /// Number of matchdays with a recorded score.
    pub matchdays_scored: usize,
}
