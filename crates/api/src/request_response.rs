// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw values; handlers validate them into domain types.

use fantasy_domain::ScoreBreakdown;
use serde::{Deserialize, Serialize};

/// API request to create a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
}

/// A club as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubInfo {
    pub club_id: i64,
    pub name: String,
}

/// API response for a successful club creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClubResponse {
    pub club: ClubInfo,
    /// The audit event recording the creation.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing every club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClubsResponse {
    pub clubs: Vec<ClubInfo>,
}

/// API response for a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// The id of the removed resource.
    pub id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    /// `Field` or `Goalkeeper`.
    pub position: String,
    /// The club the player belongs to, if any.
    #[serde(default)]
    pub club_id: Option<i64>,
}

/// A player as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: i64,
    pub name: String,
    pub position: String,
    pub club_id: Option<i64>,
}

/// API response for a successful player creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayerResponse {
    pub player: PlayerInfo,
    pub event_id: i64,
    pub message: String,
}

/// API response listing every player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPlayersResponse {
    pub players: Vec<PlayerInfo>,
}

/// API request to create a team owned by the requesting actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// A team and its live roster as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_id: i64,
    pub owner_id: String,
    pub name: String,
    /// Current members in draft order.
    pub members: Vec<i64>,
    /// The live captain.
    pub captain: Option<i64>,
}

/// API response for any change to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team: TeamInfo,
    pub event_id: i64,
    pub message: String,
}

/// API request naming a player, used to add a member or pick a captain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSelectionRequest {
    pub player_id: i64,
}

/// API request to create a matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatchDayRequest {
    pub label: String,
    /// Decimal (`"1.5"`) or fraction (`"3/2"`). Defaults to `"1"`.
    #[serde(default)]
    pub multiplier: Option<String>,
}

/// A matchday as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDayInfo {
    pub matchday_id: i64,
    pub label: String,
    /// The multiplier in lowest terms, e.g. `"3/2"`.
    pub multiplier: String,
}

/// API response for a successful matchday creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatchDayResponse {
    pub matchday: MatchDayInfo,
    pub event_id: i64,
    pub message: String,
}

/// API response listing every matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMatchDaysResponse {
    pub matchdays: Vec<MatchDayInfo>,
}

/// API request to record (or correct) one player's stats for a matchday.
///
/// Omitted counts are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStatsRequest {
    pub player_id: i64,
    pub matchday_id: i64,
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

/// A stats record as returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsInfo {
    pub player_id: i64,
    pub matchday_id: i64,
    pub goals: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
    pub pf_drawn: u32,
    pub saves: u32,
    pub wins: u32,
    pub pf: u32,
    pub balls_lost: u32,
    pub contra_fouls: u32,
    pub brutality: u32,
}

/// API response for a recorded stats record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStatsResponse {
    pub stats: StatsInfo,
    /// True when an earlier record for the same player and matchday was replaced.
    pub replaced: bool,
    pub event_id: i64,
    pub message: String,
}

/// A player's stats history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub player_id: i64,
    pub stats: Vec<StatsInfo>,
}

/// One slot of a roster snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlotRequest {
    pub player_id: i64,
    #[serde(default)]
    pub is_captain: bool,
}

/// API request to record a roster snapshot for a matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRosterRequest {
    pub team_id: i64,
    pub matchday_id: i64,
    pub slots: Vec<RosterSlotRequest>,
}

/// API request to record the live roster of a team for a matchday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRosterRequest {
    pub team_id: i64,
    pub matchday_id: i64,
}

/// One recorded roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntryInfo {
    pub player_id: i64,
    pub is_captain: bool,
}

/// A team's recorded roster for a matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub team_id: i64,
    pub matchday_id: i64,
    /// Entries in the order they were recorded.
    pub entries: Vec<RosterEntryInfo>,
    /// The recorded captain, if any.
    pub captain: Option<i64>,
}

/// API response for a roster commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRosterResponse {
    pub roster: RosterResponse,
    pub event_id: i64,
    pub message: String,
}

/// API request to compute and store a team's score for a matchday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeScoreRequest {
    pub team_id: i64,
    pub matchday_id: i64,
    /// The score version the caller last saw. When omitted, the version read
    /// at the start of the recomputation is used.
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// One player's contribution to a team score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreInfo {
    pub player_id: i64,
    pub base_score: i64,
    pub score: i64,
    pub is_captain: bool,
}

/// API response for a recomputed team score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeScoreResponse {
    pub team_id: i64,
    pub matchday_id: i64,
    pub team_score: i64,
    /// The stored version after this write.
    pub version: i64,
    pub player_scores: Vec<PlayerScoreInfo>,
    pub event_id: i64,
    pub message: String,
}

/// One entry of a team's score history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScoreInfo {
    pub matchday_id: i64,
    pub score: i64,
    pub version: i64,
    pub computed_at: String,
}

/// A team's score history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScoreHistoryResponse {
    pub team_id: i64,
    pub scores: Vec<TeamScoreInfo>,
    /// Sum of every recorded score.
    pub total_score: i64,
}

/// One entry of a player's score history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreHistoryInfo {
    pub matchday_id: i64,
    pub team_id: i64,
    pub base_score: i64,
    pub score: i64,
    pub version: i64,
    pub computed_at: String,
}

/// A player's score history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreHistoryResponse {
    pub player_id: i64,
    pub scores: Vec<PlayerScoreHistoryInfo>,
}

/// How a player's matchday score is made up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdownResponse {
    pub player_id: i64,
    pub matchday_id: i64,
    pub multiplier: String,
    /// Per-stat contributions in half-points.
    pub breakdown: ScoreBreakdown,
    /// The unmultiplied score in half-points.
    pub raw_half_points: i64,
    /// The final rounded score.
    pub score: i64,
    /// False when no stats were recorded and zeros were assumed.
    pub has_stats: bool,
}

/// A team's position in the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingInfo {
    /// 1-based rank.
    pub rank: usize,
    pub team_id: i64,
    pub name: String,
    pub owner_id: String,
    pub total_score: i64,
    pub matchdays_scored: usize,
}

/// The league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<StandingInfo>,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub team_id: Option<i64>,
    pub matchday_id: Option<i64>,
}

/// A team's audit log, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAuditResponse {
    pub team_id: i64,
    pub events: Vec<AuditEventInfo>,
}
