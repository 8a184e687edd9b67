// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the fantasy league.
//!
//! Requests arrive as plain data, are validated and authorized here, and are
//! handed to the core as typed commands. Every error leaving this crate is an
//! [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod input;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{ACTOR_TYPE, AuthenticatedActor, AuthorizationService, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    add_member, create_club, create_matchday, create_player, create_team, delete_club,
    delete_matchday, get_matchday, get_player, get_player_scores, get_player_stats, get_roster,
    get_score_breakdown, get_standings, get_team, get_team_audit_log, get_team_scores,
    list_clubs, list_matchdays, list_players, lock_team_roster, recompute_team_score,
    record_roster, record_stats, remove_member, set_captain,
};
pub use input::{
    InputError, MAX_STAT_COUNT, parse_club_id, parse_matchday_id, parse_multiplier,
    parse_player_id, parse_position, parse_stat_count, parse_team_id,
};
pub use request_response::{
    AuditEventInfo, ClubInfo, CreateClubRequest, CreateClubResponse, CreateMatchDayRequest,
    CreateMatchDayResponse, CreatePlayerRequest, CreatePlayerResponse, CreateTeamRequest,
    DeleteResponse, ListClubsResponse, ListMatchDaysResponse, ListPlayersResponse,
    LockRosterRequest, MatchDayInfo, PlayerInfo, PlayerScoreHistoryInfo,
    PlayerScoreHistoryResponse, PlayerScoreInfo, PlayerSelectionRequest, PlayerStatsResponse,
    RecomputeScoreRequest, RecomputeScoreResponse, RecordRosterRequest, RecordRosterResponse,
    RecordStatsRequest, RecordStatsResponse, RosterEntryInfo, RosterResponse, RosterSlotRequest,
    ScoreBreakdownResponse, StandingInfo, StandingsResponse, StatsInfo, TeamAuditResponse,
    TeamInfo, TeamResponse, TeamScoreHistoryResponse, TeamScoreInfo,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
