// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler validates its request, checks existence and ownership,
//! runs the core transition and persists the result together with its audit
//! event. Handlers never hold state between calls.

use std::collections::HashMap;

use fantasy::{
    Command, LeagueRules, RosterCommit, ScoreTransition, TransitionResult, apply, lock_roster,
    record_roster as record_roster_commit, score_team,
};
use fantasy_audit::{Action, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{
    Club, ClubId, DomainError, MatchDayConfig, MatchDayId, Multiplier, Player, PlayerId, Position,
    RosterHistoryEntry, RosterSlot, ScoreBreakdown, StatsRecord, Team, TeamId, compute_score,
    resolve_captain, validate_name, validate_owner_id,
};
use fantasy_persistence::{
    Persistence, PersistenceError, PlayerScoreEntry, StandingRow, TeamScoreEntry,
};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::input::{
    parse_club_id, parse_matchday_id, parse_multiplier, parse_player_id, parse_position,
    parse_stat_count, parse_team_id,
};
use crate::request_response::{
    AuditEventInfo, ClubInfo, CreateClubRequest, CreateClubResponse, CreateMatchDayRequest,
    CreateMatchDayResponse, CreatePlayerRequest, CreatePlayerResponse, CreateTeamRequest,
    DeleteResponse, ListClubsResponse, ListMatchDaysResponse, ListPlayersResponse,
    LockRosterRequest, MatchDayInfo, PlayerInfo, PlayerScoreHistoryInfo,
    PlayerScoreHistoryResponse, PlayerScoreInfo, PlayerSelectionRequest, PlayerStatsResponse,
    RecomputeScoreRequest, RecomputeScoreResponse, RecordRosterRequest, RecordRosterResponse,
    RecordStatsRequest, RecordStatsResponse, RosterEntryInfo, RosterResponse,
    ScoreBreakdownResponse, StandingInfo, StandingsResponse, StatsInfo, TeamAuditResponse,
    TeamInfo, TeamResponse, TeamScoreHistoryResponse, TeamScoreInfo,
};

// ============================================================================
// Conversions
// ============================================================================

fn club_info(club: &Club) -> ClubInfo {
    ClubInfo {
        club_id: club.club_id.value(),
        name: club.name.clone(),
    }
}

fn player_info(player: &Player) -> PlayerInfo {
    PlayerInfo {
        player_id: player.player_id.value(),
        name: player.name.clone(),
        position: player.position.to_string(),
        club_id: player.club_id.map(ClubId::value),
    }
}

fn team_info(team: &Team) -> TeamInfo {
    TeamInfo {
        team_id: team.team_id.value(),
        owner_id: team.owner_id.clone(),
        name: team.name.clone(),
        members: team.members().iter().map(|id| id.value()).collect(),
        captain: team.captain().map(PlayerId::value),
    }
}

fn matchday_info(matchday: &MatchDayConfig) -> MatchDayInfo {
    MatchDayInfo {
        matchday_id: matchday.matchday_id.value(),
        label: matchday.label.clone(),
        multiplier: matchday.multiplier.to_string(),
    }
}

const fn stats_info(stats: &StatsRecord) -> StatsInfo {
    StatsInfo {
        player_id: stats.player_id.value(),
        matchday_id: stats.matchday_id.value(),
        goals: stats.goals,
        assists: stats.assists,
        blocks: stats.blocks,
        steals: stats.steals,
        pf_drawn: stats.pf_drawn,
        saves: stats.saves,
        wins: stats.wins,
        pf: stats.pf,
        balls_lost: stats.balls_lost,
        contra_fouls: stats.contra_fouls,
        brutality: stats.brutality,
    }
}

fn roster_response(
    team_id: TeamId,
    matchday_id: MatchDayId,
    entries: &[RosterHistoryEntry],
) -> Result<RosterResponse, ApiError> {
    let captain: Option<PlayerId> =
        resolve_captain(team_id, matchday_id, entries).map_err(translate_domain_error)?;
    Ok(RosterResponse {
        team_id: team_id.value(),
        matchday_id: matchday_id.value(),
        entries: entries
            .iter()
            .map(|entry| RosterEntryInfo {
                player_id: entry.player_id.value(),
                is_captain: entry.is_captain,
            })
            .collect(),
        captain: captain.map(PlayerId::value),
    })
}

fn audit_event_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
        team_id: event.team_id.map(TeamId::value),
        matchday_id: event.matchday_id.map(MatchDayId::value),
    }
}

fn stats_snapshot(stats: &StatsRecord) -> StateSnapshot {
    StateSnapshot::new(format!(
        "player={},matchday={},goals={},assists={},blocks={},steals={},pf_drawn={},saves={},wins={},pf={},balls_lost={},contra_fouls={},brutality={}",
        stats.player_id,
        stats.matchday_id,
        stats.goals,
        stats.assists,
        stats.blocks,
        stats.steals,
        stats.pf_drawn,
        stats.saves,
        stats.wins,
        stats.pf,
        stats.balls_lost,
        stats.contra_fouls,
        stats.brutality
    ))
}

fn league_event(
    actor: &AuthenticatedActor,
    cause: Cause,
    name: &str,
    details: String,
    before: StateSnapshot,
    after: StateSnapshot,
) -> AuditEvent {
    AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(String::from(name), Some(details)),
        before,
        after,
    )
}

// ============================================================================
// Lookups
// ============================================================================

fn require_club(persistence: &mut Persistence, club_id: ClubId) -> Result<Club, ApiError> {
    persistence
        .get_club(club_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::ClubNotFound(club_id)))
}

fn require_player(persistence: &mut Persistence, player_id: PlayerId) -> Result<Player, ApiError> {
    persistence
        .get_player(player_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::PlayerNotFound(player_id)))
}

fn require_team(persistence: &mut Persistence, team_id: TeamId) -> Result<Team, ApiError> {
    persistence
        .get_team(team_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::TeamNotFound(team_id)))
}

fn require_matchday(
    persistence: &mut Persistence,
    matchday_id: MatchDayId,
) -> Result<MatchDayConfig, ApiError> {
    persistence
        .get_matchday(matchday_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::MatchDayNotFound(matchday_id)))
}

// ============================================================================
// Clubs
// ============================================================================

/// Creates a club.
///
/// # Errors
///
/// Returns an error if the name is invalid or persistence fails.
pub fn create_club(
    persistence: &mut Persistence,
    request: &CreateClubRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateClubResponse, ApiError> {
    validate_name(&request.name).map_err(translate_domain_error)?;

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "CreateClub",
        format!("Created club '{}'", request.name),
        StateSnapshot::empty(),
        StateSnapshot::new(format!("club={}", request.name)),
    );
    let (club_id, event_id): (ClubId, i64) = persistence
        .create_club(&request.name, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(%club_id, event_id, name = %request.name, "Created club");

    Ok(CreateClubResponse {
        club: ClubInfo {
            club_id: club_id.value(),
            name: request.name.clone(),
        },
        event_id,
        message: format!("Created club {club_id}"),
    })
}

/// Lists every club.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_clubs(persistence: &mut Persistence) -> Result<ListClubsResponse, ApiError> {
    let clubs: Vec<Club> = persistence
        .list_clubs()
        .map_err(translate_persistence_error)?;
    Ok(ListClubsResponse {
        clubs: clubs.iter().map(club_info).collect(),
    })
}

/// Deletes a club. Its players remain, without a club.
///
/// # Errors
///
/// Returns an error if the club does not exist or persistence fails.
pub fn delete_club(
    persistence: &mut Persistence,
    club_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteResponse, ApiError> {
    let club_id: ClubId = parse_club_id(club_id)?;
    let club: Club = require_club(persistence, club_id)?;

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "DeleteClub",
        format!("Deleted club {club_id}"),
        StateSnapshot::new(format!("club={}", club.name)),
        StateSnapshot::empty(),
    );
    let deleted: bool = persistence
        .delete_club(club_id, &audit_event)
        .map_err(translate_persistence_error)?;
    if !deleted {
        return Err(translate_domain_error(DomainError::ClubNotFound(club_id)));
    }

    info!(%club_id, "Deleted club");

    Ok(DeleteResponse {
        id: club_id.value(),
        message: format!("Deleted club {club_id}"),
    })
}

// ============================================================================
// Players
// ============================================================================

/// Creates a player, optionally affiliated with a club.
///
/// # Errors
///
/// Returns an error if:
/// - The name or position is invalid
/// - The club does not exist
/// - Persistence fails
pub fn create_player(
    persistence: &mut Persistence,
    request: &CreatePlayerRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreatePlayerResponse, ApiError> {
    validate_name(&request.name).map_err(translate_domain_error)?;
    let position: Position = parse_position(&request.position)?;
    let club_id: Option<ClubId> = request.club_id.map(parse_club_id).transpose()?;
    if let Some(club_id) = club_id {
        require_club(persistence, club_id)?;
    }

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "CreatePlayer",
        format!("Created player '{}'", request.name),
        StateSnapshot::empty(),
        StateSnapshot::new(format!(
            "player={},position={position},club={}",
            request.name,
            club_id.map_or_else(|| String::from("none"), |id| id.to_string())
        )),
    );
    let (player_id, event_id): (PlayerId, i64) = persistence
        .create_player(&request.name, position, club_id, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(%player_id, event_id, name = %request.name, %position, "Created player");

    Ok(CreatePlayerResponse {
        player: PlayerInfo {
            player_id: player_id.value(),
            name: request.name.clone(),
            position: position.to_string(),
            club_id: club_id.map(ClubId::value),
        },
        event_id,
        message: format!("Created player {player_id}"),
    })
}

/// # Errors
///
/// Returns an error if the player does not exist or persistence fails.
pub fn get_player(persistence: &mut Persistence, player_id: i64) -> Result<PlayerInfo, ApiError> {
    let player_id: PlayerId = parse_player_id(player_id)?;
    require_player(persistence, player_id).map(|player| player_info(&player))
}

/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_players(persistence: &mut Persistence) -> Result<ListPlayersResponse, ApiError> {
    let players: Vec<Player> = persistence
        .list_players()
        .map_err(translate_persistence_error)?;
    Ok(ListPlayersResponse {
        players: players.iter().map(player_info).collect(),
    })
}

// ============================================================================
// Teams
// ============================================================================

/// Creates a team owned by the requesting actor.
///
/// # Errors
///
/// Returns an error if the name or owner is invalid or persistence fails.
pub fn create_team(
    persistence: &mut Persistence,
    request: &CreateTeamRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TeamResponse, ApiError> {
    validate_name(&request.name).map_err(translate_domain_error)?;
    validate_owner_id(&authenticated_actor.id).map_err(translate_domain_error)?;

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "CreateTeam",
        format!(
            "Created team '{}' for owner {}",
            request.name, authenticated_actor.id
        ),
        StateSnapshot::empty(),
        StateSnapshot::new(format!(
            "team={},owner={},members=[],captain=none",
            request.name, authenticated_actor.id
        )),
    );
    let (team_id, event_id): (TeamId, i64) = persistence
        .create_team(&authenticated_actor.id, &request.name, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(%team_id, event_id, owner_id = %authenticated_actor.id, "Created team");

    let team: Team = Team::new(
        team_id,
        authenticated_actor.id.clone(),
        request.name.clone(),
    );
    Ok(TeamResponse {
        team: team_info(&team),
        event_id,
        message: format!("Created team {team_id}"),
    })
}

/// # Errors
///
/// Returns an error if the team does not exist or persistence fails.
pub fn get_team(persistence: &mut Persistence, team_id: i64) -> Result<TeamInfo, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    require_team(persistence, team_id).map(|team| team_info(&team))
}

/// Applies a live roster command on behalf of the team owner.
fn apply_team_command(
    persistence: &mut Persistence,
    rules: &LeagueRules,
    team_id: TeamId,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TeamResponse, ApiError> {
    let team: Team = require_team(persistence, team_id)?;
    AuthorizationService::authorize_team_owner(authenticated_actor, &team, command.name())?;

    let result: TransitionResult = apply(
        rules,
        &team,
        command,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_team_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        %team_id,
        event_id,
        command = command.name(),
        members = result.new_team.members().len(),
        "Applied team command"
    );

    Ok(TeamResponse {
        team: team_info(&result.new_team),
        event_id,
        message: result
            .audit_event
            .action
            .details
            .clone()
            .unwrap_or_else(|| String::from(command.name())),
    })
}

/// Adds a player to a team's live roster.
///
/// # Errors
///
/// Returns an error if:
/// - The team or player does not exist
/// - The actor does not own the team
/// - The player is already a member or the roster is full
/// - Persistence fails
pub fn add_member(
    persistence: &mut Persistence,
    rules: &LeagueRules,
    team_id: i64,
    request: &PlayerSelectionRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TeamResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    let player_id: PlayerId = parse_player_id(request.player_id)?;
    require_player(persistence, player_id)?;
    apply_team_command(
        persistence,
        rules,
        team_id,
        Command::AddMember { player_id },
        authenticated_actor,
        cause,
    )
}

/// Removes a player from a team's live roster. Removing the captain leaves
/// the team without one.
///
/// # Errors
///
/// Returns an error if the team does not exist, the actor does not own it,
/// the player is not a member, or persistence fails.
pub fn remove_member(
    persistence: &mut Persistence,
    rules: &LeagueRules,
    team_id: i64,
    player_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TeamResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    let player_id: PlayerId = parse_player_id(player_id)?;
    apply_team_command(
        persistence,
        rules,
        team_id,
        Command::RemoveMember { player_id },
        authenticated_actor,
        cause,
    )
}

/// Makes a member the team's live captain.
///
/// Recorded rosters are not affected.
///
/// # Errors
///
/// Returns an error if the team does not exist, the actor does not own it,
/// the player is not a member, or persistence fails.
pub fn set_captain(
    persistence: &mut Persistence,
    rules: &LeagueRules,
    team_id: i64,
    request: &PlayerSelectionRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TeamResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    let player_id: PlayerId = parse_player_id(request.player_id)?;
    apply_team_command(
        persistence,
        rules,
        team_id,
        Command::SetCaptain { player_id },
        authenticated_actor,
        cause,
    )
}

// ============================================================================
// Matchdays
// ============================================================================

/// Creates a matchday. The multiplier defaults to 1.
///
/// # Errors
///
/// Returns an error if the label or multiplier is invalid or persistence fails.
pub fn create_matchday(
    persistence: &mut Persistence,
    request: &CreateMatchDayRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateMatchDayResponse, ApiError> {
    validate_name(&request.label).map_err(translate_domain_error)?;
    let multiplier: Multiplier = request
        .multiplier
        .as_deref()
        .map(parse_multiplier)
        .transpose()?
        .unwrap_or_default();

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "CreateMatchDay",
        format!("Created matchday '{}'", request.label),
        StateSnapshot::empty(),
        StateSnapshot::new(format!(
            "matchday={},multiplier={multiplier}",
            request.label
        )),
    );
    let (matchday_id, event_id): (MatchDayId, i64) = persistence
        .create_matchday(&request.label, multiplier, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(%matchday_id, event_id, %multiplier, "Created matchday");

    let matchday: MatchDayConfig =
        MatchDayConfig::new(matchday_id, request.label.clone(), multiplier);
    Ok(CreateMatchDayResponse {
        matchday: matchday_info(&matchday),
        event_id,
        message: format!("Created matchday {matchday_id}"),
    })
}

/// # Errors
///
/// Returns an error if the matchday does not exist or persistence fails.
pub fn get_matchday(
    persistence: &mut Persistence,
    matchday_id: i64,
) -> Result<MatchDayInfo, ApiError> {
    let matchday_id: MatchDayId = parse_matchday_id(matchday_id)?;
    require_matchday(persistence, matchday_id).map(|matchday| matchday_info(&matchday))
}

/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_matchdays(persistence: &mut Persistence) -> Result<ListMatchDaysResponse, ApiError> {
    let matchdays: Vec<MatchDayConfig> = persistence
        .list_matchdays()
        .map_err(translate_persistence_error)?;
    Ok(ListMatchDaysResponse {
        matchdays: matchdays.iter().map(matchday_info).collect(),
    })
}

/// Deletes a matchday with its stats, recorded rosters and scores.
///
/// # Errors
///
/// Returns an error if the matchday does not exist or persistence fails.
pub fn delete_matchday(
    persistence: &mut Persistence,
    matchday_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteResponse, ApiError> {
    let matchday_id: MatchDayId = parse_matchday_id(matchday_id)?;
    let matchday: MatchDayConfig = require_matchday(persistence, matchday_id)?;

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "DeleteMatchDay",
        format!("Deleted matchday {matchday_id}"),
        StateSnapshot::new(format!(
            "matchday={},multiplier={}",
            matchday.label, matchday.multiplier
        )),
        StateSnapshot::empty(),
    )
    .for_matchday(matchday_id);
    let deleted: bool = persistence
        .delete_matchday(matchday_id, &audit_event)
        .map_err(translate_persistence_error)?;
    if !deleted {
        return Err(translate_domain_error(DomainError::MatchDayNotFound(
            matchday_id,
        )));
    }

    info!(%matchday_id, "Deleted matchday");

    Ok(DeleteResponse {
        id: matchday_id.value(),
        message: format!("Deleted matchday {matchday_id}"),
    })
}

// ============================================================================
// Stats
// ============================================================================

/// Records one player's stats for a matchday, replacing any earlier record.
///
/// Stored scores are not recomputed.
///
/// # Errors
///
/// Returns an error if:
/// - A count is negative or too large
/// - The player or matchday does not exist
/// - Persistence fails
pub fn record_stats(
    persistence: &mut Persistence,
    request: &RecordStatsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RecordStatsResponse, ApiError> {
    let player_id: PlayerId = parse_player_id(request.player_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(request.matchday_id)?;
    let stats: StatsRecord = StatsRecord {
        player_id,
        matchday_id,
        goals: parse_stat_count("goals", request.goals)?,
        assists: parse_stat_count("assists", request.assists)?,
        blocks: parse_stat_count("blocks", request.blocks)?,
        steals: parse_stat_count("steals", request.steals)?,
        pf_drawn: parse_stat_count("pf_drawn", request.pf_drawn)?,
        saves: parse_stat_count("saves", request.saves)?,
        wins: parse_stat_count("wins", request.wins)?,
        pf: parse_stat_count("pf", request.pf)?,
        balls_lost: parse_stat_count("balls_lost", request.balls_lost)?,
        contra_fouls: parse_stat_count("contra_fouls", request.contra_fouls)?,
        brutality: parse_stat_count("brutality", request.brutality)?,
    };
    require_player(persistence, player_id)?;
    require_matchday(persistence, matchday_id)?;

    let previous: Option<StatsRecord> = persistence
        .get_stats(player_id, matchday_id)
        .map_err(translate_persistence_error)?;

    let audit_event: AuditEvent = league_event(
        authenticated_actor,
        cause,
        "RecordStats",
        format!("Recorded stats for player {player_id} on matchday {matchday_id}"),
        previous
            .as_ref()
            .map_or_else(StateSnapshot::empty, stats_snapshot),
        stats_snapshot(&stats),
    )
    .for_matchday(matchday_id);
    let event_id: i64 = persistence
        .put_stats(&stats, &audit_event)
        .map_err(translate_persistence_error)?;

    let replaced: bool = previous.is_some();
    info!(%player_id, %matchday_id, event_id, replaced, "Recorded stats");

    Ok(RecordStatsResponse {
        stats: stats_info(&stats),
        replaced,
        event_id,
        message: format!("Recorded stats for player {player_id} on matchday {matchday_id}"),
    })
}

/// Returns a player's stats history in matchday order.
///
/// # Errors
///
/// Returns an error if the player does not exist or persistence fails.
pub fn get_player_stats(
    persistence: &mut Persistence,
    player_id: i64,
) -> Result<PlayerStatsResponse, ApiError> {
    let player_id: PlayerId = parse_player_id(player_id)?;
    require_player(persistence, player_id)?;
    let stats: Vec<StatsRecord> = persistence
        .list_player_stats(player_id)
        .map_err(translate_persistence_error)?;
    Ok(PlayerStatsResponse {
        player_id: player_id.value(),
        stats: stats.iter().map(stats_info).collect(),
    })
}

// ============================================================================
// Roster History
// ============================================================================

fn persist_roster(
    persistence: &mut Persistence,
    commit: &RosterCommit,
    team_id: TeamId,
    matchday_id: MatchDayId,
) -> Result<RecordRosterResponse, ApiError> {
    let event_id: i64 = persistence
        .persist_roster_commit(commit)
        .map_err(translate_persistence_error)?;
    let entries: Vec<RosterHistoryEntry> = persistence
        .get_roster(team_id, matchday_id)
        .map_err(translate_persistence_error)?;

    info!(
        %team_id,
        %matchday_id,
        event_id,
        added = commit.entries.len(),
        "Recorded roster"
    );

    Ok(RecordRosterResponse {
        roster: roster_response(team_id, matchday_id, &entries)?,
        event_id,
        message: commit
            .audit_event
            .action
            .details
            .clone()
            .unwrap_or_default(),
    })
}

/// Records a roster snapshot for a team and matchday.
///
/// A recorded roster is final. Either every slot is recorded or none is.
///
/// # Errors
///
/// Returns an error if:
/// - The team, matchday or a player does not exist
/// - The actor does not own the team
/// - A roster is already recorded for the key (`roster_already_recorded`)
/// - The snapshot holds two captains (`single_captain`)
/// - A player is repeated (`unique_roster_entry`)
/// - Persistence fails
pub fn record_roster(
    persistence: &mut Persistence,
    request: &RecordRosterRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RecordRosterResponse, ApiError> {
    let team_id: TeamId = parse_team_id(request.team_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(request.matchday_id)?;
    let snapshot: Vec<RosterSlot> = request
        .slots
        .iter()
        .map(|slot| parse_player_id(slot.player_id).map(|id| RosterSlot::new(id, slot.is_captain)))
        .collect::<Result<Vec<RosterSlot>, _>>()?;

    let team: Team = require_team(persistence, team_id)?;
    AuthorizationService::authorize_team_owner(authenticated_actor, &team, "RecordRoster")?;
    require_matchday(persistence, matchday_id)?;
    for slot in &snapshot {
        require_player(persistence, slot.player_id)?;
    }

    let existing: Vec<RosterHistoryEntry> = persistence
        .get_roster(team_id, matchday_id)
        .map_err(translate_persistence_error)?;
    let commit: RosterCommit = record_roster_commit(
        team_id,
        matchday_id,
        &snapshot,
        &existing,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persist_roster(persistence, &commit, team_id, matchday_id)
}

/// Records the team's live roster and live captain for a matchday.
///
/// # Errors
///
/// Same as [`record_roster`].
pub fn lock_team_roster(
    persistence: &mut Persistence,
    request: &LockRosterRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RecordRosterResponse, ApiError> {
    let team_id: TeamId = parse_team_id(request.team_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(request.matchday_id)?;

    let team: Team = require_team(persistence, team_id)?;
    AuthorizationService::authorize_team_owner(authenticated_actor, &team, "LockRoster")?;
    require_matchday(persistence, matchday_id)?;

    let existing: Vec<RosterHistoryEntry> = persistence
        .get_roster(team_id, matchday_id)
        .map_err(translate_persistence_error)?;
    let commit: RosterCommit = lock_roster(
        &team,
        matchday_id,
        &existing,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persist_roster(persistence, &commit, team_id, matchday_id)
}

/// Returns the roster recorded for a team and matchday.
///
/// The captain comes from the recorded entries, never from the live team.
///
/// # Errors
///
/// Returns an error if the team or matchday does not exist, the recorded
/// roster is inconsistent, or persistence fails.
pub fn get_roster(
    persistence: &mut Persistence,
    team_id: i64,
    matchday_id: i64,
) -> Result<RosterResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(matchday_id)?;
    require_team(persistence, team_id)?;
    require_matchday(persistence, matchday_id)?;

    let entries: Vec<RosterHistoryEntry> = persistence
        .get_roster(team_id, matchday_id)
        .map_err(translate_persistence_error)?;
    roster_response(team_id, matchday_id, &entries)
}

// ============================================================================
// Scores
// ============================================================================

/// Computes a team's score for a matchday from its recorded roster and the
/// current stats, and stores it in score history.
///
/// The write succeeds only if the stored score version still equals
/// `expected_version` (or the version read here when none is given).
///
/// # Errors
///
/// Returns an error if:
/// - The team or matchday does not exist
/// - The recorded roster holds more than one captain (integrity violation)
/// - Another recomputation stored a newer version first (`Conflict`)
/// - Persistence fails or times out
pub fn recompute_team_score(
    persistence: &mut Persistence,
    request: &RecomputeScoreRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RecomputeScoreResponse, ApiError> {
    let team_id: TeamId = parse_team_id(request.team_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(request.matchday_id)?;
    require_team(persistence, team_id)?;
    let matchday: MatchDayConfig = require_matchday(persistence, matchday_id)?;

    let stored: Option<TeamScoreEntry> = persistence
        .get_team_score(team_id, matchday_id)
        .map_err(translate_persistence_error)?;
    let expected_version: Option<i64> = request
        .expected_version
        .or_else(|| stored.as_ref().map(|entry| entry.version));

    let roster: Vec<RosterHistoryEntry> = persistence
        .get_roster(team_id, matchday_id)
        .map_err(translate_persistence_error)?;
    let player_ids: Vec<PlayerId> = roster.iter().map(|entry| entry.player_id).collect();
    let stats: HashMap<PlayerId, StatsRecord> = persistence
        .get_matchday_stats(matchday_id, &player_ids)
        .map_err(translate_persistence_error)?;

    debug!(
        %team_id,
        %matchday_id,
        roster = roster.len(),
        with_stats = stats.len(),
        "Computing team score"
    );

    let transition: ScoreTransition = score_team(
        team_id,
        &matchday,
        &roster,
        &stats,
        stored.as_ref().map(|entry| entry.score),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let (entry, event_id): (TeamScoreEntry, i64) = persistence
        .persist_team_score(&transition, expected_version)
        .map_err(|err| {
            if let PersistenceError::StorageConflict { .. } = &err {
                warn!(%team_id, %matchday_id, error = %err, "Score recomputation lost a race");
            }
            translate_persistence_error(err)
        })?;

    info!(
        %team_id,
        %matchday_id,
        score = entry.score,
        version = entry.version,
        event_id,
        "Stored team score"
    );

    Ok(RecomputeScoreResponse {
        team_id: team_id.value(),
        matchday_id: matchday_id.value(),
        team_score: entry.score,
        version: entry.version,
        player_scores: transition
            .result
            .player_scores
            .iter()
            .map(|player_score| PlayerScoreInfo {
                player_id: player_score.player_id.value(),
                base_score: player_score.base_score,
                score: player_score.score,
                is_captain: player_score.is_captain,
            })
            .collect(),
        event_id,
        message: format!(
            "Team {team_id} scored {} on matchday {matchday_id}",
            entry.score
        ),
    })
}

/// Returns a team's score history in matchday order.
///
/// # Errors
///
/// Returns an error if the team does not exist or persistence fails.
pub fn get_team_scores(
    persistence: &mut Persistence,
    team_id: i64,
) -> Result<TeamScoreHistoryResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    require_team(persistence, team_id)?;
    let scores: Vec<TeamScoreEntry> = persistence
        .list_team_scores(team_id)
        .map_err(translate_persistence_error)?;
    let total_score: i64 = scores
        .iter()
        .fold(0_i64, |total, entry| total.saturating_add(entry.score));
    Ok(TeamScoreHistoryResponse {
        team_id: team_id.value(),
        scores: scores
            .into_iter()
            .map(|entry| TeamScoreInfo {
                matchday_id: entry.matchday_id.value(),
                score: entry.score,
                version: entry.version,
                computed_at: entry.computed_at,
            })
            .collect(),
        total_score,
    })
}

/// Returns a player's score history in matchday order.
///
/// # Errors
///
/// Returns an error if the player does not exist or persistence fails.
pub fn get_player_scores(
    persistence: &mut Persistence,
    player_id: i64,
) -> Result<PlayerScoreHistoryResponse, ApiError> {
    let player_id: PlayerId = parse_player_id(player_id)?;
    require_player(persistence, player_id)?;
    let scores: Vec<PlayerScoreEntry> = persistence
        .list_player_scores(player_id)
        .map_err(translate_persistence_error)?;
    Ok(PlayerScoreHistoryResponse {
        player_id: player_id.value(),
        scores: scores
            .into_iter()
            .map(|entry| PlayerScoreHistoryInfo {
                matchday_id: entry.matchday_id.value(),
                team_id: entry.team_id.value(),
                base_score: entry.base_score,
                score: entry.score,
                version: entry.version,
                computed_at: entry.computed_at,
            })
            .collect(),
    })
}

/// Explains a player's score for a matchday stat by stat.
///
/// A player without recorded stats scores 0.
///
/// # Errors
///
/// Returns an error if the player or matchday does not exist or persistence fails.
pub fn get_score_breakdown(
    persistence: &mut Persistence,
    player_id: i64,
    matchday_id: i64,
) -> Result<ScoreBreakdownResponse, ApiError> {
    let player_id: PlayerId = parse_player_id(player_id)?;
    let matchday_id: MatchDayId = parse_matchday_id(matchday_id)?;
    require_player(persistence, player_id)?;
    let matchday: MatchDayConfig = require_matchday(persistence, matchday_id)?;

    let recorded: Option<StatsRecord> = persistence
        .get_stats(player_id, matchday_id)
        .map_err(translate_persistence_error)?;
    let has_stats: bool = recorded.is_some();
    let stats: StatsRecord =
        recorded.unwrap_or_else(|| StatsRecord::empty(player_id, matchday_id));
    let breakdown: ScoreBreakdown = ScoreBreakdown::from_stats(&stats);

    Ok(ScoreBreakdownResponse {
        player_id: player_id.value(),
        matchday_id: matchday_id.value(),
        multiplier: matchday.multiplier.to_string(),
        raw_half_points: breakdown.total_half_points(),
        breakdown,
        score: compute_score(&stats, &matchday),
        has_stats,
    })
}

/// Returns the league table, best total first.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn get_standings(persistence: &mut Persistence) -> Result<StandingsResponse, ApiError> {
    let rows: Vec<StandingRow> = persistence
        .get_standings()
        .map_err(translate_persistence_error)?;
    Ok(StandingsResponse {
        standings: rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| StandingInfo {
                rank: index + 1,
                team_id: row.team_id.value(),
                name: row.name,
                owner_id: row.owner_id,
                total_score: row.total_score,
                matchdays_scored: row.matchdays_scored,
            })
            .collect(),
    })
}

// ============================================================================
// Audit
// ============================================================================

/// Returns every audit event recorded for a team, oldest first.
///
/// # Errors
///
/// Returns an error if the team does not exist or persistence fails.
pub fn get_team_audit_log(
    persistence: &mut Persistence,
    team_id: i64,
) -> Result<TeamAuditResponse, ApiError> {
    let team_id: TeamId = parse_team_id(team_id)?;
    require_team(persistence, team_id)?;
    let events: Vec<AuditEvent> = persistence
        .list_team_audit_events(team_id)
        .map_err(translate_persistence_error)?;
    Ok(TeamAuditResponse {
        team_id: team_id.value(),
        events: events.iter().map(audit_event_info).collect(),
    })
}
