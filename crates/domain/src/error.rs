// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ClubId, MatchDayId, PlayerId, TeamId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The player is not a current member of the team.
    PlayerNotOnTeam {
        /// The team that was checked.
        team_id: TeamId,
        /// The player that was not found on the team.
        player_id: PlayerId,
    },
    /// More than one captain was found for a recorded roster.
    ///
    /// This is an integrity violation: roster commits reject multiple
    /// captains, so seeing one means stored data has been corrupted.
    InvalidRosterState {
        /// The team whose roster is inconsistent.
        team_id: TeamId,
        /// The matchday whose roster is inconsistent.
        matchday_id: MatchDayId,
        /// The number of captains found.
        captain_count: usize,
    },
    /// A roster snapshot would give a matchday more than one captain.
    DuplicateCaptain {
        /// The team the roster belongs to.
        team_id: TeamId,
        /// The matchday the roster belongs to.
        matchday_id: MatchDayId,
    },
    /// A roster entry for this `(team, matchday, player)` already exists.
    DuplicateEntry {
        /// The team the roster belongs to.
        team_id: TeamId,
        /// The matchday the roster belongs to.
        matchday_id: MatchDayId,
        /// The duplicated player.
        player_id: PlayerId,
    },
    /// A roster is already recorded for this `(team, matchday)`.
    RosterAlreadyRecorded {
        /// The team the roster belongs to.
        team_id: TeamId,
        /// The matchday the roster belongs to.
        matchday_id: MatchDayId,
    },
    /// The player is already a member of the team.
    DuplicateMember {
        /// The team.
        team_id: TeamId,
        /// The player.
        player_id: PlayerId,
    },
    /// The team already holds the maximum number of players.
    RosterFull {
        /// The team.
        team_id: TeamId,
        /// The configured roster limit.
        max_size: usize,
    },
    /// A score multiplier is malformed.
    InvalidMultiplier(String),
    /// A name is empty or invalid.
    InvalidName(String),
    /// A position string is not recognised.
    InvalidPosition(String),
    /// A team owner identifier is empty or invalid.
    InvalidOwner(String),
    /// Team does not exist.
    TeamNotFound(TeamId),
    /// Player does not exist.
    PlayerNotFound(PlayerId),
    /// Matchday does not exist.
    MatchDayNotFound(MatchDayId),
    /// Club does not exist.
    ClubNotFound(ClubId),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerNotOnTeam { team_id, player_id } => {
                write!(f, "Player {player_id} is not a member of team {team_id}")
            }
            Self::InvalidRosterState {
                team_id,
                matchday_id,
                captain_count,
            } => {
                write!(
                    f,
                    "Invalid roster state for team {team_id} on matchday {matchday_id}: {captain_count} captains recorded"
                )
            }
            Self::DuplicateCaptain {
                team_id,
                matchday_id,
            } => {
                write!(
                    f,
                    "Team {team_id} already has a captain on matchday {matchday_id}"
                )
            }
            Self::DuplicateEntry {
                team_id,
                matchday_id,
                player_id,
            } => {
                write!(
                    f,
                    "Player {player_id} is already on the roster of team {team_id} for matchday {matchday_id}"
                )
            }
            Self::RosterAlreadyRecorded {
                team_id,
                matchday_id,
            } => {
                write!(
                    f,
                    "Team {team_id} already has a roster recorded for matchday {matchday_id}"
                )
            }
            Self::DuplicateMember { team_id, player_id } => {
                write!(f, "Player {player_id} is already a member of team {team_id}")
            }
            Self::RosterFull { team_id, max_size } => {
                write!(
                    f,
                    "Team {team_id} already has the maximum of {max_size} players"
                )
            }
            Self::InvalidMultiplier(msg) => write!(f, "Invalid multiplier: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPosition(value) => {
                write!(
                    f,
                    "Invalid position: '{value}'. Must be 'Field' or 'Goalkeeper'"
                )
            }
            Self::InvalidOwner(msg) => write!(f, "Invalid owner: {msg}"),
            Self::TeamNotFound(id) => write!(f, "Team {id} not found"),
            Self::PlayerNotFound(id) => write!(f, "Player {id} not found"),
            Self::MatchDayNotFound(id) => write!(f, "Matchday {id} not found"),
            Self::ClubNotFound(id) => write!(f, "Club {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
