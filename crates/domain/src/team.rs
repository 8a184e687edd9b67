// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live team rosters and captaincy.
//!
//! A `Team` is an immutable value. Every roster change produces a new team
//! snapshot, so the captain reference can never be observed half-updated.
//! The live captain is the owner's current intent only; scoring always reads
//! captaincy from roster history.

use crate::error::DomainError;
use crate::types::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// One player slot of a roster snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterSlot {
    /// The player in this slot.
    pub player_id: PlayerId,
    /// Whether this player is the roster's captain.
    pub is_captain: bool,
}

impl RosterSlot {
    /// Creates a roster slot.
    #[must_use]
    pub const fn new(player_id: PlayerId, is_captain: bool) -> Self {
        Self {
            player_id,
            is_captain,
        }
    }
}

/// A fantasy team with its live roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    /// The canonical team identifier.
    pub team_id: TeamId,
    /// The owner of the team.
    pub owner_id: String,
    /// The team name.
    pub name: String,
    /// Current members in draft order.
    members: Vec<PlayerId>,
    /// The current captain, always a member when present.
    captain: Option<PlayerId>,
}

impl Team {
    /// Creates a team with an empty roster.
    #[must_use]
    pub const fn new(team_id: TeamId, owner_id: String, name: String) -> Self {
        Self {
            team_id,
            owner_id,
            name,
            members: Vec::new(),
            captain: None,
        }
    }

    /// Reconstructs a team from stored parts.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is listed twice or the captain is not a member.
    pub fn from_parts(
        team_id: TeamId,
        owner_id: String,
        name: String,
        members: Vec<PlayerId>,
        captain: Option<PlayerId>,
    ) -> Result<Self, DomainError> {
        for (index, player_id) in members.iter().enumerate() {
            if members[..index].contains(player_id) {
                return Err(DomainError::DuplicateMember {
                    team_id,
                    player_id: *player_id,
                });
            }
        }
        if let Some(captain_id) = captain {
            if !members.contains(&captain_id) {
                return Err(DomainError::PlayerNotOnTeam {
                    team_id,
                    player_id: captain_id,
                });
            }
        }
        Ok(Self {
            team_id,
            owner_id,
            name,
            members,
            captain,
        })
    }

    /// Returns the current members in draft order.
    #[must_use]
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    /// Returns the current captain.
    #[must_use]
    pub const fn captain(&self) -> Option<PlayerId> {
        self.captain
    }

    /// Returns true if the player is a current member.
    #[must_use]
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.members.contains(&player_id)
    }

    /// Returns true if the player is the current captain.
    #[must_use]
    pub fn is_captain(&self, player_id: PlayerId) -> bool {
        self.captain == Some(player_id)
    }

    /// Returns the live roster as slots, with the captain flag on at most one slot.
    #[must_use]
    pub fn roster_snapshot(&self) -> Vec<RosterSlot> {
        self.members
            .iter()
            .map(|player_id| RosterSlot::new(*player_id, self.is_captain(*player_id)))
            .collect()
    }
}

/// Makes a member the team's captain.
///
/// Every other member loses the captaincy. The input team is left untouched.
///
/// # Errors
///
/// Returns `PlayerNotOnTeam` if the player is not a current member.
pub fn set_captain(team: &Team, player_id: PlayerId) -> Result<Team, DomainError> {
    if !team.has_member(player_id) {
        return Err(DomainError::PlayerNotOnTeam {
            team_id: team.team_id,
            player_id,
        });
    }
    Ok(Team {
        captain: Some(player_id),
        ..team.clone()
    })
}

/// Adds a player to the team's live roster.
///
/// # Errors
///
/// Returns an error if the player is already a member or the roster is full.
pub fn add_member(
    team: &Team,
    player_id: PlayerId,
    max_roster_size: usize,
) -> Result<Team, DomainError> {
    if team.has_member(player_id) {
        return Err(DomainError::DuplicateMember {
            team_id: team.team_id,
            player_id,
        });
    }
    if team.members.len() >= max_roster_size {
        return Err(DomainError::RosterFull {
            team_id: team.team_id,
            max_size: max_roster_size,
        });
    }
    let mut members: Vec<PlayerId> = team.members.clone();
    members.push(player_id);
    Ok(Team {
        members,
        ..team.clone()
    })
}

/// Removes a player from the team's live roster.
///
/// Removing the captain leaves the team without a captain.
///
/// # Errors
///
/// Returns `PlayerNotOnTeam` if the player is not a current member.
pub fn remove_member(team: &Team, player_id: PlayerId) -> Result<Team, DomainError> {
    if !team.has_member(player_id) {
        return Err(DomainError::PlayerNotOnTeam {
            team_id: team.team_id,
            player_id,
        });
    }
    let members: Vec<PlayerId> = team
        .members
        .iter()
        .copied()
        .filter(|member| *member != player_id)
        .collect();
    let captain: Option<PlayerId> = team.captain.filter(|captain| *captain != player_id);
    Ok(Team {
        members,
        captain,
        ..team.clone()
    })
}
