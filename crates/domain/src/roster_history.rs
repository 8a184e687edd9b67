// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::team::RosterSlot;
use crate::types::{MatchDayId, PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// A committed roster slot for one team on one matchday.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterHistoryEntry {
    pub team_id: TeamId,
    pub matchday_id: MatchDayId,
    pub player_id: PlayerId,
    pub is_captain: bool,
}

impl RosterHistoryEntry {
    /// Creates an entry from a roster slot.
    #[must_use]
    pub const fn from_slot(team_id: TeamId, matchday_id: MatchDayId, slot: RosterSlot) -> Self {
        Self {
            team_id,
            matchday_id,
            player_id: slot.player_id,
            is_captain: slot.is_captain,
        }
    }
}

/// Validates a roster snapshot for `(team, matchday)`.
///
/// `existing` holds entries already recorded; a recorded roster is never
/// extended or replaced.
///
/// # Errors
///
/// - `RosterAlreadyRecorded` if `existing` holds any entry for the same key
/// - `DuplicateEntry` if a player appears twice in the snapshot
/// - `DuplicateCaptain` if the snapshot holds more than one captain
pub fn validate_roster_snapshot(
    team_id: TeamId,
    matchday_id: MatchDayId,
    snapshot: &[RosterSlot],
    existing: &[RosterHistoryEntry],
) -> Result<(), DomainError> {
    if existing
        .iter()
        .any(|entry| entry.team_id == team_id && entry.matchday_id == matchday_id)
    {
        return Err(DomainError::RosterAlreadyRecorded {
            team_id,
            matchday_id,
        });
    }

    for (index, slot) in snapshot.iter().enumerate() {
        if snapshot[..index]
            .iter()
            .any(|earlier| earlier.player_id == slot.player_id)
        {
            return Err(DomainError::DuplicateEntry {
                team_id,
                matchday_id,
                player_id: slot.player_id,
            });
        }
    }

    if snapshot.iter().filter(|slot| slot.is_captain).count() > 1 {
        return Err(DomainError::DuplicateCaptain {
            team_id,
            matchday_id,
        });
    }

    Ok(())
}

/// Resolves the captain of a recorded roster.
///
/// # Errors
///
/// Returns `InvalidRosterState` if more than one entry is marked captain.
pub fn resolve_captain(
    team_id: TeamId,
    matchday_id: MatchDayId,
    entries: &[RosterHistoryEntry],
) -> Result<Option<PlayerId>, DomainError> {
    let captains: Vec<PlayerId> = entries
        .iter()
        .filter(|entry| entry.is_captain)
        .map(|entry| entry.player_id)
        .collect();
    match captains.as_slice() {
        [] => Ok(None),
        [captain] => Ok(Some(*captain)),
        _ => Err(DomainError::InvalidRosterState {
            team_id,
            matchday_id,
            captain_count: captains.len(),
        }),
    }
}
