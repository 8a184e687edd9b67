// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::RosterCommit;
use fantasy_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{
    MatchDayId, RosterHistoryEntry, RosterSlot, Team, TeamId, validate_roster_snapshot,
};

fn roster_state(entries: &[RosterHistoryEntry]) -> StateSnapshot {
    let captain: String = entries
        .iter()
        .find(|entry| entry.is_captain)
        .map_or_else(|| String::from("none"), |entry| entry.player_id.to_string());
    StateSnapshot::new(format!("entries={},captain={captain}", entries.len()))
}

/// Validates a roster snapshot and turns it into history entries.
///
/// Nothing is written here. The caller appends `entries` and the audit event
/// in one transaction, and a failed commit leaves no partial roster.
///
/// # Arguments
///
/// * `team_id` - The team the roster belongs to
/// * `matchday_id` - The matchday the roster is recorded for
/// * `snapshot` - The roster slots to record
/// * `existing` - Entries already recorded for `(team_id, matchday_id)`
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// - `RosterAlreadyRecorded` if `existing` is not empty
/// - `DuplicateCaptain` if the snapshot holds more than one captain
/// - `DuplicateEntry` if a player is repeated
pub fn record_roster(
    team_id: TeamId,
    matchday_id: MatchDayId,
    snapshot: &[RosterSlot],
    existing: &[RosterHistoryEntry],
    actor: Actor,
    cause: Cause,
) -> Result<RosterCommit, CoreError> {
    validate_roster_snapshot(team_id, matchday_id, snapshot, existing)?;

    let entries: Vec<RosterHistoryEntry> = snapshot
        .iter()
        .map(|slot| RosterHistoryEntry::from_slot(team_id, matchday_id, *slot))
        .collect();

    let action: Action = Action::new(
        String::from("RecordRoster"),
        Some(format!(
            "Recorded {} roster entries for team {team_id} on matchday {matchday_id}",
            entries.len()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        roster_state(existing),
        roster_state(&entries),
    )
    .for_team(team_id)
    .for_matchday(matchday_id);

    Ok(RosterCommit {
        team_id,
        matchday_id,
        entries,
        audit_event,
    })
}

/// Records the team's live roster, including its live captain, for a matchday.
///
/// # Errors
///
/// Same as [`record_roster`].
pub fn lock_roster(
    team: &Team,
    matchday_id: MatchDayId,
    existing: &[RosterHistoryEntry],
    actor: Actor,
    cause: Cause,
) -> Result<RosterCommit, CoreError> {
    let snapshot: Vec<RosterSlot> = team.roster_snapshot();
    let mut commit: RosterCommit = record_roster(
        team.team_id,
        matchday_id,
        &snapshot,
        existing,
        actor,
        cause,
    )?;
    commit.audit_event.action.name = String::from("LockRoster");
    Ok(commit)
}
