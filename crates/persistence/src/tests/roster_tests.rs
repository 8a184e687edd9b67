// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fantasy::{RosterCommit, record_roster};
use fantasy_audit::AuditEvent;
use fantasy_domain::{DomainError, PlayerId, RosterHistoryEntry, RosterSlot};

use super::{
    TestLeague, create_test_actor, create_test_cause, create_test_event, create_test_league,
};
use crate::PersistenceError;

#[test]
fn test_roster_commit_round_trip() {
    let TestLeague {
        mut persistence,
        team_id,
        matchday_id,
        players,
    }: TestLeague = create_test_league();

    let snapshot: Vec<RosterSlot> = vec![
        RosterSlot::new(players[2], false),
        RosterSlot::new(players[0], true),
    ];
    let commit: RosterCommit = record_roster(
        team_id,
        matchday_id,
        &snapshot,
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_roster_commit(&commit).unwrap();

    let stored: Vec<RosterHistoryEntry> = persistence.get_roster(team_id, matchday_id).unwrap();
    assert_eq!(stored, commit.entries);
    assert_eq!(stored[0].player_id, players[2]);
    assert!(stored[1].is_captain);
}

fn commit_for(league: &TestLeague, snapshot: &[RosterSlot]) -> RosterCommit {
    record_roster(
        league.team_id,
        league.matchday_id,
        snapshot,
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_only_one_of_two_racing_commits_is_stored() {
    let mut league: TestLeague = create_test_league();
    let players: Vec<PlayerId> = league.players.clone();

    // Both built against an empty history, as two racing writers would.
    let first: RosterCommit = commit_for(
        &league,
        &[
            RosterSlot::new(players[0], true),
            RosterSlot::new(players[1], false),
        ],
    );
    let racing: RosterCommit = commit_for(&league, &[RosterSlot::new(players[2], false)]);

    league.persistence.persist_roster_commit(&first).unwrap();
    let events_before: usize = league
        .persistence
        .list_team_audit_events(league.team_id)
        .unwrap()
        .len();
    let result: Result<i64, PersistenceError> = league.persistence.persist_roster_commit(&racing);

    assert_eq!(
        result,
        Err(PersistenceError::ConstraintViolation(
            DomainError::RosterAlreadyRecorded {
                team_id: league.team_id,
                matchday_id: league.matchday_id,
            }
        ))
    );
    let stored: Vec<RosterHistoryEntry> = league
        .persistence
        .get_roster(league.team_id, league.matchday_id)
        .unwrap();
    assert_eq!(stored, first.entries);
    let events_after: Vec<AuditEvent> = league
        .persistence
        .list_team_audit_events(league.team_id)
        .unwrap();
    assert_eq!(events_after.len(), events_before);
}

#[test]
fn test_second_captain_is_rejected_by_storage() {
    let mut league: TestLeague = create_test_league();
    let players: Vec<PlayerId> = league.players.clone();

    let mut commit: RosterCommit = commit_for(&league, &[RosterSlot::new(players[0], true)]);
    commit.entries.push(RosterHistoryEntry::from_slot(
        league.team_id,
        league.matchday_id,
        RosterSlot::new(players[1], true),
    ));
    let result: Result<i64, PersistenceError> = league.persistence.persist_roster_commit(&commit);

    assert_eq!(
        result,
        Err(PersistenceError::ConstraintViolation(
            DomainError::DuplicateCaptain {
                team_id: league.team_id,
                matchday_id: league.matchday_id,
            }
        ))
    );
}

#[test]
fn test_duplicate_entry_is_rejected_by_storage() {
    let mut league: TestLeague = create_test_league();
    let players: Vec<PlayerId> = league.players.clone();

    let mut commit: RosterCommit = commit_for(&league, &[RosterSlot::new(players[0], false)]);
    let repeated: RosterHistoryEntry = commit.entries[0];
    commit.entries.push(repeated);
    let result: Result<i64, PersistenceError> = league.persistence.persist_roster_commit(&commit);

    assert_eq!(
        result,
        Err(PersistenceError::ConstraintViolation(
            DomainError::DuplicateEntry {
                team_id: league.team_id,
                matchday_id: league.matchday_id,
                player_id: players[0],
            }
        ))
    );
}

#[test]
fn test_failed_commit_leaves_no_partial_roster() {
    let mut league: TestLeague = create_test_league();
    let players: Vec<PlayerId> = league.players.clone();

    // players[0] and players[1] insert; the repeated players[0] fails last.
    let mut commit: RosterCommit = commit_for(
        &league,
        &[
            RosterSlot::new(players[0], false),
            RosterSlot::new(players[1], false),
        ],
    );
    let repeated: RosterHistoryEntry = commit.entries[0];
    commit.entries.push(repeated);
    let events_before: usize = league
        .persistence
        .list_team_audit_events(league.team_id)
        .unwrap()
        .len();
    assert!(league.persistence.persist_roster_commit(&commit).is_err());

    assert!(
        league
            .persistence
            .get_roster(league.team_id, league.matchday_id)
            .unwrap()
            .is_empty()
    );
    let events_after: Vec<AuditEvent> = league
        .persistence
        .list_team_audit_events(league.team_id)
        .unwrap();
    assert_eq!(events_after.len(), events_before);
}

#[test]
fn test_deleting_matchday_removes_roster_history() {
    let TestLeague {
        mut persistence,
        team_id,
        matchday_id,
        players,
    }: TestLeague = create_test_league();
    persistence
        .persist_roster_commit(
            &record_roster(
                team_id,
                matchday_id,
                &[RosterSlot::new(players[0], true)],
                &[],
                create_test_actor(),
                create_test_cause(),
            )
            .unwrap(),
        )
        .unwrap();

    persistence
        .delete_matchday(matchday_id, &create_test_event("DeleteMatchDay"))
        .unwrap();

    assert!(
        persistence
            .get_roster(team_id, matchday_id)
            .unwrap()
            .is_empty()
    );
}
