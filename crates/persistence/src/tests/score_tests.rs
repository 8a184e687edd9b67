// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use fantasy::{RosterCommit, ScoreTransition, record_roster, score_team};
use fantasy_domain::{
    MatchDayConfig, PlayerId, RosterHistoryEntry, RosterSlot, StatsRecord, TeamId,
};

use super::{
    TestLeague, create_test_actor, create_test_cause, create_test_event, create_test_league,
};
use crate::{PersistenceError, PlayerScoreEntry, StandingRow, TeamScoreEntry};

/// Records `players[0]` (captain) and `players[1]` for the league's team, with
/// 5 and 3 points of stats respectively.
fn setup_scored_roster(league: &mut TestLeague) -> ScoreTransition {
    let commit: RosterCommit = record_roster(
        league.team_id,
        league.matchday_id,
        &[
            RosterSlot::new(league.players[0], true),
            RosterSlot::new(league.players[1], false),
        ],
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    league.persistence.persist_roster_commit(&commit).unwrap();

    league
        .persistence
        .put_stats(
            &StatsRecord {
                goals: 1,
                ..StatsRecord::empty(league.players[0], league.matchday_id)
            },
            &create_test_event("RecordStats"),
        )
        .unwrap();
    league
        .persistence
        .put_stats(
            &StatsRecord {
                assists: 1,
                ..StatsRecord::empty(league.players[1], league.matchday_id)
            },
            &create_test_event("RecordStats"),
        )
        .unwrap();

    compute_transition(league, None)
}

fn compute_transition(league: &mut TestLeague, previous: Option<i64>) -> ScoreTransition {
    let team_id: TeamId = league.team_id;
    compute_transition_for(league, team_id, previous)
}

fn compute_transition_for(
    league: &mut TestLeague,
    team_id: TeamId,
    previous: Option<i64>,
) -> ScoreTransition {
    let matchday: MatchDayConfig = league
        .persistence
        .get_matchday(league.matchday_id)
        .unwrap()
        .unwrap();
    let roster: Vec<RosterHistoryEntry> = league
        .persistence
        .get_roster(team_id, league.matchday_id)
        .unwrap();
    let player_ids: Vec<PlayerId> = roster.iter().map(|entry| entry.player_id).collect();
    let stats: HashMap<PlayerId, StatsRecord> = league
        .persistence
        .get_matchday_stats(league.matchday_id, &player_ids)
        .unwrap();
    score_team(
        team_id,
        &matchday,
        &roster,
        &stats,
        previous,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_first_score_write_starts_at_version_one() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);

    let (entry, _): (TeamScoreEntry, i64) = league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    assert_eq!(entry.score, 13);
    assert_eq!(entry.version, 1);
    assert_eq!(
        league
            .persistence
            .get_team_score(league.team_id, league.matchday_id)
            .unwrap(),
        Some(entry)
    );
}

#[test]
fn test_player_scores_record_base_and_counted_score() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    let captain: Vec<PlayerScoreEntry> = league
        .persistence
        .list_player_scores(league.players[0])
        .unwrap();
    assert_eq!(captain.len(), 1);
    assert_eq!(captain[0].base_score, 5);
    assert_eq!(captain[0].score, 10);
    assert_eq!(captain[0].team_id, league.team_id);

    let other: Vec<PlayerScoreEntry> = league
        .persistence
        .list_player_scores(league.players[1])
        .unwrap();
    assert_eq!(other[0].base_score, 3);
    assert_eq!(other[0].score, 3);
}

#[test]
fn test_shared_player_keeps_one_entry_per_team() {
    let mut league: TestLeague = create_test_league();
    let first_team: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&first_team, None)
        .unwrap();

    // players[0] captains the first team and plays uncaptained for the second.
    let (second_team, _): (TeamId, i64) = league
        .persistence
        .create_team("owner-2", "Dolphins", &create_test_event("CreateTeam"))
        .unwrap();
    let commit: RosterCommit = record_roster(
        second_team,
        league.matchday_id,
        &[RosterSlot::new(league.players[0], false)],
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    league.persistence.persist_roster_commit(&commit).unwrap();
    let transition: ScoreTransition = compute_transition_for(&mut league, second_team, None);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    let history: Vec<PlayerScoreEntry> = league
        .persistence
        .list_player_scores(league.players[0])
        .unwrap();
    let per_team: Vec<(TeamId, i64, i64)> = history
        .iter()
        .map(|entry| (entry.team_id, entry.base_score, entry.score))
        .collect();
    assert_eq!(
        per_team,
        vec![(league.team_id, 5, 10), (second_team, 5, 5)]
    );
}

#[test]
fn test_recompute_advances_version() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    league
        .persistence
        .put_stats(
            &StatsRecord {
                goals: 2,
                ..StatsRecord::empty(league.players[1], league.matchday_id)
            },
            &create_test_event("RecordStats"),
        )
        .unwrap();

    // Stats corrections leave the stored score alone until recomputation.
    let stale: TeamScoreEntry = league
        .persistence
        .get_team_score(league.team_id, league.matchday_id)
        .unwrap()
        .unwrap();
    assert_eq!(stale.score, 13);

    let recomputed: ScoreTransition = compute_transition(&mut league, Some(stale.score));
    let (entry, _): (TeamScoreEntry, i64) = league
        .persistence
        .persist_team_score(&recomputed, Some(stale.version))
        .unwrap();

    assert_eq!(entry.score, 20);
    assert_eq!(entry.version, 2);
    assert_eq!(league.persistence.list_team_scores(league.team_id).unwrap().len(), 1);
}

#[test]
fn test_stale_version_is_a_conflict() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();
    league
        .persistence
        .persist_team_score(&transition, Some(1))
        .unwrap();

    let result: Result<(TeamScoreEntry, i64), PersistenceError> = league
        .persistence
        .persist_team_score(&transition, Some(1));

    let err: PersistenceError = result.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(
        err,
        PersistenceError::StorageConflict {
            team_id: league.team_id,
            matchday_id: league.matchday_id,
            expected_version: Some(1),
            actual_version: Some(2),
        }
    );
}

#[test]
fn test_expecting_no_score_conflicts_with_existing_score() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    let result: Result<(TeamScoreEntry, i64), PersistenceError> =
        league.persistence.persist_team_score(&transition, None);

    assert!(matches!(
        result,
        Err(PersistenceError::StorageConflict {
            actual_version: Some(1),
            ..
        })
    ));
}

#[test]
fn test_standings_rank_by_total_then_team_id() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    let (idle_team, _): (TeamId, i64) = league
        .persistence
        .create_team("owner-2", "Dolphins", &create_test_event("CreateTeam"))
        .unwrap();

    let standings: Vec<StandingRow> = league.persistence.get_standings().unwrap();

    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].team_id, league.team_id);
    assert_eq!(standings[0].total_score, 13);
    assert_eq!(standings[0].matchdays_scored, 1);
    assert_eq!(standings[1].team_id, idle_team);
    assert_eq!(standings[1].total_score, 0);
    assert_eq!(standings[1].matchdays_scored, 0);
}

#[test]
fn test_standings_tie_breaks_on_team_id() {
    let mut league: TestLeague = create_test_league();
    let (second_team, _): (TeamId, i64) = league
        .persistence
        .create_team("owner-2", "Dolphins", &create_test_event("CreateTeam"))
        .unwrap();

    let standings: Vec<StandingRow> = league.persistence.get_standings().unwrap();

    assert_eq!(standings[0].team_id, league.team_id);
    assert_eq!(standings[1].team_id, second_team);
}

#[test]
fn test_deleting_matchday_removes_scores() {
    let mut league: TestLeague = create_test_league();
    let transition: ScoreTransition = setup_scored_roster(&mut league);
    league
        .persistence
        .persist_team_score(&transition, None)
        .unwrap();

    league
        .persistence
        .delete_matchday(league.matchday_id, &create_test_event("DeleteMatchDay"))
        .unwrap();

    assert!(league.persistence.list_team_scores(league.team_id).unwrap().is_empty());
    assert!(
        league
            .persistence
            .list_player_scores(league.players[0])
            .unwrap()
            .is_empty()
    );
    assert_eq!(league.persistence.get_standings().unwrap()[0].total_score, 0);
}
