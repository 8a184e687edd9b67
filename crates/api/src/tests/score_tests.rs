// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Score recomputation, score history, standings and the audit log.

use crate::{
    ApiError, AuthenticatedActor, CreateMatchDayRequest, CreateTeamRequest,
    PlayerScoreHistoryResponse, RecomputeScoreRequest,
    RecomputeScoreResponse, RecordRosterRequest, RecordStatsRequest, RosterSlotRequest,
    ScoreBreakdownResponse, StandingsResponse, TeamAuditResponse, TeamScoreHistoryResponse,
    create_matchday, create_team, get_player_scores, get_score_breakdown, get_standings,
    get_team_audit_log, get_team_scores, recompute_team_score, record_roster, record_stats,
};

use super::helpers::{
    TestLeague, blank_stats, create_test_cause, create_test_owner, setup_test_league,
};

/// 3 goals, 1 assist, 2 steals, 1 win, 1 personal foul, 1 ball lost: 23.5 raw.
fn sample_stats(player_id: i64, matchday_id: i64) -> RecordStatsRequest {
    RecordStatsRequest {
        goals: 3,
        assists: 1,
        steals: 2,
        wins: 1,
        pf: 1,
        balls_lost: 1,
        ..blank_stats(player_id, matchday_id)
    }
}

fn put_stats(league: &mut TestLeague, request: &RecordStatsRequest) {
    record_stats(
        &mut league.persistence,
        request,
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap();
}

fn put_roster(league: &mut TestLeague, matchday_id: i64, slots: Vec<RosterSlotRequest>) {
    record_roster(
        &mut league.persistence,
        &RecordRosterRequest {
            team_id: league.team_id,
            matchday_id,
            slots,
        },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap();
}

fn recompute(
    league: &mut TestLeague,
    matchday_id: i64,
    expected_version: Option<i64>,
) -> Result<RecomputeScoreResponse, ApiError> {
    recompute_team_score(
        &mut league.persistence,
        &RecomputeScoreRequest {
            team_id: league.team_id,
            matchday_id,
            expected_version,
        },
        &create_test_owner(),
        create_test_cause(),
    )
}

#[test]
fn test_captain_contribution_is_doubled_after_rounding() {
    let mut league: TestLeague = setup_test_league();
    let (captain, other): (i64, i64) = (league.players[0], league.players[1]);
    let matchday_id: i64 = league.matchday_id;

    put_stats(&mut league, &sample_stats(captain, matchday_id));
    put_stats(
        &mut league,
        &RecordStatsRequest {
            assists: 1,
            ..blank_stats(other, matchday_id)
        },
    );
    put_roster(
        &mut league,
        matchday_id,
        vec![
            RosterSlotRequest {
                player_id: captain,
                is_captain: true,
            },
            RosterSlotRequest {
                player_id: other,
                is_captain: false,
            },
        ],
    );

    let response: RecomputeScoreResponse = recompute(&mut league, matchday_id, None).unwrap();

    assert_eq!(response.team_score, 51);
    assert_eq!(response.version, 1);
    assert_eq!(response.player_scores[0].base_score, 24);
    assert_eq!(response.player_scores[0].score, 48);
    assert!(response.player_scores[0].is_captain);
    assert_eq!(response.player_scores[1].score, 3);
}

#[test]
fn test_score_breakdown_explains_rounding() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let matchday_id: i64 = league.matchday_id;
    put_stats(&mut league, &sample_stats(player_id, matchday_id));

    let breakdown: ScoreBreakdownResponse =
        get_score_breakdown(&mut league.persistence, player_id, matchday_id).unwrap();

    assert!(breakdown.has_stats);
    assert_eq!(breakdown.raw_half_points, 47);
    assert_eq!(breakdown.breakdown.goals, 30);
    assert_eq!(breakdown.breakdown.balls_lost, -1);
    assert_eq!(breakdown.score, 24);
}

#[test]
fn test_score_breakdown_without_stats_is_zero() {
    let mut league: TestLeague = setup_test_league();

    let breakdown: ScoreBreakdownResponse =
        get_score_breakdown(&mut league.persistence, league.players[0], league.matchday_id)
            .unwrap();

    assert!(!breakdown.has_stats);
    assert_eq!(breakdown.score, 0);
}

#[test]
fn test_multiplier_applies_before_rounding() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let doubled: i64 = create_matchday(
        &mut league.persistence,
        &CreateMatchDayRequest {
            label: String::from("Derby"),
            multiplier: Some(String::from("1.5")),
        },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap()
    .matchday
    .matchday_id;
    put_stats(&mut league, &sample_stats(player_id, doubled));

    let breakdown: ScoreBreakdownResponse =
        get_score_breakdown(&mut league.persistence, player_id, doubled).unwrap();

    // 23.5 * 1.5 = 35.25
    assert_eq!(breakdown.multiplier, "3/2");
    assert_eq!(breakdown.score, 35);
}

#[test]
fn test_empty_roster_scores_zero() {
    let mut league: TestLeague = setup_test_league();
    let matchday_id: i64 = league.matchday_id;

    let response: RecomputeScoreResponse = recompute(&mut league, matchday_id, None).unwrap();

    assert_eq!(response.team_score, 0);
    assert!(response.player_scores.is_empty());
}

#[test]
fn test_stats_correction_needs_recompute() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let matchday_id: i64 = league.matchday_id;
    put_roster(
        &mut league,
        matchday_id,
        vec![RosterSlotRequest {
            player_id,
            is_captain: false,
        }],
    );
    put_stats(
        &mut league,
        &RecordStatsRequest {
            goals: 1,
            ..blank_stats(player_id, matchday_id)
        },
    );
    recompute(&mut league, matchday_id, None).unwrap();

    put_stats(
        &mut league,
        &RecordStatsRequest {
            goals: 2,
            ..blank_stats(player_id, matchday_id)
        },
    );
    let stale: TeamScoreHistoryResponse =
        get_team_scores(&mut league.persistence, league.team_id).unwrap();
    assert_eq!(stale.scores[0].score, 5);

    let response: RecomputeScoreResponse = recompute(&mut league, matchday_id, None).unwrap();
    assert_eq!(response.team_score, 10);
    assert_eq!(response.version, 2);
}

#[test]
fn test_stale_expected_version_is_a_retryable_conflict() {
    let mut league: TestLeague = setup_test_league();
    let matchday_id: i64 = league.matchday_id;

    recompute(&mut league, matchday_id, None).unwrap();
    recompute(&mut league, matchday_id, Some(1)).unwrap();
    let result: Result<RecomputeScoreResponse, ApiError> =
        recompute(&mut league, matchday_id, Some(1));

    let err: ApiError = result.unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));
    assert!(err.is_retryable());
}

#[test]
fn test_recompute_for_unknown_team_is_not_found() {
    let mut league: TestLeague = setup_test_league();

    let result: Result<RecomputeScoreResponse, ApiError> = recompute_team_score(
        &mut league.persistence,
        &RecomputeScoreRequest {
            team_id: 404,
            matchday_id: league.matchday_id,
            expected_version: None,
        },
        &create_test_owner(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Team"
    ));
}

#[test]
fn test_score_history_totals_matchdays() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let first_matchday: i64 = league.matchday_id;
    let second_matchday: i64 = create_matchday(
        &mut league.persistence,
        &CreateMatchDayRequest {
            label: String::from("Round 2"),
            multiplier: Some(String::from("2")),
        },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap()
    .matchday
    .matchday_id;

    for matchday_id in [first_matchday, second_matchday] {
        put_roster(
            &mut league,
            matchday_id,
            vec![RosterSlotRequest {
                player_id,
                is_captain: false,
            }],
        );
        put_stats(
            &mut league,
            &RecordStatsRequest {
                saves: 1,
                ..blank_stats(player_id, matchday_id)
            },
        );
        recompute(&mut league, matchday_id, None).unwrap();
    }

    let history: TeamScoreHistoryResponse =
        get_team_scores(&mut league.persistence, league.team_id).unwrap();
    assert_eq!(history.scores.len(), 2);
    assert_eq!(history.scores[0].score, 4);
    assert_eq!(history.scores[1].score, 8);
    assert_eq!(history.total_score, 12);

    let player_history: PlayerScoreHistoryResponse =
        get_player_scores(&mut league.persistence, player_id).unwrap();
    assert_eq!(player_history.scores.len(), 2);
    assert_eq!(player_history.scores[1].base_score, 8);
    assert_eq!(player_history.scores[1].team_id, league.team_id);
}

#[test]
fn test_standings_rank_by_total_score() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let matchday_id: i64 = league.matchday_id;
    let rival: AuthenticatedActor = AuthenticatedActor::new(String::from("owner-2"));
    let rival_team: i64 = create_team(
        &mut league.persistence,
        &CreateTeamRequest {
            name: String::from("Orcas"),
        },
        &rival,
        create_test_cause(),
    )
    .unwrap()
    .team
    .team_id;

    put_roster(
        &mut league,
        matchday_id,
        vec![RosterSlotRequest {
            player_id,
            is_captain: true,
        }],
    );
    put_stats(
        &mut league,
        &RecordStatsRequest {
            wins: 1,
            ..blank_stats(player_id, matchday_id)
        },
    );
    recompute(&mut league, matchday_id, None).unwrap();

    let standings: StandingsResponse = get_standings(&mut league.persistence).unwrap();

    assert_eq!(standings.standings.len(), 2);
    assert_eq!(standings.standings[0].rank, 1);
    assert_eq!(standings.standings[0].team_id, league.team_id);
    assert_eq!(standings.standings[0].total_score, 6);
    assert_eq!(standings.standings[1].rank, 2);
    assert_eq!(standings.standings[1].team_id, rival_team);
    assert_eq!(standings.standings[1].matchdays_scored, 0);
}

#[test]
fn test_team_audit_log_records_each_change() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];
    let matchday_id: i64 = league.matchday_id;
    put_roster(
        &mut league,
        matchday_id,
        vec![RosterSlotRequest {
            player_id,
            is_captain: true,
        }],
    );
    recompute(&mut league, matchday_id, None).unwrap();

    let log: TeamAuditResponse =
        get_team_audit_log(&mut league.persistence, league.team_id).unwrap();

    let actions: Vec<&str> = log
        .events
        .iter()
        .map(|event| event.action_name.as_str())
        .collect();
    assert_eq!(actions, vec!["CreateTeam", "RecordRoster", "ComputeTeamScore"]);
    assert!(log.events.iter().all(|event| event.actor_id == "owner-1"));
    assert_eq!(log.events[1].matchday_id, Some(matchday_id));
}
