// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, PlayerStatsResponse, RecordStatsRequest, RecordStatsResponse, get_player_stats,
    record_stats,
};

use super::helpers::{
    TestLeague, blank_stats, create_test_cause, create_test_owner, setup_test_league,
};

#[test]
fn test_record_stats_then_replace() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];

    let first: RecordStatsResponse = record_stats(
        &mut league.persistence,
        &RecordStatsRequest {
            goals: 2,
            ..blank_stats(player_id, league.matchday_id)
        },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap();
    assert!(!first.replaced);

    let second: RecordStatsResponse = record_stats(
        &mut league.persistence,
        &RecordStatsRequest {
            goals: 1,
            saves: 4,
            ..blank_stats(player_id, league.matchday_id)
        },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap();
    assert!(second.replaced);

    let history: PlayerStatsResponse =
        get_player_stats(&mut league.persistence, player_id).unwrap();
    assert_eq!(history.stats.len(), 1);
    assert_eq!(history.stats[0].goals, 1);
    assert_eq!(history.stats[0].saves, 4);
}

#[test]
fn test_negative_count_is_rejected() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];

    let result: Result<RecordStatsResponse, ApiError> = record_stats(
        &mut league.persistence,
        &RecordStatsRequest {
            balls_lost: -1,
            ..blank_stats(player_id, league.matchday_id)
        },
        &create_test_owner(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "balls_lost"
    ));
    let history: PlayerStatsResponse =
        get_player_stats(&mut league.persistence, player_id).unwrap();
    assert!(history.stats.is_empty());
}

#[test]
fn test_oversized_count_is_rejected() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];

    let result: Result<RecordStatsResponse, ApiError> = record_stats(
        &mut league.persistence,
        &RecordStatsRequest {
            goals: i64::from(i32::MAX) + 1,
            ..blank_stats(player_id, league.matchday_id)
        },
        &create_test_owner(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "goals"
    ));
}

#[test]
fn test_stats_for_unknown_matchday_are_rejected() {
    let mut league: TestLeague = setup_test_league();
    let player_id: i64 = league.players[0];

    let result: Result<RecordStatsResponse, ApiError> = record_stats(
        &mut league.persistence,
        &blank_stats(player_id, 500),
        &create_test_owner(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Matchday"
    ));
}

#[test]
fn test_stats_for_unknown_player_are_rejected() {
    let mut league: TestLeague = setup_test_league();

    let result: Result<RecordStatsResponse, ApiError> = record_stats(
        &mut league.persistence,
        &blank_stats(500, league.matchday_id),
        &create_test_owner(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Player"
    ));
}
