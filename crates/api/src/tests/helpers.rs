// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fantasy_audit::Cause;
use fantasy_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateMatchDayRequest, CreatePlayerRequest, CreateTeamRequest,
    RecordStatsRequest, create_matchday, create_player, create_team,
};

pub fn create_test_owner() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("owner-1"))
}

pub fn create_test_stranger() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("owner-2"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// A league with one team owned by `owner-1`, one matchday at multiplier 1
/// and three unaffiliated field players.
pub struct TestLeague {
    pub persistence: Persistence,
    pub team_id: i64,
    pub matchday_id: i64,
    pub players: Vec<i64>,
}

pub fn setup_test_league() -> TestLeague {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create test persistence");
    let owner: AuthenticatedActor = create_test_owner();

    let team_id: i64 = create_team(
        &mut persistence,
        &CreateTeamRequest {
            name: String::from("Sharks"),
        },
        &owner,
        create_test_cause(),
    )
    .expect("Failed to create team")
    .team
    .team_id;

    let matchday_id: i64 = create_matchday(
        &mut persistence,
        &CreateMatchDayRequest {
            label: String::from("Round 1"),
            multiplier: None,
        },
        &owner,
        create_test_cause(),
    )
    .expect("Failed to create matchday")
    .matchday
    .matchday_id;

    let players: Vec<i64> = ["Ana", "Bea", "Cleo"]
        .iter()
        .map(|name| {
            create_player(
                &mut persistence,
                &CreatePlayerRequest {
                    name: String::from(*name),
                    position: String::from("field"),
                    club_id: None,
                },
                &owner,
                create_test_cause(),
            )
            .expect("Failed to create player")
            .player
            .player_id
        })
        .collect();

    TestLeague {
        persistence,
        team_id,
        matchday_id,
        players,
    }
}

/// Stats with every count zero.
pub fn blank_stats(player_id: i64, matchday_id: i64) -> RecordStatsRequest {
    RecordStatsRequest {
        player_id,
        matchday_id,
        ..RecordStatsRequest::default()
    }
}
