// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod roster_tests;
mod score_tests;

use fantasy_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{MatchDayId, Multiplier, PlayerId, Position, TeamId};

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("owner"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_event(name: &str) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(name), None),
        StateSnapshot::empty(),
        StateSnapshot::new(String::from("created")),
    )
}

/// A league with one team, one matchday at multiplier 1 and three field players.
pub struct TestLeague {
    pub persistence: Persistence,
    pub team_id: TeamId,
    pub matchday_id: MatchDayId,
    pub players: Vec<PlayerId>,
}

pub fn create_test_league() -> TestLeague {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (team_id, _): (TeamId, i64) = persistence
        .create_team("owner-1", "Sharks", &create_test_event("CreateTeam"))
        .unwrap();
    let (matchday_id, _): (MatchDayId, i64) = persistence
        .create_matchday("Round 1", Multiplier::ONE, &create_test_event("CreateMatchDay"))
        .unwrap();
    let players: Vec<PlayerId> = ["Alpha", "Bravo", "Charlie"]
        .iter()
        .map(|name| {
            persistence
                .create_player(name, Position::Field, None, &create_test_event("CreatePlayer"))
                .unwrap()
                .0
        })
        .collect();
    TestLeague {
        persistence,
        team_id,
        matchday_id,
        players,
    }
}
