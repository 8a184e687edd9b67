// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fantasy_audit::{Actor, Cause};
use fantasy_domain::{
    MatchDayConfig, MatchDayId, Multiplier, PlayerId, RosterHistoryEntry, StatsRecord, Team,
    TeamId,
};

pub const TEAM: TeamId = TeamId::new(1);
pub const MATCHDAY: MatchDayId = MatchDayId::new(1);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("owner-1"), String::from("owner"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Owner request"))
}

pub fn create_test_team(members: &[i64], captain: Option<i64>) -> Team {
    Team::from_parts(
        TEAM,
        String::from("owner-1"),
        String::from("Sharks"),
        members.iter().copied().map(PlayerId::new).collect(),
        captain.map(PlayerId::new),
    )
    .unwrap()
}

pub fn create_test_matchday(multiplier: Multiplier) -> MatchDayConfig {
    MatchDayConfig::new(MATCHDAY, String::from("Round 1"), multiplier)
}

pub fn roster_entry(player: i64, is_captain: bool) -> RosterHistoryEntry {
    RosterHistoryEntry {
        team_id: TEAM,
        matchday_id: MATCHDAY,
        player_id: PlayerId::new(player),
        is_captain,
    }
}

/// Stats worth 23.5 raw points.
pub fn create_reference_stats(player: i64) -> StatsRecord {
    StatsRecord {
        goals: 3,
        assists: 1,
        steals: 2,
        wins: 1,
        pf: 1,
        balls_lost: 1,
        ..StatsRecord::empty(PlayerId::new(player), MATCHDAY)
    }
}

/// Stats worth exactly 10 raw points.
pub fn create_ten_point_stats(player: i64) -> StatsRecord {
    StatsRecord {
        goals: 2,
        ..StatsRecord::empty(PlayerId::new(player), MATCHDAY)
    }
}
