// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use fantasy_domain::{MatchDayId, TeamId};

#[cfg(test)]
mod tests;

/// Who asked for a change: an owner, an operator or the system itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Request `actor_id`, or a fixed name for system actors.
    pub id: String,
    /// `owner`, `operator` or `system`.
    pub actor_type: String,
}

impl Actor {
    /// Builds an actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The request that triggered a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    /// Builds a cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Names the operation that ran, e.g. `SetCaptain` or `RecordRoster`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    /// Free-form detail such as the affected player.
    pub details: Option<String>,
}

impl Action {
    /// Builds an action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A textual snapshot of the state touched by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Wraps already rendered state.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot used when there is no prior or resulting state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: String::from("none"),
        }
    }
}

/// One entry of the league audit log.
///
/// Written in the same transaction as the change it records. Team and
/// matchday scope let the log be read back per team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The persisted event id. `None` until the event has been stored.
    pub event_id: Option<i64>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    /// The team this event concerns, if any.
    pub team_id: Option<TeamId>,
    /// The matchday this event concerns, if any.
    pub matchday_id: Option<MatchDayId>,
}

impl AuditEvent {
    /// Creates a league-wide `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            team_id: None,
            matchday_id: None,
        }
    }

    /// Scopes the event to a team.
    #[must_use]
    pub const fn for_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Scopes the event to a matchday.
    #[must_use]
    pub const fn for_matchday(mut self, matchday_id: MatchDayId) -> Self {
        self.matchday_id = Some(matchday_id);
        self
    }

    /// Attaches the id assigned by storage.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
