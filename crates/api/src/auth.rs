// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization.
//!
//! Identity is supplied by the caller. The only access rule is ownership:
//! changes to a team's live roster and roster history are reserved to the
//! team's owner.

use fantasy_audit::Actor;
use fantasy_domain::Team;

use crate::error::AuthError;

/// The audit actor type recorded for every request.
pub const ACTOR_TYPE: &str = "user";

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(ACTOR_TYPE))
    }

    /// Returns true if this actor owns the team.
    #[must_use]
    pub fn owns(&self, team: &Team) -> bool {
        self.id == team.owner_id
    }
}

/// Accepts any non-blank actor id.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the id is empty or only whitespace.
pub fn authenticate_stub(actor_id: String) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("actor id must not be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id))
}

/// Authorization checks for team-scoped actions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor owns the team.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` naming `action` if the actor is not the owner.
    pub fn authorize_team_owner(
        actor: &AuthenticatedActor,
        team: &Team,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.owns(team) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            reason: format!("requires ownership of team {}", team.team_id),
        })
    }
}
