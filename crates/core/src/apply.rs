// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LeagueRules, TransitionResult, team_snapshot};
use fantasy_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{Team, add_member, remove_member, set_captain};

/// Applies a command to a team's live roster, producing a new team and audit event.
///
/// The input team is never modified. Roster history for past matchdays is not
/// touched by any command.
///
/// # Arguments
///
/// * `rules` - The league rules in force
/// * `team` - The current team (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the command violates a domain rule: the player is not
/// a member, is already a member, or the roster is full.
pub fn apply(
    rules: &LeagueRules,
    team: &Team,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let (new_team, details): (Team, String) = match command {
        Command::AddMember { player_id } => (
            add_member(team, player_id, rules.max_roster_size)?,
            format!("Added player {player_id} to team {}", team.team_id),
        ),
        Command::RemoveMember { player_id } => {
            let was_captain: bool = team.is_captain(player_id);
            let details: String = if was_captain {
                format!(
                    "Removed captain {player_id} from team {}; team has no captain",
                    team.team_id
                )
            } else {
                format!("Removed player {player_id} from team {}", team.team_id)
            };
            (remove_member(team, player_id)?, details)
        }
        Command::SetCaptain { player_id } => (
            set_captain(team, player_id)?,
            format!("Set player {player_id} as captain of team {}", team.team_id),
        ),
    };

    let before: StateSnapshot = team_snapshot(team);
    let after: StateSnapshot = team_snapshot(&new_team);
    let action: Action = Action::new(String::from(command.name()), Some(details));
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).for_team(team.team_id);

    Ok(TransitionResult {
        new_team,
        audit_event,
    })
}
