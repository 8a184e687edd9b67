// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fantasy_domain::PlayerId;

/// A command represents owner intent against a team's live roster, as data only.
///
/// Commands are the only way to request live roster changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add a player to the live roster.
    AddMember {
        /// The player to add.
        player_id: PlayerId,
    },
    /// Remove a player from the live roster.
    RemoveMember {
        /// The player to remove.
        player_id: PlayerId,
    },
    /// Make a member the team's captain.
    SetCaptain {
        /// The new captain.
        player_id: PlayerId,
    },
}

impl Command {
    /// Returns the action name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddMember { .. } => "AddMember",
            Self::RemoveMember { .. } => "RemoveMember",
            Self::SetCaptain { .. } => "SetCaptain",
        }
    }
}
