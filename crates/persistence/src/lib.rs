// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the fantasy league.
//!
//! This crate stores the league's entities, roster history, score history and
//! audit trail in `SQLite` through Diesel.
//!
//! ## Transactions
//!
//! Every state-changing method runs in a single immediate transaction together
//! with the audit event that records it. Either both are stored or neither is.
//!
//! ## Score history
//!
//! Team scores carry a version that starts at 1 and advances on every
//! recomputation. Writers pass the version they read; a mismatch fails with
//! `PersistenceError::StorageConflict` and nothing is written.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory databases
//! - Each `new_in_memory()` call gets its own database
//! - Migrations run on every connection, so tests see the production schema

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fantasy::{RosterCommit, ScoreTransition, TransitionResult};
use fantasy_audit::AuditEvent;
use fantasy_domain::{
    Club, ClubId, DomainError, MatchDayConfig, MatchDayId, Multiplier, Player, PlayerId, Position,
    RosterHistoryEntry, StatsRecord, Team, TeamId,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{PlayerScoreEntry, StandingRow, TeamScoreEntry};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for league state and the audit trail.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Bounds how long a statement waits for a locked database before failing
    /// with `StorageTimeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be applied.
    pub fn set_busy_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError> {
        backend::sqlite::set_busy_timeout(&mut self.conn, timeout)
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Clubs
    // ========================================================================

    /// Creates a club and records `event`.
    ///
    /// # Returns
    ///
    /// The new club id and the audit event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_club(
        &mut self,
        name: &str,
        event: &AuditEvent,
    ) -> Result<(ClubId, i64), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let club_id: ClubId = mutations::clubs::insert_club(conn, name)?;
            let event_id: i64 = mutations::audit::persist_audit_event(conn, event)?;
            Ok((club_id, event_id))
        })
    }

    /// Deletes a club. Its players stay, without a club.
    ///
    /// # Returns
    ///
    /// `false` if the club did not exist. No audit event is stored in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_club(
        &mut self,
        club_id: ClubId,
        event: &AuditEvent,
    ) -> Result<bool, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if mutations::clubs::delete_club(conn, club_id)? == 0 {
                return Ok(false);
            }
            mutations::audit::persist_audit_event(conn, event)?;
            Ok(true)
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_club(&mut self, club_id: ClubId) -> Result<Option<Club>, PersistenceError> {
        queries::clubs::get_club(&mut self.conn, club_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_clubs(&mut self) -> Result<Vec<Club>, PersistenceError> {
        queries::clubs::list_clubs(&mut self.conn)
    }

    // ========================================================================
    // Players
    // ========================================================================

    /// Creates a player.
    ///
    /// # Returns
    ///
    /// The new player id and the audit event id.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the club does not exist, or another
    /// error if persistence fails.
    pub fn create_player(
        &mut self,
        name: &str,
        position: Position,
        club_id: Option<ClubId>,
        event: &AuditEvent,
    ) -> Result<(PlayerId, i64), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let player_id: PlayerId =
                mutations::players::insert_player(conn, name, position, club_id)?;
            let event_id: i64 = mutations::audit::persist_audit_event(conn, event)?;
            Ok((player_id, event_id))
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_player(&mut self, player_id: PlayerId) -> Result<Option<Player>, PersistenceError> {
        queries::players::get_player(&mut self.conn, player_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_players(&mut self) -> Result<Vec<Player>, PersistenceError> {
        queries::players::list_players(&mut self.conn)
    }

    // ========================================================================
    // Teams
    // ========================================================================

    /// Creates a team with an empty roster. The audit event is scoped to the new team.
    ///
    /// # Returns
    ///
    /// The new team id and the audit event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_team(
        &mut self,
        owner_id: &str,
        name: &str,
        event: &AuditEvent,
    ) -> Result<(TeamId, i64), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let team_id: TeamId = mutations::teams::insert_team(conn, owner_id, name)?;
            let scoped: AuditEvent = event.clone().for_team(team_id);
            let event_id: i64 = mutations::audit::persist_audit_event(conn, &scoped)?;
            Ok((team_id, event_id))
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored team is inconsistent.
    pub fn get_team(&mut self, team_id: TeamId) -> Result<Option<Team>, PersistenceError> {
        queries::teams::get_team(&mut self.conn, team_id)
    }

    /// Persists a live roster transition and its audit event.
    ///
    /// # Returns
    ///
    /// The audit event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_team_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            mutations::teams::sync_team_roster(conn, &result.new_team)?;
            mutations::audit::persist_audit_event(conn, &result.audit_event)
        })
    }

    // ========================================================================
    // Matchdays
    // ========================================================================

    /// Creates a matchday. The audit event is scoped to the new matchday.
    ///
    /// # Returns
    ///
    /// The new matchday id and the audit event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_matchday(
        &mut self,
        label: &str,
        multiplier: Multiplier,
        event: &AuditEvent,
    ) -> Result<(MatchDayId, i64), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let matchday_id: MatchDayId =
                mutations::matchdays::insert_matchday(conn, label, multiplier)?;
            let scoped: AuditEvent = event.clone().for_matchday(matchday_id);
            let event_id: i64 = mutations::audit::persist_audit_event(conn, &scoped)?;
            Ok((matchday_id, event_id))
        })
    }

    /// Deletes a matchday together with its stats, roster history and scores.
    ///
    /// # Returns
    ///
    /// `false` if the matchday did not exist. No audit event is stored in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_matchday(
        &mut self,
        matchday_id: MatchDayId,
        event: &AuditEvent,
    ) -> Result<bool, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if mutations::matchdays::delete_matchday(conn, matchday_id)? == 0 {
                return Ok(false);
            }
            mutations::audit::persist_audit_event(conn, event)?;
            Ok(true)
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_matchday(
        &mut self,
        matchday_id: MatchDayId,
    ) -> Result<Option<MatchDayConfig>, PersistenceError> {
        queries::matchdays::get_matchday(&mut self.conn, matchday_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_matchdays(&mut self) -> Result<Vec<MatchDayConfig>, PersistenceError> {
        queries::matchdays::list_matchdays(&mut self.conn)
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Stores a stats record, replacing any earlier one for the same
    /// `(player, matchday)`. Stored scores are left as they are.
    ///
    /// # Returns
    ///
    /// The audit event id.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the player or matchday does not exist,
    /// or another error if persistence fails.
    pub fn put_stats(
        &mut self,
        stats: &StatsRecord,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            mutations::stats::replace_stats(conn, stats)?;
            mutations::audit::persist_audit_event(conn, event)
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_stats(
        &mut self,
        player_id: PlayerId,
        matchday_id: MatchDayId,
    ) -> Result<Option<StatsRecord>, PersistenceError> {
        queries::stats::get_stats(&mut self.conn, player_id, matchday_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_player_stats(
        &mut self,
        player_id: PlayerId,
    ) -> Result<Vec<StatsRecord>, PersistenceError> {
        queries::stats::list_player_stats(&mut self.conn, player_id)
    }

    /// Loads the stats recorded on a matchday for the given players.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_matchday_stats(
        &mut self,
        matchday_id: MatchDayId,
        player_ids: &[PlayerId],
    ) -> Result<HashMap<PlayerId, StatsRecord>, PersistenceError> {
        queries::stats::get_matchday_stats(&mut self.conn, matchday_id, player_ids)
    }

    // ========================================================================
    // Roster History
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_roster(
        &mut self,
        team_id: TeamId,
        matchday_id: MatchDayId,
    ) -> Result<Vec<RosterHistoryEntry>, PersistenceError> {
        queries::roster::get_roster(&mut self.conn, team_id, matchday_id)
    }

    /// Appends a validated roster commit and its audit event.
    ///
    /// # Returns
    ///
    /// The audit event id.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if a roster is already recorded for the
    /// commit's `(team, matchday)` or a uniqueness rule rejects an entry, or
    /// another error if persistence fails.
    pub fn persist_roster_commit(
        &mut self,
        commit: &RosterCommit,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if queries::roster::roster_recorded(conn, commit.team_id, commit.matchday_id)? {
                return Err(PersistenceError::ConstraintViolation(
                    DomainError::RosterAlreadyRecorded {
                        team_id: commit.team_id,
                        matchday_id: commit.matchday_id,
                    },
                ));
            }
            mutations::roster::append_roster_entries(conn, &commit.entries)?;
            mutations::audit::persist_audit_event(conn, &commit.audit_event)
        })
    }

    // ========================================================================
    // Score History
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_team_score(
        &mut self,
        team_id: TeamId,
        matchday_id: MatchDayId,
    ) -> Result<Option<TeamScoreEntry>, PersistenceError> {
        queries::scores::get_team_score(&mut self.conn, team_id, matchday_id)
    }

    /// Stores a computed team score if the stored version still equals
    /// `expected_version`.
    ///
    /// # Returns
    ///
    /// The stored entry and the audit event id.
    ///
    /// # Errors
    ///
    /// Returns `StorageConflict` if the version moved, or another error if
    /// persistence fails.
    pub fn persist_team_score(
        &mut self,
        transition: &ScoreTransition,
        expected_version: Option<i64>,
    ) -> Result<(TeamScoreEntry, i64), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let entry: TeamScoreEntry =
                mutations::scores::write_team_score(conn, &transition.result, expected_version)?;
            let event_id: i64 =
                mutations::audit::persist_audit_event(conn, &transition.audit_event)?;
            Ok((entry, event_id))
        })
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_team_scores(
        &mut self,
        team_id: TeamId,
    ) -> Result<Vec<TeamScoreEntry>, PersistenceError> {
        queries::scores::list_team_scores(&mut self.conn, team_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_player_scores(
        &mut self,
        player_id: PlayerId,
    ) -> Result<Vec<PlayerScoreEntry>, PersistenceError> {
        queries::scores::list_player_scores(&mut self.conn, player_id)
    }

    /// Builds the league table, best total first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_standings(&mut self) -> Result<Vec<StandingRow>, PersistenceError> {
        queries::scores::get_standings(&mut self.conn)
    }

    // ========================================================================
    // Audit Events
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored event cannot be deserialized.
    pub fn get_audit_event(
        &mut self,
        event_id: i64,
    ) -> Result<Option<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Returns every audit event scoped to a team, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored event cannot be deserialized.
    pub fn list_team_audit_events(
        &mut self,
        team_id: TeamId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_team_audit_events(&mut self.conn, team_id)
    }
}
