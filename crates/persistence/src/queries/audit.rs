// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use fantasy_domain::{MatchDayId, TeamId};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    team_id: Option<i64>,
    matchday_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    #[allow(dead_code)]
    created_at: String,
}

impl AuditEventRow {
    fn into_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let mut event: AuditEvent = AuditEvent::new(
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
        )
        .with_event_id(self.event_id);
        if let Some(team_id) = self.team_id {
            event = event.for_team(TeamId::new(team_id));
        }
        if let Some(matchday_id) = self.matchday_id {
            event = event.for_matchday(MatchDayId::new(matchday_id));
        }
        Ok(event)
    }
}

/// Retrieves an audit event by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON is malformed.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<AuditEvent>, PersistenceError> {
    let row: Option<AuditEventRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?;
    row.map(AuditEventRow::into_event).transpose()
}

/// Retrieves every audit event scoped to a team, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON is malformed.
pub fn list_team_audit_events(
    conn: &mut SqliteConnection,
    team_id: TeamId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::team_id.eq(team_id.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;
    rows.into_iter().map(AuditEventRow::into_event).collect()
}
