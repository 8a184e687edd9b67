// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fantasy_audit::AuditEvent;
use fantasy_domain::{MatchDayId, TeamId};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::mutations::timestamp;

/// Appends an event to the audit log and returns its id.
///
/// Each part is stored as its own JSON column so the read side can decode
/// them independently.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    use diesel_schema::audit_events::dsl;

    let actor_json: String = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json: String = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json: String = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let [before_json, after_json]: [String; 2] = [
        snapshot_json(&event.before.data)?,
        snapshot_json(&event.after.data)?,
    ];

    diesel::insert_into(dsl::audit_events)
        .values((
            dsl::team_id.eq(event.team_id.map(TeamId::value)),
            dsl::matchday_id.eq(event.matchday_id.map(MatchDayId::value)),
            dsl::actor_json.eq(actor_json),
            dsl::cause_json.eq(cause_json),
            dsl::action_json.eq(action_json),
            dsl::before_snapshot_json.eq(before_json),
            dsl::after_snapshot_json.eq(after_json),
            dsl::created_at.eq(timestamp()?),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, team_id = ?event.team_id, "Audit event stored");
    Ok(event_id)
}

fn snapshot_json(data: &str) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&StateSnapshotData {
        data: data.to_owned(),
    })?)
}
