// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_audit::AuditEvent;
use bunte_liga_domain::{SeasonId, TeamId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, to_unix};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_data = ActorData {
        id: event.actor.id.clone(),
        kind: event.actor.kind.as_str().to_string(),
        team_id: event.actor.team_id.map(TeamId::value),
    };
    let cause_data = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };
    let before_data = StateSnapshotData {
        data: event.before.data.clone(),
    };
    let after_data = StateSnapshotData {
        data: event.after.data.clone(),
    };

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::season_id.eq(event.season_id.map(SeasonId::value)),
            audit_events::entity_kind.eq(event.entity.map(|e| e.kind())),
            audit_events::entity_id.eq(event.entity.map(|e| e.id())),
            audit_events::actor_json.eq(serde_json::to_string(&actor_data)?),
            audit_events::cause_json.eq(serde_json::to_string(&cause_data)?),
            audit_events::action_json.eq(serde_json::to_string(&action_data)?),
            audit_events::before_snapshot_json.eq(serde_json::to_string(&before_data)?),
            audit_events::after_snapshot_json.eq(serde_json::to_string(&after_data)?),
            audit_events::recorded_at.eq(to_unix(event.recorded_at)),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
