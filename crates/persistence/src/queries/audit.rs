// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use bunte_liga_audit::{Action, Actor, ActorKind, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{SeasonId, TeamId};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, from_unix};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    season_id: Option<i64>,
    entity_kind: Option<String>,
    entity_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    recorded_at: i64,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&row.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

        let kind: ActorKind = actor_data
            .kind
            .parse()
            .map_err(PersistenceError::ReconstructionError)?;
        let actor = Actor {
            id: actor_data.id,
            kind,
            team_id: actor_data.team_id.map(TeamId::new),
        };

        let entity: Option<EntityRef> = match (row.entity_kind.as_deref(), row.entity_id) {
            (Some(kind), Some(id)) => Some(EntityRef::from_parts(kind, id).ok_or_else(|| {
                PersistenceError::ReconstructionError(format!("Unknown entity kind '{kind}'"))
            })?),
            _ => None,
        };

        let mut event = AuditEvent::new(
            row.season_id.map(SeasonId::new),
            entity,
            actor,
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
            from_unix(row.recorded_at)?,
        );
        event.event_id = Some(row.event_id);
        Ok(event)
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?
        .try_into()
}

/// Retrieves the audit timeline of one entity, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    entity: EntityRef,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::entity_kind.eq(entity.kind()))
        .filter(audit_events::entity_id.eq(entity.id()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEvent::try_from)
        .collect()
}
