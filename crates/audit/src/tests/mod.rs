// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, ActorKind, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{BookingId, SeasonId, TeamId};
use std::str::FromStr;
use time::macros::datetime;

fn create_test_event() -> AuditEvent {
    AuditEvent::new(
        Some(SeasonId::new(1)),
        None,
        Actor::team(String::from("kapitaen-a"), TeamId::new(3)),
        Cause::new(String::from("req-1"), String::from("Request slot")),
        Action::new(String::from("RequestSlot"), None),
        StateSnapshot::new(String::from("status=available")),
        StateSnapshot::new(String::from("status=pending_away_confirm")),
        datetime!(2025-06-01 10:00 UTC),
    )
}

#[test]
fn test_team_actor_carries_team() {
    let actor = Actor::team(String::from("kapitaen-a"), TeamId::new(3));
    assert_eq!(actor.kind, ActorKind::Team);
    assert_eq!(actor.team_id, Some(TeamId::new(3)));

    let admin = Actor::admin(String::from("liga-admin"));
    assert_eq!(admin.kind, ActorKind::Admin);
    assert_eq!(admin.team_id, None);
}

#[test]
fn test_actor_kind_round_trip() {
    for kind in [ActorKind::Team, ActorKind::Admin, ActorKind::System] {
        assert_eq!(ActorKind::from_str(kind.as_str()), Ok(kind));
    }
    assert!(ActorKind::from_str("robot").is_err());
}

#[test]
fn test_entity_ref_round_trip() {
    let entity = EntityRef::Booking(BookingId::new(42));
    assert_eq!(entity.kind(), "booking");
    assert_eq!(entity.id(), 42);
    assert_eq!(EntityRef::from_parts("booking", 42), Some(entity));
    assert_eq!(EntityRef::from_parts("venue", 42), None);
}

#[test]
fn test_new_event_is_unsaved_until_entity_attached() {
    let event = create_test_event();
    assert_eq!(event.event_id, None);
    assert_eq!(event.entity, None);

    let event = event.with_entity(EntityRef::Booking(BookingId::new(7)));
    assert_eq!(event.entity, Some(EntityRef::Booking(BookingId::new(7))));
    assert_eq!(event.before.data, "status=available");
    assert_eq!(event.after.data, "status=pending_away_confirm");
}

#[test]
fn test_absent_snapshot() {
    assert_eq!(StateSnapshot::absent().data, "absent");
}
