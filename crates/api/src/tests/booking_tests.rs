// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{BookingStatus, ContactInfo, ExternalInstant};
use time::Duration;

use super::helpers::{
    League, after_match, at, captain, create_pitch_request, create_test_admin, create_test_cause,
    kickoff, setup_league, setup_time,
};
use crate::{
    ApiError, BookingDecision, BulkCreateSlotsRequest, CancelBookingRequest,
    CheckCollisionRequest, CreateSlotRequest, OverrideBookingRequest, ReasonRequest,
    RequestSlotRequest, RespondBookingRequest, SlotInput, SlotTemplateRequest,
    UpdatePitchRequest, block_slot, bulk_create_slots, cancel_booking, check_slot_collision,
    create_pitch, create_slot, create_slots_from_template, list_available_bookings,
    list_bookings, override_booking, request_slot, respond_to_request, unblock_slot,
    update_pitch,
};

fn answer(league: &mut League, booking_id: i64, decision: BookingDecision, reason: Option<&str>) {
    respond_to_request(
        &mut league.persistence,
        booking_id,
        &RespondBookingRequest {
            decision,
            reason: reason.map(String::from),
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
}

#[test]
fn test_created_slot_is_publicly_available() {
    let mut league = setup_league();

    let slot = league.store_slot(kickoff());

    assert_eq!(slot.status, "available");
    assert_eq!(slot.starts_at, "2025-06-01T14:00:00Z");
    assert_eq!(slot.ends_at, "2025-06-01T15:30:00Z");
    assert_eq!(slot.starts_at_display, "01.06.2025, 16:00");
    assert_eq!(slot.home_team_id, None);

    let open = list_available_bookings(&mut league.persistence, league.season_id, setup_time())
        .unwrap();
    assert_eq!(open.bookings.len(), 1);
    assert_eq!(open.bookings[0].booking_id, slot.booking_id);

    let later = list_available_bookings(&mut league.persistence, league.season_id, after_match())
        .unwrap();
    assert!(later.bookings.is_empty());
}

#[test]
fn test_team_cannot_create_slot() {
    let mut league = setup_league();
    let request = league.slot_request(kickoff(), 90);

    let result = create_slot(
        &mut league.persistence,
        &request,
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_slot_over_pending_match_is_rejected() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);
    let overlapping = league.slot_request(kickoff() + Duration::minutes(30), 90);

    let result = create_slot(
        &mut league.persistence,
        &overlapping,
        &create_test_admin(),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "no_overlap"
    ));
}

#[test]
fn test_collision_check_ignores_the_booking_itself() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);
    let mut request = CheckCollisionRequest {
        pitch_id: league.pitch_id,
        starts_at: at(kickoff() + Duration::minutes(60)),
        duration_minutes: 60,
        ignore_booking_id: None,
    };

    let clash = check_slot_collision(&mut league.persistence, &request).unwrap();
    assert!(!clash.available);
    assert_eq!(clash.conflicting_booking_ids, vec![slot.booking_id]);

    request.ignore_booking_id = Some(slot.booking_id);
    let moved = check_slot_collision(&mut league.persistence, &request).unwrap();
    assert!(moved.available);
    assert!(moved.conflicting_booking_ids.is_empty());
}

#[test]
fn test_back_to_back_slots_do_not_collide() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);

    let check = check_slot_collision(
        &mut league.persistence,
        &CheckCollisionRequest {
            pitch_id: league.pitch_id,
            starts_at: at(kickoff() + Duration::minutes(90)),
            duration_minutes: 90,
            ignore_booking_id: None,
        },
    )
    .unwrap();

    assert!(check.available);
}

#[test]
fn test_bulk_create_reports_each_item() {
    let mut league = setup_league();
    let admin = create_test_admin();
    let closed = create_pitch(
        &mut league.persistence,
        &create_pitch_request("Alter Platz"),
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    update_pitch(
        &mut league.persistence,
        closed.pitch_id,
        &UpdatePitchRequest {
            is_archived: Some(true),
            ..UpdatePitchRequest::default()
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    let request = BulkCreateSlotsRequest {
        season_id: league.season_id,
        slots: vec![
            SlotInput {
                pitch_id: league.pitch_id,
                starts_at: at(kickoff()),
                duration_minutes: 90,
                is_friendly: false,
            },
            SlotInput {
                pitch_id: league.pitch_id,
                starts_at: at(kickoff() + Duration::days(1)),
                duration_minutes: 0,
                is_friendly: false,
            },
            SlotInput {
                pitch_id: closed.pitch_id,
                starts_at: at(kickoff()),
                duration_minutes: 90,
                is_friendly: false,
            },
            SlotInput {
                pitch_id: league.pitch_id,
                starts_at: at(kickoff() + Duration::days(7)),
                duration_minutes: 90,
                is_friendly: true,
            },
        ],
    };

    let response = bulk_create_slots(
        &mut league.persistence,
        &request,
        &admin,
        &create_test_cause(),
        setup_time(),
    )
    .unwrap();

    assert_eq!(response.created.len(), 2);
    assert!(response.created[1].is_friendly);
    let skipped: Vec<(usize, &str)> = response
        .skipped
        .iter()
        .map(|s| (s.index, s.kind.as_str()))
        .collect();
    assert_eq!(skipped, vec![(1, "validation"), (2, "conflict")]);
}

#[test]
fn test_template_creates_weekly_slots_in_local_time() {
    let mut league = setup_league();
    let request = SlotTemplateRequest {
        season_id: league.season_id,
        pitch_id: league.pitch_id,
        first_date: String::from("2025-06-07"),
        last_date: String::from("2025-06-14"),
        weekdays: vec![String::from("sat")],
        start_times: vec![String::from("12:00"), String::from("10:00")],
        duration_minutes: 90,
        is_friendly: false,
    };

    let response = create_slots_from_template(
        &mut league.persistence,
        &request,
        &create_test_admin(),
        &create_test_cause(),
        setup_time(),
    )
    .unwrap();

    assert!(response.skipped.is_empty());
    let starts: Vec<&str> = response
        .created
        .iter()
        .map(|b| b.starts_at.as_str())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2025-06-07T08:00:00Z",
            "2025-06-07T10:00:00Z",
            "2025-06-14T08:00:00Z",
            "2025-06-14T10:00:00Z",
        ]
    );
}

#[test]
fn test_template_rejects_unknown_weekday() {
    let mut league = setup_league();
    let request = SlotTemplateRequest {
        season_id: league.season_id,
        pitch_id: league.pitch_id,
        first_date: String::from("2025-06-07"),
        last_date: String::from("2025-06-14"),
        weekdays: vec![String::from("samstag")],
        start_times: vec![String::from("10:00")],
        duration_minutes: 90,
        is_friendly: false,
    };

    let result = create_slots_from_template(
        &mut league.persistence,
        &request,
        &create_test_admin(),
        &create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_request_and_confirm() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());

    let pending = league.request(slot.booking_id);
    assert_eq!(pending.status, "pending_away_confirm");
    assert_eq!(pending.home_team_id, Some(league.home.value()));
    assert_eq!(pending.away_team_id, Some(league.away.value()));
    assert_eq!(pending.requested_at.as_deref(), Some("2025-05-01T12:00:00Z"));
    let expiry = pending.expiry.unwrap();
    assert!(!expiry.is_expired);
    assert_eq!(expiry.label, "7 Tage, 0 Std.");

    answer(&mut league, slot.booking_id, BookingDecision::Confirm, None);

    let bookings = list_bookings(
        &mut league.persistence,
        league.season_id,
        &captain(league.home),
        setup_time(),
    )
    .unwrap();
    assert_eq!(bookings.bookings[0].status, "confirmed");
    assert!(bookings.bookings[0].expiry.is_none());
}

#[test]
fn test_only_home_team_may_request() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());

    let result = request_slot(
        &mut league.persistence,
        slot.booking_id,
        &RequestSlotRequest {
            home_team_id: Some(league.home.value()),
            away_team_id: league.away.value(),
            is_friendly: false,
            contact: None,
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_requester_cannot_confirm_own_request() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);

    let result = respond_to_request(
        &mut league.persistence,
        slot.booking_id,
        &RespondBookingRequest {
            decision: BookingDecision::Confirm,
            reason: None,
        },
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_started_slot_cannot_be_requested() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());

    let result = request_slot(
        &mut league.persistence,
        slot.booking_id,
        &RequestSlotRequest {
            home_team_id: None,
            away_team_id: league.away.value(),
            is_friendly: false,
            contact: None,
        },
        &captain(league.home),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(result, Err(ApiError::EligibilityViolation { .. })));
}

#[test]
fn test_friendly_needs_released_slot() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    let request = RequestSlotRequest {
        home_team_id: None,
        away_team_id: league.away.value(),
        is_friendly: true,
        contact: None,
    };

    let early = request_slot(
        &mut league.persistence,
        slot.booking_id,
        &request,
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    );
    assert!(matches!(
        early,
        Err(ApiError::EligibilityViolation { ref rule, .. }) if rule == "friendly_release"
    ));

    let released = request_slot(
        &mut league.persistence,
        slot.booking_id,
        &request,
        &captain(league.home),
        create_test_cause(),
        kickoff() - Duration::hours(24),
    )
    .unwrap();
    assert!(released.is_friendly);
}

#[test]
fn test_second_league_match_is_refused() {
    let mut league = setup_league();
    league.confirmed_match();
    let next = league.store_slot(kickoff() + Duration::days(7));

    let result = request_slot(
        &mut league.persistence,
        next.booking_id,
        &RequestSlotRequest {
            home_team_id: None,
            away_team_id: league.home.value(),
            is_friendly: false,
            contact: None,
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::EligibilityViolation { ref rule, .. }) if rule == "rematch_limit"
    ));
}

#[test]
fn test_booking_contact_is_private_to_involved_teams() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    request_slot(
        &mut league.persistence,
        slot.booking_id,
        &RequestSlotRequest {
            home_team_id: None,
            away_team_id: league.away.value(),
            is_friendly: false,
            contact: Some(ContactInfo {
                name: Some(String::from("Jo")),
                email: None,
                phone: Some(String::from("0170 1234567")),
            }),
        },
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    )
    .unwrap();

    let outsider =
        list_bookings(&mut league.persistence, league.season_id, &captain(league.other), setup_time())
            .unwrap();
    assert!(outsider.bookings[0].contact.is_none());

    let opponent =
        list_bookings(&mut league.persistence, league.season_id, &captain(league.away), setup_time())
            .unwrap();
    assert_eq!(
        opponent.bookings[0]
            .contact
            .as_ref()
            .and_then(|c| c.phone.as_deref()),
        Some("0170 1234567")
    );

    let public =
        list_available_bookings(&mut league.persistence, league.season_id, setup_time()).unwrap();
    assert!(public.bookings.is_empty());
}

#[test]
fn test_deny_returns_slot() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);

    answer(
        &mut league,
        slot.booking_id,
        BookingDecision::Deny,
        Some("  Platz belegt "),
    );

    let open = list_available_bookings(&mut league.persistence, league.season_id, setup_time())
        .unwrap();
    assert_eq!(open.bookings.len(), 1);
    let booking = &open.bookings[0];
    assert_eq!(booking.home_team_id, None);
    assert_eq!(booking.away_team_id, None);
    assert_eq!(booking.status_reason.as_deref(), Some("Platz belegt"));
}

#[test]
fn test_answering_twice_is_a_conflict() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);
    answer(&mut league, slot.booking_id, BookingDecision::Confirm, None);

    let result = respond_to_request(
        &mut league.persistence,
        slot.booking_id,
        &RespondBookingRequest {
            decision: BookingDecision::Deny,
            reason: None,
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "status_transition"
    ));
}

#[test]
fn test_confirmed_match_can_be_released_by_a_team() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let withdraw = cancel_booking(
        &mut league.persistence,
        booking.booking_id,
        &CancelBookingRequest {
            reason: None,
            withdraw: true,
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    );
    assert!(matches!(withdraw, Err(ApiError::Unauthorized { .. })));

    let released = cancel_booking(
        &mut league.persistence,
        booking.booking_id,
        &CancelBookingRequest {
            reason: Some(String::from("Zu wenige Spieler")),
            withdraw: false,
        },
        &captain(league.away),
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(released.status, "available");
    assert_eq!(released.home_team_id, None);
}

#[test]
fn test_team_cannot_block_slot() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());

    let result = block_slot(
        &mut league.persistence,
        slot.booking_id,
        &ReasonRequest::default(),
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_block_and_unblock() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    let admin = create_test_admin();

    let blocked = block_slot(
        &mut league.persistence,
        slot.booking_id,
        &ReasonRequest {
            reason: Some(String::from("Platzpflege")),
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(blocked.status, "blocked");
    assert!(
        list_available_bookings(&mut league.persistence, league.season_id, setup_time())
            .unwrap()
            .bookings
            .is_empty()
    );

    let reopened = unblock_slot(
        &mut league.persistence,
        slot.booking_id,
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(reopened.status, "available");
    assert_eq!(reopened.status_reason, None);
}

#[test]
fn test_override_sets_and_clears_teams() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    let admin = create_test_admin();

    let confirmed = override_booking(
        &mut league.persistence,
        slot.booking_id,
        &OverrideBookingRequest {
            status: BookingStatus::Confirmed,
            home_team_id: Some(league.other.value()),
            away_team_id: Some(league.home.value()),
            is_friendly: None,
            reason: Some(String::from("Nachholspiel")),
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(confirmed.status, "confirmed");
    assert_eq!(confirmed.home_team_id, Some(league.other.value()));

    let blocked = override_booking(
        &mut league.persistence,
        slot.booking_id,
        &OverrideBookingRequest {
            status: BookingStatus::Blocked,
            home_team_id: None,
            away_team_id: None,
            is_friendly: None,
            reason: None,
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(blocked.status, "blocked");
    assert_eq!(blocked.home_team_id, None);
    assert_eq!(blocked.away_team_id, None);
}

#[test]
fn test_override_to_confirmed_needs_teams() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());

    let result = override_booking(
        &mut league.persistence,
        slot.booking_id,
        &OverrideBookingRequest {
            status: BookingStatus::Confirmed,
            home_team_id: Some(league.home.value()),
            away_team_id: None,
            is_friendly: None,
            reason: None,
        },
        &create_test_admin(),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_slot_ending_past_calendar_range_is_invalid_input() {
    let mut league = setup_league();
    let request = CreateSlotRequest {
        starts_at: ExternalInstant::Text(String::from("9999-12-31T23:30:00Z")),
        ..league.slot_request(kickoff(), 90)
    };

    let err = create_slot(
        &mut league.persistence,
        &request,
        &create_test_admin(),
        create_test_cause(),
        setup_time(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));

    let err = check_slot_collision(
        &mut league.persistence,
        &CheckCollisionRequest {
            pitch_id: league.pitch_id,
            starts_at: ExternalInstant::Text(String::from("9999-12-31T23:30:00Z")),
            duration_minutes: 90,
            ignore_booking_id: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}
