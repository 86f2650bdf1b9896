// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga::{
    ActingParty, BookingCommand, CancelDisposition, ResultCommand, ResultContext, ResultDecision,
    ResultTransition, admin_delete_result, apply_result_command, report_result,
};
use bunte_liga_audit::Actor;
use bunte_liga_domain::{Booking, BookingStatus, MatchResult, ResultId, ResultStatus};
use time::{Duration, OffsetDateTime};

use super::{Fixture, create_test_actor, create_test_cause, kickoff, setup};
use crate::PersistenceError;

fn after_match() -> OffsetDateTime {
    kickoff() + Duration::hours(2)
}

/// Decides a report by the home team against the results stored so far.
fn plan_report(fixture: &mut Fixture, booking: &Booking, home: u32, away: u32) -> ResultTransition {
    let booking_results = fixture
        .persistence
        .list_results_for_booking(booking.booking_id.unwrap())
        .unwrap();
    let ctx = ResultContext {
        season: &fixture.season,
        booking_results: &booking_results,
        now: after_match(),
    };
    report_result(
        &ctx,
        booking,
        home,
        away,
        ActingParty::Team(fixture.home),
        Actor::team(String::from("captain-home"), fixture.home),
        create_test_cause(),
    )
    .unwrap()
}

fn confirm(fixture: &mut Fixture, result: &MatchResult) -> ResultTransition {
    let ctx = ResultContext {
        season: &fixture.season,
        booking_results: &[],
        now: after_match(),
    };
    apply_result_command(
        &ctx,
        result,
        ResultCommand::Respond {
            decision: ResultDecision::Confirm,
            reason: None,
        },
        ActingParty::Team(fixture.away),
        Actor::team(String::from("captain-away"), fixture.away),
        create_test_cause(),
    )
    .unwrap()
}

fn played_match(fixture: &mut Fixture) -> Booking {
    let slot = fixture.store_slot(kickoff(), 90);
    fixture.confirm_match(&slot)
}

#[test]
fn test_report_is_persisted_as_pending() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);

    let transition = plan_report(&mut fixture, &booking, 3, 1);
    let stored = fixture.persistence.insert_result(&transition).unwrap();

    let loaded = fixture
        .persistence
        .get_result(stored.result_id.unwrap())
        .unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(loaded.status, ResultStatus::Pending);
    assert_eq!(loaded.reported_by, Some(fixture.home));
    assert_eq!((loaded.home_score, loaded.away_score), (3, 1));
    assert_eq!(loaded.booking_id, booking.booking_id);
}

#[test]
fn test_concurrent_second_report_is_rejected() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);

    // Both reports are decided before either is stored.
    let first = plan_report(&mut fixture, &booking, 3, 1);
    let second = plan_report(&mut fixture, &booking, 1, 3);
    fixture.persistence.insert_result(&first).unwrap();

    let result = fixture.persistence.insert_result(&second);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateResult {
            booking_id: booking.booking_id.unwrap()
        })
    );
    assert_eq!(
        fixture
            .persistence
            .list_results_for_booking(booking.booking_id.unwrap())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_confirm_is_persisted_once() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let report = plan_report(&mut fixture, &booking, 2, 2);
    let pending = fixture.persistence.insert_result(&report).unwrap();

    let confirmation = confirm(&mut fixture, &pending);
    let confirmed = fixture
        .persistence
        .commit_result_transition(&confirmation, ResultStatus::Pending)
        .unwrap();
    assert_eq!(confirmed.status, ResultStatus::Confirmed);

    let replay = fixture
        .persistence
        .commit_result_transition(&confirmation, ResultStatus::Pending);
    assert!(matches!(
        replay,
        Err(PersistenceError::StaleTransition {
            entity: "result",
            ..
        })
    ));
}

#[test]
fn test_rejected_result_allows_new_report() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let report = plan_report(&mut fixture, &booking, 5, 0);
    let pending = fixture.persistence.insert_result(&report).unwrap();

    let ctx = ResultContext {
        season: &fixture.season,
        booking_results: &[],
        now: after_match(),
    };
    let rejection = apply_result_command(
        &ctx,
        &pending,
        ResultCommand::Respond {
            decision: ResultDecision::Reject,
            reason: Some(String::from("Falsches Ergebnis")),
        },
        ActingParty::Team(fixture.away),
        Actor::team(String::from("captain-away"), fixture.away),
        create_test_cause(),
    )
    .unwrap();
    fixture
        .persistence
        .commit_result_transition(&rejection, ResultStatus::Pending)
        .unwrap();

    let second = plan_report(&mut fixture, &booking, 4, 0);
    let stored = fixture.persistence.insert_result(&second).unwrap();

    assert_eq!(stored.status, ResultStatus::Pending);
    let all = fixture
        .persistence
        .list_results_for_booking(booking.booking_id.unwrap())
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_delete_result_removes_row() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let report = plan_report(&mut fixture, &booking, 1, 0);
    let stored = fixture.persistence.insert_result(&report).unwrap();
    let result_id = stored.result_id.unwrap();

    let event = admin_delete_result(
        &stored,
        ActingParty::Admin,
        after_match(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    fixture.persistence.delete_result(result_id, &event).unwrap();

    assert!(matches!(
        fixture.persistence.get_result(result_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(
        fixture
            .persistence
            .list_results_for_season(fixture.season.season_id.unwrap())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_deleting_missing_result_is_not_found() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let report = plan_report(&mut fixture, &booking, 1, 0);
    let stored = fixture.persistence.insert_result(&report).unwrap();
    let event = admin_delete_result(
        &stored,
        ActingParty::Admin,
        after_match(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let result = fixture.persistence.delete_result(ResultId::new(404), &event);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_report_for_cancelled_booking_is_stale() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let transition = plan_report(&mut fixture, &booking, 2, 0);

    fixture
        .run(
            &booking,
            BookingCommand::Cancel {
                reason: None,
                disposition: CancelDisposition::Withdraw,
            },
            ActingParty::Admin,
        )
        .unwrap();

    let result = fixture.persistence.insert_result(&transition);

    assert_eq!(
        result,
        Err(PersistenceError::StaleTransition {
            entity: "booking",
            id: booking.booking_id.unwrap().value(),
            expected_status: String::from("confirmed"),
        })
    );
    assert!(
        fixture
            .persistence
            .list_results_for_booking(booking.booking_id.unwrap())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_report_takes_friendly_flag_from_stored_booking() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let transition = plan_report(&mut fixture, &booking, 2, 0);
    assert!(!transition.new_result.is_friendly);

    fixture
        .run(
            &booking,
            BookingCommand::UpdateSlot {
                pitch_id: None,
                starts_at: None,
                duration_minutes: None,
                is_friendly: Some(true),
                contact: None,
            },
            ActingParty::Admin,
        )
        .unwrap();
    let stored = fixture.persistence.insert_result(&transition).unwrap();

    assert!(stored.is_friendly);
    let loaded = fixture
        .persistence
        .get_result(stored.result_id.unwrap())
        .unwrap();
    assert!(loaded.is_friendly);
    assert!(!loaded.counts_for_standings());
}

#[test]
fn test_booking_friendly_flag_carries_over_to_results() {
    let mut fixture = setup();
    let booking = played_match(&mut fixture);
    let transition = plan_report(&mut fixture, &booking, 1, 1);
    let pending = fixture.persistence.insert_result(&transition).unwrap();
    let confirmation = confirm(&mut fixture, &pending);
    let confirmed = fixture
        .persistence
        .commit_result_transition(&confirmation, ResultStatus::Pending)
        .unwrap();
    assert!(confirmed.counts_for_standings());

    let friendly = fixture
        .run(
            &booking,
            BookingCommand::UpdateSlot {
                pitch_id: None,
                starts_at: None,
                duration_minutes: None,
                is_friendly: Some(true),
                contact: None,
            },
            ActingParty::Admin,
        )
        .unwrap();
    assert_eq!(friendly.status, BookingStatus::Confirmed);

    let loaded = fixture
        .persistence
        .get_result(pending.result_id.unwrap())
        .unwrap();
    assert!(loaded.is_friendly);
    assert!(!loaded.counts_for_standings());
}
