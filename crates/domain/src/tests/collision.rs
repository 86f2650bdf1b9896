// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{PITCH, TEAM_A, TEAM_B, base_time, create_test_booking, create_test_slot};
use crate::{
    Booking, BookingId, BookingStatus, DomainError, PitchId, TimeInterval, check_collision,
    ensure_no_collision, find_collisions,
};
use time::Duration;

#[test]
fn test_touching_intervals_do_not_overlap() {
    let first = TimeInterval::new(base_time(), 90);
    let second = TimeInterval::new(base_time() + Duration::minutes(90), 90);
    assert!(!first.overlaps(&second));
    assert!(!second.overlaps(&first));
}

#[test]
fn test_partial_overlap_is_detected_both_ways() {
    let first = TimeInterval::new(base_time(), 90);
    let second = TimeInterval::new(base_time() + Duration::minutes(89), 30);
    assert!(first.overlaps(&second));
    assert!(second.overlaps(&first));
}

#[test]
fn test_only_active_bookings_collide() {
    let existing = vec![
        create_test_slot(1, base_time(), 90),
        create_test_booking(2, base_time(), BookingStatus::Confirmed, TEAM_A, TEAM_B),
        create_test_booking(3, base_time(), BookingStatus::PendingAwayConfirm, TEAM_A, TEAM_B),
        {
            let mut blocked = create_test_slot(4, base_time(), 90);
            blocked.status = BookingStatus::Blocked;
            blocked
        },
        {
            let mut cancelled = create_test_slot(5, base_time(), 90);
            cancelled.status = BookingStatus::Cancelled;
            cancelled
        },
    ];

    let check = check_collision(&existing, PITCH, base_time() + Duration::minutes(30), 60, None);
    assert!(!check.available);
    assert_eq!(
        check.conflicting_booking_ids,
        vec![BookingId::new(2), BookingId::new(3)]
    );
}

#[test]
fn test_other_pitch_does_not_collide() {
    let existing = vec![create_test_booking(
        1,
        base_time(),
        BookingStatus::Confirmed,
        TEAM_A,
        TEAM_B,
    )];
    let check = check_collision(&existing, PitchId::new(99), base_time(), 90, None);
    assert!(check.available);
    assert!(check.conflicting_booking_ids.is_empty());
}

#[test]
fn test_ignore_excludes_the_booking_itself() {
    let booking = create_test_booking(1, base_time(), BookingStatus::Confirmed, TEAM_A, TEAM_B);
    let existing = vec![booking.clone()];

    assert!(ensure_no_collision(&existing, &booking).is_ok());
    let check = check_collision(&existing, PITCH, base_time(), 90, Some(BookingId::new(1)));
    assert!(check.available);
}

#[test]
fn test_ensure_no_collision_reports_conflicts() {
    let existing = vec![create_test_booking(
        7,
        base_time(),
        BookingStatus::Confirmed,
        TEAM_A,
        TEAM_B,
    )];
    let candidate = create_test_slot(8, base_time() + Duration::minutes(45), 90);

    match ensure_no_collision(&existing, &candidate) {
        Err(DomainError::SlotCollision {
            pitch_id,
            conflicting,
        }) => {
            assert_eq!(pitch_id, PITCH);
            assert_eq!(conflicting, vec![BookingId::new(7)]);
        }
        other => panic!("expected collision, got {other:?}"),
    }
}

#[test]
fn test_collision_check_is_idempotent() {
    let existing = vec![create_test_booking(
        1,
        base_time(),
        BookingStatus::Confirmed,
        TEAM_A,
        TEAM_B,
    )];
    let snapshot = existing.clone();

    let first = check_collision(&existing, PITCH, base_time(), 60, None);
    let second = check_collision(&existing, PITCH, base_time(), 60, None);
    assert_eq!(first, second);
    assert_eq!(existing, snapshot);
}

fn random_booking(id: i64) -> Booking {
    let offset = i64::from(rand::random::<u32>() % (7 * 24 * 4)) * 15;
    let minutes = 15 + (rand::random::<u32>() % 12) * 15;
    create_test_booking(
        id,
        base_time() + Duration::minutes(offset),
        BookingStatus::Confirmed,
        TEAM_A,
        TEAM_B,
    )
    .with_duration(minutes)
}

trait WithDuration {
    fn with_duration(self, minutes: u32) -> Self;
}

impl WithDuration for Booking {
    fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}

#[test]
fn test_confirmed_bookings_never_overlap_when_checked() {
    for _ in 0..50 {
        let mut confirmed: Vec<Booking> = Vec::new();
        for id in 1..=40 {
            let candidate = random_booking(id);
            if ensure_no_collision(&confirmed, &candidate).is_ok() {
                confirmed.push(candidate);
            }
        }

        for (i, a) in confirmed.iter().enumerate() {
            for b in &confirmed[i + 1..] {
                assert!(
                    !a.interval().overlaps(&b.interval()),
                    "bookings {:?} and {:?} overlap",
                    a.booking_id,
                    b.booking_id
                );
            }
        }
    }
}

#[test]
fn test_find_collisions_matches_brute_force() {
    for _ in 0..50 {
        let existing: Vec<Booking> = (1..=20).map(random_booking).collect();
        let candidate = random_booking(100);

        let expected: Vec<BookingId> = existing
            .iter()
            .filter(|b| {
                b.starts_at < candidate.ends_at() && candidate.starts_at < b.ends_at()
            })
            .filter_map(|b| b.booking_id)
            .collect();

        let found = find_collisions(&existing, PITCH, &candidate.interval(), None);
        assert_eq!(found, expected);
    }
}

#[test]
fn test_interval_end_saturates_at_calendar_limit() {
    let last_evening = time::macros::datetime!(9999-12-31 23:30 UTC);

    let interval = TimeInterval::new(last_evening, 90);

    assert!(interval.end > last_evening);
    assert!(interval.overlaps(&TimeInterval::new(last_evening, 10)));
}
