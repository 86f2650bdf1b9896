// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot collision detection.
//!
//! The same functions back the advisory collision check offered to clients
//! and the authoritative re-check performed when a transition is committed.
//! Only active bookings (`pending_away_confirm` and `confirmed`) occupy a
//! pitch.

use crate::booking::Booking;
use crate::error::DomainError;
use crate::types::{BookingId, PitchId};
use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl TimeInterval {
    /// The end saturates at the largest representable instant.
    #[must_use]
    pub fn new(start: OffsetDateTime, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(Duration::minutes(i64::from(duration_minutes))),
        }
    }

    /// Touching intervals (one ends where the other starts) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Outcome of a collision check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionCheck {
    pub available: bool,
    pub conflicting_booking_ids: Vec<BookingId>,
}

/// Returns the ids of active bookings on `pitch_id` that overlap `candidate`.
///
/// `ignore` excludes one booking, typically the one being updated. Bookings
/// that have not been persisted yet are never reported.
#[must_use]
pub fn find_collisions(
    existing: &[Booking],
    pitch_id: PitchId,
    candidate: &TimeInterval,
    ignore: Option<BookingId>,
) -> Vec<BookingId> {
    let mut ids: Vec<BookingId> = existing
        .iter()
        .filter(|b| b.pitch_id == pitch_id && b.status.is_active())
        .filter(|b| ignore.is_none() || b.booking_id != ignore)
        .filter(|b| b.interval().overlaps(candidate))
        .filter_map(|b| b.booking_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Read-only collision check for a prospective slot.
#[must_use]
pub fn check_collision(
    existing: &[Booking],
    pitch_id: PitchId,
    starts_at: OffsetDateTime,
    duration_minutes: u32,
    ignore: Option<BookingId>,
) -> CollisionCheck {
    let candidate = TimeInterval::new(starts_at, duration_minutes);
    let conflicting_booking_ids = find_collisions(existing, pitch_id, &candidate, ignore);
    CollisionCheck {
        available: conflicting_booking_ids.is_empty(),
        conflicting_booking_ids,
    }
}

/// Fails if `booking` would overlap another active booking on its pitch.
///
/// # Errors
///
/// Returns `DomainError::SlotCollision` listing the conflicting bookings.
pub fn ensure_no_collision(existing: &[Booking], booking: &Booking) -> Result<(), DomainError> {
    let conflicting = find_collisions(
        existing,
        booking.pitch_id,
        &booking.interval(),
        booking.booking_id,
    );
    if conflicting.is_empty() {
        Ok(())
    } else {
        Err(DomainError::SlotCollision {
            pitch_id: booking.pitch_id,
            conflicting,
        })
    }
}
