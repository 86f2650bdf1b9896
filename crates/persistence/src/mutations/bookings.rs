// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.
//!
//! The collision check and the rematch limit are repeated here against the
//! rows visible inside the write transaction, so two concurrent requests for
//! overlapping slots or for the same pairing cannot both commit.

use bunte_liga::BookingTransition;
use bunte_liga_audit::EntityRef;
use bunte_liga_domain::{Booking, BookingId, BookingStatus, ensure_rematch_allowed, find_collisions};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{info, warn};

use crate::backend::get_last_insert_rowid;
use crate::data_models::BookingValues;
use crate::diesel_schema::{bookings, match_results};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::bookings::{get_booking, list_bookings_for_pitch, list_bookings_for_season};
use crate::queries::results::list_results_for_season;
use crate::queries::seasons::get_season;

fn recheck_collisions(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let pitch_bookings = list_bookings_for_pitch(conn, booking.pitch_id)?;
    let conflicting = find_collisions(
        &pitch_bookings,
        booking.pitch_id,
        &booking.interval(),
        booking.booking_id,
    );
    if conflicting.is_empty() {
        Ok(())
    } else {
        warn!(
            pitch_id = %booking.pitch_id,
            conflicts = conflicting.len(),
            "Collision detected at commit"
        );
        Err(PersistenceError::SlotCollision { conflicting })
    }
}

/// Fails if entering `booking` as a league fixture would exceed the pair's
/// meeting limit.
///
/// Only checked for negotiated transitions that make the fixture new to the
/// pairing: the status, the teams or the friendly flag changed.
fn recheck_rematch_limit(
    conn: &mut SqliteConnection,
    stored: &Booking,
    transition: &BookingTransition,
) -> Result<(), PersistenceError> {
    let booking = &transition.new_booking;
    let Some((home, away)) = booking.teams() else {
        return Ok(());
    };
    if !transition.enforce_rematch_limit || !booking.status.is_active() || booking.is_friendly {
        return Ok(());
    }
    let unchanged = stored.status == booking.status
        && stored.teams() == booking.teams()
        && !stored.is_friendly;
    if unchanged {
        return Ok(());
    }

    let season = get_season(conn, booking.season_id)?;
    let season_bookings = list_bookings_for_season(conn, booking.season_id)?;
    let season_results = list_results_for_season(conn, booking.season_id)?;
    ensure_rematch_allowed(
        &season,
        &season_bookings,
        &season_results,
        home,
        away,
        booking.booking_id,
    )
    .map_err(|err| {
        warn!(
            booking_id = ?booking.booking_id,
            %home,
            %away,
            "Rematch limit reached at commit"
        );
        PersistenceError::RuleViolation(err)
    })
}

/// Keeps the friendly flag of the booking's results in line with the
/// booking.
fn sync_result_friendly_flag(
    conn: &mut SqliteConnection,
    booking_id: BookingId,
    is_friendly: bool,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        match_results::table.filter(match_results::booking_id.eq(booking_id.value())),
    )
    .set(match_results::is_friendly.eq(is_friendly))
    .execute(conn)?;
    if updated > 0 {
        info!(%booking_id, is_friendly, results = updated, "Updated friendly flag of results");
    }
    Ok(())
}

/// Inserts a new slot.
///
/// # Errors
///
/// Returns `PersistenceError::SlotCollision` if the slot overlaps an active
/// booking on the pitch.
pub fn insert_slot(
    conn: &mut SqliteConnection,
    transition: &BookingTransition,
) -> Result<Booking, PersistenceError> {
    let slot = &transition.new_booking;
    conn.immediate_transaction(|conn| {
        recheck_collisions(conn, slot)?;

        diesel::insert_into(bookings::table)
            .values(&BookingValues::from_domain(slot)?)
            .execute(conn)?;
        let booking_id = BookingId::new(get_last_insert_rowid(conn)?);
        let event = transition
            .audit_event
            .clone()
            .with_entity(EntityRef::Booking(booking_id));
        persist_audit_event(conn, &event)?;

        info!(
            %booking_id,
            pitch_id = %slot.pitch_id,
            starts_at = %slot.starts_at,
            "Created slot"
        );
        let mut created = slot.clone();
        created.booking_id = Some(booking_id);
        Ok(created)
    })
}

/// Commits a booking transition if the booking is still in
/// `expected_status`.
///
/// # Errors
///
/// Returns an error if:
/// - The booking is gone (`NotFound`)
/// - Its status changed since it was read (`StaleTransition`)
/// - It now overlaps an active booking (`SlotCollision`)
/// - The pairing has used up its league fixtures (`RuleViolation`)
pub fn commit_booking_transition(
    conn: &mut SqliteConnection,
    transition: &BookingTransition,
    expected_status: BookingStatus,
) -> Result<Booking, PersistenceError> {
    let booking = &transition.new_booking;
    let booking_id = booking
        .booking_id
        .ok_or(PersistenceError::MissingId("booking"))?;

    conn.immediate_transaction(|conn| {
        let stored = get_booking(conn, booking_id)?;
        let moved = stored.pitch_id != booking.pitch_id || stored.interval() != booking.interval();
        if booking.status.is_active() || moved {
            recheck_collisions(conn, booking)?;
        }
        recheck_rematch_limit(conn, &stored, transition)?;

        let updated = diesel::update(
            bookings::table
                .filter(bookings::booking_id.eq(booking_id.value()))
                .filter(bookings::status.eq(expected_status.as_str())),
        )
        .set(&BookingValues::from_domain(booking)?)
        .execute(conn)?;
        if updated == 0 {
            warn!(
                %booking_id,
                expected = %expected_status,
                actual = %stored.status,
                "Stale booking transition"
            );
            return Err(PersistenceError::StaleTransition {
                entity: "booking",
                id: booking_id.value(),
                expected_status: expected_status.as_str().to_string(),
            });
        }
        if stored.is_friendly != booking.is_friendly {
            sync_result_friendly_flag(conn, booking_id, booking.is_friendly)?;
        }

        persist_audit_event(conn, &transition.audit_event)?;
        info!(
            %booking_id,
            from = %expected_status,
            to = %booking.status,
            "Committed booking transition"
        );
        Ok(booking.clone())
    })
}
