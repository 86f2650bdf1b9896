// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use bunte_liga_domain::{Booking, BookingId, BookingStatus, PitchId, SeasonId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;

use crate::data_models::{BookingRow, to_unix};
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

fn into_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, PersistenceError> {
    rows.into_iter().map(Booking::try_from).collect()
}

/// Loads a booking.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the booking does not exist.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: BookingId,
) -> Result<Booking, PersistenceError> {
    bookings::table
        .filter(bookings::booking_id.eq(booking_id.value()))
        .select(BookingRow::as_select())
        .first::<BookingRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("booking {booking_id}")))?
        .try_into()
}

/// Lists the bookings of a season in kick-off order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_bookings_for_season(
    conn: &mut SqliteConnection,
    season_id: SeasonId,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows = bookings::table
        .filter(bookings::season_id.eq(season_id.value()))
        .order((bookings::starts_at.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?;
    into_bookings(rows)
}

/// Lists every booking on a pitch across all seasons.
///
/// This is the input of the collision check.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_bookings_for_pitch(
    conn: &mut SqliteConnection,
    pitch_id: PitchId,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows = bookings::table
        .filter(bookings::pitch_id.eq(pitch_id.value()))
        .order((bookings::starts_at.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?;
    into_bookings(rows)
}

/// Lists the season's open slots that have not started yet.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_available_bookings(
    conn: &mut SqliteConnection,
    season_id: SeasonId,
    now: OffsetDateTime,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows = bookings::table
        .filter(bookings::season_id.eq(season_id.value()))
        .filter(bookings::status.eq(BookingStatus::Available.as_str()))
        .filter(bookings::starts_at.gt(to_unix(now)))
        .order((bookings::starts_at.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?;
    into_bookings(rows)
}
