// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Friendly release window.
//!
//! League slots that are still free shortly before kick-off are released for
//! friendly games. Slots marked friendly are open for friendlies at any time
//! and never accept league games.

use crate::booking::Booking;
use crate::error::DomainError;
use crate::season::Season;
use time::{Duration, OffsetDateTime};

/// Whether the slot is open for a friendly request at `now`.
#[must_use]
pub fn is_released_for_friendly(booking: &Booking, season: &Season, now: OffsetDateTime) -> bool {
    if booking.is_friendly {
        return true;
    }
    let window = Duration::hours(i64::from(season.friendly_games_release_hours));
    booking.starts_at - now < window
}

/// Checks the slot's friendly flag against the kind of game requested.
///
/// # Errors
///
/// - `DomainError::FriendlySlotForLeagueGame` for a league request on a
///   friendly slot
/// - `DomainError::FriendlyWindowNotOpen` for a friendly request on a league
///   slot that has not been released yet
pub fn ensure_friendly_rules(
    booking: &Booking,
    season: &Season,
    is_friendly: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if !is_friendly {
        if booking.is_friendly {
            return Err(DomainError::FriendlySlotForLeagueGame {
                booking_id: booking.booking_id,
            });
        }
        return Ok(());
    }

    if is_released_for_friendly(booking, season, now) {
        Ok(())
    } else {
        Err(DomainError::FriendlyWindowNotOpen {
            booking_id: booking.booking_id,
            hours_until_start: (booking.starts_at - now).whole_hours(),
            release_hours: season.friendly_games_release_hours,
        })
    }
}
