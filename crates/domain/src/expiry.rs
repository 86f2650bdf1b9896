// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Countdown shown next to open booking requests.
//!
//! Expiry is informational only; nothing transitions a booking when the
//! countdown runs out.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// Label shown once the request window has passed.
pub const EXPIRED_LABEL: &str = "Abgelaufen";

/// Remaining time of a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryInfo {
    pub is_expired: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub label: String,
}

/// Computes `requested_at + expiry_days - now` and its German label.
#[must_use]
pub fn request_expiry_info(
    requested_at: OffsetDateTime,
    expiry_days: u32,
    now: OffsetDateTime,
) -> ExpiryInfo {
    let remaining = requested_at + Duration::days(i64::from(expiry_days)) - now;
    if remaining <= Duration::ZERO {
        return ExpiryInfo {
            is_expired: true,
            days: 0,
            hours: 0,
            minutes: 0,
            label: EXPIRED_LABEL.to_string(),
        };
    }

    let days = remaining.whole_days();
    let hours = remaining.whole_hours() % 24;
    let minutes = remaining.whole_minutes() % 60;

    let label = if days > 0 {
        let unit = if days == 1 { "Tag" } else { "Tage" };
        format!("{days} {unit}, {hours} Std.")
    } else if hours > 0 {
        format!("{hours} Std., {minutes} Min.")
    } else {
        format!("{minutes} Min.")
    };

    ExpiryInfo {
        is_expired: false,
        days,
        hours,
        minutes,
        label,
    }
}
