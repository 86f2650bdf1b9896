// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Instants, the league time zone and display formatting.
//!
//! Internally every instant is a `time::OffsetDateTime`. Values arriving from
//! outside (RFC 3339 strings, Unix milliseconds, or `{seconds, nanoseconds}`
//! timestamp objects written by older clients) are coerced once, through
//! [`ExternalInstant`]. Wall-clock conversion for the league's fixed zone
//! goes through `chrono-tz`.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// All wall-clock times in the league are Berlin local time.
pub const LEAGUE_TIMEZONE: Tz = chrono_tz::Europe::Berlin;

/// An instant as accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExternalInstant {
    /// RFC 3339 text, e.g. `2025-06-01T14:00:00+02:00`.
    Text(String),
    /// Milliseconds since the Unix epoch.
    UnixMillis(i64),
    /// Timestamp object with whole seconds and a nanosecond part.
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl ExternalInstant {
    /// Coerces the external value into an instant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the value cannot be parsed
    /// or is out of range.
    pub fn to_instant(&self) -> Result<OffsetDateTime, DomainError> {
        match self {
            Self::Text(text) => {
                OffsetDateTime::parse(text.trim(), &Rfc3339).map_err(|e| {
                    DomainError::InvalidTimestamp {
                        value: text.clone(),
                        reason: e.to_string(),
                    }
                })
            }
            Self::UnixMillis(millis) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(*millis) * 1_000_000)
                    .map_err(|e| DomainError::InvalidTimestamp {
                        value: millis.to_string(),
                        reason: e.to_string(),
                    })
            }
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => {
                let value = format!("{{seconds: {seconds}, nanoseconds: {nanoseconds}}}");
                if *nanoseconds >= 1_000_000_000 {
                    return Err(DomainError::InvalidTimestamp {
                        value,
                        reason: String::from("nanoseconds out of range"),
                    });
                }
                OffsetDateTime::from_unix_timestamp_nanos(
                    i128::from(*seconds) * 1_000_000_000 + i128::from(*nanoseconds),
                )
                .map_err(|e| DomainError::InvalidTimestamp {
                    value,
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl TryFrom<&ExternalInstant> for OffsetDateTime {
    type Error = DomainError;

    fn try_from(value: &ExternalInstant) -> Result<Self, Self::Error> {
        value.to_instant()
    }
}

/// Formats an instant as RFC 3339 in UTC.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if formatting fails.
pub fn to_rfc3339(instant: OffsetDateTime) -> Result<String, DomainError> {
    instant
        .to_offset(time::UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| DomainError::InvalidTimestamp {
            value: instant.unix_timestamp().to_string(),
            reason: e.to_string(),
        })
}

/// Converts an instant to league local time.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the instant is outside the
/// range supported by the time zone database.
pub fn to_league_local(instant: OffsetDateTime) -> Result<DateTime<Tz>, DomainError> {
    DateTime::from_timestamp(instant.unix_timestamp(), instant.nanosecond())
        .map(|utc| utc.with_timezone(&LEAGUE_TIMEZONE))
        .ok_or_else(|| DomainError::InvalidTimestamp {
            value: instant.unix_timestamp().to_string(),
            reason: String::from("instant outside supported range"),
        })
}

/// `dd.mm.yyyy` in league local time.
///
/// # Errors
///
/// See [`to_league_local`].
pub fn format_date(instant: OffsetDateTime) -> Result<String, DomainError> {
    Ok(to_league_local(instant)?.format("%d.%m.%Y").to_string())
}

/// `HH:MM` in league local time.
///
/// # Errors
///
/// See [`to_league_local`].
pub fn format_time(instant: OffsetDateTime) -> Result<String, DomainError> {
    Ok(to_league_local(instant)?.format("%H:%M").to_string())
}

/// `dd.mm.yyyy, HH:MM` in league local time.
///
/// # Errors
///
/// See [`to_league_local`].
pub fn format_date_time(instant: OffsetDateTime) -> Result<String, DomainError> {
    Ok(to_league_local(instant)?
        .format("%d.%m.%Y, %H:%M")
        .to_string())
}

/// Resolves a league wall-clock date and time to an instant.
///
/// # Errors
///
/// Returns `DomainError::InvalidSchedule` if the local time does not exist
/// or is ambiguous (daylight saving switch), or the date is out of range.
pub fn league_local_to_utc(
    date: time::Date,
    local_time: time::Time,
) -> Result<OffsetDateTime, DomainError> {
    let naive_date = NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::InvalidSchedule {
        reason: format!("Invalid date: {date}"),
    })?;
    let naive_time = NaiveTime::from_hms_opt(
        u32::from(local_time.hour()),
        u32::from(local_time.minute()),
        u32::from(local_time.second()),
    )
    .ok_or_else(|| DomainError::InvalidSchedule {
        reason: format!("Invalid time: {local_time}"),
    })?;

    let local = LEAGUE_TIMEZONE
        .from_local_datetime(&naive_date.and_time(naive_time))
        .single()
        .ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!(
                "{date} {local_time} does not resolve to a single instant in {LEAGUE_TIMEZONE}"
            ),
        })?;

    OffsetDateTime::from_unix_timestamp(local.timestamp()).map_err(|e| {
        DomainError::InvalidSchedule {
            reason: e.to_string(),
        }
    })
}
