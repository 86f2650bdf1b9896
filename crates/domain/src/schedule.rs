// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly slot templates for bulk slot creation.
//!
//! A template names a pitch, a date range, weekdays and local kick-off times.
//! Expansion yields one slot per matching day and start time, resolved in the
//! league time zone.

use crate::booking::MAX_DURATION_MINUTES;
use crate::datetime::league_local_to_utc;
use crate::error::DomainError;
use crate::types::PitchId;
use time::{Date, OffsetDateTime, Time, Weekday};

/// Longest date range a template may cover.
pub const MAX_TEMPLATE_DAYS: i64 = 366;

/// A single slot to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub pitch_id: PitchId,
    pub starts_at: OffsetDateTime,
    pub duration_minutes: u32,
    pub is_friendly: bool,
}

/// Weekly recurring slots on one pitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    pub pitch_id: PitchId,
    pub first_date: Date,
    pub last_date: Date,
    pub weekdays: Vec<Weekday>,
    /// Kick-off times in league local time.
    pub start_times: Vec<Time>,
    pub duration_minutes: u32,
    pub is_friendly: bool,
}

impl SlotTemplate {
    /// Expands the template into concrete slots, ordered by start.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidSchedule` for an empty or inverted range, a
    ///   range longer than a year, no weekdays or start times, or a local
    ///   time that does not exist on a daylight saving switch
    /// - `DomainError::InvalidDuration` for a zero or over-long duration
    pub fn expand(&self) -> Result<Vec<SlotSpec>, DomainError> {
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(DomainError::InvalidDuration {
                minutes: self.duration_minutes,
            });
        }
        if self.last_date < self.first_date {
            return Err(DomainError::InvalidSchedule {
                reason: format!(
                    "last date {} is before first date {}",
                    self.last_date, self.first_date
                ),
            });
        }
        if (self.last_date - self.first_date).whole_days() >= MAX_TEMPLATE_DAYS {
            return Err(DomainError::InvalidSchedule {
                reason: format!("date range exceeds {MAX_TEMPLATE_DAYS} days"),
            });
        }
        if self.weekdays.is_empty() || self.start_times.is_empty() {
            return Err(DomainError::InvalidSchedule {
                reason: String::from("at least one weekday and one start time are required"),
            });
        }

        let mut times = self.start_times.clone();
        times.sort_unstable();
        times.dedup();

        let mut slots = Vec::new();
        let mut day = self.first_date;
        loop {
            if self.weekdays.contains(&day.weekday()) {
                for start in &times {
                    slots.push(SlotSpec {
                        pitch_id: self.pitch_id,
                        starts_at: league_local_to_utc(day, *start)?,
                        duration_minutes: self.duration_minutes,
                        is_friendly: self.is_friendly,
                    });
                }
            }
            if day >= self.last_date {
                break;
            }
            day = day
                .next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("advancing past {day}"),
                })?;
        }
        Ok(slots)
    }
}

/// Parses an English weekday name or its three letter abbreviation.
///
/// # Errors
///
/// Returns `DomainError::InvalidSchedule` for anything else.
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        "sunday" | "sun" => Ok(Weekday::Sunday),
        other => Err(DomainError::InvalidSchedule {
            reason: format!("unknown weekday '{other}'"),
        }),
    }
}
