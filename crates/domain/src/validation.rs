// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::MAX_DURATION_MINUTES;
use crate::error::DomainError;
use crate::season::Season;
use crate::types::{Pitch, Team, TeamId};
use time::{Duration, OffsetDateTime};

/// Longest accepted display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted deny/cancel/reject reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// Most goals one side can score in a single match.
pub const MAX_SCORE: u32 = 99;

fn validate_name(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName {
            field,
            reason: String::from("cannot be empty"),
        });
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName {
            field,
            reason: format!("cannot be longer than {MAX_NAME_LENGTH} characters"),
        });
    }
    Ok(())
}

/// Validates a team's basic fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name or short name is empty
/// or too long.
pub fn validate_team_fields(team: &Team) -> Result<(), DomainError> {
    validate_name("team name", &team.name)?;
    if let Some(short_name) = &team.short_name {
        validate_name("short name", short_name)?;
    }
    Ok(())
}

/// Validates a pitch's basic fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or too long, or
/// on the `weekly limit` field if the limit is set to zero.
pub fn validate_pitch_fields(pitch: &Pitch) -> Result<(), DomainError> {
    validate_name("pitch name", &pitch.name)?;
    if pitch.weekly_limit == Some(0) {
        return Err(DomainError::InvalidName {
            field: "weekly limit",
            reason: String::from("must be at least 1 when set"),
        });
    }
    Ok(())
}

/// Validates a season's name, year and settings.
///
/// # Errors
///
/// - `DomainError::InvalidName` for an empty or too long name
/// - `DomainError::InvalidSeasonSetting` for a year outside 2000..=2100,
///   an expiry of zero or more than 60 days, a release window above
///   14 days, or an empty or duplicated ranking criteria list
pub fn validate_season_settings(season: &Season) -> Result<(), DomainError> {
    validate_name("season name", &season.name)?;

    if !(2000..=2100).contains(&season.year) {
        return Err(DomainError::InvalidSeasonSetting {
            field: "year",
            reason: format!("must be between 2000 and 2100, got {}", season.year),
        });
    }
    if !(1..=60).contains(&season.request_expiry_days) {
        return Err(DomainError::InvalidSeasonSetting {
            field: "request_expiry_days",
            reason: format!(
                "must be between 1 and 60, got {}",
                season.request_expiry_days
            ),
        });
    }
    if season.friendly_games_release_hours > 14 * 24 {
        return Err(DomainError::InvalidSeasonSetting {
            field: "friendly_games_release_hours",
            reason: format!(
                "must not exceed 336, got {}",
                season.friendly_games_release_hours
            ),
        });
    }
    if season.ranking_criteria.is_empty() {
        return Err(DomainError::InvalidSeasonSetting {
            field: "ranking_criteria",
            reason: String::from("at least one criterion is required"),
        });
    }
    for (index, criterion) in season.ranking_criteria.iter().enumerate() {
        if season.ranking_criteria[..index].contains(criterion) {
            return Err(DomainError::InvalidSeasonSetting {
                field: "ranking_criteria",
                reason: format!("'{}' is listed twice", criterion.as_str()),
            });
        }
    }
    Ok(())
}

/// Validates a slot duration in minutes.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` unless `1..=1440`.
pub const fn validate_duration(minutes: u32) -> Result<(), DomainError> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::InvalidDuration { minutes });
    }
    Ok(())
}

/// Validates a slot's duration and that its end is representable.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` for a bad duration and
/// `DomainError::DateArithmeticOverflow` if the slot would end past the
/// supported calendar range.
pub fn validate_slot_time(starts_at: OffsetDateTime, minutes: u32) -> Result<(), DomainError> {
    validate_duration(minutes)?;
    starts_at
        .checked_add(Duration::minutes(i64::from(minutes)))
        .map(|_| ())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!(
                "computing the end of a {minutes} minute slot starting {starts_at}"
            ),
        })
}

/// Validates a match score.
///
/// # Errors
///
/// Returns `DomainError::InvalidScore` if either side is above `MAX_SCORE`.
pub const fn validate_score(home: u32, away: u32) -> Result<(), DomainError> {
    if home > MAX_SCORE || away > MAX_SCORE {
        return Err(DomainError::InvalidScore { home, away });
    }
    Ok(())
}

/// Validates a home/away pairing.
///
/// # Errors
///
/// Returns `DomainError::SameTeam` if both sides are the same team.
pub fn validate_pairing(home_team_id: TeamId, away_team_id: TeamId) -> Result<(), DomainError> {
    if home_team_id == away_team_id {
        return Err(DomainError::SameTeam(home_team_id));
    }
    Ok(())
}

/// Normalises a free-text reason: trims, drops empty values, caps the length.
#[must_use]
pub fn normalize_reason(reason: Option<&str>) -> Option<String> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| r.chars().take(MAX_REASON_LENGTH).collect())
}
