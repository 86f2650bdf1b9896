// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

use bunte_liga_domain::{
    AllTimeStats, Booking, BookingId, BookingStatus, ContactInfo, MatchResult, Pitch, PitchId,
    PlayMode, RankingCriterion, RegistrationStatus, ResultId, ResultStatus, Season, SeasonId,
    SeasonStatus, SeasonTeam, Team, TeamId,
};

use crate::diesel_schema::{bookings, match_results, pitches, season_teams, seasons, teams};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub kind: String,
    pub team_id: Option<i64>,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

pub(crate) const fn to_unix(instant: OffsetDateTime) -> i64 {
    instant.unix_timestamp()
}

pub(crate) fn from_unix(seconds: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp(seconds).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp {seconds}: {e}"))
    })
}

pub(crate) fn to_db_int(field: &str, value: u32) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::SerializationError(format!("{field} out of range")))
}

pub(crate) fn from_db_int(field: &str, value: i32) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("{field} out of range")))
}

fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, PersistenceError> {
    value.parse::<T>().map_err(|_| {
        PersistenceError::ReconstructionError(format!("Invalid {field} '{value}'"))
    })
}

// ============================================================================
// Seasons
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = seasons)]
pub struct SeasonRow {
    pub season_id: i64,
    pub name: String,
    pub year: i32,
    pub status: String,
    pub is_current: bool,
    pub play_mode: String,
    pub ranking_criteria: String,
    pub request_expiry_days: i32,
    pub friendly_games_release_hours: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = season_teams)]
pub struct SeasonTeamRow {
    pub season_id: i64,
    pub team_id: i64,
    pub status: String,
}

impl SeasonRow {
    pub fn into_domain(self, registrations: &[SeasonTeamRow]) -> Result<Season, PersistenceError> {
        let teams = registrations
            .iter()
            .filter(|r| r.season_id == self.season_id)
            .map(|r| {
                Ok(SeasonTeam {
                    team_id: TeamId::new(r.team_id),
                    status: parse::<RegistrationStatus>("registration status", &r.status)?,
                })
            })
            .collect::<Result<Vec<_>, PersistenceError>>()?;

        Ok(Season {
            season_id: Some(SeasonId::new(self.season_id)),
            name: self.name,
            year: self
                .year
                .to_u16()
                .ok_or_else(|| PersistenceError::ReconstructionError("Year out of range".into()))?,
            status: parse::<SeasonStatus>("season status", &self.status)?,
            is_current: self.is_current,
            play_mode: parse::<PlayMode>("play mode", &self.play_mode)?,
            ranking_criteria: RankingCriterion::parse_list(&self.ranking_criteria).map_err(|e| {
                PersistenceError::ReconstructionError(format!("Invalid ranking criteria: {e}"))
            })?,
            request_expiry_days: from_db_int("request_expiry_days", self.request_expiry_days)?,
            friendly_games_release_hours: from_db_int(
                "friendly_games_release_hours",
                self.friendly_games_release_hours,
            )?,
            teams,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = seasons)]
#[diesel(treat_none_as_null = true)]
pub struct SeasonValues {
    pub name: String,
    pub year: i32,
    pub status: String,
    pub is_current: bool,
    pub play_mode: String,
    pub ranking_criteria: String,
    pub request_expiry_days: i32,
    pub friendly_games_release_hours: i32,
}

impl SeasonValues {
    pub fn from_domain(season: &Season) -> Result<Self, PersistenceError> {
        Ok(Self {
            name: season.name.clone(),
            year: i32::from(season.year),
            status: season.status.as_str().to_string(),
            is_current: season.is_current,
            play_mode: season.play_mode.as_str().to_string(),
            ranking_criteria: RankingCriterion::join_list(&season.ranking_criteria),
            request_expiry_days: to_db_int("request_expiry_days", season.request_expiry_days)?,
            friendly_games_release_hours: to_db_int(
                "friendly_games_release_hours",
                season.friendly_games_release_hours,
            )?,
        })
    }
}

// ============================================================================
// Teams
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = teams)]
pub struct TeamRow {
    pub team_id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub colors: Option<String>,
    pub logo_ref: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub all_time_games: i32,
    pub all_time_goals_for: i32,
    pub all_time_goals_against: i32,
    pub all_time_points: i32,
}

impl TryFrom<TeamRow> for Team {
    type Error = PersistenceError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Self {
            team_id: Some(TeamId::new(row.team_id)),
            name: row.name,
            short_name: row.short_name,
            colors: row.colors,
            logo_ref: row.logo_ref,
            contact: ContactInfo {
                name: row.contact_name,
                email: row.contact_email,
                phone: row.contact_phone,
            },
            all_time: AllTimeStats {
                games: from_db_int("all_time_games", row.all_time_games)?,
                goals_for: from_db_int("all_time_goals_for", row.all_time_goals_for)?,
                goals_against: from_db_int("all_time_goals_against", row.all_time_goals_against)?,
                points: from_db_int("all_time_points", row.all_time_points)?,
            },
        })
    }
}

/// Team columns an admin edits. All-time statistics are written separately.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = teams)]
#[diesel(treat_none_as_null = true)]
pub struct TeamValues {
    pub name: String,
    pub short_name: Option<String>,
    pub colors: Option<String>,
    pub logo_ref: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl From<&Team> for TeamValues {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            short_name: team.short_name.clone(),
            colors: team.colors.clone(),
            logo_ref: team.logo_ref.clone(),
            contact_name: team.contact.name.clone(),
            contact_email: team.contact.email.clone(),
            contact_phone: team.contact.phone.clone(),
        }
    }
}

// ============================================================================
// Pitches
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = pitches)]
pub struct PitchRow {
    pub pitch_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub pitch_type: Option<String>,
    pub owner_team_id: Option<i64>,
    pub is_verified: bool,
    pub weekly_limit: Option<i32>,
    pub allow_friendly_auto_release: bool,
    pub image_ref: Option<String>,
    pub is_archived: bool,
}

impl TryFrom<PitchRow> for Pitch {
    type Error = PersistenceError;

    fn try_from(row: PitchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            pitch_id: Some(PitchId::new(row.pitch_id)),
            name: row.name,
            address: row.address,
            pitch_type: row.pitch_type,
            owner_team_id: row.owner_team_id.map(TeamId::new),
            is_verified: row.is_verified,
            weekly_limit: row
                .weekly_limit
                .map(|limit| from_db_int("weekly_limit", limit))
                .transpose()?,
            allow_friendly_auto_release: row.allow_friendly_auto_release,
            image_ref: row.image_ref,
            is_archived: row.is_archived,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = pitches)]
#[diesel(treat_none_as_null = true)]
pub struct PitchValues {
    pub name: String,
    pub address: Option<String>,
    pub pitch_type: Option<String>,
    pub owner_team_id: Option<i64>,
    pub is_verified: bool,
    pub weekly_limit: Option<i32>,
    pub allow_friendly_auto_release: bool,
    pub image_ref: Option<String>,
    pub is_archived: bool,
}

impl PitchValues {
    pub fn from_domain(pitch: &Pitch) -> Result<Self, PersistenceError> {
        Ok(Self {
            name: pitch.name.clone(),
            address: pitch.address.clone(),
            pitch_type: pitch.pitch_type.clone(),
            owner_team_id: pitch.owner_team_id.map(TeamId::value),
            is_verified: pitch.is_verified,
            weekly_limit: pitch
                .weekly_limit
                .map(|limit| to_db_int("weekly_limit", limit))
                .transpose()?,
            allow_friendly_auto_release: pitch.allow_friendly_auto_release,
            image_ref: pitch.image_ref.clone(),
            is_archived: pitch.is_archived,
        })
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub struct BookingRow {
    pub booking_id: i64,
    pub season_id: i64,
    pub pitch_id: i64,
    pub starts_at: i64,
    pub duration_minutes: i32,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub is_friendly: bool,
    pub status: String,
    pub created_at: i64,
    pub requested_at: Option<i64>,
    pub status_reason: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            booking_id: Some(BookingId::new(row.booking_id)),
            season_id: SeasonId::new(row.season_id),
            pitch_id: PitchId::new(row.pitch_id),
            starts_at: from_unix(row.starts_at)?,
            duration_minutes: from_db_int("duration_minutes", row.duration_minutes)?,
            home_team_id: row.home_team_id.map(TeamId::new),
            away_team_id: row.away_team_id.map(TeamId::new),
            is_friendly: row.is_friendly,
            status: parse::<BookingStatus>("booking status", &row.status)?,
            created_at: from_unix(row.created_at)?,
            requested_at: row.requested_at.map(from_unix).transpose()?,
            status_reason: row.status_reason,
            contact: ContactInfo {
                name: row.contact_name,
                email: row.contact_email,
                phone: row.contact_phone,
            },
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = bookings)]
#[diesel(treat_none_as_null = true)]
pub struct BookingValues {
    pub season_id: i64,
    pub pitch_id: i64,
    pub starts_at: i64,
    pub duration_minutes: i32,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub is_friendly: bool,
    pub status: String,
    pub created_at: i64,
    pub requested_at: Option<i64>,
    pub status_reason: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl BookingValues {
    pub fn from_domain(booking: &Booking) -> Result<Self, PersistenceError> {
        Ok(Self {
            season_id: booking.season_id.value(),
            pitch_id: booking.pitch_id.value(),
            starts_at: to_unix(booking.starts_at),
            duration_minutes: to_db_int("duration_minutes", booking.duration_minutes)?,
            home_team_id: booking.home_team_id.map(TeamId::value),
            away_team_id: booking.away_team_id.map(TeamId::value),
            is_friendly: booking.is_friendly,
            status: booking.status.as_str().to_string(),
            created_at: to_unix(booking.created_at),
            requested_at: booking.requested_at.map(to_unix),
            status_reason: booking.status_reason.clone(),
            contact_name: booking.contact.name.clone(),
            contact_email: booking.contact.email.clone(),
            contact_phone: booking.contact.phone.clone(),
        })
    }
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = match_results)]
pub struct ResultRow {
    pub result_id: i64,
    pub season_id: i64,
    pub booking_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub reported_by: Option<i64>,
    pub played_at: i64,
    pub is_valid: bool,
    pub is_friendly: bool,
    pub reported_at: i64,
    pub status_reason: Option<String>,
}

impl TryFrom<ResultRow> for MatchResult {
    type Error = PersistenceError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            result_id: Some(ResultId::new(row.result_id)),
            season_id: SeasonId::new(row.season_id),
            booking_id: row.booking_id.map(BookingId::new),
            home_team_id: TeamId::new(row.home_team_id),
            away_team_id: TeamId::new(row.away_team_id),
            home_score: from_db_int("home_score", row.home_score)?,
            away_score: from_db_int("away_score", row.away_score)?,
            status: parse::<ResultStatus>("result status", &row.status)?,
            reported_by: row.reported_by.map(TeamId::new),
            played_at: from_unix(row.played_at)?,
            is_valid: row.is_valid,
            is_friendly: row.is_friendly,
            reported_at: from_unix(row.reported_at)?,
            status_reason: row.status_reason,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = match_results)]
#[diesel(treat_none_as_null = true)]
pub struct ResultValues {
    pub season_id: i64,
    pub booking_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub reported_by: Option<i64>,
    pub played_at: i64,
    pub is_valid: bool,
    pub is_friendly: bool,
    pub reported_at: i64,
    pub status_reason: Option<String>,
}

impl ResultValues {
    pub fn from_domain(result: &MatchResult) -> Result<Self, PersistenceError> {
        Ok(Self {
            season_id: result.season_id.value(),
            booking_id: result.booking_id.map(BookingId::value),
            home_team_id: result.home_team_id.value(),
            away_team_id: result.away_team_id.value(),
            home_score: to_db_int("home_score", result.home_score)?,
            away_score: to_db_int("away_score", result.away_score)?,
            status: result.status.as_str().to_string(),
            reported_by: result.reported_by.map(TeamId::value),
            played_at: to_unix(result.played_at),
            is_valid: result.is_valid,
            is_friendly: result.is_friendly,
            reported_at: to_unix(result.reported_at),
            status_reason: result.status_reason.clone(),
        })
    }
}
