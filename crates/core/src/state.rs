// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_audit::{AuditEvent, StateSnapshot};
use bunte_liga_domain::{
    Booking, DomainError, MatchResult, Pitch, Season, SlotSpec, Team, TeamId,
};
use time::OffsetDateTime;

/// Everything a booking transition is checked against.
///
/// Loaded by the caller for one season and one pitch. The storage commit
/// repeats the collision and rematch checks against the rows it sees.
#[derive(Debug, Clone, Copy)]
pub struct BookingContext<'a> {
    pub season: &'a Season,
    /// Bookings on the pitch the booking occupies (any season).
    pub pitch_bookings: &'a [Booking],
    /// All bookings of the season.
    pub season_bookings: &'a [Booking],
    /// All results of the season.
    pub season_results: &'a [MatchResult],
    pub now: OffsetDateTime,
}

/// Everything a result transition is checked against.
#[derive(Debug, Clone, Copy)]
pub struct ResultContext<'a> {
    pub season: &'a Season,
    /// Results already recorded for the booking concerned.
    pub booking_results: &'a [MatchResult],
    pub now: OffsetDateTime,
}

/// The result of a successful booking transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTransition {
    pub new_booking: Booking,
    pub audit_event: AuditEvent,
    /// Whether the commit must hold the pairing to its rematch limit.
    /// Set for team negotiation, not for admin edits.
    pub enforce_rematch_limit: bool,
}

/// The result of a successful result transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTransition {
    pub new_result: MatchResult,
    pub audit_event: AuditEvent,
}

/// The result of a successful season transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonTransition {
    pub new_season: Season,
    pub audit_event: AuditEvent,
}

/// The result of a successful team change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTransition {
    pub new_team: Team,
    pub audit_event: AuditEvent,
}

/// The result of a successful pitch change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchTransition {
    pub new_pitch: Pitch,
    pub audit_event: AuditEvent,
}

/// Per-item outcome of a bulk slot creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkSlotOutcome {
    /// The slot passed validation and can be stored.
    Planned(Box<BookingTransition>),
    /// The slot was skipped.
    Skipped { spec: SlotSpec, error: DomainError },
}

fn team_label(team_id: Option<TeamId>) -> String {
    team_id.map_or_else(|| String::from("-"), |id| id.to_string())
}

/// Compact audit snapshot of a booking.
#[must_use]
pub fn booking_snapshot(booking: &Booking) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},pitch={},start={},duration={},home={},away={},friendly={}",
        booking.status,
        booking.pitch_id,
        booking.starts_at.unix_timestamp(),
        booking.duration_minutes,
        team_label(booking.home_team_id),
        team_label(booking.away_team_id),
        booking.is_friendly
    ))
}

/// Compact audit snapshot of a result.
#[must_use]
pub fn result_snapshot(result: &MatchResult) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},home={},away={},score={}:{},valid={}",
        result.status,
        result.home_team_id,
        result.away_team_id,
        result.home_score,
        result.away_score,
        result.is_valid
    ))
}

/// Compact audit snapshot of a season.
#[must_use]
pub fn season_snapshot(season: &Season) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},current={},mode={},teams={}",
        season.status,
        season.is_current,
        season.play_mode,
        season.active_team_ids().len()
    ))
}
