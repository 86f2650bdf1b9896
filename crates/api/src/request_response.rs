// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests accept instants in any form [`ExternalInstant`] understands.
//! Responses carry instants as RFC 3339 strings in UTC, plus league-local
//! display strings where a client would otherwise have to convert.

use bunte_liga_domain::{
    AllTimeStats, BookingStatus, ContactInfo, ExpiryInfo, ExternalInstant, OpponentOption,
    PlayMode, RankingCriterion, ResultStatus, SeasonStatus, StandingsRow,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// API request to create a season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSeasonRequest {
    pub name: String,
    pub year: u16,
    #[serde(default)]
    pub play_mode: Option<PlayMode>,
    /// Tie-breaker order; defaults to points, goal difference, goals scored.
    #[serde(default)]
    pub ranking_criteria: Option<Vec<RankingCriterion>>,
    #[serde(default)]
    pub request_expiry_days: Option<u32>,
    #[serde(default)]
    pub friendly_games_release_hours: Option<u32>,
}

/// API request to change season settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSeasonRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub play_mode: Option<PlayMode>,
    #[serde(default)]
    pub ranking_criteria: Option<Vec<RankingCriterion>>,
    #[serde(default)]
    pub request_expiry_days: Option<u32>,
    #[serde(default)]
    pub friendly_games_release_hours: Option<u32>,
}

/// API request to move a season one step forward in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransitionSeasonRequest {
    pub target: SeasonStatus,
}

/// API request to register or withdraw a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SeasonTeamRequest {
    pub team_id: i64,
}

/// A team's registration in a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonTeamInfo {
    pub team_id: i64,
    pub status: String,
}

/// Season as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonInfo {
    pub season_id: i64,
    pub name: String,
    pub year: u16,
    pub status: String,
    pub is_current: bool,
    pub play_mode: String,
    pub ranking_criteria: Vec<String>,
    pub request_expiry_days: u32,
    pub friendly_games_release_hours: u32,
    pub teams: Vec<SeasonTeamInfo>,
}

/// API response listing seasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSeasonsResponse {
    pub seasons: Vec<SeasonInfo>,
}

// ---------------------------------------------------------------------------
// Teams and pitches
// ---------------------------------------------------------------------------

/// API request to create a team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub logo_ref: Option<String>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// API request to change a team. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub logo_ref: Option<String>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// Team as returned by the API.
///
/// Contact details are only included for admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamInfo {
    pub team_id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub colors: Option<String>,
    pub logo_ref: Option<String>,
    pub all_time: AllTimeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

/// API response listing teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamInfo>,
}

/// API request to create a pitch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePitchRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pitch_type: Option<String>,
    #[serde(default)]
    pub owner_team_id: Option<i64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub weekly_limit: Option<u32>,
    #[serde(default)]
    pub allow_friendly_auto_release: bool,
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// API request to change a pitch. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdatePitchRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pitch_type: Option<String>,
    #[serde(default)]
    pub owner_team_id: Option<i64>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub weekly_limit: Option<u32>,
    #[serde(default)]
    pub allow_friendly_auto_release: Option<bool>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub is_archived: Option<bool>,
}

/// Pitch as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PitchInfo {
    pub pitch_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub pitch_type: Option<String>,
    pub owner_team_id: Option<i64>,
    pub is_verified: bool,
    pub weekly_limit: Option<u32>,
    pub allow_friendly_auto_release: bool,
    pub image_ref: Option<String>,
    pub is_archived: bool,
}

/// API response listing pitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPitchesResponse {
    pub pitches: Vec<PitchInfo>,
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// API request for the advisory collision check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckCollisionRequest {
    pub pitch_id: i64,
    pub starts_at: ExternalInstant,
    pub duration_minutes: u32,
    /// The booking being moved, which never collides with itself.
    #[serde(default)]
    pub ignore_booking_id: Option<i64>,
}

/// API response for the advisory collision check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionResponse {
    pub available: bool,
    pub conflicting_booking_ids: Vec<i64>,
}

/// One slot to create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotInput {
    pub pitch_id: i64,
    pub starts_at: ExternalInstant,
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_friendly: bool,
}

/// API request to create a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSlotRequest {
    pub season_id: i64,
    pub pitch_id: i64,
    pub starts_at: ExternalInstant,
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_friendly: bool,
}

/// API request to create many slots at once.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkCreateSlotsRequest {
    pub season_id: i64,
    pub slots: Vec<SlotInput>,
}

/// API request to create slots from a weekly schedule.
///
/// Dates are `YYYY-MM-DD`, times `HH:MM` in league local time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotTemplateRequest {
    pub season_id: i64,
    pub pitch_id: i64,
    pub first_date: String,
    pub last_date: String,
    pub weekdays: Vec<String>,
    pub start_times: Vec<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_friendly: bool,
}

/// A slot that was not created, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSlotInfo {
    pub index: usize,
    pub pitch_id: i64,
    pub starts_at: String,
    pub duration_minutes: u32,
    pub kind: String,
    pub message: String,
}

/// API response for bulk slot creation, one entry per input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkCreateResponse {
    pub created: Vec<BookingInfo>,
    pub skipped: Vec<SkippedSlotInfo>,
}

/// API request to change a slot. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSlotRequest {
    #[serde(default)]
    pub pitch_id: Option<i64>,
    #[serde(default)]
    pub starts_at: Option<ExternalInstant>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub is_friendly: Option<bool>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// API request for an admin status override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideBookingRequest {
    pub status: BookingStatus,
    #[serde(default)]
    pub home_team_id: Option<i64>,
    #[serde(default)]
    pub away_team_id: Option<i64>,
    #[serde(default)]
    pub is_friendly: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request carrying an optional free-text reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReasonRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to request a slot for a match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestSlotRequest {
    /// Defaults to the caller's team.
    #[serde(default)]
    pub home_team_id: Option<i64>,
    pub away_team_id: i64,
    #[serde(default)]
    pub is_friendly: bool,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// Answer to a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingDecision {
    Confirm,
    Deny,
}

/// API request to confirm or deny a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RespondBookingRequest {
    pub decision: BookingDecision,
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to cancel a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default)]
    pub reason: Option<String>,
    /// Withdraw the match instead of releasing the slot (admin only).
    #[serde(default)]
    pub withdraw: bool,
}

/// Booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingInfo {
    pub booking_id: i64,
    pub season_id: i64,
    pub pitch_id: i64,
    pub starts_at: String,
    pub ends_at: String,
    /// `dd.mm.yyyy, HH:MM` in league local time.
    pub starts_at_display: String,
    pub duration_minutes: u32,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub is_friendly: bool,
    pub status: String,
    pub requested_at: Option<String>,
    pub status_reason: Option<String>,
    /// Only shown to admins and the teams involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    /// Countdown of an open request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<ExpiryInfo>,
}

/// API response listing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<BookingInfo>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// API request to report the score of a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReportResultRequest {
    pub booking_id: i64,
    pub home_score: u32,
    pub away_score: u32,
}

/// Answer to a reported result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultAnswer {
    Confirm,
    Reject,
}

/// API request to confirm or reject a reported result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RespondResultRequest {
    pub decision: ResultAnswer,
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request for an admin-entered result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminCreateResultRequest {
    pub season_id: i64,
    #[serde(default)]
    pub booking_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: u32,
    pub away_score: u32,
    pub played_at: ExternalInstant,
    /// Defaults to `confirmed`.
    #[serde(default)]
    pub status: Option<ResultStatus>,
    /// Only used without a booking; a linked booking decides this itself.
    #[serde(default)]
    pub is_friendly: bool,
    /// Defaults to `true`.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// API request for an admin correction. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminUpdateResultRequest {
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub status: Option<ResultStatus>,
    #[serde(default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Result as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultInfo {
    pub result_id: i64,
    pub season_id: i64,
    pub booking_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: u32,
    pub away_score: u32,
    pub status: String,
    pub reported_by: Option<i64>,
    pub played_at: String,
    pub reported_at: String,
    pub is_valid: bool,
    pub is_friendly: bool,
    pub status_reason: Option<String>,
}

/// API response listing results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResultsResponse {
    pub results: Vec<ResultInfo>,
}

/// API response for a deleted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResultResponse {
    pub result_id: i64,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// API response with the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsResponse {
    pub season_id: i64,
    pub ranking_criteria: Vec<String>,
    pub rows: Vec<StandingsRow>,
}

/// API response with a team's open to-dos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingActionsResponse {
    pub season_id: i64,
    pub team_id: i64,
    pub needs_result: Vec<BookingInfo>,
    pub incoming_requests: Vec<BookingInfo>,
    pub outgoing_requests: Vec<BookingInfo>,
    pub results_to_confirm: Vec<ResultInfo>,
}

/// API response for the opponent picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentOptionsResponse {
    pub season_id: i64,
    pub team_id: i64,
    pub is_friendly: bool,
    pub options: Vec<OpponentOption>,
}

/// API response for the all-time statistics refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllTimeRefreshResponse {
    pub teams_updated: usize,
    pub results_counted: usize,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub season_id: Option<i64>,
    pub entity_kind: Option<String>,
    pub entity_id: Option<i64>,
    pub actor_id: String,
    pub actor_kind: String,
    pub actor_team_id: Option<i64>,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    pub recorded_at: String,
}

/// API response with an entity's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTimelineResponse {
    pub events: Vec<AuditEventInfo>,
}
