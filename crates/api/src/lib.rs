// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary of the league backend.
//!
//! Handlers take the persistence handle, the authenticated caller, the
//! request DTO, a cause and the current instant. They never read a clock
//! or ambient session state themselves.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use bunte_liga_audit::Cause;

pub use auth::{
    AuthenticatedActor, AuthorizationService, IdentityFileError, IdentityProvider,
    StaticTokenIdentityProvider,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    admin_create_result_entry, admin_delete_result_entry, admin_update_result, block_slot,
    bulk_create_slots, cancel_booking, cancel_result_report, check_slot_collision, create_pitch,
    create_season, create_slot, create_slots_from_template, create_team, get_audit_timeline,
    get_current_season, get_opponent_options, get_pending_actions, get_season, get_standings,
    list_available_bookings, list_bookings, list_bookings_needing_result,
    list_pending_results_for_team, list_pitches, list_public_results, list_results, list_seasons,
    list_teams, override_booking, refresh_all_time_stats, register_team, report_result,
    request_slot, respond_to_request, respond_to_result, set_current_season, transition_season,
    unblock_slot, update_pitch, update_season, update_slot, update_team, withdraw_team,
};
pub use request_response::{
    AdminCreateResultRequest, AdminUpdateResultRequest, AllTimeRefreshResponse, AuditEventInfo,
    AuditTimelineResponse, BookingDecision, BookingInfo, BulkCreateResponse,
    BulkCreateSlotsRequest, CancelBookingRequest, CheckCollisionRequest, CollisionResponse,
    CreatePitchRequest, CreateSeasonRequest, CreateSlotRequest, CreateTeamRequest,
    DeleteResultResponse, ListBookingsResponse, ListPitchesResponse, ListResultsResponse,
    ListSeasonsResponse, ListTeamsResponse, OpponentOptionsResponse, OverrideBookingRequest,
    PendingActionsResponse, PitchInfo, ReasonRequest, ReportResultRequest, RequestSlotRequest,
    RespondBookingRequest, RespondResultRequest, ResultAnswer, ResultInfo, SeasonInfo,
    SeasonTeamInfo, SeasonTeamRequest, SkippedSlotInfo, SlotInput, SlotTemplateRequest,
    StandingsResponse, TeamInfo, TransitionSeasonRequest, UpdatePitchRequest,
    UpdateSeasonRequest, UpdateSlotRequest, UpdateTeamRequest,
};

/// Creates the cause recorded for one API request.
///
/// The id is random and only has to be unique enough to group the audit
/// events of one request.
#[must_use]
pub fn request_cause(description: &str) -> Cause {
    Cause::new(
        format!("req-{:016x}", rand::random::<u64>()),
        description.to_string(),
    )
}
