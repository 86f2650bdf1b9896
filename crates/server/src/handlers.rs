// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route handlers.
//!
//! Each handler locks the persistence handle, stamps the request with a
//! fresh cause and the current instant, and delegates to the API crate.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
};
use bunte_liga_api::{
    AdminCreateResultRequest, AdminUpdateResultRequest, AllTimeRefreshResponse,
    AuditTimelineResponse, BookingInfo, BulkCreateResponse, BulkCreateSlotsRequest,
    CancelBookingRequest, CheckCollisionRequest, CollisionResponse, CreatePitchRequest,
    CreateSeasonRequest, CreateSlotRequest, CreateTeamRequest, DeleteResultResponse,
    ListBookingsResponse, ListPitchesResponse, ListResultsResponse, ListSeasonsResponse,
    ListTeamsResponse, OpponentOptionsResponse, OverrideBookingRequest, PendingActionsResponse,
    PitchInfo, ReasonRequest, ReportResultRequest, RequestSlotRequest, RespondBookingRequest,
    RespondResultRequest, ResultInfo, SeasonInfo, SeasonTeamRequest, SlotTemplateRequest,
    StandingsResponse, TeamInfo, TransitionSeasonRequest, UpdatePitchRequest,
    UpdateSeasonRequest, UpdateSlotRequest, UpdateTeamRequest, admin_create_result_entry,
    admin_delete_result_entry, admin_update_result, block_slot, bulk_create_slots,
    cancel_booking, cancel_result_report, check_slot_collision, create_pitch, create_season,
    create_slot, create_slots_from_template, create_team, get_audit_timeline, get_current_season,
    get_opponent_options, get_pending_actions, get_season, get_standings,
    list_available_bookings, list_bookings, list_bookings_needing_result,
    list_pending_results_for_team, list_pitches, list_public_results, list_results,
    list_seasons, list_teams, override_booking, refresh_all_time_stats, register_team,
    report_result, request_cause, request_slot, respond_to_request, respond_to_result,
    set_current_season, transition_season, unblock_slot, update_pitch, update_season,
    update_slot, update_team, withdraw_team,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionActor;

type HttpResult<T> = Result<Json<T>, HttpError>;

/// Query parameters for the pitch list.
#[derive(Debug, Default, Deserialize)]
pub struct PitchQuery {
    #[serde(default)]
    pub include_archived: bool,
}

/// Query parameters for team-scoped views. Team callers may omit the team.
#[derive(Debug, Default, Deserialize)]
pub struct TeamScopeQuery {
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Query parameters for the opponent picker.
#[derive(Debug, Default, Deserialize)]
pub struct OpponentQuery {
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub friendly: bool,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

pub async fn handle_public_seasons(
    AxumState(state): AxumState<AppState>,
) -> HttpResult<ListSeasonsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_seasons(&mut persistence)?))
}

pub async fn handle_public_current_season(
    AxumState(state): AxumState<AppState>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_current_season(&mut persistence)?))
}

pub async fn handle_public_season(
    AxumState(state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_season(&mut persistence, season_id)?))
}

pub async fn handle_public_teams(
    AxumState(state): AxumState<AppState>,
) -> HttpResult<ListTeamsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_teams(&mut persistence, None)?))
}

pub async fn handle_public_pitches(
    AxumState(state): AxumState<AppState>,
) -> HttpResult<ListPitchesResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_pitches(&mut persistence, false)?))
}

pub async fn handle_public_available_bookings(
    AxumState(state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_available_bookings(
        &mut persistence,
        season_id,
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_public_results(
    AxumState(state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> HttpResult<ListResultsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_public_results(&mut persistence, season_id)?))
}

pub async fn handle_public_standings(
    AxumState(state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> HttpResult<StandingsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_standings(&mut persistence, season_id)?))
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

pub async fn handle_create_season(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateSeasonRequest>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(create_season(
        &mut persistence,
        &req,
        &actor,
        request_cause("create season"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_update_season(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Json(req): Json<UpdateSeasonRequest>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(update_season(
        &mut persistence,
        season_id,
        &req,
        &actor,
        request_cause("update season"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_transition_season(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Json(req): Json<TransitionSeasonRequest>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(transition_season(
        &mut persistence,
        season_id,
        req,
        &actor,
        request_cause("transition season"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_set_current_season(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(set_current_season(
        &mut persistence,
        season_id,
        &actor,
        request_cause("set current season"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_register_team(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Json(req): Json<SeasonTeamRequest>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(register_team(
        &mut persistence,
        season_id,
        req,
        &actor,
        request_cause("register team"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_withdraw_team(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Json(req): Json<SeasonTeamRequest>,
) -> HttpResult<SeasonInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(withdraw_team(
        &mut persistence,
        season_id,
        req,
        &actor,
        request_cause("withdraw team"),
        OffsetDateTime::now_utc(),
    )?))
}

// ---------------------------------------------------------------------------
// Teams and pitches
// ---------------------------------------------------------------------------

pub async fn handle_list_teams(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> HttpResult<ListTeamsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_teams(&mut persistence, Some(&actor))?))
}

pub async fn handle_create_team(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateTeamRequest>,
) -> HttpResult<TeamInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(create_team(
        &mut persistence,
        &req,
        &actor,
        request_cause("create team"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_update_team(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(team_id): Path<i64>,
    Json(req): Json<UpdateTeamRequest>,
) -> HttpResult<TeamInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(update_team(
        &mut persistence,
        team_id,
        &req,
        &actor,
        request_cause("update team"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_list_pitches(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Query(query): Query<PitchQuery>,
) -> HttpResult<ListPitchesResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_pitches(&mut persistence, query.include_archived)?))
}

pub async fn handle_create_pitch(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreatePitchRequest>,
) -> HttpResult<PitchInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(create_pitch(
        &mut persistence,
        &req,
        &actor,
        request_cause("create pitch"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_update_pitch(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(pitch_id): Path<i64>,
    Json(req): Json<UpdatePitchRequest>,
) -> HttpResult<PitchInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(update_pitch(
        &mut persistence,
        pitch_id,
        &req,
        &actor,
        request_cause("update pitch"),
        OffsetDateTime::now_utc(),
    )?))
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

pub async fn handle_list_bookings(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_bookings(
        &mut persistence,
        season_id,
        &actor,
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_bookings_needing_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_bookings_needing_result(
        &mut persistence,
        season_id,
        &actor,
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_check_collision(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Json(req): Json<CheckCollisionRequest>,
) -> HttpResult<CollisionResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(check_slot_collision(&mut persistence, &req)?))
}

pub async fn handle_create_slot(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateSlotRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(create_slot(
        &mut persistence,
        &req,
        &actor,
        request_cause("create slot"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_bulk_create_slots(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<BulkCreateSlotsRequest>,
) -> HttpResult<BulkCreateResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bulk_create_slots(
        &mut persistence,
        &req,
        &actor,
        &request_cause("bulk create slots"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_slot_template(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<SlotTemplateRequest>,
) -> HttpResult<BulkCreateResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(create_slots_from_template(
        &mut persistence,
        &req,
        &actor,
        &request_cause("create slots from template"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_update_slot(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<UpdateSlotRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(update_slot(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("update slot"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_override_booking(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<OverrideBookingRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(override_booking(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("override booking"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_request_slot(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<RequestSlotRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(request_slot(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("request slot"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_respond_to_request(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<RespondBookingRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(respond_to_request(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("respond to booking request"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_cancel_booking(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<CancelBookingRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(cancel_booking(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("cancel booking"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_block_slot(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
    Json(req): Json<ReasonRequest>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(block_slot(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("block slot"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_unblock_slot(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(booking_id): Path<i64>,
) -> HttpResult<BookingInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(unblock_slot(
        &mut persistence,
        booking_id,
        &actor,
        request_cause("unblock slot"),
        OffsetDateTime::now_utc(),
    )?))
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

pub async fn handle_list_results(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(season_id): Path<i64>,
) -> HttpResult<ListResultsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_results(&mut persistence, season_id)?))
}

pub async fn handle_pending_results(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Query(query): Query<TeamScopeQuery>,
) -> HttpResult<ListResultsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(list_pending_results_for_team(
        &mut persistence,
        season_id,
        query.team_id,
        &actor,
    )?))
}

pub async fn handle_report_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<ReportResultRequest>,
) -> HttpResult<ResultInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(report_result(
        &mut persistence,
        req,
        &actor,
        request_cause("report result"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_respond_to_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(result_id): Path<i64>,
    Json(req): Json<RespondResultRequest>,
) -> HttpResult<ResultInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(respond_to_result(
        &mut persistence,
        result_id,
        &req,
        &actor,
        request_cause("respond to result"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_cancel_result_report(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(result_id): Path<i64>,
) -> HttpResult<ResultInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(cancel_result_report(
        &mut persistence,
        result_id,
        &actor,
        request_cause("cancel result report"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_admin_create_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<AdminCreateResultRequest>,
) -> HttpResult<ResultInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(admin_create_result_entry(
        &mut persistence,
        &req,
        &actor,
        request_cause("admin create result"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_admin_update_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(result_id): Path<i64>,
    Json(req): Json<AdminUpdateResultRequest>,
) -> HttpResult<ResultInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(admin_update_result(
        &mut persistence,
        result_id,
        &req,
        &actor,
        request_cause("admin update result"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_admin_delete_result(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(result_id): Path<i64>,
) -> HttpResult<DeleteResultResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(admin_delete_result_entry(
        &mut persistence,
        result_id,
        &actor,
        request_cause("admin delete result"),
        OffsetDateTime::now_utc(),
    )?))
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

pub async fn handle_pending_actions(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Query(query): Query<TeamScopeQuery>,
) -> HttpResult<PendingActionsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_pending_actions(
        &mut persistence,
        season_id,
        query.team_id,
        &actor,
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_opponent_options(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(season_id): Path<i64>,
    Query(query): Query<OpponentQuery>,
) -> HttpResult<OpponentOptionsResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_opponent_options(
        &mut persistence,
        season_id,
        query.team_id,
        query.friendly,
        &actor,
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_refresh_all_time_stats(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> HttpResult<AllTimeRefreshResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(refresh_all_time_stats(
        &mut persistence,
        &actor,
        request_cause("refresh all-time statistics"),
        OffsetDateTime::now_utc(),
    )?))
}

pub async fn handle_audit_timeline(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path((entity_kind, entity_id)): Path<(String, i64)>,
) -> HttpResult<AuditTimelineResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(get_audit_timeline(
        &mut persistence,
        &entity_kind,
        entity_id,
        &actor,
    )?))
}
