// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same steps: authorize, load the
//! entity and its context, let the core decide the transition, then commit
//! it with the status that was read as the expected status. A commit that
//! loses a race surfaces as a conflict; nothing is retried.

use bunte_liga::{
    BookingCommand, BookingContext, BulkSlotOutcome, CancelDisposition, RequestDecision,
    ResultCommand, ResultContext, ResultDecision, SeasonCommand, admin_create_result,
    admin_delete_result, apply_booking_command, apply_result_command, apply_season_command,
    create_season as core_create_season, create_slot as core_create_slot, plan_bulk_slots,
    report_result as core_report_result, save_pitch, save_team,
};
use bunte_liga_audit::{Action, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{
    Booking, BookingId, BookingStatus, DomainError, MatchResult, Pitch, PitchId, ResultId,
    ResultStatus, Season, SeasonId, SlotSpec, SlotTemplate, Team, TeamId, bookings_needing_result,
    check_collision, compute_all_time_records, compute_standings, format_date_time,
    opponent_options as domain_opponent_options, parse_weekday, pending_actions_for_team,
    request_expiry_info, to_rfc3339, validate_slot_time,
};
use bunte_liga_persistence::{Persistence, PersistenceError};
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AdminCreateResultRequest, AdminUpdateResultRequest, AllTimeRefreshResponse, AuditEventInfo,
    AuditTimelineResponse, BookingDecision, BookingInfo, BulkCreateResponse,
    BulkCreateSlotsRequest, CancelBookingRequest, CheckCollisionRequest, CollisionResponse,
    CreatePitchRequest, CreateSeasonRequest, CreateSlotRequest, CreateTeamRequest,
    DeleteResultResponse, ListBookingsResponse, ListPitchesResponse, ListResultsResponse,
    ListSeasonsResponse, ListTeamsResponse, OpponentOptionsResponse, OverrideBookingRequest,
    PendingActionsResponse, PitchInfo, ReasonRequest, ReportResultRequest, RequestSlotRequest,
    RespondBookingRequest, RespondResultRequest, ResultAnswer, ResultInfo, SeasonInfo,
    SeasonTeamInfo, SeasonTeamRequest, SkippedSlotInfo, SlotTemplateRequest, StandingsResponse,
    TeamInfo, TransitionSeasonRequest, UpdatePitchRequest, UpdateSeasonRequest,
    UpdateSlotRequest, UpdateTeamRequest,
};

// ---------------------------------------------------------------------------
// Loading helpers
// ---------------------------------------------------------------------------

/// Maps a storage `NotFound` to the matching domain error.
fn not_found_as(err: PersistenceError, domain: DomainError) -> ApiError {
    match err {
        PersistenceError::NotFound(_) => translate_domain_error(domain),
        other => translate_persistence_error(other),
    }
}

fn load_season(persistence: &mut Persistence, season_id: SeasonId) -> Result<Season, ApiError> {
    persistence
        .get_season(season_id)
        .map_err(|e| not_found_as(e, DomainError::SeasonNotFound(season_id)))
}

fn load_team(persistence: &mut Persistence, team_id: TeamId) -> Result<Team, ApiError> {
    persistence
        .get_team(team_id)
        .map_err(|e| not_found_as(e, DomainError::TeamNotFound(team_id)))
}

fn load_pitch(persistence: &mut Persistence, pitch_id: PitchId) -> Result<Pitch, ApiError> {
    persistence
        .get_pitch(pitch_id)
        .map_err(|e| not_found_as(e, DomainError::PitchNotFound(pitch_id)))
}

fn load_booking(persistence: &mut Persistence, booking_id: BookingId) -> Result<Booking, ApiError> {
    persistence
        .get_booking(booking_id)
        .map_err(|e| not_found_as(e, DomainError::BookingNotFound(booking_id)))
}

fn load_result(
    persistence: &mut Persistence,
    result_id: ResultId,
) -> Result<MatchResult, ApiError> {
    persistence
        .get_result(result_id)
        .map_err(|e| not_found_as(e, DomainError::ResultNotFound(result_id)))
}

fn instant(value: &bunte_liga_domain::ExternalInstant) -> Result<OffsetDateTime, ApiError> {
    value.to_instant().map_err(translate_domain_error)
}

fn rfc3339(value: OffsetDateTime) -> Result<String, ApiError> {
    to_rfc3339(value).map_err(translate_domain_error)
}

fn missing_id(entity: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Stored {entity} has no id"),
    }
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

fn season_info(season: &Season) -> Result<SeasonInfo, ApiError> {
    Ok(SeasonInfo {
        season_id: season.season_id.ok_or_else(|| missing_id("season"))?.value(),
        name: season.name.clone(),
        year: season.year,
        status: season.status.as_str().to_string(),
        is_current: season.is_current,
        play_mode: season.play_mode.as_str().to_string(),
        ranking_criteria: season
            .ranking_criteria
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        request_expiry_days: season.request_expiry_days,
        friendly_games_release_hours: season.friendly_games_release_hours,
        teams: season
            .teams
            .iter()
            .map(|t| SeasonTeamInfo {
                team_id: t.team_id.value(),
                status: t.status.as_str().to_string(),
            })
            .collect(),
    })
}

fn team_info(team: &Team, with_contact: bool) -> Result<TeamInfo, ApiError> {
    Ok(TeamInfo {
        team_id: team.team_id.ok_or_else(|| missing_id("team"))?.value(),
        name: team.name.clone(),
        short_name: team.short_name.clone(),
        colors: team.colors.clone(),
        logo_ref: team.logo_ref.clone(),
        all_time: team.all_time,
        contact: with_contact.then(|| team.contact.clone()),
    })
}

fn pitch_info(pitch: &Pitch) -> Result<PitchInfo, ApiError> {
    Ok(PitchInfo {
        pitch_id: pitch.pitch_id.ok_or_else(|| missing_id("pitch"))?.value(),
        name: pitch.name.clone(),
        address: pitch.address.clone(),
        pitch_type: pitch.pitch_type.clone(),
        owner_team_id: pitch.owner_team_id.map(TeamId::value),
        is_verified: pitch.is_verified,
        weekly_limit: pitch.weekly_limit,
        allow_friendly_auto_release: pitch.allow_friendly_auto_release,
        image_ref: pitch.image_ref.clone(),
        is_archived: pitch.is_archived,
    })
}

/// Builds the booking DTO as seen by `viewer`.
///
/// Contact details are visible to admins and the teams involved only.
fn booking_info(
    booking: &Booking,
    season: &Season,
    viewer: Option<&AuthenticatedActor>,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let sees_contact = viewer.is_some_and(|v| {
        v.is_admin || v.team_id.is_some_and(|team_id| booking.involves(team_id))
    });
    let expiry = match (booking.status, booking.requested_at) {
        (BookingStatus::PendingAwayConfirm, Some(requested_at)) => Some(request_expiry_info(
            requested_at,
            season.request_expiry_days,
            now,
        )),
        _ => None,
    };
    Ok(BookingInfo {
        booking_id: booking.booking_id.ok_or_else(|| missing_id("booking"))?.value(),
        season_id: booking.season_id.value(),
        pitch_id: booking.pitch_id.value(),
        starts_at: rfc3339(booking.starts_at)?,
        ends_at: rfc3339(booking.ends_at())?,
        starts_at_display: format_date_time(booking.starts_at).map_err(translate_domain_error)?,
        duration_minutes: booking.duration_minutes,
        home_team_id: booking.home_team_id.map(TeamId::value),
        away_team_id: booking.away_team_id.map(TeamId::value),
        is_friendly: booking.is_friendly,
        status: booking.status.as_str().to_string(),
        requested_at: booking.requested_at.map(rfc3339).transpose()?,
        status_reason: booking.status_reason.clone(),
        contact: (sees_contact && !booking.contact.is_empty()).then(|| booking.contact.clone()),
        expiry,
    })
}

fn booking_infos(
    bookings: &[Booking],
    season: &Season,
    viewer: Option<&AuthenticatedActor>,
    now: OffsetDateTime,
) -> Result<Vec<BookingInfo>, ApiError> {
    bookings
        .iter()
        .map(|b| booking_info(b, season, viewer, now))
        .collect()
}

fn result_info(result: &MatchResult) -> Result<ResultInfo, ApiError> {
    Ok(ResultInfo {
        result_id: result.result_id.ok_or_else(|| missing_id("result"))?.value(),
        season_id: result.season_id.value(),
        booking_id: result.booking_id.map(BookingId::value),
        home_team_id: result.home_team_id.value(),
        away_team_id: result.away_team_id.value(),
        home_score: result.home_score,
        away_score: result.away_score,
        status: result.status.as_str().to_string(),
        reported_by: result.reported_by.map(TeamId::value),
        played_at: rfc3339(result.played_at)?,
        reported_at: rfc3339(result.reported_at)?,
        is_valid: result.is_valid,
        is_friendly: result.is_friendly,
        status_reason: result.status_reason.clone(),
    })
}

fn result_infos(results: &[MatchResult]) -> Result<Vec<ResultInfo>, ApiError> {
    results.iter().map(result_info).collect()
}

fn audit_event_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: event.event_id,
        season_id: event.season_id.map(SeasonId::value),
        entity_kind: event.entity.map(|e| e.kind().to_string()),
        entity_id: event.entity.map(|e| e.id()),
        actor_id: event.actor.id.clone(),
        actor_kind: event.actor.kind.as_str().to_string(),
        actor_team_id: event.actor.team_id.map(TeamId::value),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
        recorded_at: rfc3339(event.recorded_at)?,
    })
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// Lists all seasons, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_seasons(persistence: &mut Persistence) -> Result<ListSeasonsResponse, ApiError> {
    let seasons = persistence
        .list_seasons()
        .map_err(translate_persistence_error)?;
    Ok(ListSeasonsResponse {
        seasons: seasons.iter().map(season_info).collect::<Result<_, _>>()?,
    })
}

/// Returns the season currently marked current.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no season is current.
pub fn get_current_season(persistence: &mut Persistence) -> Result<SeasonInfo, ApiError> {
    let season = persistence
        .get_current_season()
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::NoCurrentSeason))?;
    season_info(&season)
}

/// Returns one season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn get_season(persistence: &mut Persistence, season_id: i64) -> Result<SeasonInfo, ApiError> {
    season_info(&load_season(persistence, SeasonId::new(season_id))?)
}

/// Lists all teams. Contact details are included for admins only.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_teams(
    persistence: &mut Persistence,
    viewer: Option<&AuthenticatedActor>,
) -> Result<ListTeamsResponse, ApiError> {
    let with_contact = viewer.is_some_and(|v| v.is_admin);
    let teams = persistence.list_teams().map_err(translate_persistence_error)?;
    Ok(ListTeamsResponse {
        teams: teams
            .iter()
            .map(|t| team_info(t, with_contact))
            .collect::<Result<_, _>>()?,
    })
}

/// Lists pitches; archived ones only on request.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pitches(
    persistence: &mut Persistence,
    include_archived: bool,
) -> Result<ListPitchesResponse, ApiError> {
    let pitches = persistence
        .list_pitches(include_archived)
        .map_err(translate_persistence_error)?;
    Ok(ListPitchesResponse {
        pitches: pitches.iter().map(pitch_info).collect::<Result<_, _>>()?,
    })
}

/// Lists the season's slots that are still open for requests.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn list_available_bookings(
    persistence: &mut Persistence,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<ListBookingsResponse, ApiError> {
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let bookings = persistence
        .list_available_bookings(SeasonId::new(season_id), now)
        .map_err(translate_persistence_error)?;
    Ok(ListBookingsResponse {
        bookings: booking_infos(&bookings, &season, None, now)?,
    })
}

/// Lists the season's confirmed results for public display.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn list_public_results(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<ListResultsResponse, ApiError> {
    load_season(persistence, SeasonId::new(season_id))?;
    let results: Vec<MatchResult> = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|r| r.status == ResultStatus::Confirmed)
        .collect();
    Ok(ListResultsResponse {
        results: result_infos(&results)?,
    })
}

/// Computes the league table of a season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn get_standings(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<StandingsResponse, ApiError> {
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let teams = persistence.list_teams().map_err(translate_persistence_error)?;
    let results = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;

    let rows = compute_standings(&season, &teams, &results);
    debug!(season_id, rows = rows.len(), "Computed standings");
    Ok(StandingsResponse {
        season_id,
        ranking_criteria: season
            .ranking_criteria
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Season administration
// ---------------------------------------------------------------------------

/// Creates a season in `planning`.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or a setting is invalid.
pub fn create_season(
    persistence: &mut Persistence,
    request: &CreateSeasonRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_season")?;

    let mut draft = Season::new(&request.name, request.year, request.play_mode.unwrap_or_default());
    if let Some(criteria) = &request.ranking_criteria {
        draft.ranking_criteria.clone_from(criteria);
    }
    if let Some(days) = request.request_expiry_days {
        draft.request_expiry_days = days;
    }
    if let Some(hours) = request.friendly_games_release_hours {
        draft.friendly_games_release_hours = hours;
    }

    let transition = core_create_season(
        draft,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let season = persistence
        .insert_season(&transition)
        .map_err(translate_persistence_error)?;

    info!(season_id = ?season.season_id, name = %season.name, "Created season");
    season_info(&season)
}

fn run_season_command(
    persistence: &mut Persistence,
    season_id: i64,
    command: SeasonCommand,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "administer_season")?;
    let season = load_season(persistence, SeasonId::new(season_id))?;

    let transition = apply_season_command(
        &season,
        command,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let updated = persistence
        .update_season(&transition, season.status)
        .map_err(translate_persistence_error)?;

    info!(
        season_id,
        action = %transition.audit_event.action.name,
        status = %updated.status,
        "Season changed"
    );
    season_info(&updated)
}

/// Moves a season one step forward in its lifecycle.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the step is not allowed.
pub fn transition_season(
    persistence: &mut Persistence,
    season_id: i64,
    request: TransitionSeasonRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    run_season_command(
        persistence,
        season_id,
        SeasonCommand::Transition {
            target: request.target,
        },
        actor,
        cause,
        now,
    )
}

/// Marks a season as the current one, clearing the flag on all others.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the season is missing.
pub fn set_current_season(
    persistence: &mut Persistence,
    season_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    run_season_command(
        persistence,
        season_id,
        SeasonCommand::SetCurrent,
        actor,
        cause,
        now,
    )
}

/// Changes season settings.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or a setting is invalid.
pub fn update_season(
    persistence: &mut Persistence,
    season_id: i64,
    request: &UpdateSeasonRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    run_season_command(
        persistence,
        season_id,
        SeasonCommand::UpdateSettings {
            name: request.name.clone(),
            play_mode: request.play_mode,
            ranking_criteria: request.ranking_criteria.clone(),
            request_expiry_days: request.request_expiry_days,
            friendly_games_release_hours: request.friendly_games_release_hours,
        },
        actor,
        cause,
        now,
    )
}

/// Registers a team for a season.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the team does not exist,
/// or it is already registered.
pub fn register_team(
    persistence: &mut Persistence,
    season_id: i64,
    request: SeasonTeamRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    let team_id = TeamId::new(request.team_id);
    load_team(persistence, team_id)?;
    run_season_command(
        persistence,
        season_id,
        SeasonCommand::RegisterTeam { team_id },
        actor,
        cause,
        now,
    )
}

/// Withdraws a team from a season. Its results are kept.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the team is not active.
pub fn withdraw_team(
    persistence: &mut Persistence,
    season_id: i64,
    request: SeasonTeamRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SeasonInfo, ApiError> {
    run_season_command(
        persistence,
        season_id,
        SeasonCommand::WithdrawTeam {
            team_id: TeamId::new(request.team_id),
        },
        actor,
        cause,
        now,
    )
}

// ---------------------------------------------------------------------------
// Teams and pitches
// ---------------------------------------------------------------------------

/// Creates a team.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or a field is invalid.
pub fn create_team(
    persistence: &mut Persistence,
    request: &CreateTeamRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TeamInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_team")?;

    let mut team = Team::new(&request.name);
    team.short_name.clone_from(&request.short_name);
    team.colors.clone_from(&request.colors);
    team.logo_ref.clone_from(&request.logo_ref);
    team.contact = request.contact.clone().unwrap_or_default();

    let transition = save_team(
        None,
        team,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .insert_team(&transition)
        .map_err(translate_persistence_error)?;

    info!(team_id = ?stored.team_id, name = %stored.name, "Created team");
    team_info(&stored, true)
}

/// Changes a team.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the team does not exist,
/// or a field is invalid.
pub fn update_team(
    persistence: &mut Persistence,
    team_id: i64,
    request: &UpdateTeamRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TeamInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_team")?;
    let before = load_team(persistence, TeamId::new(team_id))?;

    let mut team = before.clone();
    if let Some(name) = &request.name {
        team.name = name.trim().to_string();
    }
    if request.short_name.is_some() {
        team.short_name.clone_from(&request.short_name);
    }
    if request.colors.is_some() {
        team.colors.clone_from(&request.colors);
    }
    if request.logo_ref.is_some() {
        team.logo_ref.clone_from(&request.logo_ref);
    }
    if let Some(contact) = &request.contact {
        team.contact = contact.clone();
    }

    let transition = save_team(
        Some(&before),
        team,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .update_team(&transition)
        .map_err(translate_persistence_error)?;

    info!(team_id, "Updated team");
    team_info(&stored, true)
}

/// Creates a pitch.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or a field is invalid.
pub fn create_pitch(
    persistence: &mut Persistence,
    request: &CreatePitchRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<PitchInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_pitch")?;

    let mut pitch = Pitch::new(&request.name);
    pitch.address.clone_from(&request.address);
    pitch.pitch_type.clone_from(&request.pitch_type);
    pitch.owner_team_id = request.owner_team_id.map(TeamId::new);
    pitch.is_verified = request.is_verified;
    pitch.weekly_limit = request.weekly_limit;
    pitch.allow_friendly_auto_release = request.allow_friendly_auto_release;
    pitch.image_ref.clone_from(&request.image_ref);
    if let Some(owner) = pitch.owner_team_id {
        load_team(persistence, owner)?;
    }

    let transition = save_pitch(
        None,
        pitch,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .insert_pitch(&transition)
        .map_err(translate_persistence_error)?;

    info!(pitch_id = ?stored.pitch_id, name = %stored.name, "Created pitch");
    pitch_info(&stored)
}

/// Changes or archives a pitch.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the pitch does not exist,
/// or a field is invalid.
pub fn update_pitch(
    persistence: &mut Persistence,
    pitch_id: i64,
    request: &UpdatePitchRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<PitchInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_pitch")?;
    let before = load_pitch(persistence, PitchId::new(pitch_id))?;

    let mut pitch = before.clone();
    if let Some(name) = &request.name {
        pitch.name = name.trim().to_string();
    }
    if request.address.is_some() {
        pitch.address.clone_from(&request.address);
    }
    if request.pitch_type.is_some() {
        pitch.pitch_type.clone_from(&request.pitch_type);
    }
    if let Some(owner) = request.owner_team_id {
        load_team(persistence, TeamId::new(owner))?;
        pitch.owner_team_id = Some(TeamId::new(owner));
    }
    if let Some(verified) = request.is_verified {
        pitch.is_verified = verified;
    }
    if request.weekly_limit.is_some() {
        pitch.weekly_limit = request.weekly_limit;
    }
    if let Some(release) = request.allow_friendly_auto_release {
        pitch.allow_friendly_auto_release = release;
    }
    if request.image_ref.is_some() {
        pitch.image_ref.clone_from(&request.image_ref);
    }
    if let Some(archived) = request.is_archived {
        pitch.is_archived = archived;
    }

    let transition = save_pitch(
        Some(&before),
        pitch,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .update_pitch(&transition)
        .map_err(translate_persistence_error)?;

    info!(pitch_id, archived = stored.is_archived, "Updated pitch");
    pitch_info(&stored)
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Lists all bookings of a season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn list_bookings(
    persistence: &mut Persistence,
    season_id: i64,
    viewer: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ListBookingsResponse, ApiError> {
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let bookings = persistence
        .list_bookings_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;
    Ok(ListBookingsResponse {
        bookings: booking_infos(&bookings, &season, Some(viewer), now)?,
    })
}

/// Advisory check whether a slot would overlap an active booking.
///
/// Uses the same rule as every authoritative commit.
///
/// # Errors
///
/// Returns an error if the pitch does not exist or the instant is invalid.
pub fn check_slot_collision(
    persistence: &mut Persistence,
    request: &CheckCollisionRequest,
) -> Result<CollisionResponse, ApiError> {
    let pitch_id = PitchId::new(request.pitch_id);
    load_pitch(persistence, pitch_id)?;
    let starts_at = instant(&request.starts_at)?;
    validate_slot_time(starts_at, request.duration_minutes).map_err(translate_domain_error)?;
    let existing = persistence
        .list_bookings_for_pitch(pitch_id)
        .map_err(translate_persistence_error)?;

    let check = check_collision(
        &existing,
        pitch_id,
        starts_at,
        request.duration_minutes,
        request.ignore_booking_id.map(BookingId::new),
    );
    Ok(CollisionResponse {
        available: check.available,
        conflicting_booking_ids: check
            .conflicting_booking_ids
            .iter()
            .map(|id| id.value())
            .collect(),
    })
}

/// Creates a single slot.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the season or pitch does
/// not accept slots, or the slot collides.
pub fn create_slot(
    persistence: &mut Persistence,
    request: &CreateSlotRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_slot")?;
    let season = load_season(persistence, SeasonId::new(request.season_id))?;
    let pitch = load_pitch(persistence, PitchId::new(request.pitch_id))?;
    let spec = SlotSpec {
        pitch_id: PitchId::new(request.pitch_id),
        starts_at: instant(&request.starts_at)?,
        duration_minutes: request.duration_minutes,
        is_friendly: request.is_friendly,
    };
    let pitch_bookings = persistence
        .list_bookings_for_pitch(spec.pitch_id)
        .map_err(translate_persistence_error)?;

    let transition = core_create_slot(
        &season,
        &pitch,
        &pitch_bookings,
        &spec,
        now,
        actor.acting_party()?,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .insert_slot(&transition)
        .map_err(translate_persistence_error)?;

    info!(booking_id = ?stored.booking_id, pitch_id = request.pitch_id, "Created slot");
    booking_info(&stored, &season, Some(actor), now)
}

fn skipped(index: usize, spec: &SlotSpec, err: &ApiError) -> Result<SkippedSlotInfo, ApiError> {
    Ok(SkippedSlotInfo {
        index,
        pitch_id: spec.pitch_id.value(),
        starts_at: rfc3339(spec.starts_at)?,
        duration_minutes: spec.duration_minutes,
        kind: err.kind().to_string(),
        message: err.to_string(),
    })
}

/// Plans and stores a batch of slots, reporting each one.
///
/// Every planned slot is checked again by storage when it is inserted; a
/// slot that collides by then is reported as skipped.
fn store_slots(
    persistence: &mut Persistence,
    season: &Season,
    specs: &[SlotSpec],
    actor: &AuthenticatedActor,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<BulkCreateResponse, ApiError> {
    let pitches = persistence
        .list_pitches(true)
        .map_err(translate_persistence_error)?;
    let mut pitch_ids: Vec<PitchId> = specs.iter().map(|s| s.pitch_id).collect();
    pitch_ids.sort_unstable();
    pitch_ids.dedup();
    let mut bookings = Vec::new();
    for pitch_id in pitch_ids {
        bookings.extend(
            persistence
                .list_bookings_for_pitch(pitch_id)
                .map_err(translate_persistence_error)?,
        );
    }

    let outcomes = plan_bulk_slots(
        season,
        &pitches,
        &bookings,
        specs,
        now,
        actor.acting_party()?,
        &actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let mut response = BulkCreateResponse {
        created: Vec::new(),
        skipped: Vec::new(),
    };
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            BulkSlotOutcome::Planned(transition) => match persistence.insert_slot(&transition) {
                Ok(stored) => response
                    .created
                    .push(booking_info(&stored, season, Some(actor), now)?),
                Err(err @ PersistenceError::SlotCollision { .. }) => {
                    let api_err = translate_persistence_error(err);
                    let spec = SlotSpec {
                        pitch_id: transition.new_booking.pitch_id,
                        starts_at: transition.new_booking.starts_at,
                        duration_minutes: transition.new_booking.duration_minutes,
                        is_friendly: transition.new_booking.is_friendly,
                    };
                    response.skipped.push(skipped(index, &spec, &api_err)?);
                }
                Err(err) => return Err(translate_persistence_error(err)),
            },
            BulkSlotOutcome::Skipped { spec, error } => {
                let api_err = translate_domain_error(error);
                response.skipped.push(skipped(index, &spec, &api_err)?);
            }
        }
    }

    info!(
        season_id = ?season.season_id,
        created = response.created.len(),
        skipped = response.skipped.len(),
        "Stored slot batch"
    );
    Ok(response)
}

/// Creates many slots; a failing item never aborts the batch.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the season does not
/// exist, or an instant is malformed.
pub fn bulk_create_slots(
    persistence: &mut Persistence,
    request: &BulkCreateSlotsRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<BulkCreateResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "bulk_create_slots")?;
    let season = load_season(persistence, SeasonId::new(request.season_id))?;
    let specs = request
        .slots
        .iter()
        .map(|slot| {
            Ok(SlotSpec {
                pitch_id: PitchId::new(slot.pitch_id),
                starts_at: instant(&slot.starts_at)?,
                duration_minutes: slot.duration_minutes,
                is_friendly: slot.is_friendly,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;
    store_slots(persistence, &season, &specs, actor, cause, now)
}

fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| ApiError::invalid_input(field, format!("'{value}': {e}")))
}

fn parse_time(value: &str) -> Result<Time, ApiError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|e| ApiError::invalid_input("start_times", format!("'{value}': {e}")))
}

/// Expands a weekly schedule into slots and creates them.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the season does not
/// exist, or the template is malformed.
pub fn create_slots_from_template(
    persistence: &mut Persistence,
    request: &SlotTemplateRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<BulkCreateResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_slots_from_template")?;
    let season = load_season(persistence, SeasonId::new(request.season_id))?;
    load_pitch(persistence, PitchId::new(request.pitch_id))?;

    let template = SlotTemplate {
        pitch_id: PitchId::new(request.pitch_id),
        first_date: parse_date("first_date", &request.first_date)?,
        last_date: parse_date("last_date", &request.last_date)?,
        weekdays: request
            .weekdays
            .iter()
            .map(|w| parse_weekday(w).map_err(translate_domain_error))
            .collect::<Result<_, _>>()?,
        start_times: request
            .start_times
            .iter()
            .map(|t| parse_time(t))
            .collect::<Result<_, _>>()?,
        duration_minutes: request.duration_minutes,
        is_friendly: request.is_friendly,
    };
    let specs = template.expand().map_err(translate_domain_error)?;
    debug!(slots = specs.len(), "Expanded slot template");
    store_slots(persistence, &season, &specs, actor, cause, now)
}

// ---------------------------------------------------------------------------
// Booking transitions
// ---------------------------------------------------------------------------

/// Loads the context, lets the core decide, commits with the read status.
fn run_booking_command(
    persistence: &mut Persistence,
    booking_id: i64,
    command: BookingCommand,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let party = actor.acting_party()?;
    let booking = load_booking(persistence, BookingId::new(booking_id))?;
    let season = load_season(persistence, booking.season_id)?;

    let target_pitch = match &command {
        BookingCommand::UpdateSlot {
            pitch_id: Some(pitch_id),
            ..
        } => *pitch_id,
        _ => booking.pitch_id,
    };
    if target_pitch != booking.pitch_id {
        let pitch = load_pitch(persistence, target_pitch)?;
        if pitch.is_archived {
            return Err(translate_domain_error(DomainError::PitchArchived(
                target_pitch,
            )));
        }
    }
    let pitch_bookings = persistence
        .list_bookings_for_pitch(target_pitch)
        .map_err(translate_persistence_error)?;
    let season_bookings = persistence
        .list_bookings_for_season(booking.season_id)
        .map_err(translate_persistence_error)?;
    let season_results = persistence
        .list_results_for_season(booking.season_id)
        .map_err(translate_persistence_error)?;

    let ctx = BookingContext {
        season: &season,
        pitch_bookings: &pitch_bookings,
        season_bookings: &season_bookings,
        season_results: &season_results,
        now,
    };
    let transition =
        apply_booking_command(&ctx, &booking, command, party, actor.to_audit_actor(), cause)
            .map_err(|e| {
                warn!(booking_id, error = %e, "Booking transition refused");
                translate_core_error(e)
            })?;
    let stored = persistence
        .commit_booking_transition(&transition, booking.status)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id,
        action = %transition.audit_event.action.name,
        from = %booking.status,
        to = %stored.status,
        "Booking transition committed"
    );
    booking_info(&stored, &season, Some(actor), now)
}

/// Requests an available slot for a match.
///
/// # Errors
///
/// Returns an error if the caller is not the home team or an admin, or a
/// booking rule is violated.
pub fn request_slot(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &RequestSlotRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let home_team_id = request
        .home_team_id
        .map(TeamId::new)
        .or(actor.team_id)
        .ok_or_else(|| ApiError::invalid_input("home_team_id", "No home team given"))?;
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::Request {
            home_team_id,
            away_team_id: TeamId::new(request.away_team_id),
            is_friendly: request.is_friendly,
            contact: request.contact.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Confirms or denies a pending request.
///
/// # Errors
///
/// Returns an error if the caller is not the away team or an admin, or the
/// booking is not pending.
pub fn respond_to_request(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &RespondBookingRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let decision = match request.decision {
        BookingDecision::Confirm => RequestDecision::Confirm,
        BookingDecision::Deny => RequestDecision::Deny,
    };
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::Respond {
            decision,
            reason: request.reason.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Cancels a pending request or a confirmed match.
///
/// # Errors
///
/// Returns an error if the caller is not involved, or the booking cannot be
/// cancelled from its current state.
pub fn cancel_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &CancelBookingRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let disposition = if request.withdraw {
        CancelDisposition::Withdraw
    } else {
        CancelDisposition::Release
    };
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::Cancel {
            reason: request.reason.clone(),
            disposition,
        },
        actor,
        cause,
        now,
    )
}

/// Closes an available slot.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the slot is taken.
pub fn block_slot(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &ReasonRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "block_slot")?;
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::Block {
            reason: request.reason.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Reopens a blocked slot.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the slot is not blocked.
pub fn unblock_slot(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "unblock_slot")?;
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::Unblock,
        actor,
        cause,
        now,
    )
}

/// Changes a slot's time, place or flags.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the target pitch is
/// unusable, or the changed slot collides.
pub fn update_slot(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &UpdateSlotRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_slot")?;
    let starts_at = request.starts_at.as_ref().map(instant).transpose()?;
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::UpdateSlot {
            pitch_id: request.pitch_id.map(PitchId::new),
            starts_at,
            duration_minutes: request.duration_minutes,
            is_friendly: request.is_friendly,
            contact: request.contact.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Sets any booking status, bypassing the negotiation table.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the result would
/// violate a booking invariant.
pub fn override_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &OverrideBookingRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "override_booking")?;
    run_booking_command(
        persistence,
        booking_id,
        BookingCommand::AdminOverride {
            status: request.status,
            home_team_id: request.home_team_id.map(TeamId::new),
            away_team_id: request.away_team_id.map(TeamId::new),
            is_friendly: request.is_friendly,
            reason: request.reason.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Lists played matches still waiting for a result.
///
/// Team callers see their own matches; admins see the whole season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn list_bookings_needing_result(
    persistence: &mut Persistence,
    season_id: i64,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ListBookingsResponse, ApiError> {
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let bookings = persistence
        .list_bookings_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;
    let results = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;

    let scope = if actor.is_admin { None } else { actor.team_id };
    let needing = bookings_needing_result(&bookings, &results, scope, now);
    Ok(ListBookingsResponse {
        bookings: booking_infos(&needing, &season, Some(actor), now)?,
    })
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Reports the score of a played match.
///
/// # Errors
///
/// Returns an error if the caller is not one of the teams or an admin, the
/// booking is not a started confirmed match, or an active result exists.
pub fn report_result(
    persistence: &mut Persistence,
    request: ReportResultRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    let party = actor.acting_party()?;
    let booking = load_booking(persistence, BookingId::new(request.booking_id))?;
    let season = load_season(persistence, booking.season_id)?;
    let booking_results = persistence
        .list_results_for_booking(BookingId::new(request.booking_id))
        .map_err(translate_persistence_error)?;

    let ctx = ResultContext {
        season: &season,
        booking_results: &booking_results,
        now,
    };
    let transition = core_report_result(
        &ctx,
        &booking,
        request.home_score,
        request.away_score,
        party,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .insert_result(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id = request.booking_id,
        result_id = ?stored.result_id,
        score = %format!("{}:{}", stored.home_score, stored.away_score),
        "Result reported"
    );
    result_info(&stored)
}

fn run_result_command(
    persistence: &mut Persistence,
    result_id: i64,
    command: ResultCommand,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    let party = actor.acting_party()?;
    let result = load_result(persistence, ResultId::new(result_id))?;
    let season = load_season(persistence, result.season_id)?;
    let booking_results = match result.booking_id {
        Some(booking_id) => persistence
            .list_results_for_booking(booking_id)
            .map_err(translate_persistence_error)?,
        None => Vec::new(),
    };

    let ctx = ResultContext {
        season: &season,
        booking_results: &booking_results,
        now,
    };
    let transition =
        apply_result_command(&ctx, &result, command, party, actor.to_audit_actor(), cause)
            .map_err(|e| {
                warn!(result_id, error = %e, "Result transition refused");
                translate_core_error(e)
            })?;
    let stored = persistence
        .commit_result_transition(&transition, result.status)
        .map_err(translate_persistence_error)?;

    info!(
        result_id,
        action = %transition.audit_event.action.name,
        from = %result.status,
        to = %stored.status,
        "Result transition committed"
    );
    result_info(&stored)
}

/// Confirms or rejects a reported result.
///
/// # Errors
///
/// Returns an error if the caller is not the opposing team or an admin, or
/// the result is not pending.
pub fn respond_to_result(
    persistence: &mut Persistence,
    result_id: i64,
    request: &RespondResultRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    let decision = match request.decision {
        ResultAnswer::Confirm => ResultDecision::Confirm,
        ResultAnswer::Reject => ResultDecision::Reject,
    };
    run_result_command(
        persistence,
        result_id,
        ResultCommand::Respond {
            decision,
            reason: request.reason.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Withdraws the caller's own pending report.
///
/// # Errors
///
/// Returns an error if the caller did not report the result or it is no
/// longer pending.
pub fn cancel_result_report(
    persistence: &mut Persistence,
    result_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    run_result_command(
        persistence,
        result_id,
        ResultCommand::CancelReport,
        actor,
        cause,
        now,
    )
}

/// Corrects a result without constraints.
///
/// # Errors
///
/// Returns an error if the caller is not an admin.
pub fn admin_update_result(
    persistence: &mut Persistence,
    result_id: i64,
    request: &AdminUpdateResultRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_result")?;
    run_result_command(
        persistence,
        result_id,
        ResultCommand::AdminUpdate {
            home_score: request.home_score,
            away_score: request.away_score,
            status: request.status,
            is_valid: request.is_valid,
            reason: request.reason.clone(),
        },
        actor,
        cause,
        now,
    )
}

/// Enters a result directly, with or without a booking.
///
/// A result for a booking is friendly exactly when the booking is.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, a referenced entity does
/// not exist, the booking is not a confirmed match between the given teams,
/// or the booking already has an active result.
pub fn admin_create_result_entry(
    persistence: &mut Persistence,
    request: &AdminCreateResultRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ResultInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_result")?;
    let season_id = SeasonId::new(request.season_id);
    load_season(persistence, season_id)?;
    let home_team_id = TeamId::new(request.home_team_id);
    let away_team_id = TeamId::new(request.away_team_id);
    load_team(persistence, home_team_id)?;
    load_team(persistence, away_team_id)?;
    let booking_id = request.booking_id.map(BookingId::new);
    let is_friendly = match booking_id {
        Some(booking_id) => {
            let booking = load_booking(persistence, booking_id)?;
            if booking.status != BookingStatus::Confirmed {
                return Err(translate_domain_error(DomainError::BookingNotConfirmed {
                    booking_id: Some(booking_id),
                    status: booking.status,
                }));
            }
            if booking.teams() != Some((home_team_id, away_team_id)) {
                return Err(ApiError::invalid_input(
                    "booking_id",
                    format!("Booking {booking_id} is not a match between these teams"),
                ));
            }
            booking.is_friendly
        }
        None => request.is_friendly,
    };

    let draft = MatchResult {
        result_id: None,
        season_id,
        booking_id,
        home_team_id,
        away_team_id,
        home_score: request.home_score,
        away_score: request.away_score,
        status: request.status.unwrap_or(ResultStatus::Confirmed),
        reported_by: None,
        played_at: instant(&request.played_at)?,
        is_valid: request.is_valid.unwrap_or(true),
        is_friendly,
        reported_at: now,
        status_reason: None,
    };
    let transition = admin_create_result(
        draft,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let stored = persistence
        .insert_result(&transition)
        .map_err(translate_persistence_error)?;

    info!(result_id = ?stored.result_id, season_id = request.season_id, "Admin created result");
    result_info(&stored)
}

/// Deletes a result. The audit event keeps its last state.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the result does not
/// exist.
pub fn admin_delete_result_entry(
    persistence: &mut Persistence,
    result_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<DeleteResultResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "delete_result")?;
    let result = load_result(persistence, ResultId::new(result_id))?;

    let event = admin_delete_result(
        &result,
        actor.acting_party()?,
        now,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    persistence
        .delete_result(ResultId::new(result_id), &event)
        .map_err(translate_persistence_error)?;

    info!(result_id, "Admin deleted result");
    Ok(DeleteResultResponse {
        result_id,
        message: format!("Result {result_id} deleted"),
    })
}

/// Lists all results of a season, any status.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season does not exist.
pub fn list_results(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<ListResultsResponse, ApiError> {
    load_season(persistence, SeasonId::new(season_id))?;
    let results = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;
    Ok(ListResultsResponse {
        results: result_infos(&results)?,
    })
}

/// Lists a team's pending results, both directions.
///
/// # Errors
///
/// Returns an error if the caller may not see the team or the season does
/// not exist.
pub fn list_pending_results_for_team(
    persistence: &mut Persistence,
    season_id: i64,
    team_id: Option<i64>,
    actor: &AuthenticatedActor,
) -> Result<ListResultsResponse, ApiError> {
    let team_id = AuthorizationService::resolve_team_scope(
        actor,
        team_id.map(TeamId::new),
        "list_pending_results",
    )?;
    load_season(persistence, SeasonId::new(season_id))?;
    let results: Vec<MatchResult> = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|r| r.status == ResultStatus::Pending && r.involves(team_id))
        .collect();
    Ok(ListResultsResponse {
        results: result_infos(&results)?,
    })
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Collects what a team has to act on or is waiting for.
///
/// # Errors
///
/// Returns an error if the caller may not see the team or the season does
/// not exist.
pub fn get_pending_actions(
    persistence: &mut Persistence,
    season_id: i64,
    team_id: Option<i64>,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<PendingActionsResponse, ApiError> {
    let team_id = AuthorizationService::resolve_team_scope(
        actor,
        team_id.map(TeamId::new),
        "get_pending_actions",
    )?;
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let bookings = persistence
        .list_bookings_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;
    let results = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;

    let pending = pending_actions_for_team(&bookings, &results, team_id, now);
    Ok(PendingActionsResponse {
        season_id,
        team_id: team_id.value(),
        needs_result: booking_infos(&pending.needs_result, &season, Some(actor), now)?,
        incoming_requests: booking_infos(&pending.incoming_requests, &season, Some(actor), now)?,
        outgoing_requests: booking_infos(&pending.outgoing_requests, &season, Some(actor), now)?,
        results_to_confirm: result_infos(&pending.results_to_confirm)?,
    })
}

/// Lists every other active team as a possible opponent.
///
/// # Errors
///
/// Returns an error if the caller may not see the team or the season does
/// not exist.
pub fn get_opponent_options(
    persistence: &mut Persistence,
    season_id: i64,
    team_id: Option<i64>,
    is_friendly: bool,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<OpponentOptionsResponse, ApiError> {
    let team_id = AuthorizationService::resolve_team_scope(
        actor,
        team_id.map(TeamId::new),
        "get_opponent_options",
    )?;
    let season = load_season(persistence, SeasonId::new(season_id))?;
    let bookings = persistence
        .list_bookings_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;
    let results = persistence
        .list_results_for_season(SeasonId::new(season_id))
        .map_err(translate_persistence_error)?;

    Ok(OpponentOptionsResponse {
        season_id,
        team_id: team_id.value(),
        is_friendly,
        options: domain_opponent_options(&season, &bookings, &results, team_id, is_friendly, now),
    })
}

/// Recomputes every team's all-time statistics from all results.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the write fails.
pub fn refresh_all_time_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AllTimeRefreshResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "refresh_all_time_stats")?;
    let results = persistence
        .list_all_results()
        .map_err(translate_persistence_error)?;
    let results_counted = results.iter().filter(|r| r.counts_for_standings()).count();
    let stats = compute_all_time_records(&results);

    let event = AuditEvent::new(
        None,
        None,
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("RecomputeAllTimeStats"),
            Some(format!("{results_counted} results")),
        ),
        StateSnapshot::absent(),
        StateSnapshot::new(format!("teams={}", stats.len())),
        now,
    );
    let teams_updated = persistence
        .replace_all_time_stats(&stats, &event)
        .map_err(translate_persistence_error)?;

    info!(teams_updated, results_counted, "Refreshed all-time statistics");
    Ok(AllTimeRefreshResponse {
        teams_updated,
        results_counted,
    })
}

/// Returns the audit timeline of one entity, oldest first.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the kind is unknown.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    entity_kind: &str,
    entity_id: i64,
    actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "get_audit_timeline")?;
    let entity = EntityRef::from_parts(entity_kind, entity_id).ok_or_else(|| {
        ApiError::invalid_input(
            "entity",
            format!("Unknown audited entity kind '{entity_kind}'"),
        )
    })?;
    let events = persistence
        .get_audit_timeline(entity)
        .map_err(translate_persistence_error)?;
    Ok(AuditTimelineResponse {
        events: events.iter().map(audit_event_info).collect::<Result<_, _>>()?,
    })
}
