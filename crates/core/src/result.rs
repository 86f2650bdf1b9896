// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Result reporting and confirmation.
//!
//! One of the two teams of a played, confirmed booking reports a score; the
//! other team confirms or rejects it. A rejected or withdrawn report no
//! longer blocks a new report for the booking.

use crate::command::{ActingParty, ResultCommand, ResultDecision};
use crate::error::CoreError;
use crate::state::{ResultContext, ResultTransition, result_snapshot};
use bunte_liga_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{
    Booking, BookingStatus, DomainError, MatchResult, ResultStatus, normalize_reason,
    validate_pairing, validate_score,
};
use time::OffsetDateTime;

fn result_event(
    now: OffsetDateTime,
    before: StateSnapshot,
    after: &MatchResult,
    name: &str,
    details: Option<String>,
    actor: Actor,
    cause: Cause,
) -> AuditEvent {
    AuditEvent::new(
        Some(after.season_id),
        after.result_id.map(EntityRef::Result),
        actor,
        cause,
        Action::new(name.to_string(), details),
        before,
        result_snapshot(after),
        now,
    )
}

/// Ensures no pending or confirmed result exists for the booking.
///
/// # Errors
///
/// Returns `DomainError::ResultAlreadyExists` otherwise.
pub fn ensure_no_active_result(
    booking: &Booking,
    booking_results: &[MatchResult],
) -> Result<(), DomainError> {
    let Some(booking_id) = booking.booking_id else {
        return Ok(());
    };
    match booking_results
        .iter()
        .find(|r| r.booking_id == Some(booking_id) && r.status.is_active())
    {
        Some(existing) => Err(DomainError::ResultAlreadyExists {
            booking_id,
            result_id: existing.result_id,
        }),
        None => Ok(()),
    }
}

/// Reports the score of a played, confirmed booking.
///
/// # Errors
///
/// Returns an error if:
/// - Either side scored more than `MAX_SCORE` goals (`InvalidScore`)
/// - The booking is not confirmed (`BookingNotConfirmed`)
/// - The match has not started yet (`MatchNotStarted`)
/// - The season does not accept results
/// - The acting party is not one of the booking's teams (`Unauthorized`)
/// - An active result already exists (`ResultAlreadyExists`)
pub fn report_result(
    ctx: &ResultContext<'_>,
    booking: &Booking,
    home_score: u32,
    away_score: u32,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<ResultTransition, CoreError> {
    validate_score(home_score, away_score)?;
    if booking.status != BookingStatus::Confirmed {
        return Err(CoreError::DomainViolation(
            DomainError::BookingNotConfirmed {
                booking_id: booking.booking_id,
                status: booking.status,
            },
        ));
    }
    let (home_team_id, away_team_id) = booking.teams().ok_or(DomainError::MissingTeams {
        booking_id: booking.booking_id,
    })?;

    let reporter = match party.team_id() {
        Some(team) if booking.involves(team) => team,
        _ => {
            return Err(CoreError::unauthorized(
                "report a result",
                "one of the booking's teams",
            ));
        }
    };

    if !booking.has_started(ctx.now) {
        return Err(CoreError::DomainViolation(DomainError::MatchNotStarted {
            booking_id: booking.booking_id,
        }));
    }
    ctx.season.ensure_accepts_results()?;
    ensure_no_active_result(booking, ctx.booking_results)?;

    let result = MatchResult {
        result_id: None,
        season_id: booking.season_id,
        booking_id: booking.booking_id,
        home_team_id,
        away_team_id,
        home_score,
        away_score,
        status: ResultStatus::Pending,
        reported_by: Some(reporter),
        played_at: booking.starts_at,
        is_valid: true,
        is_friendly: booking.is_friendly,
        reported_at: ctx.now,
        status_reason: None,
    };

    let event = result_event(
        ctx.now,
        StateSnapshot::absent(),
        &result,
        "ReportResult",
        Some(format!("{home_score}:{away_score} reported by {reporter}")),
        actor,
        cause,
    );
    Ok(ResultTransition {
        new_result: result,
        audit_event: event,
    })
}

/// Applies a command to an existing result.
///
/// # Errors
///
/// Returns an error if:
/// - The acting party is not the required party (`Unauthorized`)
/// - The result is not pending for negotiated commands
pub fn apply_result_command(
    ctx: &ResultContext<'_>,
    result: &MatchResult,
    command: ResultCommand,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<ResultTransition, CoreError> {
    let mut next = result.clone();
    let (name, details) = match command {
        ResultCommand::Respond { decision, reason } => {
            let opposing = result.opposing_team();
            if opposing.is_none() || party.team_id() != opposing {
                return Err(CoreError::unauthorized(
                    "respond to a result",
                    "the team that did not report it",
                ));
            }
            let target = match decision {
                ResultDecision::Confirm => ResultStatus::Confirmed,
                ResultDecision::Reject => ResultStatus::Rejected,
            };
            result.validate_transition(target)?;
            next.status = target;
            match decision {
                ResultDecision::Confirm => {
                    next.status_reason = None;
                    ("ConfirmResult", None)
                }
                ResultDecision::Reject => {
                    next.status_reason = normalize_reason(reason.as_deref());
                    ("RejectResult", next.status_reason.clone())
                }
            }
        }
        ResultCommand::CancelReport => {
            if result.reported_by.is_none() || party.team_id() != result.reported_by {
                return Err(CoreError::unauthorized(
                    "cancel a result report",
                    "the reporting team",
                ));
            }
            result.validate_transition(ResultStatus::Withdrawn)?;
            next.status = ResultStatus::Withdrawn;
            ("CancelReport", None)
        }
        ResultCommand::AdminUpdate {
            home_score,
            away_score,
            status,
            is_valid,
            reason,
        } => {
            if !party.is_admin() {
                return Err(CoreError::unauthorized("edit a result", "an admin"));
            }
            if let Some(score) = home_score {
                next.home_score = score;
            }
            if let Some(score) = away_score {
                next.away_score = score;
            }
            if let Some(status) = status {
                next.status = status;
            }
            if let Some(is_valid) = is_valid {
                next.is_valid = is_valid;
            }
            if reason.is_some() {
                next.status_reason = normalize_reason(reason.as_deref());
            }
            validate_score(next.home_score, next.away_score)?;
            ("AdminUpdateResult", next.status_reason.clone())
        }
    };

    let event = result_event(
        ctx.now,
        result_snapshot(result),
        &next,
        name,
        details,
        actor,
        cause,
    );
    Ok(ResultTransition {
        new_result: next,
        audit_event: event,
    })
}

/// Creates a result directly, without negotiation.
///
/// # Errors
///
/// Returns an error if the acting party is not an admin, the teams are
/// the same team, or a score is out of range.
pub fn admin_create_result(
    draft: MatchResult,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<ResultTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("create a result", "an admin"));
    }
    validate_pairing(draft.home_team_id, draft.away_team_id)?;
    validate_score(draft.home_score, draft.away_score)?;

    let mut result = draft;
    result.result_id = None;
    result.reported_at = now;

    let event = result_event(
        now,
        StateSnapshot::absent(),
        &result,
        "AdminCreateResult",
        None,
        actor,
        cause,
    );
    Ok(ResultTransition {
        new_result: result,
        audit_event: event,
    })
}

/// Produces the audit event for deleting a result.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the acting party is not an admin.
pub fn admin_delete_result(
    result: &MatchResult,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<AuditEvent, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("delete a result", "an admin"));
    }
    Ok(AuditEvent::new(
        Some(result.season_id),
        result.result_id.map(EntityRef::Result),
        actor,
        cause,
        Action::new(String::from("AdminDeleteResult"), None),
        result_snapshot(result),
        StateSnapshot::absent(),
        now,
    ))
}
