// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking negotiation transitions.
//!
//! `available → pending_away_confirm` (home team requests),
//! `pending_away_confirm → confirmed | available` (away team answers or the
//! requester cancels), `confirmed → available | cancelled` (release or admin
//! withdraw), plus admin block/unblock, slot updates and overrides.

use crate::command::{ActingParty, BookingCommand, CancelDisposition, RequestDecision};
use crate::error::CoreError;
use crate::state::{BookingContext, BookingTransition, booking_snapshot};
use bunte_liga_audit::{Action, Actor, AuditEvent, Cause, EntityRef};
use bunte_liga_domain::{
    Booking, BookingStatus, ContactInfo, DomainError, TeamId, ensure_friendly_rules,
    ensure_no_collision, ensure_rematch_allowed, normalize_reason, validate_pairing,
    validate_slot_time,
};

fn booking_event(
    ctx: &BookingContext<'_>,
    before: &Booking,
    after: &Booking,
    name: &str,
    details: Option<String>,
    actor: Actor,
    cause: Cause,
) -> AuditEvent {
    AuditEvent::new(
        Some(after.season_id),
        after.booking_id.map(EntityRef::Booking),
        actor,
        cause,
        Action::new(name.to_string(), details),
        booking_snapshot(before),
        booking_snapshot(after),
        ctx.now,
    )
}

const fn invalid_transition(booking: &Booking, to: BookingStatus) -> CoreError {
    CoreError::DomainViolation(DomainError::InvalidBookingTransition {
        booking_id: booking.booking_id,
        from: booking.status,
        to,
    })
}

fn require_admin(party: ActingParty, action: &str) -> Result<(), CoreError> {
    if party.is_admin() {
        Ok(())
    } else {
        Err(CoreError::unauthorized(action, "an admin"))
    }
}

/// Applies a booking command, producing the new booking and its audit event.
///
/// The input booking is not modified. Collision, rematch and friendly rules
/// are evaluated against the context; the caller repeats the evaluation
/// inside the storage transaction that commits the result.
///
/// # Errors
///
/// Returns an error if:
/// - The acting party may not perform the command (`Unauthorized`)
/// - The booking's current status does not permit it (conflict kinds)
/// - A league rule forbids it (eligibility kinds)
/// - The input is malformed (validation kinds)
pub fn apply_booking_command(
    ctx: &BookingContext<'_>,
    booking: &Booking,
    command: BookingCommand,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    match command {
        BookingCommand::Request {
            home_team_id,
            away_team_id,
            is_friendly,
            contact,
        } => request_slot(
            ctx,
            booking,
            (home_team_id, away_team_id),
            is_friendly,
            contact,
            party,
            actor,
            cause,
        ),
        BookingCommand::Respond { decision, reason } => {
            respond_to_request(ctx, booking, decision, reason.as_deref(), party, actor, cause)
        }
        BookingCommand::Cancel {
            reason,
            disposition,
        } => cancel_booking(ctx, booking, reason.as_deref(), disposition, party, actor, cause),
        BookingCommand::Block { reason } => {
            require_admin(party, "block a slot")?;
            if !booking.status.can_transition_to(BookingStatus::Blocked) {
                return Err(invalid_transition(booking, BookingStatus::Blocked));
            }
            let mut next = booking.clone();
            next.status = BookingStatus::Blocked;
            next.clear_teams();
            next.status_reason = normalize_reason(reason.as_deref());
            let event = booking_event(
                ctx,
                booking,
                &next,
                "BlockSlot",
                next.status_reason.clone(),
                actor,
                cause,
            );
            Ok(BookingTransition {
                new_booking: next,
                audit_event: event,
                enforce_rematch_limit: false,
            })
        }
        BookingCommand::Unblock => {
            require_admin(party, "unblock a slot")?;
            if booking.status != BookingStatus::Blocked {
                return Err(invalid_transition(booking, BookingStatus::Available));
            }
            let mut next = booking.clone();
            next.status = BookingStatus::Available;
            next.status_reason = None;
            let event = booking_event(ctx, booking, &next, "UnblockSlot", None, actor, cause);
            Ok(BookingTransition {
                new_booking: next,
                audit_event: event,
                enforce_rematch_limit: false,
            })
        }
        BookingCommand::UpdateSlot {
            pitch_id,
            starts_at,
            duration_minutes,
            is_friendly,
            contact,
        } => {
            require_admin(party, "update a slot")?;
            let mut next = booking.clone();
            if let Some(pitch_id) = pitch_id {
                next.pitch_id = pitch_id;
            }
            if let Some(starts_at) = starts_at {
                next.starts_at = starts_at;
            }
            if let Some(minutes) = duration_minutes {
                next.duration_minutes = minutes;
            }
            if let Some(is_friendly) = is_friendly {
                next.is_friendly = is_friendly;
            }
            if let Some(contact) = contact {
                next.contact = contact;
            }
            validate_slot_time(next.starts_at, next.duration_minutes)?;
            ensure_no_collision(ctx.pitch_bookings, &next)?;
            let event = booking_event(ctx, booking, &next, "UpdateSlot", None, actor, cause);
            Ok(BookingTransition {
                new_booking: next,
                audit_event: event,
                enforce_rematch_limit: false,
            })
        }
        BookingCommand::AdminOverride {
            status,
            home_team_id,
            away_team_id,
            is_friendly,
            reason,
        } => admin_override(
            ctx,
            booking,
            status,
            (home_team_id, away_team_id),
            is_friendly,
            reason.as_deref(),
            party,
            actor,
            cause,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn request_slot(
    ctx: &BookingContext<'_>,
    booking: &Booking,
    (home_team_id, away_team_id): (TeamId, TeamId),
    is_friendly: bool,
    contact: Option<ContactInfo>,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    if !party.is_admin_or(Some(home_team_id)) {
        return Err(CoreError::unauthorized(
            "request a slot",
            "the home team or an admin",
        ));
    }
    if booking.status != BookingStatus::Available {
        return Err(CoreError::DomainViolation(DomainError::SlotNotAvailable {
            booking_id: booking.booking_id,
            status: booking.status,
        }));
    }
    validate_pairing(home_team_id, away_team_id)?;

    let season = ctx.season;
    season.ensure_accepts_bookings()?;
    season.ensure_team_active(home_team_id)?;
    season.ensure_team_active(away_team_id)?;

    if booking.has_started(ctx.now) {
        return Err(CoreError::DomainViolation(DomainError::SlotInPast {
            booking_id: booking.booking_id,
        }));
    }
    ensure_friendly_rules(booking, season, is_friendly, ctx.now)?;
    if !is_friendly {
        ensure_rematch_allowed(
            season,
            ctx.season_bookings,
            ctx.season_results,
            home_team_id,
            away_team_id,
            booking.booking_id,
        )?;
    }

    let mut next = booking.clone();
    next.status = BookingStatus::PendingAwayConfirm;
    next.home_team_id = Some(home_team_id);
    next.away_team_id = Some(away_team_id);
    next.is_friendly = booking.is_friendly || is_friendly;
    next.requested_at = Some(ctx.now);
    next.status_reason = None;
    if let Some(contact) = contact {
        next.contact = contact;
    }
    next.check_team_invariant()?;
    ensure_no_collision(ctx.pitch_bookings, &next)?;

    let details = format!(
        "{home_team_id} vs {away_team_id}{}",
        if next.is_friendly { " (friendly)" } else { "" }
    );
    let event = booking_event(ctx, booking, &next, "RequestSlot", Some(details), actor, cause);
    Ok(BookingTransition {
        new_booking: next,
        audit_event: event,
        enforce_rematch_limit: true,
    })
}

fn respond_to_request(
    ctx: &BookingContext<'_>,
    booking: &Booking,
    decision: RequestDecision,
    reason: Option<&str>,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    let target = match decision {
        RequestDecision::Confirm => BookingStatus::Confirmed,
        RequestDecision::Deny => BookingStatus::Available,
    };
    if booking.status != BookingStatus::PendingAwayConfirm {
        return Err(invalid_transition(booking, target));
    }
    if !party.is_admin_or(booking.away_team_id) {
        return Err(CoreError::unauthorized(
            "respond to a booking request",
            "the away team or an admin",
        ));
    }

    let mut next = booking.clone();
    next.status = target;
    let name = match decision {
        RequestDecision::Confirm => {
            next.check_team_invariant()?;
            ensure_no_collision(ctx.pitch_bookings, &next)?;
            if let (false, Some((home, away))) = (next.is_friendly, next.teams()) {
                ensure_rematch_allowed(
                    ctx.season,
                    ctx.season_bookings,
                    ctx.season_results,
                    home,
                    away,
                    next.booking_id,
                )?;
            }
            next.status_reason = None;
            "ConfirmRequest"
        }
        RequestDecision::Deny => {
            next.clear_teams();
            next.status_reason = normalize_reason(reason);
            "DenyRequest"
        }
    };

    let event = booking_event(
        ctx,
        booking,
        &next,
        name,
        next.status_reason.clone(),
        actor,
        cause,
    );
    Ok(BookingTransition {
        new_booking: next,
        audit_event: event,
        enforce_rematch_limit: true,
    })
}

fn cancel_booking(
    ctx: &BookingContext<'_>,
    booking: &Booking,
    reason: Option<&str>,
    disposition: CancelDisposition,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    let target = match disposition {
        CancelDisposition::Release => BookingStatus::Available,
        CancelDisposition::Withdraw => BookingStatus::Cancelled,
    };

    match booking.status {
        BookingStatus::PendingAwayConfirm => {
            if disposition == CancelDisposition::Withdraw {
                return Err(invalid_transition(booking, target));
            }
            if !party.is_admin_or(booking.home_team_id) {
                return Err(CoreError::unauthorized(
                    "cancel a booking request",
                    "the requesting team or an admin",
                ));
            }
        }
        BookingStatus::Confirmed => {
            let allowed = match disposition {
                CancelDisposition::Release => {
                    party.is_admin()
                        || party.team_id().is_some_and(|team| booking.involves(team))
                }
                CancelDisposition::Withdraw => party.is_admin(),
            };
            if !allowed {
                return Err(CoreError::unauthorized(
                    "cancel a confirmed booking",
                    match disposition {
                        CancelDisposition::Release => "one of the teams or an admin",
                        CancelDisposition::Withdraw => "an admin",
                    },
                ));
            }
        }
        _ => return Err(invalid_transition(booking, target)),
    }

    let mut next = booking.clone();
    next.status = target;
    next.clear_teams();
    next.status_reason = normalize_reason(reason);

    let name = match disposition {
        CancelDisposition::Release => "CancelBooking",
        CancelDisposition::Withdraw => "WithdrawBooking",
    };
    let event = booking_event(
        ctx,
        booking,
        &next,
        name,
        next.status_reason.clone(),
        actor,
        cause,
    );
    Ok(BookingTransition {
        new_booking: next,
        audit_event: event,
        enforce_rematch_limit: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn admin_override(
    ctx: &BookingContext<'_>,
    booking: &Booking,
    status: BookingStatus,
    (home_team_id, away_team_id): (Option<TeamId>, Option<TeamId>),
    is_friendly: Option<bool>,
    reason: Option<&str>,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    require_admin(party, "override a booking")?;

    let mut next = booking.clone();
    next.status = status;
    if let Some(is_friendly) = is_friendly {
        next.is_friendly = is_friendly;
    }
    next.status_reason = normalize_reason(reason);

    if status.requires_teams() {
        next.home_team_id = home_team_id.or(booking.home_team_id);
        next.away_team_id = away_team_id.or(booking.away_team_id);
        if next.requested_at.is_none() {
            next.requested_at = Some(ctx.now);
        }
        next.check_team_invariant()?;
        ensure_no_collision(ctx.pitch_bookings, &next)?;
    } else {
        next.clear_teams();
    }

    let event = booking_event(
        ctx,
        booking,
        &next,
        "OverrideBooking",
        Some(format!("{} -> {}", booking.status, status)),
        actor,
        cause,
    );
    Ok(BookingTransition {
        new_booking: next,
        audit_event: event,
        enforce_rematch_limit: false,
    })
}
