// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::ActingParty;
use crate::error::CoreError;
use crate::state::{BookingTransition, BulkSlotOutcome, booking_snapshot};
use bunte_liga_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use bunte_liga_domain::{
    Booking, DomainError, Pitch, PitchId, Season, SlotSpec, ensure_no_collision,
    validate_slot_time,
};
use time::OffsetDateTime;

fn plan_slot(
    season: &Season,
    pitch: &Pitch,
    existing: &[Booking],
    spec: &SlotSpec,
    now: OffsetDateTime,
) -> Result<Booking, DomainError> {
    let season_id = season
        .season_id
        .ok_or(DomainError::InvalidSeasonSetting {
            field: "season_id",
            reason: String::from("season has not been saved"),
        })?;
    season.ensure_accepts_bookings()?;
    if pitch.pitch_id != Some(spec.pitch_id) {
        return Err(DomainError::PitchNotFound(spec.pitch_id));
    }
    if pitch.is_archived {
        return Err(DomainError::PitchArchived(spec.pitch_id));
    }
    validate_slot_time(spec.starts_at, spec.duration_minutes)?;

    let slot = Booking::new_slot(
        season_id,
        spec.pitch_id,
        spec.starts_at,
        spec.duration_minutes,
        spec.is_friendly,
        now,
    );
    ensure_no_collision(existing, &slot)?;
    Ok(slot)
}

fn create_event(
    slot: &Booking,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> AuditEvent {
    AuditEvent::new(
        Some(slot.season_id),
        None,
        actor,
        cause,
        Action::new(String::from("CreateSlot"), None),
        StateSnapshot::absent(),
        booking_snapshot(slot),
        now,
    )
}

/// Creates a single available slot.
///
/// # Errors
///
/// Returns an error if:
/// - The acting party is not an admin
/// - The season does not accept bookings or the pitch is archived
/// - The duration is invalid
/// - The slot overlaps an active booking on the pitch
#[allow(clippy::too_many_arguments)]
pub fn create_slot(
    season: &Season,
    pitch: &Pitch,
    pitch_bookings: &[Booking],
    spec: &SlotSpec,
    now: OffsetDateTime,
    party: ActingParty,
    actor: Actor,
    cause: Cause,
) -> Result<BookingTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("create a slot", "an admin"));
    }
    let slot = plan_slot(season, pitch, pitch_bookings, spec, now)?;
    let audit_event = create_event(&slot, now, actor, cause);
    Ok(BookingTransition {
        new_booking: slot,
        audit_event,
        enforce_rematch_limit: false,
    })
}

/// Validates a batch of slots, one outcome per input in input order.
///
/// A failing item never aborts the batch. `bookings` must contain the
/// bookings of every pitch referenced by the specs.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the acting party is not an admin.
#[allow(clippy::too_many_arguments)]
pub fn plan_bulk_slots(
    season: &Season,
    pitches: &[Pitch],
    bookings: &[Booking],
    specs: &[SlotSpec],
    now: OffsetDateTime,
    party: ActingParty,
    actor: &Actor,
    cause: &Cause,
) -> Result<Vec<BulkSlotOutcome>, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("create slots", "an admin"));
    }

    let find_pitch = |id: PitchId| pitches.iter().find(|p| p.pitch_id == Some(id));

    Ok(specs
        .iter()
        .map(|spec| {
            let planned = find_pitch(spec.pitch_id)
                .ok_or(DomainError::PitchNotFound(spec.pitch_id))
                .and_then(|pitch| plan_slot(season, pitch, bookings, spec, now));
            match planned {
                Ok(slot) => {
                    let audit_event = create_event(&slot, now, actor.clone(), cause.clone());
                    BulkSlotOutcome::Planned(Box::new(BookingTransition {
                        new_booking: slot,
                        audit_event,
                        enforce_rematch_limit: false,
                    }))
                }
                Err(error) => BulkSlotOutcome::Skipped { spec: *spec, error },
            }
        })
        .collect())
}
