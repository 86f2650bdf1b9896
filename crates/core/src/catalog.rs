// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team and pitch administration.

use crate::command::ActingParty;
use crate::error::CoreError;
use crate::state::{PitchTransition, TeamTransition};
use bunte_liga_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{Pitch, Team, validate_pitch_fields, validate_team_fields};
use time::OffsetDateTime;

fn team_snapshot(team: &Team) -> StateSnapshot {
    StateSnapshot::new(format!(
        "name={},short={}",
        team.name,
        team.short_name.as_deref().unwrap_or("-")
    ))
}

fn pitch_snapshot(pitch: &Pitch) -> StateSnapshot {
    StateSnapshot::new(format!(
        "name={},verified={},archived={}",
        pitch.name, pitch.is_verified, pitch.is_archived
    ))
}

/// Validates a new or changed team.
///
/// `before` is `None` when the team is created.
///
/// # Errors
///
/// Returns an error if the acting party is not an admin or a field is
/// invalid.
pub fn save_team(
    before: Option<&Team>,
    team: Team,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TeamTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("edit teams", "an admin"));
    }
    validate_team_fields(&team)?;

    let name = if before.is_some() { "UpdateTeam" } else { "CreateTeam" };
    let audit_event = AuditEvent::new(
        None,
        team.team_id.map(EntityRef::Team),
        actor,
        cause,
        Action::new(name.to_string(), Some(team.name.clone())),
        before.map_or_else(StateSnapshot::absent, team_snapshot),
        team_snapshot(&team),
        now,
    );
    Ok(TeamTransition {
        new_team: team,
        audit_event,
    })
}

/// Validates a new or changed pitch, including archiving.
///
/// `before` is `None` when the pitch is created.
///
/// # Errors
///
/// Returns an error if the acting party is not an admin or a field is
/// invalid.
pub fn save_pitch(
    before: Option<&Pitch>,
    pitch: Pitch,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<PitchTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("edit pitches", "an admin"));
    }
    validate_pitch_fields(&pitch)?;

    let name = match before {
        None => "CreatePitch",
        Some(old) if !old.is_archived && pitch.is_archived => "ArchivePitch",
        Some(_) => "UpdatePitch",
    };
    let audit_event = AuditEvent::new(
        None,
        pitch.pitch_id.map(EntityRef::Pitch),
        actor,
        cause,
        Action::new(name.to_string(), Some(pitch.name.clone())),
        before.map_or_else(StateSnapshot::absent, pitch_snapshot),
        pitch_snapshot(&pitch),
        now,
    );
    Ok(PitchTransition {
        new_pitch: pitch,
        audit_event,
    })
}
