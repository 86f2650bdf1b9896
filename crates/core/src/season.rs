// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{ActingParty, SeasonCommand};
use crate::error::CoreError;
use crate::state::{SeasonTransition, season_snapshot};
use bunte_liga_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use bunte_liga_domain::{Season, SeasonStatus, validate_season_settings};
use time::OffsetDateTime;

fn season_event(
    before: StateSnapshot,
    after: &Season,
    name: &str,
    details: Option<String>,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> AuditEvent {
    AuditEvent::new(
        after.season_id,
        after.season_id.map(EntityRef::Season),
        actor,
        cause,
        Action::new(name.to_string(), details),
        before,
        season_snapshot(after),
        now,
    )
}

/// Validates and records the creation of a season.
///
/// New seasons always start in `planning` and are not current.
///
/// # Errors
///
/// Returns an error if the acting party is not an admin or the settings are
/// invalid.
pub fn create_season(
    draft: Season,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<SeasonTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("create a season", "an admin"));
    }
    let mut season = draft;
    season.season_id = None;
    season.status = SeasonStatus::Planning;
    season.is_current = false;
    validate_season_settings(&season)?;

    let details = format!("{} ({})", season.name, season.year);
    let event = season_event(
        StateSnapshot::absent(),
        &season,
        "CreateSeason",
        Some(details),
        now,
        actor,
        cause,
    );
    Ok(SeasonTransition {
        new_season: season,
        audit_event: event,
    })
}

/// Applies an admin command to a season.
///
/// `SetCurrent` only marks this season; clearing the flag on every other
/// season happens atomically in storage.
///
/// # Errors
///
/// Returns an error if:
/// - The acting party is not an admin
/// - A lifecycle transition is not the next forward step
/// - A team registration is duplicated or missing
/// - Updated settings are invalid
pub fn apply_season_command(
    season: &Season,
    command: SeasonCommand,
    party: ActingParty,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<SeasonTransition, CoreError> {
    if !party.is_admin() {
        return Err(CoreError::unauthorized("administer a season", "an admin"));
    }

    let mut next = season.clone();
    let (name, details) = match command {
        SeasonCommand::Transition { target } => {
            season.validate_transition(target)?;
            next.status = target;
            ("TransitionSeason", Some(format!("{} -> {target}", season.status)))
        }
        SeasonCommand::SetCurrent => {
            next.is_current = true;
            ("SetCurrentSeason", None)
        }
        SeasonCommand::RegisterTeam { team_id } => {
            next.register_team(team_id)?;
            ("RegisterTeam", Some(format!("team {team_id}")))
        }
        SeasonCommand::WithdrawTeam { team_id } => {
            next.withdraw_team(team_id)?;
            ("WithdrawTeam", Some(format!("team {team_id}")))
        }
        SeasonCommand::UpdateSettings {
            name,
            play_mode,
            ranking_criteria,
            request_expiry_days,
            friendly_games_release_hours,
        } => {
            if let Some(name) = name {
                next.name = name.trim().to_string();
            }
            if let Some(play_mode) = play_mode {
                next.play_mode = play_mode;
            }
            if let Some(criteria) = ranking_criteria {
                next.ranking_criteria = criteria;
            }
            if let Some(days) = request_expiry_days {
                next.request_expiry_days = days;
            }
            if let Some(hours) = friendly_games_release_hours {
                next.friendly_games_release_hours = hours;
            }
            validate_season_settings(&next)?;
            ("UpdateSeasonSettings", None)
        }
    };

    let event = season_event(
        season_snapshot(season),
        &next,
        name,
        details,
        now,
        actor,
        cause,
    );
    Ok(SeasonTransition {
        new_season: next,
        audit_event: event,
    })
}
