// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team and pitch mutations.

use std::collections::BTreeMap;

use bunte_liga::{PitchTransition, TeamTransition};
use bunte_liga_audit::{AuditEvent, EntityRef};
use bunte_liga_domain::{AllTimeStats, Pitch, PitchId, Team, TeamId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{PitchValues, TeamValues, to_db_int};
use crate::diesel_schema::{pitches, teams};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// Inserts a new team.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn insert_team(
    conn: &mut SqliteConnection,
    transition: &TeamTransition,
) -> Result<Team, PersistenceError> {
    conn.immediate_transaction(|conn| {
        diesel::insert_into(teams::table)
            .values(&TeamValues::from(&transition.new_team))
            .execute(conn)?;
        let team_id = TeamId::new(get_last_insert_rowid(conn)?);
        let event = transition
            .audit_event
            .clone()
            .with_entity(EntityRef::Team(team_id));
        persist_audit_event(conn, &event)?;

        info!(%team_id, name = %transition.new_team.name, "Created team");
        Ok(transition.new_team.clone().with_id(team_id))
    })
}

/// Updates the editable columns of a team.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the team does not exist.
pub fn update_team(
    conn: &mut SqliteConnection,
    transition: &TeamTransition,
) -> Result<Team, PersistenceError> {
    let team_id = transition
        .new_team
        .team_id
        .ok_or(PersistenceError::MissingId("team"))?;
    conn.immediate_transaction(|conn| {
        let updated = diesel::update(teams::table.filter(teams::team_id.eq(team_id.value())))
            .set(&TeamValues::from(&transition.new_team))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("team {team_id}")));
        }
        persist_audit_event(conn, &transition.audit_event)?;
        info!(%team_id, "Updated team");
        Ok(transition.new_team.clone())
    })
}

/// Overwrites the all-time statistics of every team.
///
/// Teams missing from `stats` are reset to zero.
///
/// # Errors
///
/// Returns an error if a value is out of range or the write fails.
pub fn replace_all_time_stats(
    conn: &mut SqliteConnection,
    stats: &BTreeMap<TeamId, AllTimeStats>,
    event: &AuditEvent,
) -> Result<usize, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let team_ids: Vec<i64> = teams::table.select(teams::team_id).load::<i64>(conn)?;
        for id in &team_ids {
            let team_stats = stats
                .get(&TeamId::new(*id))
                .copied()
                .unwrap_or_default();
            diesel::update(teams::table.filter(teams::team_id.eq(id)))
                .set((
                    teams::all_time_games.eq(to_db_int("games", team_stats.games)?),
                    teams::all_time_goals_for.eq(to_db_int("goals_for", team_stats.goals_for)?),
                    teams::all_time_goals_against
                        .eq(to_db_int("goals_against", team_stats.goals_against)?),
                    teams::all_time_points.eq(to_db_int("points", team_stats.points)?),
                ))
                .execute(conn)?;
        }
        persist_audit_event(conn, event)?;
        info!(teams = team_ids.len(), "Refreshed all-time statistics");
        Ok(team_ids.len())
    })
}

/// Inserts a new pitch.
///
/// # Errors
///
/// Returns an error if the owner team does not exist or the write fails.
pub fn insert_pitch(
    conn: &mut SqliteConnection,
    transition: &PitchTransition,
) -> Result<Pitch, PersistenceError> {
    conn.immediate_transaction(|conn| {
        diesel::insert_into(pitches::table)
            .values(&PitchValues::from_domain(&transition.new_pitch)?)
            .execute(conn)?;
        let pitch_id = PitchId::new(get_last_insert_rowid(conn)?);
        let event = transition
            .audit_event
            .clone()
            .with_entity(EntityRef::Pitch(pitch_id));
        persist_audit_event(conn, &event)?;

        info!(%pitch_id, name = %transition.new_pitch.name, "Created pitch");
        Ok(transition.new_pitch.clone().with_id(pitch_id))
    })
}

/// Updates a pitch, including archiving it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the pitch does not exist.
pub fn update_pitch(
    conn: &mut SqliteConnection,
    transition: &PitchTransition,
) -> Result<Pitch, PersistenceError> {
    let pitch_id = transition
        .new_pitch
        .pitch_id
        .ok_or(PersistenceError::MissingId("pitch"))?;
    conn.immediate_transaction(|conn| {
        let updated = diesel::update(pitches::table.filter(pitches::pitch_id.eq(pitch_id.value())))
            .set(&PitchValues::from_domain(&transition.new_pitch)?)
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("pitch {pitch_id}")));
        }
        persist_audit_event(conn, &transition.audit_event)?;
        info!(%pitch_id, archived = transition.new_pitch.is_archived, "Updated pitch");
        Ok(transition.new_pitch.clone())
    })
}
