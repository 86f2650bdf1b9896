// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team and pitch queries.

use bunte_liga_domain::{Pitch, PitchId, Team, TeamId};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{PitchRow, TeamRow};
use crate::diesel_schema::{pitches, teams};
use crate::error::PersistenceError;

/// Loads a team.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the team does not exist.
pub fn get_team(conn: &mut SqliteConnection, team_id: TeamId) -> Result<Team, PersistenceError> {
    teams::table
        .filter(teams::team_id.eq(team_id.value()))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("team {team_id}")))?
        .try_into()
}

/// Lists all teams ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_teams(conn: &mut SqliteConnection) -> Result<Vec<Team>, PersistenceError> {
    teams::table
        .order((teams::name.asc(), teams::team_id.asc()))
        .select(TeamRow::as_select())
        .load::<TeamRow>(conn)?
        .into_iter()
        .map(Team::try_from)
        .collect()
}

/// Loads a pitch.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the pitch does not exist.
pub fn get_pitch(conn: &mut SqliteConnection, pitch_id: PitchId) -> Result<Pitch, PersistenceError> {
    pitches::table
        .filter(pitches::pitch_id.eq(pitch_id.value()))
        .select(PitchRow::as_select())
        .first::<PitchRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("pitch {pitch_id}")))?
        .try_into()
}

/// Lists pitches ordered by name, optionally including archived ones.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_pitches(
    conn: &mut SqliteConnection,
    include_archived: bool,
) -> Result<Vec<Pitch>, PersistenceError> {
    let mut query = pitches::table
        .order((pitches::name.asc(), pitches::pitch_id.asc()))
        .select(PitchRow::as_select())
        .into_boxed();
    if !include_archived {
        query = query.filter(pitches::is_archived.eq(false));
    }
    query
        .load::<PitchRow>(conn)?
        .into_iter()
        .map(Pitch::try_from)
        .collect()
}
