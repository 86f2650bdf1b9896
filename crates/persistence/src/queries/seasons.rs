// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{Season, SeasonId};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{SeasonRow, SeasonTeamRow};
use crate::diesel_schema::{season_teams, seasons};
use crate::error::PersistenceError;

fn registrations_for(
    conn: &mut SqliteConnection,
    season_ids: &[i64],
) -> Result<Vec<SeasonTeamRow>, PersistenceError> {
    Ok(season_teams::table
        .filter(season_teams::season_id.eq_any(season_ids))
        .order((season_teams::season_id.asc(), season_teams::team_id.asc()))
        .select(SeasonTeamRow::as_select())
        .load::<SeasonTeamRow>(conn)?)
}

/// Loads a season with its team registrations.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the season does not exist.
pub fn get_season(
    conn: &mut SqliteConnection,
    season_id: SeasonId,
) -> Result<Season, PersistenceError> {
    let row: SeasonRow = seasons::table
        .filter(seasons::season_id.eq(season_id.value()))
        .select(SeasonRow::as_select())
        .first::<SeasonRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("season {season_id}")))?;
    let registrations = registrations_for(conn, &[row.season_id])?;
    row.into_domain(&registrations)
}

/// Lists all seasons, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_seasons(conn: &mut SqliteConnection) -> Result<Vec<Season>, PersistenceError> {
    let rows: Vec<SeasonRow> = seasons::table
        .order((seasons::year.desc(), seasons::season_id.desc()))
        .select(SeasonRow::as_select())
        .load::<SeasonRow>(conn)?;
    let ids: Vec<i64> = rows.iter().map(|r| r.season_id).collect();
    let registrations = registrations_for(conn, &ids)?;
    rows.into_iter()
        .map(|row| row.into_domain(&registrations))
        .collect()
}

/// Returns the season flagged as current, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn get_current_season(
    conn: &mut SqliteConnection,
) -> Result<Option<Season>, PersistenceError> {
    let row: Option<SeasonRow> = seasons::table
        .filter(seasons::is_current.eq(true))
        .select(SeasonRow::as_select())
        .first::<SeasonRow>(conn)
        .optional()?;
    match row {
        Some(row) => {
            let registrations = registrations_for(conn, &[row.season_id])?;
            row.into_domain(&registrations).map(Some)
        }
        None => Ok(None),
    }
}
