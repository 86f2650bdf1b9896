// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match result queries.

use bunte_liga_domain::{BookingId, MatchResult, ResultId, SeasonId};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::ResultRow;
use crate::diesel_schema::match_results;
use crate::error::PersistenceError;

fn into_results(rows: Vec<ResultRow>) -> Result<Vec<MatchResult>, PersistenceError> {
    rows.into_iter().map(MatchResult::try_from).collect()
}

/// Loads a result.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the result does not exist.
pub fn get_result(
    conn: &mut SqliteConnection,
    result_id: ResultId,
) -> Result<MatchResult, PersistenceError> {
    match_results::table
        .filter(match_results::result_id.eq(result_id.value()))
        .select(ResultRow::as_select())
        .first::<ResultRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("result {result_id}")))?
        .try_into()
}

/// Lists the results of a season, oldest match first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_results_for_season(
    conn: &mut SqliteConnection,
    season_id: SeasonId,
) -> Result<Vec<MatchResult>, PersistenceError> {
    let rows = match_results::table
        .filter(match_results::season_id.eq(season_id.value()))
        .order((match_results::played_at.asc(), match_results::result_id.asc()))
        .select(ResultRow::as_select())
        .load::<ResultRow>(conn)?;
    into_results(rows)
}

/// Lists every result ever recorded for a booking, including rejected and
/// withdrawn reports.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_results_for_booking(
    conn: &mut SqliteConnection,
    booking_id: BookingId,
) -> Result<Vec<MatchResult>, PersistenceError> {
    let rows = match_results::table
        .filter(match_results::booking_id.eq(booking_id.value()))
        .order(match_results::result_id.asc())
        .select(ResultRow::as_select())
        .load::<ResultRow>(conn)?;
    into_results(rows)
}

/// Lists all results of all seasons.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_all_results(conn: &mut SqliteConnection) -> Result<Vec<MatchResult>, PersistenceError> {
    let rows = match_results::table
        .order((match_results::played_at.asc(), match_results::result_id.asc()))
        .select(ResultRow::as_select())
        .load::<ResultRow>(conn)?;
    into_results(rows)
}
