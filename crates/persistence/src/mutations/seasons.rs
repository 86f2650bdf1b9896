// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season mutations.

use bunte_liga::SeasonTransition;
use bunte_liga_audit::EntityRef;
use bunte_liga_domain::{Season, SeasonId, SeasonStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::data_models::SeasonValues;
use crate::diesel_schema::{season_teams, seasons};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

fn replace_registrations(
    conn: &mut SqliteConnection,
    season: &Season,
    season_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(season_teams::table.filter(season_teams::season_id.eq(season_id)))
        .execute(conn)?;
    for registration in &season.teams {
        diesel::insert_into(season_teams::table)
            .values((
                season_teams::season_id.eq(season_id),
                season_teams::team_id.eq(registration.team_id.value()),
                season_teams::status.eq(registration.status.as_str()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a new season and its creation event.
///
/// # Returns
///
/// The season with its assigned id.
///
/// # Errors
///
/// Returns an error if a registered team does not exist or the write fails.
pub fn insert_season(
    conn: &mut SqliteConnection,
    transition: &SeasonTransition,
) -> Result<Season, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let values = SeasonValues::from_domain(&transition.new_season)?;
        diesel::insert_into(seasons::table)
            .values(&values)
            .execute(conn)?;
        let id: i64 = get_last_insert_rowid(conn)?;
        replace_registrations(conn, &transition.new_season, id)?;

        let season_id = SeasonId::new(id);
        let mut event = transition
            .audit_event
            .clone()
            .with_entity(EntityRef::Season(season_id));
        event.season_id = Some(season_id);
        persist_audit_event(conn, &event)?;

        info!(season_id = id, "Created season");
        Ok(transition.new_season.clone().with_id(season_id))
    })
}

/// Commits a season change if the season is still in `expected_status`.
///
/// Marking a season current clears the flag on every other season in the
/// same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::StaleTransition` if the status changed since
/// it was read, or `PersistenceError::NotFound` if the season is gone.
pub fn update_season(
    conn: &mut SqliteConnection,
    transition: &SeasonTransition,
    expected_status: SeasonStatus,
) -> Result<Season, PersistenceError> {
    let season = &transition.new_season;
    let id: i64 = season
        .season_id
        .ok_or(PersistenceError::MissingId("season"))?
        .value();

    conn.immediate_transaction(|conn| {
        if season.is_current {
            diesel::update(
                seasons::table
                    .filter(seasons::season_id.ne(id))
                    .filter(seasons::is_current.eq(true)),
            )
            .set(seasons::is_current.eq(false))
            .execute(conn)?;
        }

        let values = SeasonValues::from_domain(season)?;
        let updated = diesel::update(
            seasons::table
                .filter(seasons::season_id.eq(id))
                .filter(seasons::status.eq(expected_status.as_str())),
        )
        .set(&values)
        .execute(conn)?;
        if updated == 0 {
            let exists: bool = diesel::select(diesel::dsl::exists(
                seasons::table.filter(seasons::season_id.eq(id)),
            ))
            .get_result(conn)?;
            return Err(if exists {
                PersistenceError::StaleTransition {
                    entity: "season",
                    id,
                    expected_status: expected_status.as_str().to_string(),
                }
            } else {
                PersistenceError::NotFound(format!("season {id}"))
            });
        }

        replace_registrations(conn, season, id)?;
        persist_audit_event(conn, &transition.audit_event)?;

        info!(
            season_id = id,
            status = %season.status,
            is_current = season.is_current,
            "Updated season"
        );
        Ok(season.clone())
    })
}
