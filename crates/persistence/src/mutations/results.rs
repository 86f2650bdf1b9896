// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match result mutations.

use bunte_liga::ResultTransition;
use bunte_liga_audit::{AuditEvent, EntityRef};
use bunte_liga_domain::{BookingStatus, MatchResult, ResultId, ResultStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{info, warn};

use crate::backend::get_last_insert_rowid;
use crate::data_models::ResultValues;
use crate::diesel_schema::match_results;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::bookings::get_booking;
use crate::queries::results::list_results_for_booking;

/// Fails unless the result's booking is still a confirmed match between the
/// result's teams. Returns the booking's current friendly flag.
fn recheck_booking(
    conn: &mut SqliteConnection,
    result: &MatchResult,
) -> Result<Option<bool>, PersistenceError> {
    let Some(booking_id) = result.booking_id else {
        return Ok(None);
    };
    let booking = get_booking(conn, booking_id)?;
    let same_pair = booking.teams() == Some((result.home_team_id, result.away_team_id));
    if booking.status != BookingStatus::Confirmed || !same_pair {
        warn!(
            %booking_id,
            status = %booking.status,
            same_pair,
            "Booking changed before the result was recorded"
        );
        return Err(PersistenceError::StaleTransition {
            entity: "booking",
            id: booking_id.value(),
            expected_status: BookingStatus::Confirmed.as_str().to_string(),
        });
    }
    Ok(Some(booking.is_friendly))
}

/// Fails if another active result exists for the result's booking.
fn recheck_duplicate(
    conn: &mut SqliteConnection,
    result: &MatchResult,
) -> Result<(), PersistenceError> {
    let Some(booking_id) = result.booking_id else {
        return Ok(());
    };
    if !result.status.is_active() {
        return Ok(());
    }
    let duplicate = list_results_for_booking(conn, booking_id)?
        .iter()
        .any(|other| other.result_id != result.result_id && other.status.is_active());
    if duplicate {
        warn!(%booking_id, "Duplicate active result detected at commit");
        return Err(PersistenceError::DuplicateResult { booking_id });
    }
    Ok(())
}

/// Inserts a new result.
///
/// A result linked to a booking takes the booking's friendly flag.
///
/// # Errors
///
/// Returns `PersistenceError::StaleTransition` if the linked booking is no
/// longer a confirmed match between the result's teams, or
/// `PersistenceError::DuplicateResult` if the booking already has an active
/// result.
pub fn insert_result(
    conn: &mut SqliteConnection,
    transition: &ResultTransition,
) -> Result<MatchResult, PersistenceError> {
    let mut result = transition.new_result.clone();
    conn.immediate_transaction(|conn| {
        if let Some(is_friendly) = recheck_booking(conn, &result)? {
            result.is_friendly = is_friendly;
        }
        recheck_duplicate(conn, &result)?;

        diesel::insert_into(match_results::table)
            .values(&ResultValues::from_domain(&result)?)
            .execute(conn)?;
        let result_id = ResultId::new(get_last_insert_rowid(conn)?);
        let event = transition
            .audit_event
            .clone()
            .with_entity(EntityRef::Result(result_id));
        persist_audit_event(conn, &event)?;

        info!(
            %result_id,
            home_score = result.home_score,
            away_score = result.away_score,
            status = %result.status,
            "Recorded result"
        );
        result.result_id = Some(result_id);
        Ok(result.clone())
    })
}

/// Commits a result transition if the result is still in `expected_status`.
///
/// # Errors
///
/// Returns `PersistenceError::StaleTransition` if the status changed since
/// it was read, or `PersistenceError::DuplicateResult` if re-activating it
/// would give its booking two active results.
pub fn commit_result_transition(
    conn: &mut SqliteConnection,
    transition: &ResultTransition,
    expected_status: ResultStatus,
) -> Result<MatchResult, PersistenceError> {
    let result = &transition.new_result;
    let result_id = result
        .result_id
        .ok_or(PersistenceError::MissingId("result"))?;

    conn.immediate_transaction(|conn| {
        recheck_duplicate(conn, result)?;

        let updated = diesel::update(
            match_results::table
                .filter(match_results::result_id.eq(result_id.value()))
                .filter(match_results::status.eq(expected_status.as_str())),
        )
        .set(&ResultValues::from_domain(result)?)
        .execute(conn)?;
        if updated == 0 {
            let exists: bool = diesel::select(diesel::dsl::exists(
                match_results::table.filter(match_results::result_id.eq(result_id.value())),
            ))
            .get_result(conn)?;
            if !exists {
                return Err(PersistenceError::NotFound(format!("result {result_id}")));
            }
            warn!(%result_id, expected = %expected_status, "Stale result transition");
            return Err(PersistenceError::StaleTransition {
                entity: "result",
                id: result_id.value(),
                expected_status: expected_status.as_str().to_string(),
            });
        }

        persist_audit_event(conn, &transition.audit_event)?;
        info!(
            %result_id,
            from = %expected_status,
            to = %result.status,
            "Committed result transition"
        );
        Ok(result.clone())
    })
}

/// Deletes a result and records the deletion.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the result does not exist.
pub fn delete_result(
    conn: &mut SqliteConnection,
    result_id: ResultId,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let deleted = diesel::delete(
            match_results::table.filter(match_results::result_id.eq(result_id.value())),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!("result {result_id}")));
        }
        persist_audit_event(conn, event)?;
        info!(%result_id, "Deleted result");
        Ok(())
    })
}
