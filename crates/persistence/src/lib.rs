// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Bunte Liga backend.
//!
//! Seasons, teams, pitches, bookings, results and audit events are stored in
//! `SQLite` through Diesel. Instants are stored as Unix seconds.
//!
//! ## Commit contract
//!
//! The core crate decides transitions against data the caller loaded. The
//! commit functions here then:
//! - open a `BEGIN IMMEDIATE` transaction
//! - re-run the slot collision and duplicate-result checks on fresh rows
//! - update with `WHERE id = ? AND status = <expected>`; zero affected rows
//!   fails with `PersistenceError::StaleTransition`
//! - write the audit event in the same transaction
//!
//! Nothing is retried.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::Path;

use bunte_liga::{
    BookingTransition, PitchTransition, ResultTransition, SeasonTransition, TeamTransition,
};
use bunte_liga_audit::{AuditEvent, EntityRef};
use bunte_liga_domain::{
    AllTimeStats, Booking, BookingId, BookingStatus, MatchResult, Pitch, PitchId, ResultId,
    ResultStatus, Season, SeasonId, SeasonStatus, Team, TeamId,
};
use diesel::SqliteConnection;
use time::OffsetDateTime;

use crate::backend::DatabaseTarget;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::open(&DatabaseTarget::fresh_memory())
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is shared safely with other processes: commits are
    /// compare-and-swap updates under an `IMMEDIATE` lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Self::open(&DatabaseTarget::file(path.as_ref()))
    }

    fn open(target: &DatabaseTarget) -> Result<Self, PersistenceError> {
        Ok(Self {
            conn: backend::open(target)?,
        })
    }

    // ========================================================================
    // Seasons
    // ========================================================================

    /// Stores a newly created season.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn insert_season(
        &mut self,
        transition: &SeasonTransition,
    ) -> Result<Season, PersistenceError> {
        mutations::seasons::insert_season(&mut self.conn, transition)
    }

    /// Commits a season change read in `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StaleTransition` if the season changed concurrently.
    pub fn update_season(
        &mut self,
        transition: &SeasonTransition,
        expected_status: SeasonStatus,
    ) -> Result<Season, PersistenceError> {
        mutations::seasons::update_season(&mut self.conn, transition, expected_status)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub fn get_season(&mut self, season_id: SeasonId) -> Result<Season, PersistenceError> {
        queries::seasons::get_season(&mut self.conn, season_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_seasons(&mut self) -> Result<Vec<Season>, PersistenceError> {
        queries::seasons::list_seasons(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_current_season(&mut self) -> Result<Option<Season>, PersistenceError> {
        queries::seasons::get_current_season(&mut self.conn)
    }

    // ========================================================================
    // Teams & pitches
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn insert_team(&mut self, transition: &TeamTransition) -> Result<Team, PersistenceError> {
        mutations::catalog::insert_team(&mut self.conn, transition)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn update_team(&mut self, transition: &TeamTransition) -> Result<Team, PersistenceError> {
        mutations::catalog::update_team(&mut self.conn, transition)
    }

    /// Overwrites every team's all-time statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_all_time_stats(
        &mut self,
        stats: &BTreeMap<TeamId, AllTimeStats>,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        mutations::catalog::replace_all_time_stats(&mut self.conn, stats, event)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn get_team(&mut self, team_id: TeamId) -> Result<Team, PersistenceError> {
        queries::catalog::get_team(&mut self.conn, team_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_teams(&mut self) -> Result<Vec<Team>, PersistenceError> {
        queries::catalog::list_teams(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn insert_pitch(
        &mut self,
        transition: &PitchTransition,
    ) -> Result<Pitch, PersistenceError> {
        mutations::catalog::insert_pitch(&mut self.conn, transition)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the pitch does not exist.
    pub fn update_pitch(
        &mut self,
        transition: &PitchTransition,
    ) -> Result<Pitch, PersistenceError> {
        mutations::catalog::update_pitch(&mut self.conn, transition)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the pitch does not exist.
    pub fn get_pitch(&mut self, pitch_id: PitchId) -> Result<Pitch, PersistenceError> {
        queries::catalog::get_pitch(&mut self.conn, pitch_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pitches(&mut self, include_archived: bool) -> Result<Vec<Pitch>, PersistenceError> {
        queries::catalog::list_pitches(&mut self.conn, include_archived)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Stores a new slot after re-checking collisions.
    ///
    /// # Errors
    ///
    /// Returns `SlotCollision` if the slot overlaps an active booking.
    pub fn insert_slot(
        &mut self,
        transition: &BookingTransition,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::insert_slot(&mut self.conn, transition)
    }

    /// Commits a booking transition decided against a booking read in
    /// `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StaleTransition`, `SlotCollision` or `NotFound`.
    pub fn commit_booking_transition(
        &mut self,
        transition: &BookingTransition,
        expected_status: BookingStatus,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::commit_booking_transition(&mut self.conn, transition, expected_status)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist.
    pub fn get_booking(&mut self, booking_id: BookingId) -> Result<Booking, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_season(
        &mut self,
        season_id: SeasonId,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_season(&mut self.conn, season_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_pitch(
        &mut self,
        pitch_id: PitchId,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_pitch(&mut self.conn, pitch_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_available_bookings(
        &mut self,
        season_id: SeasonId,
        now: OffsetDateTime,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_available_bookings(&mut self.conn, season_id, now)
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Stores a new result after re-checking for an active duplicate.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResult` if the booking already has an active result.
    pub fn insert_result(
        &mut self,
        transition: &ResultTransition,
    ) -> Result<MatchResult, PersistenceError> {
        mutations::results::insert_result(&mut self.conn, transition)
    }

    /// Commits a result transition decided against a result read in
    /// `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StaleTransition`, `DuplicateResult` or `NotFound`.
    pub fn commit_result_transition(
        &mut self,
        transition: &ResultTransition,
        expected_status: ResultStatus,
    ) -> Result<MatchResult, PersistenceError> {
        mutations::results::commit_result_transition(&mut self.conn, transition, expected_status)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the result does not exist.
    pub fn delete_result(
        &mut self,
        result_id: ResultId,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::results::delete_result(&mut self.conn, result_id, event)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the result does not exist.
    pub fn get_result(&mut self, result_id: ResultId) -> Result<MatchResult, PersistenceError> {
        queries::results::get_result(&mut self.conn, result_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_results_for_season(
        &mut self,
        season_id: SeasonId,
    ) -> Result<Vec<MatchResult>, PersistenceError> {
        queries::results::list_results_for_season(&mut self.conn, season_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_results_for_booking(
        &mut self,
        booking_id: BookingId,
    ) -> Result<Vec<MatchResult>, PersistenceError> {
        queries::results::list_results_for_booking(&mut self.conn, booking_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_results(&mut self) -> Result<Vec<MatchResult>, PersistenceError> {
        queries::results::list_all_results(&mut self.conn)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Stores an audit event that has no accompanying state change.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Returns the audit events of one entity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        entity: EntityRef,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, entity)
    }
}
