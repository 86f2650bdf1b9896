// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{BookingId, DomainError};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The row changed since it was read; the compare-and-swap update
    /// matched nothing.
    StaleTransition {
        entity: &'static str,
        id: i64,
        expected_status: String,
    },
    /// The booking overlaps active bookings committed in the meantime.
    SlotCollision { conflicting: Vec<BookingId> },
    /// Another active result was committed for the booking in the meantime.
    DuplicateResult { booking_id: BookingId },
    /// A league rule no longer holds against the rows visible at commit.
    RuleViolation(DomainError),
    /// The entity being written carries no id.
    MissingId(&'static str),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::StaleTransition {
                entity,
                id,
                expected_status,
            } => write!(
                f,
                "The {entity} {id} is no longer '{expected_status}'; it was changed concurrently"
            ),
            Self::SlotCollision { conflicting } => {
                let ids: Vec<String> = conflicting.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "The slot overlaps active bookings: {}",
                    ids.join(", ")
                )
            }
            Self::DuplicateResult { booking_id } => {
                write!(f, "Booking {booking_id} already has an active result")
            }
            Self::RuleViolation(err) => write!(f, "{err}"),
            Self::MissingId(entity) => write!(f, "Cannot update a {entity} without an id"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
