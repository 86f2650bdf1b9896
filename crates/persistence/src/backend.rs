// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Queries and mutations live in `queries/` and `mutations/`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits for the `IMMEDIATE` lock held by another
/// connection before the commit fails.
const BUSY_TIMEOUT_MS: u32 = 5000;

static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Where the league database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A private in-memory database, unique per connection.
    Memory { name: String },
    /// A database file shared with other processes.
    File(PathBuf),
}

impl DatabaseTarget {
    /// A fresh in-memory target that no other connection shares.
    #[must_use]
    pub fn fresh_memory() -> Self {
        let id = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self::Memory {
            name: format!("bunte_liga_{id}"),
        }
    }

    #[must_use]
    pub fn file(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }

    fn url(&self) -> Result<String, PersistenceError> {
        match self {
            Self::Memory { name } => Ok(format!("file:{name}?mode=memory&cache=shared")),
            Self::File(path) => path.to_str().map(str::to_string).ok_or_else(|| {
                PersistenceError::InitializationError(format!(
                    "Database path is not valid UTF-8: {}",
                    path.display()
                ))
            }),
        }
    }

    /// Settings applied to every new connection, in order.
    fn pragmas(&self) -> Vec<String> {
        let mut pragmas = vec![
            String::from("PRAGMA foreign_keys = ON"),
            format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
        ];
        if matches!(self, Self::File(_)) {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Returns the row id assigned by the last insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Opens the database, applies connection settings and brings the schema
/// up to date.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a setting is
/// rejected, foreign keys stay disabled, or a migration fails.
pub fn open(target: &DatabaseTarget) -> Result<SqliteConnection, PersistenceError> {
    let url = target.url()?;
    info!(database = %url, "Opening league database");

    let mut conn = SqliteConnection::establish(&url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    for pragma in target.pragmas() {
        debug!(%pragma, "Applying connection setting");
        diesel::sql_query(&pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }
    ensure_foreign_keys(&mut conn)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(count = applied.len(), "Applied pending migrations");

    Ok(conn)
}
