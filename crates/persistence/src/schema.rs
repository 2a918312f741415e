// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// Idempotent: all tables are created with `IF NOT EXISTS` and the
/// fixed user rows are seeded with `INSERT OR REPLACE` keyed on the
/// login primary key, so re-running against an existing database is a
/// no-op apart from restoring the seed rows.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS series (
            series_id INTEGER PRIMARY KEY AUTOINCREMENT,
            number INTEGER NOT NULL,
            letter TEXT NOT NULL,
            UNIQUE(number, letter)
        );

        CREATE TABLE IF NOT EXISTS students (
            student_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            sex TEXT NOT NULL CHECK(sex IN ('M', 'F')),
            series_id INTEGER NOT NULL,
            photo_id TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(series_id) REFERENCES series(series_id)
        );

        CREATE INDEX IF NOT EXISTS idx_students_series
            ON students(series_id);

        CREATE TABLE IF NOT EXISTS users (
            login TEXT PRIMARY KEY NOT NULL,
            password TEXT NOT NULL,
            display_name TEXT NOT NULL
        );

        -- Fixed credential table. Plaintext passwords are the specified
        -- contract for this application; see DESIGN.md.
        INSERT OR REPLACE INTO users (login, password, display_name)
            VALUES ('ironman', 'ferro', 'Tony Stark');
        INSERT OR REPLACE INTO users (login, password, display_name)
            VALUES ('spiderman', 'aranha', 'Peter Park');
        INSERT OR REPLACE INTO users (login, password, display_name)
            VALUES ('batman', 'morcego', 'Bruce Wayne');
        ",
    )?;

    info!("Database schema initialized");
    Ok(())
}

/// Verifies that foreign key enforcement is enabled.
///
/// Without it the database cannot guarantee that every student row
/// references an existing series.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &Connection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    Ok(())
}
