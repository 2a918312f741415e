// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence layer for the school roster application.
//!
//! This crate is deliberately "dumb": each operation executes exactly
//! one SQL statement (or a bounded micro-transaction, for the series
//! upsert) against a single `rusqlite` connection and returns plain
//! domain records. No validation and no branching beyond found/None
//! happens here; anything smarter is a business rule and belongs in
//! `roster-api`.
//!
//! In-memory databases back all tests; production opens a file.

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

mod data_models;
mod error;
mod mutations;
mod queries;
mod schema;

#[cfg(test)]
mod tests;

pub use data_models::UserData;
pub use error::PersistenceError;

use roster_domain::{Series, Sex, Student, StudentWithSeries};
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// Facade over a single `SQLite` connection.
///
/// Owns the connection for its whole lifetime; the server shares one
/// instance behind a mutex. Every write commits immediately.
pub struct SqlitePersistence {
    conn: Connection,
}

impl SqlitePersistence {
    /// Creates a persistence layer backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or the
    /// schema cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Creates a persistence layer backed by a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, PersistenceError> {
        schema::initialize_schema(&conn)?;
        schema::verify_foreign_key_enforcement(&conn)?;
        info!("Persistence layer ready");
        Ok(Self { conn })
    }

    /// Lists all series in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_series(&self) -> Result<Vec<Series>, PersistenceError> {
        queries::list_series(&self.conn)
    }

    /// Lists all series ordered by number then letter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_series_ordered(&self) -> Result<Vec<Series>, PersistenceError> {
        queries::list_series_ordered(&self.conn)
    }

    /// Finds a series by its unique `(number, letter)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_series(
        &self,
        number: i32,
        letter: char,
    ) -> Result<Option<Series>, PersistenceError> {
        queries::find_series(&self.conn, number, letter)
    }

    /// Inserts a new series row.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the pair already exists.
    pub fn insert_series(&self, number: i32, letter: char) -> Result<Series, PersistenceError> {
        mutations::insert_series(&self.conn, number, letter)
    }

    /// Atomically inserts a series or returns the existing row.
    ///
    /// # Returns
    ///
    /// The series and whether it already existed before this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn upsert_series(
        &mut self,
        number: i32,
        letter: char,
    ) -> Result<(Series, bool), PersistenceError> {
        mutations::upsert_series(&mut self.conn, number, letter)
    }

    /// Gets a student by id, joined with its series.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_student(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentWithSeries>, PersistenceError> {
        queries::get_student(&self.conn, student_id)
    }

    /// Lists all students joined with their series.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_students(&self) -> Result<Vec<StudentWithSeries>, PersistenceError> {
        queries::list_students(&self.conn)
    }

    /// Inserts a new student row.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if `series_id` does not reference
    /// an existing series.
    pub fn insert_student(
        &self,
        name: &str,
        sex: Sex,
        series_id: i64,
        photo_id: Option<&str>,
    ) -> Result<Student, PersistenceError> {
        mutations::insert_student(&self.conn, name, sex, series_id, photo_id)
    }

    /// Overwrites all mutable fields of a student row.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_student(
        &self,
        student_id: i64,
        name: &str,
        sex: Sex,
        series_id: i64,
        photo_id: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::update_student(&self.conn, student_id, name, sex, series_id, photo_id)
    }

    /// Deletes a student row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_student(&self, student_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_student(&self.conn, student_id)
    }

    /// Finds a user by exact `(login, password)` match.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::find_user(&self.conn, login, password)
    }
}
