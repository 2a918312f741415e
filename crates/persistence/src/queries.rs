// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use roster_domain::{Series, Sex, Student, StudentWithSeries};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::data_models::UserData;
use crate::error::PersistenceError;

const STUDENT_JOIN_SELECT: &str = "SELECT a.student_id, a.name, a.sex, a.series_id, a.photo_id,
            s.number, s.letter
     FROM students a
     INNER JOIN series s ON a.series_id = s.series_id";

/// Maps a `(series_id, number, letter)` row to a [`Series`].
fn series_from_row(row: &Row<'_>) -> rusqlite::Result<Series> {
    let letter_raw: String = row.get(2)?;
    let letter: char = Series::parse_letter(&letter_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Series {
        series_id: row.get(0)?,
        number: row.get(1)?,
        letter,
    })
}

/// Maps a joined student row to a [`StudentWithSeries`].
///
/// The empty-string photo sentinel stored in SQLite becomes `None`.
fn student_from_row(row: &Row<'_>) -> rusqlite::Result<StudentWithSeries> {
    let sex_raw: String = row.get(2)?;
    let sex: Sex = sex_raw.parse().map_err(|e: roster_domain::DomainError| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let photo_raw: String = row.get(4)?;
    let letter_raw: String = row.get(6)?;
    let letter: char = Series::parse_letter(&letter_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(StudentWithSeries {
        student: Student {
            student_id: row.get(0)?,
            name: row.get(1)?,
            sex,
            series_id: row.get(3)?,
            photo_id: if photo_raw.is_empty() {
                None
            } else {
                Some(photo_raw)
            },
        },
        number: row.get(5)?,
        letter,
    })
}

/// Lists all series in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_series(conn: &Connection) -> Result<Vec<Series>, PersistenceError> {
    let mut stmt = conn.prepare("SELECT series_id, number, letter FROM series")?;
    let rows = stmt.query_map([], series_from_row)?;
    rows.collect::<rusqlite::Result<Vec<Series>>>()
        .map_err(PersistenceError::from)
}

/// Lists all series ordered by number then letter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_series_ordered(conn: &Connection) -> Result<Vec<Series>, PersistenceError> {
    let mut stmt =
        conn.prepare("SELECT series_id, number, letter FROM series ORDER BY number, letter")?;
    let rows = stmt.query_map([], series_from_row)?;
    rows.collect::<rusqlite::Result<Vec<Series>>>()
        .map_err(PersistenceError::from)
}

/// Finds a series by its unique `(number, letter)` pair.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_series(
    conn: &Connection,
    number: i32,
    letter: char,
) -> Result<Option<Series>, PersistenceError> {
    conn.query_row(
        "SELECT series_id, number, letter FROM series WHERE number = ?1 AND letter = ?2",
        params![number, letter.to_string()],
        series_from_row,
    )
    .optional()
    .map_err(PersistenceError::from)
}

/// Gets a student by id, joined with its series.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_student(
    conn: &Connection,
    student_id: i64,
) -> Result<Option<StudentWithSeries>, PersistenceError> {
    conn.query_row(
        &format!("{STUDENT_JOIN_SELECT} WHERE a.student_id = ?1"),
        params![student_id],
        student_from_row,
    )
    .optional()
    .map_err(PersistenceError::from)
}

/// Lists all students joined with their series.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_students(conn: &Connection) -> Result<Vec<StudentWithSeries>, PersistenceError> {
    let mut stmt = conn.prepare(STUDENT_JOIN_SELECT)?;
    let rows = stmt.query_map([], student_from_row)?;
    rows.collect::<rusqlite::Result<Vec<StudentWithSeries>>>()
        .map_err(PersistenceError::from)
}

/// Finds a user by exact `(login, password)` match.
///
/// This is the whole credential check: a plaintext comparison against
/// the seeded user table.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_user(
    conn: &Connection,
    login: &str,
    password: &str,
) -> Result<Option<UserData>, PersistenceError> {
    conn.query_row(
        "SELECT login, password, display_name FROM users
         WHERE login = ?1 AND password = ?2",
        params![login, password],
        |row| {
            Ok(UserData {
                login: row.get(0)?,
                password: row.get(1)?,
                display_name: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(PersistenceError::from)
}
