// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use roster_domain::{Series, Sex, Student};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries;

/// Inserts a new series row.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the `(number, letter)` pair
/// already exists, or another error if the insert fails.
pub fn insert_series(
    conn: &Connection,
    number: i32,
    letter: char,
) -> Result<Series, PersistenceError> {
    conn.execute(
        "INSERT INTO series (number, letter) VALUES (?1, ?2)",
        params![number, letter.to_string()],
    )?;
    let series_id: i64 = conn.last_insert_rowid();
    debug!(series_id, number, %letter, "Inserted series");
    Ok(Series {
        series_id,
        number,
        letter,
    })
}

/// Inserts a series if its `(number, letter)` pair is new, otherwise
/// returns the existing row.
///
/// Runs `INSERT OR IGNORE` followed by the lookup inside a single
/// transaction, so two racing creates cannot both observe "absent".
///
/// # Returns
///
/// The series and whether it already existed before this call.
///
/// # Errors
///
/// Returns an error if the transaction fails, or `CorruptRow` if the
/// row cannot be read back after the upsert.
pub fn upsert_series(
    conn: &mut Connection,
    number: i32,
    letter: char,
) -> Result<(Series, bool), PersistenceError> {
    let tx = conn.transaction()?;
    let inserted: usize = tx.execute(
        "INSERT OR IGNORE INTO series (number, letter) VALUES (?1, ?2)",
        params![number, letter.to_string()],
    )?;
    let already_existed: bool = inserted == 0;
    let series: Series =
        queries::find_series(&tx, number, letter)?.ok_or_else(|| {
            PersistenceError::CorruptRow(format!("series {number}{letter} missing after upsert"))
        })?;
    tx.commit()?;
    debug!(
        series_id = series.series_id,
        number,
        %letter,
        already_existed,
        "Upserted series"
    );
    Ok((series, already_existed))
}

/// Inserts a new student row.
///
/// # Errors
///
/// Returns `ConstraintViolation` if `series_id` does not reference an
/// existing series, or another error if the insert fails.
pub fn insert_student(
    conn: &Connection,
    name: &str,
    sex: Sex,
    series_id: i64,
    photo_id: Option<&str>,
) -> Result<Student, PersistenceError> {
    conn.execute(
        "INSERT INTO students (name, sex, series_id, photo_id) VALUES (?1, ?2, ?3, ?4)",
        params![name, sex.as_str(), series_id, photo_id.unwrap_or("")],
    )?;
    let student_id: i64 = conn.last_insert_rowid();
    debug!(student_id, name, series_id, "Inserted student");
    Ok(Student {
        student_id,
        name: name.to_string(),
        sex,
        series_id,
        photo_id: photo_id.map(str::to_string),
    })
}

/// Overwrites all mutable fields of a student row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_student(
    conn: &Connection,
    student_id: i64,
    name: &str,
    sex: Sex,
    series_id: i64,
    photo_id: Option<&str>,
) -> Result<(), PersistenceError> {
    conn.execute(
        "UPDATE students SET name = ?1, sex = ?2, series_id = ?3, photo_id = ?4
         WHERE student_id = ?5",
        params![name, sex.as_str(), series_id, photo_id.unwrap_or(""), student_id],
    )?;
    debug!(student_id, name, series_id, "Updated student");
    Ok(())
}

/// Deletes a student row by id.
///
/// Does not touch the photo file on disk; that cleanup belongs to the
/// photo store.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_student(conn: &Connection, student_id: i64) -> Result<(), PersistenceError> {
    conn.execute(
        "DELETE FROM students WHERE student_id = ?1",
        params![student_id],
    )?;
    debug!(student_id, "Deleted student");
    Ok(())
}
