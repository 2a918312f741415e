// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-rule operations.
//!
//! Every function takes a [`LoggedUser`] obtained from the controller's
//! authentication guard; nothing here runs without a validated
//! credential pair. Each operation sequences at most two persistence
//! calls plus the photo-store side effects.

use roster_domain::{Series, Student, StudentWithSeries};
use roster_persistence::SqlitePersistence;
use tracing::info;

use crate::auth::LoggedUser;
use crate::error::ApiError;
use crate::photos::PhotoStore;
use crate::request_response::{CreateSeriesOutcome, CreateSeriesRequest, PhotoUpload, StudentForm};

/// Saves the optional upload, returning the generated photo id.
fn save_upload(
    photos: &dyn PhotoStore,
    photo: Option<&PhotoUpload>,
) -> Result<Option<String>, ApiError> {
    match photo {
        Some(upload) => Ok(photos.save(&upload.file_name, &upload.data)?),
        None => Ok(None),
    }
}

/// Lists all series in insertion order.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_series(
    persistence: &SqlitePersistence,
    _user: &LoggedUser,
) -> Result<Vec<Series>, ApiError> {
    Ok(persistence.list_series()?)
}

/// Lists all series ordered by number then letter.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_series_ordered(
    persistence: &SqlitePersistence,
    _user: &LoggedUser,
) -> Result<Vec<Series>, ApiError> {
    Ok(persistence.list_series_ordered()?)
}

/// Creates a series, or returns the existing one for the pair.
///
/// The lookup and insert run as one atomic upsert, so two racing
/// creates for the same `(number, letter)` cannot both insert; a
/// constraint violation that still surfaces maps to a reportable
/// conflict rather than a fault.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn create_series(
    persistence: &mut SqlitePersistence,
    user: &LoggedUser,
    request: CreateSeriesRequest,
) -> Result<CreateSeriesOutcome, ApiError> {
    let (series, already_existed) = persistence.upsert_series(request.number, request.letter)?;
    info!(
        login = %user.login,
        series_id = series.series_id,
        label = %series.label(),
        already_existed,
        "Created series"
    );
    Ok(CreateSeriesOutcome {
        series,
        already_existed,
    })
}

/// Lists all students joined with their series.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_students(
    persistence: &SqlitePersistence,
    _user: &LoggedUser,
) -> Result<Vec<StudentWithSeries>, ApiError> {
    Ok(persistence.list_students()?)
}

/// Gets a student by id, joined with its series.
///
/// # Errors
///
/// Returns `StudentNotFound` if the id does not exist.
pub fn get_student(
    persistence: &SqlitePersistence,
    _user: &LoggedUser,
    student_id: i64,
) -> Result<StudentWithSeries, ApiError> {
    persistence
        .get_student(student_id)?
        .ok_or(ApiError::StudentNotFound(student_id))
}

/// Creates a student, saving any uploaded photo first.
///
/// An upload with an unsupported extension is silently dropped and
/// the student is created without a photo.
///
/// # Errors
///
/// Returns `Conflict` if the series reference is invalid, or another
/// error if the photo save or insert fails.
pub fn create_student(
    persistence: &SqlitePersistence,
    photos: &dyn PhotoStore,
    user: &LoggedUser,
    form: StudentForm,
) -> Result<Student, ApiError> {
    let photo_id: Option<String> = save_upload(photos, form.photo.as_ref())?;
    let student: Student = persistence.insert_student(
        &form.name,
        form.sex,
        form.series_id,
        photo_id.as_deref(),
    )?;
    info!(
        login = %user.login,
        student_id = student.student_id,
        name = %student.name,
        "Created student"
    );
    Ok(student)
}

/// Overwrites a student's fields, replacing the photo when a new one
/// was uploaded.
///
/// When the upload produced a new photo id, the previous photo file is
/// deleted; when no usable upload arrived, the existing photo id is
/// kept unchanged.
///
/// # Errors
///
/// Returns `StudentNotFound` if the id does not exist, or another
/// error if the photo store or update fails.
pub fn edit_student(
    persistence: &SqlitePersistence,
    photos: &dyn PhotoStore,
    user: &LoggedUser,
    student_id: i64,
    form: StudentForm,
) -> Result<Student, ApiError> {
    let existing: StudentWithSeries = persistence
        .get_student(student_id)?
        .ok_or(ApiError::StudentNotFound(student_id))?;

    let photo_id: Option<String> = match save_upload(photos, form.photo.as_ref())? {
        Some(new_id) => {
            if let Some(old_id) = &existing.student.photo_id {
                photos.delete(old_id)?;
            }
            Some(new_id)
        }
        None => existing.student.photo_id.clone(),
    };

    persistence.update_student(
        student_id,
        &form.name,
        form.sex,
        form.series_id,
        photo_id.as_deref(),
    )?;
    info!(
        login = %user.login,
        student_id,
        name = %form.name,
        "Edited student"
    );
    Ok(Student {
        student_id,
        name: form.name,
        sex: form.sex,
        series_id: form.series_id,
        photo_id,
    })
}

/// Deletes a student row, returning the record as it was.
///
/// The photo file is intentionally not removed here: the client
/// issues a separate photo-deletion request, mirroring the exposed
/// HTTP surface.
///
/// # Errors
///
/// Returns `StudentNotFound` if the id does not exist, or another
/// error if the delete fails.
pub fn delete_student(
    persistence: &SqlitePersistence,
    user: &LoggedUser,
    student_id: i64,
) -> Result<StudentWithSeries, ApiError> {
    let existing: StudentWithSeries = persistence
        .get_student(student_id)?
        .ok_or(ApiError::StudentNotFound(student_id))?;
    persistence.delete_student(student_id)?;
    info!(
        login = %user.login,
        student_id,
        name = %existing.student.name,
        "Deleted student"
    );
    Ok(existing)
}
