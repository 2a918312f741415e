// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes for the business-rule operations.

use roster_domain::{Series, Sex};

/// Request to create (or fetch) a series by its identifying pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSeriesRequest {
    /// The grade number.
    pub number: i32,
    /// The class letter.
    pub letter: char,
}

/// Outcome of a series creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSeriesOutcome {
    /// The created or pre-existing series.
    pub series: Series,
    /// True when the `(number, letter)` pair already existed and no
    /// row was inserted.
    pub already_existed: bool,
}

/// An uploaded photo as received from the multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// The client-side filename; only its extension is used.
    pub file_name: String,
    /// The raw file bytes.
    pub data: Vec<u8>,
}

/// The mutable student fields plus an optional photo upload.
///
/// Used by both create and edit; the upload is saved before the row
/// is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    /// The student's name.
    pub name: String,
    /// Single-character sex flag.
    pub sex: Sex,
    /// The series the student belongs to.
    pub series_id: i64,
    /// An uploaded photo, when the form carried one.
    pub photo: Option<PhotoUpload>,
}
