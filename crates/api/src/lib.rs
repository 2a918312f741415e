// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business rules for the school roster application.
//!
//! This crate sits between the HTTP controller and the persistence
//! layer. The rules are thin by design: credential validation by
//! direct lookup, an atomic insert-or-fetch for series creation, and
//! the save/replace/delete sequencing around student photo uploads.
//! Every operation requires a [`LoggedUser`] produced by
//! [`AuthenticationService::login`], so nothing reaches the data layer
//! unauthenticated.

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

mod auth;
mod error;
mod handlers;
mod photos;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, Credentials, LoggedUser};
pub use error::{ApiError, AuthError, PhotoStoreError};
pub use handlers::{
    create_series, create_student, delete_student, edit_student, get_student, list_series,
    list_series_ordered, list_students,
};
pub use photos::{PhotoStore, accepted_extension};
pub use request_response::{CreateSeriesOutcome, CreateSeriesRequest, PhotoUpload, StudentForm};
