// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the school roster application.
//!
//! A roster consists of series (a grade number plus a class letter,
//! e.g. "2A") and students assigned to exactly one series. Students
//! may carry an optional photo, identified by the generated filename
//! under which the upload was stored.
//!
//! This crate holds plain data types only. Persistence lives in
//! `roster-persistence` and business rules in `roster-api`.

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

mod error;
mod types;

pub use error::DomainError;
pub use types::{Series, Sex, Student, StudentWithSeries};
