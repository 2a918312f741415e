// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the business-rule layer.

use roster_persistence::PersistenceError;
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential pair does not match any user row.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

/// Errors that can occur while saving or deleting photo files.
#[derive(Debug, Error)]
pub enum PhotoStoreError {
    /// The filesystem operation failed.
    #[error("Photo store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the business-rule operations.
///
/// These map one-to-one onto the controller's error taxonomy: a failed
/// credential check, a missing student, a storage constraint rejection
/// (the racing series create), and internal faults.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no valid credential pair.
    #[error(transparent)]
    NotAuthenticated(#[from] AuthError),
    /// The referenced student does not exist.
    #[error("Student {0} does not exist")]
    StudentNotFound(i64),
    /// The storage layer rejected a write with a constraint violation.
    #[error("Storage constraint violation: {0}")]
    Conflict(String),
    /// An unexpected persistence failure.
    #[error("Persistence error: {0}")]
    Persistence(PersistenceError),
    /// A photo file could not be saved or deleted.
    #[error(transparent)]
    PhotoStore(#[from] PhotoStoreError),
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConstraintViolation(msg) => Self::Conflict(msg),
            other => Self::Persistence(other),
        }
    }
}
