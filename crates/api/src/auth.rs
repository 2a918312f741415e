// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and service.
//!
//! Authentication is a plaintext credential comparison against a
//! fixed, seeded user table. There are no sessions and no tokens: the
//! controller re-validates the cookie-carried pair on every request.
//! Password hashing is explicitly out of scope for this application.

use roster_persistence::{SqlitePersistence, UserData};
use tracing::{debug, warn};

use crate::error::AuthError;

/// A login/password pair as carried by the two request cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The login name.
    pub login: String,
    /// The plaintext password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub const fn new(login: String, password: String) -> Self {
        Self { login, password }
    }
}

/// A user whose credential pair matched the user table.
///
/// Obtained only through [`AuthenticationService::login`]; rule
/// functions take a reference to one as proof that the request was
/// authenticated before any data access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedUser {
    /// The login name.
    pub login: String,
    /// The display name shown on rendered pages.
    pub display_name: String,
}

/// Authentication service for the fixed user table.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates a credential pair by direct lookup.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the pair matches no user row
    /// or the lookup itself fails.
    pub fn login(
        persistence: &SqlitePersistence,
        credentials: &Credentials,
    ) -> Result<LoggedUser, AuthError> {
        let user: UserData = persistence
            .find_user(&credentials.login, &credentials.password)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| {
                warn!(login = %credentials.login, "Credential pair matched no user");
                AuthError::AuthenticationFailed {
                    reason: String::from("Unknown login or wrong password"),
                }
            })?;

        debug!(login = %user.login, "Authenticated");
        Ok(LoggedUser {
            login: user.login,
            display_name: user.display_name,
        })
    }
}
