// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cookie-credential extraction and the authentication guard.
//!
//! Credentials travel as two plaintext cookies (`login`, `senha`)
//! validated against the user table on every request. There is no
//! session store; the guard is the single place the check happens,
//! instead of per-route boilerplate.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use roster_api::{AuthenticationService, Credentials, LoggedUser};
use std::convert::Infallible;
use tracing::debug;

use crate::AppState;

/// Reads the `login`/`senha` cookie pair, defaulting each to empty.
fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let mut login: String = String::new();
    let mut password: String = String::new();
    for value in headers.get_all(COOKIE) {
        let Ok(cookies) = value.to_str() else {
            continue;
        };
        for pair in cookies.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                match name {
                    "login" => login = value.to_string(),
                    "senha" => password = value.to_string(),
                    _ => {}
                }
            }
        }
    }
    Credentials::new(login, password)
}

/// Extractor for the raw cookie credential pair.
///
/// Never rejects; routes that must render the login form on failure
/// (the menu) use this and run the credential check themselves.
pub struct CookieCredentials(pub Credentials);

impl<S> FromRequestParts<S> for CookieCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(credentials_from_headers(&parts.headers)))
    }
}

/// Authentication guard for every route behind the login wall.
///
/// Validates the cookie pair against the user table and yields the
/// matching [`LoggedUser`]; a failed check rejects with a redirect to
/// the login page before the handler body runs.
pub struct AuthenticatedUser(pub LoggedUser);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials: Credentials = credentials_from_headers(&parts.headers);
        let persistence = state.persistence.lock().await;
        match AuthenticationService::login(&persistence, &credentials) {
            Ok(user) => Ok(Self(user)),
            Err(e) => {
                debug!(error = %e, "Request not authenticated, redirecting to login");
                Err(AuthRedirect)
            }
        }
    }
}

/// Rejection for unauthenticated requests: back to the login page.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}
