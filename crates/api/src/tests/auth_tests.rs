// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::memory_persistence;
use crate::auth::{AuthenticationService, Credentials};
use crate::error::AuthError;

#[test]
fn every_seeded_pair_authenticates_with_its_display_name() {
    let persistence = memory_persistence();
    for (login, password, display_name) in [
        ("ironman", "ferro", "Tony Stark"),
        ("spiderman", "aranha", "Peter Park"),
        ("batman", "morcego", "Bruce Wayne"),
    ] {
        let credentials = Credentials::new(login.to_string(), password.to_string());
        let logged = AuthenticationService::login(&persistence, &credentials)
            .expect("seeded pair authenticates");
        assert_eq!(logged.login, login);
        assert_eq!(logged.display_name, display_name);
    }
}

#[test]
fn any_other_pair_fails() {
    let persistence = memory_persistence();
    for (login, password) in [
        ("ironman", "aranha"),
        ("batman", ""),
        ("", ""),
        ("hulk", "smash"),
    ] {
        let credentials = Credentials::new(login.to_string(), password.to_string());
        let err = AuthenticationService::login(&persistence, &credentials)
            .expect_err("pair must not authenticate");
        assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
    }
}
