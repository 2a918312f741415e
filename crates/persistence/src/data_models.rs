// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A row from the fixed `users` credential table.
///
/// Users are seeded at schema initialization and never created,
/// edited, or deleted through any exposed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    /// The login name (primary key).
    pub login: String,
    /// The plaintext password.
    pub password: String,
    /// The display name shown on rendered pages.
    pub display_name: String,
}
