// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The sex flag is not one of the recognized single-character codes.
    InvalidSex(String),
    /// The class letter is empty or longer than a single character.
    InvalidClassLetter(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSex(value) => {
                write!(f, "Invalid sex flag '{value}': expected 'M' or 'F'")
            }
            Self::InvalidClassLetter(value) => {
                write!(
                    f,
                    "Invalid class letter '{value}': expected a single character"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
