// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Single-character sex flag carried by every student record.
///
/// The wire and storage representation is `"M"` / `"F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male, stored as `"M"`.
    Male,
    /// Female, stored as `"F"`.
    Female,
}

impl Sex {
    /// Converts this flag to its single-character string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            _ => Err(DomainError::InvalidSex(s.to_string())),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grade/class grouping students belong to.
///
/// Identified by a surrogate id; the `(number, letter)` pair is unique
/// across the roster. Series are created on demand and never updated
/// or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Surrogate id assigned by the database.
    pub series_id: i64,
    /// The grade number (e.g. 2 in "2A").
    pub number: i32,
    /// The class letter (e.g. 'A' in "2A").
    pub letter: char,
}

impl Series {
    /// Parses a class letter from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not exactly one character.
    pub fn parse_letter(value: &str) -> Result<char, DomainError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Ok(letter),
            _ => Err(DomainError::InvalidClassLetter(value.to_string())),
        }
    }

    /// The display label for this series, e.g. "2A".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.number, self.letter)
    }
}

/// A person enrolled in exactly one series, with an optional photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Surrogate id assigned by the database.
    pub student_id: i64,
    /// The student's name.
    pub name: String,
    /// Single-character sex flag.
    pub sex: Sex,
    /// Foreign key to the series this student belongs to.
    pub series_id: i64,
    /// Filename of the stored photo, or `None` when no photo exists.
    ///
    /// Persisted as the empty string when absent; the persistence
    /// layer maps between the two representations.
    pub photo_id: Option<String>,
}

/// A student joined with the series it belongs to.
///
/// This is the shape the listing and detail queries return: the
/// student row plus the joined `(number, letter)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentWithSeries {
    /// The student record.
    pub student: Student,
    /// The joined series number.
    pub number: i32,
    /// The joined class letter.
    pub letter: char,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_round_trips_through_storage_form() {
        assert_eq!(Sex::Male.as_str(), "M");
        assert_eq!(Sex::Female.as_str(), "F");
        assert_eq!("M".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
    }

    #[test]
    fn sex_rejects_unknown_flags() {
        assert!(matches!(
            "X".parse::<Sex>(),
            Err(DomainError::InvalidSex(_))
        ));
        assert!(matches!("".parse::<Sex>(), Err(DomainError::InvalidSex(_))));
    }

    #[test]
    fn class_letter_must_be_a_single_character() {
        assert_eq!(Series::parse_letter("A"), Ok('A'));
        assert!(Series::parse_letter("").is_err());
        assert!(Series::parse_letter("AB").is_err());
    }

    #[test]
    fn series_label_concatenates_number_and_letter() {
        let series = Series {
            series_id: 1,
            number: 2,
            letter: 'A',
        };
        assert_eq!(series.label(), "2A");
    }
}
