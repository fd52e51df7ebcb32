// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "",
        }
    }

    /// Normalizes a free-form gender label. Unrecognized or empty input is
    /// `Unknown`, never an error.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "m" | "male" | "남" | "남자" | "boy" => Self::Male,
            "f" | "female" | "여" | "여자" | "girl" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub gender: Gender,
    pub group: Option<u32>,
}

impl Person {
    pub fn new(name: impl Into<String>, gender: Gender, group: Option<u32>) -> Self {
        Self {
            name: name.into(),
            gender,
            group,
        }
    }

    /// Renders the person as a `name, gender, group` roster line that parses
    /// back to the same person.
    pub fn to_roster_line(&self) -> String {
        crate::roster::roster_line(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Seat {
    pub occupant: Option<Person>,
    pub locked: bool,
}

impl Seat {
    pub fn name(&self) -> Option<&str> {
        self.occupant.as_ref().map(|person| person.name.as_str())
    }
}

/// One exported seat, numbered from 1 the way seating charts are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRow {
    pub row: usize,
    pub col: usize,
    pub name: String,
    pub gender: Gender,
    pub group: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::{Gender, Person};

    #[test]
    fn gender_aliases_normalize() {
        for raw in ["m", "M", " male ", "남", "남자", "Boy"] {
            assert_eq!(Gender::normalize(raw), Gender::Male, "input {raw:?}");
        }
        for raw in ["f", "F", "Female", "여", "여자", "GIRL"] {
            assert_eq!(Gender::normalize(raw), Gender::Female, "input {raw:?}");
        }
        for raw in ["", "x", "男", "unknown"] {
            assert_eq!(Gender::normalize(raw), Gender::Unknown, "input {raw:?}");
        }
    }

    #[test]
    fn roster_line_leaves_missing_fields_blank() {
        let person = Person::new("Dana", Gender::Unknown, None);
        assert_eq!(person.to_roster_line(), "Dana, , ");

        let person = Person::new("Eun", Gender::Female, Some(3));
        assert_eq!(person.to_roster_line(), "Eun, F, 3");
    }

    #[test]
    fn roster_line_protects_commas_and_bracket_tokens() {
        let person = Person::new("Park, Jin", Gender::Male, Some(2));
        assert_eq!(person.to_roster_line(), "Park, Jin\tM\t2");

        let person = Person::new("Min (m)", Gender::Unknown, None);
        assert_eq!(person.to_roster_line(), "Min (m), ?, ");
    }
}
