// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Roster import from pasted text and from already-split tabular records.
//!
//! Malformed entries are skipped rather than failing the whole import.

use crate::{Gender, Person};

const GENDER_TOKENS: [char; 6] = ['m', 'f', 'M', 'F', '남', '여'];

/// Parses one person per line.
///
/// Accepted shapes: `Alex`, `Alex (M) 2`, `Alex [여]`, `Alex, M, 2`,
/// `Alex\tF\t3`. Delimited fields win over the free-form extraction. A line
/// containing a tab is split on tabs only, so names may carry commas.
pub fn parse_roster_text(text: &str) -> Vec<Person> {
    text.lines().filter_map(parse_roster_line).collect()
}

pub fn parse_roster_line(line: &str) -> Option<Person> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let bracket = find_bracket_gender(line);
    let trailing = trailing_integer(line);

    let parts: Vec<&str> = if line.contains('\t') {
        line.split('\t').map(str::trim).collect()
    } else {
        line.split(',').map(str::trim).collect()
    };
    let (name, gender, group) = if parts.len() >= 2 {
        let name = parts[0].to_owned();
        let gender = match parts[1] {
            "" => bracket.map(|token| token.gender),
            raw => Some(Gender::normalize(raw)),
        };
        let group = match parts.get(2) {
            Some(raw) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                raw.parse::<u32>().ok()
            }
            _ => trailing.map(|(value, _)| value),
        };
        (name, gender, group)
    } else {
        let stripped = trailing
            .filter(|(_, start)| is_separated_group(line, *start))
            .map(|(_, start)| free_form_name(line, start, bracket))
            .filter(|name| !name.is_empty());
        let name = stripped.unwrap_or_else(|| free_form_name(line, line.len(), bracket));
        (name, bracket.map(|token| token.gender), trailing.map(|(value, _)| value))
    };

    let name = name.trim().to_owned();
    if name.is_empty() {
        return None;
    }
    Some(Person {
        name,
        gender: gender.unwrap_or(Gender::Unknown),
        group: group.filter(|value| *value > 0),
    })
}

/// Parses spreadsheet-style records.
///
/// A first row naming any of `name`, `gender` or `group` is treated as a
/// header. Without one, only the first column is read, as names.
pub fn parse_roster_table<R, C>(rows: &[R]) -> Vec<Person>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let headers: Vec<String> = first
        .as_ref()
        .iter()
        .map(|cell| cell.as_ref().trim().to_lowercase())
        .collect();
    let position = |key: &str| headers.iter().position(|header| header == key);

    let (columns, data) = match (position("name"), position("gender"), position("group")) {
        (None, None, None) => (TableColumns::default(), rows),
        (name, gender, group) => (
            TableColumns {
                name: name.unwrap_or(0),
                gender,
                group,
            },
            &rows[1..],
        ),
    };

    data.iter()
        .filter_map(|row| columns.person(row.as_ref()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
struct TableColumns {
    name: usize,
    gender: Option<usize>,
    group: Option<usize>,
}

impl TableColumns {
    fn person<C: AsRef<str>>(&self, row: &[C]) -> Option<Person> {
        let cell = |index: usize| row.get(index).map(|c| c.as_ref().trim());
        let name = cell(self.name)?;
        if name.is_empty() {
            return None;
        }
        let gender = self
            .gender
            .and_then(cell)
            .map_or(Gender::Unknown, Gender::normalize);
        let group = self
            .group
            .and_then(cell)
            .and_then(parse_group_cell)
            .filter(|value| *value > 0);
        Some(Person::new(name, gender, group))
    }
}

/// Spreadsheet exports often write integers as `3.0`.
fn parse_group_cell(raw: &str) -> Option<u32> {
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        return Some(value as u32);
    }
    None
}

/// Delimited form of one person. Names holding a comma switch the line to
/// tabs, and an unknown gender is spelled `?` whenever an empty field would
/// let a bracket token in the name stand in for it.
pub(crate) fn roster_line(person: &Person) -> String {
    let has_comma = person.name.contains(',');
    let gender = match person.gender {
        Gender::Unknown if has_comma || find_bracket_gender(&person.name).is_some() => "?",
        gender => gender.as_str(),
    };
    let group = person.group.map(|g| g.to_string()).unwrap_or_default();
    let separator = if has_comma { "\t" } else { ", " };
    [person.name.as_str(), gender, group.as_str()].join(separator)
}

/// Renders a roster back into the delimited text form.
pub fn format_roster(people: &[Person]) -> String {
    people
        .iter()
        .map(Person::to_roster_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketToken {
    start: usize,
    end: usize,
    gender: Gender,
}

/// `line[..end]` with the bracket gender token removed.
fn free_form_name(line: &str, end: usize, bracket: Option<BracketToken>) -> String {
    let mut name = line[..end].to_owned();
    if let Some(token) = bracket
        && token.end <= name.len()
    {
        name.replace_range(token.start..token.end, " ");
    }
    collapse_whitespace(&name)
}

/// Trailing digits only leave the name when set off by whitespace or a
/// closing bracket, so `학생1` keeps its number.
fn is_separated_group(line: &str, digits_start: usize) -> bool {
    line[..digits_start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_whitespace() || c == ')' || c == ']')
}

fn find_bracket_gender(line: &str) -> Option<BracketToken> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    for (index, &(start, open)) in chars.iter().enumerate() {
        if open != '(' && open != '[' {
            continue;
        }
        let mut cursor = index + 1;
        while chars.get(cursor).is_some_and(|(_, c)| c.is_whitespace()) {
            cursor += 1;
        }
        let Some(&(_, token)) = chars.get(cursor) else {
            continue;
        };
        if !GENDER_TOKENS.contains(&token) {
            continue;
        }
        cursor += 1;
        while chars.get(cursor).is_some_and(|(_, c)| c.is_whitespace()) {
            cursor += 1;
        }
        if let Some(&(close_at, close)) = chars.get(cursor)
            && (close == ')' || close == ']')
        {
            return Some(BracketToken {
                start,
                end: close_at + close.len_utf8(),
                gender: Gender::normalize(&token.to_string()),
            });
        }
    }
    None
}

/// Trailing run of ASCII digits, with the byte offset where it starts.
fn trailing_integer(line: &str) -> Option<(u32, usize)> {
    let trimmed = line.trim_end();
    let digits = trimmed.len() - trimmed.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let start = trimmed.len() - digits;
    trimmed[start..].parse::<u32>().ok().map(|value| (value, start))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
