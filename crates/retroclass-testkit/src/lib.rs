// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use retroclass_app::{Coord, DeterministicRng, Gender, Person, SeatingState};

const FIRST_NAMES: [&str; 24] = [
    "Alex", "Bao", "Chan", "Dana", "Eun", "Finn", "Giri", "Hana", "Ian", "Jin", "Kay", "Lia",
    "Min", "Nuri", "Oli", "Pyo", "Quinn", "Ria", "Sol", "Tae", "Uma", "Vik", "Woo", "Yuna",
];

const SURNAMES: [&str; 10] = [
    "Kim", "Lee", "Park", "Choi", "Jung", "Kang", "Cho", "Yoon", "Jang", "Lim",
];

const GENDER_LABELS: [&str; 8] = ["M", "F", "male", "female", "남자", "여자", "boy", "girl"];
const BRACKET_TOKENS: [&str; 6] = ["M", "F", "m", "f", "남", "여"];

/// The sixteen-person class the seating page boots with.
pub fn demo_roster() -> Vec<Person> {
    [
        ("Alex", Gender::Male, 1),
        ("Bao", Gender::Male, 1),
        ("Chan", Gender::Male, 2),
        ("Dana", Gender::Female, 2),
        ("Eun", Gender::Female, 3),
        ("Finn", Gender::Male, 3),
        ("Giri", Gender::Male, 4),
        ("Hana", Gender::Female, 4),
        ("Ian", Gender::Male, 1),
        ("Jin", Gender::Male, 1),
        ("Kay", Gender::Female, 2),
        ("Lia", Gender::Female, 2),
        ("Min", Gender::Male, 3),
        ("Nuri", Gender::Female, 3),
        ("Oli", Gender::Male, 4),
        ("Pyo", Gender::Male, 4),
    ]
    .into_iter()
    .map(|(name, gender, group)| Person::new(name, gender, Some(group)))
    .collect()
}

/// Grid of the given size with the listed seats locked.
pub fn grid_with_locks(rows: usize, cols: usize, locked: &[Coord]) -> Result<SeatingState> {
    let mut state = SeatingState::empty(rows, cols)?;
    for coord in locked {
        state.toggle_lock(*coord)?;
    }
    Ok(state)
}

/// Seat names in row-major order, `None` for empty seats.
pub fn seat_names(state: &SeatingState) -> Vec<Option<String>> {
    state
        .export_rows()
        .map(|row| (!row.name.is_empty()).then_some(row.name))
        .collect()
}

#[derive(Debug, Clone)]
pub struct RosterFaker {
    rng: DeterministicRng,
}

impl RosterFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn person(&mut self) -> Person {
        let first = self.pick(&FIRST_NAMES);
        let name = if self.int_n(3) == 0 {
            format!("{} {first}", self.pick(&SURNAMES))
        } else {
            first.to_owned()
        };
        let gender = match self.int_n(3) {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::Unknown,
        };
        let group = match self.int_n(4) {
            0 => None,
            _ => Some(self.int_n(6) as u32 + 1),
        };
        Person::new(name, gender, group)
    }

    pub fn roster(&mut self, count: usize) -> Vec<Person> {
        (0..count).map(|_| self.person()).collect()
    }

    /// A free-text roster line in one of the shapes teachers paste in.
    pub fn roster_line(&mut self) -> String {
        let name = self.pick(&FIRST_NAMES);
        let group = self.int_n(6) + 1;
        match self.int_n(4) {
            0 => name.to_owned(),
            1 => format!("{name} ({}) {group}", self.pick(&BRACKET_TOKENS)),
            2 => format!("{name}, {}, {group}", self.pick(&GENDER_LABELS)),
            _ => format!("{name}\t{}\t{group}", self.pick(&GENDER_LABELS)),
        }
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::{RosterFaker, demo_roster, grid_with_locks, seat_names};
    use retroclass_app::{Coord, parse_roster_line};
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = RosterFaker::new(42);
        let mut right = RosterFaker::new(42);
        assert_eq!(left.roster(10), right.roster(10));
    }

    #[test]
    fn variety_across_seeds() {
        let mut names = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = RosterFaker::new(seed);
            names.insert(faker.person().name);
        }
        assert!(names.len() >= 8, "got {}", names.len());
    }

    #[test]
    fn generated_groups_are_positive() {
        let mut faker = RosterFaker::new(7);
        for person in faker.roster(50) {
            assert!(!person.name.is_empty());
            assert!(person.group.is_none_or(|group| (1..=6).contains(&group)));
        }
    }

    #[test]
    fn roster_lines_always_parse() {
        let mut faker = RosterFaker::new(11);
        for _ in 0..50 {
            let line = faker.roster_line();
            assert!(parse_roster_line(&line).is_some(), "line {line:?}");
        }
    }

    #[test]
    fn demo_roster_has_sixteen_people_in_four_groups() {
        let roster = demo_roster();
        assert_eq!(roster.len(), 16);
        let groups: BTreeSet<_> = roster.iter().filter_map(|p| p.group).collect();
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn grid_fixture_locks_requested_seats() -> anyhow::Result<()> {
        let state = grid_with_locks(2, 2, &[Coord::new(1, 0)])?;
        assert!(state.is_locked(Coord::new(1, 0))?);
        assert!(!state.is_locked(Coord::new(0, 0))?);
        assert_eq!(seat_names(&state), vec![None; 4]);
        Ok(())
    }
}
