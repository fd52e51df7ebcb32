// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use retroclass_app::{Config, DeterministicRng, Seed};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Splits a pasted list on commas and newlines, dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub student: String,
    pub role: String,
    pub assigned_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinOutcome {
    Assigned(Assignment),
    AllStudentsAssigned,
    AllRolesAssigned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouletteState {
    students: Vec<String>,
    roles: Vec<String>,
    assignments: Vec<Assignment>,
}

impl RouletteState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            roles: config.roulette_roles(),
            ..Self::default()
        }
    }

    pub fn students(&self) -> &[String] {
        &self.students
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Replaces both lists. Existing assignments are kept.
    pub fn set_lists(&mut self, students: &str, roles: &str) {
        self.students = parse_list(students);
        self.roles = parse_list(roles);
    }

    /// Pairs a random unassigned student with a random unassigned role.
    pub fn spin(&mut self, seed: Option<&Seed>, now: OffsetDateTime) -> SpinOutcome {
        let free_students = self.unassigned(&self.students, |a| &a.student);
        if free_students.is_empty() {
            return SpinOutcome::AllStudentsAssigned;
        }
        let free_roles = self.unassigned(&self.roles, |a| &a.role);
        if free_roles.is_empty() {
            return SpinOutcome::AllRolesAssigned;
        }

        let mut rng = DeterministicRng::from_seed(seed);
        let (Some(student), Some(role)) = (rng.choose(&free_students), rng.choose(&free_roles))
        else {
            return SpinOutcome::AllStudentsAssigned;
        };
        let assignment = Assignment {
            student: student.clone(),
            role: role.clone(),
            assigned_at: now,
        };
        tracing::debug!(student = %assignment.student, role = %assignment.role, "role assigned");
        self.assignments.push(assignment.clone());
        SpinOutcome::Assigned(assignment)
    }

    pub fn reset(&mut self) {
        self.assignments.clear();
    }

    fn unassigned(
        &self,
        items: &[String],
        field: impl Fn(&Assignment) -> &String,
    ) -> Vec<String> {
        items
            .iter()
            .filter(|item| !self.assignments.iter().any(|a| field(a) == *item))
            .cloned()
            .collect()
    }
}
