// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::seating::{SeatingResult, SeatingState, Selection};
use crate::{Coord, Person, Seed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatCommand {
    Resize { rows: usize, cols: usize },
    ApplyRoster(Vec<Person>),
    AutoAssignGroups(i64),
    Shuffle(Option<Seed>),
    Select(Coord),
    CancelSelection,
    Swap(Coord, Coord),
    ToggleLock(Coord),
    Reset,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatEvent {
    GridResized { rows: usize, cols: usize },
    RosterApplied(usize),
    GroupsAssigned(i64),
    Shuffled { placed: usize },
    SelectionChanged(Option<Coord>),
    SeatsSwapped(Coord, Coord),
    LockChanged { coord: Coord, locked: bool },
    GridReset,
    StatusUpdated(String),
    StatusCleared,
}

/// The seating engine plus the one-line status the page shows under the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeatingSession {
    pub seating: SeatingState,
    pub status_line: Option<String>,
}

impl SeatingSession {
    pub fn new(seating: SeatingState) -> Self {
        Self {
            seating,
            status_line: None,
        }
    }

    /// Applies one command. A failed command leaves the session untouched.
    pub fn dispatch(&mut self, command: SeatCommand) -> SeatingResult<Vec<SeatEvent>> {
        let events = match command {
            SeatCommand::Resize { rows, cols } => {
                let had_cursor = self.seating.selecting();
                self.seating.resize(rows, cols)?;
                let mut events = vec![SeatEvent::GridResized { rows, cols }];
                if had_cursor != self.seating.selecting() {
                    events.push(SeatEvent::SelectionChanged(None));
                }
                events
            }
            SeatCommand::ApplyRoster(people) => {
                self.seating.set_roster(people);
                let count = self.seating.roster().len();
                vec![
                    SeatEvent::RosterApplied(count),
                    self.set_status(&format!("roster applied: {count} people")),
                ]
            }
            SeatCommand::AutoAssignGroups(count) => {
                if self.seating.auto_assign_groups(count) {
                    vec![
                        SeatEvent::GroupsAssigned(count),
                        self.set_status(&format!("groups assigned round-robin (1..={count})")),
                    ]
                } else {
                    Vec::new()
                }
            }
            SeatCommand::Shuffle(seed) => {
                let placed = self.seating.shuffle(seed.as_ref());
                vec![SeatEvent::Shuffled { placed }]
            }
            SeatCommand::Select(coord) => match self.seating.select(coord)? {
                Selection::Pending(coord) => vec![
                    SeatEvent::SelectionChanged(Some(coord)),
                    self.set_status(&format!(
                        "pick a second seat to swap with row {}, col {}",
                        coord.row + 1,
                        coord.col + 1
                    )),
                ],
                Selection::Swapped(a, b) => vec![
                    SeatEvent::SeatsSwapped(a, b),
                    SeatEvent::SelectionChanged(None),
                    self.clear_status(),
                ],
                Selection::Cleared => vec![SeatEvent::SelectionChanged(None), self.clear_status()],
            },
            SeatCommand::CancelSelection => {
                if self.seating.selecting().is_none() {
                    Vec::new()
                } else {
                    self.seating.clear_selection();
                    vec![SeatEvent::SelectionChanged(None), self.clear_status()]
                }
            }
            SeatCommand::Swap(a, b) => {
                self.seating.swap(a, b)?;
                vec![SeatEvent::SeatsSwapped(a, b)]
            }
            SeatCommand::ToggleLock(coord) => {
                let had_cursor = self.seating.selecting();
                let locked = self.seating.toggle_lock(coord)?;
                let mut events = vec![SeatEvent::LockChanged { coord, locked }];
                if had_cursor != self.seating.selecting() {
                    events.push(SeatEvent::SelectionChanged(None));
                }
                events
            }
            SeatCommand::Reset => {
                self.seating.reset();
                vec![SeatEvent::GridReset, self.clear_status()]
            }
            SeatCommand::ClearStatus => vec![self.clear_status()],
        };
        Ok(events)
    }

    fn set_status(&mut self, message: &str) -> SeatEvent {
        self.status_line = Some(message.to_owned());
        SeatEvent::StatusUpdated(message.to_owned())
    }

    fn clear_status(&mut self) -> SeatEvent {
        self.status_line = None;
        SeatEvent::StatusCleared
    }
}
