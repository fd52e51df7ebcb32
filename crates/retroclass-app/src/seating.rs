// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::seed::{DeterministicRng, Seed};
use crate::{Coord, Person, Seat, SeatRow};

pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatingError {
    InvalidDimension { rows: usize, cols: usize },
    OutOfBounds { coord: Coord, rows: usize, cols: usize },
    SeatLocked(Coord),
}

impl std::fmt::Display for SeatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::OutOfBounds { coord, rows, cols } => {
                write!(f, "seat {coord} is outside the {rows}x{cols} grid")
            }
            Self::SeatLocked(coord) => {
                write!(f, "seat {coord} is locked -- unlock it before moving its occupant")
            }
        }
    }
}

impl std::error::Error for SeatingError {}

pub type SeatingResult<T> = std::result::Result<T, SeatingError>;

/// Outcome of one click in the two-click swap flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Pending(Coord),
    Swapped(Coord, Coord),
    Cleared,
}

/// Grid, roster, locks and the pending swap cursor for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatingState {
    rows: usize,
    cols: usize,
    seats: Vec<Seat>,
    roster: Vec<Person>,
    selecting: Option<Coord>,
}

impl Default for SeatingState {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seats: vec![Seat::default(); DEFAULT_ROWS * DEFAULT_COLS],
            roster: Vec::new(),
            selecting: None,
        }
    }
}

impl SeatingState {
    pub fn empty(rows: usize, cols: usize) -> SeatingResult<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            seats: vec![Seat::default(); rows * cols],
            roster: Vec::new(),
            selecting: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    pub fn selecting(&self) -> Option<Coord> {
        self.selecting
    }

    pub fn seat(&self, coord: Coord) -> SeatingResult<&Seat> {
        let index = self.index(coord)?;
        Ok(&self.seats[index])
    }

    pub fn occupant(&self, coord: Coord) -> SeatingResult<Option<&Person>> {
        Ok(self.seat(coord)?.occupant.as_ref())
    }

    pub fn is_locked(&self, coord: Coord) -> SeatingResult<bool> {
        Ok(self.seat(coord)?.locked)
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |index| Coord::new(index / cols, index % cols))
    }

    pub fn unlocked_coords(&self) -> Vec<Coord> {
        self.coords()
            .zip(&self.seats)
            .filter(|(_, seat)| !seat.locked)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Places a person directly, bypassing the roster. Locks are ignored.
    pub fn place(&mut self, coord: Coord, person: Option<Person>) -> SeatingResult<()> {
        let index = self.index(coord)?;
        self.seats[index].occupant = person;
        Ok(())
    }

    pub fn resize(&mut self, rows: usize, cols: usize) -> SeatingResult<()> {
        check_dimensions(rows, cols)?;

        let mut seats = vec![Seat::default(); rows * cols];
        for row in 0..rows.min(self.rows) {
            for col in 0..cols.min(self.cols) {
                seats[row * cols + col] = std::mem::take(&mut self.seats[row * self.cols + col]);
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.seats = seats;
        if let Some(coord) = self.selecting
            && (coord.row >= rows || coord.col >= cols)
        {
            self.selecting = None;
        }
        tracing::debug!(rows, cols, "grid resized");
        Ok(())
    }

    pub fn set_roster(&mut self, people: Vec<Person>) {
        self.roster = people
            .into_iter()
            .filter(|person| !person.name.trim().is_empty())
            .collect();
        tracing::debug!(count = self.roster.len(), "roster applied");
    }

    /// Labels the roster round-robin with groups `1..=group_count`.
    /// Returns whether anything changed.
    pub fn auto_assign_groups(&mut self, group_count: i64) -> bool {
        if group_count <= 0 || self.roster.is_empty() {
            return false;
        }
        // Groups past the roster size would stay empty.
        let people = self.roster.len();
        let count = usize::try_from(group_count).map_or(people, |count| count.min(people));
        for (index, person) in self.roster.iter_mut().enumerate() {
            person.group = u32::try_from(index % count + 1).ok();
        }
        tracing::debug!(group_count, people = self.roster.len(), "groups assigned");
        true
    }

    /// Shuffles the roster into the unlocked seats. Returns how many people
    /// were seated.
    pub fn shuffle(&mut self, seed: Option<&Seed>) -> usize {
        let targets = self.unlocked_coords();
        let need = targets.len();

        let mut pool: Vec<Option<Person>> = self
            .roster
            .iter()
            .take(need)
            .cloned()
            .map(Some)
            .collect();
        pool.resize(need, None);

        let mut rng = DeterministicRng::from_seed(seed);
        rng.shuffle(&mut pool);

        let placed = pool.iter().filter(|entry| entry.is_some()).count();
        for (coord, person) in targets.into_iter().zip(pool) {
            let index = coord.row * self.cols + coord.col;
            self.seats[index].occupant = person;
        }
        tracing::debug!(
            seed = ?seed,
            seats = need,
            placed,
            "seats shuffled"
        );
        placed
    }

    /// Exchanges the occupants of two seats. Locked seats cannot take part.
    pub fn swap(&mut self, a: Coord, b: Coord) -> SeatingResult<()> {
        let first = self.index(a)?;
        let second = self.index(b)?;
        if self.seats[first].locked {
            return Err(SeatingError::SeatLocked(a));
        }
        if self.seats[second].locked {
            return Err(SeatingError::SeatLocked(b));
        }
        if first != second {
            let moved = self.seats[first].occupant.take();
            let other = std::mem::replace(&mut self.seats[second].occupant, moved);
            self.seats[first].occupant = other;
        }
        tracing::debug!(%a, %b, "seats swapped");
        Ok(())
    }

    /// One click of the two-click swap flow.
    pub fn select(&mut self, coord: Coord) -> SeatingResult<Selection> {
        let index = self.index(coord)?;
        if self.seats[index].locked {
            return Err(SeatingError::SeatLocked(coord));
        }
        let outcome = match self.selecting.take() {
            None => {
                self.selecting = Some(coord);
                Selection::Pending(coord)
            }
            Some(pending) if pending == coord => Selection::Cleared,
            Some(pending) => {
                if let Err(error) = self.swap(pending, coord) {
                    self.selecting = Some(pending);
                    return Err(error);
                }
                Selection::Swapped(pending, coord)
            }
        };
        Ok(outcome)
    }

    pub fn clear_selection(&mut self) {
        self.selecting = None;
    }

    /// Flips the lock flag and returns the new value.
    pub fn toggle_lock(&mut self, coord: Coord) -> SeatingResult<bool> {
        let index = self.index(coord)?;
        let seat = &mut self.seats[index];
        seat.locked = !seat.locked;
        if seat.locked && self.selecting == Some(coord) {
            self.selecting = None;
        }
        tracing::debug!(%coord, locked = seat.locked, "seat lock toggled");
        Ok(seat.locked)
    }

    /// Empties and unlocks every seat. The roster is kept.
    pub fn reset(&mut self) {
        self.seats.iter_mut().for_each(|seat| *seat = Seat::default());
        self.selecting = None;
        tracing::debug!(rows = self.rows, cols = self.cols, "grid reset");
    }

    pub fn export_rows(&self) -> SeatRows<'_> {
        SeatRows {
            state: self,
            next: 0,
        }
    }

    fn index(&self, coord: Coord) -> SeatingResult<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return Err(SeatingError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(coord.row * self.cols + coord.col)
    }
}

fn check_dimensions(rows: usize, cols: usize) -> SeatingResult<()> {
    if rows == 0 || cols == 0 {
        return Err(SeatingError::InvalidDimension { rows, cols });
    }
    Ok(())
}

/// Row-major walk over the grid. Clone it to restart from the same point.
#[derive(Debug, Clone)]
pub struct SeatRows<'a> {
    state: &'a SeatingState,
    next: usize,
}

impl Iterator for SeatRows<'_> {
    type Item = SeatRow;

    fn next(&mut self) -> Option<Self::Item> {
        let seat = self.state.seats.get(self.next)?;
        let cols = self.state.cols;
        let row = SeatRow {
            row: self.next / cols + 1,
            col: self.next % cols + 1,
            name: seat.name().unwrap_or_default().to_owned(),
            gender: seat
                .occupant
                .as_ref()
                .map(|person| person.gender)
                .unwrap_or_default(),
            group: seat.occupant.as_ref().and_then(|person| person.group),
        };
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.state.seats.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SeatRows<'_> {}
