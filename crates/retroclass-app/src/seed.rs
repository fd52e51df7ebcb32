// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Seeds and the deterministic generator behind every shuffle.
//!
//! A seed is canonicalized to a `u64` the same way on every platform:
//! all-digit text that fits in a `u64` is used as that number, any other text
//! is hashed with SHA-256 and the first eight bytes are read big-endian.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Parses user input. Blank input means "no seed".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit())
            && let Ok(value) = trimmed.parse::<u64>()
        {
            return Some(Self::Number(value));
        }
        Some(Self::Text(trimmed.to_owned()))
    }

    pub fn state(&self) -> u64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let digest = Sha256::digest(text.as_bytes());
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&digest[..8]);
                u64::from_be_bytes(bytes)
            }
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    pub fn from_seed(seed: Option<&Seed>) -> Self {
        match seed {
            Some(seed) => Self::new(seed.state()),
            None => Self::new(rand::random::<u64>()),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    /// Fisher–Yates, walking from the last index down.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int_n(i + 1);
            items.swap(i, j);
        }
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.int_n(items.len()))
    }
}
