// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::seating::{DEFAULT_COLS, DEFAULT_ROWS, SeatingState};
use crate::{Seat, SeatCommand};

pub const APP_NAME: &str = "retroclass";
pub const CONFIG_PATH_ENV: &str = "RETROCLASS_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_MAX_DIMENSION: usize = 12;
const DEFAULT_MAX_GROUPS: i64 = 20;
const DEFAULT_EMPTY_LABEL: &str = "empty";
const DEFAULT_TIMER_MINUTES: i64 = 3;
const MAX_TIMER_MINUTES: i64 = 180;
const DEFAULT_UTC_OFFSET_HOURS: i8 = 9;
const DEFAULT_ROLES: [&str; 6] = [
    "leader",
    "note taker",
    "researcher",
    "presenter",
    "timekeeper",
    "tidy-up",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub seating: Seating,
    #[serde(default)]
    pub timer: Timer,
    #[serde(default)]
    pub roulette: Roulette,
    #[serde(default)]
    pub clock: Clock,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            seating: Seating::default(),
            timer: Timer::default(),
            roulette: Roulette::default(),
            clock: Clock::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seating {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub max_rows: Option<usize>,
    pub max_cols: Option<usize>,
    pub empty_label: Option<String>,
    pub max_groups: Option<i64>,
}

impl Default for Seating {
    fn default() -> Self {
        Self {
            rows: Some(DEFAULT_ROWS),
            cols: Some(DEFAULT_COLS),
            max_rows: Some(DEFAULT_MAX_DIMENSION),
            max_cols: Some(DEFAULT_MAX_DIMENSION),
            empty_label: Some(DEFAULT_EMPTY_LABEL.to_owned()),
            max_groups: Some(DEFAULT_MAX_GROUPS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Timer {
    pub minutes: Option<i64>,
    pub presets: Option<Vec<i64>>,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            minutes: Some(DEFAULT_TIMER_MINUTES),
            presets: Some(vec![3, 5, 10]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Roulette {
    pub roles: Option<Vec<String>>,
}

impl Default for Roulette {
    fn default() -> Self {
        Self {
            roles: Some(DEFAULT_ROLES.iter().map(|role| (*role).to_owned()).collect()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Clock {
    pub utc_offset_hours: Option<i8>,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            utc_offset_hours: Some(DEFAULT_UTC_OFFSET_HOURS),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [seating], [timer], [roulette], and [clock]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let (max_rows, max_cols) = (self.max_rows(), self.max_cols());
        if max_rows == 0 || max_cols == 0 {
            bail!(
                "seating.max_rows/max_cols in {} must be positive, got {}x{}",
                path.display(),
                max_rows,
                max_cols
            );
        }
        let (rows, cols) = (self.rows(), self.cols());
        if rows == 0 || cols == 0 || rows > max_rows || cols > max_cols {
            bail!(
                "seating grid in {} must be between 1x1 and {}x{}, got {}x{}",
                path.display(),
                max_rows,
                max_cols,
                rows,
                cols
            );
        }
        if let Some(max_groups) = self.seating.max_groups
            && max_groups < 0
        {
            bail!(
                "seating.max_groups in {} must be non-negative, got {}",
                path.display(),
                max_groups
            );
        }

        for minutes in std::iter::once(self.timer_minutes()).chain(self.timer_presets()) {
            if !(1..=MAX_TIMER_MINUTES).contains(&minutes) {
                bail!(
                    "timer minutes in {} must be between 1 and {}, got {}",
                    path.display(),
                    MAX_TIMER_MINUTES,
                    minutes
                );
            }
        }

        if self.roulette_roles().iter().any(|role| role.trim().is_empty()) {
            bail!("roulette.roles in {} cannot contain blank roles", path.display());
        }

        let offset = self.utc_offset_hours();
        if !(-12..=14).contains(&offset) {
            bail!(
                "clock.utc_offset_hours in {} must be between -12 and 14, got {}",
                path.display(),
                offset
            );
        }

        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.seating.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn cols(&self) -> usize {
        self.seating.cols.unwrap_or(DEFAULT_COLS)
    }

    pub fn max_rows(&self) -> usize {
        self.seating.max_rows.unwrap_or(DEFAULT_MAX_DIMENSION)
    }

    pub fn max_cols(&self) -> usize {
        self.seating.max_cols.unwrap_or(DEFAULT_MAX_DIMENSION)
    }

    pub fn max_groups(&self) -> i64 {
        self.seating.max_groups.unwrap_or(DEFAULT_MAX_GROUPS)
    }

    pub fn empty_label(&self) -> &str {
        self.seating
            .empty_label
            .as_deref()
            .unwrap_or(DEFAULT_EMPTY_LABEL)
    }

    pub fn timer_minutes(&self) -> i64 {
        self.timer.minutes.unwrap_or(DEFAULT_TIMER_MINUTES)
    }

    pub fn timer_presets(&self) -> Vec<i64> {
        self.timer.presets.clone().unwrap_or_else(|| vec![3, 5, 10])
    }

    pub fn roulette_roles(&self) -> Vec<String> {
        self.roulette
            .roles
            .clone()
            .unwrap_or_else(|| Roulette::default().roles.unwrap_or_default())
    }

    pub fn utc_offset_hours(&self) -> i8 {
        self.clock
            .utc_offset_hours
            .unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
    }

    /// Starting grid for a new session.
    pub fn initial_seating(&self) -> Result<SeatingState> {
        SeatingState::empty(self.rows(), self.cols()).with_context(|| {
            format!(
                "configured grid {}x{} is invalid; fix [seating].rows/cols",
                self.rows(),
                self.cols()
            )
        })
    }

    /// Builds a resize command, enforcing the configured upper bounds.
    pub fn resize_command(&self, rows: usize, cols: usize) -> Result<SeatCommand> {
        if rows > self.max_rows() || cols > self.max_cols() {
            bail!(
                "grid {}x{} exceeds the configured maximum {}x{}",
                rows,
                cols,
                self.max_rows(),
                self.max_cols()
            );
        }
        Ok(SeatCommand::Resize { rows, cols })
    }

    /// Builds a group-assignment command, enforcing `max_groups`.
    pub fn group_command(&self, group_count: i64) -> Result<SeatCommand> {
        if group_count > self.max_groups() {
            bail!(
                "group count {} exceeds the configured maximum {}",
                group_count,
                self.max_groups()
            );
        }
        Ok(SeatCommand::AutoAssignGroups(group_count))
    }

    pub fn seat_label<'a>(&'a self, seat: &'a Seat) -> &'a str {
        seat.name().unwrap_or_else(|| self.empty_label())
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# retroclass config\n# Place this file at: {}\n\nversion = 1\n\n[seating]\nrows = {}\ncols = {}\nmax_rows = {}\nmax_cols = {}\nempty_label = \"{}\"\nmax_groups = {}\n\n[timer]\nminutes = {}\npresets = [3, 5, 10]\n\n[roulette]\nroles = [{}]\n\n[clock]\nutc_offset_hours = {}\n",
            path.display(),
            DEFAULT_ROWS,
            DEFAULT_COLS,
            DEFAULT_MAX_DIMENSION,
            DEFAULT_MAX_DIMENSION,
            DEFAULT_EMPTY_LABEL,
            DEFAULT_MAX_GROUPS,
            DEFAULT_TIMER_MINUTES,
            DEFAULT_ROLES
                .iter()
                .map(|role| format!("\"{role}\""))
                .collect::<Vec<_>>()
                .join(", "),
            DEFAULT_UTC_OFFSET_HOURS,
        )
    }
}
