// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Presentation countdown.
//!
//! Nothing ticks in the background: the caller polls with the current time and
//! the remaining time is derived from the stored end instant.

use anyhow::{Result, bail};
use retroclass_app::Config;
use time::{Duration, OffsetDateTime};

pub const MAX_MINUTES: i64 = 180;
const URGENT_SECONDS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running { ends_at: OffsetDateTime },
    Paused { remaining: Duration },
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    minutes: i64,
    duration: Duration,
    phase: Phase,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle(3)
    }
}

impl Countdown {
    pub fn new(minutes: i64) -> Result<Self> {
        check_minutes(minutes)?;
        Ok(Self::idle(minutes))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.timer_minutes())
    }

    fn idle(minutes: i64) -> Self {
        Self {
            minutes,
            duration: Duration::minutes(minutes),
            phase: Phase::Idle,
        }
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Changes the configured length. Takes effect on the next start.
    pub fn set_minutes(&mut self, minutes: i64) -> Result<()> {
        check_minutes(minutes)?;
        self.minutes = minutes;
        Ok(())
    }

    /// Preset buttons also reset the display unless a countdown is running.
    pub fn preset(&mut self, minutes: i64) -> Result<Option<TimerEvent>> {
        self.set_minutes(minutes)?;
        if self.is_running() {
            return Ok(None);
        }
        Ok(Some(self.reset()))
    }

    /// Starts, or restarts, from the full configured length.
    pub fn start(&mut self, now: OffsetDateTime) -> TimerEvent {
        self.duration = Duration::minutes(self.minutes);
        self.phase = Phase::Running {
            ends_at: now + self.duration,
        };
        tracing::debug!(minutes = self.minutes, "countdown started");
        TimerEvent::Started
    }

    pub fn toggle_pause(&mut self, now: OffsetDateTime) -> Option<TimerEvent> {
        match self.phase {
            Phase::Running { .. } => {
                self.phase = Phase::Paused {
                    remaining: self.remaining(now),
                };
                Some(TimerEvent::Paused)
            }
            Phase::Paused { remaining } => {
                self.phase = Phase::Running {
                    ends_at: now + remaining,
                };
                Some(TimerEvent::Resumed)
            }
            Phase::Idle | Phase::Ended => None,
        }
    }

    pub fn reset(&mut self) -> TimerEvent {
        self.duration = Duration::minutes(self.minutes);
        self.phase = Phase::Idle;
        TimerEvent::Reset
    }

    pub fn remaining(&self, now: OffsetDateTime) -> Duration {
        match self.phase {
            Phase::Idle => Duration::minutes(self.minutes),
            Phase::Running { ends_at } => (ends_at - now).max(Duration::ZERO),
            Phase::Paused { remaining } => remaining.max(Duration::ZERO),
            Phase::Ended => Duration::ZERO,
        }
    }

    /// Call on every redraw. Reports `Finished` exactly once.
    pub fn tick(&mut self, now: OffsetDateTime) -> Option<TimerEvent> {
        if self.is_running() && self.remaining(now) <= Duration::ZERO {
            self.phase = Phase::Ended;
            tracing::debug!("countdown finished");
            return Some(TimerEvent::Finished);
        }
        None
    }

    /// Color for the remaining share of the countdown. A paused countdown
    /// keeps its color.
    pub fn band(&self, now: OffsetDateTime) -> Band {
        let counting = matches!(self.phase, Phase::Running { .. } | Phase::Paused { .. });
        if !counting || self.duration <= Duration::ZERO {
            return Band::Green;
        }
        let ratio = self.remaining(now).as_seconds_f64() / self.duration.as_seconds_f64();
        if ratio > 0.5 {
            Band::Green
        } else if ratio > 0.2 {
            Band::Yellow
        } else {
            Band::Red
        }
    }

    pub fn is_urgent(&self, now: OffsetDateTime) -> bool {
        self.is_running() && self.remaining(now) <= Duration::seconds(URGENT_SECONDS)
    }

    pub fn status_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "waiting",
            Phase::Running { .. } => "running",
            Phase::Paused { .. } => "paused",
            Phase::Ended => "done!",
        }
    }
}

/// `MM:SS`, rounded to the nearest second. Minutes are not capped at 59.
pub fn format_mmss(remaining: Duration) -> String {
    let seconds = remaining.as_seconds_f64().round().max(0.0) as i64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn check_minutes(minutes: i64) -> Result<()> {
    if !(1..=MAX_MINUTES).contains(&minutes) {
        bail!("timer length must be between 1 and {MAX_MINUTES} minutes, got {minutes}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Band, Countdown, Phase, TimerEvent, format_mmss};
    use anyhow::Result;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    fn t0() -> OffsetDateTime {
        datetime!(2026-03-02 09:00:00 +09:00)
    }

    #[test]
    fn idle_shows_configured_length() -> Result<()> {
        let timer = Countdown::new(5)?;
        assert_eq!(format_mmss(timer.remaining(t0())), "05:00");
        assert_eq!(timer.band(t0()), Band::Green);
        assert_eq!(timer.status_label(), "waiting");
        Ok(())
    }

    #[test]
    fn minutes_out_of_range_are_rejected() {
        assert!(Countdown::new(0).is_err());
        assert!(Countdown::new(181).is_err());
        let error = Countdown::new(-1).expect_err("negative minutes");
        assert!(error.to_string().contains("between 1 and 180"));
    }

    #[test]
    fn remaining_is_end_minus_now() -> Result<()> {
        let mut timer = Countdown::new(3)?;
        assert_eq!(timer.start(t0()), TimerEvent::Started);
        let later = t0() + Duration::seconds(61);
        assert_eq!(format_mmss(timer.remaining(later)), "01:59");
        assert_eq!(timer.tick(later), None);
        Ok(())
    }

    #[test]
    fn pause_freezes_and_resume_extends_end() -> Result<()> {
        let mut timer = Countdown::new(1)?;
        timer.start(t0());
        let paused_at = t0() + Duration::seconds(20);
        assert_eq!(timer.toggle_pause(paused_at), Some(TimerEvent::Paused));
        assert_eq!(
            timer.phase(),
            Phase::Paused {
                remaining: Duration::seconds(40)
            }
        );

        let much_later = paused_at + Duration::minutes(10);
        assert_eq!(timer.remaining(much_later), Duration::seconds(40));
        assert_eq!(timer.toggle_pause(much_later), Some(TimerEvent::Resumed));
        assert_eq!(
            timer.remaining(much_later + Duration::seconds(5)),
            Duration::seconds(35)
        );
        Ok(())
    }

    #[test]
    fn toggle_does_nothing_when_idle() {
        let mut timer = Countdown::default();
        assert_eq!(timer.toggle_pause(t0()), None);
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn finishing_is_reported_once() -> Result<()> {
        let mut timer = Countdown::new(1)?;
        timer.start(t0());
        let end = t0() + Duration::minutes(2);
        assert_eq!(timer.tick(end), Some(TimerEvent::Finished));
        assert_eq!(timer.tick(end), None);
        assert_eq!(timer.remaining(end), Duration::ZERO);
        assert_eq!(timer.status_label(), "done!");
        Ok(())
    }

    #[test]
    fn band_follows_remaining_ratio() -> Result<()> {
        let mut timer = Countdown::new(10)?;
        timer.start(t0());
        assert_eq!(timer.band(t0() + Duration::minutes(4)), Band::Green);
        assert_eq!(timer.band(t0() + Duration::minutes(6)), Band::Yellow);
        assert_eq!(timer.band(t0() + Duration::minutes(9)), Band::Red);
        assert!(!timer.is_urgent(t0() + Duration::minutes(9)));
        assert!(timer.is_urgent(t0() + Duration::seconds(595)));
        Ok(())
    }

    #[test]
    fn paused_countdown_keeps_its_band() -> Result<()> {
        let mut timer = Countdown::new(10)?;
        timer.start(t0());
        let paused_at = t0() + Duration::minutes(9);
        timer.toggle_pause(paused_at);
        assert_eq!(timer.band(paused_at + Duration::minutes(30)), Band::Red);
        assert!(!timer.is_urgent(paused_at));

        timer.reset();
        assert_eq!(timer.band(t0()), Band::Green);
        Ok(())
    }

    #[test]
    fn preset_resets_only_when_not_running() -> Result<()> {
        let mut timer = Countdown::new(3)?;
        assert_eq!(timer.preset(5)?, Some(TimerEvent::Reset));
        assert_eq!(timer.remaining(t0()), Duration::minutes(5));

        timer.start(t0());
        assert_eq!(timer.preset(10)?, None);
        assert!(timer.is_running());
        assert_eq!(timer.remaining(t0()), Duration::minutes(5));
        Ok(())
    }

    #[test]
    fn format_rounds_and_clamps() {
        assert_eq!(format_mmss(Duration::milliseconds(59_600)), "01:00");
        assert_eq!(format_mmss(Duration::seconds(-3)), "00:00");
        assert_eq!(format_mmss(Duration::minutes(120)), "120:00");
    }
}
