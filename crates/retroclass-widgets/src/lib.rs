// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod quiz;
pub mod roulette;
pub mod timer;

use anyhow::{Context, Result};
use retroclass_app::Config;
use time::{OffsetDateTime, UtcOffset};

pub use quiz::{Answer, Axis, QUESTIONS, QuizResult, QuizScore, QuizState, profile, score};
pub use roulette::{Assignment, RouletteState, SpinOutcome, parse_list};
pub use timer::{Band, Countdown, Phase, TimerEvent, format_mmss};

/// Classroom wall-clock offset from the config.
pub fn clock_offset(config: &Config) -> Result<UtcOffset> {
    let hours = config.utc_offset_hours();
    UtcOffset::from_hms(hours, 0, 0).with_context(|| format!("invalid utc offset {hours}h"))
}

/// Current time in the classroom's offset.
pub fn classroom_now(config: &Config) -> Result<OffsetDateTime> {
    Ok(OffsetDateTime::now_utc().to_offset(clock_offset(config)?))
}

#[cfg(test)]
mod tests {
    use super::{classroom_now, clock_offset};
    use retroclass_app::Config;

    #[test]
    fn default_clock_is_utc_plus_nine() -> anyhow::Result<()> {
        let config = Config::default();
        assert_eq!(clock_offset(&config)?.whole_hours(), 9);
        assert_eq!(classroom_now(&config)?.offset().whole_hours(), 9);
        Ok(())
    }
}
