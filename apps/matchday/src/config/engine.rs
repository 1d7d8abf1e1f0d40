//! Tunables for the match engine: pacing, channel sizes and capacity limits.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// How often the round scheduler scans for due fixtures
    pub scheduler_interval: Duration,
    /// Wall-clock length of a full 90-minute replay
    pub replay_duration: Duration,
    /// Wall-clock pause inserted at half time
    pub half_time_pause: Duration,
    /// Gap between the kick-off times of consecutive rounds
    pub round_spacing: time::Duration,
    /// Snapshot cadence in simulated minutes
    pub snapshot_every: u8,
    /// Buffered messages per match feed before slow subscribers lag
    pub feed_capacity: usize,
    /// Concurrent live replays before new matches fall back to direct finalization
    pub max_live_sessions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scheduler_interval: Duration::from_secs(60),
            replay_duration: Duration::from_secs(90),
            half_time_pause: Duration::from_secs(5),
            round_spacing: time::Duration::minutes(10),
            snapshot_every: 5,
            feed_capacity: 256,
            max_live_sessions: 512,
        }
    }
}

impl EngineConfig {
    /// Read the configuration from `MATCHDAY_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let snapshot_every: u8 = parse_var("MATCHDAY_SNAPSHOT_EVERY", defaults.snapshot_every)?;
        if snapshot_every == 0 {
            return Err(AppError::config("MATCHDAY_SNAPSHOT_EVERY must be at least 1"));
        }
        let feed_capacity: usize = parse_var("MATCHDAY_FEED_CAPACITY", defaults.feed_capacity)?;
        if feed_capacity == 0 {
            return Err(AppError::config("MATCHDAY_FEED_CAPACITY must be at least 1"));
        }

        Ok(Self {
            scheduler_interval: Duration::from_secs(parse_var(
                "MATCHDAY_SCHEDULER_INTERVAL_SECS",
                defaults.scheduler_interval.as_secs(),
            )?),
            replay_duration: Duration::from_secs(parse_var(
                "MATCHDAY_REPLAY_SECS",
                defaults.replay_duration.as_secs(),
            )?),
            half_time_pause: Duration::from_secs(parse_var(
                "MATCHDAY_HALF_TIME_PAUSE_SECS",
                defaults.half_time_pause.as_secs(),
            )?),
            round_spacing: time::Duration::minutes(parse_var(
                "MATCHDAY_ROUND_SPACING_MINS",
                defaults.round_spacing.whole_minutes(),
            )?),
            snapshot_every,
            feed_capacity,
            max_live_sessions: parse_var(
                "MATCHDAY_MAX_LIVE_SESSIONS",
                defaults.max_live_sessions,
            )?,
        })
    }

    /// Zero pacing so replays run to completion as fast as the runtime allows.
    pub fn for_tests() -> Self {
        Self {
            scheduler_interval: Duration::from_millis(20),
            replay_duration: Duration::ZERO,
            half_time_pause: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_max_live_sessions(mut self, max: usize) -> Self {
        self.max_live_sessions = max;
        self
    }

    pub fn with_replay_duration(mut self, duration: Duration) -> Self {
        self.replay_duration = duration;
        self
    }

    /// Wall-clock time per simulated minute.
    pub fn minute_tick(&self) -> Duration {
        self.replay_duration / 90
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has an invalid value '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use serial_test::serial;

    use super::EngineConfig;

    #[test]
    #[serial]
    fn defaults_when_env_is_empty() {
        env::remove_var("MATCHDAY_REPLAY_SECS");
        env::remove_var("MATCHDAY_ROUND_SPACING_MINS");
        let cfg = EngineConfig::from_env().unwrap();
        assert_eq!(cfg.replay_duration, Duration::from_secs(90));
        assert_eq!(cfg.round_spacing, time::Duration::minutes(10));
        assert_eq!(cfg.minute_tick(), Duration::from_secs(1));
    }

    #[test]
    #[serial]
    fn env_overrides_are_parsed() {
        env::set_var("MATCHDAY_REPLAY_SECS", "180");
        env::set_var("MATCHDAY_ROUND_SPACING_MINS", "30");
        let cfg = EngineConfig::from_env().unwrap();
        assert_eq!(cfg.replay_duration, Duration::from_secs(180));
        assert_eq!(cfg.round_spacing, time::Duration::minutes(30));
        env::remove_var("MATCHDAY_REPLAY_SECS");
        env::remove_var("MATCHDAY_ROUND_SPACING_MINS");
    }

    #[test]
    #[serial]
    fn garbage_is_a_config_error() {
        env::set_var("MATCHDAY_FEED_CAPACITY", "many");
        let err = EngineConfig::from_env().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        env::remove_var("MATCHDAY_FEED_CAPACITY");
    }

    #[test]
    fn test_config_has_no_pacing() {
        let cfg = EngineConfig::for_tests();
        assert_eq!(cfg.minute_tick(), Duration::ZERO);
        assert_eq!(cfg.half_time_pause, Duration::ZERO);
    }
}
