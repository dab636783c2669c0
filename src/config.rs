use core::fmt;

use embassy_time::Duration;

/// Minimum continuous press that counts as a long press.
pub const DEFAULT_LONG_PRESS_MS: u32 = 500;
/// Wall-clock length of one blink session.
pub const DEFAULT_BLINK_DURATION_MS: u32 = 10_000;
/// Time between output toggles while blinking (100 ms on, 100 ms off).
pub const DEFAULT_BLINK_HALF_PERIOD_MS: u32 = 100;

/// Timing parameters of the blink controller.
///
/// All thresholds are in milliseconds; `ms_per_tick` converts the host's tick
/// counter into milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkConfig {
    pub long_press_ms: u32,
    pub blink_duration_ms: u32,
    pub blink_half_period_ms: u32,
    pub ms_per_tick: u32,
}

impl BlinkConfig {
    pub const fn new() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            blink_duration_ms: DEFAULT_BLINK_DURATION_MS,
            blink_half_period_ms: DEFAULT_BLINK_HALF_PERIOD_MS,
            ms_per_tick: 1,
        }
    }

    /// Builds a millisecond-tick configuration from `embassy_time` durations.
    ///
    /// Durations longer than `u32::MAX` milliseconds are clamped.
    pub fn from_durations(long_press: Duration, blink_duration: Duration, half_period: Duration) -> Self {
        Self {
            long_press_ms: clamp_ms(long_press),
            blink_duration_ms: clamp_ms(blink_duration),
            blink_half_period_ms: clamp_ms(half_period),
            ms_per_tick: 1,
        }
    }

    pub const fn with_long_press_ms(mut self, ms: u32) -> Self {
        self.long_press_ms = ms;
        self
    }

    pub const fn with_blink_duration_ms(mut self, ms: u32) -> Self {
        self.blink_duration_ms = ms;
        self
    }

    pub const fn with_blink_half_period_ms(mut self, ms: u32) -> Self {
        self.blink_half_period_ms = ms;
        self
    }

    pub const fn with_ms_per_tick(mut self, ms_per_tick: u32) -> Self {
        self.ms_per_tick = ms_per_tick;
        self
    }

    /// Derives `ms_per_tick` from a tick frequency, e.g. 100 Hz gives 10 ms.
    ///
    /// Only frequencies whose period is a whole number of milliseconds
    /// (divisors of 1000) are representable. Any other rate, including 0 Hz
    /// and anything above 1 kHz, yields a zero period, which
    /// [`validate`](Self::validate) rejects instead of silently rounding.
    pub const fn with_tick_rate_hz(mut self, hz: u32) -> Self {
        self.ms_per_tick = if hz != 0 && 1000 % hz == 0 { 1000 / hz } else { 0 };
        self
    }

    /// Full blink period (on + off).
    pub const fn blink_period_ms(&self) -> u32 {
        self.blink_half_period_ms.saturating_mul(2)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.ms_per_tick == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.blink_half_period_ms == 0 {
            return Err(ConfigError::ZeroHalfPeriod);
        }
        if self.blink_duration_ms < self.blink_half_period_ms {
            return Err(ConfigError::DurationShorterThanHalfPeriod {
                duration_ms: self.blink_duration_ms,
                half_period_ms: self.blink_half_period_ms,
            });
        }
        Ok(self)
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_ms(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The tick-to-millisecond factor is zero (or the tick rate has no whole
    /// millisecond period), so elapsed time cannot be measured.
    ZeroTickPeriod,
    /// A zero half period would toggle the output on every poll.
    ZeroHalfPeriod,
    /// A session this short ends before the first toggle.
    DurationShorterThanHalfPeriod { duration_ms: u32, half_period_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTickPeriod => f.write_str("tick period must be a whole number of milliseconds, at least 1"),
            ConfigError::ZeroHalfPeriod => f.write_str("blink half period must be non-zero"),
            ConfigError::DurationShorterThanHalfPeriod {
                duration_ms,
                half_period_ms,
            } => write!(
                f,
                "blink duration {duration_ms} ms is shorter than half period {half_period_ms} ms"
            ),
        }
    }
}
