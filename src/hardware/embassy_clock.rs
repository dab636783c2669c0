use super::traits::Clock;
use crate::tick::Tick;
use embassy_time::Instant;

/// Millisecond ticks from the embassy time driver.
///
/// The uptime is truncated to 32 bits and wraps after ~49.7 days, which the
/// controller's elapsed-time arithmetic tolerates. Pair with
/// `BlinkConfig::with_ms_per_tick(1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Tick {
        Instant::now().as_millis() as Tick
    }
}
