//! Poll loop glue between the controller and its collaborators.

use core::fmt;

use crate::controller::{Step, TimedButtonBlinkController};
use crate::hardware::traits::{Button, Clock, Led};
use crate::snapshot::{Snapshot, SnapshotSignal};
use crate::tick::Tick;

/// I/O failure of one of the driver's collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<BE, LE> {
    Button(BE),
    Led(LE),
}

impl<BE: fmt::Debug, LE: fmt::Debug> fmt::Display for DriverError<BE, LE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Button(e) => write!(f, "button read failed: {e:?}"),
            DriverError::Led(e) => write!(f, "led write failed: {e:?}"),
        }
    }
}

/// Samples the button, steps the controller and mirrors its output on the LED.
///
/// The LED is only written when its last successfully written level differs
/// from the controller output, so a failed write is retried on the next poll.
pub struct BlinkDriver<B, L, C> {
    controller: TimedButtonBlinkController,
    button: B,
    led: L,
    clock: C,
    snapshots: Option<&'static SnapshotSignal>,
    /// `None` until the first write succeeds, and again after a failed one.
    led_level: Option<bool>,
}

impl<B, L, C> BlinkDriver<B, L, C>
where
    B: Button,
    L: Led,
    C: Clock,
{
    pub fn new(controller: TimedButtonBlinkController, button: B, led: L, clock: C) -> Self {
        Self {
            controller,
            button,
            led,
            clock,
            snapshots: None,
            led_level: None,
        }
    }

    /// Publishes a [`Snapshot`] on every state or output change.
    pub fn with_snapshots(mut self, signal: &'static SnapshotSignal) -> Self {
        self.snapshots = Some(signal);
        self
    }

    pub fn controller(&self) -> &TimedButtonBlinkController {
        &self.controller
    }

    /// Drives the LED to the controller's current level and publishes the
    /// initial snapshot. Call once before the first [`poll_once`](Self::poll_once).
    pub fn start(&mut self) -> Result<(), DriverError<B::Error, L::Error>> {
        let now = self.clock.now();
        self.sync_led(now)?;
        info!(
            "blink controller started: long press {} ms, blink {} ms, half period {} ms",
            self.controller.config().long_press_ms,
            self.controller.config().blink_duration_ms,
            self.controller.config().blink_half_period_ms
        );
        self.publish(now);
        Ok(())
    }

    /// One poll: read the button, read the clock, step, write the LED.
    pub fn poll_once(&mut self) -> Result<Step, DriverError<B::Error, L::Error>> {
        let level = self.button.is_pressed().map_err(DriverError::Button)?;
        let now = self.clock.now();
        let step = self.controller.poll(level, now);

        if let Some(transition) = step.transition {
            info!("{} (tick {})", transition.describe(), now);
            debug!("{} -> {}", transition.from().name(), transition.to().name());
        }

        if step.transition.is_some() || step.output_changed() {
            self.publish(now);
        }

        self.sync_led(now)?;
        Ok(step)
    }

    /// `true` when the LED is known to show the controller output.
    pub fn led_in_sync(&self) -> bool {
        self.led_level == Some(self.controller.output())
    }

    fn sync_led(&mut self, now: Tick) -> Result<(), DriverError<B::Error, L::Error>> {
        let output = self.controller.output();
        if self.led_level == Some(output) {
            return Ok(());
        }
        match self.led.set(output) {
            Ok(()) => {
                self.led_level = Some(output);
                trace!("led {} at tick {}", output, now);
                Ok(())
            }
            Err(e) => {
                self.led_level = None;
                warn!("led write failed at tick {}, retrying next poll", now);
                Err(DriverError::Led(e))
            }
        }
    }

    /// Hands back the collaborators and the controller.
    pub fn release(self) -> (TimedButtonBlinkController, B, L, C) {
        (self.controller, self.button, self.led, self.clock)
    }

    fn publish(&self, now: Tick) {
        if let Some(signal) = self.snapshots {
            signal.publish(Snapshot {
                state: self.controller.current_state(),
                output: self.controller.output(),
                tick: now,
            });
        }
    }
}
