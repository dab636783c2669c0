//! Long-press blink state machine.
//!
//! A long press starts a fixed-length fast-blink session. A second long press
//! during the session cancels it; a short one is ignored. The controller is a
//! pure step function over `(button level, tick)` and does no I/O.

use crate::config::{BlinkConfig, ConfigError};
use crate::tick::{self, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Output off, waiting for a press.
    #[default]
    Idle,
    /// Button down, not yet held long enough.
    Pressed,
    /// Blinking while the press that started the session is still held.
    BlinkActiveInitialHold,
    /// Blinking with the button released.
    Blinking,
    /// Blinking while a possible cancelling press is timed.
    BlinkActiveCancelHold,
    /// Session over with the button still down; output off until release.
    BlinkEndedAwaitingRelease,
}

impl ButtonState {
    /// `true` in the three states that belong to a blink session.
    pub const fn is_blinking(self) -> bool {
        matches!(
            self,
            ButtonState::BlinkActiveInitialHold
                | ButtonState::Blinking
                | ButtonState::BlinkActiveCancelHold
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            ButtonState::Idle => "Idle",
            ButtonState::Pressed => "Pressed",
            ButtonState::BlinkActiveInitialHold => "BlinkActiveInitialHold",
            ButtonState::Blinking => "Blinking",
            ButtonState::BlinkActiveCancelHold => "BlinkActiveCancelHold",
            ButtonState::BlinkEndedAwaitingRelease => "BlinkEndedAwaitingRelease",
        }
    }
}

/// A state change taken during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    PressStarted,
    PressReleasedEarly,
    LongPressDetected,
    InitialHoldReleased,
    /// Session ran its full length with the button released.
    BlinkExpired,
    /// Session ran its full length while a press was still held.
    BlinkExpiredWhileHeld,
    CancelPressStarted,
    CancelPressReleasedEarly,
    /// Cancel press released after the session had already run out.
    CancelReleasedAfterExpiry,
    /// Session ran out while a cancel press was still being timed.
    CancelHoldExpired,
    BlinkCancelled,
    ReleasedAfterBlink,
}

impl Transition {
    /// State this transition leaves.
    pub const fn from(self) -> ButtonState {
        match self {
            Transition::PressStarted => ButtonState::Idle,
            Transition::PressReleasedEarly => ButtonState::Pressed,
            Transition::LongPressDetected => ButtonState::Pressed,
            Transition::InitialHoldReleased => ButtonState::BlinkActiveInitialHold,
            Transition::BlinkExpired => ButtonState::Blinking,
            Transition::BlinkExpiredWhileHeld => ButtonState::BlinkActiveInitialHold,
            Transition::CancelPressStarted => ButtonState::Blinking,
            Transition::CancelPressReleasedEarly => ButtonState::BlinkActiveCancelHold,
            Transition::CancelReleasedAfterExpiry => ButtonState::BlinkActiveCancelHold,
            Transition::CancelHoldExpired => ButtonState::BlinkActiveCancelHold,
            Transition::BlinkCancelled => ButtonState::BlinkActiveCancelHold,
            Transition::ReleasedAfterBlink => ButtonState::BlinkEndedAwaitingRelease,
        }
    }

    /// State entered by this transition.
    pub const fn to(self) -> ButtonState {
        match self {
            Transition::PressStarted => ButtonState::Pressed,
            Transition::PressReleasedEarly => ButtonState::Idle,
            Transition::LongPressDetected => ButtonState::BlinkActiveInitialHold,
            Transition::InitialHoldReleased => ButtonState::Blinking,
            Transition::BlinkExpired => ButtonState::Idle,
            Transition::BlinkExpiredWhileHeld => ButtonState::BlinkEndedAwaitingRelease,
            Transition::CancelPressStarted => ButtonState::BlinkActiveCancelHold,
            Transition::CancelPressReleasedEarly => ButtonState::Blinking,
            Transition::CancelReleasedAfterExpiry => ButtonState::Idle,
            Transition::CancelHoldExpired => ButtonState::BlinkEndedAwaitingRelease,
            Transition::BlinkCancelled => ButtonState::BlinkEndedAwaitingRelease,
            Transition::ReleasedAfterBlink => ButtonState::Idle,
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Transition::PressStarted => "button pressed, timing press",
            Transition::PressReleasedEarly => "button released too early",
            Transition::LongPressDetected => "long press detected, blinking",
            Transition::InitialHoldReleased => "button released, blinking continues",
            Transition::BlinkExpired => "blink session finished",
            Transition::BlinkExpiredWhileHeld => "blink session finished, waiting for release",
            Transition::CancelPressStarted => "button pressed during blink",
            Transition::CancelPressReleasedEarly => "cancel press too short, blinking continues",
            Transition::CancelReleasedAfterExpiry => "button released, blink session finished",
            Transition::CancelHoldExpired => "blink session finished, waiting for release",
            Transition::BlinkCancelled => "long press detected, blink cancelled",
            Transition::ReleasedAfterBlink => "button released, idle",
        }
    }
}

/// Result of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Output level after the poll.
    pub output: bool,
    /// Output level before the poll.
    pub previous_output: bool,
    /// State the poll started in.
    pub previous_state: ButtonState,
    /// The blink phase flipped on this poll.
    pub toggled: bool,
    pub transition: Option<Transition>,
}

impl Step {
    pub const fn output_changed(&self) -> bool {
        self.output != self.previous_output
    }

    /// State after the poll.
    pub const fn state(&self) -> ButtonState {
        match self.transition {
            Some(t) => t.to(),
            None => self.previous_state,
        }
    }
}

/// Polled long-press / blink / cancel controller.
///
/// Call [`poll`](Self::poll) (or [`step`](Self::step)) once per poll interval
/// with the sampled button level (`true` = pressed) and the current tick.
#[derive(Debug, Clone)]
pub struct TimedButtonBlinkController {
    config: BlinkConfig,
    state: ButtonState,
    /// Valid in `Pressed` and `BlinkActiveCancelHold`.
    press_start: Tick,
    /// Valid while `state.is_blinking()`.
    session_start: Tick,
    last_toggle: Tick,
    output: bool,
}

impl TimedButtonBlinkController {
    pub fn new(config: BlinkConfig) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Controller with the default 500 ms / 10 s / 100 ms timings and 1 ms ticks.
    pub const fn with_defaults() -> Self {
        Self::from_valid_config(BlinkConfig::new())
    }

    const fn from_valid_config(config: BlinkConfig) -> Self {
        Self {
            config,
            state: ButtonState::Idle,
            press_start: 0,
            session_start: 0,
            last_toggle: 0,
            output: false,
        }
    }

    pub const fn config(&self) -> &BlinkConfig {
        &self.config
    }

    pub const fn current_state(&self) -> ButtonState {
        self.state
    }

    pub const fn output(&self) -> bool {
        self.output
    }

    /// Back to `Idle` with the output off, dropping any session in progress.
    pub fn reset(&mut self) {
        self.state = ButtonState::Idle;
        self.output = false;
    }

    /// Time since the current blink session started, if one is running.
    pub fn blink_elapsed_ms(&self, now: Tick) -> Option<u32> {
        self.state
            .is_blinking()
            .then(|| self.elapsed(now, self.session_start))
    }

    /// Time the button has been held, while a press is being timed.
    pub fn press_elapsed_ms(&self, now: Tick) -> Option<u32> {
        matches!(
            self.state,
            ButtonState::Pressed | ButtonState::BlinkActiveCancelHold
        )
        .then(|| self.elapsed(now, self.press_start))
    }

    /// Advances one poll and returns the new output level.
    pub fn step(&mut self, level: bool, now: Tick) -> bool {
        self.poll(level, now).output
    }

    /// Advances one poll and reports what happened.
    ///
    /// Within each state the checks run in a fixed order: release before
    /// long-press in the timing states, session expiry (or cancel
    /// confirmation) before the blink toggle, so an expired session never
    /// toggles once more.
    pub fn poll(&mut self, level: bool, now: Tick) -> Step {
        let previous_state = self.state;
        let previous_output = self.output;
        let mut toggled = false;

        let transition = match self.state {
            ButtonState::Idle => {
                if level {
                    self.press_start = now;
                    Some(Transition::PressStarted)
                } else {
                    None
                }
            }
            ButtonState::Pressed => {
                if !level {
                    Some(Transition::PressReleasedEarly)
                } else if self.long_press_reached(now) {
                    self.session_start = now;
                    self.last_toggle = now;
                    self.output = true;
                    Some(Transition::LongPressDetected)
                } else {
                    None
                }
            }
            ButtonState::BlinkActiveInitialHold => {
                if self.session_expired(now) {
                    Some(Transition::BlinkExpiredWhileHeld)
                } else if !level {
                    Some(Transition::InitialHoldReleased)
                } else {
                    toggled = self.toggle_if_due(now);
                    None
                }
            }
            ButtonState::Blinking => {
                if level {
                    self.press_start = now;
                    Some(Transition::CancelPressStarted)
                } else if self.session_expired(now) {
                    Some(Transition::BlinkExpired)
                } else {
                    toggled = self.toggle_if_due(now);
                    None
                }
            }
            ButtonState::BlinkActiveCancelHold => {
                if !level {
                    // A press that started on the expiry poll must not keep
                    // the session alive past its length.
                    if self.session_expired(now) {
                        Some(Transition::CancelReleasedAfterExpiry)
                    } else {
                        Some(Transition::CancelPressReleasedEarly)
                    }
                } else if self.long_press_reached(now) {
                    Some(Transition::BlinkCancelled)
                } else if self.session_expired(now) {
                    Some(Transition::CancelHoldExpired)
                } else {
                    toggled = self.toggle_if_due(now);
                    None
                }
            }
            ButtonState::BlinkEndedAwaitingRelease => {
                if !level {
                    Some(Transition::ReleasedAfterBlink)
                } else {
                    None
                }
            }
        };

        if let Some(transition) = transition {
            self.enter(transition.to());
        }

        Step {
            output: self.output,
            previous_output,
            previous_state,
            toggled,
            transition,
        }
    }

    fn enter(&mut self, next: ButtonState) {
        if !next.is_blinking() && next != ButtonState::Pressed {
            self.output = false;
        }
        self.state = next;
    }

    fn elapsed(&self, now: Tick, start: Tick) -> u32 {
        tick::elapsed_ms(now, start, self.config.ms_per_tick)
    }

    fn long_press_reached(&self, now: Tick) -> bool {
        self.elapsed(now, self.press_start) >= self.config.long_press_ms
    }

    fn session_expired(&self, now: Tick) -> bool {
        self.elapsed(now, self.session_start) >= self.config.blink_duration_ms
    }

    fn toggle_if_due(&mut self, now: Tick) -> bool {
        if self.elapsed(now, self.last_toggle) >= self.config.blink_half_period_ms {
            self.output = !self.output;
            self.last_toggle = now;
            true
        } else {
            false
        }
    }
}

impl Default for TimedButtonBlinkController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
