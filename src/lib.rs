//! Long-press activated, long-press cancellable blink controller.
//!
//! The core is a polled, allocation-free state machine
//! ([`controller::TimedButtonBlinkController`]) fed with a button level and a
//! tick counter once per poll. [`driver::BlinkDriver`] binds it to a
//! [`hardware::traits::Button`], a [`hardware::traits::Led`] and a
//! [`hardware::traits::Clock`]; the firmware binary runs that driver on an
//! STM32F103 "Blue Pill" under embassy.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod driver;
pub mod hardware;
pub mod snapshot;
pub mod tick;

pub use config::{BlinkConfig, ConfigError};
pub use controller::{ButtonState, Step, TimedButtonBlinkController, Transition};
pub use tick::Tick;
