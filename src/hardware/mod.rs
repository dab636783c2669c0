//! Collaborators of the blink controller: the button it samples, the LED it
//! drives and the clock it reads.

pub mod gpio_button;
pub mod gpio_led;
pub mod traits;

#[cfg(feature = "stm32")]
pub mod embassy_clock;

/// Electrical level that means "pressed" / "lit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}
