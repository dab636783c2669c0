use super::Polarity;
use super::traits::Led;
use embedded_hal::digital::{OutputPin, PinState};

pub struct GpioLed<P> {
    pin: P,
    polarity: Polarity,
    lit: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Wraps `pin` and assumes the LED starts dark; call [`Led::off`] to
    /// force the pin into that state.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            lit: false,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Led for GpioLed<P> {
    type Error = P::Error;

    fn set(&mut self, on: bool) -> Result<(), Self::Error> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        self.pin.set_state(PinState::from(high))?;
        self.lit = on;
        Ok(())
    }
}
