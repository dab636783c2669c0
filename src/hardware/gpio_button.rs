use super::Polarity;
use super::traits::Button;
use embedded_hal::digital::InputPin;

pub struct GpioButton<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: InputPin> GpioButton<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Button wired to pull the pin high when pressed (pull-down input).
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    /// Button wired to ground (pull-up input).
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Button for GpioButton<P> {
    type Error = P::Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.is_high(),
            Polarity::ActiveLow => self.pin.is_low(),
        }
    }
}
