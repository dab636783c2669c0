use crate::tick::Tick;

pub trait Led {
    type Error;

    fn set(&mut self, on: bool) -> Result<(), Self::Error>;

    fn on(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }

    fn off(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }
}

pub trait Button {
    type Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Monotonic tick source; see [`crate::config::BlinkConfig::ms_per_tick`].
pub trait Clock {
    fn now(&self) -> Tick;
}
