//! Limit sensor abstraction used by homing.

use embedded_hal::digital::{InputPin, PinState};

use crate::error::MotorError;

/// A sensor that reports a digital level.
///
/// Every embedded-hal [`InputPin`] is a limit sensor. Closures can be used
/// through [`SensorFn`].
pub trait LimitSensor {
    /// Read the current level.
    fn level(&mut self) -> Result<PinState, MotorError>;
}

impl<T: InputPin> LimitSensor for T {
    fn level(&mut self) -> Result<PinState, MotorError> {
        self.is_high()
            .map(PinState::from)
            .map_err(|_| MotorError::SensorError)
    }
}

/// Adapter turning a `FnMut() -> PinState` into a [`LimitSensor`].
pub struct SensorFn<F>(pub F);

impl<F> LimitSensor for SensorFn<F>
where
    F: FnMut() -> PinState,
{
    fn level(&mut self) -> Result<PinState, MotorError> {
        Ok((self.0)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_fn() {
        let mut reads = 0;
        let mut sensor = SensorFn(|| {
            reads += 1;
            PinState::from(reads > 2)
        });

        assert_eq!(sensor.level(), Ok(PinState::Low));
        assert_eq!(sensor.level(), Ok(PinState::Low));
        assert_eq!(sensor.level(), Ok(PinState::High));
    }
}
