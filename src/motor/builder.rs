//! Builder pattern for AxisDriver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{AxisConfig, DEFAULT_STEP_DELAY_US};
use crate::error::{ConfigError, Error, Result};

use super::driver::{AxisDriver, MAX_ENABLE_PINS, MAX_INDICATOR_PINS};
use super::phase::{StepMode, COIL_COUNT};

const NAME_CAPACITY: usize = 16;

/// Builder for creating AxisDriver instances.
pub struct AxisDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    coils: Option<[P; COIL_COUNT]>,
    enable_pins: heapless::Vec<P, MAX_ENABLE_PINS>,
    indicator_pins: heapless::Vec<P, MAX_INDICATOR_PINS>,
    delay: Option<D>,
    name: Option<heapless::String<NAME_CAPACITY>>,
    step_mode: StepMode,
    step_delay_us: u32,
    invert_direction: bool,
    overflow: Option<&'static str>,
}

impl<P, D> Default for AxisDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> AxisDriverBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            coils: None,
            enable_pins: heapless::Vec::new(),
            indicator_pins: heapless::Vec::new(),
            delay: None,
            name: None,
            step_mode: StepMode::default(),
            step_delay_us: DEFAULT_STEP_DELAY_US,
            invert_direction: false,
            overflow: None,
        }
    }

    /// Set the four coil pins in `IN1..IN4` order.
    pub fn coil_pins(mut self, in1: P, in2: P, in3: P, in4: P) -> Self {
        self.coils = Some([in1, in2, in3, in4]);
        self
    }

    /// Add a driver enable pin (at most two).
    pub fn enable_pin(mut self, pin: P) -> Self {
        if self.enable_pins.push(pin).is_err() {
            self.overflow = Some("at most 2 enable pins");
        }
        self
    }

    /// Add an activity indicator pin (at most two). `None` is ignored.
    pub fn indicator_pin(mut self, pin: Option<P>) -> Self {
        if let Some(pin) = pin {
            if self.indicator_pins.push(pin).is_err() {
                self.overflow = Some("at most 2 indicator pins");
            }
        }
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the axis name, truncated to 16 bytes on a character boundary.
    pub fn name(mut self, name: &str) -> Self {
        let mut end = name.len().min(NAME_CAPACITY);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.name = heapless::String::try_from(&name[..end]).ok();
        self
    }

    /// Set the stepping mode.
    pub fn step_mode(mut self, mode: StepMode) -> Self {
        self.step_mode = mode;
        self
    }

    /// Set the inter-step delay in microseconds.
    pub fn step_delay_us(mut self, step_delay_us: u32) -> Self {
        self.step_delay_us = step_delay_us;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure stepping parameters from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.step_mode = config.step_mode;
        self.step_delay_us = config.step_delay_us;
        self.invert_direction = config.invert_direction;
        self
    }

    /// Build the AxisDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if the coil pins or delay are missing, or if too many
    /// enable/indicator pins were supplied.
    pub fn build(self) -> Result<AxisDriver<P, D>> {
        if let Some(msg) = self.overflow {
            return Err(Error::Config(ConfigError::PinLimit(msg)));
        }

        let coils = self
            .coils
            .ok_or(Error::Config(ConfigError::MissingField("coil_pins")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        if self.step_delay_us == 0 {
            return Err(Error::Config(ConfigError::InvalidStepDelay(0)));
        }

        let name = match self.name {
            Some(name) => name,
            None => heapless::String::try_from("axis")
                .map_err(|_| Error::Config(ConfigError::MissingField("name")))?,
        };

        Ok(AxisDriver::new(
            coils,
            self.enable_pins,
            self.indicator_pins,
            delay,
            name,
            self.step_mode,
            self.step_delay_us,
            self.invert_direction,
        ))
    }
}
