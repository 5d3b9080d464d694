//! Phase-sequencing axis driver.
//!
//! Generic over embedded-hal 1.0 output pins and delay provider.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{MotorError, Result};
use crate::motion::Direction;

use super::builder::AxisDriverBuilder;
use super::phase::{StepMode, COIL_COUNT};
use super::state::AxisState;

/// Maximum number of driver enable outputs per axis (ENA/ENB).
pub const MAX_ENABLE_PINS: usize = 2;

/// Maximum number of activity indicator outputs per axis.
pub const MAX_INDICATOR_PINS: usize = 2;

/// Four-coil stepper driver for one axis.
///
/// Generic over:
/// - `P`: output pin type shared by coils, enables and indicators (must implement `OutputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
pub struct AxisDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Coil outputs in `IN1..IN4` order.
    coils: [P; COIL_COUNT],

    /// Driver channel enables, driven high by `begin()`.
    enable_pins: heapless::Vec<P, MAX_ENABLE_PINS>,

    /// Activity indicators, lit while the axis moves.
    indicator_pins: heapless::Vec<P, MAX_INDICATOR_PINS>,

    /// Delay provider for step timing.
    delay: D,

    /// Axis name for logging.
    name: heapless::String<16>,

    /// Active phase table.
    step_mode: StepMode,

    /// Delay between steps in microseconds.
    step_delay_us: u32,

    /// Whether logical forward walks the phase table backwards.
    invert_direction: bool,

    state: AxisState,
}

/// Hardware handed back by [`AxisDriver::release`].
pub struct AxisParts<P, D> {
    /// Coil outputs in `IN1..IN4` order.
    pub coils: [P; COIL_COUNT],
    /// Enable outputs.
    pub enable_pins: heapless::Vec<P, MAX_ENABLE_PINS>,
    /// Indicator outputs.
    pub indicator_pins: heapless::Vec<P, MAX_INDICATOR_PINS>,
    /// Delay provider.
    pub delay: D,
}

impl<P, D> AxisDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder for an AxisDriver.
    pub fn builder() -> AxisDriverBuilder<P, D> {
        AxisDriverBuilder::new()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        coils: [P; COIL_COUNT],
        enable_pins: heapless::Vec<P, MAX_ENABLE_PINS>,
        indicator_pins: heapless::Vec<P, MAX_INDICATOR_PINS>,
        delay: D,
        name: heapless::String<16>,
        step_mode: StepMode,
        step_delay_us: u32,
        invert_direction: bool,
    ) -> Self {
        Self {
            coils,
            enable_pins,
            indicator_pins,
            delay,
            name,
            step_mode,
            step_delay_us,
            invert_direction,
            state: AxisState::default(),
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the phase and position state.
    #[inline]
    pub fn state(&self) -> &AxisState {
        &self.state
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.state.position()
    }

    /// Get the current phase table index.
    #[inline]
    pub fn phase_index(&self) -> usize {
        self.state.phase_index()
    }

    /// Get the stepping mode.
    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Get the inter-step delay in microseconds.
    #[inline]
    pub fn step_delay_us(&self) -> u32 {
        self.step_delay_us
    }

    /// Get the direction inversion flag.
    #[inline]
    pub fn invert_direction(&self) -> bool {
        self.invert_direction
    }

    /// Enable the driver channels and put the axis in its power-on state.
    ///
    /// Indicators go low, position and phase index return to zero, and all
    /// coils are de-energized.
    pub fn begin(&mut self) -> Result<()> {
        for pin in self.enable_pins.iter_mut() {
            pin.set_high().map_err(|_| MotorError::PinError)?;
        }
        self.set_indicators(false)?;
        self.state.reset();
        self.stop()?;

        debug!(
            "Axis {} enabled: {} enable pin(s), {} indicator(s)",
            self.name.as_str(),
            self.enable_pins.len(),
            self.indicator_pins.len()
        );
        Ok(())
    }

    /// Advance one phase in the given logical direction and write the coils.
    ///
    /// Does not touch the tracked position.
    pub fn step(&mut self, direction: Direction) -> Result<()> {
        let forward = direction.is_forward() != self.invert_direction;
        let index = self.state.advance_phase(self.step_mode, forward);
        let phase = self.step_mode.table()[index];

        for (coil, bit) in self.coils.iter_mut().zip(phase) {
            coil.set_state(PinState::from(bit != 0))
                .map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    /// De-energize all four coils. Safe to call at any time.
    pub fn stop(&mut self) -> Result<()> {
        for coil in self.coils.iter_mut() {
            coil.set_low().map_err(|_| MotorError::PinError)?;
        }
        self.state.de_energize();
        Ok(())
    }

    /// Drive every configured indicator pin.
    pub fn set_indicators(&mut self, on: bool) -> Result<()> {
        for pin in self.indicator_pins.iter_mut() {
            pin.set_state(PinState::from(on))
                .map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    /// Set the stepping mode. Takes effect on the next step.
    pub fn set_step_mode(&mut self, mode: StepMode) {
        self.step_mode = mode;
        self.state.rebase_phase(mode);
    }

    /// Set the inter-step delay in microseconds. Takes effect on the next step.
    pub fn set_step_delay_us(&mut self, step_delay_us: u32) {
        self.step_delay_us = step_delay_us;
    }

    /// Set direction inversion. Takes effect immediately.
    pub fn set_invert_direction(&mut self, invert: bool) {
        self.invert_direction = invert;
    }

    /// Overwrite the tracked position (recalibration).
    pub fn set_position(&mut self, position: i64) {
        self.state.set_position(position);
    }

    /// Block for the configured inter-step delay.
    #[inline]
    pub fn pause(&mut self) {
        self.delay.delay_us(self.step_delay_us);
    }

    /// Block for `ms` milliseconds.
    #[inline]
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Tear the driver down and hand the hardware back.
    pub fn release(self) -> AxisParts<P, D> {
        AxisParts {
            coils: self.coils,
            enable_pins: self.enable_pins,
            indicator_pins: self.indicator_pins,
            delay: self.delay,
        }
    }

    pub(crate) fn count_step(&mut self, direction: Direction) {
        self.state.count_step(direction);
    }
}
