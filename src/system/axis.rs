//! One axis as owned by the motion system.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{AxisConfig, MotionBounds};
use crate::error::{MotorError, Result};
use crate::motion::{HomingReport, MoveOutcome};
use crate::motor::{AxisDriver, HomingOptions, LimitSensor, MotionController};

/// Controller, limit sensor and settings of one axis.
pub struct Axis<P, D, S>
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    controller: MotionController<P, D>,
    sensor: S,
    config: AxisConfig,
    homed: bool,
    homed_indicator: Option<P>,
}

impl<P, D, S> Axis<P, D, S>
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    /// Combine a driver, its limit sensor and its settings.
    pub fn new(driver: AxisDriver<P, D>, sensor: S, config: AxisConfig) -> Self {
        Self {
            controller: MotionController::new(driver),
            sensor,
            config,
            homed: false,
            homed_indicator: None,
        }
    }

    /// Attach an output that mirrors the homed flag.
    pub fn with_homed_indicator(mut self, pin: P) -> Self {
        self.homed_indicator = Some(pin);
        self
    }

    /// Get the motion controller.
    #[inline]
    pub fn controller(&self) -> &MotionController<P, D> {
        &self.controller
    }

    /// Get the motion controller mutably.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut MotionController<P, D> {
        &mut self.controller
    }

    /// Get the axis settings.
    #[inline]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Get the motion bounds.
    #[inline]
    pub fn bounds(&self) -> &MotionBounds {
        &self.config.bounds
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.controller.position()
    }

    /// Whether the last homing attempt completed.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Power-on initialization of the driver.
    pub fn begin(&mut self) -> Result<()> {
        self.controller.driver_mut().begin()
    }

    /// Bounded relative move.
    pub fn move_relative(&mut self, delta: i64) -> Result<MoveOutcome> {
        self.controller.move_relative(delta, &self.config.bounds)
    }

    /// Bounded absolute move.
    pub fn move_to(&mut self, position: i64) -> Result<MoveOutcome> {
        self.controller.move_to(position, &self.config.bounds)
    }

    /// Home against the limit sensor and recalibrate to the home position.
    pub fn home(&mut self) -> Result<HomingReport> {
        self.home_until(|| false)
    }

    /// [`home`](Self::home) with an abort check polled before every step.
    pub fn home_until<F: FnMut() -> bool>(&mut self, abort: F) -> Result<HomingReport> {
        self.homed = false;

        let homing = self.config.homing;
        let report = self.controller.home_until(
            homing.direction,
            &mut self.sensor,
            homing.active_level.pin_state(),
            &HomingOptions::from(&homing),
            abort,
        )?;

        self.controller.set_position(self.config.home_position());
        self.homed = true;
        Ok(report)
    }

    /// Apply the configured startup displacement as a bounded relative move.
    pub fn displace(&mut self) -> Result<MoveOutcome> {
        self.move_relative(self.config.startup_displacement)
    }

    /// Drive the homed indicator from the homed flag.
    pub fn refresh_indicator(&mut self) -> Result<()> {
        if let Some(pin) = self.homed_indicator.as_mut() {
            pin.set_state(PinState::from(self.homed))
                .map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    /// Tear the axis down into its controller and sensor.
    pub fn into_parts(self) -> (MotionController<P, D>, S) {
        (self.controller, self.sensor)
    }
}
