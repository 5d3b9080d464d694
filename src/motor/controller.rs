//! Bounds-checked, position-tracked motion on top of an [`AxisDriver`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{HomingConfig, MotionBounds, DEFAULT_RELEASE_STEPS};
use crate::error::{MotorError, Result};
use crate::motion::{Direction, HomingReport, MoveOutcome};

use super::driver::AxisDriver;
use super::sensor::LimitSensor;

/// Homing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomingOptions {
    /// Steps driven in the opposite direction once the sensor activates.
    pub release_steps: u32,
    /// Give up after this many steps without activation. `None` waits forever.
    pub max_steps: Option<u32>,
}

impl Default for HomingOptions {
    fn default() -> Self {
        Self {
            release_steps: DEFAULT_RELEASE_STEPS,
            max_steps: None,
        }
    }
}

impl From<&HomingConfig> for HomingOptions {
    fn from(config: &HomingConfig) -> Self {
        Self {
            release_steps: config.release_steps,
            max_steps: config.max_steps,
        }
    }
}

/// Motion controller for one axis.
///
/// Every move is blocking: control returns only after the last step and the
/// trailing coil shutdown.
pub struct MotionController<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    driver: AxisDriver<P, D>,
}

impl<P, D> MotionController<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Wrap a driver.
    pub fn new(driver: AxisDriver<P, D>) -> Self {
        Self { driver }
    }

    /// Get the underlying driver.
    #[inline]
    pub fn driver(&self) -> &AxisDriver<P, D> {
        &self.driver
    }

    /// Get the underlying driver mutably.
    #[inline]
    pub fn driver_mut(&mut self) -> &mut AxisDriver<P, D> {
        &mut self.driver
    }

    /// Unwrap into the driver.
    pub fn into_driver(self) -> AxisDriver<P, D> {
        self.driver
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.driver.position()
    }

    /// Set the current position (recalibration after homing).
    pub fn set_position(&mut self, position: i64) {
        self.driver.set_position(position);
    }

    /// Drive exactly `count` steps without any bounds check.
    ///
    /// Indicators are lit for the duration and the coils are de-energized
    /// afterwards, also when a pin write fails mid-move.
    pub fn move_steps(&mut self, count: u64, direction: Direction) -> Result<()> {
        self.driver.set_indicators(true)?;

        let mut result = Ok(());
        for _ in 0..count {
            result = self.single_step(direction);
            if result.is_err() {
                break;
            }
        }

        let stopped = self.driver.stop();
        let dimmed = self.driver.set_indicators(false);
        result.and(stopped).and(dimmed)
    }

    /// Move by `delta` steps if the target stays inside `bounds`.
    ///
    /// A zero delta is a no-op. An out-of-bounds target is rejected before
    /// any step is taken.
    pub fn move_relative(&mut self, delta: i64, bounds: &MotionBounds) -> Result<MoveOutcome> {
        let current = self.position();
        if delta == 0 {
            return Ok(MoveOutcome::NoOp { position: current });
        }

        let target = current.checked_add(delta).ok_or(MotorError::OutOfBounds {
            target: if delta > 0 { i64::MAX } else { i64::MIN },
            min: bounds.min,
            max: bounds.max,
        })?;

        bounds.check(target).map_err(|e| {
            warn!(
                "Axis {}: move by {} to {} rejected, bounds [{}, {}]",
                self.driver.name(),
                delta,
                target,
                bounds.min,
                bounds.max
            );
            e
        })?;

        self.drive_delta(delta)
    }

    /// Move to an absolute position if it lies inside `bounds`.
    pub fn move_to(&mut self, position: i64, bounds: &MotionBounds) -> Result<MoveOutcome> {
        bounds.check(position).map_err(|e| {
            warn!(
                "Axis {}: target {} rejected, bounds [{}, {}]",
                self.driver.name(),
                position,
                bounds.min,
                bounds.max
            );
            e
        })?;

        let current = self.position();
        if position == current {
            debug!("Axis {} already at {}", self.driver.name(), position);
            return Ok(MoveOutcome::NoOp { position: current });
        }

        // An uncalibrated axis may sit anywhere, so the difference can overflow.
        let delta = position.checked_sub(current).ok_or(MotorError::OutOfBounds {
            target: position,
            min: bounds.min,
            max: bounds.max,
        })?;
        self.drive_delta(delta)
    }

    /// Drive toward the limit sensor until it reports `active_level`, then
    /// back off by `options.release_steps`.
    ///
    /// With `options.max_steps == None` this blocks until the sensor
    /// activates, however long that takes. The position is left in the
    /// uncalibrated frame; call [`set_position`](Self::set_position) afterwards.
    pub fn home<S: LimitSensor>(
        &mut self,
        direction: Direction,
        sensor: &mut S,
        active_level: PinState,
        options: &HomingOptions,
    ) -> Result<HomingReport> {
        self.home_until(direction, sensor, active_level, options, || false)
    }

    /// [`home`](Self::home) with a caller-supplied abort check, polled before
    /// every step.
    pub fn home_until<S, F>(
        &mut self,
        direction: Direction,
        sensor: &mut S,
        active_level: PinState,
        options: &HomingOptions,
        mut abort: F,
    ) -> Result<HomingReport>
    where
        S: LimitSensor,
        F: FnMut() -> bool,
    {
        info!(
            "Axis {}: homing {} toward limit sensor",
            self.driver.name(),
            direction.as_str()
        );
        self.driver.set_indicators(true)?;

        let mut taken: u32 = 0;
        let seek: Result<()> = loop {
            match sensor.level() {
                Ok(level) if level == active_level => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            }
            if options.max_steps.is_some_and(|max| taken >= max) {
                break Err(MotorError::HomingStepLimit { steps: taken }.into());
            }
            if abort() {
                break Err(MotorError::HomingAborted { steps: taken }.into());
            }
            if let Err(e) = self.single_step(direction) {
                break Err(e);
            }
            taken = taken.saturating_add(1);
        };

        let stopped = self.driver.stop();
        if let Err(e) = seek.and(stopped) {
            error!("Axis {}: homing failed after {} steps", self.driver.name(), taken);
            let _ = self.driver.set_indicators(false);
            return Err(e);
        }

        let trigger_position = self.position();
        info!(
            "Axis {}: limit sensor active at {} after {} steps, releasing by {}",
            self.driver.name(),
            trigger_position,
            taken,
            options.release_steps
        );

        self.move_steps(u64::from(options.release_steps), direction.opposite())?;

        Ok(HomingReport {
            steps_to_trigger: taken,
            trigger_position,
            final_position: self.position(),
        })
    }

    fn drive_delta(&mut self, delta: i64) -> Result<MoveOutcome> {
        let direction = Direction::from_delta(delta);
        let steps = delta.unsigned_abs();
        debug!(
            "Axis {}: moving {} by {} steps",
            self.driver.name(),
            direction.as_str(),
            steps
        );

        self.move_steps(steps, direction)?;
        Ok(MoveOutcome::Moved {
            steps,
            position: self.position(),
        })
    }

    fn single_step(&mut self, direction: Direction) -> Result<()> {
        self.driver.step(direction)?;
        self.driver.count_step(direction);
        self.driver.pause();
        Ok(())
    }
}
