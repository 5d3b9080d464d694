//! Motion system: both axes, the homing loop and the polling loop.
//!
//! [`MotionSystem`] is the single owner of all axis state. Commands, homing
//! cycles and transport polling all go through `&mut MotionSystem`, so no
//! two operations can interleave on an axis.

mod axis;
mod homing_loop;

pub use axis::Axis;
pub use homing_loop::{HomingLoopState, HomingLoopSupervisor};

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::command::{dispatch_line, CommandResult};
use crate::config::HomingLoopConfig;
use crate::error::{CommandError, Result};
use crate::motion::AxisSelector;
use crate::motor::LimitSensor;
use crate::transport::{LineBuffer, LineTransport, Received};

/// Pause taken by [`MotionSystem::run`] after a pass with nothing to do.
pub const IDLE_POLL_MS: u32 = 10;

/// What the homing loop did during one polling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPass {
    /// Loop idle.
    #[default]
    Skipped,
    /// One full cycle ran.
    Completed,
    /// The cycle failed and the loop went back to idle.
    Failed,
}

/// Summary of one [`MotionSystem::poll_once`] pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Result sent back for the serviced line, if any.
    pub response: Option<CommandResult>,
    /// Homing loop activity.
    pub homing: HomingPass,
}

impl PollReport {
    /// Check if the pass did nothing.
    pub fn is_idle(&self) -> bool {
        self.response.is_none() && self.homing == HomingPass::Skipped
    }
}

/// Both axes plus the homing loop.
pub struct MotionSystem<P, D, S>
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    axis_a: Axis<P, D, S>,
    axis_b: Axis<P, D, S>,
    homing_loop: HomingLoopSupervisor,
    delay: D,
}

impl<P, D, S> MotionSystem<P, D, S>
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    /// Assemble the system. `delay` paces the polling and homing loops.
    pub fn new(
        axis_a: Axis<P, D, S>,
        axis_b: Axis<P, D, S>,
        delay: D,
        loop_config: &HomingLoopConfig,
    ) -> Self {
        Self {
            axis_a,
            axis_b,
            homing_loop: HomingLoopSupervisor::new(loop_config),
            delay,
        }
    }

    /// Get an axis by selector.
    pub fn axis(&self, selector: AxisSelector) -> &Axis<P, D, S> {
        match selector {
            AxisSelector::A => &self.axis_a,
            AxisSelector::B => &self.axis_b,
        }
    }

    /// Get an axis mutably by selector.
    pub fn axis_mut(&mut self, selector: AxisSelector) -> &mut Axis<P, D, S> {
        match selector {
            AxisSelector::A => &mut self.axis_a,
            AxisSelector::B => &mut self.axis_b,
        }
    }

    /// Positions of `(A, B)` in steps.
    pub fn positions(&self) -> (i64, i64) {
        (self.axis_a.position(), self.axis_b.position())
    }

    /// Get the homing loop supervisor.
    #[inline]
    pub fn homing_loop(&self) -> &HomingLoopSupervisor {
        &self.homing_loop
    }

    /// Flip the homing loop state. Moves nothing.
    pub fn toggle_homing_loop(&mut self) -> HomingLoopState {
        self.homing_loop.toggle()
    }

    /// Power-on sequence: enable both drivers, run one homing cycle and
    /// light the homed indicators.
    pub fn startup(&mut self) -> Result<()> {
        for selector in AxisSelector::ALL {
            self.axis_mut(selector).begin()?;
        }

        info!("Starting homing sequence");
        self.homing_cycle()?;
        self.refresh_indicators()
    }

    /// Home A then B and recalibrate each to its home position.
    pub fn home_all(&mut self) -> Result<()> {
        for selector in AxisSelector::ALL {
            let report = self.axis_mut(selector).home()?;
            info!(
                "Motor {} homed: trigger after {} steps, position {}",
                selector.as_str(),
                report.steps_to_trigger,
                self.axis(selector).position()
            );
        }
        info!("Homing complete");
        Ok(())
    }

    /// [`home_all`](Self::home_all) followed by each axis's startup
    /// displacement.
    pub fn homing_cycle(&mut self) -> Result<()> {
        self.home_all()?;
        for selector in AxisSelector::ALL {
            self.axis_mut(selector).displace()?;
        }
        Ok(())
    }

    /// Mirror both homed flags on their indicators.
    pub fn refresh_indicators(&mut self) -> Result<()> {
        self.axis_a.refresh_indicator()?;
        self.axis_b.refresh_indicator()
    }

    /// Run one homing loop iteration if the loop is active.
    ///
    /// Returns `Ok(false)` when idle. A failed cycle switches the loop back to
    /// idle before the error is returned.
    pub fn run_homing_loop_iteration(&mut self) -> Result<bool> {
        if !self.homing_loop.is_active() {
            return Ok(false);
        }

        if let Err(e) = self.homing_cycle() {
            self.homing_loop.stop();
            error!("Homing loop iteration failed, loop stopped");
            return Err(e);
        }

        self.delay.delay_ms(self.homing_loop.interval_ms());
        Ok(true)
    }

    /// One pass of the polling loop.
    ///
    /// Refreshes the homed indicators, services at most one line from
    /// `transport`, then runs one homing loop iteration if the loop is
    /// active.
    ///
    /// # Errors
    ///
    /// Only transport errors are returned; command and homing failures are
    /// reported through the [`PollReport`].
    pub fn poll_once<T: LineTransport>(
        &mut self,
        transport: &mut T,
        line: &mut LineBuffer,
    ) -> core::result::Result<PollReport, T::Error> {
        if self.refresh_indicators().is_err() {
            warn!("Homed indicator write failed");
        }

        let mut report = PollReport::default();

        if let Some(received) = transport.poll_line(line)? {
            let result = match received {
                Received::Line => dispatch_line(self, line.as_str()),
                Received::Overflow => CommandResult::from(CommandError::LineTooLong),
                Received::Invalid => CommandResult::from(CommandError::InvalidEncoding),
            };
            transport.respond(&result)?;
            report.response = Some(result);
        }

        report.homing = match self.run_homing_loop_iteration() {
            Ok(true) => HomingPass::Completed,
            Ok(false) => HomingPass::Skipped,
            Err(_) => {
                transport.notify("Homing loop stopped after a failure.")?;
                HomingPass::Failed
            }
        };

        Ok(report)
    }

    /// Poll `transport` forever.
    ///
    /// # Errors
    ///
    /// Returns the first transport error.
    pub fn run<T: LineTransport>(
        &mut self,
        transport: &mut T,
    ) -> core::result::Result<Infallible, T::Error> {
        let mut line = LineBuffer::new();
        loop {
            let report = self.poll_once(transport, &mut line)?;
            if report.is_idle() {
                self.delay.delay_ms(IDLE_POLL_MS);
            }
        }
    }
}
