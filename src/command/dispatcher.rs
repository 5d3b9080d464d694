//! Command execution against a [`MotionSystem`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::motion::{AxisSelector, MoveOutcome};
use crate::motor::LimitSensor;
use crate::system::{HomingLoopState, MotionSystem};

use super::parser::Command;
use super::response::{CommandResult, ResultCode};

/// Parse `line` and execute it.
pub fn dispatch_line<P, D, S>(system: &mut MotionSystem<P, D, S>, line: &str) -> CommandResult
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    match Command::parse(line) {
        Ok(command) => dispatch(system, &command),
        Err(e) => {
            debug!("Rejected command line: {}", line);
            CommandResult::from(e)
        }
    }
}

/// Execute a parsed command. Blocks until any motion has finished.
pub fn dispatch<P, D, S>(system: &mut MotionSystem<P, D, S>, command: &Command) -> CommandResult
where
    P: OutputPin,
    D: DelayNs,
    S: LimitSensor,
{
    match *command {
        Command::Home => match system.home_all() {
            Ok(()) => CommandResult::ok("Homing Complete."),
            Err(e) => CommandResult::from_error(&e),
        },
        Command::HomeLoop => match system.toggle_homing_loop() {
            HomingLoopState::Active => CommandResult::ok("Homing loop started."),
            HomingLoopState::Idle => CommandResult::ok("Homing loop stopped."),
        },
        Command::MoveRelative { axis, steps } => {
            match system.axis_mut(axis).move_relative(steps) {
                Ok(outcome) => relative_result(axis, steps, outcome),
                Err(e) => CommandResult::from_error(&e),
            }
        }
        Command::MoveAbsolute { axis, position } => {
            match system.axis_mut(axis).move_to(position) {
                Ok(outcome) => absolute_result(axis, position, outcome),
                Err(e) => CommandResult::from_error(&e),
            }
        }
        Command::GetPosition => {
            let (a, b) = system.positions();
            CommandResult::new(
                ResultCode::Ok,
                format_args!("Current Position - A: {} steps, B: {} steps.", a, b),
            )
        }
    }
}

fn relative_result(axis: AxisSelector, steps: i64, outcome: MoveOutcome) -> CommandResult {
    if outcome.is_noop() {
        CommandResult::new(ResultCode::NoOp, format_args!("Motor {} did not move.", axis))
    } else {
        CommandResult::new(
            ResultCode::Ok,
            format_args!("Motor {} moved {} steps.", axis, steps),
        )
    }
}

fn absolute_result(axis: AxisSelector, position: i64, outcome: MoveOutcome) -> CommandResult {
    if outcome.is_noop() {
        CommandResult::new(
            ResultCode::NoOp,
            format_args!("Motor {} already at position {}.", axis, position),
        )
    } else {
        CommandResult::new(
            ResultCode::Ok,
            format_args!("Motor {} moved to position {}.", axis, position),
        )
    }
}
