//! In-memory hardware for driving a full motion system in tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use dual_axis_stepper::config::SystemConfig;
use dual_axis_stepper::transport::{load_bytes, LineBuffer, LineTransport, Received};
use dual_axis_stepper::{Axis, AxisDriver, AxisSelector, CommandResult, MotionSystem};

/// Output pin that remembers its level and counts writes.
#[derive(Clone, Default)]
pub struct SimPin {
    level: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl SimPin {
    pub fn is_set(&self) -> bool {
        self.level.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn write(&self, level: bool) {
        self.level.set(level);
        self.writes.set(self.writes.get() + 1);
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

/// Limit switch that reads low for a set number of reads, then high.
#[derive(Clone, Default)]
pub struct SimSensor {
    inactive_reads: Rc<Cell<u32>>,
    reads: Rc<Cell<u32>>,
}

impl SimSensor {
    /// Report inactive for the next `reads` reads.
    pub fn arm(&self, reads: u32) {
        self.inactive_reads.set(reads);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl ErrorType for SimSensor {
    type Error = Infallible;
}

impl InputPin for SimSensor {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        let remaining = self.inactive_reads.get();
        if remaining == 0 {
            return Ok(true);
        }
        self.inactive_reads.set(remaining - 1);
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Delay that only accumulates the requested time.
#[derive(Clone, Default)]
pub struct SimDelay {
    total_ns: Rc<Cell<u64>>,
}

impl SimDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

pub type SimSystem = MotionSystem<SimPin, SimDelay, SimSensor>;

/// Handles on the simulated pins of one axis.
#[derive(Clone, Default)]
pub struct AxisRig {
    pub coils: [SimPin; 4],
    pub enables: [SimPin; 2],
    pub indicator: SimPin,
    pub homed: SimPin,
    pub sensor: SimSensor,
}

impl AxisRig {
    pub fn coil_levels(&self) -> [bool; 4] {
        [
            self.coils[0].is_set(),
            self.coils[1].is_set(),
            self.coils[2].is_set(),
            self.coils[3].is_set(),
        ]
    }

    pub fn coil_writes(&self) -> usize {
        self.coils.iter().map(SimPin::writes).sum()
    }
}

pub struct Bench {
    pub system: SimSystem,
    pub a: AxisRig,
    pub b: AxisRig,
    pub loop_delay: SimDelay,
}

impl Bench {
    pub fn rig(&self, selector: AxisSelector) -> &AxisRig {
        match selector {
            AxisSelector::A => &self.a,
            AxisSelector::B => &self.b,
        }
    }

    pub fn set_position(&mut self, selector: AxisSelector, position: i64) {
        self.system
            .axis_mut(selector)
            .controller_mut()
            .set_position(position);
    }
}

fn build_axis(
    name: &str,
    rig: &AxisRig,
    config: &dual_axis_stepper::AxisConfig,
) -> Axis<SimPin, SimDelay, SimSensor> {
    let [in1, in2, in3, in4] = rig.coils.clone();
    let [ena, enb] = rig.enables.clone();
    let driver = AxisDriver::builder()
        .name(name)
        .coil_pins(in1, in2, in3, in4)
        .enable_pin(ena)
        .enable_pin(enb)
        .indicator_pin(Some(rig.indicator.clone()))
        .from_axis_config(config)
        .delay(SimDelay::default())
        .build()
        .expect("valid driver");

    Axis::new(driver, rig.sensor.clone(), *config).with_homed_indicator(rig.homed.clone())
}

/// A full system on simulated pins. Nothing is started.
pub fn bench(config: &SystemConfig) -> Bench {
    let a = AxisRig::default();
    let b = AxisRig::default();
    let loop_delay = SimDelay::default();

    let system = MotionSystem::new(
        build_axis("A", &a, &config.axis_a),
        build_axis("B", &b, &config.axis_b),
        loop_delay.clone(),
        &config.homing_loop,
    );

    Bench {
        system,
        a,
        b,
        loop_delay,
    }
}

/// Transport fed from a script, recording every result.
#[derive(Default)]
pub struct ScriptedTransport {
    pub input: VecDeque<Vec<u8>>,
    pub responses: Vec<CommandResult>,
    pub notes: Vec<String>,
}

impl ScriptedTransport {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| l.as_bytes().to_vec()).collect(),
            ..Self::default()
        }
    }

    pub fn with_raw(lines: &[&[u8]]) -> Self {
        Self {
            input: lines.iter().map(|l| l.to_vec()).collect(),
            ..Self::default()
        }
    }
}

impl LineTransport for ScriptedTransport {
    type Error = Infallible;

    fn poll_line(&mut self, line: &mut LineBuffer) -> Result<Option<Received>, Infallible> {
        Ok(self.input.pop_front().map(|raw| load_bytes(line, &raw)))
    }

    fn respond(&mut self, result: &CommandResult) -> Result<(), Infallible> {
        self.responses.push(result.clone());
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<(), Infallible> {
        self.notes.push(message.to_string());
        Ok(())
    }
}
