//! Full motion system on simulated hardware.
//!
//! ```text
//! cargo run --example simulated_bench                 # console on stdin/stdout
//! cargo run --example simulated_bench -- tcp          # TCP on the configured address
//! cargo run --example simulated_bench -- tcp bench.toml
//! ```
//!
//! Coil writes are logged at trace level; set `RUST_LOG=trace` to see them.

use std::convert::Infallible;

use dual_axis_stepper::config::{load_config, AxisConfig, SystemConfig};
use dual_axis_stepper::transport::{ConsoleTransport, TcpTransport};
use dual_axis_stepper::{Axis, AxisDriver, MotionSystem};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::StdSleep;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Output pin that only logs its level.
struct BenchPin {
    label: &'static str,
}

impl ErrorType for BenchPin {
    type Error = Infallible;
}

impl OutputPin for BenchPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        tracing::trace!(pin = self.label, "low");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        tracing::trace!(pin = self.label, "high");
        Ok(())
    }
}

/// Limit switch that closes after a fixed number of reads, then re-opens.
struct BenchSwitch {
    travel: u32,
    remaining: u32,
}

impl BenchSwitch {
    fn new(travel: u32) -> Self {
        Self {
            travel,
            remaining: travel,
        }
    }
}

impl ErrorType for BenchSwitch {
    type Error = Infallible;
}

impl InputPin for BenchSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        if self.remaining == 0 {
            self.remaining = self.travel;
            return Ok(true);
        }
        self.remaining -= 1;
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

fn bench_axis(
    name: &'static str,
    pins: [&'static str; 8],
    config: &AxisConfig,
) -> dual_axis_stepper::Result<Axis<BenchPin, StdSleep, BenchSwitch>> {
    let pin = |label| BenchPin { label };
    let driver = AxisDriver::builder()
        .name(name)
        .coil_pins(pin(pins[0]), pin(pins[1]), pin(pins[2]), pin(pins[3]))
        .enable_pin(pin(pins[4]))
        .enable_pin(pin(pins[5]))
        .indicator_pin(Some(pin(pins[6])))
        .from_axis_config(config)
        .delay(StdSleep::new())
        .build()?;

    Ok(Axis::new(driver, BenchSwitch::new(120), *config).with_homed_indicator(pin(pins[7])))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "console".to_string());
    let config = match args.next() {
        Some(path) => load_config(path)?,
        None => SystemConfig::default(),
    };

    let axis_a = bench_axis(
        "A",
        ["A.IN1", "A.IN2", "A.IN3", "A.IN4", "A.ENA", "A.ENB", "A.LED1", "GREEN"],
        &config.axis_a,
    )?;
    let axis_b = bench_axis(
        "B",
        ["B.IN1", "B.IN2", "B.IN3", "B.IN4", "B.ENA", "B.ENB", "B.LED1", "RED"],
        &config.axis_b,
    )?;
    let mut system = MotionSystem::new(axis_a, axis_b, StdSleep::new(), &config.homing_loop);

    if mode == "tcp" {
        let mut transport = TcpTransport::from_config(&config.transport)?;
        tracing::info!("Listening on {}", transport.local_addr()?);
        system.startup()?;
        system.run(&mut transport)?;
    } else {
        let mut transport = ConsoleTransport::stdio();
        transport.print_banner()?;
        system.startup()?;
        match system.run(&mut transport) {
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {}
            Err(e) => return Err(e.into()),
            Ok(never) => match never {},
        }
    }

    Ok(())
}
