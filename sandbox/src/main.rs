// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Pendula sandbox
// Drives a chain pendulum headlessly and logs its joints frame by frame.

mod config;
mod session;

use anyhow::Result;
use clap::Parser;
use config::{Precision, SandboxConfig};
use pendula_ode::{IntegratorKind, Scalar};
use session::Session;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Simulates a driven chain pendulum without a window.
#[derive(Debug, Parser)]
#[command(name = "sandbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file to read the configuration from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of pendulum segments
    #[arg(short, long)]
    segments: Option<usize>,

    /// Integration method (euler or rk4)
    #[arg(short, long)]
    integrator: Option<IntegratorKind>,

    /// Integration step as a power of two: step = 2^-N
    #[arg(long, value_parser = clap::value_parser!(i32).range(6..=16))]
    step_exponent: Option<i32>,

    /// Floating point precision of the solution
    #[arg(short, long, value_enum)]
    precision: Option<Precision>,

    /// Velocity amplitude of the suspension drive
    #[arg(short, long)]
    amplitude: Option<f64>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<usize>,
}

impl Cli {
    fn apply(&self, config: &mut SandboxConfig) {
        if let Some(segments) = self.segments {
            config.pendulum.segments = segments;
        }
        if let Some(integrator) = self.integrator {
            config.solver.integrator = integrator;
        }
        if let Some(exponent) = self.step_exponent {
            config.solver.step = 2f64.powi(-exponent);
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(amplitude) = self.amplitude {
            config.pendulum.parameters.amplitude = amplitude;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
    }
}

fn run<T: Scalar>(config: &SandboxConfig) -> Result<()> {
    let mut session = Session::<T>::new(config)?;
    let interval = Duration::from_millis(config.frame_interval_ms);
    let pause_at = config.frames / 2;

    session.start()?;
    for frame in 0..config.frames {
        if frame == pause_at && config.pause_ms > 0 {
            session.pause();
            log::info!("Paused at t = {:.3}s", session.elapsed());
            thread::sleep(Duration::from_millis(config.pause_ms));
            session.start()?;
            log::info!("Resumed at t = {:.3}s", session.elapsed());
        }

        if session.update()? {
            let joints = session.pendulum().positions();
            if let Some(tip) = joints.last() {
                log::info!(
                    "Frame {:>4} | t = {:>7.3}s | tip = ({:>8.4}, {:>8.4})",
                    frame,
                    session.elapsed(),
                    tip.x,
                    tip.y
                );
            }
            log::debug!("Joints: {:?}", joints);
        }
        match session.buffered_range() {
            Ok((oldest, newest)) => log::trace!("Buffered x in [{:?}, {:?}]", oldest, newest),
            Err(e) => log::trace!("Buffer not readable: {}", e),
        }

        thread::sleep(interval);
    }
    session.stop();

    log::info!("Simulated {} frames", config.frames);
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => config::load(path)?,
        None => SandboxConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    log::info!(
        "Simulating {} segments with {} (step = {}, {:?} precision)",
        config.pendulum.segments,
        config.solver.integrator,
        config.solver.step,
        config.precision
    );

    match config.precision {
        Precision::Float => run::<f32>(&config),
        Precision::Double => run::<f64>(&config),
    }
}
