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

//! Sandbox configuration, read from an optional TOML file.
//!
//! ```toml
//! precision = "double"
//! frames = 240
//!
//! [solver]
//! integrator = "rk4"
//! step = 0.001953125
//!
//! [pendulum]
//! segments = 5
//! amplitude = 0.2
//! viscosity = 0.1
//! ```

use anyhow::{ensure, Context, Result};
use pendula_ode::{PendulumParameters, SolverConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest supported number of pendulum segments.
pub const MAX_SEGMENTS: usize = 128;

/// Floating point type the solution is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Float,
    #[default]
    Double,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    pub segments: usize,
    /// Initial deflection of every weight, suspension point first. Empty
    /// means the chain starts at rest.
    pub initial_deflections: Vec<f32>,
    #[serde(flatten)]
    pub parameters: PendulumParameters<f64>,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            segments: 3,
            initial_deflections: Vec::new(),
            parameters: PendulumParameters {
                amplitude: 0.1,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub precision: Precision,
    /// Number of frames to simulate.
    pub frames: usize,
    /// Wall-clock time between two frames.
    pub frame_interval_ms: u64,
    /// How long the simulation is paused halfway through. Zero disables the
    /// pause.
    pub pause_ms: u64,
    pub solver: SolverConfig,
    pub pendulum: PendulumConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            frames: 120,
            frame_interval_ms: 16,
            pause_ms: 500,
            solver: SolverConfig {
                step: 2f64.powi(-9),
                ..Default::default()
            },
            pendulum: PendulumConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Rejects configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let segments = self.pendulum.segments;
        ensure!(
            (1..=MAX_SEGMENTS).contains(&segments),
            "segment count must be between 1 and {MAX_SEGMENTS}, got {segments}"
        );

        let deflections = self.pendulum.initial_deflections.len();
        ensure!(
            deflections == 0 || deflections == segments + 1,
            "expected {} initial deflections for {segments} segments, got {deflections}",
            segments + 1
        );

        let parameters = &self.pendulum.parameters;
        ensure!(parameters.length > 0.0, "segment length must be positive");
        ensure!(parameters.mass > 0.0, "weight mass must be positive");
        Ok(())
    }
}

/// Loads a [`SandboxConfig`] from `path`.
pub fn load(path: &Path) -> Result<SandboxConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))?;
    log::info!("Loaded configuration from '{}'", path.display());
    Ok(config)
}
