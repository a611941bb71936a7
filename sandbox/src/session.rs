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

//! Wall-clock driven playback of a pendulum solution.

use crate::config::SandboxConfig;
use anyhow::{Context, Result};
use num_traits::NumCast;
use pendula_ode::{OdeSolution, Pendulum, PendulumOdeFun, PendulumParameters, Point, Scalar};
use std::time::{Duration, Instant};

fn cast<T: Scalar>(value: f64) -> Result<T> {
    <T as NumCast>::from(value).with_context(|| format!("{value} is not representable"))
}

/// A running simulation: the solution, the pendulum it moves and the clock
/// the solution is sampled with.
///
/// Simulation time is the wall-clock time since the last fresh start, minus
/// the time spent paused.
pub struct Session<T: Scalar> {
    solution: OdeSolution<T>,
    reference: Pendulum,
    pendulum: Pendulum,
    clock: Instant,
    offset: Duration,
    paused_at: Option<Duration>,
}

impl<T: Scalar> Session<T> {
    pub fn new(config: &SandboxConfig) -> Result<Self> {
        let settings = &config.pendulum;
        let parameters = &settings.parameters;

        let mut reference = Pendulum::new(
            settings.segments,
            parameters.length as f32,
            parameters.mass as f32,
            parameters.radius as f32,
        );
        if !settings.initial_deflections.is_empty() {
            reference.set_deflections(settings.initial_deflections.clone());
        }

        // Deflections first, then one zero velocity per weight.
        let mut state = Vec::with_capacity(2 * reference.weight_count());
        for &deflection in reference.deflections() {
            state.push(cast::<T>(deflection.into())?);
        }
        state.resize(2 * reference.weight_count(), T::zero());

        let parameters = PendulumParameters {
            length: cast(parameters.length)?,
            mass: cast(parameters.mass)?,
            radius: cast(parameters.radius)?,
            angular_frequency: cast(parameters.angular_frequency)?,
            amplitude: cast(parameters.amplitude)?,
            viscosity: cast(parameters.viscosity)?,
            density: cast(parameters.density)?,
        };

        let mut solution = OdeSolution::from_config(&config.solver, Point::new(T::zero(), state))
            .context("Failed to create the pendulum solution")?;
        solution.set_equation(PendulumOdeFun::new(&parameters))?;

        Ok(Self {
            solution,
            pendulum: reference.clone(),
            reference,
            clock: Instant::now(),
            offset: Duration::ZERO,
            paused_at: None,
        })
    }

    /// Starts the simulation, or resumes it if it is paused.
    pub fn start(&mut self) -> Result<()> {
        if self.solution.running() && !self.solution.buffering() {
            if let Some(paused_at) = self.paused_at.take() {
                self.offset += self.clock.elapsed().saturating_sub(paused_at);
            }
            self.solution.start()?;
            return Ok(());
        }

        if self.solution.running() {
            self.solution.stop();
        }
        self.pendulum = self.reference.clone();
        self.solution.start()?;
        self.clock = Instant::now();
        self.offset = Duration::ZERO;
        self.paused_at = None;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.solution.pause();
        self.paused_at = Some(self.clock.elapsed());
    }

    pub fn stop(&mut self) {
        self.solution.stop();
    }

    /// Simulation time in seconds.
    pub fn elapsed(&self) -> f64 {
        let now = self.paused_at.unwrap_or_else(|| self.clock.elapsed());
        now.saturating_sub(self.offset).as_secs_f64()
    }

    /// Samples the solution at the current simulation time.
    ///
    /// Returns `false` without touching the pendulum if the simulation is not
    /// buffering.
    pub fn update(&mut self) -> Result<bool> {
        if !self.solution.buffering() {
            return Ok(false);
        }

        let y = self.solution.eval(cast(self.elapsed())?)?;
        for (i, deflection) in y.iter().take(self.pendulum.weight_count()).enumerate() {
            self.pendulum.set_deflection(i, deflection.to_f32().unwrap_or(0.0));
        }
        Ok(true)
    }

    pub fn pendulum(&self) -> &Pendulum {
        &self.pendulum
    }

    pub fn buffered_range(&self) -> Result<(T, T)> {
        Ok(self.solution.buffered_range()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn quick_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.pendulum.segments = 2;
        config.pendulum.initial_deflections = vec![0.0, 0.3, 0.6];
        config
    }

    #[test]
    fn test_initial_deflections_seed_both_precisions() {
        let config = quick_config();
        let single = Session::<f32>::new(&config).unwrap();
        let double = Session::<f64>::new(&config).unwrap();
        assert_eq!(single.pendulum().deflections(), &[0.0, 0.3, 0.6]);
        assert_eq!(double.pendulum().deflections(), &[0.0, 0.3, 0.6]);
        assert_eq!(double.solution.initial_condition().y.len(), 6);
        let widened: f64 = 0.6_f32.into();
        assert_eq!(double.solution.initial_condition().y[2], widened);
    }

    #[test]
    fn test_session_moves_the_pendulum() {
        let mut session = Session::<f64>::new(&quick_config()).unwrap();
        assert!(!session.update().unwrap(), "not started yet");

        session.start().unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(session.update().unwrap());
        assert!(session.elapsed() > 0.0);
        assert_ne!(session.pendulum().deflection(2), Some(0.6));
        session.stop();
        assert!(!session.update().unwrap());
    }

    #[test]
    fn test_pause_freezes_the_clock() {
        let mut session = Session::<f32>::new(&quick_config()).unwrap();
        session.start().unwrap();
        thread::sleep(Duration::from_millis(10));
        session.update().unwrap();

        session.pause();
        let frozen = session.elapsed();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(session.elapsed(), frozen);
        assert!(!session.update().unwrap());

        session.start().unwrap();
        assert!(session.elapsed() >= frozen);
        assert!(session.elapsed() < frozen + 0.025);
        assert!(session.update().unwrap());
        session.stop();
    }
}
