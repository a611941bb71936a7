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

//! A causally queryable ODE solution backed by a point buffer.
//!
//! [`OdeSolution`] pairs a [`PointSpawner`] with a [`Buffer`]: the buffer's
//! worker integrates ahead of the consumer, and [`OdeSolution::eval`] pulls
//! points out of the buffer until the query time is bracketed, then
//! interpolates.
//!
//! ```text
//! OdeFun + Integrator ─> PointSpawner ─> Buffer (worker thread) ─> eval(x)
//! ```

mod config;
mod interpolation;
mod spawner;

pub use config::SolverConfig;
pub use interpolation::Interpolation;
pub use spawner::PointSpawner;

use crate::error::SolutionError;
use crate::function::OdeFun;
use crate::integrator::{EulerIntegrator, Integrator};
use crate::point::{constant, Point, Scalar};
use pendula_core::{Buffer, SharedSpawner};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The solution `y(x)` of an initial value problem, computed ahead of time on a
/// background thread and queried in non-decreasing `x`.
///
/// The equation, the integrator and the initial condition can only be changed
/// while the solution is stopped. Queries are answered by interpolating
/// between the two consumed points `(beg, end)` that bracket the query, with
/// `beg.x ≤ x ≤ end.x`.
pub struct OdeSolution<T: Scalar> {
    buffer: Buffer<Point<T>>,
    spawner: Option<Arc<Mutex<PointSpawner<T>>>>,
    integrator: Arc<dyn Integrator<T>>,
    interpolation: Interpolation,
    initial_condition: Point<T>,
    last_arg: T,
    beg: Point<T>,
    end: Point<T>,
}

impl<T: Scalar> OdeSolution<T> {
    /// Creates a stopped solution without an equation, using an Euler
    /// integrator with the default step.
    pub fn new(initial_condition: Point<T>) -> Self {
        Self::from_parts(
            Buffer::default(),
            Arc::new(EulerIntegrator::default()),
            Interpolation::default(),
            initial_condition,
        )
    }

    /// Creates a stopped solution without an equation from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SolutionError::InvalidStep`] if the step is not positive and
    /// finite, or a buffer error if the buffer capacity is zero.
    pub fn from_config(
        config: &SolverConfig,
        initial_condition: Point<T>,
    ) -> Result<Self, SolutionError> {
        if !(config.step > 0.0 && config.step.is_finite()) {
            return Err(SolutionError::InvalidStep(config.step));
        }
        let buffer = Buffer::new(config.buffer.clone())?;
        Ok(Self::from_parts(
            buffer,
            config.integrator.build(constant(config.step)),
            config.interpolation,
            initial_condition,
        ))
    }

    /// Creates a solution of `dy/dx = equation(x, y)` and starts buffering.
    pub fn with_equation<F, I>(
        initial_condition: Point<T>,
        equation: F,
        integrator: I,
    ) -> Result<Self, SolutionError>
    where
        F: OdeFun<T> + 'static,
        I: Integrator<T> + 'static,
    {
        let mut solution = Self::new(initial_condition);
        solution.set_integrator(integrator)?;
        solution.set_equation(equation)?;
        solution.start()?;
        Ok(solution)
    }

    fn from_parts(
        buffer: Buffer<Point<T>>,
        integrator: Arc<dyn Integrator<T>>,
        interpolation: Interpolation,
        initial_condition: Point<T>,
    ) -> Self {
        Self {
            buffer,
            spawner: None,
            integrator,
            interpolation,
            last_arg: initial_condition.x,
            beg: initial_condition.clone(),
            end: initial_condition.clone(),
            initial_condition,
        }
    }

    /// Returns the initial condition the solution starts from.
    pub fn initial_condition(&self) -> &Point<T> {
        &self.initial_condition
    }

    /// Sets the point the next start integrates from.
    pub fn set_initial_condition(
        &mut self,
        initial_condition: Point<T>,
    ) -> Result<(), SolutionError> {
        self.ensure_stopped("set the initial condition")?;
        self.initial_condition = initial_condition;
        Ok(())
    }

    /// Sets the right-hand side of the equation.
    pub fn set_equation<F>(&mut self, equation: F) -> Result<(), SolutionError>
    where
        F: OdeFun<T> + 'static,
    {
        self.ensure_stopped("set the equation")?;
        let equation: Arc<dyn OdeFun<T>> = Arc::new(equation);
        match &self.spawner {
            Some(spawner) => lock(spawner).set_equation(equation),
            None => {
                let spawner = Arc::new(Mutex::new(PointSpawner::new(
                    self.initial_condition.clone(),
                    equation,
                    Arc::clone(&self.integrator),
                )));
                let shared: SharedSpawner<Point<T>> = spawner.clone();
                self.buffer.set_spawner(shared);
                self.spawner = Some(spawner);
            }
        }
        Ok(())
    }

    /// Sets the integration strategy.
    pub fn set_integrator<I>(&mut self, integrator: I) -> Result<(), SolutionError>
    where
        I: Integrator<T> + 'static,
    {
        self.ensure_stopped("set the integrator")?;
        self.integrator = Arc::new(integrator);
        if let Some(spawner) = &self.spawner {
            lock(spawner).set_integrator(Arc::clone(&self.integrator));
        }
        Ok(())
    }

    /// Returns the step size of the current integrator.
    pub fn step(&self) -> T {
        self.integrator.step()
    }

    /// Returns how queries between two buffered points are answered.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Changes how queries between two buffered points are answered.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Evaluates the solution at `x`.
    ///
    /// Blocks until the buffer has produced a point at or beyond `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SolutionError::NonMonotonicQuery`] if `x` is smaller than the
    /// argument of the previous call or is NaN, and a buffer error if the
    /// solution is not buffering.
    pub fn eval(&mut self, x: T) -> Result<Vec<T>, SolutionError> {
        if x.is_nan() || x < self.last_arg {
            return Err(SolutionError::NonMonotonicQuery {
                previous: self.last_arg.to_f64().unwrap_or(f64::NAN),
                requested: x.to_f64().unwrap_or(f64::NAN),
            });
        }

        self.last_arg = x;
        while self.end.x < x {
            let next = self.buffer.next()?;
            self.beg = std::mem::replace(&mut self.end, next);
        }

        Ok(self.interpolation.blend(&self.beg, &self.end, x))
    }

    /// Returns the `x` of the oldest and the newest buffered point.
    pub fn buffered_range(&self) -> Result<(T, T), SolutionError> {
        let oldest = self.buffer.peek()?.x;
        let newest = self.buffer.peek_last()?.x;
        Ok((oldest, newest))
    }

    /// Starts or resumes the solution.
    ///
    /// A stopped solution restarts from its initial condition; a paused one
    /// continues from the last integrated point.
    ///
    /// # Errors
    ///
    /// Fails with [`BufferError::MissingSpawner`](pendula_core::BufferError::MissingSpawner)
    /// if no equation has been set.
    pub fn start(&mut self) -> Result<(), SolutionError> {
        if !self.buffer.running() {
            self.last_arg = self.initial_condition.x;
            self.beg = self.initial_condition.clone();
            self.end = self.initial_condition.clone();
            if let Some(spawner) = &self.spawner {
                lock(spawner).set_last_point(self.initial_condition.clone());
            }
            log::debug!(
                "OdeSolution: starting from x = {:?}",
                self.initial_condition.x
            );
        }
        self.buffer.start_buffering()?;
        Ok(())
    }

    /// Stops integration and discards every buffered point.
    pub fn stop(&self) {
        self.buffer.stop();
    }

    /// Pauses integration. Queries fail until [`start`](Self::start) is called
    /// again.
    pub fn pause(&self) {
        self.buffer.pause();
    }

    /// Returns `true` while the integration thread is alive.
    pub fn running(&self) -> bool {
        self.buffer.running()
    }

    /// Returns `true` while integration is active.
    pub fn buffering(&self) -> bool {
        self.buffer.buffering()
    }

    fn ensure_stopped(&self, operation: &'static str) -> Result<(), SolutionError> {
        if self.buffer.running() {
            return Err(SolutionError::SolutionLocked { operation });
        }
        Ok(())
    }
}
