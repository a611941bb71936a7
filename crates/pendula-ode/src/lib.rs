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

//! # Pendula ODE
//!
//! A continuous-time solution stream for ordinary differential equations.
//!
//! An [`OdeSolution`] integrates `dy/dx = f(x, y)` ahead of time on a
//! background [`Buffer`](pendula_core::Buffer) worker, using one of the
//! [`Integrator`] strategies, and answers causal queries `y(x)` by
//! interpolating between the two buffered points that bracket `x`.
//!
//! ```
//! use pendula_ode::{OdeSolution, Point, Rk4Integrator};
//!
//! // dy/dx = y, y(0) = 1
//! let mut solution = OdeSolution::with_equation(
//!     Point::new(0.0_f64, vec![1.0]),
//!     |_x: f64, y: &[f64]| y.to_vec(),
//!     Rk4Integrator::new(1e-3),
//! )
//! .unwrap();
//!
//! let y = solution.eval(0.5).unwrap();
//! assert!((y[0] - 0.5_f64.exp()).abs() < 1e-2);
//! solution.stop();
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod function;
pub mod integrator;
pub mod pendulum;
pub mod point;
pub mod solution;

pub use error::SolutionError;
pub use function::OdeFun;
pub use integrator::{EulerIntegrator, Integrator, IntegratorKind, Rk4Integrator};
pub use pendulum::{Joint, Pendulum, PendulumOdeFun, PendulumParameters};
pub use point::{Point, Scalar};
pub use solution::{Interpolation, OdeSolution, PointSpawner, SolverConfig};
