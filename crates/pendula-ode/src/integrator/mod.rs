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

//! Fixed-step integration strategies.
//!
//! An [`Integrator`] advances a caller-owned [`Point`] by exactly one step of
//! its fixed size. Integrators are stateless between steps and know nothing
//! about absolute time beyond the step size.

mod euler;
mod rk4;

pub use euler::EulerIntegrator;
pub use rk4::Rk4Integrator;

use crate::function::OdeFun;
use crate::point::{Point, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The step size used by the `Default` integrators.
pub const DEFAULT_STEP: f64 = 1e-3;

/// A one-step method for `dy/dx = f(x, y)`.
pub trait Integrator<T: Scalar>: Send + Sync {
    /// Returns the fixed step size `h`.
    fn step(&self) -> T;

    /// Advances `point` by one step of size `h`.
    ///
    /// `f` must return one derivative per component of `point.y`. Debug builds
    /// assert this; in release builds components without a derivative keep
    /// their value and extra derivatives are ignored.
    fn advance(&self, point: &mut Point<T>, f: &dyn OdeFun<T>);
}

/// Selects one of the built-in integrators, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    /// Explicit Euler, first order.
    #[default]
    Euler,
    /// Classic four-stage Runge-Kutta, fourth order.
    Rk4,
}

impl IntegratorKind {
    /// Builds an integrator of this kind with step `step`.
    pub fn build<T: Scalar>(self, step: T) -> Arc<dyn Integrator<T>> {
        match self {
            IntegratorKind::Euler => Arc::new(EulerIntegrator::new(step)),
            IntegratorKind::Rk4 => Arc::new(Rk4Integrator::new(step)),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorKind::Euler => write!(f, "euler"),
            IntegratorKind::Rk4 => write!(f, "rk4"),
        }
    }
}

impl FromStr for IntegratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(IntegratorKind::Euler),
            "rk4" => Ok(IntegratorKind::Rk4),
            other => Err(format!("unknown integrator '{other}', expected 'euler' or 'rk4'")),
        }
    }
}
