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

use super::{Integrator, DEFAULT_STEP};
use crate::function::OdeFun;
use crate::point::{constant, Point, Scalar};

/// Explicit Euler: `y ← y + h·f(x, y)`, `x ← x + h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerIntegrator<T> {
    h: T,
}

impl<T: Scalar> EulerIntegrator<T> {
    /// Creates an Euler integrator with step `step`.
    pub fn new(step: T) -> Self {
        Self { h: step }
    }
}

impl<T: Scalar> Default for EulerIntegrator<T> {
    fn default() -> Self {
        Self::new(constant(DEFAULT_STEP))
    }
}

impl<T: Scalar> Integrator<T> for EulerIntegrator<T> {
    fn step(&self) -> T {
        self.h
    }

    fn advance(&self, point: &mut Point<T>, f: &dyn OdeFun<T>) {
        let slope = f.eval(point.x, &point.y);
        debug_assert_eq!(slope.len(), point.y.len(), "derivative dimension mismatch");

        for (component, &dy) in point.y.iter_mut().zip(&slope) {
            *component = *component + self.h * dy;
        }
        point.x = point.x + self.h;
    }
}
