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
use crate::point::{constant, offset, scaled, Point, Scalar};

/// The classic four-stage Runge-Kutta method.
///
/// ```text
/// k1 = h·f(x,       y)
/// k2 = h·f(x + h/2, y + k1/2)
/// k3 = h·f(x + h/2, y + k2/2)
/// k4 = h·f(x + h,   y + k3)
/// y ← y + (k1 + 2·k2 + 2·k3 + k4) / 6
/// x ← x + h
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Integrator<T> {
    h: T,
}

impl<T: Scalar> Rk4Integrator<T> {
    /// Creates a Runge-Kutta integrator with step `step`.
    pub fn new(step: T) -> Self {
        Self { h: step }
    }
}

impl<T: Scalar> Default for Rk4Integrator<T> {
    fn default() -> Self {
        Self::new(constant(DEFAULT_STEP))
    }
}

impl<T: Scalar> Integrator<T> for Rk4Integrator<T> {
    fn step(&self) -> T {
        self.h
    }

    fn advance(&self, point: &mut Point<T>, f: &dyn OdeFun<T>) {
        let h = self.h;
        let half = constant::<T>(0.5);
        let two = constant::<T>(2.0);
        let six = constant::<T>(6.0);
        let (x, y) = (point.x, &point.y);

        let k1 = scaled(f.eval(x, y), h);
        debug_assert_eq!(k1.len(), y.len(), "derivative dimension mismatch");
        let k2 = scaled(f.eval(x + half * h, &offset(y, half, &k1)), h);
        let k3 = scaled(f.eval(x + half * h, &offset(y, half, &k2)), h);
        let k4 = scaled(f.eval(x + h, &offset(y, T::one(), &k3)), h);

        let stages = k1.iter().zip(&k2).zip(&k3).zip(&k4);
        for (component, (((&k1, &k2), &k3), &k4)) in point.y.iter_mut().zip(stages) {
            *component = *component + (k1 + two * k2 + two * k3 + k4) / six;
        }
        point.x = x + h;
    }
}
