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

//! The spawner that feeds solution points into the buffer.

use crate::function::OdeFun;
use crate::integrator::Integrator;
use crate::point::{Point, Scalar};
use pendula_core::Spawner;
use std::sync::Arc;

/// Produces successive solution points by repeated integration.
///
/// Every [`spawn`](Spawner::spawn) advances the last point by exactly one
/// integrator step and returns a copy of it.
pub struct PointSpawner<T: Scalar> {
    last_point: Point<T>,
    equation: Arc<dyn OdeFun<T>>,
    integrator: Arc<dyn Integrator<T>>,
}

impl<T: Scalar> PointSpawner<T> {
    /// Creates a spawner continuing from `last_point`.
    pub fn new(
        last_point: Point<T>,
        equation: Arc<dyn OdeFun<T>>,
        integrator: Arc<dyn Integrator<T>>,
    ) -> Self {
        Self {
            last_point,
            equation,
            integrator,
        }
    }

    /// Returns the most recently produced point.
    pub fn last_point(&self) -> &Point<T> {
        &self.last_point
    }

    /// Restarts the sequence from `last_point`.
    pub fn set_last_point(&mut self, last_point: Point<T>) {
        self.last_point = last_point;
    }

    /// Replaces the right-hand side.
    pub fn set_equation(&mut self, equation: Arc<dyn OdeFun<T>>) {
        self.equation = equation;
    }

    /// Replaces the integration strategy.
    pub fn set_integrator(&mut self, integrator: Arc<dyn Integrator<T>>) {
        self.integrator = integrator;
    }
}

impl<T: Scalar> Spawner<Point<T>> for PointSpawner<T> {
    fn spawn(&mut self) -> Point<T> {
        self.integrator
            .advance(&mut self.last_point, self.equation.as_ref());
        self.last_point.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::EulerIntegrator;

    #[test]
    fn test_each_spawn_moves_one_step_forward() {
        let mut spawner = PointSpawner::new(
            Point::new(0.0_f64, vec![0.0]),
            Arc::new(|_x: f64, _y: &[f64]| vec![2.0]),
            Arc::new(EulerIntegrator::new(0.5)),
        );

        let first = spawner.spawn();
        let second = spawner.spawn();
        assert_eq!(first, Point::new(0.5, vec![1.0]));
        assert_eq!(second, Point::new(1.0, vec![2.0]));
        assert_eq!(spawner.last_point(), &second);

        spawner.set_last_point(Point::new(10.0, vec![0.0]));
        assert_eq!(spawner.spawn(), Point::new(10.5, vec![1.0]));
    }
}
