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

use crate::function::OdeFun;
use crate::point::{constant, Scalar};
use serde::{Deserialize, Serialize};

/// Gravitational acceleration, in m/s².
pub const GRAV_ACCEL: f64 = 9.81;

/// Drag coefficient of a sphere.
pub const DRAG_COEFF: f64 = 0.47;

/// Physical parameters of a driven, damped chain pendulum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumParameters<T> {
    /// Length of one segment.
    pub length: T,
    /// Mass of one weight.
    pub mass: T,
    /// Radius of one weight.
    pub radius: T,
    /// Angular frequency of the suspension point's drive.
    pub angular_frequency: T,
    /// Velocity amplitude of the drive. Zero leaves the suspension at rest.
    pub amplitude: T,
    /// Viscosity of the surrounding medium (linear drag).
    pub viscosity: T,
    /// Density of the surrounding medium (quadratic drag).
    pub density: T,
}

impl<T: Scalar> Default for PendulumParameters<T> {
    fn default() -> Self {
        Self {
            length: constant(2.0),
            mass: constant(1.0),
            radius: constant(0.25),
            angular_frequency: constant(20.0),
            amplitude: T::zero(),
            viscosity: T::zero(),
            density: T::zero(),
        }
    }
}

/// Right-hand side of the linearised chain pendulum.
///
/// For a chain of `n` segments the state holds `2(n + 1)` values: the
/// deflections `y[0..=n]` followed by their velocities `y[n+1..=2n+1]`.
/// Weight `0` is the suspension point, which moves with velocity
/// `A·ω·cos(ω·x)` regardless of the rest of the chain.
#[derive(Debug, Clone, Copy)]
pub struct PendulumOdeFun<T> {
    stiffness: T,
    angular_frequency: T,
    amplitude: T,
    linear_drag: T,
    quadratic_drag: T,
}

impl<T: Scalar> PendulumOdeFun<T> {
    /// Precomputes the coefficients for `parameters`.
    pub fn new(parameters: &PendulumParameters<T>) -> Self {
        let pi = constant::<T>(std::f64::consts::PI);
        let cross_section = pi * parameters.radius * parameters.radius;
        Self {
            stiffness: constant::<T>(GRAV_ACCEL) / parameters.length,
            angular_frequency: parameters.angular_frequency,
            amplitude: parameters.amplitude,
            linear_drag: parameters.viscosity * cross_section / parameters.mass,
            quadratic_drag: constant::<T>(0.5 * DRAG_COEFF) * cross_section * parameters.density
                / parameters.mass,
        }
    }

    fn drag(&self, velocity: T) -> T {
        velocity * (self.linear_drag + self.quadratic_drag * velocity.abs())
    }
}

impl<T: Scalar> OdeFun<T> for PendulumOdeFun<T> {
    fn eval(&self, x: T, y: &[T]) -> Vec<T> {
        let mut dy = vec![T::zero(); y.len()];
        if let Some(drive) = dy.first_mut() {
            *drive = self.amplitude * self.angular_frequency * (self.angular_frequency * x).cos();
        }
        // Less than one segment: only the suspension point moves.
        if y.len() < 4 {
            return dy;
        }

        let n = y.len() / 2 - 1;
        let c = self.stiffness;
        for k in 1..n {
            let v = y[n + k + 1];
            let above = constant::<T>((n - k + 1) as f64);
            let below = constant::<T>((n - k) as f64);
            let own = constant::<T>((2 * (n - k) + 1) as f64);

            dy[k] = v;
            let restoring = c * (above * y[k - 1] + below * y[k + 1] - own * y[k]);
            dy[n + k + 1] = restoring - self.drag(v);
        }

        let v = y[2 * n + 1];
        dy[n] = v;
        dy[2 * n + 1] = c * (y[n - 1] - y[n]) - self.drag(v);
        dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parameters() -> PendulumParameters<f64> {
        PendulumParameters {
            length: 1.0,
            mass: 1.0,
            radius: 0.2,
            angular_frequency: 2.0,
            amplitude: 0.5,
            viscosity: 0.0,
            density: 0.0,
        }
    }

    #[test]
    fn test_drive_only_for_short_state() {
        let f = PendulumOdeFun::new(&parameters());
        let dy = f.eval(0.0, &[1.0, 2.0]);
        assert_relative_eq!(dy[0], 1.0);
        assert_eq!(dy[1], 0.0);
        assert!(f.eval(0.0, &[]).is_empty());
    }

    #[test]
    fn test_single_segment() {
        // n = 1: y = [d0, d1, v0, v1]
        let f = PendulumOdeFun::new(&parameters());
        let dy = f.eval(0.0, &[0.0, 0.1, 0.0, 0.3]);

        assert_relative_eq!(dy[0], 1.0);
        assert_relative_eq!(dy[1], 0.3);
        assert_eq!(dy[2], 0.0);
        assert_relative_eq!(dy[3], 9.81 * (0.0 - 0.1));
    }

    #[test]
    fn test_two_segments_couple_neighbours() {
        // n = 2: y = [d0, d1, d2, v0, v1, v2]
        let f = PendulumOdeFun::new(&PendulumParameters {
            amplitude: 0.0,
            ..parameters()
        });
        let y = [0.0, 0.2, 0.5, 0.0, 0.7, -0.4];
        let dy = f.eval(1.0, &y);

        assert_eq!(dy[0], 0.0);
        assert_relative_eq!(dy[1], 0.7);
        assert_relative_eq!(dy[2], -0.4);
        assert_relative_eq!(dy[4], 9.81 * (2.0 * 0.0 + 1.0 * 0.5 - 3.0 * 0.2));
        assert_relative_eq!(dy[5], 9.81 * (0.2 - 0.5));
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let f = PendulumOdeFun::new(&PendulumParameters {
            amplitude: 0.0,
            viscosity: 1.0,
            density: 1.0,
            ..parameters()
        });
        let area = std::f64::consts::PI * 0.04;
        let linear = area;
        let quadratic = 0.5 * DRAG_COEFF * area;

        for v in [-2.0, 2.0] {
            let dy = f.eval(0.0, &[0.0, 0.0, 0.0, v]);
            assert_relative_eq!(dy[3], -v * (linear + quadratic * 2.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_resting_chain_stays_at_rest() {
        let f = PendulumOdeFun::new(&PendulumParameters::<f32>::default());
        let dy = f.eval(0.0, &[0.0; 8]);
        assert!(dy.iter().all(|d| *d == 0.0));
    }
}
