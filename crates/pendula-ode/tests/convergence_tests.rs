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


use approx::assert_abs_diff_eq;
use pendula_ode::{
    EulerIntegrator, Integrator, Interpolation, OdeSolution, Point, Rk4Integrator,
};

const STEP: f64 = 1.0 / 256.0;

fn exponential(_x: f64, y: &[f64]) -> Vec<f64> {
    y.to_vec()
}

fn integrate_to_one(integrator: &dyn Integrator<f64>) -> Point<f64> {
    let mut point = Point::new(0.0, vec![1.0]);
    while point.x < 1.0 - STEP / 2.0 {
        integrator.advance(&mut point, &exponential);
    }
    point
}

#[test]
fn test_rk4_reaches_e() {
    let point = integrate_to_one(&Rk4Integrator::new(STEP));
    assert_abs_diff_eq!(point.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(point.y[0], std::f64::consts::E, epsilon = 1e-5);
}

#[test]
fn test_euler_is_first_order() {
    let point = integrate_to_one(&EulerIntegrator::new(STEP));
    let error = (point.y[0] - std::f64::consts::E).abs();
    assert!(error > 1e-3, "euler error {error} is suspiciously small");
    assert!(error < 1e-2, "euler error {error} is too large");
}

#[test]
fn test_halving_the_step_halves_the_euler_error() {
    let coarse = integrate_to_one(&EulerIntegrator::new(STEP));
    let mut fine = Point::new(0.0, vec![1.0]);
    let integrator = EulerIntegrator::new(STEP / 2.0);
    while fine.x < 1.0 - STEP / 4.0 {
        integrator.advance(&mut fine, &exponential);
    }

    let ratio = (coarse.y[0] - std::f64::consts::E) / (fine.y[0] - std::f64::consts::E);
    assert_abs_diff_eq!(ratio, 2.0, epsilon = 0.05);
}

#[test]
fn test_solution_stream_matches_integrator() {
    let mut solution = OdeSolution::with_equation(
        Point::new(0.0, vec![1.0]),
        exponential,
        Rk4Integrator::new(STEP),
    )
    .unwrap();
    solution.set_interpolation(Interpolation::Linear);

    // Every query lands on a grid point, so the stream reproduces the steps.
    for i in 1..=256 {
        let x = i as f64 * STEP;
        let y = solution.eval(x).unwrap();
        assert_abs_diff_eq!(y[0], x.exp(), epsilon = 1e-5);
    }
    solution.stop();
}

#[test]
fn test_harmonic_oscillator_conserves_energy() {
    let oscillator = |_x: f64, y: &[f64]| vec![y[1], -y[0]];
    let mut solution = OdeSolution::with_equation(
        Point::new(0.0, vec![1.0, 0.0]),
        oscillator,
        Rk4Integrator::new(1e-2),
    )
    .unwrap();
    solution.set_interpolation(Interpolation::Linear);

    let y = solution.eval(std::f64::consts::TAU).unwrap();
    assert_abs_diff_eq!(y[0], 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(y[1], 0.0, epsilon = 1e-2);
    solution.stop();
}
