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

//! The right-hand side of an ODE.

use crate::point::Scalar;

/// The right-hand side `f` of `dy/dx = f(x, y)`.
///
/// Implementations must be pure functions of `(x, y)`: the integrators may
/// evaluate them several times per step at intermediate points.
pub trait OdeFun<T: Scalar>: Send + Sync {
    /// Evaluates the derivative of `y` at `x`.
    fn eval(&self, x: T, y: &[T]) -> Vec<T>;
}

impl<T, F> OdeFun<T> for F
where
    T: Scalar,
    F: Fn(T, &[T]) -> Vec<T> + Send + Sync,
{
    fn eval(&self, x: T, y: &[T]) -> Vec<T> {
        self(x, y)
    }
}
