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

//! Solution points and the scalar type they are built on.

use num_traits::{Float, NumCast};
use std::fmt::Debug;

/// A floating-point type usable as the independent variable and state
/// component of an ODE.
pub trait Scalar: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Scalar for T {}

/// One point `(x, y)` of a solution: a scalar time and a state vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T> {
    /// The independent variable.
    pub x: T,
    /// The state variables at `x`.
    pub y: Vec<T>,
}

impl<T: Scalar> Point<T> {
    /// Creates a point.
    pub fn new(x: T, y: Vec<T>) -> Self {
        Self { x, y }
    }
}

/// The point `(0, [0])`.
impl<T: Scalar> Default for Point<T> {
    fn default() -> Self {
        Self {
            x: T::zero(),
            y: vec![T::zero()],
        }
    }
}

/// Converts a literal constant into `T`.
pub(crate) fn constant<T: Scalar>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Returns `y + a * k`, component-wise.
pub(crate) fn offset<T: Scalar>(y: &[T], a: T, k: &[T]) -> Vec<T> {
    y.iter().zip(k).map(|(&y, &k)| y + a * k).collect()
}

/// Multiplies every component of `v` by `a` in place.
pub(crate) fn scaled<T: Scalar>(mut v: Vec<T>, a: T) -> Vec<T> {
    v.iter_mut().for_each(|c| *c = *c * a);
    v
}
