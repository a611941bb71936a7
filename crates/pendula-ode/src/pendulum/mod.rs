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

//! # Chain Pendulum
//!
//! A hanging chain of point masses joined by rigid segments, driven at its
//! suspension point. [`Pendulum`] holds the geometry used for display and
//! [`PendulumOdeFun`] is the right-hand side that evolves its deflections.

mod equation;
mod model;

pub use equation::{PendulumOdeFun, PendulumParameters, DRAG_COEFF, GRAV_ACCEL};
pub use model::Pendulum;

use serde::{Deserialize, Serialize};

/// A joint of the pendulum polyline, in model space.
///
/// `x` is the horizontal deflection, `y` grows downwards from the suspension
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Joint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Joint {
    /// Creates a joint at `(x, y)`.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
