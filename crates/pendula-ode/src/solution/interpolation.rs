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

//! Blending of two bracket points.

use crate::point::{Point, Scalar};
use serde::{Deserialize, Serialize};

/// How a query between two bracket points `beg` and `end` is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Each endpoint is weighted by its own distance from the query:
    ///
    /// `((x − beg.x)·beg.y + (end.x − x)·end.y) / (end.x − beg.x)`
    ///
    /// The endpoint farther from `x` dominates. This is the historical
    /// behaviour of the solver and stays the default until consumers opt out.
    #[default]
    Mirrored,
    /// Conventional linear interpolation, the nearer endpoint dominates:
    ///
    /// `((end.x − x)·beg.y + (x − beg.x)·end.y) / (end.x − beg.x)`
    Linear,
}

impl Interpolation {
    /// Blends `beg.y` and `end.y` for the query `x`.
    ///
    /// A degenerate bracket (`beg.x == end.x`) yields `end.y`.
    pub fn blend<T: Scalar>(self, beg: &Point<T>, end: &Point<T>, x: T) -> Vec<T> {
        let span = end.x - beg.x;
        if span == T::zero() {
            return end.y.clone();
        }
        let (beg_weight, end_weight) = match self {
            Interpolation::Mirrored => (x - beg.x, end.x - x),
            Interpolation::Linear => (end.x - x, x - beg.x),
        };
        beg.y
            .iter()
            .zip(&end.y)
            .map(|(&b, &e)| (beg_weight * b + end_weight * e) / span)
            .collect()
    }
}
