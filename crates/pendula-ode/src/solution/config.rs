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

//! Configuration for [`OdeSolution`](super::OdeSolution).

use super::Interpolation;
use crate::integrator::{IntegratorKind, DEFAULT_STEP};
use pendula_core::BufferConfig;
use serde::{Deserialize, Serialize};

/// Configuration for an [`OdeSolution`](super::OdeSolution).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Integration step size.
    pub step: f64,
    /// Integration strategy.
    pub integrator: IntegratorKind,
    /// How queries between two buffered points are answered.
    pub interpolation: Interpolation,
    /// The point buffer.
    pub buffer: BufferConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            integrator: IntegratorKind::default(),
            interpolation: Interpolation::default(),
            buffer: BufferConfig {
                thread_name: "pendula-solver".to_string(),
                ..Default::default()
            },
        }
    }
}
