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

//! Errors raised by [`OdeSolution`](crate::OdeSolution).

use pendula_core::BufferError;
use thiserror::Error;

/// An error raised while configuring or querying an
/// [`OdeSolution`](crate::OdeSolution).
#[derive(Debug, Error)]
pub enum SolutionError {
    /// The underlying buffer rejected the operation.
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// `eval` was called with an argument smaller than the previous one.
    #[error(
        "Argument {requested} must not be smaller than the previous argument {previous}"
    )]
    NonMonotonicQuery {
        /// The argument of the previous query.
        previous: f64,
        /// The rejected argument.
        requested: f64,
    },
    /// The equation, integrator or initial condition was changed while the
    /// solution was running.
    #[error("Cannot {operation} while the solution is running")]
    SolutionLocked {
        /// The rejected operation.
        operation: &'static str,
    },
    /// The configured integration step is not a positive finite number.
    #[error("Integration step must be positive and finite, got {0}")]
    InvalidStep(f64),
}
