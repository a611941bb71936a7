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

//! # Pendula Core
//!
//! Foundational streaming primitives: a resizable [`RingQueue`], the
//! [`Spawner`] capability, and a thread-backed [`Buffer`] that keeps the
//! queue filled from a spawner while a consumer drains it.

#![warn(missing_docs)]

pub mod buffer;
pub mod error;
pub mod queue;
pub mod spawner;

pub use buffer::{Buffer, BufferConfig, BufferState};
pub use error::{BufferError, QueueError};
pub use queue::RingQueue;
pub use spawner::{SharedSpawner, Spawner};
