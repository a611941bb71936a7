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

//! Error types for the queue and buffer layers.

use thiserror::Error;

/// An error raised by a [`RingQueue`](crate::RingQueue) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A capacity of zero was requested.
    #[error("Capacity must be greater than zero")]
    InvalidArgument,
    /// An element was pushed onto a full queue.
    #[error("Pushing to a full container (capacity {capacity})")]
    CapacityExceeded {
        /// The capacity the queue reported at the time of the push.
        capacity: usize,
    },
    /// The oldest or newest element of an empty queue was requested.
    #[error("Looking up an empty container")]
    EmptyContainer,
}

/// An error raised by a [`Buffer`](crate::Buffer) operation.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The underlying queue rejected the operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// Buffering was requested before any spawner was configured.
    #[error("Cannot start buffering without a spawner")]
    MissingSpawner,
    /// A consumer wait ended while buffering was inactive.
    ///
    /// Waiting on an empty buffer that nobody fills would never return, so
    /// every consumer call made while paused or stopped is rejected.
    #[error("Not buffering: waiting on the buffer would deadlock")]
    NotBuffering,
    /// The operating system refused to start the worker thread.
    #[error("Failed to spawn the buffer worker thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
