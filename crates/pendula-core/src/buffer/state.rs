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

//! The buffer lifecycle state machine.
//!
//! ```text
//!             start_buffering           pause
//!   Stopped ──────────────────> Active ───────> Idle
//!      ^                          ^               │
//!      │                          └───────────────┘
//!      │                           start_buffering
//!      └──────── stop (from Active or Idle)
//! ```

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};

/// The lifecycle state of a [`Buffer`](super::Buffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BufferState {
    /// No worker thread is alive.
    Stopped = 0,
    /// The worker thread is alive but not allowed to produce.
    Idle = 1,
    /// The worker thread is alive and producing.
    Active = 2,
}

impl BufferState {
    /// Returns `true` while a worker thread is alive.
    pub fn is_running(self) -> bool {
        self != BufferState::Stopped
    }

    /// Returns `true` while the worker is allowed to produce.
    pub fn is_buffering(self) -> bool {
        self == BufferState::Active
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => BufferState::Idle,
            2 => BufferState::Active,
            _ => BufferState::Stopped,
        }
    }
}

/// Lock-protected state with a condition variable signalled on every change.
///
/// The state is also published through an atomic snapshot, so predicates
/// evaluated under the queue lock can read it without taking this lock.
#[derive(Debug)]
pub(crate) struct StateCell {
    current: Mutex<BufferState>,
    changed: Condvar,
    snapshot: AtomicU8,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(BufferState::Stopped),
            changed: Condvar::new(),
            snapshot: AtomicU8::new(BufferState::Stopped as u8),
        }
    }

    /// Returns the last published state.
    pub(crate) fn get(&self) -> BufferState {
        BufferState::from_raw(self.snapshot.load(Ordering::Acquire))
    }

    /// Applies `next` to the current state and wakes every waiter.
    ///
    /// Returns the state observed before the transition.
    pub(crate) fn transition(
        &self,
        next: impl FnOnce(BufferState) -> BufferState,
    ) -> BufferState {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = *current;
        *current = next(previous);
        self.snapshot.store(*current as u8, Ordering::Release);
        self.changed.notify_all();
        previous
    }

    /// Blocks while the state is [`BufferState::Idle`] and returns the state
    /// that ended the wait.
    pub(crate) fn wait_while_idle(&self) -> BufferState {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self
            .changed
            .wait_while(current, |state| *state == BufferState::Idle)
            .unwrap_or_else(PoisonError::into_inner);
        *current
    }
}
