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

//! A bounded producer/consumer buffer driven by a background worker thread.
//!
//! A [`Buffer`] owns a [`RingQueue`] and a worker thread that keeps the queue
//! filled from a [`Spawner`](crate::Spawner) while buffering is active. The
//! consumer side ([`next`](Buffer::next), [`pop`](Buffer::pop),
//! [`peek`](Buffer::peek), [`peek_last`](Buffer::peek_last)) blocks while the
//! queue is empty and buffering is active.
//!
//! The queue, the spawner and the lifecycle state live in three independently
//! locked cells. No lock is held while another one is taken.
//!
//! # Deadlock avoidance
//!
//! A consumer whose wait ends while buffering is inactive fails with
//! [`BufferError::NotBuffering`], even when elements are still queued. Once
//! production is paused or stopped every consumer call is rejected.

mod config;
mod state;

pub use config::BufferConfig;
pub use state::BufferState;

use crate::error::BufferError;
use crate::queue::RingQueue;
use crate::spawner::SharedSpawner;
use state::StateCell;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between a [`Buffer`] and its worker thread.
struct Shared<T> {
    queue: Mutex<RingQueue<T>>,
    /// Signalled whenever the queue or the buffering state changes.
    queue_changed: Condvar,
    spawner: Mutex<Option<SharedSpawner<T>>>,
    state: StateCell,
}

impl<T> Shared<T> {
    fn is_buffering(&self) -> bool {
        self.state.get().is_buffering()
    }

    /// Wakes every thread waiting on the queue condition.
    ///
    /// The queue lock is taken and released first so a waiter that has just
    /// evaluated its predicate cannot miss the notification.
    fn wake_queue(&self) {
        drop(lock(&self.queue));
        self.queue_changed.notify_all();
    }

    /// Blocks while the queue is empty and buffering is active.
    fn wait_for_data(&self) -> Result<MutexGuard<'_, RingQueue<T>>, BufferError> {
        let queue = self
            .queue_changed
            .wait_while(lock(&self.queue), |queue| {
                queue.is_empty() && self.is_buffering()
            })
            .unwrap_or_else(PoisonError::into_inner);
        if !self.is_buffering() {
            return Err(BufferError::NotBuffering);
        }
        Ok(queue)
    }

    /// Blocks while the queue is full and buffering is active.
    ///
    /// Returns `true` if there is room for one more element and buffering is
    /// still active.
    fn wait_for_room(&self) -> bool {
        let queue = self
            .queue_changed
            .wait_while(lock(&self.queue), |queue| {
                queue.is_full() && self.is_buffering()
            })
            .unwrap_or_else(PoisonError::into_inner);
        self.is_buffering() && !queue.is_full()
    }

    fn spawn_one(&self) -> Option<T> {
        let spawner = lock(&self.spawner);
        let spawner = spawner.as_ref()?;
        let item = lock(spawner).spawn();
        Some(item)
    }

    /// The worker loop. Runs until the state becomes [`BufferState::Stopped`].
    fn run(&self) {
        log::info!("Buffer worker thread started.");
        // An element spawned while the capacity shrank concurrently is held
        // back here instead of being dropped.
        let mut held_back: Option<T> = None;

        while self.state.get().is_running() {
            self.state.wait_while_idle();
            if !self.wait_for_room() {
                continue;
            }

            let item = match held_back.take() {
                Some(item) => item,
                None => match self.spawn_one() {
                    Some(item) => item,
                    None => {
                        log::warn!("Buffer worker has no spawner, pausing.");
                        self.state.transition(|state| match state {
                            BufferState::Active => BufferState::Idle,
                            other => other,
                        });
                        continue;
                    }
                },
            };

            let mut queue = lock(&self.queue);
            if queue.is_full() {
                held_back = Some(item);
                continue;
            }
            if let Err(e) = queue.push(item) {
                log::error!("Buffer worker failed to enqueue an element: {e}");
            }
            drop(queue);
            self.queue_changed.notify_all();
        }

        log::info!("Buffer worker thread stopped.");
    }
}

/// A bounded FIFO buffer filled by a dedicated worker thread.
///
/// The worker is started by the first [`start_buffering`](Self::start_buffering)
/// and lives until [`stop`](Self::stop) or drop. Buffering can be paused and
/// resumed any number of times without restarting the thread.
///
/// # Example
///
/// ```
/// use pendula_core::{spawner, Buffer, BufferConfig};
///
/// let mut counter = 0u64;
/// let buffer = Buffer::new(BufferConfig::default()).unwrap();
/// buffer
///     .start_buffering_with(spawner::shared(move || {
///         counter += 1;
///         counter
///     }))
///     .unwrap();
///
/// assert_eq!(buffer.next().unwrap(), 1);
/// assert_eq!(buffer.next().unwrap(), 2);
/// buffer.stop();
/// ```
pub struct Buffer<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl<T: Send + 'static> Buffer<T> {
    /// Creates a stopped buffer without a spawner.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Queue`] if the configured capacity is zero.
    pub fn new(config: BufferConfig) -> Result<Self, BufferError> {
        Ok(Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(RingQueue::new(config.capacity)?),
                queue_changed: Condvar::new(),
                spawner: Mutex::new(None),
                state: StateCell::new(),
            }),
            worker: Mutex::new(None),
            thread_name: config.thread_name,
        })
    }

    /// Creates a stopped buffer that will draw from `spawner`.
    pub fn with_spawner(
        spawner: SharedSpawner<T>,
        config: BufferConfig,
    ) -> Result<Self, BufferError> {
        let buffer = Self::new(config)?;
        buffer.set_spawner(spawner);
        Ok(buffer)
    }

    /// Returns the intended capacity of the queue.
    pub fn capacity(&self) -> usize {
        lock(&self.shared.queue).capacity()
    }

    /// Changes the capacity of the queue. Shrinking below the current size is
    /// deferred until the consumer has drained enough elements.
    pub fn set_capacity(&self, capacity: usize) -> Result<(), BufferError> {
        lock(&self.shared.queue).set_capacity(capacity)?;
        log::debug!("Buffer capacity set to {capacity}.");
        // A larger queue may unblock the worker.
        self.shared.queue_changed.notify_all();
        Ok(())
    }

    /// Returns the number of buffered elements.
    pub fn size(&self) -> usize {
        lock(&self.shared.queue).size()
    }

    /// Returns `true` if no element is buffered.
    pub fn is_empty(&self) -> bool {
        lock(&self.shared.queue).is_empty()
    }

    /// Returns `true` if the queue has reached its capacity.
    pub fn is_full(&self) -> bool {
        lock(&self.shared.queue).is_full()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> BufferState {
        self.shared.state.get()
    }

    /// Returns `true` while the worker thread is alive.
    pub fn running(&self) -> bool {
        self.state().is_running()
    }

    /// Returns `true` while the worker is allowed to produce.
    pub fn buffering(&self) -> bool {
        self.state().is_buffering()
    }

    /// Returns `true` if a spawner has been configured.
    pub fn has_spawner(&self) -> bool {
        lock(&self.shared.spawner).is_some()
    }

    /// Replaces the active spawner.
    ///
    /// The swap waits for an in-flight spawn to finish.
    pub fn set_spawner(&self, spawner: SharedSpawner<T>) {
        *lock(&self.shared.spawner) = Some(spawner);
    }

    /// Removes and returns the active spawner.
    ///
    /// A worker that finds no spawner pauses itself; buffering can only be
    /// resumed after a new spawner is set.
    pub fn take_spawner(&self) -> Option<SharedSpawner<T>> {
        lock(&self.shared.spawner).take()
    }

    /// Starts or resumes buffering.
    ///
    /// The worker thread is started if it is not running yet. Consumers blocked
    /// on an empty buffer are woken.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::MissingSpawner`] if no spawner is configured, or
    /// [`BufferError::ThreadSpawn`] if the worker thread could not be started.
    pub fn start_buffering(&self) -> Result<(), BufferError> {
        if !self.has_spawner() {
            return Err(BufferError::MissingSpawner);
        }

        let previous = self.shared.state.transition(|_| BufferState::Active);
        match previous {
            BufferState::Stopped => {
                if let Err(e) = self.spawn_worker() {
                    self.shared.state.transition(|_| BufferState::Stopped);
                    return Err(e);
                }
                log::debug!("Buffer started.");
            }
            BufferState::Idle => log::debug!("Buffer resumed."),
            BufferState::Active => {}
        }

        self.shared.wake_queue();
        Ok(())
    }

    /// Sets `spawner` and starts buffering.
    pub fn start_buffering_with(&self, spawner: SharedSpawner<T>) -> Result<(), BufferError> {
        self.set_spawner(spawner);
        self.start_buffering()
    }

    /// Pauses production without stopping the worker or clearing the queue.
    pub fn pause(&self) {
        let previous = self.shared.state.transition(|state| match state {
            BufferState::Active => BufferState::Idle,
            other => other,
        });
        if previous == BufferState::Active {
            log::debug!("Buffer paused.");
        }
        // Let a worker blocked on a full queue observe the pause.
        self.shared.wake_queue();
    }

    /// Stops the worker thread, waits for it to exit and clears the queue.
    ///
    /// Consumers blocked on the buffer are woken and fail with
    /// [`BufferError::NotBuffering`].
    pub fn stop(&self) {
        let previous = self.shared.state.transition(|_| BufferState::Stopped);
        self.shared.wake_queue();

        if let Some(handle) = lock(&self.worker).take() {
            if handle.join().is_err() {
                log::error!("Buffer worker thread panicked.");
            }
        }

        lock(&self.shared.queue).clear();
        if previous.is_running() {
            log::debug!("Buffer stopped.");
        }
    }

    /// Removes and returns the oldest element, blocking while the buffer is
    /// empty and buffering.
    pub fn next(&self) -> Result<T, BufferError> {
        let item = self.shared.wait_for_data()?.pop()?;
        self.shared.queue_changed.notify_all();
        Ok(item)
    }

    /// Removes the oldest element, blocking while the buffer is empty and
    /// buffering.
    pub fn pop(&self) -> Result<(), BufferError> {
        self.next().map(drop)
    }

    /// Returns a copy of the oldest element without removing it.
    pub fn peek(&self) -> Result<T, BufferError>
    where
        T: Clone,
    {
        Ok(self.shared.wait_for_data()?.front()?.clone())
    }

    /// Returns a copy of the newest element without removing it.
    pub fn peek_last(&self) -> Result<T, BufferError>
    where
        T: Clone,
    {
        Ok(self.shared.wait_for_data()?.back()?.clone())
    }

    fn spawn_worker(&self) -> Result<(), BufferError> {
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || shared.run())?;
        *lock(&self.worker) = Some(handle);
        Ok(())
    }
}

impl<T: Send + 'static> Default for Buffer<T> {
    fn default() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(RingQueue::default()),
                queue_changed: Condvar::new(),
                spawner: Mutex::new(None),
                state: StateCell::new(),
            }),
            worker: Mutex::new(None),
            thread_name: BufferConfig::default().thread_name,
        }
    }
}

impl<T: Send + 'static> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
