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

//! The [`Spawner`] capability: anything that can produce the next element of a
//! stream on demand.

use std::sync::{Arc, Mutex};

/// Produces the next element of a stream from its own internal state.
pub trait Spawner<T> {
    /// Produces one element.
    fn spawn(&mut self) -> T;
}

/// A spawner shared between its owner and the [`Buffer`](crate::Buffer) worker
/// thread that drives it.
pub type SharedSpawner<T> = Arc<Mutex<dyn Spawner<T> + Send>>;

impl<T, F> Spawner<T> for F
where
    F: FnMut() -> T,
{
    fn spawn(&mut self) -> T {
        self()
    }
}

/// Wraps `spawner` into a [`SharedSpawner`].
pub fn shared<T, S>(spawner: S) -> SharedSpawner<T>
where
    S: Spawner<T> + Send + 'static,
{
    Arc::new(Mutex::new(spawner))
}
