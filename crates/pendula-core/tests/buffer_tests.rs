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

use pendula_core::{spawner, Buffer, BufferConfig, BufferError, BufferState, RingQueue, Spawner};
use std::thread;
use std::time::{Duration, Instant};

/// Yields 1, 2, 3, ...
struct Naturals(u64);

impl Spawner<u64> for Naturals {
    fn spawn(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

fn naturals_buffer(capacity: usize) -> Buffer<u64> {
    Buffer::with_spawner(
        spawner::shared(Naturals(0)),
        BufferConfig {
            capacity,
            ..Default::default()
        },
    )
    .unwrap()
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_pause_rejects_consumers_until_resumed() {
    let buffer = naturals_buffer(16);
    buffer.start_buffering().unwrap();
    assert_eq!(buffer.next().unwrap(), 1);
    wait_until(|| buffer.size() > 2);

    buffer.pause();
    assert!(buffer.size() > 0, "paused buffer keeps its elements");
    assert!(matches!(buffer.next(), Err(BufferError::NotBuffering)));
    assert!(matches!(buffer.peek(), Err(BufferError::NotBuffering)));
    assert!(matches!(buffer.peek_last(), Err(BufferError::NotBuffering)));
    assert!(matches!(buffer.pop(), Err(BufferError::NotBuffering)));

    buffer.start_buffering().unwrap();
    assert_eq!(buffer.state(), BufferState::Active);
    // Resuming continues the stream where it was paused.
    assert_eq!(buffer.next().unwrap(), 2);
    buffer.stop();
}

#[test]
fn test_stop_drains_and_stops_worker() {
    let buffer = naturals_buffer(32);
    buffer.start_buffering().unwrap();
    wait_until(|| buffer.is_full());

    buffer.stop();
    assert_eq!(buffer.size(), 0);
    assert!(!buffer.running());
    assert_eq!(buffer.state(), BufferState::Stopped);
}

#[test]
fn test_stop_while_paused() {
    let buffer = naturals_buffer(4);
    buffer.start_buffering().unwrap();
    buffer.pause();
    buffer.stop();
    assert!(!buffer.running());
    assert!(buffer.is_empty());
}

#[test]
fn test_drop_joins_worker() {
    let buffer = naturals_buffer(4);
    buffer.start_buffering().unwrap();
    wait_until(|| buffer.is_full());
    // Dropping a running buffer must not hang or leak the worker.
    drop(buffer);
}

#[test]
fn test_consumer_on_other_thread_sees_fifo_order() {
    let buffer = std::sync::Arc::new(naturals_buffer(3));
    buffer.start_buffering().unwrap();

    let consumer = {
        let buffer = std::sync::Arc::clone(&buffer);
        thread::spawn(move || (0..100).map(|_| buffer.next().unwrap()).collect::<Vec<_>>())
    };
    let items = consumer.join().unwrap();
    assert_eq!(items, (1..=100).collect::<Vec<_>>());
    buffer.stop();
}

#[test]
fn test_queue_fifo_across_wraparound() {
    let mut queue = RingQueue::new(5).unwrap();
    let mut expected = 0;
    let mut next = 0;
    for round in 0..50 {
        for _ in 0..(round % 5 + 1) {
            if queue.push(next).is_ok() {
                next += 1;
            }
        }
        for _ in 0..(round % 3 + 1) {
            if let Ok(item) = queue.pop() {
                assert_eq!(item, expected);
                expected += 1;
            }
        }
    }
    while let Ok(item) = queue.pop() {
        assert_eq!(item, expected);
        expected += 1;
    }
    assert_eq!(expected, next);
}
