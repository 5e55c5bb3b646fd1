// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::scheduler::{
    policy::Policy,
    queue::NotificationQueue,
    task::TaskCell,
};
use ::std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

//======================================================================================================================
// Structures
//======================================================================================================================

/// Round-Robin Multiqueue Policy
///
/// One queue per worker. Submission rotates over the queues with a shared monotonic counter, so the n-th submitted
/// task lands on queue `n % nworkers`. Each worker blocks exclusively on its own queue and never looks at others:
/// submission distribution is perfectly even, but there is no runtime load balancing if task durations are skewed.
#[derive(Default)]
pub struct RoundRobin {
    /// Rotating submission counter. Wraps on overflow, which preserves the rotation.
    next: AtomicUsize,
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn queue_count(&self, nworkers: usize) -> usize {
        nworkers
    }

    fn place(&self, queues: &[NotificationQueue], task: TaskCell) {
        let index: usize = self.next.fetch_add(1, Ordering::Relaxed) % queues.len();
        queues[index].push(task);
    }

    fn obtain(&self, queues: &[NotificationQueue], worker_id: usize) -> Option<TaskCell> {
        queues[worker_id].pop()
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
