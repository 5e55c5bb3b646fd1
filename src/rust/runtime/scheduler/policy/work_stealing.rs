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
// Constants
//======================================================================================================================

/// Number of non-blocking placement attempts per queue before falling back to a blocking push. With N queues,
/// submission cycles over candidate queues up to K*N times, which spreads contention under bursty load while
/// keeping the retry bound finite.
const K: usize = 48;

//======================================================================================================================
// Structures
//======================================================================================================================

/// Work-Stealing Multiqueue Policy
///
/// One queue per worker. Submission scatters cells with non-blocking pushes, starting at a rotating index, so a
/// contended queue is simply skipped. Retrieval makes idle workers steal from every peer before blocking on their
/// own queue, so skewed workloads are actively rebalanced instead of starving a backlogged peer.
#[derive(Default)]
pub struct WorkStealing {
    /// Rotating submission index. Wraps on overflow, which preserves the rotation.
    index: AtomicUsize,
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl Policy for WorkStealing {
    fn name(&self) -> &'static str {
        "work-stealing"
    }

    fn queue_count(&self, nworkers: usize) -> usize {
        nworkers
    }

    /// Attempts a non-blocking push on up to K*N queues, cycling from the rotating index. If every attempt fails,
    /// falls back to a blocking push on the queue at the original rotating index, guaranteeing forward progress
    /// without unbounded retry.
    fn place(&self, queues: &[NotificationQueue], task: TaskCell) {
        let nqueues: usize = queues.len();
        let origin: usize = self.index.fetch_add(1, Ordering::Relaxed);
        let mut task: TaskCell = task;
        for n in 0..nqueues * K {
            match queues[(origin.wrapping_add(n)) % nqueues].try_push(task) {
                Ok(()) => return,
                Err(rejected) => task = rejected,
            }
        }
        trace!("place(): all try_push attempts contended, falling back to blocking push");
        queues[origin % nqueues].push(task);
    }

    /// Makes one non-blocking pass over every peer queue in rotation order; the first successful steal wins. If no
    /// peer yields work, falls back to a blocking pop on the worker's own queue, so a worker only blocks once it
    /// has exhausted both its own queue and every peer.
    fn obtain(&self, queues: &[NotificationQueue], worker_id: usize) -> Option<TaskCell> {
        let nqueues: usize = queues.len();
        for n in 1..nqueues {
            if let Some(task) = queues[(worker_id + n) % nqueues].try_pop() {
                trace!(
                    "obtain(): worker {} stole task {:?} from queue {}",
                    worker_id,
                    task.id(),
                    (worker_id + n) % nqueues
                );
                return Some(task);
            }
        }
        queues[worker_id].pop()
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
