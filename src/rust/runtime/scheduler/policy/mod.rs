// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Scheduling policies. A policy decides which notification queue a submitted task cell enters (placement) and
//! which queue a worker retrieves from (retrieval). All policies share one worker-loop shape: retrieve and run
//! until retrieval reports shutdown.

mod round_robin;
mod shared;
mod work_stealing;

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::scheduler::{
    queue::NotificationQueue,
    task::TaskCell,
};

//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::{
    round_robin::RoundRobin,
    shared::SharedQueue,
    work_stealing::WorkStealing,
};

//======================================================================================================================
// Traits
//======================================================================================================================

/// Scheduling Policy
///
/// The placement/retrieval algorithm layered on one or more notification queues. Implementations keep only
/// lock-free shared state (atomic counters); all blocking happens inside the queues themselves.
pub trait Policy: Send + Sync + 'static {
    /// Returns the name of this policy, for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the number of queues this policy requires for a pool of `nworkers` workers.
    fn queue_count(&self, nworkers: usize) -> usize;

    /// Places a task cell into one of the queues. May block on placement contention, never on task completion.
    fn place(&self, queues: &[NotificationQueue], task: TaskCell);

    /// Retrieves the next task cell for worker `worker_id`, blocking until one is available. Returns None when
    /// the worker should shut down: its sources are drained and the shutdown flag is set.
    fn obtain(&self, queues: &[NotificationQueue], worker_id: usize) -> Option<TaskCell>;
}
