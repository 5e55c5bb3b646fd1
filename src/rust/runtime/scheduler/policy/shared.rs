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

//======================================================================================================================
// Structures
//======================================================================================================================

/// Shared-Queue Policy
///
/// One FIFO queue serves all workers. Submission always does a blocking push and every worker blocks on the same
/// queue. Simplest of the policies, but the single mutex is a serialization point under high submission rates.
#[derive(Default)]
pub struct SharedQueue;

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl Policy for SharedQueue {
    fn name(&self) -> &'static str {
        "shared-queue"
    }

    fn queue_count(&self, _nworkers: usize) -> usize {
        1
    }

    fn place(&self, queues: &[NotificationQueue], task: TaskCell) {
        queues[0].push(task);
    }

    fn obtain(&self, queues: &[NotificationQueue], _worker_id: usize) -> Option<TaskCell> {
        queues[0].pop()
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
