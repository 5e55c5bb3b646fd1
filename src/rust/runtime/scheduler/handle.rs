// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::scheduler::task::TaskId;
use ::crossbeam_channel::Receiver;
use ::std::{
    panic,
    thread,
};

//======================================================================================================================
// Structures
//======================================================================================================================

/// Task Handle
///
/// The caller-visible side of a one-shot result channel. The worker that runs the task writes the outcome exactly
/// once; the handle reads it, blocking until written. Dropping the handle discards the outcome without affecting
/// the task itself.
pub struct TaskHandle<T> {
    /// Identifier of the task this handle refers to.
    task_id: TaskId,
    /// Receiving side of the one-shot result channel.
    result: Receiver<thread::Result<T>>,
}

//======================================================================================================================
// Associate Functions
//======================================================================================================================

/// Associate Functions for Task Handles
impl<T> TaskHandle<T> {
    /// Instantiates a new task handle.
    pub(crate) fn new(task_id: TaskId, result: Receiver<thread::Result<T>>) -> Self {
        Self { task_id, result }
    }

    /// Returns the identifier of the task this handle refers to.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns whether the task has completed, without blocking.
    pub fn has_completed(&self) -> bool {
        !self.result.is_empty()
    }

    /// Blocks until the task completes and returns its value. If the task body panicked, the panic is resumed on
    /// the calling thread.
    pub fn get(self) -> T {
        // The pool joins all workers before releasing its queues, and the result is buffered inside the channel,
        // so the sender being gone without a buffered outcome cannot happen once a task has been placed.
        match self
            .result
            .recv()
            .expect("worker dropped the result channel without completing the task")
        {
            Ok(value) => value,
            Err(cause) => panic::resume_unwind(cause),
        }
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
