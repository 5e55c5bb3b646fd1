// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use ::std::fmt;

//======================================================================================================================
// Structures
//======================================================================================================================

/// Externally visible task identifier.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct TaskId(pub u64);

/// An owned, type-erased, zero-argument unit of work. A task cell is created by the submission facade, held by
/// exactly one notification queue at a time, and consumed by the worker that pops it. Ownership enforces the
/// invoked-exactly-once contract: running a cell consumes it.
pub struct TaskCell {
    /// Task identifier.
    task_id: TaskId,
    /// Type-erased unit of work. Captured state moves in at submission and is released after invocation.
    thunk: Box<dyn FnOnce() + Send + 'static>,
}

//======================================================================================================================
// Associate Functions
//======================================================================================================================

/// Associate Functions for Task Cells
impl TaskCell {
    /// Instantiates a new task cell.
    pub fn new<F: FnOnce() + Send + 'static>(task_id: TaskId, thunk: F) -> Self {
        Self {
            task_id,
            thunk: Box::new(thunk),
        }
    }

    /// Returns the identifier of this task.
    pub fn id(&self) -> TaskId {
        self.task_id
    }

    /// Invokes the unit of work, consuming the cell.
    pub fn run(self) {
        (self.thunk)()
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<TaskId> for u64 {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

/// Debug Trait Implementation for Task Cells
impl fmt::Debug for TaskCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCell").field("task_id", &self.task_id).finish()
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
