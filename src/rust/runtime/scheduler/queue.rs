// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Implementation of the notification queue: a blocking/non-blocking FIFO deque guarded by a mutex and a condition
//! variable, with an explicit shutdown flag. One of these backs each worker (or all workers, for the shared-queue
//! policy); the non-blocking operations are what placement scattering and work stealing are built from.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::scheduler::task::TaskCell;
use ::std::{
    collections::VecDeque,
    sync::{
        Condvar,
        Mutex,
        MutexGuard,
        PoisonError,
        TryLockError,
    },
};

//======================================================================================================================
// Structures
//======================================================================================================================

/// State guarded by the queue mutex.
struct QueueState {
    /// Pending task cells, in FIFO order.
    cells: VecDeque<TaskCell>,
    /// Shutdown flag. Monotonic: transitions false to true exactly once.
    done: bool,
}

/// Notification Queue
pub struct NotificationQueue {
    /// Guarded queue state.
    state: Mutex<QueueState>,
    /// Signaled when a cell is enqueued or shutdown is requested.
    ready: Condvar,
}

//======================================================================================================================
// Associate Functions
//======================================================================================================================

/// Associate Functions for Notification Queues
impl NotificationQueue {
    /// Instantiates a new, empty queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                cells: VecDeque::new(),
                done: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Acquires the queue lock. No user code ever runs under this lock, so a poisoned mutex cannot hold an
    /// inconsistent deque and the poison marker is discarded.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a cell to the tail of the queue and wakes one waiter. Accepted even after shutdown: the shutdown
    /// flag stops new indefinite waits once the queue drains, it does not forbid enqueueing.
    pub fn push(&self, task: TaskCell) {
        {
            let mut state: MutexGuard<QueueState> = self.lock();
            state.cells.push_back(task);
        }
        self.ready.notify_one();
    }

    /// Non-blocking variant of [push]. If the queue lock is contended, the cell is handed back to the caller
    /// without waiting.
    pub fn try_push(&self, task: TaskCell) -> Result<(), TaskCell> {
        {
            let mut state: MutexGuard<QueueState> = match self.state.try_lock() {
                Ok(state) => state,
                Err(TryLockError::Poisoned(e)) => e.into_inner(),
                Err(TryLockError::WouldBlock) => return Err(task),
            };
            state.cells.push_back(task);
        }
        self.ready.notify_one();
        Ok(())
    }

    /// Removes and returns the cell at the head of the queue, blocking while the queue is empty and not shut down.
    /// Returns None only when the queue is shut down and fully drained.
    pub fn pop(&self) -> Option<TaskCell> {
        let mut state: MutexGuard<QueueState> = self.lock();
        while state.cells.is_empty() && !state.done {
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        state.cells.pop_front()
    }

    /// Non-blocking variant of [pop]. Returns None immediately if the lock is contended or the queue is empty.
    /// This is the stealing primitive, so contention is treated the same as emptiness.
    pub fn try_pop(&self) -> Option<TaskCell> {
        let mut state: MutexGuard<QueueState> = match self.state.try_lock() {
            Ok(state) => state,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        state.cells.pop_front()
    }

    /// Sets the shutdown flag and wakes all waiters. Idempotent. Cells already enqueued remain deliverable.
    pub fn shutdown(&self) {
        {
            let mut state: MutexGuard<QueueState> = self.lock();
            state.done = true;
        }
        self.ready.notify_all();
    }

    /// Returns whether shutdown has been requested on this queue.
    pub fn has_shut_down(&self) -> bool {
        self.lock().done
    }

    /// Returns the number of pending cells. Best-effort: the value may be stale by the time it is observed.
    pub fn len(&self) -> usize {
        self.lock().cells.len()
    }

    /// Returns whether the queue has no pending cells. Best-effort, as [len].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

/// Default Trait Implementation for Notification Queues
impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
