// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Implementation of the worker pool: owns the fixed set of OS worker threads and the notification queue(s), and
//! exposes the submission entry point. The pool lifecycle guarantees that shutdown signals every queue and joins
//! every worker before the pool is released, so no task outlives its pool and no thread is leaked.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::{
    config::PoolConfig,
    fail::Fail,
    scheduler::{
        handle::TaskHandle,
        policy::{
            Policy,
            RoundRobin,
            SharedQueue,
            WorkStealing,
        },
        queue::NotificationQueue,
        task::{
            TaskCell,
            TaskId,
        },
    },
};
use ::std::{
    cell::Cell,
    panic::{
        self,
        AssertUnwindSafe,
    },
    sync::{
        atomic::{
            AtomicU64,
            Ordering,
        },
        Arc,
    },
    thread,
};

//======================================================================================================================
// Thread Local Variables
//======================================================================================================================

thread_local! {
    /// Index of the worker running on this thread, if any.
    static CURRENT_WORKER: Cell<Option<usize>> = const { Cell::new(None) };
}

//======================================================================================================================
// Structures
//======================================================================================================================

/// State shared between the pool facade and its workers.
struct Inner {
    /// Notification queues. One for the shared-queue policy, one per worker for the multiqueue policies.
    queues: Box<[NotificationQueue]>,
    /// Placement/retrieval algorithm.
    policy: Box<dyn Policy>,
    /// Source of task identifiers.
    next_task_id: AtomicU64,
}

/// Task Pool
pub struct TaskPool {
    /// Shared pool state.
    inner: Arc<Inner>,
    /// Worker threads. Drained on shutdown; empty means the pool has already shut down.
    workers: Vec<thread::JoinHandle<()>>,
    /// Number of workers originally spawned.
    nworkers: usize,
}

//======================================================================================================================
// Associate Functions
//======================================================================================================================

/// Associate Functions for Task Pools
impl TaskPool {
    /// Instantiates a pool running the given scheduling policy. Spawning fewer workers than configured is a
    /// contract violation, so a thread-spawn failure tears down whatever was already running and surfaces the
    /// error.
    pub fn new<P: Policy>(policy: P, config: PoolConfig) -> Result<Self, Fail> {
        let nworkers: usize = config.nworkers();
        if nworkers == 0 {
            let cause: &str = "worker count must be positive";
            error!("new(): {}", cause);
            return Err(Fail::new(libc::EINVAL, cause));
        }

        let nqueues: usize = policy.queue_count(nworkers);
        let queues: Box<[NotificationQueue]> = (0..nqueues).map(|_| NotificationQueue::new()).collect();
        let inner: Arc<Inner> = Arc::new(Inner {
            queues,
            policy: Box::new(policy),
            next_task_id: AtomicU64::new(0),
        });

        let mut workers: Vec<thread::JoinHandle<()>> = Vec::with_capacity(nworkers);
        for worker_id in 0..nworkers {
            let inner_: Arc<Inner> = inner.clone();
            let builder: thread::Builder =
                thread::Builder::new().name(format!("{}-worker-{}", inner.policy.name(), worker_id));
            match builder.spawn(move || Self::run(inner_, worker_id)) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Tear down the partially-constructed pool before reporting the failure.
                    for queue in inner.queues.iter() {
                        queue.shutdown();
                    }
                    for worker in workers.drain(..) {
                        let _ = worker.join();
                    }
                    let fail: Fail = Fail::from(e);
                    error!("new(): failed to spawn worker {}: {:?}", worker_id, fail);
                    return Err(fail);
                },
            }
        }

        debug!(
            "new(): policy={}, nworkers={}, nqueues={}",
            inner.policy.name(),
            nworkers,
            nqueues
        );
        Ok(Self {
            inner,
            workers,
            nworkers,
        })
    }

    /// Instantiates a pool with one FIFO queue serving all workers.
    pub fn shared(config: PoolConfig) -> Result<Self, Fail> {
        Self::new(SharedQueue, config)
    }

    /// Instantiates a pool with one queue per worker and rotating submission.
    pub fn round_robin(config: PoolConfig) -> Result<Self, Fail> {
        Self::new(RoundRobin::default(), config)
    }

    /// Instantiates a pool with one queue per worker, scattered submission, and stealing workers.
    pub fn work_stealing(config: PoolConfig) -> Result<Self, Fail> {
        Self::new(WorkStealing::default(), config)
    }

    /// Submission facade: wraps an arbitrary zero-argument callable into a task cell, places the cell according to
    /// the pool's policy, and returns a handle to the eventual result. Returns immediately; it never waits for the
    /// task to complete, only possibly on placement contention. A panic inside the callable is captured into the
    /// handle and resumed when the result is retrieved.
    pub fn submit<F, T>(&self, f: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let task_id: TaskId = TaskId::from(self.inner.next_task_id.fetch_add(1, Ordering::Relaxed));
        let (result_tx, result_rx) = crossbeam_channel::bounded(1);
        let cell: TaskCell = TaskCell::new(task_id, move || {
            let result: thread::Result<T> = panic::catch_unwind(AssertUnwindSafe(f));
            // The submitting side may have dropped the handle; the outcome is discarded in that case.
            let _ = result_tx.send(result);
        });
        trace!("submit(): task={:?}", task_id);
        self.inner.policy.place(&self.inner.queues, cell);
        TaskHandle::new(task_id, result_rx)
    }

    /// Returns the number of worker threads.
    pub fn nworkers(&self) -> usize {
        self.nworkers
    }

    /// Returns the name of the scheduling policy.
    pub fn policy_name(&self) -> &'static str {
        self.inner.policy.name()
    }

    /// Signals shutdown on every queue, releasing all blocked retrieval waits, then joins every worker thread.
    /// Tasks already enqueued are drained, not cancelled. Idempotent; also invoked on drop.
    pub fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        debug!("shutdown(): policy={}, joining {} workers", self.policy_name(), self.workers.len());
        for queue in self.inner.queues.iter() {
            queue.shutdown();
        }
        for worker in self.workers.drain(..) {
            // Workers catch task-body panics, so a panicked worker indicates a scheduler bug.
            if worker.join().is_err() {
                warn!("shutdown(): worker thread panicked");
            }
        }
    }

    /// Worker loop. Bound to one queue index for its whole life; exits when the policy reports shutdown.
    fn run(inner: Arc<Inner>, worker_id: usize) {
        CURRENT_WORKER.with(|worker| worker.set(Some(worker_id)));
        trace!("run(): worker {} up", worker_id);
        while let Some(task) = inner.policy.obtain(&inner.queues, worker_id) {
            trace!("run(): worker {} running task {:?}", worker_id, task.id());
            task.run();
        }
        trace!("run(): worker {} drained, exiting", worker_id);
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

/// Drop Trait Implementation for Task Pools
impl Drop for TaskPool {
    /// Shutting down before release is the only path by which a pool may be dropped; this guarantees no task
    /// outlives its pool.
    fn drop(&mut self) {
        self.shutdown();
    }
}

//======================================================================================================================
// Standalone Functions
//======================================================================================================================

/// Returns the index of the worker running on the calling thread, or None when called off the pool.
pub fn current_worker_id() -> Option<usize> {
    CURRENT_WORKER.with(|worker| worker.get())
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
