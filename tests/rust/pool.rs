// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use ::anyhow::Result;
use ::std::{
    panic::{
        self,
        AssertUnwindSafe,
    },
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Arc,
        Mutex,
    },
};
use ::taskpool::{
    current_worker_id,
    runtime::logging,
    PoolConfig,
    TaskHandle,
    TaskPool,
};

//======================================================================================================================
// Exactly-Once Delivery
//======================================================================================================================

/// Submits 1000 increments of a shared counter to a work-stealing pool of 4 workers. After every handle is
/// retrieved the counter must equal 1000: no task was dropped and none ran twice.
#[test]
fn every_submitted_task_runs_exactly_once() -> Result<()> {
    logging::initialize();
    const NTASKS: usize = 1000;

    let pool: TaskPool = TaskPool::work_stealing(PoolConfig::with_workers(4))?;
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    let handles: Vec<TaskHandle<()>> = (0..NTASKS)
        .map(|_| {
            let counter_: Arc<AtomicUsize> = counter.clone();
            pool.submit(move || {
                counter_.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    for handle in handles {
        handle.get();
    }

    taskpool::ensure_eq!(counter.load(Ordering::SeqCst), NTASKS);

    Ok(())
}

//======================================================================================================================
// Round-Robin Placement
//======================================================================================================================

/// With the round-robin policy each worker drains only its own queue, so task i must execute on worker i % 4.
#[test]
fn round_robin_binds_task_to_worker_by_submission_order() -> Result<()> {
    logging::initialize();
    const NWORKERS: usize = 4;
    const NTASKS: usize = 8;

    let pool: TaskPool = TaskPool::round_robin(PoolConfig::with_workers(NWORKERS))?;

    let handles: Vec<TaskHandle<usize>> = (0..NTASKS)
        .map(|_| pool.submit(|| current_worker_id().expect("task must run on a worker thread")))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        taskpool::ensure_eq!(handle.get(), i % NWORKERS);
    }

    Ok(())
}

//======================================================================================================================
// FIFO Order
//======================================================================================================================

/// A single worker on a shared queue executes tasks in exact submission order.
#[test]
fn single_worker_executes_in_submission_order() -> Result<()> {
    logging::initialize();
    const NTASKS: u64 = 16;

    let pool: TaskPool = TaskPool::shared(PoolConfig::with_workers(1))?;
    let order: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));

    for i in 0..NTASKS {
        let order_: Arc<Mutex<Vec<u64>>> = order.clone();
        let _ = pool.submit(move || order_.lock().unwrap().push(i));
    }
    drop(pool);

    let observed: Vec<u64> = order.lock().unwrap().clone();
    taskpool::ensure_eq!(observed, (0..NTASKS).collect::<Vec<u64>>());

    Ok(())
}

//======================================================================================================================
// Drain On Shutdown
//======================================================================================================================

/// Tasks enqueued before shutdown are still executed before the workers exit: shutdown drains, it does not cancel.
#[test]
fn shutdown_drains_pending_tasks() -> Result<()> {
    logging::initialize();
    const NTASKS: usize = 100;

    let pool: TaskPool = TaskPool::round_robin(PoolConfig::with_workers(4))?;
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    for _ in 0..NTASKS {
        let counter_: Arc<AtomicUsize> = counter.clone();
        let _ = pool.submit(move || {
            counter_.fetch_add(1, Ordering::SeqCst);
        });
    }
    drop(pool);

    taskpool::ensure_eq!(counter.load(Ordering::SeqCst), NTASKS);

    Ok(())
}

//======================================================================================================================
// Failure Propagation
//======================================================================================================================

/// A panicking task body surfaces on the handle, and only there: other tasks in the same pool are unaffected and
/// the pool keeps accepting work.
#[test]
fn task_failure_surfaces_on_the_handle_only() -> Result<()> {
    logging::initialize();

    let pool: TaskPool = TaskPool::work_stealing(PoolConfig::with_workers(2))?;

    let bad: TaskHandle<()> = pool.submit(|| panic!("task failure"));
    let good: TaskHandle<usize> = pool.submit(|| 7);

    taskpool::ensure_eq!(good.get(), 7);
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || bad.get()));
    taskpool::ensure_eq!(outcome.is_err(), true);

    // The failed task must not have poisoned the pool.
    taskpool::ensure_eq!(pool.submit(|| 11).get(), 11);

    Ok(())
}

//======================================================================================================================
// Configuration
//======================================================================================================================

/// The caller-reserving configuration is valid for every policy, including on single-core hosts.
#[test]
fn reserving_caller_config_constructs_a_working_pool() -> Result<()> {
    logging::initialize();

    let pool: TaskPool = TaskPool::shared(PoolConfig::reserving_caller())?;
    taskpool::ensure_eq!(pool.submit(|| "done").get(), "done");

    Ok(())
}
