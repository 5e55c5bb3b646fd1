// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use ::anyhow::Result;
use ::rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};
use ::std::{
    hint,
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Arc,
    },
    thread,
    time::{
        Duration,
        Instant,
    },
};
use ::taskpool::{
    runtime::logging,
    PoolConfig,
    TaskHandle,
    TaskPool,
};

//======================================================================================================================
// Work-Stealing Balance
//======================================================================================================================

/// With one worker pinned on an artificially slow task, idle workers must steal and complete a batch of short
/// tasks without waiting for the slow one. A short task parked on the pinned worker's queue is only rescued when
/// another worker wakes and makes a stealing pass, so the test keeps submitting no-op nudges until the batch
/// drains.
#[test]
fn short_tasks_overtake_a_blocked_worker() -> Result<()> {
    logging::initialize();
    const NSHORT: usize = 64;

    let pool: TaskPool = TaskPool::work_stealing(PoolConfig::with_workers(4))?;
    let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(1);

    let slow: TaskHandle<()> = pool.submit(move || {
        let _ = release_rx.recv();
    });

    let ncompleted: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let shorts: Vec<TaskHandle<()>> = (0..NSHORT)
        .map(|_| {
            let ncompleted_: Arc<AtomicUsize> = ncompleted.clone();
            pool.submit(move || {
                ncompleted_.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    let deadline: Instant = Instant::now() + Duration::from_secs(10);
    while ncompleted.load(Ordering::SeqCst) < NSHORT {
        if Instant::now() >= deadline {
            anyhow::bail!("short tasks did not complete while the slow task was blocked");
        }
        let _ = pool.submit(|| ());
        thread::sleep(Duration::from_millis(1));
    }

    // Every short task finished while the slow one was still held.
    taskpool::ensure_eq!(slow.has_completed(), false);

    release_tx.send(())?;
    slow.get();
    for handle in shorts {
        handle.get();
    }

    Ok(())
}

//======================================================================================================================
// No Lost Tasks Under Contention
//======================================================================================================================

/// Several threads submit concurrently while workers steal from each other. Every task must run exactly once:
/// the execution counter has to match the number of submissions, and every handle must deliver.
#[test]
fn no_tasks_are_lost_or_duplicated_under_contention() -> Result<()> {
    logging::initialize();
    const NSUBMITTERS: u64 = 4;
    const NTASKS_PER_SUBMITTER: usize = 256;

    let pool: TaskPool = TaskPool::work_stealing(PoolConfig::with_workers(4))?;
    let nexecuted: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    thread::scope(|scope| {
        for submitter in 0..NSUBMITTERS {
            let pool: &TaskPool = &pool;
            let nexecuted: Arc<AtomicUsize> = nexecuted.clone();
            scope.spawn(move || {
                let mut rng: SmallRng = SmallRng::seed_from_u64(submitter);
                let mut handles: Vec<TaskHandle<()>> = Vec::with_capacity(NTASKS_PER_SUBMITTER);
                for _ in 0..NTASKS_PER_SUBMITTER {
                    // Jitter the task durations so queue depths skew and stealing actually triggers.
                    let nspins: u64 = rng.gen_range(0..256);
                    let nexecuted_: Arc<AtomicUsize> = nexecuted.clone();
                    handles.push(pool.submit(move || {
                        for _ in 0..nspins {
                            hint::spin_loop();
                        }
                        nexecuted_.fetch_add(1, Ordering::SeqCst);
                    }));
                }
                for handle in handles {
                    handle.get();
                }
            });
        }
    });

    taskpool::ensure_eq!(
        nexecuted.load(Ordering::SeqCst),
        (NSUBMITTERS as usize) * NTASKS_PER_SUBMITTER
    );

    Ok(())
}
