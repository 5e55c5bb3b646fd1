// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::fail::Fail;
use ::std::{
    env,
    thread,
};

//======================================================================================================================
// Constants
//======================================================================================================================

/// Environment variable overriding the number of worker threads.
const ENV_NWORKERS: &str = "TASKPOOL_NWORKERS";

//======================================================================================================================
// Structures
//======================================================================================================================

/// Pool Configuration
#[derive(Clone, Copy, Debug)]
pub struct PoolConfig {
    /// Number of worker threads to spawn.
    nworkers: usize,
}

//======================================================================================================================
// Associate Functions
//======================================================================================================================

/// Associate Functions for Pool Configurations
impl PoolConfig {
    /// Creates a configuration with an explicit worker count. The count is validated at pool construction time.
    pub fn with_workers(nworkers: usize) -> Self {
        Self { nworkers }
    }

    /// Creates a configuration sized to the hardware concurrency minus one, leaving the calling thread free. This is
    /// the conventional sizing for the shared-queue policy, where the submitting thread competes for the same lock.
    pub fn reserving_caller() -> Self {
        Self {
            nworkers: hardware_concurrency().saturating_sub(1).max(1),
        }
    }

    /// Creates a configuration from the environment, falling back to hardware concurrency when unset.
    pub fn from_env() -> Result<Self, Fail> {
        match env::var(ENV_NWORKERS) {
            Ok(value) => match value.parse::<usize>() {
                Ok(nworkers) if nworkers > 0 => Ok(Self { nworkers }),
                _ => {
                    let cause: String = format!("invalid {}: {:?}", ENV_NWORKERS, value);
                    error!("from_env(): {}", &cause);
                    Err(Fail::new(libc::EINVAL, &cause))
                },
            },
            Err(_) => Ok(Self::default()),
        }
    }

    /// Returns the configured number of worker threads.
    pub fn nworkers(&self) -> usize {
        self.nworkers
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

/// Default Trait Implementation for Pool Configurations
impl Default for PoolConfig {
    /// Sizes the pool to the available hardware concurrency.
    fn default() -> Self {
        Self {
            nworkers: hardware_concurrency(),
        }
    }
}

//======================================================================================================================
// Standalone Functions
//======================================================================================================================

/// Returns the available hardware concurrency, or 1 if it cannot be queried.
fn hardware_concurrency() -> usize {
    thread::available_parallelism().map(usize::from).unwrap_or(1)
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
