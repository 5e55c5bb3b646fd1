// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod handle;
mod pool;
mod queue;
mod task;

pub mod policy;

//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::{
    handle::TaskHandle,
    pool::{
        current_worker_id,
        TaskPool,
    },
    queue::NotificationQueue,
    task::{
        TaskCell,
        TaskId,
    },
};
