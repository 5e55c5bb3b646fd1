// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

pub mod config;
pub mod fail;
pub mod logging;
pub mod scheduler;

//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::{
    config::PoolConfig,
    fail::Fail,
};
