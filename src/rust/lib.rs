// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

#![cfg_attr(feature = "strict", deny(warnings))]
#![deny(clippy::all)]

#[macro_use]
extern crate log;

pub mod runtime;

//======================================================================================================================
// Exports
//======================================================================================================================

pub use crate::runtime::{
    config::PoolConfig,
    fail::Fail,
    scheduler::{
        current_worker_id,
        policy::{
            Policy,
            RoundRobin,
            SharedQueue,
            WorkStealing,
        },
        NotificationQueue,
        TaskCell,
        TaskHandle,
        TaskId,
        TaskPool,
    },
};

//======================================================================================================================
// Macros
//======================================================================================================================

/// Ensures that two expressions are equal, otherwise returns an [anyhow::Error].
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr $(,)?) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    ::anyhow::bail!(
                        "ensure_eq!({}, {}) failed, left: `{:?}`, right: `{:?}`",
                        stringify!($left),
                        stringify!($right),
                        left_val,
                        right_val,
                    );
                }
            },
        }
    }};
}

/// Ensures that two expressions are not equal, otherwise returns an [anyhow::Error].
#[macro_export]
macro_rules! ensure_neq {
    ($left:expr, $right:expr $(,)?) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if *left_val == *right_val {
                    ::anyhow::bail!(
                        "ensure_neq!({}, {}) failed, left: `{:?}`, right: `{:?}`",
                        stringify!($left),
                        stringify!($right),
                        left_val,
                        right_val,
                    );
                }
            },
        }
    }};
}
