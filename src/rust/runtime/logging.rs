// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use ::flexi_logger::{
    Logger,
    LoggerHandle,
};
use ::std::sync::OnceLock;

//======================================================================================================================
// Static Variables
//======================================================================================================================

/// Handle to the logger. Held for the lifetime of the process: dropping it would shut logging down.
static LOG_HANDLE: OnceLock<Option<LoggerHandle>> = OnceLock::new();

//======================================================================================================================
// Standalone Functions
//======================================================================================================================

/// Initializes logging features. Log levels are driven by the RUST_LOG environment variable.
pub fn initialize() {
    let _ = LOG_HANDLE.get_or_init(|| match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger.start().ok(),
        Err(_) => None,
    });
}
