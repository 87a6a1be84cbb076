// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Error taxonomy surfaced to the control plane (spec §7).

use thiserror::Error;

/// Errors returned from the driver's control-plane surface.
///
/// Every RPC handler in `td-driver` returns `Result<T, DriverError>`; the
/// control-plane transport is responsible for mapping these onto its own
/// wire error codes.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("task already started: {0}")]
    AlreadyStarted(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("launch failed: {0}")]
    LaunchFailed(String),

    #[error("executor spawned but handle could not be persisted: {0}")]
    StatePersistFailed(String),

    #[error("recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("shutdown failed, executor still alive: {0}")]
    ShutdownFailed(String),

    #[error("task {0} is running; pass force=true to destroy it")]
    TaskRunning(String),

    #[error("operation not supported by this driver: {0}")]
    NotSupported(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("driver is shutting down")]
    PluginShutdown,
}

impl DriverError {
    /// Stable machine-readable tag, independent of the message text.
    ///
    /// Useful for control-plane transports that want to map errors onto
    /// their own status codes without string-matching `Display` output.
    pub fn kind(&self) -> &'static str {
        match self {
            DriverError::TaskNotFound(_) => "task_not_found",
            DriverError::AlreadyStarted(_) => "already_started",
            DriverError::InvalidConfig(_) => "invalid_config",
            DriverError::LaunchFailed(_) => "launch_failed",
            DriverError::StatePersistFailed(_) => "state_persist_failed",
            DriverError::RecoveryFailed(_) => "recovery_failed",
            DriverError::ShutdownFailed(_) => "shutdown_failed",
            DriverError::TaskRunning(_) => "task_running",
            DriverError::NotSupported(_) => "not_supported",
            DriverError::DeadlineExceeded => "deadline_exceeded",
            DriverError::PluginShutdown => "plugin_shutdown",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
