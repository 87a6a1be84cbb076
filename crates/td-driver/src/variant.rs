// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! `DriverVariant`: the capability set that distinguishes one driver
//! implementation from another (spec §4.7, §9 "Replacing the source's
//! inheritance-per-driver duplication"). `Driver<V>` is generic over this
//! trait; concrete variants live in `td-variants`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use td_core::{DriverCapabilities, DriverError, FingerprintRecord, TaskSpec};
use td_executor::ExecutorClient;
use td_wire::ReattachDescriptor;

/// Binary, argv and extra environment a variant contributes to an
/// `ExecCommand`; the launch orchestrator fills in everything else (mounts,
/// devices, isolation parameters) from the task spec and isolation plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInvocation {
    pub binary: String,
    pub argv: Vec<String>,
    pub extra_env: Vec<(String, String)>,
}

/// A concrete driver implementation: generic exec, JVM, VM-image, or the
/// synthetic mock. Everything else in §4.1-§4.6 is shared.
#[async_trait]
pub trait DriverVariant: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Static descriptor returned by the `Capabilities` RPC.
    fn capability_descriptor(&self) -> DriverCapabilities;

    /// Assembles the binary/argv/env this variant launches the task with.
    fn build_invocation(&self, spec: &TaskSpec) -> CommandInvocation;

    /// Variant-specific task-config checks beyond the generic schema (e.g.
    /// "jar path or class required" for JVM, "image path must be
    /// allow-listed" for VM). Returns `InvalidConfig` on rejection.
    fn extra_task_validation(&self, spec: &TaskSpec) -> Result<(), DriverError>;

    /// Validates a `SetConfig` payload against this variant's plugin-config
    /// shape. Called before the payload is committed, never after: a
    /// rejected payload never replaces the active configuration.
    fn validate_plugin_config(&self, payload: &serde_json::Value) -> Result<(), DriverError>;

    /// Runs one fingerprint probe (spec §4.6); differs per variant.
    async fn fingerprint_probe(&self) -> FingerprintRecord;

    /// Constructs a fresh, unlaunched executor client for a task whose
    /// on-disk state lives under `task_dir`.
    fn new_executor(&self, task_dir: &Path) -> Arc<dyn ExecutorClient>;

    /// Reattaches to an already-running executor from a persisted
    /// descriptor (`RecoverTask`). Fails if the executor is no longer
    /// reachable.
    async fn reattach_executor(&self, task_dir: &Path, descriptor: &ReattachDescriptor) -> Result<Arc<dyn ExecutorClient>, DriverError>;
}
