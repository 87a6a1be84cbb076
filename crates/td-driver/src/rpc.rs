// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! `ControlPlane`: the driver frame's full RPC surface (spec §4.1/§6), as a
//! Rust trait rather than wire DTOs — those live in `td-wire::{Request,
//! Response}`. A transport adapter translates one onto the other; this
//! trait is what `Driver<V>` implements.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use td_core::{DriverCapabilities, DriverError, ExitResult, FingerprintRecord, TaskId, TaskSpec};
use td_wire::{ExecResult, PluginDescriptor, StatsSample, TaskHandleBlob, TaskSnapshot};

use crate::events::TaskEvent;

/// Caller-supplied duplex byte stream for `exec_task_streaming_raw`. The
/// executor's own streaming contract defines how stdin/stdout/stderr are
/// multiplexed across it; the driver only forwards bytes.
pub trait DuplexStream: AsyncRead + AsyncWrite + Send + Unpin {}
impl<T: AsyncRead + AsyncWrite + Send + Unpin> DuplexStream for T {}

#[async_trait]
pub trait ControlPlane: Send + Sync + 'static {
    fn plugin_info(&self) -> PluginDescriptor;

    fn config_schema(&self) -> serde_json::Value;

    fn task_config_schema(&self) -> serde_json::Value;

    /// Validates `payload` and, on success, atomically replaces the held
    /// plugin configuration. Applies to subsequent `start_task` calls only.
    async fn set_config(&self, payload: serde_json::Value) -> Result<(), DriverError>;

    fn capabilities(&self) -> DriverCapabilities;

    /// A live view of the fingerprint cache. The returned receiver already
    /// holds the most recent record; dropping it ends the subscription
    /// with no side effects.
    fn fingerprint(&self) -> watch::Receiver<FingerprintRecord>;

    async fn start_task(&self, spec: TaskSpec) -> Result<TaskHandleBlob, DriverError>;

    /// Idempotent: if a handle already exists for the blob's task ID,
    /// returns success without reattaching again.
    async fn recover_task(&self, blob: TaskHandleBlob) -> Result<(), DriverError>;

    /// Blocks until the task terminates, or `cancel` fires first (returns
    /// `None` in that case). Safe to call concurrently for the same ID.
    async fn wait_task(&self, id: TaskId, cancel: CancellationToken) -> Option<ExitResult>;

    async fn stop_task(&self, id: TaskId, timeout: Duration, signal: &str) -> Result<(), DriverError>;

    async fn destroy_task(&self, id: TaskId, force: bool) -> Result<(), DriverError>;

    async fn inspect_task(&self, id: TaskId) -> Result<TaskSnapshot, DriverError>;

    /// A bounded channel of resource-usage samples, sampled every
    /// `interval` until `cancel` fires or the channel is dropped.
    fn task_stats(&self, id: TaskId, interval: Duration, cancel: CancellationToken) -> Result<mpsc::Receiver<StatsSample>, DriverError>;

    /// Registers for `id`'s lifecycle events; the returned channel receives
    /// everything published from this point on, closing when `cancel`
    /// fires (spec §4.5). Detaching a subscriber never touches the task.
    fn subscribe_events(&self, id: TaskId, cancel: CancellationToken) -> mpsc::Receiver<TaskEvent>;

    async fn signal_task(&self, id: TaskId, signal: &str) -> Result<(), DriverError>;

    /// Fails `NotSupported` if the driver's capability descriptor disables
    /// Exec.
    async fn exec_task(&self, id: TaskId, argv: Vec<String>, deadline: Duration) -> Result<ExecResult, DriverError>;

    async fn exec_task_streaming_raw(
        &self,
        id: TaskId,
        argv: Vec<String>,
        tty: bool,
        stream: Box<dyn DuplexStream>,
    ) -> Result<(), DriverError>;

    /// Cancels the driver's top-level cancellation token; fingerprint and
    /// supervision loops observe it and terminate. Does not touch already
    /// running workloads.
    fn shutdown(&self);
}
