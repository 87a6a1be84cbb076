// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! `Driver<V>`: the per-driver object that ties the registry, event bus,
//! fingerprint engine and launch orchestrator together behind the
//! `ControlPlane` surface (spec §4.1).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::Signal;
use parking_lot::RwLock;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use td_core::signal::translate;
use td_core::{Clock, DriverCapabilities, DriverError, ExitResult, FingerprintRecord, TaskId, TaskSpec, TaskState};
use td_executor::ExecutorError;
use td_wire::{ExecResult, PluginDescriptor, StatsSample, TaskHandleBlob, TaskSnapshot};

use crate::events::{EventBus, TaskEvent, TaskEventKind};
use crate::fingerprint::{FingerprintEngine, DEFAULT_FINGERPRINT_INTERVAL};
use crate::handle::SupervisionHandle;
use crate::handle_store::HandleStore;
use crate::launch::{self, LaunchConfig};
use crate::registry::TaskRegistry;
use crate::rpc::{ControlPlane, DuplexStream};
use crate::variant::DriverVariant;

/// Construction-time facts that never change after `Driver::new`.
pub struct DriverConfig {
    pub descriptor: PluginDescriptor,
    pub config_schema: serde_json::Value,
    pub task_config_schema: serde_json::Value,
    pub launch: LaunchConfig,
    pub fingerprint_interval: Duration,
}

/// The per-driver object. Generic over the variant (exec, JVM, VM-image,
/// mock) and the clock (real in production, fake under test).
pub struct Driver<V: DriverVariant, C: Clock> {
    variant: Arc<V>,
    descriptor: PluginDescriptor,
    config_schema: serde_json::Value,
    task_config_schema: serde_json::Value,
    config: RwLock<serde_json::Value>,
    registry: TaskRegistry,
    events: Arc<EventBus>,
    fingerprint: FingerprintEngine,
    launch_cfg: LaunchConfig,
    store: Arc<dyn HandleStore>,
    clock: C,
    cancel: CancellationToken,
}

impl<V: DriverVariant, C: Clock> Driver<V, C> {
    pub async fn new(variant: Arc<V>, cfg: DriverConfig, store: Arc<dyn HandleStore>, clock: C) -> Self {
        let cancel = CancellationToken::new();
        let probe_variant: Arc<dyn DriverVariant> = variant.clone();
        let fingerprint = FingerprintEngine::spawn(probe_variant, cfg.fingerprint_interval, cancel.child_token()).await;

        Self {
            variant,
            descriptor: cfg.descriptor,
            config_schema: cfg.config_schema,
            task_config_schema: cfg.task_config_schema,
            config: RwLock::new(serde_json::Value::Null),
            registry: TaskRegistry::new(),
            events: Arc::new(EventBus::new(crate::events::DEFAULT_SUBSCRIBER_CAPACITY)),
            fingerprint,
            launch_cfg: cfg.launch,
            store,
            clock,
            cancel,
        }
    }

    /// Convenience for callers that want a driver with the nominal 30s
    /// fingerprint cadence without spelling out the whole `DriverConfig`.
    pub async fn with_defaults(
        variant: Arc<V>,
        descriptor: PluginDescriptor,
        config_schema: serde_json::Value,
        task_config_schema: serde_json::Value,
        launch_cfg: LaunchConfig,
        store: Arc<dyn HandleStore>,
        clock: C,
    ) -> Self {
        Self::new(
            variant,
            DriverConfig { descriptor, config_schema, task_config_schema, launch: launch_cfg, fingerprint_interval: DEFAULT_FINGERPRINT_INTERVAL },
            store,
            clock,
        )
        .await
    }

    /// Spawns the per-task supervisor loop (spec §4.3). Races the driver's
    /// top-level cancellation so `Shutdown` stops the supervision loop
    /// itself without touching the workload process.
    fn dispatch_supervisor(&self, handle: Arc<SupervisionHandle>) {
        let id = handle.id();
        let events = self.events.clone();
        let clock = self.clock.clone();
        let supervisor_cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = supervisor_cancel.cancelled() => {}
                _ = launch::supervise(handle, clock, move |h| {
                    let snapshot = h.snapshot();
                    let result = snapshot.exit_result.unwrap_or_default();
                    events.publish(TaskEvent { id, kind: TaskEventKind::Exited(result), at_ms: snapshot.completed_at_ms.unwrap_or(0) });
                }) => {}
            }
        });
    }
}

#[async_trait]
impl<V: DriverVariant, C: Clock> ControlPlane for Driver<V, C> {
    fn plugin_info(&self) -> PluginDescriptor {
        self.descriptor.clone()
    }

    fn config_schema(&self) -> serde_json::Value {
        self.config_schema.clone()
    }

    fn task_config_schema(&self) -> serde_json::Value {
        self.task_config_schema.clone()
    }

    /// Decodes the payload against the variant's plugin-config shape before
    /// committing it; a rejected payload never replaces the active
    /// configuration. Deeper business-rule validation beyond what the shape
    /// itself encodes is out of scope (spec §1).
    async fn set_config(&self, payload: serde_json::Value) -> Result<(), DriverError> {
        if !payload.is_object() && !payload.is_null() {
            return Err(DriverError::InvalidConfig("plugin config payload must be a JSON object".to_string()));
        }
        self.variant.validate_plugin_config(&payload)?;
        *self.config.write() = payload;
        Ok(())
    }

    fn capabilities(&self) -> DriverCapabilities {
        self.variant.capability_descriptor()
    }

    fn fingerprint(&self) -> watch::Receiver<FingerprintRecord> {
        self.fingerprint.subscribe()
    }

    async fn start_task(&self, spec: TaskSpec) -> Result<TaskHandleBlob, DriverError> {
        let id = spec.id;
        if !self.registry.reserve(id) {
            return Err(DriverError::AlreadyStarted(id.to_string()));
        }

        let outcome = launch::launch(self.variant.as_ref(), spec, &self.launch_cfg, &self.clock, self.store.as_ref()).await;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.registry.abort_reservation(&id);
                return Err(e);
            }
        };

        self.registry.commit(id, outcome.handle.clone());
        self.events.publish(TaskEvent { id, kind: TaskEventKind::Started, at_ms: outcome.handle.started_at_ms });
        self.dispatch_supervisor(outcome.handle);
        Ok(outcome.blob)
    }

    async fn recover_task(&self, blob: TaskHandleBlob) -> Result<(), DriverError> {
        let id = blob.task_spec.id;
        if self.registry.get(&id).is_some() {
            return Ok(());
        }

        let task_dir = self.launch_cfg.state_dir.join(id.to_string());
        let executor = self.variant.reattach_executor(&task_dir, &blob.reattach).await?;

        let handle = SupervisionHandle::new(blob.task_spec.clone(), executor, blob.pid, blob.started_at_ms);
        self.registry.set(id, handle.clone());
        self.events.publish(TaskEvent { id, kind: TaskEventKind::RecoveryAttached, at_ms: blob.started_at_ms });
        self.dispatch_supervisor(handle);
        Ok(())
    }

    async fn wait_task(&self, id: TaskId, cancel: CancellationToken) -> Option<ExitResult> {
        let handle = self.registry.get(&id)?;
        tokio::select! {
            _ = cancel.cancelled() => None,
            result = handle.wait_for_exit() => Some(result),
        }
    }

    async fn stop_task(&self, id: TaskId, timeout: Duration, signal: &str) -> Result<(), DriverError> {
        let handle = self.registry.get(&id).ok_or_else(|| DriverError::TaskNotFound(id.to_string()))?;
        if handle.state().is_terminal() {
            return Ok(());
        }
        let sig = translate(signal);
        tokio::time::timeout(timeout + Duration::from_secs(5), handle.executor.shutdown(sig, timeout, Signal::SIGKILL))
            .await
            .map_err(|_| DriverError::ShutdownFailed("executor did not respond within the bounded grace period".to_string()))?
            .map_err(|e| DriverError::ShutdownFailed(e.to_string()))
    }

    async fn destroy_task(&self, id: TaskId, force: bool) -> Result<(), DriverError> {
        let handle = match self.registry.get(&id) {
            Some(handle) => handle,
            None => return Ok(()),
        };

        if handle.state() == TaskState::Running && !force {
            return Err(DriverError::TaskRunning(id.to_string()));
        }

        let _ = handle.executor.shutdown(Signal::SIGTERM, Duration::from_secs(1), Signal::SIGKILL).await;
        let _ = handle.executor.kill().await;
        let _ = self.store.delete(id).await;
        self.registry.delete(&id);
        Ok(())
    }

    async fn inspect_task(&self, id: TaskId) -> Result<TaskSnapshot, DriverError> {
        let handle = self.registry.get(&id).ok_or_else(|| DriverError::TaskNotFound(id.to_string()))?;
        let snapshot = handle.snapshot();
        Ok(TaskSnapshot {
            state: snapshot.state,
            started_at_ms: handle.started_at_ms,
            completed_at_ms: snapshot.completed_at_ms,
            exit_result: snapshot.exit_result,
            pid: snapshot.pid,
        })
    }

    fn task_stats(&self, id: TaskId, interval: Duration, cancel: CancellationToken) -> Result<mpsc::Receiver<StatsSample>, DriverError> {
        let handle = self.registry.get(&id).ok_or_else(|| DriverError::TaskNotFound(id.to_string()))?;
        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
                let sample = match handle.executor.stats().await {
                    Ok(sample) => sample,
                    Err(_) => return,
                };
                if tx.send(sample).await.is_err() {
                    return;
                }
            }
        });
        Ok(rx)
    }

    fn subscribe_events(&self, id: TaskId, cancel: CancellationToken) -> mpsc::Receiver<TaskEvent> {
        let mut inner = self.events.subscribe(id);
        let (tx, rx) = mpsc::channel(crate::events::DEFAULT_SUBSCRIBER_CAPACITY);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    event = inner.recv() => {
                        match event {
                            Some(event) => if tx.send(event).await.is_err() { return },
                            None => return,
                        }
                    }
                }
            }
        });
        rx
    }

    async fn signal_task(&self, id: TaskId, signal: &str) -> Result<(), DriverError> {
        if !self.variant.capability_descriptor().signals_supported {
            return Err(DriverError::NotSupported("signal".to_string()));
        }
        let handle = self.registry.get(&id).ok_or_else(|| DriverError::TaskNotFound(id.to_string()))?;
        let sig = translate(signal);
        handle.executor.signal(sig).await.map_err(|e| DriverError::ShutdownFailed(e.to_string()))
    }

    async fn exec_task(&self, id: TaskId, argv: Vec<String>, deadline: Duration) -> Result<ExecResult, DriverError> {
        if !self.variant.capability_descriptor().exec_supported {
            return Err(DriverError::NotSupported("exec".to_string()));
        }
        let handle = self.registry.get(&id).ok_or_else(|| DriverError::TaskNotFound(id.to_string()))?;
        handle.executor.exec(argv, deadline).await.map_err(|e| match e {
            ExecutorError::DeadlineExceeded(_) => DriverError::DeadlineExceeded,
            other => DriverError::NotSupported(other.to_string()),
        })
    }

    async fn exec_task_streaming_raw(
        &self,
        _id: TaskId,
        _argv: Vec<String>,
        _tty: bool,
        _stream: Box<dyn DuplexStream>,
    ) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("interactive streaming exec requires an executor-side streaming contract".to_string()))
    }

    fn shutdown(&self) {
        self.cancel.cancel();
        self.fingerprint.stop();
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
