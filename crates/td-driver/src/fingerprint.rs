// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Fingerprint engine (spec §4.6): a producer loop that emits a health
//! record on subscription and then at a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use td_core::{FingerprintRecord, Health, LastOutcome};

use crate::variant::DriverVariant;

/// Nominal probe interval absent an operator override.
pub const DEFAULT_FINGERPRINT_INTERVAL: Duration = Duration::from_secs(30);

/// Runs a driver variant's fingerprint probe on a fixed interval and
/// publishes each record to a `watch` channel, so a new subscriber sees the
/// most recent record immediately rather than waiting for the next tick.
///
/// Probe failures never propagate as errors (spec §5's propagation
/// policy): they are encoded in the record's `health` field and logged on
/// transition only, to avoid spamming a persistently unhealthy host.
pub struct FingerprintEngine {
    rx: watch::Receiver<FingerprintRecord>,
    cancel: CancellationToken,
}

impl FingerprintEngine {
    /// Spawns the producer loop. The first probe runs before this returns,
    /// so `subscribe()` never observes a placeholder record.
    pub async fn spawn(variant: Arc<dyn DriverVariant>, interval: Duration, cancel: CancellationToken) -> Self {
        let mut last_outcome = LastOutcome::unknown();
        let initial = variant.fingerprint_probe().await;
        log_transition(&mut last_outcome, &initial, variant.name());

        let (tx, rx) = watch::channel(initial);

        let loop_variant = variant.clone();
        let loop_cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
                let record = loop_variant.fingerprint_probe().await;
                log_transition(&mut last_outcome, &record, loop_variant.name());
                if tx.send(record).is_err() {
                    return;
                }
            }
        });

        Self { rx, cancel }
    }

    /// New subscription; the returned receiver's initial value is the most
    /// recently published record (spec §4.1's `Fingerprint` RPC).
    pub fn subscribe(&self) -> watch::Receiver<FingerprintRecord> {
        self.rx.clone()
    }

    /// Stops the producer loop. Idempotent; dropping the engine without
    /// calling this also stops it once the driver's top-level token fires.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

fn log_transition(last: &mut LastOutcome, record: &FingerprintRecord, variant_name: &str) {
    if !last.record(record.health) {
        return;
    }
    match record.health {
        Health::Healthy => tracing::info!(driver = variant_name, description = %record.description, "fingerprint healthy"),
        Health::Unhealthy => tracing::warn!(driver = variant_name, description = %record.description, "fingerprint unhealthy"),
        Health::Undetected => tracing::info!(driver = variant_name, description = %record.description, "fingerprint undetected"),
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
