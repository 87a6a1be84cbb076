// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Linux capability set derivation (spec §4.4).
//!
//! Comparison is case-insensitive and accepts an optional `CAP_` prefix;
//! everything is normalized to a lowercase, prefix-free canonical name
//! before set algebra runs.

use std::collections::BTreeSet;

use thiserror::Error;

/// The full set of Linux capabilities this host understands. Any add/drop
/// name outside this universe fails validation rather than being silently
/// dropped.
pub fn host_capability_universe() -> BTreeSet<String> {
    [
        "audit_control",
        "audit_read",
        "audit_write",
        "block_suspend",
        "bpf",
        "checkpoint_restore",
        "chown",
        "dac_override",
        "dac_read_search",
        "fowner",
        "fsetid",
        "ipc_lock",
        "ipc_owner",
        "kill",
        "lease",
        "linux_immutable",
        "mac_admin",
        "mac_override",
        "mknod",
        "net_admin",
        "net_bind_service",
        "net_broadcast",
        "net_raw",
        "perfmon",
        "setfcap",
        "setgid",
        "setpcap",
        "setuid",
        "sys_admin",
        "sys_boot",
        "sys_chroot",
        "sys_module",
        "sys_nice",
        "sys_pacct",
        "sys_ptrace",
        "sys_rawio",
        "sys_resource",
        "sys_time",
        "sys_tty_config",
        "syslog",
        "wake_alarm",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("unknown capability: {0}")]
    Unknown(String),
}

/// Normalizes a capability name: trims whitespace, strips an optional
/// `CAP_` prefix (case-insensitive), lowercases the remainder.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let upper = trimmed.to_ascii_uppercase();
    let stripped = upper.strip_prefix("CAP_").unwrap_or(&upper);
    stripped.to_ascii_lowercase()
}

fn normalize_set(names: &[String]) -> BTreeSet<String> {
    names.iter().map(|n| normalize(n)).collect()
}

/// Computes the effective capability set: `(defaults ∩ allow_list) ∪ add \ drop`.
///
/// Every name in `add` and `drop` must belong to the host capability
/// universe; anything else is rejected as `CapabilityError::Unknown`.
/// `defaults` and `allow_list` are plugin-controlled and are not
/// re-validated against the universe — they are expected to already be
/// host-valid built-ins.
pub fn resolve(
    defaults: &[String],
    allow_list: &[String],
    add: &[String],
    drop: &[String],
) -> Result<Vec<String>, CapabilityError> {
    let universe = host_capability_universe();
    let add = normalize_set(add);
    let drop = normalize_set(drop);

    for cap in add.iter().chain(drop.iter()) {
        if !universe.contains(cap) {
            return Err(CapabilityError::Unknown(cap.clone()));
        }
    }

    let defaults = normalize_set(defaults);
    let allow_list = normalize_set(allow_list);
    let baseline: BTreeSet<String> = defaults.intersection(&allow_list).cloned().collect();
    let with_add: BTreeSet<String> = baseline.union(&add).cloned().collect();
    let effective: Vec<String> = with_add.difference(&drop).cloned().collect();
    Ok(effective)
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
