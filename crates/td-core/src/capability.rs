// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Driver capability descriptor (spec §4.1's `Capabilities` RPC).

/// Filesystem isolation mode a driver can offer a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilesystemIsolationMode {
    /// No filesystem isolation; the task sees the host root.
    None,
    /// Chroot into the allocation directory, optionally without pivot_root.
    Chroot,
    /// Boot a machine image; the host filesystem is not visible at all.
    Image,
}

crate::simple_display!(FilesystemIsolationMode {
    None => "none",
    Chroot => "chroot",
    Image => "image",
});

/// Network isolation mode a driver can offer a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkIsolationMode {
    /// Share the host's network namespace.
    Host,
    /// Join a pre-existing namespace shared by the allocation's task group.
    Group,
}

crate::simple_display!(NetworkIsolationMode {
    Host => "host",
    Group => "group",
});

/// How thoroughly a driver supports the task spec's mount list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountConfigSupport {
    /// Mounts are rejected outright.
    None,
    /// Read-only bind mounts only.
    ReadOnly,
    /// Full bind-mount support, read-write included.
    Full,
}

crate::simple_display!(MountConfigSupport {
    None => "none",
    ReadOnly => "read_only",
    Full => "full",
});

/// Published once by a driver at construction time and never changes
/// afterward; the `Capabilities` RPC returns a clone of this value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DriverCapabilities {
    pub signals_supported: bool,
    pub exec_supported: bool,
    pub filesystem_isolation: FilesystemIsolationMode,
    pub network_isolation_modes: Vec<NetworkIsolationMode>,
    pub mount_config_support: MountConfigSupport,
}

impl DriverCapabilities {
    pub fn supports_network_isolation(&self, mode: NetworkIsolationMode) -> bool {
        self.network_isolation_modes.contains(&mode)
    }
}

crate::builder! {
    pub struct DriverCapabilitiesBuilder => DriverCapabilities {
        set {
            signals_supported: bool = true,
            exec_supported: bool = true,
            filesystem_isolation: FilesystemIsolationMode = FilesystemIsolationMode::Chroot,
            network_isolation_modes: Vec<NetworkIsolationMode> = vec![NetworkIsolationMode::Host, NetworkIsolationMode::Group],
            mount_config_support: MountConfigSupport = MountConfigSupport::Full,
        }
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
