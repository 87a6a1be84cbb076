// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn builder_defaults_support_both_network_modes() {
    let caps = DriverCapabilities::builder().build();
    assert!(caps.supports_network_isolation(NetworkIsolationMode::Host));
    assert!(caps.supports_network_isolation(NetworkIsolationMode::Group));
}

#[test]
fn builder_overrides_take_effect() {
    let caps = DriverCapabilities::builder()
        .exec_supported(false)
        .filesystem_isolation(FilesystemIsolationMode::Image)
        .network_isolation_modes(vec![NetworkIsolationMode::Group])
        .build();
    assert!(!caps.exec_supported);
    assert_eq!(caps.filesystem_isolation, FilesystemIsolationMode::Image);
    assert!(!caps.supports_network_isolation(NetworkIsolationMode::Host));
}

#[test]
fn display_matches_wire_names() {
    assert_eq!(FilesystemIsolationMode::Chroot.to_string(), "chroot");
    assert_eq!(NetworkIsolationMode::Group.to_string(), "group");
    assert_eq!(MountConfigSupport::ReadOnly.to_string(), "read_only");
}
