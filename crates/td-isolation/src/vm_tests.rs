// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn parses_all_known_drive_interfaces() {
    for name in ["ide", "scsi", "sd", "mtd", "floppy", "pflash", "virtio", "none"] {
        assert!(parse_drive_interface(name).is_ok(), "{name} should parse");
    }
    assert!(parse_drive_interface("nvme").is_err());
}

#[test]
fn image_path_under_allocation_dir_is_allowed() {
    let alloc = PathBuf::from("/var/lib/alloc/abc");
    let image = alloc.join("disk.qcow2");
    assert!(validate_image_path(&image, &alloc, &[]).is_ok());
}

#[test]
fn image_path_outside_allowlist_is_rejected() {
    let alloc = PathBuf::from("/var/lib/alloc/abc");
    let image = PathBuf::from("/etc/shadow");
    let err = validate_image_path(&image, &alloc, &[]).unwrap_err();
    assert!(matches!(err, VmValidationError::ImagePathNotAllowed(_)));
}

#[test]
fn image_path_under_operator_allowlist_is_allowed() {
    let alloc = PathBuf::from("/var/lib/alloc/abc");
    let image = PathBuf::from("/srv/images/base.qcow2");
    let allowlist = vec![PathBuf::from("/srv/images")];
    assert!(validate_image_path(&image, &alloc, &allowlist).is_ok());
}

#[test]
fn args_only_checks_flags_not_positionals() {
    let allowlist = vec!["-display".to_string()];
    let args = vec!["-display".to_string(), "none".to_string()];
    assert!(validate_args(&args, &allowlist).is_ok());
}

#[test]
fn unallowlisted_flag_is_rejected() {
    let allowlist = vec!["-display".to_string()];
    let args = vec!["-enable-kvm".to_string()];
    let err = validate_args(&args, &allowlist).unwrap_err();
    assert_eq!(err, VmValidationError::ArgumentNotAllowed("-enable-kvm".to_string()));
}

#[test]
fn an_empty_allowlist_means_no_restriction() {
    let args = vec!["-enable-kvm".to_string(), "-singlestep".to_string()];
    assert!(validate_args(&args, &[]).is_ok());
}

#[test]
fn socket_path_within_limit_is_accepted() {
    assert!(validate_socket_path(Path::new("/tmp/qm.sock")).is_ok());
}

#[test]
fn socket_path_over_limit_is_rejected_when_platform_has_one() {
    if let Some(limit) = max_socket_path_len() {
        let long_path = PathBuf::from("/").join("x".repeat(limit + 10));
        let err = validate_socket_path(&long_path).unwrap_err();
        assert!(matches!(err, VmValidationError::SocketPathTooLong(_, _, _)));
    }
}
