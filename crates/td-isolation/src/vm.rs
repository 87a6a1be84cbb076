// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! VM-image variant specifics: image path containment, drive interface
//! validation, argument allow-listing, UNIX socket path limits (spec §4.4).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmValidationError {
    #[error("image path {0:?} is not under the allocation directory or an allow-listed path")]
    ImagePathNotAllowed(PathBuf),

    #[error("unknown drive interface: {0}")]
    UnknownDriveInterface(String),

    #[error("argument {0:?} is not on the args allow-list")]
    ArgumentNotAllowed(String),

    #[error("unix socket path {0:?} ({1} bytes) exceeds the platform limit of {2} bytes")]
    SocketPathTooLong(PathBuf, usize, usize),

    #[error("{0} is not supported on this platform")]
    UnsupportedFeature(&'static str),
}

/// Fixed set of QEMU drive interfaces the VM-image variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveInterface {
    Ide,
    Scsi,
    Sd,
    Mtd,
    Floppy,
    Pflash,
    Virtio,
    None,
}

td_core::simple_display!(DriveInterface {
    Ide => "ide",
    Scsi => "scsi",
    Sd => "sd",
    Mtd => "mtd",
    Floppy => "floppy",
    Pflash => "pflash",
    Virtio => "virtio",
    None => "none",
});

pub fn parse_drive_interface(s: &str) -> Result<DriveInterface, VmValidationError> {
    match s {
        "ide" => Ok(DriveInterface::Ide),
        "scsi" => Ok(DriveInterface::Scsi),
        "sd" => Ok(DriveInterface::Sd),
        "mtd" => Ok(DriveInterface::Mtd),
        "floppy" => Ok(DriveInterface::Floppy),
        "pflash" => Ok(DriveInterface::Pflash),
        "virtio" => Ok(DriveInterface::Virtio),
        "none" => Ok(DriveInterface::None),
        other => Err(VmValidationError::UnknownDriveInterface(other.to_string())),
    }
}

/// Validates that `image_path` lies under `allocation_dir` or one of
/// `operator_allowlist`.
pub fn validate_image_path(
    image_path: &Path,
    allocation_dir: &Path,
    operator_allowlist: &[PathBuf],
) -> Result<(), VmValidationError> {
    let contained = image_path.starts_with(allocation_dir)
        || operator_allowlist.iter().any(|allowed| image_path.starts_with(allowed));
    if contained {
        Ok(())
    } else {
        Err(VmValidationError::ImagePathNotAllowed(image_path.to_path_buf()))
    }
}

/// Validates each extra command-line argument against `allowlist`. Only
/// flags (arguments starting with `-`) are checked; positional arguments
/// pass through unconditionally. An empty allow-list means none is
/// configured, so every argument passes.
pub fn validate_args(args: &[String], allowlist: &[String]) -> Result<(), VmValidationError> {
    if allowlist.is_empty() {
        return Ok(());
    }
    for arg in args {
        if arg.starts_with('-') && !allowlist.iter().any(|allowed| allowed == arg) {
            return Err(VmValidationError::ArgumentNotAllowed(arg.clone()));
        }
    }
    Ok(())
}

/// Maximum UNIX domain socket path length for the current platform, or
/// `None` when the platform imposes no fixed limit.
pub fn max_socket_path_len() -> Option<usize> {
    if cfg!(target_os = "linux") {
        Some(108)
    } else if cfg!(any(
        target_os = "macos",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )) {
        Some(104)
    } else {
        None
    }
}

pub fn validate_socket_path(path: &Path) -> Result<(), VmValidationError> {
    let Some(limit) = max_socket_path_len() else { return Ok(()) };
    let len = path.as_os_str().len();
    if len > limit {
        Err(VmValidationError::SocketPathTooLong(path.to_path_buf(), len, limit))
    } else {
        Ok(())
    }
}

/// Graceful shutdown, guest-agent, and KVM acceleration are Linux-only
/// features in the reference emulator; reject them elsewhere rather than
/// silently ignoring the request.
pub fn validate_platform_feature(feature: &'static str, requested: bool) -> Result<(), VmValidationError> {
    if requested && !cfg!(target_os = "linux") {
        Err(VmValidationError::UnsupportedFeature(feature))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "vm_tests.rs"]
mod tests;
