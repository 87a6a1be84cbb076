// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! td-variants: the concrete `DriverVariant` implementations (spec §4.7) —
//! generic exec, JVM, VM-image, and the synthetic mock used for testing and
//! bring-up.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod exec;
mod jvm;
mod mock;
mod qemu;

pub use exec::ExecVariant;
pub use jvm::JvmVariant;
pub use mock::MockVariant;
pub use qemu::QemuVariant;
