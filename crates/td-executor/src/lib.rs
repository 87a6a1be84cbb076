// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! td-executor: the driver-side view of the executor process. Defines the
//! [`ExecutorClient`] trait the driver core consumes, a process-spawned
//! implementation reached over a UNIX socket, and an in-process scripted
//! mock used to exercise the lifecycle deterministically. The executor
//! binary itself, and the wire protocol between this crate and it, are not
//! part of this crate's public contract.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod command;
mod mock;
mod process;
mod protocol;

pub use client::{ExecutorClient, ExecutorError};
pub use command::{ExecCommand, ExecutorConfig};
pub use mock::{MockExecutor, MockScript};
pub use process::{ProcessExecutor, ProcessExecutorConfig};
