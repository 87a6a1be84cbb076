// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Portable POSIX signal name translation (spec §4.3/§6).
//!
//! Unknown names fall back to `Interrupt` with a warning rather than
//! failing the RPC — see open question (a) in the design ledger.

use nix::sys::signal::Signal;

/// Translates a portable POSIX signal name (e.g. `"SIGTERM"`, `"TERM"`,
/// case-insensitive, `SIG`-prefix optional) to the host's numeric signal.
///
/// Unrecognized names fall back to `SIGINT` and log a warning; the caller
/// still forwards the translated signal and reports success.
pub fn translate(name: &str) -> Signal {
    match parse(name) {
        Some(signal) => signal,
        None => {
            tracing::warn!(signal = name, "unknown signal name, falling back to SIGINT");
            Signal::SIGINT
        }
    }
}

fn parse(name: &str) -> Option<Signal> {
    let normalized = name.trim().to_ascii_uppercase();
    let stripped = normalized.strip_prefix("SIG").unwrap_or(&normalized);
    match stripped {
        "HUP" => Some(Signal::SIGHUP),
        "INT" => Some(Signal::SIGINT),
        "QUIT" => Some(Signal::SIGQUIT),
        "ILL" => Some(Signal::SIGILL),
        "TRAP" => Some(Signal::SIGTRAP),
        "ABRT" => Some(Signal::SIGABRT),
        "BUS" => Some(Signal::SIGBUS),
        "FPE" => Some(Signal::SIGFPE),
        "KILL" => Some(Signal::SIGKILL),
        "USR1" => Some(Signal::SIGUSR1),
        "SEGV" => Some(Signal::SIGSEGV),
        "USR2" => Some(Signal::SIGUSR2),
        "PIPE" => Some(Signal::SIGPIPE),
        "ALRM" => Some(Signal::SIGALRM),
        "TERM" => Some(Signal::SIGTERM),
        "CHLD" => Some(Signal::SIGCHLD),
        "CONT" => Some(Signal::SIGCONT),
        "STOP" => Some(Signal::SIGSTOP),
        "TSTP" => Some(Signal::SIGTSTP),
        "TTIN" => Some(Signal::SIGTTIN),
        "TTOU" => Some(Signal::SIGTTOU),
        "WINCH" => Some(Signal::SIGWINCH),
        _ => None,
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
