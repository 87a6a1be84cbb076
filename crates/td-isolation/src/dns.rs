// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! DNS / resolv.conf synthesis (spec §4.3 step 2, §4.4).

use td_core::task::{DnsOptions, Mount};

/// Renders `options` into resolv.conf text, or `None` if nothing was set.
pub fn render_resolv_conf(options: &DnsOptions) -> Option<String> {
    if options.servers.is_empty() && options.searches.is_empty() && options.options.is_empty() {
        return None;
    }
    let mut out = String::new();
    for server in &options.servers {
        out.push_str("nameserver ");
        out.push_str(server);
        out.push('\n');
    }
    if !options.searches.is_empty() {
        out.push_str("search ");
        out.push_str(&options.searches.join(" "));
        out.push('\n');
    }
    if !options.options.is_empty() {
        out.push_str("options ");
        out.push_str(&options.options.join(" "));
        out.push('\n');
    }
    Some(out)
}

/// Bind-mount entry to append to the task's mount list so the synthesized
/// resolv.conf (written at `host_path`) is visible at `/etc/resolv.conf`
/// inside the task's isolation context.
pub fn resolv_conf_mount(host_path: impl Into<String>) -> Mount {
    Mount { host_path: host_path.into(), task_path: "/etc/resolv.conf".to_string(), readonly: true }
}

#[cfg(test)]
#[path = "dns_tests.rs"]
mod tests;
