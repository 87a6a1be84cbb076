// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Persistence for the task-handle blob (spec §4.3 step 7). The launch
//! orchestrator calls this through a caller-provided implementation rather
//! than owning storage itself, so a control-plane host can back it with
//! whatever durable store it already has.

use std::path::PathBuf;

use async_trait::async_trait;

use td_core::TaskId;
use td_wire::TaskHandleBlob;

#[async_trait]
pub trait HandleStore: Send + Sync + 'static {
    async fn save(&self, blob: &TaskHandleBlob) -> std::io::Result<()>;
    async fn delete(&self, id: TaskId) -> std::io::Result<()>;
}

/// Writes each handle blob as `<dir>/<task-id>.json`, atomically via a
/// write-to-temp-then-rename (the same shape the daemon's breadcrumb writer
/// uses for its own per-job snapshot files).
pub struct FileHandleStore {
    dir: PathBuf,
}

impl FileHandleStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, id: TaskId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl HandleStore for FileHandleStore {
    async fn save(&self, blob: &TaskHandleBlob) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(blob.task_spec.id);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(blob).map_err(std::io::Error::other)?;
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &path)
    }

    async fn delete(&self, id: TaskId) -> std::io::Result<()> {
        let path = self.path_for(id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "handle_store_tests.rs"]
mod tests;
