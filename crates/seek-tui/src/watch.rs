//! Watches the workspace snapshot file so the index refreshes when it is
//! rewritten.
//!
//! The parent directory is watched, not the file, so a snapshot replaced by
//! renaming a temporary over it is still picked up.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, TryRecvError},
};

pub struct WorkspaceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl WorkspaceWatcher {
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("not a file path: {}", path.display()))?
            .to_os_string();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "watching workspace snapshot");

        Ok(Self {
            _watcher: watcher,
            rx,
            file_name,
        })
    }

    /// Drain pending notifications. Returns whether any of them touched the
    /// snapshot file. Never blocks.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => changed |= self.is_relevant(&event),
                Ok(Err(e)) => tracing::warn!(error = %e, "workspace watch error"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("workspace watcher disconnected");
                    break;
                }
            }
        }
        changed
    }

    fn is_relevant(&self, event: &Event) -> bool {
        matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()))
    }
}
