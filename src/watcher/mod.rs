//! File watching for `--watch` re-rendering.
//!
//! Uses notify crate for cross-platform file system events. The parent
//! directory is watched rather than the file itself so editors that save by
//! rename-and-replace keep being noticed.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Debounce applied to bursts of change events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches a diagram file and reports debounced changes.
pub struct DiagramWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl DiagramWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory
    /// cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths are canonical, so ours must be too.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target_path.display(), "watching diagram");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Drain pending events; true once a change has settled for the
    /// debounce period.
    pub fn poll_changed(&mut self) -> bool {
        let mut relevant = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "file watcher error");
                    crate::perf::log_event("watcher.error", format!("{err}"));
                }
            }
        }

        if relevant > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!("relevant={relevant} target={}", self.target_path.display()),
            );
            self.pending_since = Some(Instant::now());
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, EventAttributes, ModifyKind};
    use tempfile::tempdir;

    fn event(kind: EventKind, path: PathBuf) -> Event {
        Event {
            kind,
            paths: vec![path],
            attrs: EventAttributes::new(),
        }
    }

    #[test]
    fn test_modify_of_target_is_relevant() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("graph.json5");
        std::fs::write(&path, "{}").expect("write");
        let watcher = DiagramWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(watcher.is_relevant(&event(EventKind::Modify(ModifyKind::Any), path)));
        assert!(
            watcher.is_relevant(&event(EventKind::Any, canonical_dir)),
            "directory-level events should count for backends that only report the parent"
        );
    }

    #[test]
    fn test_access_and_sibling_events_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("graph.json5");
        std::fs::write(&path, "{}").expect("write");
        let watcher = DiagramWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(!watcher.is_relevant(&event(
            EventKind::Access(AccessKind::Any),
            path.clone()
        )));
        assert!(!watcher.is_relevant(&event(
            EventKind::Modify(ModifyKind::Any),
            canonical_dir.join("graph.png")
        )));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        let root = watch_root_for(Path::new("graph.json5"));
        assert_eq!(root, PathBuf::from("."));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("graph.json5");
        std::fs::write(&path, "{}").expect("write");

        let mut watcher = DiagramWatcher::new(&path, Duration::from_millis(50)).expect("watcher");

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));

        std::fs::write(&path, "{ vertices: [] }").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.poll_changed() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        assert!(
            detected,
            "watcher should detect real file modification within 5 seconds"
        );
    }
}
