use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::error::Result;

/// "Something under the workspace changed; list again."
///
/// `paths` is informational. A listing is always rebuilt from scratch, so
/// callers normally ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    pub paths: Vec<PathBuf>,
}

/// Watches workspace roots and turns file-system events into
/// [`Invalidation`] messages.
///
/// The notifier only coalesces whatever is pending at the time of a drain
/// into one message; it does not debounce. Stale listings are the caller's
/// to discard.
pub struct ChangeNotifier {
    watcher: RecommendedWatcher,
    raw_event_rx: mpsc::Receiver<notify::Event>,
}

impl ChangeNotifier {
    /// Start watching every root recursively.
    pub fn watch(roots: &[PathBuf]) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(err) => warn!(%err, "file watcher error"),
            },
            Config::default(),
        )?;

        for root in roots {
            watcher.watch(root, RecursiveMode::Recursive)?;
            debug!(root = %root.display(), "watching workspace root");
        }

        Ok(Self {
            watcher,
            raw_event_rx: rx,
        })
    }

    /// Everything that arrived since the last call, as one message.
    /// `None` when nothing relevant happened.
    pub fn drain(&self) -> Option<Invalidation> {
        let _watcher_guard = &self.watcher;
        let mut paths = Vec::new();
        let mut relevant = false;

        while let Ok(event) = self.raw_event_rx.try_recv() {
            relevant |= collect(event, &mut paths);
        }

        relevant.then(|| Invalidation {
            paths: dedup(paths),
        })
    }

    /// Block up to `timeout` for the next relevant event, then drain the rest.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Invalidation> {
        let deadline = std::time::Instant::now() + timeout;
        let mut paths = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let event = self.raw_event_rx.recv_timeout(remaining).ok()?;
            if collect(event, &mut paths) {
                break;
            }
        }

        if let Some(rest) = self.drain() {
            paths.extend(rest.paths);
        }
        Some(Invalidation {
            paths: dedup(paths),
        })
    }
}

/// Reads never change a listing.
fn is_relevant(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}

fn collect(event: notify::Event, paths: &mut Vec<PathBuf>) -> bool {
    if !is_relevant(&event.kind) {
        return false;
    }
    paths.extend(event.paths);
    true
}

fn dedup(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths.dedup();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind};

    fn notifier_with_raw_channel() -> (ChangeNotifier, mpsc::Sender<notify::Event>) {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(|_| {}, Config::default()).expect("create watcher");
        (
            ChangeNotifier {
                watcher,
                raw_event_rx: rx,
            },
            tx,
        )
    }

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event {
            kind,
            paths: vec![PathBuf::from(path)],
            attrs: Default::default(),
        }
    }

    #[test]
    fn burst_collapses_into_one_invalidation() {
        let (notifier, tx) = notifier_with_raw_channel();
        tx.send(event(EventKind::Create(CreateKind::File), "/w/a.md")).unwrap();
        tx.send(event(EventKind::Remove(notify::event::RemoveKind::File), "/w/a.md")).unwrap();
        tx.send(event(EventKind::Create(CreateKind::File), "/w/b.md")).unwrap();

        let inv = notifier.drain().expect("invalidation");
        assert_eq!(inv.paths, vec![PathBuf::from("/w/a.md"), PathBuf::from("/w/b.md")]);
        assert!(notifier.drain().is_none(), "queue should be empty after a drain");
    }

    #[test]
    fn access_events_do_not_invalidate() {
        let (notifier, tx) = notifier_with_raw_channel();
        tx.send(event(EventKind::Access(AccessKind::Any), "/w/a.md")).unwrap();
        assert!(notifier.drain().is_none());
    }

    #[test]
    fn recv_timeout_gives_up_when_quiet() {
        let (notifier, _tx) = notifier_with_raw_channel();
        assert!(notifier.recv_timeout(Duration::from_millis(20)).is_none());
    }
}
