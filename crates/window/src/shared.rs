use crate::window::SlidingWindow;
use feed_core::{Sample, Snapshot};
use tokio::sync::watch;

/// A [`SlidingWindow`] plus a publisher that hands out immutable snapshots.
///
/// Only the owner mutates the window; every append swaps a fresh
/// [`Snapshot`] into the watch channel, so readers never see a half-applied
/// append.
#[derive(Debug)]
pub struct SharedWindow {
    window: SlidingWindow,
    tx:     watch::Sender<Snapshot>,
}

impl SharedWindow {
    /// Wrap `window` and return it together with a first reader.
    pub fn new(window: SlidingWindow) -> (Self, WindowReader) {
        let (tx, rx) = watch::channel(window.snapshot());
        (Self { window, tx }, WindowReader { rx })
    }

    /// Append, publish, and return the published snapshot plus the eviction count.
    pub fn append(&mut self, sample: Sample) -> (Snapshot, usize) {
        let evicted = self.window.append(sample);
        let snapshot = self.window.snapshot();
        self.tx.send_replace(snapshot.clone());
        (snapshot, evicted)
    }

    pub fn reader(&self) -> WindowReader {
        WindowReader { rx: self.tx.subscribe() }
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}

/// Read-only handle to the latest published window contents.
#[derive(Debug, Clone)]
pub struct WindowReader {
    rx: watch::Receiver<Snapshot>,
}

impl WindowReader {
    /// The most recently published contents.
    pub fn snapshot(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next publication. Returns `false` once the owner is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_starts_with_initial_contents() {
        let (_shared, reader) = SharedWindow::new(SlidingWindow::new(3).unwrap());
        assert!(reader.snapshot().is_empty());
    }

    #[test]
    fn append_publishes_to_every_reader() {
        let (mut shared, first) = SharedWindow::new(SlidingWindow::new(2).unwrap());
        let second = shared.reader();

        shared.append(Sample::now(1.0));
        let (published, evicted) = shared.append(Sample::now(2.0));
        assert_eq!(evicted, 0);

        assert_eq!(first.snapshot(), published);
        assert_eq!(second.snapshot().values().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn held_snapshot_survives_eviction() {
        let (mut shared, reader) = SharedWindow::new(SlidingWindow::new(1).unwrap());
        shared.append(Sample::now(1.0));
        let held = reader.snapshot();
        let (_, evicted) = shared.append(Sample::now(2.0));
        assert_eq!(evicted, 1);
        assert_eq!(held.values().collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(reader.snapshot().values().collect::<Vec<_>>(), vec![2.0]);
    }

    #[tokio::test]
    async fn changed_wakes_on_append_and_ends_on_drop() {
        let (mut shared, mut reader) = SharedWindow::new(SlidingWindow::new(4).unwrap());

        let waiter = tokio::spawn(async move {
            let woke = reader.changed().await;
            (woke, reader.snapshot().len(), reader)
        });
        shared.append(Sample::now(5.0));
        let (woke, len, mut reader) = waiter.await.unwrap();
        assert!(woke);
        assert_eq!(len, 1);

        drop(shared);
        assert!(!reader.changed().await);
    }
}
