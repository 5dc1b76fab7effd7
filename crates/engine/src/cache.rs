//! Single-slot "latest value" cache.
//!
//! Producers overwrite the slot; consumers read whatever is newest at their
//! own cadence. Intermediate values a consumer never looked at are simply
//! gone: there is no backlog and no replay.

use tokio::sync::watch;

/// Create a cache holding `initial`.
pub fn latest_cache<T>(initial: T) -> (CacheWriter<T>, CacheReader<T>) {
    let (tx, rx) = watch::channel(initial);
    (CacheWriter { tx }, CacheReader { rx })
}

/// Write side of a [`latest_cache`].
#[derive(Debug)]
pub struct CacheWriter<T> {
    tx: watch::Sender<T>,
}

impl<T> CacheWriter<T> {
    /// Replace the cached value. Never blocks, works with no readers.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn reader(&self) -> CacheReader<T> {
        CacheReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of a [`latest_cache`].
#[derive(Debug, Clone)]
pub struct CacheReader<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> CacheReader<T> {
    /// Take the newest value and mark it seen.
    pub fn latest(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }

    /// Look at the newest value without marking it seen.
    pub fn peek(&self) -> T {
        self.rx.borrow().clone()
    }

    /// True if something was published since the last [`latest`](Self::latest).
    pub fn has_update(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for a publish newer than the last value seen, and mark it seen.
    ///
    /// Returns false once the writer is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
