//! Global pointer capture for drag sessions
//!
//! While a drag session is active the player listens to pointer movement and
//! release everywhere, not only over the progress bar. The listeners are
//! represented by a `CaptureGuard`: acquiring one attaches them, dropping it
//! detaches them. The guard can only be released once.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Registry of attached pointer listeners
///
/// Cheap to clone; all clones observe the same count.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    active: Arc<AtomicUsize>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the global listeners for a new session
    pub fn acquire(&self) -> CaptureGuard {
        let count = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Pointer capture acquired (active: {})", count);
        CaptureGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Number of sessions currently holding the listeners
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active() > 0
    }
}

/// Attached global pointer listeners, detached on drop
#[derive(Debug)]
pub struct CaptureGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let previous = self.active.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("Pointer capture released (active: {})", previous - 1);
    }
}
