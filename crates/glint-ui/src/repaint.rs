use std::cell::Cell;
use std::rc::Rc;

/// Shared repaint request flag.
///
/// Cloned into animation callbacks that run on the UI thread; the host polls
/// it with [`take`](Self::take) after delivering a frame. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct RepaintHandle {
    inner: Rc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

impl RepaintHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the owner as needing a repaint.
    pub fn request(&self) {
        self.inner.pending.set(true);
        self.inner.requests.set(self.inner.requests.get() + 1);
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }

    /// Returns and clears the pending flag.
    pub fn take(&self) -> bool {
        self.inner.pending.replace(false)
    }

    /// Total requests since creation, including ones already taken.
    #[inline]
    pub fn request_count(&self) -> u64 {
        self.inner.requests.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let handle = RepaintHandle::new();
        let cb = handle.clone();
        cb.request();
        cb.request();
        assert!(handle.is_pending());
        assert_eq!(handle.request_count(), 2);
    }

    #[test]
    fn take_clears_pending_only() {
        let handle = RepaintHandle::new();
        handle.request();
        assert!(handle.take());
        assert!(!handle.take());
        assert_eq!(handle.request_count(), 1);
    }
}
