//! Viewport-level pointer listener registration
//!
//! While a column is being resized, move/end events must be tracked on the
//! whole viewport, not just the narrow resize handle. The host exposes that
//! registration through [`PointerCapture`]; the editor holds it in a
//! [`CaptureGuard`] that releases it when dropped.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Identifies one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(u64);

impl CaptureId {
    /// Creates an id from a host-assigned value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Host hook for registering viewport move/end listeners.
pub trait PointerCapture: Send + Sync {
    /// Registers the move/end listener pair.
    fn capture(&self) -> CaptureId;

    /// Removes a registration made by `capture`.
    fn release(&self, id: CaptureId);
}

/// For hosts that deliver move/end events without explicit registration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&self) -> CaptureId {
        CaptureId(0)
    }

    fn release(&self, _id: CaptureId) {}
}

/// Tracks active registrations; hosts can forward to it or poll it.
#[derive(Debug, Default)]
pub struct CaptureRegistry {
    next_id: AtomicU64,
    active: Mutex<HashSet<CaptureId>>,
}

impl CaptureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live registrations.
    pub fn active_count(&self) -> usize {
        self.active.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if the given registration is live.
    pub fn is_active(&self, id: CaptureId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }
}

impl PointerCapture for CaptureRegistry {
    fn capture(&self) -> CaptureId {
        let id = CaptureId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        id
    }

    fn release(&self, id: CaptureId) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

/// A live registration, released on drop.
pub struct CaptureGuard {
    target: Arc<dyn PointerCapture>,
    id: CaptureId,
}

impl CaptureGuard {
    /// Registers listeners on `target`.
    pub fn acquire(target: Arc<dyn PointerCapture>) -> Self {
        let id = target.capture();
        log::debug!("CaptureGuard: acquired {:?}", id);
        Self { target, id }
    }

    /// Returns the registration id.
    pub fn id(&self) -> CaptureId {
        self.id
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        log::debug!("CaptureGuard: released {:?}", self.id);
        self.target.release(self.id);
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let registry = Arc::new(CaptureRegistry::new());
        let guard = CaptureGuard::acquire(registry.clone());
        let id = guard.id();
        assert!(registry.is_active(id));
        drop(guard);
        assert!(!registry.is_active(id));
        assert_eq!(registry.active_count(), 0);
    }

    /// A host that hands out its own listener handles.
    #[derive(Default)]
    struct HostListeners {
        released: Mutex<Vec<u64>>,
    }

    impl PointerCapture for HostListeners {
        fn capture(&self) -> CaptureId {
            CaptureId::new(42)
        }

        fn release(&self, id: CaptureId) {
            self.released
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(id.value());
        }
    }

    #[test]
    fn test_guard_releases_host_assigned_id() {
        let host = Arc::new(HostListeners::default());
        let guard = CaptureGuard::acquire(host.clone());
        assert_eq!(guard.id(), CaptureId::new(42));
        drop(guard);
        assert_eq!(*host.released.lock().unwrap(), vec![42]);
    }
}
