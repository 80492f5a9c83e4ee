use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Observable state container.
///
/// `Store<T>` wraps a value in `Arc<RwLock<T>>` and bumps a revision counter
/// on every write, so a renderer can tell whether anything changed since it
/// last drew. Clones share the same value and counter.
///
/// # Example
///
/// ```
/// use sorter_lib::Store;
///
/// let rows = Store::new(vec![1, 2, 3]);
/// let view = rows.clone();
///
/// rows.set(vec![3, 1, 2]);
/// assert!(view.is_dirty());
/// assert_eq!(view.get(), vec![3, 1, 2]);
///
/// view.clear_dirty();
/// assert!(!view.is_dirty());
/// ```
#[derive(Debug)]
pub struct Store<T> {
    inner: Arc<RwLock<T>>,
    revision: Arc<AtomicU64>,
    seen: Arc<AtomicU64>,
}

impl<T> Store<T> {
    /// Create a new store with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            revision: Arc::new(AtomicU64::new(0)),
            seen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Read the current value without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Replace the value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Update the value using a closure, returning what the closure returns
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut guard);
        self.revision.fetch_add(1, Ordering::SeqCst);
        result
    }

    /// Update the value only if the closure reports a change
    ///
    /// The revision is bumped only when `f` returns `true`. The check and the
    /// write happen under one lock.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let changed = f(&mut guard);
        if changed {
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        changed
    }

    /// Number of writes so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Check if the value has been written since the last `clear_dirty`
    pub fn is_dirty(&self) -> bool {
        self.revision() != self.seen.load(Ordering::SeqCst)
    }

    /// Mark the current revision as seen
    pub fn clear_dirty(&self) {
        self.seen.store(self.revision(), Ordering::SeqCst);
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            revision: Arc::clone(&self.revision),
            seen: Arc::clone(&self.seen),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
