//! Single-entry memoization keyed on input identity.
//!
//! A [`Memo`] remembers the last dependency tuple it was evaluated with and
//! the value it produced. Shared inputs compare by `Arc` pointer, plain
//! values (chain ids, flags) by equality. A change to any dependency
//! recomputes; nothing else does.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::chain::ChainId;

/// A memo dependency that knows whether it is unchanged.
pub trait Deps: Send {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized + Send + Sync> Deps for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<D: Deps> Deps for Option<D> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Deps for ChainId {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Deps for bool {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<A: Deps, B: Deps> Deps for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

impl<A: Deps, B: Deps, C: Deps> Deps for (A, B, C) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1) && self.2.same(&other.2)
    }
}

/// Cache of the last evaluation of one projection.
///
/// The entry lock is held while computing, so concurrent callers with the
/// same dependencies compute once and then all observe the published value.
/// A compute closure must not call back into the same memo.
pub struct Memo<D, V> {
    name: &'static str,
    entry: Mutex<Option<(D, V)>>,
    recomputations: AtomicUsize,
}

impl<D: Deps, V: Clone> Memo<D, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entry: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Return the cached value if `deps` is unchanged, otherwise compute,
    /// cache and return a new one.
    pub fn get_or_compute(&self, deps: D, compute: impl FnOnce(&D) -> V) -> V {
        let mut entry = self.entry.lock();
        if let Some((cached, value)) = entry.as_ref() {
            if cached.same(&deps) {
                trace!(projection = self.name, "cache hit");
                return value.clone();
            }
        }

        let value = compute(&deps);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *entry = Some((deps, value.clone()));
        value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How many times this memo has run its compute closure.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Drop the cached entry. The next read recomputes.
    pub fn clear(&self) {
        *self.entry.lock() = None;
    }
}
