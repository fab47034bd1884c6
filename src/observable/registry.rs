use crate::disposable::Disposable;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Callback invoked with the new value and the previous one, if any.
pub type Observer<T> = Arc<dyn Fn(&T, Option<&T>) + Send + Sync>;

/// Identifier of a registered observer.
///
/// Allocated from a monotonically increasing counter and never reused, so a
/// released subscription can never be mistaken for a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observer arena shared by every observable.
///
/// Only the owning observable holds it strongly; disposables reach it
/// through a `Weak`, so neither side keeps the other alive.
pub(crate) struct Registry<T> {
    next_id: AtomicU64,
    observers: RwLock<BTreeMap<SubscriptionId, Observer<T>>>,
}

impl<T: 'static> Registry<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            observers: RwLock::new(BTreeMap::new()),
        })
    }

    /// Register `observer` and return the token that unregisters it.
    pub(crate) fn insert(self: &Arc<Self>, observer: Observer<T>) -> Disposable {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.observers.write().insert(id, observer);
        tracing::trace!(subscription = %id, "observer registered");

        let registry = Arc::downgrade(self);
        Disposable::new(move || Self::release(&registry, id))
    }

    fn release(registry: &Weak<Self>, id: SubscriptionId) {
        match registry.upgrade() {
            Some(registry) => {
                let removed = registry.remove(id);
                tracing::trace!(subscription = %id, removed, "observer released");
            }
            None => tracing::trace!(subscription = %id, "observable already dropped"),
        }
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        self.observers.write().remove(&id).is_some()
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.observers.read().contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Deliver `(new, old)` to every observer registered when the pass starts.
    ///
    /// The lock is released before any observer runs, so observers may
    /// subscribe, dispose or update reentrantly. A nested update runs its own
    /// pass to completion; this pass then resumes with its own values. An
    /// observer released mid-pass is skipped if it has not been reached yet.
    pub(crate) fn notify(&self, new: &T, old: Option<&T>) {
        let snapshot: Vec<(SubscriptionId, Observer<T>)> = self
            .observers
            .read()
            .iter()
            .map(|(id, observer)| (*id, Arc::clone(observer)))
            .collect();
        tracing::trace!(observers = snapshot.len(), "notifying");

        for (id, observer) in snapshot {
            if self.contains(id) {
                observer(new, old);
            }
        }
    }
}
