use super::registry::{Observer, Registry};
use super::Observable;
use crate::disposable::Disposable;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct VariableInner<T> {
    value: RwLock<T>,
    registry: Arc<Registry<T>>,
}

/// An observable that always holds a value.
///
/// Every new subscriber is first called with `(current, None)` before
/// `subscribe` returns; afterwards it receives `(new, Some(old))` on each
/// update. Updates always notify, even when the value is unchanged; use
/// [`subscribe_distinct`](crate::ObservableExt::subscribe_distinct) to skip
/// repeats.
///
/// Cloning a `Variable` yields another handle to the same value.
///
/// # Examples
///
/// ```
/// use flare::{ObservableExt, Variable};
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
///
/// let temperature = Variable::new(20);
/// let last = Arc::new(AtomicI32::new(0));
/// let last_clone = last.clone();
///
/// let _subscription = temperature.subscribe(move |new, _| {
///     last_clone.store(*new, Ordering::SeqCst);
/// });
/// assert_eq!(last.load(Ordering::SeqCst), 20);
///
/// temperature.update(23);
/// assert_eq!(last.load(Ordering::SeqCst), 23);
/// assert_eq!(temperature.value(), 23);
/// ```
pub struct Variable<T> {
    inner: Arc<VariableInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Variable<T> {
    /// Create a new variable with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(VariableInner {
                value: RwLock::new(initial),
                registry: Registry::new(),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn value(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Run `f` on a snapshot of the current value.
    ///
    /// No lock is held while `f` runs, so it may read or update this
    /// variable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value();
        f(&value)
    }

    /// Replace the value and notify every subscriber with `(new, Some(old))`.
    pub fn update(&self, new_value: T) {
        let old = std::mem::replace(&mut *self.inner.value.write(), new_value.clone());
        self.inner.registry.notify(&new_value, Some(&old));
    }

    /// Mutate a copy of the value, store it, then notify as
    /// [`update`](Self::update) does.
    ///
    /// `f` runs with no lock held and may read this variable.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        let mut new_value = self.value();
        f(&mut new_value);
        self.update(new_value);
    }

    /// A read-only view that cannot update the value.
    pub fn as_observable(&self) -> Arc<dyn Observable<Item = T> + Send + Sync> {
        Arc::new(self.clone())
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable for Variable<T> {
    type Item = T;

    fn current_value(&self) -> Option<T> {
        Some(self.value())
    }

    /// Registers `observer`, then replays the current value to it.
    ///
    /// Registration comes first so that an update issued from inside the
    /// replay call reaches the same observer.
    fn subscribe_observer(&self, observer: Observer<T>) -> Disposable {
        let disposable = self.inner.registry.insert(Arc::clone(&observer));
        let current = self.value();
        observer(&current, None);
        disposable
    }
}

impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Variable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("value", &*self.inner.value.read())
            .field("subscribers", &self.inner.registry.len())
            .finish()
    }
}
