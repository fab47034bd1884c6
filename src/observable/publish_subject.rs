use super::registry::{Observer, Registry};
use super::Observable;
use crate::disposable::Disposable;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct SubjectInner<T> {
    value: RwLock<Option<T>>,
    registry: Arc<Registry<T>>,
}

/// An observable without an initial value.
///
/// Subscribers receive nothing until the next [`update`](Self::update). The
/// first update is delivered as `(value, None)`, later ones as
/// `(new, Some(old))`. Once a value has been published the subject never
/// becomes empty again.
///
/// Cloning a `PublishSubject` yields another handle to the same subject.
pub struct PublishSubject<T> {
    inner: Arc<SubjectInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> PublishSubject<T> {
    /// Create an empty subject.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SubjectInner {
                value: RwLock::new(None),
                registry: Registry::new(),
            }),
        }
    }

    /// The last published value, if any.
    pub fn value(&self) -> Option<T> {
        self.inner.value.read().clone()
    }

    /// Publish `new_value` to every subscriber.
    pub fn update(&self, new_value: T) {
        let old = self.inner.value.write().replace(new_value.clone());
        self.inner.registry.notify(&new_value, old.as_ref());
    }

    /// A read-only view that cannot publish.
    pub fn as_observable(&self) -> Arc<dyn Observable<Item = T> + Send + Sync> {
        Arc::new(self.clone())
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.len()
    }
}

impl<T> Clone for PublishSubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable for PublishSubject<T> {
    type Item = T;

    fn current_value(&self) -> Option<T> {
        self.value()
    }

    fn subscribe_observer(&self, observer: Observer<T>) -> Disposable {
        self.inner.registry.insert(observer)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for PublishSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishSubject")
            .field("value", &*self.inner.value.read())
            .field("subscribers", &self.inner.registry.len())
            .finish()
    }
}
