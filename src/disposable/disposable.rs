use super::DisposeBag;
use std::fmt;

type Release = Box<dyn FnOnce() + Send>;

/// RAII token owning a single release action.
///
/// The action runs exactly once: on the first call to [`Disposable::dispose`],
/// or when the token is dropped, whichever comes first. Subscribing to an
/// observable hands one of these back; releasing it unregisters the observer.
///
/// # Examples
///
/// ```
/// use flare::Disposable;
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// let released = Arc::new(AtomicUsize::new(0));
/// let released_clone = released.clone();
///
/// let mut disposable = Disposable::new(move || {
///     released_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// disposable.dispose();
/// disposable.dispose();
/// drop(disposable);
///
/// assert_eq!(released.load(Ordering::SeqCst), 1);
/// ```
#[must_use = "dropping a Disposable releases it immediately"]
pub struct Disposable {
    release: Option<Release>,
}

impl Disposable {
    /// Create a token that runs `release` when disposed or dropped.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A token with nothing to release.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Run the release action now. Later calls do nothing.
    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Whether the release action has already run (or never existed).
    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }

    /// Move this token into `bag`, tying its lifetime to the bag's.
    pub fn disposed_by(self, bag: &mut DisposeBag) {
        bag.insert(self);
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
