use super::Disposable;

/// Owns a set of [`Disposable`]s and releases them together.
///
/// Release happens in insertion order, both for [`DisposeBag::dispose`] and
/// when the bag is dropped.
#[derive(Debug, Default)]
pub struct DisposeBag {
    disposables: Vec<Disposable>,
}

impl DisposeBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `disposable`.
    pub fn insert(&mut self, disposable: Disposable) {
        self.disposables.push(disposable);
    }

    /// Number of disposables currently held.
    pub fn len(&self) -> usize {
        self.disposables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposables.is_empty()
    }

    /// Release every held disposable now. The bag can be reused afterwards.
    pub fn dispose(&mut self) {
        for mut disposable in self.disposables.drain(..) {
            disposable.dispose();
        }
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Extend<Disposable> for DisposeBag {
    fn extend<I: IntoIterator<Item = Disposable>>(&mut self, iter: I) {
        self.disposables.extend(iter);
    }
}

impl FromIterator<Disposable> for DisposeBag {
    fn from_iter<I: IntoIterator<Item = Disposable>>(iter: I) -> Self {
        Self {
            disposables: iter.into_iter().collect(),
        }
    }
}
