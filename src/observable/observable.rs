use super::filter;
use super::registry::Observer;
use crate::disposable::Disposable;
use crate::stream::Publisher;
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "stream")]
use crate::stream::ObservableStream;

/// A broadcast value holder that observers can subscribe to.
///
/// Implemented by [`Variable`](crate::Variable) (always holds a value and
/// replays it on subscribe) and [`PublishSubject`](crate::PublishSubject)
/// (starts empty and only forwards future updates). The trait is object safe;
/// the generic helpers live on [`ObservableExt`].
pub trait Observable {
    type Item: Clone + Send + Sync + 'static;

    /// The current value, or `None` if nothing has been published yet.
    fn current_value(&self) -> Option<Self::Item>;

    /// Register `observer` for future updates.
    ///
    /// Dropping or disposing the returned token unregisters the observer.
    fn subscribe_observer(&self, observer: Observer<Self::Item>) -> Disposable;
}

impl<O: Observable + ?Sized> Observable for Arc<O> {
    type Item = O::Item;

    fn current_value(&self) -> Option<Self::Item> {
        (**self).current_value()
    }

    fn subscribe_observer(&self, observer: Observer<Self::Item>) -> Disposable {
        (**self).subscribe_observer(observer)
    }
}

impl<O: Observable + ?Sized> Observable for Box<O> {
    type Item = O::Item;

    fn current_value(&self) -> Option<Self::Item> {
        (**self).current_value()
    }

    fn subscribe_observer(&self, observer: Observer<Self::Item>) -> Disposable {
        (**self).subscribe_observer(observer)
    }
}

/// Subscription helpers available on every [`Observable`].
pub trait ObservableExt: Observable {
    /// Subscribe a closure receiving `(new, old)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flare::{ObservableExt, Variable};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let count = Variable::new(1);
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let seen_clone = seen.clone();
    ///
    /// let _subscription = count.subscribe(move |new, old| {
    ///     seen_clone.lock().unwrap().push((*new, old.copied()));
    /// });
    /// count.update(2);
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![(1, None), (2, Some(1))]);
    /// ```
    fn subscribe<F>(&self, observer: F) -> Disposable
    where
        F: Fn(&Self::Item, Option<&Self::Item>) + Send + Sync + 'static,
    {
        self.subscribe_observer(Arc::new(observer))
    }

    /// Subscribe a closure that only runs when `filter(new, old)` holds.
    ///
    /// `filter` sees every notification as published. The observer's `old`
    /// is the last value *it* received, so skipped values never show up as
    /// a previous value; its first call always gets `None`.
    fn subscribe_filtered<P, F>(&self, filter: P, observer: F) -> Disposable
    where
        P: Fn(&Self::Item, Option<&Self::Item>) -> bool + Send + Sync + 'static,
        F: Fn(&Self::Item, Option<&Self::Item>) + Send + Sync + 'static,
    {
        let last_delivered = Mutex::new(None);
        self.subscribe(move |new, old| {
            if !filter(new, old) {
                return;
            }
            let previous = last_delivered.lock().replace(new.clone());
            observer(new, previous.as_ref());
        })
    }

    /// Subscribe a closure that skips updates equal to the previous value.
    ///
    /// The first delivery (no previous value) always passes.
    fn subscribe_distinct<F>(&self, observer: F) -> Disposable
    where
        Self::Item: PartialEq,
        F: Fn(&Self::Item, Option<&Self::Item>) + Send + Sync + 'static,
    {
        self.subscribe_filtered(filter::distinct, observer)
    }

    /// Feed every new value into `setter`.
    ///
    /// The setter is any function writing into an external property, so one
    /// shape covers plain and optional targets alike.
    fn bind<F>(&self, setter: F) -> Disposable
    where
        F: Fn(Self::Item) + Send + Sync + 'static,
    {
        self.subscribe(move |new, _| setter(new.clone()))
    }

    /// Write every new value into the field of `target` selected by `field`.
    ///
    /// The field may be of type `Item` or anything constructible from it,
    /// such as `Option<Item>`. Only a weak reference to `target` is kept;
    /// once the target is dropped the binding does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use flare::{ObservableExt, Variable};
    /// use parking_lot::Mutex;
    /// use std::sync::Arc;
    ///
    /// #[derive(Default)]
    /// struct Label {
    ///     text: Option<String>,
    /// }
    ///
    /// let label = Arc::new(Mutex::new(Label::default()));
    /// let title = Variable::new(String::from("hello"));
    ///
    /// let _binding = title.bind_to(&label, |label: &mut Label| &mut label.text);
    /// title.update(String::from("world"));
    ///
    /// assert_eq!(label.lock().text.as_deref(), Some("world"));
    /// ```
    fn bind_to<R, V, A>(&self, target: &Arc<Mutex<R>>, field: A) -> Disposable
    where
        R: Send + 'static,
        V: From<Self::Item>,
        A: Fn(&mut R) -> &mut V + Send + Sync + 'static,
    {
        let target = Arc::downgrade(target);
        self.bind(move |value| match target.upgrade() {
            Some(target) => {
                let mut guard = target.lock();
                *field(&mut *guard) = V::from(value);
            }
            None => tracing::debug!("binding target dropped, ignoring update"),
        })
    }

    /// A demand-protocol publisher over this observable.
    fn publisher(&self) -> Publisher<Self>
    where
        Self: Clone + Sized,
    {
        Publisher::new(self.clone())
    }

    /// A `futures::Stream` of every value delivered to a fresh subscription.
    #[cfg(feature = "stream")]
    fn to_stream(&self) -> ObservableStream<Self::Item> {
        ObservableStream::new(self)
    }
}

impl<O: Observable + ?Sized> ObservableExt for O {}
