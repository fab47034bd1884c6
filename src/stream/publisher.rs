use crate::disposable::Disposable;
use crate::observable::{Observable, ObservableExt};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Amount of values a subscriber asks for.
///
/// Accepted for protocol compatibility only: observables have no buffer, so
/// every value is pushed as soon as it is published regardless of demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    Unlimited,
    Max(usize),
}

/// Downstream side of a [`Publisher`].
///
/// Methods take `&self` so a subscriber may cancel its subscription, or
/// update the source it listens to, from inside `on_next`.
pub trait Subscriber<T>: Send + Sync + 'static {
    /// Called once, before any value, with the handle used to cancel.
    fn on_subscribe(&self, subscription: Subscription);

    /// Called for every value the source publishes.
    fn on_next(&self, value: T);
}

impl<T, S: Subscriber<T> + ?Sized> Subscriber<T> for Arc<S> {
    fn on_subscribe(&self, subscription: Subscription) {
        (**self).on_subscribe(subscription);
    }

    fn on_next(&self, value: T) {
        (**self).on_next(value);
    }
}

struct SubscriptionState {
    cancelled: AtomicBool,
    disposable: Mutex<Option<Disposable>>,
}

/// Handle for a subscriber attached to a [`Publisher`].
///
/// Clones share the same subscription. Values keep flowing until
/// [`cancel`](Self::cancel) is called or the source observable is dropped.
#[derive(Clone)]
pub struct Subscription {
    state: Arc<SubscriptionState>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            state: Arc::new(SubscriptionState {
                cancelled: AtomicBool::new(false),
                disposable: Mutex::new(None),
            }),
        }
    }

    /// Ignored; delivery is eager and unbounded.
    pub fn request(&self, demand: Demand) {
        tracing::debug!(?demand, "demand ignored, delivery is unbounded");
    }

    /// Stop forwarding values. Later calls do nothing.
    pub fn cancel(&self) {
        if self.state.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let disposable = self.state.disposable.lock().take();
        drop(disposable);
        tracing::debug!("publisher subscription cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    fn attach(&self, disposable: Disposable) {
        let mut slot = self.state.disposable.lock();
        if self.is_cancelled() {
            drop(slot);
            drop(disposable);
        } else {
            *slot = Some(disposable);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Exposes an observable to subscribers speaking a subscribe/cancel protocol.
///
/// The `old` half of each notification is dropped; subscribers only see new
/// values. A [`Variable`](crate::Variable) source replays its current value
/// right after `on_subscribe`.
///
/// # Examples
///
/// ```
/// use flare::{ObservableExt, PublishSubject, Subscriber, Subscription};
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<i32>>);
///
/// impl Subscriber<i32> for Collect {
///     fn on_subscribe(&self, _subscription: Subscription) {}
///     fn on_next(&self, value: i32) {
///         self.0.lock().push(value);
///     }
/// }
///
/// let subject = PublishSubject::<i32>::new();
/// let collected = Arc::new(Collect::default());
/// let subscription = subject.publisher().subscribe(collected.clone());
///
/// subject.update(1);
/// subscription.cancel();
/// subject.update(2);
///
/// assert_eq!(*collected.0.lock(), vec![1]);
/// ```
#[derive(Clone)]
pub struct Publisher<O> {
    source: O,
}

impl<O: Observable> Publisher<O> {
    pub fn new(source: O) -> Self {
        Self { source }
    }

    /// Attach `subscriber` and start forwarding values to it.
    pub fn subscribe<S>(&self, subscriber: S) -> Subscription
    where
        S: Subscriber<O::Item>,
    {
        let subscription = Subscription::new();
        let subscriber = Arc::new(subscriber);

        subscriber.on_subscribe(subscription.clone());
        if subscription.is_cancelled() {
            return subscription;
        }

        let state = Arc::clone(&subscription.state);
        let disposable = self.source.subscribe(move |new, _| {
            if !state.cancelled.load(Ordering::SeqCst) {
                subscriber.on_next(new.clone());
            }
        });
        subscription.attach(disposable);
        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PublishSubject, Variable};

    #[derive(Default)]
    struct Recorder {
        values: Mutex<Vec<i32>>,
        subscription: Mutex<Option<Subscription>>,
        cancel_at: Option<i32>,
    }

    impl Subscriber<i32> for Recorder {
        fn on_subscribe(&self, subscription: Subscription) {
            subscription.request(Demand::Max(1));
            *self.subscription.lock() = Some(subscription);
        }

        fn on_next(&self, value: i32) {
            self.values.lock().push(value);
            if self.cancel_at == Some(value) {
                let subscription = self.subscription.lock().clone();
                if let Some(subscription) = subscription {
                    subscription.cancel();
                }
            }
        }
    }

    #[test]
    fn forwards_every_value_from_subject() {
        let subject = PublishSubject::<i32>::new();
        let recorder = Arc::new(Recorder::default());
        let _subscription = subject.publisher().subscribe(recorder.clone());

        for value in 0..10 {
            subject.update(value);
        }

        assert_eq!(*recorder.values.lock(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn variable_replays_after_on_subscribe() {
        let variable = Variable::new(123);
        let recorder = Arc::new(Recorder::default());
        let _subscription = variable.publisher().subscribe(recorder.clone());

        assert!(recorder.subscription.lock().is_some());
        assert_eq!(*recorder.values.lock(), vec![123]);
    }

    #[test]
    fn cancel_stops_forwarding() {
        let subject = PublishSubject::<i32>::new();
        let recorder = Arc::new(Recorder::default());
        let subscription = subject.publisher().subscribe(recorder.clone());

        for value in 0..5 {
            subject.update(value);
        }
        subscription.cancel();
        subscription.cancel();
        for value in 5..9 {
            subject.update(value);
        }

        assert!(subscription.is_cancelled());
        assert_eq!(*recorder.values.lock(), vec![0, 1, 2, 3, 4]);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn cancel_from_replay_detaches() {
        let variable = Variable::new(7);
        let recorder = Arc::new(Recorder {
            cancel_at: Some(7),
            ..Recorder::default()
        });
        let subscription = variable.publisher().subscribe(recorder.clone());

        variable.update(8);

        assert!(subscription.is_cancelled());
        assert_eq!(*recorder.values.lock(), vec![7]);
        assert_eq!(variable.subscriber_count(), 0);
    }

    #[test]
    fn publisher_does_not_keep_source_alive() {
        let subject = PublishSubject::<i32>::new();
        let publisher = subject.publisher();
        let recorder = Arc::new(Recorder::default());
        let _subscription = publisher.subscribe(recorder.clone());
        drop(publisher);

        assert_eq!(subject.subscriber_count(), 1);
        drop(subject);
        assert_eq!(Arc::strong_count(&recorder), 1);
    }
}
