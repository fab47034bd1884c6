use crate::disposable::Disposable;
use crate::observable::{Observable, ObservableExt};
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::stream::{FusedStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Async stream of the values delivered to one subscription.
///
/// Values are queued in an unbounded channel as they are published, so a
/// slow consumer never blocks the producer. The stream ends once the source
/// observable is dropped, or after [`close`](Self::close) once the queued
/// values are drained. Dropping the stream unsubscribes.
///
/// # Examples
///
/// ```
/// use flare::{ObservableExt, Variable};
/// use futures::{executor::block_on, StreamExt};
///
/// let variable = Variable::new(0);
/// let stream = variable.to_stream();
///
/// variable.update(1);
/// variable.update(2);
/// drop(variable);
///
/// assert_eq!(block_on(stream.collect::<Vec<_>>()), vec![0, 1, 2]);
/// ```
pub struct ObservableStream<T> {
    receiver: UnboundedReceiver<T>,
    subscription: Disposable,
}

impl<T: Clone + Send + Sync + 'static> ObservableStream<T> {
    pub(crate) fn new<O>(source: &O) -> Self
    where
        O: Observable<Item = T> + ?Sized,
    {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = source.subscribe(move |new, _| {
            if sender.unbounded_send(new.clone()).is_err() {
                tracing::trace!("stream receiver closed, dropping value");
            }
        });
        Self {
            receiver,
            subscription,
        }
    }
}

impl<T> ObservableStream<T> {
    /// Unsubscribe now. Values already queued are still yielded.
    pub fn close(&mut self) {
        self.subscription.dispose();
        self.receiver.close();
        tracing::debug!("observable stream closed");
    }
}

impl<T> Stream for ObservableStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        // All fields are Unpin.
        self.get_mut().receiver.poll_next_unpin(cx)
    }
}

impl<T> FusedStream for ObservableStream<T> {
    fn is_terminated(&self) -> bool {
        self.receiver.is_terminated()
    }
}
