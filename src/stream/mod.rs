//! Bridges from observables to push-stream consumers.
//!
//! - `Publisher`: subscribe/cancel protocol with advisory demand
//! - `ObservableStream`: a `futures::Stream` (feature `stream`)
//!
//! Neither applies backpressure. Observables keep no buffer, so values are
//! handed downstream the moment they are published.

mod publisher;
#[cfg(feature = "stream")]
mod stream;

pub use publisher::{Demand, Publisher, Subscriber, Subscription};
#[cfg(feature = "stream")]
pub use stream::ObservableStream;
