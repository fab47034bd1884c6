//! # Flare
//!
//! Lightweight observable values for Rust.
//!
//! Producers push values into an observable; subscribers are called
//! synchronously, in subscription order, with the new value and the previous
//! one. Every subscription returns a [`Disposable`] that unregisters it when
//! released, so teardown is deterministic and never keeps either side alive.
//!
//! ## Observables
//!
//! - `Variable<T>` - always holds a value and replays it to new subscribers
//! - `PublishSubject<T>` - starts empty and only forwards future updates
//! - `ObservableExt` - filtered and distinct subscriptions, property binding
//!
//! ## Lifetimes
//!
//! - `Disposable` - one-shot release token, released on drop
//! - `DisposeBag` - releases a group of disposables together
//!
//! ## Streams
//!
//! - `Publisher` - subscribe/cancel protocol for push-based consumers
//! - `ObservableStream` - `futures::Stream` adapter (feature `stream`)
//!
//! ```
//! use flare::{DisposeBag, ObservableExt, Variable};
//! use std::sync::{Arc, Mutex};
//!
//! let mut bag = DisposeBag::new();
//! let name = Variable::new(String::from("Ada"));
//! let greeting = Arc::new(Mutex::new(String::new()));
//!
//! let greeting_clone = greeting.clone();
//! name.subscribe_distinct(move |new, _| {
//!     *greeting_clone.lock().unwrap() = format!("Hello, {new}!");
//! })
//! .disposed_by(&mut bag);
//!
//! name.update(String::from("Grace"));
//! assert_eq!(*greeting.lock().unwrap(), "Hello, Grace!");
//! ```

pub mod disposable;
pub mod observable;
pub mod stream;

// Re-export main types for convenience
pub use disposable::{DisposeBag, Disposable};
pub use observable::{Observable, ObservableExt, Observer, PublishSubject, Variable};
pub use stream::{Demand, Publisher, Subscriber, Subscription};

#[cfg(feature = "stream")]
pub use stream::ObservableStream;
