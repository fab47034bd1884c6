//! Observable values and their subscription combinators.
//!
//! - `Observable`: the object-safe broadcast interface
//! - `ObservableExt`: closure subscriptions, filter/distinct, property binding
//! - `Variable<T>`: always holds a value, replays it to new subscribers
//! - `PublishSubject<T>`: starts empty, forwards only future updates

mod filter;
mod observable;
mod publish_subject;
mod registry;
mod variable;

pub use filter::distinct;
pub use observable::{Observable, ObservableExt};
pub use publish_subject::PublishSubject;
pub use registry::Observer;
pub use variable::Variable;
