//! Subscription lifetime management.
//!
//! - `Disposable`: a one-shot release token, released on drop
//! - `DisposeBag`: owns many disposables and releases them together

mod bag;
mod disposable;

pub use bag::DisposeBag;
pub use disposable::Disposable;
