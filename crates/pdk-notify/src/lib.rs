//! pdk-notify
//!
//! Per-topic publish/notify core for price updates.
//!
//! - A topic (stock symbol) has one current value and an ordered subscriber list.
//! - `set_value` stores the value and fans it out synchronously, in
//!   subscription order, before returning.
//! - The notifier holds subscribers weakly; owners control their lifetime.

mod builtin;
mod notifier;
mod subscriber;
mod transcript;

pub use builtin::*;
pub use notifier::*;
pub use subscriber::*;
pub use transcript::*;
