//! pdk-pricing
//!
//! Travel cost calculation with a swappable pricing strategy.
//!
//! - A strategy is a pure cost function keyed by transport mode.
//! - `StrategyRegistry` holds the available strategies; `BookingContext`
//!   holds the selected one and refuses to price without it.
//! - All arithmetic is exact `Decimal`; rounding is a presentation concern.

mod context;
pub mod input;
mod registry;
mod types;

pub use context::*;
pub use input::InputError;
pub use registry::*;
pub use types::*;
