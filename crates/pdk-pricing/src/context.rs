use rust_decimal::Decimal;
use tracing::debug;

use crate::{FareRequest, PricingError, ServiceClass, Strategy};

/// BookingContext holds at most one selected pricing strategy.
/// Calculating without one fails fast; it never prices a trip at zero.
#[derive(Debug, Default)]
pub struct BookingContext {
    strategy: Option<Strategy>,
}

impl BookingContext {
    pub fn new() -> Self {
        Self { strategy: None }
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Select (or replace) the active strategy.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        debug!(mode = strategy.mode(), "pricing strategy selected");
        self.strategy = Some(strategy);
    }

    pub fn clear_strategy(&mut self) {
        self.strategy = None;
    }

    pub fn strategy_mode(&self) -> Option<&str> {
        self.strategy.as_ref().map(|s| s.mode())
    }

    pub fn calculate_cost(
        &self,
        distance: Decimal,
        passengers: u32,
        service_class: ServiceClass,
        has_discount: bool,
    ) -> Result<Decimal, PricingError> {
        self.calculate(&FareRequest::new(
            distance,
            passengers,
            service_class,
            has_discount,
        ))
    }

    pub fn calculate(&self, req: &FareRequest) -> Result<Decimal, PricingError> {
        let strategy = self.strategy.as_ref().ok_or(PricingError::StrategyNotSet)?;
        let cost = strategy.cost(req).ok_or_else(|| PricingError::Overflow {
            mode: strategy.mode().to_string(),
        })?;
        debug!(mode = strategy.mode(), %cost, "fare calculated");
        Ok(cost)
    }
}
