//! Strategy registry: catalogue of pricing strategies keyed by transport mode.
//!
//! [`BookingContext`](crate::BookingContext) holds the single *selected*
//! strategy. `StrategyRegistry` is the step before that: the set of
//! *available* strategies, looked up by mode key and handed to the context.
//!
//! ```ignore
//! let reg = StrategyRegistry::with_builtin_tariffs();
//! let mut ctx = BookingContext::new();
//! ctx.set_strategy(reg.resolve("plane")?);
//! let cost = ctx.calculate_cost(dec!(1000), 2, ServiceClass::Business, true)?;
//! ```
//!
//! Insertion order is preserved in `list()`. Keys are compared case-sensitively.

use crate::{FareRequest, PricingError, Strategy, TransportMode};
use rust_decimal::Decimal;

pub struct StrategyRegistry {
    /// Entries in insertion order.
    entries: Vec<Strategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry preloaded with plane, train and bus, in that order.
    pub fn with_builtin_tariffs() -> Self {
        Self {
            entries: TransportMode::ALL.into_iter().map(Strategy::builtin).collect(),
        }
    }

    /// Register a cost function under `mode`.
    ///
    /// # Errors
    /// - [`PricingError::EmptyMode`] if `mode` is empty/whitespace.
    /// - [`PricingError::DuplicateMode`] if `mode` is already registered.
    pub fn register<F>(&mut self, mode: impl Into<String>, cost: F) -> Result<(), PricingError>
    where
        F: Fn(&FareRequest) -> Option<Decimal> + Send + Sync + 'static,
    {
        self.register_strategy(Strategy::new(mode, cost))
    }

    /// Register an already-built strategy under its own mode key.
    pub fn register_strategy(&mut self, strategy: Strategy) -> Result<(), PricingError> {
        if strategy.mode().trim().is_empty() {
            return Err(PricingError::EmptyMode);
        }
        if self.contains(strategy.mode()) {
            return Err(PricingError::DuplicateMode {
                mode: strategy.mode().to_string(),
            });
        }
        self.entries.push(strategy);
        Ok(())
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.entries.iter().any(|s| s.mode() == mode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mode keys in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.mode()).collect()
    }

    /// # Errors
    /// [`PricingError::UnknownMode`] if the mode is not registered.
    pub fn resolve(&self, mode: &str) -> Result<Strategy, PricingError> {
        self.entries
            .iter()
            .find(|s| s.mode() == mode)
            .cloned()
            .ok_or_else(|| PricingError::UnknownMode {
                mode: mode.to_string(),
            })
    }

    /// Resolve a console menu selector (1 plane, 2 train, 3 bus).
    ///
    /// # Errors
    /// - [`PricingError::InvalidSelector`] for any other number.
    /// - [`PricingError::UnknownMode`] if the mapped mode was deregistered.
    pub fn resolve_selector(&self, selector: i64) -> Result<Strategy, PricingError> {
        let mode = u8::try_from(selector)
            .ok()
            .and_then(TransportMode::from_selector)
            .ok_or(PricingError::InvalidSelector { selector })?;
        self.resolve(mode.as_str())
    }

    /// Returns `true` if the mode was found and removed. Remaining order is preserved.
    pub fn deregister(&mut self, mode: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.mode() != mode);
        self.entries.len() < before
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceClass;
    use rust_decimal_macros::dec;

    fn flat(amount: Decimal) -> impl Fn(&FareRequest) -> Option<Decimal> + Send + Sync {
        move |_req| Some(amount)
    }

    fn economy(distance: Decimal, passengers: u32) -> FareRequest {
        FareRequest::new(distance, passengers, ServiceClass::Economy, false)
    }

    // --- Registration ---

    #[test]
    fn register_single_strategy_succeeds() {
        let mut reg = StrategyRegistry::new();
        assert!(reg.register("ferry", flat(dec!(7))).is_ok());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn register_duplicate_mode_errors() {
        let mut reg = StrategyRegistry::new();
        reg.register("ferry", flat(dec!(7))).unwrap();
        let err = reg.register("ferry", flat(dec!(8)));
        assert_eq!(
            err,
            Err(PricingError::DuplicateMode {
                mode: "ferry".to_string()
            })
        );
    }

    #[test]
    fn register_empty_mode_errors() {
        let mut reg = StrategyRegistry::new();
        assert_eq!(reg.register("  ", flat(dec!(1))), Err(PricingError::EmptyMode));
        assert!(reg.is_empty());
    }

    #[test]
    fn builtins_listed_in_menu_order() {
        let reg = StrategyRegistry::with_builtin_tariffs();
        assert_eq!(reg.list(), ["plane", "train", "bus"]);
    }

    // --- resolve ---

    #[test]
    fn resolve_known_mode_applies_its_function() {
        let mut reg = StrategyRegistry::new();
        reg.register("ferry", |req: &FareRequest| req.distance.checked_mul(dec!(0.05)))
            .unwrap();
        let s = reg.resolve("ferry").unwrap();
        assert_eq!(s.mode(), "ferry");
        assert_eq!(s.cost(&economy(dec!(200), 1)), Some(dec!(10)));
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let reg = StrategyRegistry::with_builtin_tariffs();
        assert_eq!(
            reg.resolve("Plane").unwrap_err(),
            PricingError::UnknownMode {
                mode: "Plane".to_string()
            }
        );
    }

    #[test]
    fn resolve_selector_maps_menu_numbers() {
        let reg = StrategyRegistry::with_builtin_tariffs();
        assert_eq!(reg.resolve_selector(1).unwrap().mode(), "plane");
        assert_eq!(reg.resolve_selector(2).unwrap().mode(), "train");
        assert_eq!(reg.resolve_selector(3).unwrap().mode(), "bus");
    }

    #[test]
    fn resolve_selector_rejects_out_of_menu() {
        let reg = StrategyRegistry::with_builtin_tariffs();
        for sel in [0, 4, -1, 300] {
            assert_eq!(
                reg.resolve_selector(sel).unwrap_err(),
                PricingError::InvalidSelector { selector: sel }
            );
        }
    }

    #[test]
    fn resolve_selector_after_deregister_is_unknown_mode() {
        let mut reg = StrategyRegistry::with_builtin_tariffs();
        assert!(reg.deregister("train"));
        assert!(matches!(
            reg.resolve_selector(2),
            Err(PricingError::UnknownMode { mode }) if mode == "train"
        ));
    }

    // --- deregister ---

    #[test]
    fn deregister_unknown_returns_false() {
        let mut reg = StrategyRegistry::new();
        assert!(!reg.deregister("ghost"));
    }

    #[test]
    fn deregister_preserves_insertion_order_of_remaining() {
        let mut reg = StrategyRegistry::with_builtin_tariffs();
        reg.deregister("train");
        assert_eq!(reg.list(), ["plane", "bus"]);
    }

    #[test]
    fn resolved_strategy_outlives_registry_entry() {
        let mut reg = StrategyRegistry::with_builtin_tariffs();
        let bus = reg.resolve("bus").unwrap();
        reg.deregister("bus");
        assert_eq!(bus.cost(&economy(dec!(500), 1)), Some(dec!(50)));
    }
}
