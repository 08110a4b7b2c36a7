use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Built-in transport modes. Selector numbers are the console menu order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Plane,
    Train,
    Bus,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [Self::Plane, Self::Train, Self::Bus];

    /// Registry key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Train => "train",
            Self::Bus => "bus",
        }
    }

    pub fn selector(&self) -> u8 {
        match self {
            Self::Plane => 1,
            Self::Train => 2,
            Self::Bus => 3,
        }
    }

    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::Plane),
            2 => Some(Self::Train),
            3 => Some(Self::Bus),
            _ => None,
        }
    }

    /// Published tariff for the mode.
    pub fn tariff(&self) -> Tariff {
        match self {
            Self::Plane => Tariff::new(dec!(0.5), dec!(1.5), dec!(0.9)),
            Self::Train => Tariff::new(dec!(0.2), dec!(1.3), dec!(0.85)),
            Self::Bus => Tariff::new(dec!(0.1), dec!(1.2), dec!(0.8)),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode pricing constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tariff {
    /// Cost per unit distance per passenger.
    pub per_distance_rate: Decimal,
    /// Applied for [`ServiceClass::Business`]; must be >= 1.
    pub business_multiplier: Decimal,
    /// Applied when a discount is claimed; must be in (0, 1].
    pub discount_factor: Decimal,
}

impl Tariff {
    pub fn new(
        per_distance_rate: Decimal,
        business_multiplier: Decimal,
        discount_factor: Decimal,
    ) -> Self {
        debug_assert!(per_distance_rate >= Decimal::ZERO);
        debug_assert!(business_multiplier >= Decimal::ONE);
        debug_assert!(discount_factor > Decimal::ZERO && discount_factor <= Decimal::ONE);
        Self {
            per_distance_rate,
            business_multiplier,
            discount_factor,
        }
    }

    /// `distance * rate * passengers * service multiplier * discount factor`, unrounded.
    /// `None` when the product leaves `Decimal`'s range.
    pub fn price(&self, req: &FareRequest) -> Option<Decimal> {
        let service = match req.service_class {
            ServiceClass::Business => self.business_multiplier,
            ServiceClass::Economy => Decimal::ONE,
        };
        let discount = if req.has_discount {
            self.discount_factor
        } else {
            Decimal::ONE
        };
        req.distance
            .checked_mul(self.per_distance_rate)?
            .checked_mul(Decimal::from(req.passengers))?
            .checked_mul(service)?
            .checked_mul(discount)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ServiceClass {
    #[default]
    Economy,
    Business,
}

impl ServiceClass {
    /// Only the exact literal `business` selects business class; anything
    /// else (including `Business` or `economy`) prices as economy.
    pub fn from_literal(raw: &str) -> Self {
        if raw == "business" {
            Self::Business
        } else {
            Self::Economy
        }
    }
}

/// One cost query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FareRequest {
    pub distance: Decimal,
    pub passengers: u32,
    pub service_class: ServiceClass,
    pub has_discount: bool,
}

impl FareRequest {
    pub fn new(
        distance: Decimal,
        passengers: u32,
        service_class: ServiceClass,
        has_discount: bool,
    ) -> Self {
        Self {
            distance,
            passengers,
            service_class,
            has_discount,
        }
    }
}

/// A thread-safe, pure cost function. `None` means the cost is not
/// representable (overflow).
pub type CostFn = Arc<dyn Fn(&FareRequest) -> Option<Decimal> + Send + Sync>;

/// A pricing strategy: a mode key bound to a cost function. Cheap to clone;
/// clones share the same function.
#[derive(Clone)]
pub struct Strategy {
    mode: String,
    cost: CostFn,
}

impl Strategy {
    pub fn new<F>(mode: impl Into<String>, cost: F) -> Self
    where
        F: Fn(&FareRequest) -> Option<Decimal> + Send + Sync + 'static,
    {
        Self {
            mode: mode.into(),
            cost: Arc::new(cost),
        }
    }

    pub fn from_tariff(mode: impl Into<String>, tariff: Tariff) -> Self {
        Self::new(mode, move |req| tariff.price(req))
    }

    pub fn builtin(mode: TransportMode) -> Self {
        Self::from_tariff(mode.as_str(), mode.tariff())
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn cost(&self, req: &FareRequest) -> Option<Decimal> {
        (self.cost)(req)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("mode", &self.mode).finish_non_exhaustive()
    }
}

/// Errors from the registry and booking context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PricingError {
    /// Cost requested before any strategy was selected.
    StrategyNotSet,
    /// No strategy registered under this mode key.
    UnknownMode { mode: String },
    /// Menu selector outside 1..=3.
    InvalidSelector { selector: i64 },
    DuplicateMode { mode: String },
    EmptyMode,
    /// The cost does not fit in a `Decimal`.
    Overflow { mode: String },
}

impl PricingError {
    /// True for errors caused by context setup rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::StrategyNotSet)
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrategyNotSet => write!(f, "cost calculation strategy is not set"),
            Self::UnknownMode { mode } => write!(f, "no pricing strategy registered for '{mode}'"),
            Self::InvalidSelector { selector } => {
                write!(f, "invalid transport choice {selector}; expected 1, 2 or 3")
            }
            Self::DuplicateMode { mode } => {
                write!(f, "pricing strategy '{mode}' is already registered")
            }
            Self::EmptyMode => write!(f, "pricing strategy mode must not be empty"),
            Self::Overflow { mode } => {
                write!(f, "trip cost for '{mode}' is too large to calculate")
            }
        }
    }
}

impl std::error::Error for PricingError {}
