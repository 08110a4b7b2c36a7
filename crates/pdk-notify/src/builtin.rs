use rust_decimal::Decimal;
use tracing::debug;

use crate::{Subscriber, Transcript};

/// Pass-through subscriber: reports every update it receives.
pub struct Trader {
    name: String,
    out: Transcript,
}

impl Trader {
    pub fn new(name: impl Into<String>, out: Transcript) -> Self {
        Self {
            name: name.into(),
            out,
        }
    }
}

impl Subscriber for Trader {
    fn on_update(&self, topic: &str, value: Decimal) {
        self.out.line(format!(
            "{} received update: {topic} now {}",
            self.name,
            self.out.money(value)
        ));
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Buy => "buys",
            Self::Sell => "sells",
        }
    }
}

/// Threshold subscriber: buys at or below `buy_threshold`, sells at or above
/// `sell_threshold`, stays silent in between. Buy wins if the bands overlap.
pub struct TradingRobot {
    buy_threshold: Decimal,
    sell_threshold: Decimal,
    out: Transcript,
}

impl TradingRobot {
    pub fn new(buy_threshold: Decimal, sell_threshold: Decimal, out: Transcript) -> Self {
        Self {
            buy_threshold,
            sell_threshold,
            out,
        }
    }

    pub fn decide(&self, value: Decimal) -> Option<TradeAction> {
        if value <= self.buy_threshold {
            Some(TradeAction::Buy)
        } else if value >= self.sell_threshold {
            Some(TradeAction::Sell)
        } else {
            None
        }
    }
}

impl Subscriber for TradingRobot {
    fn on_update(&self, topic: &str, value: Decimal) {
        let Some(action) = self.decide(value) else {
            debug!(topic, %value, "robot holds");
            return;
        };
        self.out.line(format!(
            "Trading robot {} {topic} at {}",
            action.verb(),
            self.out.money(value)
        ));
    }

    fn name(&self) -> &str {
        "Trading robot"
    }
}
