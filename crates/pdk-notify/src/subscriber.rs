use rust_decimal::Decimal;

/// Anything that wants a topic's updates.
///
/// Every `Fn(&str, Decimal) + Send + Sync` closure is a subscriber, so ad-hoc
/// callbacks need no wrapper type.
pub trait Subscriber: Send + Sync {
    fn on_update(&self, topic: &str, value: Decimal);

    /// Label used in transition reports and logs.
    fn name(&self) -> &str {
        "subscriber"
    }
}

impl<F> Subscriber for F
where
    F: Fn(&str, Decimal) + Send + Sync,
{
    fn on_update(&self, topic: &str, value: Decimal) {
        self(topic, value)
    }
}
