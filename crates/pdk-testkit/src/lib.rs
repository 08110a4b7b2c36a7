//! Shared test helpers for scenario tests across the workspace.

use pdk_notify::Subscriber;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, PoisonError};

/// One delivered update, as seen by a [`RecordingSubscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub subscriber: String,
    pub topic: String,
    pub value: Decimal,
}

/// Shared delivery log. Several recorders may append to one log so tests can
/// assert on global ordering.
pub type DeliveryLog = Arc<Mutex<Vec<Delivery>>>;

pub fn delivery_log() -> DeliveryLog {
    Arc::default()
}

pub fn snapshot(log: &DeliveryLog) -> Vec<Delivery> {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Subscriber that records every update it receives.
pub struct RecordingSubscriber {
    name: String,
    log: DeliveryLog,
}

impl RecordingSubscriber {
    pub fn new(name: impl Into<String>, log: &DeliveryLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            log: Arc::clone(log),
        })
    }

    /// Deliveries received by this recorder only.
    pub fn received(&self) -> Vec<Delivery> {
        snapshot(&self.log)
            .into_iter()
            .filter(|d| d.subscriber == self.name)
            .collect()
    }
}

impl Subscriber for RecordingSubscriber {
    fn on_update(&self, topic: &str, value: Decimal) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                subscriber: self.name.clone(),
                topic: topic.to_string(),
                value,
            });
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// `(subscriber, value)` pairs, in delivery order.
pub fn who_saw_what(log: &DeliveryLog) -> Vec<(String, Decimal)> {
    snapshot(log)
        .into_iter()
        .map(|d| (d.subscriber, d.value))
        .collect()
}
