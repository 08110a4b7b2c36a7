//! Subject notifier.
//!
//! One global mutex guards the topic map. Callbacks always run with the lock
//! released: `notify` snapshots the subscriber list first, so a subscriber
//! may subscribe or unsubscribe (itself included) from inside `on_update`.
//! Such changes take effect from the next fan-out; the current one finishes
//! against its snapshot.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{Subscriber, Transcript};

#[derive(Clone)]
struct SubscriberRef {
    handle: Weak<dyn Subscriber>,
    name: String,
}

impl SubscriberRef {
    fn points_to(&self, target: *const ()) -> bool {
        self.handle.as_ptr() as *const () == target
    }
}

#[derive(Default)]
struct TopicEntry {
    value: Option<Decimal>,
    subscribers: Vec<SubscriberRef>,
}

#[derive(Default)]
pub struct SubjectNotifier {
    topics: Mutex<BTreeMap<String, TopicEntry>>,
    transcript: Option<Transcript>,
}

impl SubjectNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report subscribe / unsubscribe / value-change transitions to `transcript`.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = Some(transcript);
        self
    }

    /// Append `subscriber` to `topic`, creating the topic if needed.
    /// Duplicates are kept; a twice-subscribed handle is notified twice.
    pub fn subscribe<S: Subscriber + 'static>(&self, topic: &str, subscriber: &Arc<S>) {
        let handle: Arc<dyn Subscriber> = subscriber.clone();
        self.subscribe_dyn(topic, &handle);
    }

    pub fn subscribe_dyn(&self, topic: &str, subscriber: &Arc<dyn Subscriber>) {
        let name = subscriber.name().to_string();
        self.lock()
            .entry(topic.to_string())
            .or_default()
            .subscribers
            .push(SubscriberRef {
                handle: Arc::downgrade(subscriber),
                name: name.clone(),
            });

        debug!(topic, subscriber = %name, "subscribed");
        self.report(|_| format!("{name} subscribed to {topic}"));
    }

    /// Remove the first registration of `subscriber` under `topic`.
    /// Returns `false` (and changes nothing) if there was none.
    pub fn unsubscribe<S: Subscriber + 'static>(&self, topic: &str, subscriber: &Arc<S>) -> bool {
        self.unsubscribe_ptr(topic, Arc::as_ptr(subscriber) as *const ())
    }

    pub fn unsubscribe_dyn(&self, topic: &str, subscriber: &Arc<dyn Subscriber>) -> bool {
        self.unsubscribe_ptr(topic, Arc::as_ptr(subscriber) as *const ())
    }

    fn unsubscribe_ptr(&self, topic: &str, target: *const ()) -> bool {
        let removed = {
            let mut topics = self.lock();
            topics.get_mut(topic).and_then(|entry| {
                let idx = entry.subscribers.iter().position(|r| r.points_to(target))?;
                Some(entry.subscribers.remove(idx))
            })
        };

        match removed {
            Some(r) => {
                debug!(topic, subscriber = %r.name, "unsubscribed");
                self.report(|_| format!("{} unsubscribed from {topic}", r.name));
                true
            }
            None => false,
        }
    }

    /// Store `value` for `topic` and synchronously notify its subscribers.
    /// Returns the number of callbacks delivered.
    pub fn set_value(&self, topic: &str, value: Decimal) -> usize {
        self.lock().entry(topic.to_string()).or_default().value = Some(value);

        debug!(topic, %value, "value set");
        self.report(|t| format!("{topic} price changed to {}", t.money(value)));
        self.notify(topic)
    }

    /// Deliver the current value of `topic` to each live subscriber, in
    /// subscription order. No-op when the topic has no value or no subscribers.
    pub fn notify(&self, topic: &str) -> usize {
        let (value, snapshot) = {
            let mut topics = self.lock();
            let Some(entry) = topics.get_mut(topic) else {
                return 0;
            };
            // Owners dropped these; nothing left to notify.
            entry.subscribers.retain(|r| r.handle.strong_count() > 0);
            let Some(value) = entry.value else {
                return 0;
            };
            (value, entry.subscribers.clone())
        };

        let mut delivered = 0;
        for r in snapshot {
            if let Some(subscriber) = r.handle.upgrade() {
                subscriber.on_update(topic, value);
                delivered += 1;
            }
        }

        debug!(topic, delivered, "fan-out complete");
        delivered
    }

    pub fn value(&self, topic: &str) -> Option<Decimal> {
        self.lock().get(topic).and_then(|e| e.value)
    }

    /// Registrations whose subscriber is still alive.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock()
            .get(topic)
            .map(|e| {
                e.subscribers
                    .iter()
                    .filter(|r| r.handle.strong_count() > 0)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Known topics, sorted.
    pub fn topics(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, TopicEntry>> {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, line: impl FnOnce(&Transcript) -> String) {
        if let Some(t) = &self.transcript {
            t.line(line(t));
        }
    }
}
