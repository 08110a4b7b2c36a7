use pdk_notify::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use std::thread;

/// Records `(label, topic, value)` into a shared, ordered log.
struct Probe {
    label: &'static str,
    log: Arc<Mutex<Vec<(&'static str, String, Decimal)>>>,
}

impl Subscriber for Probe {
    fn on_update(&self, topic: &str, value: Decimal) {
        self.log
            .lock()
            .unwrap()
            .push((self.label, topic.to_string(), value));
    }

    fn name(&self) -> &str {
        self.label
    }
}

type Log = Arc<Mutex<Vec<(&'static str, String, Decimal)>>>;

fn probe(label: &'static str, log: &Log) -> Arc<Probe> {
    Arc::new(Probe {
        label,
        log: Arc::clone(log),
    })
}

#[test]
fn scenario_a_then_b_both_see_value_in_order() {
    let log: Log = Arc::default();
    let a = probe("A", &log);
    let b = probe("B", &log);

    let n = SubjectNotifier::new();
    n.subscribe("X", &a);
    n.subscribe("X", &b);
    n.set_value("X", dec!(10));

    let got = log.lock().unwrap().clone();
    assert_eq!(
        got,
        [("A", "X".to_string(), dec!(10)), ("B", "X".to_string(), dec!(10))]
    );
}

#[test]
fn scenario_unsubscribed_subscriber_gets_nothing_further() {
    let log: Log = Arc::default();
    let a = probe("A", &log);
    let b = probe("B", &log);

    let n = SubjectNotifier::new();
    n.subscribe("X", &a);
    n.subscribe("X", &b);
    n.set_value("X", dec!(10));
    assert!(n.unsubscribe("X", &a));
    n.set_value("X", dec!(11));

    let labels: Vec<_> = log
        .lock()
        .unwrap()
        .iter()
        .map(|(l, _, v)| (*l, *v))
        .collect();
    assert_eq!(labels, [("A", dec!(10)), ("B", dec!(10)), ("B", dec!(11))]);
}

#[test]
fn scenario_topics_are_isolated() {
    let log: Log = Arc::default();
    let a = probe("A", &log);
    let n = SubjectNotifier::new();
    n.subscribe("AAPL", &a);

    assert_eq!(n.set_value("GOOG", dec!(1200)), 0);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn scenario_closures_are_subscribers() {
    let seen: Arc<Mutex<Vec<Decimal>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let cb = Arc::new(move |_topic: &str, value: Decimal| sink.lock().unwrap().push(value));

    let n = SubjectNotifier::new();
    n.subscribe("X", &cb);
    n.set_value("X", dec!(1));
    n.set_value("X", dec!(2));
    assert_eq!(*seen.lock().unwrap(), [dec!(1), dec!(2)]);
}

/// Unsubscribes itself from inside its own callback.
struct OneShot {
    notifier: Arc<SubjectNotifier>,
    me: Mutex<Option<Arc<OneShot>>>,
    hits: Mutex<u32>,
}

impl Subscriber for OneShot {
    fn on_update(&self, topic: &str, _value: Decimal) {
        *self.hits.lock().unwrap() += 1;
        if let Some(me) = self.me.lock().unwrap().take() {
            assert!(self.notifier.unsubscribe(topic, &me));
        }
    }
}

#[test]
fn scenario_subscriber_can_unsubscribe_during_fan_out() {
    let notifier = Arc::new(SubjectNotifier::new());
    let one_shot = Arc::new(OneShot {
        notifier: Arc::clone(&notifier),
        me: Mutex::new(None),
        hits: Mutex::new(0),
    });
    *one_shot.me.lock().unwrap() = Some(Arc::clone(&one_shot));

    let log: Log = Arc::default();
    let after = probe("after", &log);

    notifier.subscribe("X", &one_shot);
    notifier.subscribe("X", &after);

    // The snapshot taken before fan-out still includes `after`.
    assert_eq!(notifier.set_value("X", dec!(1)), 2);
    assert_eq!(notifier.set_value("X", dec!(2)), 1);
    assert_eq!(*one_shot.hits.lock().unwrap(), 1);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn scenario_concurrent_feeds_do_not_lose_values() {
    let notifier = Arc::new(SubjectNotifier::new());
    let log: Log = Arc::default();
    let a = probe("A", &log);
    notifier.subscribe("AAPL", &a);
    notifier.subscribe("GOOG", &a);

    let handles: Vec<_> = ["AAPL", "GOOG"]
        .into_iter()
        .map(|topic| {
            let n = Arc::clone(&notifier);
            thread::spawn(move || {
                for i in 1..=50 {
                    n.set_value(topic, Decimal::from(i));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(log.lock().unwrap().len(), 100);
    assert_eq!(notifier.value("AAPL"), Some(dec!(50)));
    assert_eq!(notifier.value("GOOG"), Some(dec!(50)));
}

#[test]
fn scenario_transitions_are_reported() {
    let out = Transcript::buffer();
    let n = SubjectNotifier::new().with_transcript(out.clone());
    let ivan = Arc::new(Trader::new("Trader Ivan", out.clone()));

    n.subscribe("AAPL", &ivan);
    n.set_value("AAPL", dec!(95));
    n.unsubscribe("AAPL", &ivan);
    // Not subscribed any more: no second report.
    assert!(!n.unsubscribe("AAPL", &ivan));

    assert_eq!(
        out.lines(),
        [
            "Trader Ivan subscribed to AAPL",
            "AAPL price changed to $95.00",
            "Trader Ivan received update: AAPL now $95.00",
            "Trader Ivan unsubscribed from AAPL",
        ]
    );
}
