//! `pdk stock-demo`: a fixed subscribe / price / unsubscribe script.
//!
//! The script is plain data so the order of transitions is deterministic; the
//! pause after each price step is presentation only.

use std::sync::Arc;
use std::time::Duration;

use pdk_config::DeskConfig;
use pdk_notify::{SubjectNotifier, Subscriber, Trader, TradingRobot, Transcript};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    Ivan,
    Olga,
    Robot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Subscribe(&'static str, Actor),
    SetPrice(&'static str, Decimal),
    Unsubscribe(&'static str, Actor),
}

pub fn script() -> Vec<Step> {
    use Actor::*;
    use Step::*;
    vec![
        Subscribe("AAPL", Ivan),
        Subscribe("AAPL", Robot),
        Subscribe("GOOG", Olga),
        SetPrice("AAPL", Decimal::from(95)),
        SetPrice("AAPL", Decimal::from(155)),
        SetPrice("GOOG", Decimal::from(1200)),
        Unsubscribe("AAPL", Ivan),
        SetPrice("AAPL", Decimal::from(90)),
    ]
}

struct Cast {
    ivan: Arc<dyn Subscriber>,
    olga: Arc<dyn Subscriber>,
    robot: Arc<dyn Subscriber>,
}

impl Cast {
    fn new(cfg: &DeskConfig, out: &Transcript) -> Self {
        Self {
            ivan: Arc::new(Trader::new("Trader Ivan", out.clone())),
            olga: Arc::new(Trader::new("Trader Olga", out.clone())),
            robot: Arc::new(TradingRobot::new(
                cfg.demo.buy_threshold,
                cfg.demo.sell_threshold,
                out.clone(),
            )),
        }
    }

    fn get(&self, who: Actor) -> &Arc<dyn Subscriber> {
        match who {
            Actor::Ivan => &self.ivan,
            Actor::Olga => &self.olga,
            Actor::Robot => &self.robot,
        }
    }
}

pub async fn run(cfg: &DeskConfig, delay: Duration) {
    let out = Transcript::stdout().with_currency(cfg.currency.clone());
    play(cfg, &out, delay).await;
}

/// Play the script against `out`. Sleeps after every price step but the last.
pub async fn play(cfg: &DeskConfig, out: &Transcript, delay: Duration) {
    let exchange = SubjectNotifier::new().with_transcript(out.clone());
    let cast = Cast::new(cfg, out);
    let steps = script();
    let last_price = steps
        .iter()
        .rposition(|s| matches!(s, Step::SetPrice(..)));

    for (i, step) in steps.iter().enumerate() {
        debug!(step = ?step, "demo step");
        match step {
            Step::Subscribe(topic, who) => exchange.subscribe_dyn(topic, cast.get(*who)),
            Step::Unsubscribe(topic, who) => {
                exchange.unsubscribe_dyn(topic, cast.get(*who));
            }
            Step::SetPrice(topic, price) => {
                exchange.set_value(topic, *price);
                if Some(i) != last_price && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
