use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use pdk_schemas::CurrencyFormat;
use rust_decimal::Decimal;

enum Sink {
    Stdout,
    Buffer(Vec<String>),
}

/// Line-oriented output for user-visible state transitions.
///
/// Clones share the same sink. The buffer variant exists so tests can assert
/// on exactly what a user would have seen.
#[derive(Clone)]
pub struct Transcript {
    sink: Arc<Mutex<Sink>>,
    currency: CurrencyFormat,
}

impl Transcript {
    pub fn stdout() -> Self {
        Self::from_sink(Sink::Stdout)
    }

    pub fn buffer() -> Self {
        Self::from_sink(Sink::Buffer(Vec::new()))
    }

    fn from_sink(sink: Sink) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            currency: CurrencyFormat::default(),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    pub fn money(&self, amount: Decimal) -> String {
        self.currency.format(amount)
    }

    pub fn line(&self, line: impl Into<String>) {
        let line = line.into();
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        match &mut *sink {
            Sink::Stdout => {
                // Broken pipe on stdout is not worth aborting a broadcast for.
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
            Sink::Buffer(lines) => lines.push(line),
        }
    }

    /// Captured lines; always empty for stdout.
    pub fn lines(&self) -> Vec<String> {
        match &*self.sink.lock().unwrap_or_else(PoisonError::into_inner) {
            Sink::Stdout => Vec::new(),
            Sink::Buffer(lines) => lines.clone(),
        }
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}
