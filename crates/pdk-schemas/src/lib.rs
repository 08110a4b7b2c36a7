use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed (non-locale) rendering of a money amount, e.g. `$1,350.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: u32,
    pub group_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
            group_separator: ",".to_string(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            ..Self::default()
        }
    }

    /// Midpoints round away from zero; the value itself is never mutated.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.decimals as usize, rounded.abs());

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(int_part, &self.group_separator));
        if let Some(f) = frac_part {
            out.push('.');
            out.push_str(f);
        }
        out
    }
}

fn group_thousands(int_part: &str, sep: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}
