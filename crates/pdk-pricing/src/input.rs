//! Console fare-input parsing.
//!
//! Malformed input is a recoverable [`InputError`]; the caller decides whether
//! to re-prompt or give up. Only the trailing line terminator is stripped from
//! the service class, so `" business"` still prices as economy.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{ServiceClass, TransportMode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Text could not be parsed as the expected number type.
    Malformed { field: &'static str, raw: String },
    /// Integer parsed but is not a menu entry.
    UnknownSelector { selector: i64 },
    /// Number parsed but outside the accepted range.
    OutOfRange { field: &'static str, raw: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { field, raw } => write!(f, "{field}: '{raw}' is not a valid number"),
            Self::UnknownSelector { selector } => {
                write!(f, "transport choice {selector} is not on the menu")
            }
            Self::OutOfRange { field, raw } => write!(f, "{field}: '{raw}' must not be negative"),
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_selector(raw: &str) -> Result<TransportMode, InputError> {
    let selector: i64 = parse_number("transport choice", raw)?;
    u8::try_from(selector)
        .ok()
        .and_then(TransportMode::from_selector)
        .ok_or(InputError::UnknownSelector { selector })
}

pub fn parse_distance(raw: &str) -> Result<Decimal, InputError> {
    let distance: Decimal = parse_number("distance", raw)?;
    if distance.is_sign_negative() && !distance.is_zero() {
        return Err(InputError::OutOfRange {
            field: "distance",
            raw: raw.trim().to_string(),
        });
    }
    Ok(distance)
}

pub fn parse_passengers(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') && trimmed.parse::<i64>().is_ok() {
        return Err(InputError::OutOfRange {
            field: "passengers",
            raw: trimmed.to_string(),
        });
    }
    parse_number("passengers", raw)
}

pub fn parse_service_class(raw: &str) -> ServiceClass {
    ServiceClass::from_literal(raw.trim_end_matches(['\r', '\n']))
}

/// Case-insensitive exact match against the configured affirmative word.
pub fn parse_discount(raw: &str, affirmative: &str) -> bool {
    raw.trim().to_lowercase() == affirmative.trim().to_lowercase()
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    let trimmed = raw.trim();
    trimmed.parse::<T>().map_err(|_| InputError::Malformed {
        field,
        raw: trimmed.to_string(),
    })
}
