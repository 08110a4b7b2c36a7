//! Travel cost commands: `pdk fare` (interactive) and `pdk quote` (flags).

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use pdk_config::DeskConfig;
use pdk_pricing::input::{
    parse_discount, parse_distance, parse_passengers, parse_selector, parse_service_class,
};
use pdk_pricing::{BookingContext, FareRequest, InputError, StrategyRegistry};
use pdk_schemas::CurrencyFormat;
use tracing::{info, warn};

const PROMPT_MODE: &str = "Choose transport: 1 - plane, 2 - train, 3 - bus";
const PROMPT_DISTANCE: &str = "Enter distance in kilometres:";
const PROMPT_PASSENGERS: &str = "Enter number of passengers:";
const PROMPT_CLASS: &str = "Choose service class: economy / business";

/// Prompt-driven fare session. Malformed numbers re-prompt; an off-menu
/// transport choice ends the session without error.
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    cfg: &DeskConfig,
) -> Result<()> {
    let registry = StrategyRegistry::with_builtin_tariffs();

    let mode = match prompt_until(input, out, PROMPT_MODE, parse_selector) {
        Ok(mode) => mode,
        Err(PromptError::Rejected(InputError::UnknownSelector { selector })) => {
            warn!(selector, "off-menu transport choice");
            writeln!(out, "Invalid transport choice.")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut ctx = BookingContext::new();
    ctx.set_strategy(registry.resolve(mode.as_str())?);

    let distance = prompt_until(input, out, PROMPT_DISTANCE, parse_distance)?;
    let passengers = prompt_until(input, out, PROMPT_PASSENGERS, parse_passengers)?;

    writeln!(out, "{PROMPT_CLASS}")?;
    let service_class = parse_service_class(&read_answer(input)?);

    writeln!(out, "Discount? ({} / no)", cfg.fare.affirmative)?;
    let has_discount = parse_discount(&read_answer(input)?, &cfg.fare.affirmative);

    let req = FareRequest::new(distance, passengers, service_class, has_discount);
    writeln!(out, "{}", render(&ctx, &req, &cfg.currency))?;
    Ok(())
}

/// One-shot quote from already-collected answers.
pub fn quote(
    cfg: &DeskConfig,
    mode: &str,
    distance: &str,
    passengers: &str,
    service_class: &str,
    has_discount: bool,
) -> Result<String> {
    let registry = StrategyRegistry::with_builtin_tariffs();
    let strategy = registry
        .resolve(mode)
        .with_context(|| format!("expected one of: {}", registry.list().join(" | ")))?;

    let req = FareRequest::new(
        parse_distance(distance)?,
        parse_passengers(passengers)?,
        parse_service_class(service_class),
        has_discount,
    );

    Ok(render(
        &BookingContext::with_strategy(strategy),
        &req,
        &cfg.currency,
    ))
}

/// Calculation errors are reported as a line, not propagated.
fn render(ctx: &BookingContext, req: &FareRequest, currency: &CurrencyFormat) -> String {
    match ctx.calculate(req) {
        Ok(cost) => {
            info!(mode = ctx.strategy_mode().unwrap_or("-"), %cost, "fare quoted");
            format!("Trip cost: {}", currency.format(cost))
        }
        Err(e) => {
            warn!(error = %e, "fare calculation failed");
            format!("Error: {e}")
        }
    }
}

#[derive(Debug)]
enum PromptError {
    Rejected(InputError),
    Io(anyhow::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(e) => fmt::Display::fmt(e, f),
            Self::Io(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for PromptError {}

/// Re-prompt on malformed or out-of-range input. Off-menu selectors are
/// returned to the caller, which owns that policy.
fn prompt_until<R, W, T>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, InputError>,
) -> Result<T, PromptError>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "{prompt}").map_err(|e| PromptError::Io(e.into()))?;
        let raw = read_answer(input).map_err(PromptError::Io)?;
        match parse(&raw) {
            Ok(v) => return Ok(v),
            Err(e @ InputError::UnknownSelector { .. }) => return Err(PromptError::Rejected(e)),
            Err(e) => {
                warn!(error = %e, "rejected fare input");
                writeln!(out, "Invalid input: {e}").map_err(|e| PromptError::Io(e.into()))?;
            }
        }
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read stdin")?;
    if n == 0 {
        bail!("input closed before the fare was complete");
    }
    Ok(line)
}
