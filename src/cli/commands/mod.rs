pub mod dashboard;
pub mod investment;
pub mod session;
pub mod system;
pub mod transaction;

use chrono::NaiveDate;

use crate::cli::errors::CommandError;
use crate::cli::registry::{CommandArea, CommandEntry};
use crate::core::dates;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let groups = [
        (CommandArea::General, system::definitions()),
        (CommandArea::Session, session::definitions()),
        (CommandArea::Dashboard, dashboard::definitions()),
        (CommandArea::Transactions, transaction::definitions()),
        (CommandArea::Investments, investment::definitions()),
    ];
    groups
        .into_iter()
        .flat_map(|(area, entries)| entries.into_iter().map(move |entry| entry.in_area(area)))
        .collect()
}

pub(crate) fn expect_args<'a>(
    args: &'a [&'a str],
    count: usize,
    usage: &str,
) -> Result<&'a [&'a str], CommandError> {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("usage: {}", usage)));
    }
    Ok(&args[..count])
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid amount",
            raw
        ))),
    }
}

/// Accepts a fraction (`0.12`) or a percentage (`12%`).
pub(crate) fn parse_rate(raw: &str) -> Result<f64, CommandError> {
    match raw.trim().strip_suffix('%') {
        Some(percent) => Ok(parse_amount(percent)? / 100.0),
        None => parse_amount(raw),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    dates::parse_date(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{}` is not a YYYY-MM-DD date", raw))
    })
}

pub(crate) fn parse_months(raw: &str) -> Result<u32, CommandError> {
    raw.trim().parse::<u32>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a whole number of months", raw))
    })
}
