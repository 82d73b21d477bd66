//! Command-line parsing for the Selic adjustment calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the accrual/data code.

use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::domain::AccrualMode;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "selic", version, about = "Selic-indexed monetary adjustment calculator (BCB SGS)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Adjust an amount over a date range and print the result.
    Calc(CalcArgs),
    /// Print the fetched daily rate table only (useful for scripting).
    Rates(RatesArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same fetch/accrue pipeline as `selic calc`, but renders
    /// the result in a terminal UI using Ratatui.
    Tui(CalcArgs),
}

/// Common options for one-shot calculation (and TUI prefill).
#[derive(Debug, Parser, Clone)]
pub struct CalcArgs {
    /// Amount to adjust (BRL). `calc` prompts interactively when omitted.
    #[arg(short = 'a', long)]
    pub amount: Option<f64>,

    /// Range start, YYYY-MM-DD or DD/MM/YYYY. Default: one year before today.
    #[arg(short = 's', long, value_parser = parse_user_date)]
    pub start: Option<NaiveDate>,

    /// Range end, YYYY-MM-DD or DD/MM/YYYY. Default: today.
    #[arg(short = 'e', long, value_parser = parse_user_date)]
    pub end: Option<NaiveDate>,

    /// Accrual mode.
    #[arg(short = 'm', long, value_enum, default_value_t = AccrualMode::Simple)]
    pub mode: AccrualMode,

    /// Render an ASCII chart of the running balance (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

impl CalcArgs {
    pub fn resolved_start(&self) -> NaiveDate {
        self.start.unwrap_or_else(default_start)
    }

    pub fn resolved_end(&self) -> NaiveDate {
        self.end.unwrap_or_else(default_end)
    }
}

/// Options for printing the rate table.
#[derive(Debug, Parser, Clone)]
pub struct RatesArgs {
    /// Range start, YYYY-MM-DD or DD/MM/YYYY. Default: one year before today.
    #[arg(short = 's', long, value_parser = parse_user_date)]
    pub start: Option<NaiveDate>,

    /// Range end, YYYY-MM-DD or DD/MM/YYYY. Default: today.
    #[arg(short = 'e', long, value_parser = parse_user_date)]
    pub end: Option<NaiveDate>,
}

impl RatesArgs {
    pub fn resolved_start(&self) -> NaiveDate {
        self.start.unwrap_or_else(default_start)
    }

    pub fn resolved_end(&self) -> NaiveDate {
        self.end.unwrap_or_else(default_end)
    }
}

/// Default range start: one year before today (matches the original form UI).
pub fn default_start() -> NaiveDate {
    default_end()
        .checked_sub_days(Days::new(365))
        .unwrap_or_else(default_end)
}

/// Default range end: today.
pub fn default_end() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a user-supplied date, accepting ISO and the upstream's convention.
pub fn parse_user_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(format!(
        "Invalid date '{trimmed}' (expected YYYY-MM-DD or DD/MM/YYYY)."
    ))
}

/// Parse a user-supplied amount, accepting a comma decimal separator.
pub fn parse_user_amount(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().replace(',', ".");
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Invalid amount '{}'.", raw.trim()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "Amount must be a non-negative number (got '{}').",
            raw.trim()
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_date_accepts_both_conventions() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(parse_user_date("2023-01-02").unwrap(), expected);
        assert_eq!(parse_user_date("02/01/2023").unwrap(), expected);
        assert_eq!(parse_user_date("  2023-01-02 ").unwrap(), expected);
        assert!(parse_user_date("01-02-2023").is_err());
        assert!(parse_user_date("yesterday").is_err());
    }

    #[test]
    fn parse_user_amount_accepts_comma_decimals_and_rejects_negatives() {
        assert_eq!(parse_user_amount("1234,56").unwrap(), 1234.56);
        assert_eq!(parse_user_amount("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_user_amount("0").unwrap(), 0.0);
        assert!(parse_user_amount("-5").is_err());
        assert!(parse_user_amount("abc").is_err());
        assert!(parse_user_amount("inf").is_err());
    }

    #[test]
    fn default_range_spans_one_year() {
        let (start, end) = (default_start(), default_end());
        assert!(start < end);
        assert_eq!((end - start).num_days(), 365);
    }
}
