//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the accrual computation
//! - rendered by both the CLI and the TUI
//! - dumped into debug bundles for inspection

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How daily rates combine over the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccrualMode {
    /// Each day's interest is a fixed fraction of the original principal, summed.
    Simple,
    /// The running balance grows by `(1 + rate)` every published day.
    Compound,
}

impl AccrualMode {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            AccrualMode::Simple => "Simple",
            AccrualMode::Compound => "Compound",
        }
    }

    /// The other mode (the TUI cycles with ←/→).
    pub fn toggle(self) -> Self {
        match self {
            AccrualMode::Simple => AccrualMode::Compound,
            AccrualMode::Compound => AccrualMode::Simple,
        }
    }
}

/// One adjustment computation's input.
///
/// `validate` is the single gate for user-supplied values; the accrual engine
/// itself assumes a validated request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualRequest {
    /// Amount to adjust (BRL).
    pub principal: f64,
    /// Range start (inclusive).
    pub start_date: NaiveDate,
    /// Range end (inclusive). Must not precede `start_date`.
    pub end_date: NaiveDate,
    pub mode: AccrualMode,
}

impl AccrualRequest {
    /// Reject invalid inputs before any fetch or computation happens.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(AppError::new(2, "Amount must be a non-negative number."));
        }
        if self.end_date < self.start_date {
            return Err(AppError::new(2, "End date must not precede the start date."));
        }
        Ok(())
    }
}

/// Daily Selic rates keyed by calendar date.
///
/// Values are percentages per day as published by the BCB (e.g. `0.05` means
/// 0.05%). Weekends and holidays simply have no entry; lookups for those days
/// return `None` and contribute no accrual.
#[derive(Debug, Clone, Default)]
pub struct RateSeries {
    rates: HashMap<NaiveDate, f64>,
}

impl RateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, rate: f64) {
        self.rates.insert(date, rate);
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.rates.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All entries in chronological order (for tables and debug bundles).
    pub fn sorted(&self) -> Vec<(NaiveDate, f64)> {
        let mut out: Vec<_> = self.rates.iter().map(|(&d, &r)| (d, r)).collect();
        out.sort_by_key(|(d, _)| *d);
        out
    }

    /// First and last published dates, if any.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rates.keys().min()?;
        let last = self.rates.keys().max()?;
        Some((*first, *last))
    }
}

/// Result of one adjustment computation.
///
/// Always produced on success; a legitimately zero `adjusted` value is a valid
/// outcome and must never be conflated with a fetch failure.
#[derive(Debug, Clone, Copy)]
pub struct AccrualOutcome {
    /// Final adjusted amount.
    pub adjusted: f64,
    /// `adjusted - principal`.
    pub interest: f64,
    /// Days in the range with a published rate.
    pub rate_days: usize,
    /// Inclusive length of the requested range.
    pub calendar_days: i64,
}

/// Running balance after one calendar day of the range.
#[derive(Debug, Clone, Copy)]
pub struct DailyBalance {
    pub date: NaiveDate,
    /// Published daily rate for this date (percent), if any.
    pub rate: Option<f64>,
    /// Balance at the end of this day.
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rejects_reversed_range() {
        let request = AccrualRequest {
            principal: 100.0,
            start_date: date(2023, 6, 1),
            end_date: date(2023, 5, 1),
            mode: AccrualMode::Simple,
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_amounts() {
        let mut request = AccrualRequest {
            principal: -1.0,
            start_date: date(2023, 1, 1),
            end_date: date(2023, 1, 2),
            mode: AccrualMode::Compound,
        };
        assert!(request.validate().is_err());

        request.principal = f64::NAN;
        assert!(request.validate().is_err());

        request.principal = 0.0;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rate_series_sorts_and_reports_span() {
        let series = RateSeries::from_pairs([
            (date(2023, 1, 3), 0.02),
            (date(2023, 1, 1), 0.05),
            (date(2023, 1, 2), 0.03),
        ]);

        let sorted = series.sorted();
        assert_eq!(sorted[0], (date(2023, 1, 1), 0.05));
        assert_eq!(sorted[2], (date(2023, 1, 3), 0.02));
        assert_eq!(series.span(), Some((date(2023, 1, 1), date(2023, 1, 3))));
        assert_eq!(RateSeries::new().span(), None);
    }

    #[test]
    fn mode_toggle_cycles_both_ways() {
        assert_eq!(AccrualMode::Simple.toggle(), AccrualMode::Compound);
        assert_eq!(AccrualMode::Compound.toggle(), AccrualMode::Simple);
    }
}
