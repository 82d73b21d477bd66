//! Formatted terminal output for adjustment runs.
//!
//! We keep formatting code in one place so:
//! - the accrual code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::RateSeries;

/// Two-decimal BRL string, the same rendering the original form used.
pub fn format_brl(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Format the full run summary (inputs + series coverage + result).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== selic - Monetary Adjustment (BCB Selic) ===\n");
    out.push_str(&format!("Amount:   {}\n", format_brl(run.request.principal)));
    out.push_str(&format!(
        "Range:    {} → {} ({} calendar days)\n",
        run.request.start_date, run.request.end_date, run.outcome.calendar_days
    ));
    out.push_str(&format!("Mode:     {}\n", run.request.mode.display_name()));
    out.push_str(&format!(
        "Rates:    {} of {} days with a published rate\n",
        run.outcome.rate_days, run.outcome.calendar_days
    ));
    if let Some((first, last)) = run.series.span() {
        out.push_str(&format!("Series:   {first} → {last}\n"));
    }

    out.push('\n');
    out.push_str(&format!("Adjusted: {}\n", format_brl(run.outcome.adjusted)));
    out.push_str(&format!(
        "Interest: {}{}\n",
        format_brl(run.outcome.interest),
        percent_suffix(run)
    ));

    out
}

/// Format the daily rate table for `selic rates`.
pub fn format_rates_table(series: &RateSeries) -> String {
    let mut out = String::new();

    out.push_str(&format!("Selic daily rates: {} entries\n", series.len()));
    if series.is_empty() {
        out.push_str("(no rates published in the requested range)\n");
        return out;
    }

    out.push_str("date        rate (% per day)\n");
    for (date, rate) in series.sorted() {
        out.push_str(&format!("{date}  {rate:.6}\n"));
    }

    out
}

fn percent_suffix(run: &RunOutput) -> String {
    if run.request.principal > 0.0 {
        let pct = run.outcome.interest / run.request.principal * 100.0;
        format!(" ({pct:+.4}%)")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_adjust_with_series;
    use crate::domain::{AccrualMode, AccrualRequest};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_brl_rounds_to_two_decimals() {
        assert_eq!(format_brl(0.0), "R$ 0.00");
        assert_eq!(format_brl(1001.5008), "R$ 1001.50");
        assert_eq!(format_brl(1001.506), "R$ 1001.51");
    }

    #[test]
    fn run_summary_reports_result_and_coverage() {
        let series = RateSeries::from_pairs([
            (date(2023, 1, 1), 0.05),
            (date(2023, 1, 2), 0.05),
            (date(2023, 1, 3), 0.05),
        ]);
        let request = AccrualRequest {
            principal: 1000.0,
            start_date: date(2023, 1, 1),
            end_date: date(2023, 1, 3),
            mode: AccrualMode::Simple,
        };
        let run = run_adjust_with_series(&request, series);

        let text = format_run_summary(&run);
        assert!(text.contains("Adjusted: R$ 1001.50"));
        assert!(text.contains("3 of 3 days with a published rate"));
        assert!(text.contains("Mode:     Simple"));
    }

    #[test]
    fn zero_amount_renders_as_a_result_not_an_error() {
        let request = AccrualRequest {
            principal: 0.0,
            start_date: date(2023, 1, 1),
            end_date: date(2023, 1, 3),
            mode: AccrualMode::Compound,
        };
        let run = run_adjust_with_series(&request, RateSeries::new());

        let text = format_run_summary(&run);
        assert!(text.contains("Adjusted: R$ 0.00"));
        assert!(text.contains("Interest: R$ 0.00\n"));
    }

    #[test]
    fn rates_table_is_sorted_and_handles_empty_series() {
        let series = RateSeries::from_pairs([
            (date(2023, 1, 2), 0.03),
            (date(2023, 1, 1), 0.05),
        ]);
        let table = format_rates_table(&series);
        let first_entry = table.lines().nth(2).unwrap();
        assert!(first_entry.starts_with("2023-01-01"));
        assert!(first_entry.ends_with("0.050000"));

        let empty = format_rates_table(&RateSeries::new());
        assert!(empty.contains("no rates published"));
    }
}
