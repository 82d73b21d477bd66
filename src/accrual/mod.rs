//! Daily-rate accrual over a calendar date range.
//!
//! Both modes walk the same inclusive day range with the same rate lookup and
//! differ only in how each published day's fraction enters the accumulator:
//!
//! - simple: interest on the original principal, summed additively
//! - compound: the running balance multiplied by `(1 + fraction)`
//!
//! Days without a published rate (weekends, holidays) contribute nothing but
//! do not interrupt the walk. Pure functions; no I/O.

use chrono::NaiveDate;

use crate::domain::{AccrualMode, AccrualOutcome, AccrualRequest, DailyBalance, RateSeries};

/// Compute the adjusted amount for a validated request.
pub fn adjust(request: &AccrualRequest, rates: &RateSeries) -> AccrualOutcome {
    let mut simple_interest = 0.0;
    let mut balance = request.principal;
    let mut rate_days = 0usize;

    for day in range_days(request.start_date, request.end_date) {
        let Some(rate) = rates.get(day) else {
            continue;
        };
        let fraction = rate / 100.0;
        rate_days += 1;
        match request.mode {
            AccrualMode::Simple => simple_interest += request.principal * fraction,
            AccrualMode::Compound => balance *= 1.0 + fraction,
        }
    }

    let adjusted = match request.mode {
        AccrualMode::Simple => request.principal + simple_interest,
        AccrualMode::Compound => balance,
    };

    AccrualOutcome {
        adjusted,
        interest: adjusted - request.principal,
        rate_days,
        calendar_days: calendar_days(request.start_date, request.end_date),
    }
}

/// The running balance after each calendar day of the range.
///
/// One entry per day, including days without a published rate (balance
/// unchanged). The final entry's balance equals `adjust(...).adjusted`.
pub fn trajectory(request: &AccrualRequest, rates: &RateSeries) -> Vec<DailyBalance> {
    let days = calendar_days(request.start_date, request.end_date).max(0) as usize;
    let mut out = Vec::with_capacity(days);

    let mut simple_interest = 0.0;
    let mut balance = request.principal;

    for day in range_days(request.start_date, request.end_date) {
        let rate = rates.get(day);
        if let Some(rate) = rate {
            let fraction = rate / 100.0;
            match request.mode {
                AccrualMode::Simple => simple_interest += request.principal * fraction,
                AccrualMode::Compound => balance *= 1.0 + fraction,
            }
        }
        let current = match request.mode {
            AccrualMode::Simple => request.principal + simple_interest,
            AccrualMode::Compound => balance,
        };
        out.push(DailyBalance {
            date: day,
            rate,
            balance: current,
        });
    }

    out
}

/// Inclusive number of calendar days between `start` and `end`.
fn calendar_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Every calendar day from `start` to `end` inclusive, chronological order.
fn range_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt()).take_while(move |d| *d <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(principal: f64, start: NaiveDate, end: NaiveDate, mode: AccrualMode) -> AccrualRequest {
        AccrualRequest {
            principal,
            start_date: start,
            end_date: end,
            mode,
        }
    }

    fn flat_series(start: NaiveDate, days: usize, rate: f64) -> RateSeries {
        RateSeries::from_pairs(
            range_days(start, date(9999, 12, 31))
                .take(days)
                .map(|d| (d, rate)),
        )
    }

    #[test]
    fn single_day_without_rate_returns_principal() {
        let d = date(2023, 1, 1);
        for mode in [AccrualMode::Simple, AccrualMode::Compound] {
            let out = adjust(&request(500.0, d, d, mode), &RateSeries::new());
            assert_eq!(out.adjusted, 500.0);
            assert_eq!(out.interest, 0.0);
            assert_eq!(out.rate_days, 0);
            assert_eq!(out.calendar_days, 1);
        }
    }

    #[test]
    fn zero_principal_yields_zero_in_both_modes() {
        let start = date(2023, 1, 1);
        let series = flat_series(start, 10, 0.05);
        for mode in [AccrualMode::Simple, AccrualMode::Compound] {
            let out = adjust(&request(0.0, start, date(2023, 1, 10), mode), &series);
            assert_eq!(out.adjusted, 0.0);
        }
    }

    #[test]
    fn simple_interest_is_linear_in_principal() {
        let start = date(2023, 3, 1);
        let series = flat_series(start, 5, 0.043);
        let base = adjust(
            &request(250.0, start, date(2023, 3, 5), AccrualMode::Simple),
            &series,
        );
        let doubled = adjust(
            &request(500.0, start, date(2023, 3, 5), AccrualMode::Simple),
            &series,
        );
        assert!((doubled.interest - 2.0 * base.interest).abs() < 1e-12);
    }

    #[test]
    fn compound_never_shrinks_on_non_negative_rates() {
        let start = date(2022, 7, 1);
        let mut series = flat_series(start, 30, 0.049);
        series.insert(date(2022, 7, 10), 0.0);
        let out = adjust(
            &request(1234.56, start, date(2022, 7, 30), AccrualMode::Compound),
            &series,
        );
        assert!(out.adjusted >= 1234.56);
    }

    #[test]
    fn entries_outside_the_range_do_not_matter() {
        let start = date(2023, 1, 10);
        let end = date(2023, 1, 12);
        let inside = flat_series(start, 3, 0.05);

        let mut padded = inside.clone();
        padded.insert(date(2023, 1, 9), 9.9);
        padded.insert(date(2023, 1, 13), 9.9);

        for mode in [AccrualMode::Simple, AccrualMode::Compound] {
            let a = adjust(&request(1000.0, start, end, mode), &inside);
            let b = adjust(&request(1000.0, start, end, mode), &padded);
            assert_eq!(a.adjusted, b.adjusted);
            assert_eq!(a.rate_days, b.rate_days);
        }
    }

    #[test]
    fn modes_diverge_beyond_rounding_over_multiple_days() {
        // 1000 at 0.05%/day over three published days:
        // simple   = 1000 + 1000 * 0.0005 * 3 = 1001.50
        // compound = 1000 * 1.0005^3         ≈ 1001.5008
        let start = date(2023, 1, 1);
        let end = date(2023, 1, 3);
        let series = flat_series(start, 3, 0.05);

        let simple = adjust(&request(1000.0, start, end, AccrualMode::Simple), &series);
        let compound = adjust(&request(1000.0, start, end, AccrualMode::Compound), &series);

        assert!((simple.adjusted - 1001.50).abs() < 1e-9);
        assert!((compound.adjusted - 1001.500_75).abs() < 1e-6);
        assert!(compound.adjusted > simple.adjusted);
        assert_eq!(simple.rate_days, 3);
    }

    #[test]
    fn missing_middle_days_are_skipped_not_fatal() {
        // Fri 2023-01-06 and Mon 2023-01-09 published; weekend absent.
        let series = RateSeries::from_pairs([
            (date(2023, 1, 6), 0.05),
            (date(2023, 1, 9), 0.05),
        ]);
        let out = adjust(
            &request(1000.0, date(2023, 1, 6), date(2023, 1, 9), AccrualMode::Simple),
            &series,
        );
        assert_eq!(out.rate_days, 2);
        assert_eq!(out.calendar_days, 4);
        assert!((out.adjusted - 1001.0).abs() < 1e-9);
    }

    #[test]
    fn trajectory_matches_adjust_and_covers_every_day() {
        let start = date(2023, 1, 6);
        let end = date(2023, 1, 9);
        let series = RateSeries::from_pairs([
            (date(2023, 1, 6), 0.05),
            (date(2023, 1, 9), 0.03),
        ]);

        for mode in [AccrualMode::Simple, AccrualMode::Compound] {
            let req = request(1000.0, start, end, mode);
            let out = adjust(&req, &series);
            let path = trajectory(&req, &series);

            assert_eq!(path.len(), out.calendar_days as usize);
            assert_eq!(path.first().unwrap().date, start);
            assert_eq!(path.last().unwrap().date, end);
            assert_eq!(path.last().unwrap().balance, out.adjusted);
            // Weekend days carry no rate and leave the balance unchanged.
            assert!(path[1].rate.is_none());
            assert_eq!(path[1].balance, path[0].balance);
        }
    }
}
