//! Shared "adjust pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> BCB fetch -> accrue -> trajectory
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::accrual;
use crate::data::BcbClient;
use crate::domain::{AccrualOutcome, AccrualRequest, DailyBalance, RateSeries};
use crate::error::AppError;

/// All computed outputs of a single adjustment run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub request: AccrualRequest,
    pub series: RateSeries,
    pub outcome: AccrualOutcome,
    pub trajectory: Vec<DailyBalance>,
}

/// Validate, fetch the rate series, and compute the adjustment.
pub fn run_adjust(client: &BcbClient, request: &AccrualRequest) -> Result<RunOutput, AppError> {
    request.validate()?;
    let series = client.fetch_rates(request.start_date, request.end_date)?;
    Ok(run_adjust_with_series(request, series))
}

/// Compute the adjustment against an already-fetched series.
///
/// This is useful for the TUI where amount/mode edits should recompute
/// without re-fetching.
pub fn run_adjust_with_series(request: &AccrualRequest, series: RateSeries) -> RunOutput {
    let outcome = accrual::adjust(request, &series);
    let trajectory = accrual::trajectory(request, &series);
    RunOutput {
        request: *request,
        series,
        outcome,
        trajectory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccrualMode;
    use chrono::NaiveDate;

    #[test]
    fn run_with_series_ties_outcome_and_trajectory_together() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();
        let series = RateSeries::from_pairs([
            (start, 0.05),
            (NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(), 0.05),
        ]);
        let request = AccrualRequest {
            principal: 1000.0,
            start_date: start,
            end_date: end,
            mode: AccrualMode::Compound,
        };

        let run = run_adjust_with_series(&request, series);
        assert_eq!(run.trajectory.len(), 3);
        assert_eq!(run.trajectory.last().unwrap().balance, run.outcome.adjusted);
        assert_eq!(run.outcome.rate_days, 2);
    }
}
