//! Debug bundle writer for inspecting fetched rates and daily accrual.
//!
//! Bound to the `d` key in the TUI. The bundle is a plain markdown file so it
//! can be pasted into an issue or diffed against a later run.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::report::format_brl;

pub fn write_debug_bundle(run: &RunOutput) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    fs::create_dir_all(&dir)
        .map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "selic_debug_{}_{}_{ts}.md",
        run.request.start_date.format("%Y%m%d"),
        run.request.end_date.format("%Y%m%d"),
    ));

    fs::write(&path, render_bundle(run))
        .map_err(|e| AppError::new(4, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

fn render_bundle(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("# selic debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!(
        "- range: {} → {} ({} calendar days)\n",
        run.request.start_date, run.request.end_date, run.outcome.calendar_days
    ));
    out.push_str(&format!("- mode: {}\n", run.request.mode.display_name()));
    out.push_str(&format!("- principal: {}\n", format_brl(run.request.principal)));
    out.push_str(&format!(
        "- rate days: {} of {}\n",
        run.outcome.rate_days, run.outcome.calendar_days
    ));
    out.push_str(&format!("- adjusted: {}\n", format_brl(run.outcome.adjusted)));
    out.push_str(&format!("- interest: {}\n", format_brl(run.outcome.interest)));

    out.push_str("\n## Daily balances\n\n");
    out.push_str("| date | rate (% per day) | balance (R$) |\n");
    out.push_str("|------|------------------|--------------|\n");
    for day in &run.trajectory {
        let rate = day
            .rate
            .map(|r| format!("{r:.6}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| {} | {rate} | {:.2} |\n",
            day.date, day.balance
        ));
    }

    out
}
