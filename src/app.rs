//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - collects missing inputs interactively
//! - runs the fetch/accrue pipeline
//! - prints reports/plots or hands off to the TUI

use clap::Parser;

use crate::cli::{CalcArgs, Command, RatesArgs};
use crate::data::BcbClient;
use crate::domain::AccrualRequest;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `selic` binary.
pub fn run() -> Result<(), AppError> {
    // We want `selic` and `selic -a 1000` to behave like `selic tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Calc(args) => handle_calc(args),
        Command::Rates(args) => handle_rates(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_calc(args: CalcArgs) -> Result<(), AppError> {
    let request = build_request(&args)?;
    let client = BcbClient::from_env()?;
    let run = pipeline::run_adjust(&client, &request)?;

    println!("{}", crate::report::format_run_summary(&run));

    if args.plot && !args.no_plot {
        println!(
            "{}",
            crate::plot::render_balance_plot(&run.trajectory, args.width, args.height)
        );
    }

    Ok(())
}

fn handle_rates(args: RatesArgs) -> Result<(), AppError> {
    let start = args.resolved_start();
    let end = args.resolved_end();
    if end < start {
        return Err(AppError::new(2, "End date must not precede the start date."));
    }

    let client = BcbClient::from_env()?;
    let series = client.fetch_rates(start, end)?;
    println!("{}", crate::report::format_rates_table(&series));
    Ok(())
}

/// Resolve the request from flags, falling back to the interactive prompt.
fn build_request(args: &CalcArgs) -> Result<AccrualRequest, AppError> {
    match args.amount {
        Some(principal) => Ok(AccrualRequest {
            principal,
            start_date: args.resolved_start(),
            end_date: args.resolved_end(),
            mode: args.mode,
        }),
        None => crate::cli::prompt::prompt_for_request(args),
    }
}

/// Rewrite argv so `selic` defaults to `selic tui`.
///
/// Rules:
/// - `selic`                      -> `selic tui`
/// - `selic -a 1000 ...`          -> `selic tui -a 1000 ...`
/// - `selic --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "calc" | "rates" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["selic"])), argv(&["selic", "tui"]));
    }

    #[test]
    fn leading_flags_are_treated_as_tui_flags() {
        assert_eq!(
            rewrite_args(argv(&["selic", "-a", "1000"])),
            argv(&["selic", "tui", "-a", "1000"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["selic", "calc", "-a", "10"])),
            argv(&["selic", "calc", "-a", "10"])
        );
        assert_eq!(rewrite_args(argv(&["selic", "--help"])), argv(&["selic", "--help"]));
        assert_eq!(rewrite_args(argv(&["selic", "rates"])), argv(&["selic", "rates"]));
    }
}
