//! Interactive stdin prompt for `selic calc`.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt provides the "run `selic calc` and answer questions" UX
//!
//! Every question loops until it gets a valid answer; `q` cancels.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::cli::{CalcArgs, parse_user_amount, parse_user_date};
use crate::domain::{AccrualMode, AccrualRequest};
use crate::error::AppError;

/// Collect a full request from stdin, using `args` for defaults.
pub fn prompt_for_request(args: &CalcArgs) -> Result<AccrualRequest, AppError> {
    println!("Selic monetary adjustment (q to quit)");

    let principal = prompt_amount()?;
    let start_date = prompt_date("Start date", args.resolved_start())?;
    let end_date = prompt_date("End date", args.resolved_end())?;
    let mode = prompt_mode(args.mode)?;

    Ok(AccrualRequest {
        principal,
        start_date,
        end_date,
        mode,
    })
}

fn prompt_amount() -> Result<f64, AppError> {
    loop {
        let input = read_answer("Amount to adjust (R$): ")?;
        if input.is_empty() {
            println!("An amount is required.");
            continue;
        }
        match parse_user_amount(&input) {
            Ok(value) => return Ok(value),
            Err(err) => println!("{err}"),
        }
    }
}

fn prompt_date(label: &str, default: NaiveDate) -> Result<NaiveDate, AppError> {
    loop {
        let input = read_answer(&format!("{label} [{default}]: "))?;
        if input.is_empty() {
            return Ok(default);
        }
        match parse_user_date(&input) {
            Ok(date) => return Ok(date),
            Err(err) => println!("{err}"),
        }
    }
}

fn prompt_mode(default: AccrualMode) -> Result<AccrualMode, AppError> {
    loop {
        let input = read_answer(&format!(
            "Mode, [s]imple or [c]ompound [{}]: ",
            default.display_name().to_lowercase()
        ))?;
        match input.to_lowercase().as_str() {
            "" => return Ok(default),
            "s" | "simple" => return Ok(AccrualMode::Simple),
            "c" | "compound" => return Ok(AccrualMode::Compound),
            other => println!("Invalid mode '{other}'. Enter s or c."),
        }
    }
}

/// Print a prompt and read one trimmed line. `q` cancels, EOF is an error.
fn read_answer(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Provide an amount with `selic calc -a <amount>`.",
        ));
    }

    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Err(AppError::new(2, "Canceled."));
    }

    Ok(input.to_string())
}
