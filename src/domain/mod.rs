//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the accrual mode enum (`AccrualMode`)
//! - the validated computation input (`AccrualRequest`)
//! - the fetched daily rate table (`RateSeries`)
//! - computation outputs (`AccrualOutcome`, `DailyBalance`)

pub mod types;

pub use types::*;
