//! Banco Central do Brasil SGS API integration for the daily Selic series.
//!
//! The SGS payload uses Brazilian locale conventions: slash-delimited
//! `DD/MM/YYYY` dates and comma decimal separators. All of that parsing stays
//! behind this module; the rest of the crate only ever sees typed
//! `NaiveDate`s and `f64`s.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::RateSeries;
use crate::error::AppError;

/// SGS series 11: daily Selic rate, percent per day.
const DEFAULT_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie/bcdata.sgs.11/dados";

/// Date format the SGS API uses in both requests and payloads.
const SGS_DATE_FMT: &str = "%d/%m/%Y";

pub struct BcbClient {
    client: Client,
    base_url: String,
}

impl BcbClient {
    /// Build a client against the public SGS endpoint.
    ///
    /// `SELIC_API_URL` in the environment (`.env` supported) overrides the
    /// base URL, which lets integration setups point the tool at a stub.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url =
            std::env::var("SELIC_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Fetch the daily Selic rates published in `[start, end]` inclusive.
    ///
    /// Weekends and holidays are simply absent from the response; the caller
    /// must not treat a sparse (or empty) series as a failure.
    pub fn fetch_rates(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, AppError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("formato", "json".to_string()),
                ("dataInicial", start.format(SGS_DATE_FMT).to_string()),
                ("dataFinal", end.format(SGS_DATE_FMT).to_string()),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("BCB request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("BCB request failed with status {}.", resp.status()),
            ));
        }

        let records: Vec<SgsRecord> = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse BCB response: {e}")))?;

        series_from_records(records)
    }
}

#[derive(Debug, Deserialize)]
struct SgsRecord {
    #[serde(rename = "data")]
    date: String,
    #[serde(rename = "valor")]
    value: String,
}

fn series_from_records(records: Vec<SgsRecord>) -> Result<RateSeries, AppError> {
    let mut series = RateSeries::new();
    for record in records {
        let date = NaiveDate::parse_from_str(&record.date, SGS_DATE_FMT)
            .map_err(|e| AppError::new(4, format!("Invalid BCB date '{}': {e}", record.date)))?;
        let value = parse_rate(&record.value).ok_or_else(|| {
            AppError::new(
                4,
                format!("Invalid BCB rate value '{}' for {}.", record.value, record.date),
            )
        })?;
        series.insert(date, value);
    }
    Ok(series)
}

/// Parse an SGS decimal, accepting the comma separator the API publishes.
fn parse_rate(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    let v = cleaned.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
