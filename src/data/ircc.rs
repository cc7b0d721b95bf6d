//! IRCC Express Entry rounds feed client.
//!
//! A single unauthenticated GET against a fixed public URL. The document is
//! `{ "rounds": [...] }` with the rounds newest-first; ingest (not this
//! module) is responsible for reversing and indexing them.

use reqwest::blocking::Client;

use crate::domain::{RawRound, RoundsDocument};
use crate::error::AppError;

const ROUNDS_URL: &str =
    "https://www.canada.ca/content/dam/ircc/documents/json/ee_rounds_123_en.json";

/// Environment override for the feed URL (useful for pointing at a local
/// copy of the document during development).
const ROUNDS_URL_ENV: &str = "EED_ROUNDS_URL";

pub struct IrccClient {
    client: Client,
    rounds_url: String,
    fetches: u32,
}

impl IrccClient {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let rounds_url =
            std::env::var(ROUNDS_URL_ENV).unwrap_or_else(|_| ROUNDS_URL.to_string());
        Self {
            client: Client::new(),
            rounds_url,
            fetches: 0,
        }
    }

    /// Fetch the rounds array, newest-first, exactly as published.
    ///
    /// The design fetches at most once in normal operation; window changes
    /// re-project resident data and never come back here. Successful fetches
    /// are counted so callers can surface a repeat as an anomaly (see
    /// [`IrccClient::anomalous_refetch`]). Failure leaves no partial state:
    /// the caller stays dataless.
    pub fn fetch_rounds(&mut self) -> Result<Vec<RawRound>, AppError> {
        let resp = self
            .client
            .get(&self.rounds_url)
            .send()
            .map_err(|e| AppError::fetch(format!("Rounds request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "Rounds request failed with status {}.",
                resp.status()
            )));
        }

        let body: RoundsDocument = resp
            .json()
            .map_err(|e| AppError::fetch(format!("Failed to parse rounds document: {e}")))?;

        self.fetches += 1;
        Ok(body.rounds)
    }

    /// Number of successful fetches so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetches
    }

    /// True once the feed has been fetched more than once.
    ///
    /// A second fetch is a logged anomaly, not an error: the data is
    /// refreshed normally, but whoever triggered it should be visible in the
    /// active observability sink (stderr or the TUI status line).
    pub fn anomalous_refetch(&self) -> bool {
        self.fetches > 1
    }
}

/// Warning text for the fetch-once anomaly, shared by the CLI and TUI sinks.
pub fn refetch_warning(fetches: u32) -> String {
    format!("warning: rounds feed fetched {fetches} times; expected a single fetch")
}
