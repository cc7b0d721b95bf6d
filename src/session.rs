//! Share-link session state.
//!
//! The selected window is persisted in the `period` query parameter of a
//! shareable URL: read once at startup (a link someone passed via `--url`),
//! rewritten on every window change, and shown in the TUI so the current view
//! can be shared back. The parameter value is always one of the canonical
//! window identifiers, so a written link reads back to the same window.

use url::Url;

use crate::domain::{PERIOD_PARAM, SelectedWindow};
use crate::error::AppError;

/// Base link used when the user did not hand us one.
const DEFAULT_SHARE_URL: &str = "https://ee-draws.example/";

#[derive(Debug)]
pub struct Session {
    url: Url,
}

impl Session {
    /// Build a session from an optional share link.
    ///
    /// A missing link starts from the default base; a malformed link is a
    /// usage error (the user typed it), not a fallback case.
    pub fn from_link(link: Option<&str>) -> Result<Self, AppError> {
        let url = Url::parse(link.unwrap_or(DEFAULT_SHARE_URL))
            .map_err(|e| AppError::usage(format!("Invalid session link: {e}")))?;
        Ok(Self { url })
    }

    /// Window recorded in the link, if the `period` value is recognized.
    ///
    /// Unrecognized values read as `None` and the caller falls back to the
    /// default window; they are overwritten on the next `set_period`.
    pub fn period(&self) -> Option<SelectedWindow> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == PERIOD_PARAM)
            .and_then(|(_, v)| SelectedWindow::from_query_value(&v))
    }

    /// Re-sync the link to a newly selected window.
    pub fn set_period(&mut self, window: SelectedWindow) {
        let retained: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != PERIOD_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &retained {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(PERIOD_PARAM, window.query_value());
    }

    /// The current share link.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }
}
