//! Shared "load pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> ingest -> session/window seeding -> projection
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::cli::CommonArgs;
use crate::data::IrccClient;
use crate::domain::{DrawData, SelectedWindow};
use crate::error::AppError;
use crate::session::Session;

/// Fetch the feed once and build the per-fetch aggregate.
///
/// The caller owns the client so it can inspect the fetch counter afterwards
/// (a repeat fetch is surfaced as a warning, not an error).
pub fn fetch_and_ingest(client: &mut IrccClient) -> Result<DrawData, AppError> {
    let raw = client.fetch_rounds()?;
    crate::io::ingest(raw)
}

/// Seed the session and starting window from the common CLI options, and
/// sync the chosen window back into the link so it is immediately shareable.
pub fn open_session(common: &CommonArgs) -> Result<(Session, SelectedWindow), AppError> {
    let mut session = Session::from_link(common.url.as_deref())?;
    let window = common.initial_window(session.period());
    session.set_period(window);
    Ok((session, window))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(period: Option<&str>, url: Option<&str>) -> CommonArgs {
        CommonArgs {
            period: period.and_then(SelectedWindow::from_query_value),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn session_seeds_window_from_link() {
        let (session, window) =
            open_session(&common(None, Some("https://ee-draws.example/?period=allDraws")))
                .unwrap();
        assert_eq!(window, SelectedWindow::AllDraws);
        assert_eq!(session.period(), Some(SelectedWindow::AllDraws));
    }

    #[test]
    fn unrecognized_link_period_falls_back_to_default() {
        let (session, window) =
            open_session(&common(None, Some("https://ee-draws.example/?period=bogus"))).unwrap();
        assert_eq!(window, SelectedWindow::default());
        // The fallback is written back, so the link round-trips from now on.
        assert_eq!(session.period(), Some(SelectedWindow::default()));
    }

    #[test]
    fn explicit_period_flag_wins_over_link() {
        let (_, window) = open_session(&common(
            Some("last50Draws"),
            Some("https://ee-draws.example/?period=allDraws"),
        ))
        .unwrap();
        assert_eq!(window, SelectedWindow::Last50Draws);
    }
}
