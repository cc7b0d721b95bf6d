//! Command-line parsing for the Express Entry draw chart.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data-shaping code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SelectedWindow;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eed", version, about = "Express Entry draw statistics (IRCC feed)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the rounds feed and print a summary, a per-draw table, and an
    /// ASCII chart of the windowed CRS trend.
    Show(ShowArgs),
    /// Fetch the rounds feed and export the windowed projection to CSV.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// Same fetch/ingest/projection pipeline as `eed show`, rendered as a
    /// dual-axis chart in a terminal UI using Ratatui.
    Tui(CommonArgs),
}

/// Options shared by every front-end.
#[derive(Debug, Parser, Clone)]
pub struct CommonArgs {
    /// Time window over the draw series.
    ///
    /// Overrides the `period` parameter of --url when both are given.
    #[arg(short = 'p', long, value_enum)]
    pub period: Option<SelectedWindow>,

    /// Session link from a previous run; its `period` query parameter seeds
    /// the window (unrecognized values fall back to the default).
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

impl CommonArgs {
    /// Resolve the starting window: explicit flag, then link parameter, then
    /// the default.
    pub fn initial_window(&self, from_link: Option<SelectedWindow>) -> SelectedWindow {
        self.period.or(from_link).unwrap_or_default()
    }
}

/// Options for the `show` command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Render an ASCII chart in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 21)]
    pub height: usize,
}

/// Options for the `export` command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Destination CSV file.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_flag_accepts_canonical_identifiers() {
        let cli = Cli::try_parse_from(["eed", "show", "--period", "last25Draws"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.common.period, Some(SelectedWindow::Last25Draws));
    }

    #[test]
    fn period_flag_rejects_unknown_identifiers() {
        assert!(Cli::try_parse_from(["eed", "show", "--period", "bogus"]).is_err());
    }

    #[test]
    fn window_resolution_precedence() {
        let cli = Cli::try_parse_from(["eed", "tui", "--period", "allDraws"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        // Flag beats link.
        assert_eq!(
            args.initial_window(Some(SelectedWindow::Last50Draws)),
            SelectedWindow::AllDraws
        );

        let cli = Cli::try_parse_from(["eed", "tui"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        // Link beats default; absent both yields the default.
        assert_eq!(
            args.initial_window(Some(SelectedWindow::Last50Draws)),
            SelectedWindow::Last50Draws
        );
        assert_eq!(args.initial_window(None), SelectedWindow::default());
    }
}
