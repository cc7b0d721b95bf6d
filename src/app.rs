//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches the IRCC rounds feed
//! - ingests and projects the draw series
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ExportArgs, ShowArgs};
use crate::data::{IrccClient, refetch_warning};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eed` binary.
pub fn run() -> Result<(), AppError> {
    // We want `eed` and `eed -p allDraws` to behave like `eed tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let (session, window) = pipeline::open_session(&args.common)?;

    let mut client = IrccClient::from_env();
    let data = pipeline::fetch_and_ingest(&mut client)?;
    if client.anomalous_refetch() {
        eprintln!("{}", refetch_warning(client.fetch_count()));
    }

    let projection = crate::report::project(&data.series, window)?;

    print!(
        "{}",
        crate::report::format::format_summary(&data, window, &projection)
    );
    println!("Link: {}\n", session.href());
    print!(
        "{}",
        crate::report::format::format_draw_table(&projection, &data.by_date)?
    );

    if args.plot && !args.no_plot {
        println!();
        print!(
            "{}",
            crate::plot::render_ascii_chart(&projection, args.width, args.height)
        );
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let (_, window) = pipeline::open_session(&args.common)?;

    let mut client = IrccClient::from_env();
    let data = pipeline::fetch_and_ingest(&mut client)?;
    if client.anomalous_refetch() {
        eprintln!("{}", refetch_warning(client.fetch_count()));
    }

    let projection = crate::report::project(&data.series, window)?;
    crate::io::write_projection_csv(&args.out, &projection, &data.by_date)?;
    println!(
        "Wrote {} draws ({}) to {}",
        projection.len(),
        window.label(),
        args.out.display()
    );
    Ok(())
}

/// Rewrite argv so `eed` defaults to `eed tui`.
///
/// Rules:
/// - `eed`                     -> `eed tui`
/// - `eed -p allDraws ...`     -> `eed tui -p allDraws ...`
/// - `eed --help/--version/-h` -> unchanged (show top-level help/version)
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

    let is_subcommand = matches!(arg1.as_str(), "show" | "export" | "tui");
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
