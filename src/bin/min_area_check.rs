//! CLI tool for running the min-area check on a JSON cell library
//!
//! Usage:
//!   cargo run --release --bin min_area_check -- <layout.json> --min-area <N> [options]
//!
//! Options:
//!   --top <name>            Cell to check (default: the library's top cell)
//!   --param <KEY=VALUE>     Override a checker parameter (repeatable)
//!   --summary               Print counts only instead of the violation list
//!
//! Violations go to stdout as JSON; progress logging goes to stderr
//! (filter with RUST_LOG, default `min_area_drc=info`).

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use min_area_drc::layout::LayoutLibrary;
use min_area_drc::{BitmapMinAreaChecker, MinAreaChecker, Parameters, Violation};

#[derive(Parser, Debug)]
#[command(name = "min_area_check", about = "Report layout regions below a minimum area")]
struct Args {
    /// JSON cell library
    layout: PathBuf,

    /// Regions with area strictly below this value are violations
    #[arg(long)]
    min_area: i64,

    /// Cell to check instead of the library's top cell
    #[arg(long)]
    top: Option<String>,

    /// Checker parameter override, e.g. ReportTiles=false
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Print only a summary line
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("min_area_drc=info,min_area_check=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let library = LayoutLibrary::load(&args.layout)
        .with_context(|| format!("Failed to load layout {}", args.layout.display()))?;
    let top = match &args.top {
        Some(name) => library.cell(name)?,
        None => library.top_cell()?,
    };
    tracing::info!("Loaded {} cells from {}", library.len(), args.layout.display());

    let checker = BitmapMinAreaChecker;
    let mut params = checker.default_parameters();
    for assignment in &args.params {
        let (key, value) = Parameters::parse_assignment(assignment)
            .with_context(|| format!("Bad --param '{}'", assignment))?;
        params.set(key, value);
    }

    let mut violations: Vec<Violation> = Vec::new();
    checker
        .check(&top, args.min_area, &params, &mut violations)
        .context("Min-area check failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.summary {
        let total: i64 = violations.iter().map(|v| v.area).sum();
        writeln!(
            out,
            "{}: {} violations below {} (total violating area {})",
            checker.algorithm_name(),
            violations.len(),
            args.min_area,
            total
        )?;
    } else {
        serde_json::to_writer_pretty(&mut out, &violations)?;
        writeln!(out)?;
    }
    Ok(())
}
