//! calsheet CLI - Yearly calendar workbooks
//!
//! Command-line interface for generating and previewing calendars.
//!
//! Running `calsheet` with no arguments writes the 2025 calendar, one sheet
//! per month, to `calendar_2025_<timestamp>.xlsx` in the current directory.
//!
//! ## Exit Codes
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Calendar written, or a save failure was reported (default) |
//! | 1 | Invalid input, or a save failure under `--strict` |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calsheet_core::{CalendarMatrix, EventTable, RenderError, YearRenderer, DEFAULT_YEAR};
use calsheet_render::{CalendarGenerator, LayoutMode, TextRenderer};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "calsheet")]
#[command(author, version, about = "Styled yearly calendar workbooks", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Used when no subcommand is given
    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the calendar workbook (default)
    Generate(GenerateArgs),

    /// Print the calendar to stdout
    Preview {
        /// Calendar year
        #[arg(short, long, default_value_t = DEFAULT_YEAR, env = "CALSHEET_YEAR")]
        year: i32,

        /// Single month to show (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Print the calendar matrix as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Calendar year
    #[arg(short, long, default_value_t = DEFAULT_YEAR, env = "CALSHEET_YEAR")]
    year: i32,

    /// Sheet layout
    #[arg(short, long, value_enum, default_value_t = ModeArg::PerMonth)]
    mode: ModeArg,

    /// Output file (calendar_<year>_<timestamp>.xlsx if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit with status 1 when the workbook cannot be saved
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// One sheet per month
    PerMonth,
    /// All months stacked on one sheet
    Stacked,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PerMonth => LayoutMode::PerMonthSheets,
            ModeArg::Stacked => LayoutMode::SingleStackedSheet,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(&args),
        Some(Commands::Preview { year, month, json }) => cmd_preview(year, month, json),
        None => cmd_generate(&cli.generate),
    }
}

fn cmd_generate(args: &GenerateArgs) -> Result<ExitCode> {
    info!(year = args.year, mode = ?args.mode, strict = args.strict, "generate");
    let generator = CalendarGenerator::new(args.year).mode(args.mode.into());

    let save_failed = if args.strict {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };

    match generator.generate(args.output.as_deref()) {
        Ok(path) => {
            println!("Calendar for {} saved to: {}", args.year, path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(RenderError::InvalidInput(e)) => {
            Err(anyhow::Error::new(e).context(format!("cannot build calendar for {}", args.year)))
        }
        Err(RenderError::ResourceBusy(path)) => {
            debug!(path = %path.display(), "save failed: file in use");
            eprintln!(
                "Error: cannot save {}. Check whether it is open in another application.",
                path.display()
            );
            Ok(save_failed)
        }
        Err(e) => {
            debug!(error = ?e, "save failed");
            eprintln!("An error occurred while saving: {e}");
            Ok(save_failed)
        }
    }
}

fn cmd_preview(year: i32, month: Option<u32>, json: bool) -> Result<ExitCode> {
    info!(year, ?month, json, "preview");
    let events = EventTable::builtin();
    let months: Vec<u32> = match month {
        Some(m) => vec![m],
        None => (1..=12).collect(),
    };

    if json {
        let matrices = months
            .iter()
            .map(|&m| CalendarMatrix::build(year, m))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("cannot build calendar for {year}"))?;
        println!("{}", serde_json::to_string_pretty(&matrices)?);
        return Ok(ExitCode::SUCCESS);
    }

    let renderer = TextRenderer::new();
    let text = match month {
        Some(m) => {
            let matrix = CalendarMatrix::build(year, m)
                .with_context(|| format!("cannot build calendar for {year}"))?;
            renderer.render_month(&matrix, events.for_month(m))
        }
        None => renderer
            .render(year, &events)
            .with_context(|| format!("cannot build calendar for {year}"))?,
    };
    print!("{text}");
    Ok(ExitCode::SUCCESS)
}
