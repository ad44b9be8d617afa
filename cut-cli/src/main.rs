use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use cut_cli::commands::{self, CalcArgs};
use cut_cli::session::Session;
use cut_cli::utils::parse_bill_date;
use cut_cli::{AppConfig, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bill cut percentage calculator.
///
/// Compares a billed amount (plus freight) with the amount actually received
/// and reports the cut as an amount and a percentage.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `cut_core=trace`. Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Date to count elapsed days up to, instead of the local date.
    #[arg(long, global = true, value_parser = parse_bill_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the cut for a single bill.
    Calc {
        /// Amount billed.
        #[arg(long, allow_hyphen_values = true)]
        bill: String,

        /// Freight charged on top of the bill.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        freight: String,

        /// Amount received.
        #[arg(long, allow_hyphen_values = true)]
        received: String,

        /// Date the bill was raised (YYYY-MM-DD).
        #[arg(long, value_parser = parse_bill_date)]
        date: Option<NaiveDate>,
    },

    /// Calculate cuts for every bill in a CSV file.
    Batch {
        /// CSV file with `bill`, `received` and optional `freight`, `bill_date` columns.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Fill in the form interactively (default).
    Interactive,
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    args: &CalcArgs,
    today: NaiveDate,
) -> anyhow::Result<ExitCode> {
    let outcome = commands::run_calc(&mut io::stdout().lock(), args, today)
        .context("Failed to write result")?;
    Ok(commands::calc_status(&outcome).into())
}

fn run_batch(
    file: &Path,
    today: NaiveDate,
) -> anyhow::Result<ExitCode> {
    let rows = csv_loader::load_from_file(file)
        .with_context(|| format!("Failed to load bills from: {}", file.display()))?;
    info!(rows = rows.len(), file = %file.display(), "evaluating bills");

    let entries = csv_loader::evaluate(&rows, today);
    let status = commands::report_batch(&mut io::stdout().lock(), &entries)
        .context("Failed to write results")?;
    Ok(status.into())
}

fn run_interactive(today: NaiveDate) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), today);
    session.run().context("Interactive session failed")?;
    Ok(ExitCode::SUCCESS)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_log_level_override(cli.log_level);
    logging::init_logging(&config)?;

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!(%today, "counting days up to");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Calc {
            bill,
            freight,
            received,
            date,
        } => {
            let args = CalcArgs {
                bill,
                freight,
                received,
                bill_date: date,
            };
            run_calc(&args, today)
        }
        Command::Batch { file } => run_batch(&file, today),
        Command::Interactive => run_interactive(today),
    }
}
