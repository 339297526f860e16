//! Non-interactive command-line front end. Reports are printed to stdout as pretty JSON.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use bookkeeper_config::{Config, ConfigManager};
use bookkeeper_core::{parse_date, FixedClock, ReportQuery};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use crate::{utils::build_info, Bookkeeper, BookkeeperError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "bookkeeper_cli",
    version,
    about = "Profit/loss, income/expenses and top-customer reports over JSON invoice tables"
)]
pub struct Cli {
    /// Directory holding invoices.json and customers.json (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to config.json. Defaults to $BOOKKEEPER_HOME/config.json.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pin the current date (YYYY-MM-DD) used for default report windows.
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
}

impl RangeArgs {
    fn query(&self) -> ReportQuery {
        ReportQuery {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            limit: None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Realized income, expenses and net profit.
    ProfitLoss(RangeArgs),
    /// Income vs expenses, as a daily chart series or totals depending on config.
    IncomeExpenses(RangeArgs),
    /// Customers ranked by paid revenue.
    TopCustomers {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List data-quality warnings for the stored invoices.
    Check,
    /// Show build metadata.
    Version,
}

/// Parses process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Command::Version = cli.command {
        return print_version(out);
    }

    let config = load_config(&cli)?;
    let mut books = Bookkeeper::open(&config)?;
    if let Some(raw) = cli.today.as_deref() {
        books = books.with_clock(Box::new(FixedClock(parse_date(raw)?)));
    }

    match &cli.command {
        Command::ProfitLoss(range) => write_json(out, &books.profit_loss(&range.query())?),
        Command::IncomeExpenses(range) => {
            write_json(out, &books.income_expenses(&range.query())?)
        }
        Command::TopCustomers { range, limit } => {
            if *limit == Some(0) {
                return Err(BookkeeperError::InvalidInput(
                    "--limit must be at least 1".into(),
                ));
            }
            let mut query = range.query();
            query.limit = *limit;
            write_json(out, &books.top_customers(&query)?)
        }
        Command::Check => {
            let warnings = books.check()?;
            if !warnings.is_empty() {
                eprintln!(
                    "{} {} data-quality warning(s)",
                    "[!]".yellow().bold(),
                    warnings.len()
                );
            }
            write_json(out, &warnings)
        }
        Command::Version => print_version(out),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::default_location(),
    };
    let mut config = manager.load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_version(out: &mut impl Write) -> Result<()> {
    let meta = build_info::current();
    writeln!(out, "{}", format!("Bookkeeper {}", meta.version).bold())?;
    for (label, value) in meta.rows() {
        writeln!(out, "  {:<12} {}", label, value)?;
    }
    Ok(())
}
