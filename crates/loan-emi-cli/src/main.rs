mod commands;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::history::HistoryArgs;
use commands::loan::{ScheduleArgs, SummaryArgs};
use commands::prepay::PrepayArgs;

/// Loan EMI and prepayment calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and prepayment calculations",
    long_about = "Computes fixed monthly installments, amortization schedules, \
                  outstanding balances, and lump-sum prepayment savings with \
                  decimal precision. Calculations can be saved to and listed \
                  from a JSON history file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Loan summary: EMI, totals, and outstanding balance
    Summary(SummaryArgs),
    /// Period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Lump-sum prepayment savings at a fixed term
    Prepay(PrepayArgs),
    /// List saved calculations
    History(HistoryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Prepay(args) => commands::prepay::run_prepay(args),
        Commands::History(args) => commands::history::run_history(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
