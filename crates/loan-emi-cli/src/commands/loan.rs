use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_emi_core::amortization;
use loan_emi_core::snapshot::{append_history, SavedCalculation};
use loan_emi_core::types::LoanInput;

use crate::input;
use crate::store::JsonFileStore;

/// Arguments for the loan summary calculation
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Installments already paid
    #[arg(long)]
    pub paid: Option<u32>,

    /// Append the calculation to this history file
    #[arg(long)]
    pub save: Option<String>,

    /// Label for the saved calculation
    #[arg(long, requires = "save")]
    pub label: Option<String>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Stop after this many periods instead of the full term
    #[arg(long)]
    pub periods: Option<u32>,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args.term
                .ok_or("--term is required (or provide --input)")?,
            paid_periods: args.paid,
        }
    };

    let output = amortization::summarize(&loan_input)?;

    if let Some(ref path) = args.save {
        let mut store = JsonFileStore::new(path);
        append_history(
            &mut store,
            SavedCalculation {
                saved_at: chrono::Local::now().date_naive(),
                label: args.label.clone(),
                input: loan_input,
                result: output.result.clone(),
            },
        )?;
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args.term
                .ok_or("--term is required (or provide --input)")?,
            paid_periods: None,
        }
    };

    // --periods wins; a paid_periods field in a file or piped payload
    // truncates the same way when the flag is absent.
    let stop_at = args.periods.or(loan_input.paid_periods);

    let schedule = amortization::build_schedule(
        loan_input.principal,
        loan_input.annual_rate_percent,
        loan_input.term_months,
        stop_at,
    )?;

    Ok(serde_json::to_value(schedule)?)
}
