use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_emi_core::prepayment::{apply_prepayment, PrepaymentInput};

use crate::input;

/// Arguments for prepayment analysis
#[derive(Args)]
pub struct PrepayArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Remaining tenure in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Lump sum to apply against the principal
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Baseline total interest to compare against (recomputed when omitted)
    #[arg(long)]
    pub baseline_interest: Option<Decimal>,
}

pub fn run_prepay(args: PrepayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prepay_input: PrepaymentInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PrepaymentInput {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args.term
                .ok_or("--term is required (or provide --input)")?,
            prepayment_amount: args.amount
                .ok_or("--amount is required (or provide --input)")?,
            baseline_total_interest: args.baseline_interest,
        }
    };

    let output = apply_prepayment(&prepay_input)?;
    Ok(serde_json::to_value(output)?)
}
