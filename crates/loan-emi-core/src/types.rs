use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates. Annual rates are quoted as percentages (8.5 = 8.5% p.a.),
/// monthly rates as decimals.
pub type Rate = Decimal;

/// Validated loan parameters. The parse-and-validate boundary (CLI flags,
/// JSON input, bindings) produces one of these before the engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed, in currency units.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Loan tenure in months.
    pub term_months: u32,
    /// Number of installments already paid, if tracking an in-flight loan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_periods: Option<u32>,
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Period index, 1-based.
    pub period: u32,
    /// Installment amount (constant across all periods).
    pub payment: Money,
    /// Interest portion of this installment.
    pub interest: Money,
    /// Principal portion of this installment.
    pub principal: Money,
    /// Remaining balance after this installment, floored at zero.
    pub balance: Money,
}

/// Full loan summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Fixed monthly installment.
    pub payment: Money,
    /// Interest paid over the full term.
    pub total_interest: Money,
    /// Total paid over the full term (principal + interest).
    pub total_payment: Money,
    /// Balance owed after `paid_periods` installments (full principal when
    /// none have been paid).
    pub outstanding_balance: Money,
    /// Per-period breakdown, truncated at `paid_periods` when given.
    pub schedule: Vec<PeriodEntry>,
}

/// Result of a lump-sum prepayment re-amortized over the original term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentResult {
    /// Principal after the lump sum is applied.
    pub new_principal: Money,
    /// Revised installment at the same term.
    pub new_payment: Money,
    /// Interest payable over the term on the reduced principal.
    pub new_total_interest: Money,
    /// Baseline total interest minus the revised total interest.
    pub interest_saved: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
