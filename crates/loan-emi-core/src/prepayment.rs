//! Lump-sum prepayment analysis.
//!
//! Semantics are fixed-term, re-amortized: the lump sum reduces the
//! principal, the term stays put, and the installment is recalculated
//! downward. Shortened-term-at-fixed-payment prepayment is intentionally not
//! offered.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_payment, validate_loan_terms};
use crate::error::EmiError;
use crate::types::{with_metadata, ComputationOutput, Money, PrepaymentResult, Rate};
use crate::EmiResult;

/// Prepayment-to-principal ratio above which a warning is attached.
const LARGE_PREPAYMENT_RATIO: Decimal = dec!(0.5);

/// Loan terms plus the lump sum to apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    /// Outstanding principal before the lump sum.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Remaining tenure in months (held fixed).
    pub term_months: u32,
    /// Lump sum applied to principal. Must be less than the principal;
    /// zero is a valid no-op.
    pub prepayment_amount: Money,
    /// Total interest on the original loan, for the savings comparison.
    /// Recomputed from the loan terms when not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_total_interest: Option<Money>,
}

/// Re-amortize after a lump-sum prepayment and report the interest saved
/// against the baseline loan.
pub fn apply_prepayment(
    input: &PrepaymentInput,
) -> EmiResult<ComputationOutput<PrepaymentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_prepayment(input)?;

    if input.prepayment_amount > input.principal * LARGE_PREPAYMENT_RATIO {
        warnings.push(format!(
            "Prepayment of {} exceeds half the principal; a shorter term may suit better than a lower installment",
            input.prepayment_amount
        ));
    }

    let term = Decimal::from(input.term_months);

    let baseline_total_interest = match input.baseline_total_interest {
        Some(baseline) => baseline,
        None => {
            let payment =
                compute_payment(input.principal, input.annual_rate_percent, input.term_months)?;
            payment * term - input.principal
        }
    };

    let new_principal = input.principal - input.prepayment_amount;
    let new_payment =
        compute_payment(new_principal, input.annual_rate_percent, input.term_months)?;
    let new_total_interest = new_payment * term - new_principal;
    let interest_saved = baseline_total_interest - new_total_interest;

    let result = PrepaymentResult {
        new_principal,
        new_payment,
        new_total_interest,
        interest_saved,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Term Re-Amortized Prepayment",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn validate_prepayment(input: &PrepaymentInput) -> EmiResult<()> {
    validate_loan_terms(input.principal, input.annual_rate_percent, input.term_months)?;

    if input.prepayment_amount < Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "prepayment_amount".into(),
            reason: "Prepayment cannot be negative".into(),
        });
    }
    if input.prepayment_amount >= input.principal {
        return Err(EmiError::InvalidInput {
            field: "prepayment_amount".into(),
            reason: "Prepayment must be less than the outstanding principal".into(),
        });
    }
    Ok(())
}
