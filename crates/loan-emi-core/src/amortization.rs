//! Fixed-payment (EMI) amortization engine.
//!
//! Closed-form monthly installment, per-period amortization schedules, and
//! loan summaries. All math in `rust_decimal::Decimal`; every call recomputes
//! from scratch and nothing is mutated after construction.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::error::EmiError;
use crate::types::{with_metadata, ComputationOutput, LoanInput, LoanResult, Money, PeriodEntry, Rate};
use crate::EmiResult;

/// Divisor converting an annual percentage rate to a monthly decimal rate
/// (12 months x 100 percent).
const ANNUAL_PERCENT_DIVISOR: Decimal = dec!(1200);

/// Annual rate above which a warning is attached to the summary.
const HIGH_RATE_THRESHOLD: Decimal = dec!(50);

/// Monthly decimal rate from an annual percentage rate: 8.5% p.a. -> 0.00708333...
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / ANNUAL_PERCENT_DIVISOR
}

/// Fixed monthly installment: P * r * (1+r)^n / ((1+r)^n - 1).
///
/// A zero rate is a degenerate case (the formula divides by zero); callers
/// wanting interest-free loans must use `principal / term` themselves.
pub fn compute_payment(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> EmiResult<Money> {
    validate_loan_terms(principal, annual_rate_percent, term_months)?;

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r).powd(Decimal::from(term_months));
    let denom = growth - Decimal::ONE;

    if denom.is_zero() {
        return Err(EmiError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(principal * r * growth / denom)
}

/// Amortization schedule over periods 1..=`term_months`, truncated at
/// `stop_at_period` when given.
///
/// Each period: interest on the running balance, remainder of the installment
/// to principal. The running balance stays internal; reported balances are
/// floored at zero.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
    stop_at_period: Option<u32>,
) -> EmiResult<Vec<PeriodEntry>> {
    let payment = compute_payment(principal, annual_rate_percent, term_months)?;
    let r = monthly_rate(annual_rate_percent);

    let last = stop_at_period
        .map(|k| k.min(term_months))
        .unwrap_or(term_months);

    let mut balance = principal;
    let mut schedule = Vec::with_capacity(last as usize);

    for period in 1..=last {
        let interest = balance * r;
        let principal_portion = payment - interest;
        balance -= principal_portion;

        schedule.push(PeriodEntry {
            period,
            payment,
            interest,
            principal: principal_portion,
            balance: balance.max(Decimal::ZERO),
        });
    }

    Ok(schedule)
}

/// Full loan summary: installment, aggregate totals, schedule, and the
/// balance outstanding after `paid_periods` installments.
pub fn summarize(input: &LoanInput) -> EmiResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_terms(input.principal, input.annual_rate_percent, input.term_months)?;
    if let Some(paid) = input.paid_periods {
        if paid > input.term_months {
            return Err(EmiError::InvalidInput {
                field: "paid_periods".into(),
                reason: format!(
                    "Paid periods ({}) cannot exceed the term ({} months)",
                    paid, input.term_months
                ),
            });
        }
    }

    if input.annual_rate_percent > HIGH_RATE_THRESHOLD {
        warnings.push(format!(
            "Annual rate of {}% is unusually high; check the input is a percentage, not a decimal",
            input.annual_rate_percent
        ));
    }

    let payment = compute_payment(input.principal, input.annual_rate_percent, input.term_months)?;
    let total_payment = payment * Decimal::from(input.term_months);
    let total_interest = total_payment - input.principal;

    let schedule = build_schedule(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
        input.paid_periods,
    )?;

    let outstanding_balance = schedule
        .last()
        .map(|entry| entry.balance)
        .unwrap_or(input.principal);

    let result = LoanResult {
        payment,
        total_interest,
        total_payment,
        outstanding_balance,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Payment (EMI) Amortization",
        input,
        warnings,
        elapsed,
        result,
    ))
}

pub(crate) fn validate_loan_terms(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> EmiResult<()> {
    if principal <= Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if term_months == 0 {
        return Err(EmiError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if annual_rate_percent.is_zero() {
        return Err(EmiError::DegenerateRate(
            "Zero interest rate has no EMI; divide principal by term instead".into(),
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_loan() -> LoanInput {
        LoanInput {
            principal: dec!(500_000),
            annual_rate_percent: dec!(8.5),
            term_months: 60,
            paid_periods: None,
        }
    }

    #[test]
    fn test_payment_reference_value() {
        // 500k at 8.5% over 60 months: closed-form EMI ~10,258.27
        let payment = compute_payment(dec!(500_000), dec!(8.5), 60).unwrap();
        assert_close(payment, dec!(10258.27), TOL, "EMI for 500k/8.5%/60m");
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_payment_constant_across_schedule() {
        let schedule = build_schedule(dec!(250_000), dec!(9.25), 36, None).unwrap();
        let payment = schedule[0].payment;
        for entry in &schedule {
            assert_eq!(entry.payment, payment);
        }
    }

    #[test]
    fn test_interest_plus_principal_equals_payment() {
        let schedule = build_schedule(dec!(250_000), dec!(9.25), 36, None).unwrap();
        for entry in &schedule {
            assert_close(
                entry.interest + entry.principal,
                entry.payment,
                dec!(0.000001),
                &format!("period {} split", entry.period),
            );
        }
    }

    #[test]
    fn test_schedule_balance_converges_to_zero() {
        let schedule = build_schedule(dec!(500_000), dec!(8.5), 60, None).unwrap();
        let final_balance = schedule.last().unwrap().balance;
        assert_close(final_balance, Decimal::ZERO, TOL, "final balance");
    }

    #[test]
    fn test_schedule_stops_early() {
        let schedule = build_schedule(dec!(500_000), dec!(8.5), 60, Some(12)).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule.last().unwrap().period, 12);
    }

    #[test]
    fn test_stop_beyond_term_clamps_to_term() {
        let schedule = build_schedule(dec!(100_000), dec!(10), 12, Some(500)).unwrap();
        assert_eq!(schedule.len(), 12);
    }

    #[test]
    fn test_summarize_outstanding_matches_schedule() {
        let mut input = standard_loan();
        input.paid_periods = Some(12);
        let summary = summarize(&input).unwrap();

        let full = build_schedule(input.principal, input.annual_rate_percent, 60, None).unwrap();
        assert_eq!(summary.result.outstanding_balance, full[11].balance);
        assert_eq!(summary.result.schedule.len(), 12);
    }

    #[test]
    fn test_summarize_zero_paid_periods() {
        let mut input = standard_loan();
        input.paid_periods = Some(0);
        let summary = summarize(&input).unwrap();

        assert!(summary.result.schedule.is_empty());
        assert_eq!(summary.result.outstanding_balance, input.principal);
    }

    #[test]
    fn test_summarize_totals() {
        let summary = summarize(&standard_loan()).unwrap();
        let r = &summary.result;
        assert_eq!(r.total_payment, r.payment * dec!(60));
        assert_eq!(r.total_interest, r.total_payment - dec!(500_000));
        assert!(r.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let input = standard_loan();
        let a = summarize(&input).unwrap();
        let b = summarize(&input).unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_validation_zero_principal() {
        let result = compute_payment(Decimal::ZERO, dec!(8.5), 60);
        assert!(matches!(result, Err(EmiError::InvalidInput { .. })));
    }

    #[test]
    fn test_validation_zero_term() {
        let result = compute_payment(dec!(100_000), dec!(8.5), 0);
        assert!(matches!(result, Err(EmiError::InvalidInput { .. })));
    }

    #[test]
    fn test_validation_zero_rate_is_degenerate() {
        let result = compute_payment(dec!(100_000), Decimal::ZERO, 12);
        assert!(matches!(result, Err(EmiError::DegenerateRate(_))));
    }

    #[test]
    fn test_validation_paid_periods_exceed_term() {
        let mut input = standard_loan();
        input.paid_periods = Some(61);
        assert!(matches!(
            summarize(&input),
            Err(EmiError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_high_rate_warning() {
        let input = LoanInput {
            principal: dec!(10_000),
            annual_rate_percent: dec!(72),
            term_months: 12,
            paid_periods: None,
        };
        let summary = summarize(&input).unwrap();
        assert!(!summary.warnings.is_empty());
    }

    #[test]
    fn test_metadata_populated() {
        let summary = summarize(&standard_loan()).unwrap();
        assert!(summary.methodology.contains("Amortization"));
        assert_eq!(summary.metadata.precision, "rust_decimal_128bit");
    }
}
