use loan_emi_core::amortization::{build_schedule, compute_payment, summarize};
use loan_emi_core::prepayment::{apply_prepayment, PrepaymentInput};
use loan_emi_core::types::LoanInput;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference loan: 500k at 8.5% p.a. over 60 months
// ===========================================================================

fn reference_loan() -> LoanInput {
    LoanInput {
        principal: dec!(500_000),
        annual_rate_percent: dec!(8.5),
        term_months: 60,
        paid_periods: None,
    }
}

#[test]
fn test_reference_payment_closed_form() {
    // r = 8.5/1200, EMI = P*r*(1+r)^60 / ((1+r)^60 - 1) ~ 10,258.27
    let payment = compute_payment(dec!(500_000), dec!(8.5), 60).unwrap();
    assert!(
        (payment - dec!(10258.27)).abs() < dec!(0.01),
        "Expected EMI ~10258.27, got {}",
        payment
    );
}

#[test]
fn test_total_interest_identity() {
    // payment * term - principal must equal total_interest, and be positive
    for (p, r, t) in [
        (dec!(500_000), dec!(8.5), 60u32),
        (dec!(100_000), dec!(10), 12),
        (dec!(2_500_000), dec!(7.25), 240),
        (dec!(15_000), dec!(34), 12),
    ] {
        let input = LoanInput {
            principal: p,
            annual_rate_percent: r,
            term_months: t,
            paid_periods: None,
        };
        let result = summarize(&input).unwrap().result;
        assert_eq!(
            result.total_interest,
            result.payment * Decimal::from(t) - p
        );
        assert!(result.total_interest > Decimal::ZERO);
    }
}

#[test]
fn test_principal_portions_sum_to_principal() {
    let schedule = build_schedule(dec!(500_000), dec!(8.5), 60, None).unwrap();
    let repaid: Decimal = schedule.iter().map(|e| e.principal).sum();
    let relative_error = ((repaid - dec!(500_000)) / dec!(500_000)).abs();
    assert!(
        relative_error < dec!(0.000001),
        "Principal portions should sum to the principal, got {}",
        repaid
    );
}

#[test]
fn test_final_balance_near_zero() {
    let schedule = build_schedule(dec!(2_500_000), dec!(7.25), 240, None).unwrap();
    let final_balance = schedule.last().unwrap().balance;
    assert!(
        final_balance < dec!(0.01),
        "Balance at the final period should converge to zero, got {}",
        final_balance
    );
}

#[test]
fn test_truncated_schedule_matches_summary_outstanding() {
    for k in [1u32, 7, 12, 36, 59] {
        let truncated = build_schedule(dec!(500_000), dec!(8.5), 60, Some(k)).unwrap();
        assert_eq!(truncated.len(), k as usize);

        let mut input = reference_loan();
        input.paid_periods = Some(k);
        let summary = summarize(&input).unwrap().result;
        assert_eq!(summary.outstanding_balance, truncated[k as usize - 1].balance);
    }
}

#[test]
fn test_outstanding_strictly_decreasing() {
    let mut after_12 = reference_loan();
    after_12.paid_periods = Some(12);
    let mut after_13 = reference_loan();
    after_13.paid_periods = Some(13);

    let out_12 = summarize(&after_12).unwrap().result.outstanding_balance;
    let out_13 = summarize(&after_13).unwrap().result.outstanding_balance;

    assert!(out_12 < dec!(500_000));
    assert!(out_13 < out_12);
}

#[test]
fn test_idempotence_identical_outputs() {
    let input = reference_loan();
    let a = summarize(&input).unwrap().result;
    let b = summarize(&input).unwrap().result;
    assert_eq!(a, b);

    let prepay = PrepaymentInput {
        principal: dec!(100_000),
        annual_rate_percent: dec!(10),
        term_months: 12,
        prepayment_amount: dec!(20_000),
        baseline_total_interest: None,
    };
    assert_eq!(
        apply_prepayment(&prepay).unwrap().result,
        apply_prepayment(&prepay).unwrap().result
    );
}

// ===========================================================================
// Prepayment reference: 100k at 10% over 12 months, 20k lump sum
// ===========================================================================

#[test]
fn test_prepayment_reference_example() {
    let baseline = summarize(&LoanInput {
        principal: dec!(100_000),
        annual_rate_percent: dec!(10),
        term_months: 12,
        paid_periods: None,
    })
    .unwrap()
    .result;

    let out = apply_prepayment(&PrepaymentInput {
        principal: dec!(100_000),
        annual_rate_percent: dec!(10),
        term_months: 12,
        prepayment_amount: dec!(20_000),
        baseline_total_interest: Some(baseline.total_interest),
    })
    .unwrap()
    .result;

    assert_eq!(out.new_principal, dec!(80_000));
    assert!(out.new_payment < baseline.payment);
    assert!(out.interest_saved > Decimal::ZERO);
    // Closed form gives ~1099.81 saved
    assert!(
        (out.interest_saved - dec!(1099.81)).abs() < dec!(0.01),
        "Expected ~1099.81 interest saved, got {}",
        out.interest_saved
    );
}

#[test]
fn test_prepayment_scales_linearly_with_principal() {
    // Under fixed-term re-amortization the EMI is linear in principal, so
    // prepaying 20% of the principal cuts the installment by 20%.
    let full = compute_payment(dec!(100_000), dec!(10), 12).unwrap();
    let out = apply_prepayment(&PrepaymentInput {
        principal: dec!(100_000),
        annual_rate_percent: dec!(10),
        term_months: 12,
        prepayment_amount: dec!(20_000),
        baseline_total_interest: None,
    })
    .unwrap()
    .result;

    let expected = full * dec!(0.8);
    assert!(
        (out.new_payment - expected).abs() < dec!(0.000001),
        "Expected {}, got {}",
        expected,
        out.new_payment
    );
}
