use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_loan(input_json: String) -> NapiResult<String> {
    let input: loan_emi_core::types::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_emi_core::amortization::summarize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ScheduleBindingInput {
    #[serde(flatten)]
    loan: loan_emi_core::types::LoanInput,
    stop_at_period: Option<u32>,
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let binding_input: ScheduleBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = loan_emi_core::amortization::build_schedule(
        binding_input.loan.principal,
        binding_input.loan.annual_rate_percent,
        binding_input.loan.term_months,
        binding_input.stop_at_period,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Prepayment
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_prepayment(input_json: String) -> NapiResult<String> {
    let input: loan_emi_core::prepayment::PrepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_emi_core::prepayment::apply_prepayment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
