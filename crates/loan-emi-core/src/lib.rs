pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "prepayment")]
pub mod prepayment;

#[cfg(feature = "snapshots")]
pub mod snapshot;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all engine operations
pub type EmiResult<T> = Result<T, EmiError>;
