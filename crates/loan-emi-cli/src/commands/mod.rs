pub mod history;
pub mod loan;
pub mod prepay;
