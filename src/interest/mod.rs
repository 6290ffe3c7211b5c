pub mod accrual;

pub use accrual::{AccrualEngine, InvestmentBreakdown, InvestmentBreakdownItem};
