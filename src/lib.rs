pub mod calculator;
pub mod comparison;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod input;
pub mod interest;
pub mod payments;
pub mod types;

// re-export key types
pub use calculator::{calculate_strategy, PaymentStrategyCalculator, StrategyResult};
pub use comparison::{InstallmentSummary, LumpSumSummary, Recommendation};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{Result, StrategyError};
pub use input::{StrategyInput, StrategyRequest, REQUIRED_FIELDS};
pub use interest::{AccrualEngine, InvestmentBreakdown, InvestmentBreakdownItem};
pub use payments::{PaymentSchedule, PaymentScheduleItem};
pub use types::{PostponementPolicy, Strategy};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
