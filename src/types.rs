use serde::{Deserialize, Serialize};
use std::fmt;

/// payment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// pay the full obligation once, on the lump-sum date
    #[serde(rename = "Lump Sum")]
    LumpSum,
    /// pay in equal monthly installments and invest the unpaid balance
    #[serde(rename = "Installment")]
    Installment,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::LumpSum => "Lump Sum",
            Strategy::Installment => "Installment",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// how a postponement that swallows the whole plan is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostponementPolicy {
    /// lower the postponement so at least one payment remains
    #[default]
    Clamp,
    /// fail the calculation
    Reject,
}
