use serde::{Deserialize, Serialize};

use crate::dates::DEFAULT_DATE_FORMAT;
use crate::types::PostponementPolicy;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// applied when the postponement would cover every installment
    #[serde(default)]
    pub postponement_policy: PostponementPolicy,
    /// chrono strftime pattern for schedule dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            postponement_policy: PostponementPolicy::Clamp,
            date_format: default_date_format(),
        }
    }
}

impl CalculatorConfig {
    /// reject postponements that leave nothing to pay instead of clamping them
    pub fn strict() -> Self {
        Self {
            postponement_policy: PostponementPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_postponement_policy(mut self, policy: PostponementPolicy) -> Self {
        self.postponement_policy = policy;
        self
    }

    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }
}
