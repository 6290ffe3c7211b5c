use log::{debug, warn};
use rust_decimal::RoundingStrategy;
use serde::Serialize;

use crate::comparison::{InstallmentSummary, LumpSumSummary, Recommendation};
use crate::config::CalculatorConfig;
use crate::dates::months_between;
use crate::errors::{Result, StrategyError};
use crate::input::{StrategyInput, StrategyRequest};
use crate::interest::{AccrualEngine, InvestmentBreakdownItem};
use crate::payments::{PaymentSchedule, PaymentScheduleItem};
use crate::types::{PostponementPolicy, Strategy};

/// outcome of comparing the installment and lump-sum strategies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub recommendation: Recommendation,
    pub installment: InstallmentSummary,
    pub lump_sum: LumpSumSummary,
    pub payment_schedule: Vec<PaymentScheduleItem>,
    pub investment_breakdown: Vec<InvestmentBreakdownItem>,
}

impl StrategyResult {
    /// installments actually deferred into the first payment
    pub fn postponed_months(&self) -> u32 {
        self.payment_schedule
            .first()
            .map(|p| p.accumulated_payments.saturating_sub(1))
            .unwrap_or(0)
    }

    /// one-line explanation of why the recommended strategy wins
    pub fn insight(&self) -> String {
        let savings = self
            .recommendation
            .savings
            .as_decimal()
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let reason = match self.recommendation.strategy {
            Strategy::LumpSum => {
                "the avoided fees exceed the opportunity cost of not investing the money."
            }
            Strategy::Installment => {
                "the investment returns on the remaining balance exceed the additional fees paid."
            }
        };

        format!(
            "The {} payment saves ${} because {}",
            self.recommendation.strategy.label().to_lowercase(),
            savings,
            reason
        )
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

/// compares paying in installments against paying a lump sum
#[derive(Debug, Clone, Default)]
pub struct PaymentStrategyCalculator {
    config: CalculatorConfig,
}

impl PaymentStrategyCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// check, parse and calculate a raw request
    pub fn calculate_request(&self, request: &StrategyRequest) -> Result<StrategyResult> {
        let input = request.parse()?;
        self.calculate(&input)
    }

    /// run the full comparison for a parsed input
    pub fn calculate(&self, input: &StrategyInput) -> Result<StrategyResult> {
        input.validate()?;

        let months_to_lump_sum = months_between(input.lump_sum_date, input.first_payment_date);
        let postpone_months = self.effective_postponement(input, months_to_lump_sum)?;

        debug!(
            "calculating {} installments of {} with {} postponed months, lump sum {} months out",
            input.installments,
            input.installment_amount(),
            postpone_months,
            months_to_lump_sum
        );

        let schedule = PaymentSchedule::generate(
            input.total_amount,
            input.installments,
            input.on_time_fee,
            input.first_payment_date,
            postpone_months,
            &self.config.date_format,
        )?;

        let breakdown = AccrualEngine::new(input.return_rate).accrue(
            input.total_amount,
            schedule.installment_amount,
            input.installments,
            postpone_months,
        )?;

        let installment = InstallmentSummary::new(
            input.total_amount,
            input.on_time_fee,
            breakdown.total_returns(),
        )?;
        let lump_sum =
            LumpSumSummary::new(input.total_amount, input.return_rate, months_to_lump_sum)?;
        let recommendation = Recommendation::compare(&installment, &lump_sum)?;

        debug!(
            "{} payments, {} months of returns totalling {}; installment net {} vs lump sum net {}: {}",
            schedule.len(),
            breakdown.len(),
            installment.investment_returns,
            installment.net_cost,
            lump_sum.net_cost,
            recommendation.strategy
        );

        Ok(StrategyResult {
            recommendation,
            installment,
            lump_sum,
            payment_schedule: schedule.into_items(),
            investment_breakdown: breakdown.into_items(),
        })
    }

    /// postponement capped by the lump-sum date and by the number of installments
    pub fn effective_postponement(
        &self,
        input: &StrategyInput,
        months_to_lump_sum: i32,
    ) -> Result<u32> {
        let cap = u32::try_from(months_to_lump_sum).unwrap_or(0);
        let mut months = input.postpone_months.min(cap);
        if months < input.postpone_months {
            warn!(
                "requested postponement of {} months reduced to {}: lump sum is due {} months after the first payment",
                input.postpone_months, months, months_to_lump_sum
            );
        }

        if months >= input.installments {
            match self.config.postponement_policy {
                PostponementPolicy::Clamp => {
                    let clamped = input.installments.saturating_sub(1);
                    warn!(
                        "postponement of {} months covers all {} installments, reduced to {}",
                        months, input.installments, clamped
                    );
                    months = clamped;
                }
                PostponementPolicy::Reject => {
                    return Err(StrategyError::PostponementExceedsInstallments {
                        requested: months,
                        installments: input.installments,
                    });
                }
            }
        }

        Ok(months)
    }
}

/// compare strategies with the default configuration
pub fn calculate_strategy(input: &StrategyInput) -> Result<StrategyResult> {
    PaymentStrategyCalculator::default().calculate(input)
}
