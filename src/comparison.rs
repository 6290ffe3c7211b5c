use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, StrategyError};
use crate::types::Strategy;

/// cost of paying by installments
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSummary {
    pub total_amount: Money,
    pub total_fees: Money,
    pub investment_returns: Money,
    pub net_cost: Money,
}

impl InstallmentSummary {
    pub fn new(total_amount: Money, total_fees: Money, investment_returns: Money) -> Result<Self> {
        let net_cost = total_amount
            .checked_add(total_fees)
            .and_then(|cost| cost.checked_sub(investment_returns))
            .ok_or_else(|| StrategyError::overflow("installment net cost"))?;

        Ok(Self {
            total_amount,
            total_fees,
            investment_returns,
            net_cost,
        })
    }
}

/// cost of paying everything on the lump-sum date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumSummary {
    pub total_amount: Money,
    pub fees: Money,
    pub opportunity_cost: Money,
    pub net_cost: Money,
}

impl LumpSumSummary {
    /// opportunity cost is simple annual return pro-rated over the months until the lump-sum date
    pub fn new(total_amount: Money, annual_rate: Rate, months_to_lump_sum: i32) -> Result<Self> {
        let opportunity_cost = total_amount
            .simple_return(annual_rate, months_to_lump_sum)
            .ok_or_else(|| StrategyError::overflow("opportunity cost"))?;
        let net_cost = total_amount
            .checked_add(opportunity_cost)
            .ok_or_else(|| StrategyError::overflow("lump sum net cost"))?;

        Ok(Self {
            total_amount,
            fees: Money::ZERO,
            opportunity_cost,
            net_cost,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub savings: Money,
}

impl Recommendation {
    /// lump sum only when strictly cheaper; ties go to installments
    pub fn compare(installment: &InstallmentSummary, lump_sum: &LumpSumSummary) -> Result<Self> {
        let strategy = if lump_sum.net_cost < installment.net_cost {
            Strategy::LumpSum
        } else {
            Strategy::Installment
        };
        let savings = installment
            .net_cost
            .checked_sub(lump_sum.net_cost)
            .ok_or_else(|| StrategyError::overflow("savings"))?
            .abs();

        Ok(Self { strategy, savings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_installment_net_cost() {
        let summary = InstallmentSummary::new(
            Money::from_major(12_000),
            Money::from_major(50),
            Money::from_major(330),
        )
        .unwrap();
        assert_eq!(summary.net_cost, Money::from_major(11_720));
    }

    #[test]
    fn test_opportunity_cost_is_simple_and_prorated() {
        let summary =
            LumpSumSummary::new(Money::from_major(12_000), Rate::from_percentage(dec!(6)), 3)
                .unwrap();

        assert_eq!(summary.fees, Money::ZERO);
        assert_eq!(summary.opportunity_cost, Money::from_major(180));
        assert_eq!(summary.net_cost, Money::from_major(12_180));
    }

    #[test]
    fn test_lump_sum_on_first_payment_date_has_no_opportunity_cost() {
        let summary =
            LumpSumSummary::new(Money::from_major(12_000), Rate::from_percentage(dec!(6)), 0)
                .unwrap();
        assert_eq!(summary.opportunity_cost, Money::ZERO);
        assert_eq!(summary.net_cost, Money::from_major(12_000));
    }

    #[test]
    fn test_recommendation_prefers_cheaper_strategy() {
        let installment = InstallmentSummary::new(
            Money::from_major(12_000),
            Money::from_major(500),
            Money::from_major(100),
        )
        .unwrap();
        let lump_sum = LumpSumSummary::new(Money::from_major(12_000), Rate::ZERO, 0).unwrap();

        let recommendation = Recommendation::compare(&installment, &lump_sum).unwrap();
        assert_eq!(recommendation.strategy, Strategy::LumpSum);
        assert_eq!(recommendation.savings, Money::from_major(400));

        let installment = InstallmentSummary::new(
            Money::from_major(12_000),
            Money::from_major(50),
            Money::from_major(330),
        )
        .unwrap();
        let recommendation = Recommendation::compare(&installment, &lump_sum).unwrap();
        assert_eq!(recommendation.strategy, Strategy::Installment);
        assert_eq!(recommendation.savings, Money::from_major(280));
    }

    #[test]
    fn test_tie_goes_to_installments() {
        let installment = InstallmentSummary::new(
            Money::from_major(12_000),
            Money::from_major(100),
            Money::from_major(100),
        )
        .unwrap();
        let lump_sum = LumpSumSummary::new(Money::from_major(12_000), Rate::ZERO, 6).unwrap();

        let recommendation = Recommendation::compare(&installment, &lump_sum).unwrap();
        assert_eq!(recommendation.strategy, Strategy::Installment);
        assert_eq!(recommendation.savings, Money::ZERO);
    }

    #[test]
    fn test_opportunity_cost_overflow_is_a_calculation_error() {
        let result = LumpSumSummary::new(
            Money::from_decimal(Decimal::MAX),
            Rate::from_percentage(dec!(100)),
            24,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, StrategyError::CalculationError { .. }));
        assert!(!err.is_client_error());

        // a fee as large as the total pushes the net cost out of range
        let result = InstallmentSummary::new(
            Money::from_decimal(Decimal::MAX),
            Money::from_decimal(Decimal::MAX),
            Money::ZERO,
        );
        assert!(matches!(result, Err(StrategyError::CalculationError { .. })));
    }
}
