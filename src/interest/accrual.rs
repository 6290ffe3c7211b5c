use rust_decimal::Decimal;
use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, StrategyError};

/// return earned in one month on money not yet paid out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentBreakdownItem {
    pub month: u32,
    pub balance: Money,
    pub monthly_return: Money,
    pub cumulative_return: Money,
}

/// month-by-month returns on the unpaid balance of an installment plan
#[derive(Debug, Clone, Default)]
pub struct InvestmentBreakdown {
    pub items: Vec<InvestmentBreakdownItem>,
}

impl InvestmentBreakdown {
    /// total return over every accrued month
    pub fn total_returns(&self) -> Money {
        self.items
            .last()
            .map(|item| item.cumulative_return)
            .unwrap_or(Money::ZERO)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<InvestmentBreakdownItem> {
        self.items
    }
}

/// engine for accruing investment returns across an installment plan
pub struct AccrualEngine {
    pub annual_rate: Rate,
}

impl AccrualEngine {
    pub fn new(annual_rate: Rate) -> Self {
        Self { annual_rate }
    }

    /// accrue returns over the postponement months and then on the balance left after each payment
    ///
    /// While payments are postponed the whole `total_amount` stays invested.
    /// Afterwards the balance left after each nominal installment earns one
    /// month of return; the month of the final installment earns nothing.
    pub fn accrue(
        &self,
        total_amount: Money,
        installment_amount: Money,
        installments: u32,
        postpone_months: u32,
    ) -> Result<InvestmentBreakdown> {
        let monthly_rate = self.annual_rate.monthly_rate();
        let mut items = Vec::new();
        let mut cumulative_return = Money::ZERO;

        for month in 1..=postpone_months {
            let monthly_return = total_amount
                .periodic_return(monthly_rate)
                .ok_or_else(|| StrategyError::overflow("monthly return"))?;
            cumulative_return = accumulate(cumulative_return, monthly_return)?;
            items.push(InvestmentBreakdownItem {
                month,
                balance: total_amount,
                monthly_return,
                cumulative_return,
            });
        }

        for i in postpone_months..installments.saturating_sub(1) {
            let balance = installment_amount
                .checked_mul(Decimal::from(i + 1))
                .and_then(|paid_off| total_amount.checked_sub(paid_off))
                .ok_or_else(|| StrategyError::overflow("invested balance"))?;
            if !balance.is_positive() {
                continue;
            }

            let monthly_return = balance
                .periodic_return(monthly_rate)
                .ok_or_else(|| StrategyError::overflow("monthly return"))?;
            cumulative_return = accumulate(cumulative_return, monthly_return)?;
            items.push(InvestmentBreakdownItem {
                month: i + 1,
                balance,
                monthly_return,
                cumulative_return,
            });
        }

        Ok(InvestmentBreakdown { items })
    }
}

fn accumulate(cumulative_return: Money, monthly_return: Money) -> Result<Money> {
    cumulative_return
        .checked_add(monthly_return)
        .ok_or_else(|| StrategyError::overflow("cumulative return"))
}
