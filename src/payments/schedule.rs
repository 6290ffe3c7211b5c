use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::dates::{add_months, format_date_with};
use crate::decimal::Money;
use crate::errors::{Result, StrategyError};

/// one payment actually made under the installment plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleItem {
    pub payment_number: u32,
    #[serde(skip)]
    pub due_date: NaiveDate,
    /// display form of `due_date`
    pub date: String,
    pub amount: Money,
    pub fee: Money,
    pub remaining_balance: Money,
    /// installments covered by this payment, more than 1 only for a postponed first payment
    pub accumulated_payments: u32,
}

/// installment payment schedule with postponed installments folded into the first payment
#[derive(Debug, Clone)]
pub struct PaymentSchedule {
    pub total_amount: Money,
    pub installments: u32,
    pub installment_amount: Money,
    pub postponed_months: u32,
    pub items: Vec<PaymentScheduleItem>,
}

impl PaymentSchedule {
    /// generate payment schedule
    ///
    /// `postpone_months` must already be resolved against the lump-sum date and
    /// leave at least one installment to pay.
    pub fn generate(
        total_amount: Money,
        installments: u32,
        on_time_fee: Money,
        first_payment_date: NaiveDate,
        postpone_months: u32,
        date_format: &str,
    ) -> Result<Self> {
        if installments == 0 {
            return Err(StrategyError::InvalidInput {
                field: "installments",
                message: "must be at least 1".to_string(),
            });
        }
        if postpone_months >= installments {
            return Err(StrategyError::PostponementExceedsInstallments {
                requested: postpone_months,
                installments,
            });
        }

        let installment_amount = total_amount / Decimal::from(installments);
        let payment_count = installments - postpone_months;
        let mut items = Vec::with_capacity(payment_count as usize);

        for i in 0..payment_count {
            let due_date = i32::try_from(i + postpone_months)
                .ok()
                .and_then(|months| add_months(first_payment_date, months))
                .ok_or_else(|| StrategyError::InvalidInput {
                    field: "firstPaymentDate",
                    message: format!(
                        "payment {} falls outside the supported calendar range",
                        i + 1
                    ),
                })?;

            let (amount, fee, accumulated_payments) = if i == 0 {
                let bundled = postpone_months + 1;
                let amount = installment_amount
                    .checked_mul(Decimal::from(bundled))
                    .ok_or_else(|| StrategyError::overflow("bundled first payment"))?;
                (amount, on_time_fee, bundled)
            } else {
                (installment_amount, Money::ZERO, 1)
            };

            // nominal installments paid off so far, not calendar payments
            let remaining_balance = installment_amount
                .checked_mul(Decimal::from(i + 1))
                .and_then(|paid_off| total_amount.checked_sub(paid_off))
                .ok_or_else(|| StrategyError::overflow("remaining balance"))?
                .max(Money::ZERO);

            items.push(PaymentScheduleItem {
                payment_number: i + 1,
                due_date,
                date: format_date_with(due_date, date_format),
                amount,
                fee,
                remaining_balance,
                accumulated_payments,
            });
        }

        Ok(Self {
            total_amount,
            installments,
            installment_amount,
            postponed_months: postpone_months,
            items,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<PaymentScheduleItem> {
        self.items
    }
}
