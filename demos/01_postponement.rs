/// postponement - defer installments until closer to the lump-sum date
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tuition_strategy::{
    CalculatorConfig, Money, PaymentStrategyCalculator, Rate, StrategyError, StrategyInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== postponing installments ===\n");

    let first_payment = NaiveDate::from_ymd_opt(2024, 8, 31).ok_or("bad date")?;
    let lump_sum = NaiveDate::from_ymd_opt(2024, 11, 15).ok_or("bad date")?;

    let base = StrategyInput::new(
        Money::from_major(18_000),
        10,
        Money::from_major(75),
        Rate::from_percentage(dec!(4.5)),
        first_payment,
        lump_sum,
    );

    let calculator = PaymentStrategyCalculator::default();

    // asking for more than the lump-sum date allows is capped at 3 months
    for requested in [0, 2, 6] {
        let result = calculator.calculate(&base.clone().with_postpone_months(requested))?;

        println!("requested {} months, postponed {}", requested, result.postponed_months());
        for payment in &result.payment_schedule {
            println!(
                "  #{:<2} {}  {:>10.2}  fee {:>6.2}  remaining {:>10.2}  covers {}",
                payment.payment_number,
                payment.date,
                payment.amount.as_decimal(),
                payment.fee.as_decimal(),
                payment.remaining_balance.as_decimal(),
                payment.accumulated_payments,
            );
        }
        println!(
            "  returns {:.2}, installment net {:.2}, lump sum net {:.2}",
            result.installment.investment_returns.as_decimal(),
            result.installment.net_cost.as_decimal(),
            result.lump_sum.net_cost.as_decimal(),
        );
        println!("  {}\n", result.insight());
    }

    // a postponement covering the whole plan is clamped unless the strict preset is used
    let far_lump_sum = NaiveDate::from_ymd_opt(2026, 1, 1).ok_or("bad date")?;
    let mut whole_plan = base.clone().with_postpone_months(12);
    whole_plan.lump_sum_date = far_lump_sum;

    let clamped = calculator.calculate(&whole_plan)?;
    println!("default config postpones {} months", clamped.postponed_months());

    let strict = PaymentStrategyCalculator::new(CalculatorConfig::strict());
    match strict.calculate(&whole_plan) {
        Err(err @ StrategyError::PostponementExceedsInstallments { .. }) => {
            println!("strict config: {}", err)
        }
        other => println!("strict config: unexpected {:?}", other.map(|r| r.recommendation)),
    }

    Ok(())
}
