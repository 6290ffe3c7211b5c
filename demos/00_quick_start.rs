/// quick start - minimal example to get started
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tuition_strategy::{calculate_strategy, Money, Rate, StrategyInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $12,000 tuition in 12 installments with a $50 plan fee, assuming 6% returns
    let input = StrategyInput::new(
        Money::from_major(12_000),
        12,
        Money::from_major(50),
        Rate::from_percentage(dec!(6)),
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    );

    let result = calculate_strategy(&input)?;

    println!("{}", result.insight());
    println!("{}", result.json());

    Ok(())
}
