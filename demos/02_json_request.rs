/// json request - the wire format a web or CLI adapter hands to the calculator
use tuition_strategy::{PaymentStrategyCalculator, StrategyRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = PaymentStrategyCalculator::default();

    let body = r#"{
        "totalAmount": "9500",
        "installments": 6,
        "onTimeFee": 40,
        "returnRate": 5,
        "firstPaymentDate": "2025-01-31",
        "lumpSumDate": "2025-03-01",
        "postponeMonths": 1
    }"#;

    let request = StrategyRequest::from_json(body)?;
    let result = calculator.calculate_request(&request)?;
    println!("{}", serde_json::to_string_pretty(&result.to_json_value()?)?);

    // client errors carry the offending field
    let incomplete = StrategyRequest::from_json(r#"{"totalAmount": 9500, "installments": 6}"#)?;
    if let Err(err) = calculator.calculate_request(&incomplete) {
        println!("rejected ({}): {}", if err.is_client_error() { 400 } else { 500 }, err);
    }

    Ok(())
}
