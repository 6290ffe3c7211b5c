//! Payment strategy CLI
//!
//! Reads a JSON calculation request from `--input` or piped stdin, applies any
//! field overrides given as flags, and prints the strategy comparison.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use tuition_strategy::{
    CalculatorConfig, PaymentStrategyCalculator, StrategyError, StrategyRequest, StrategyResult,
};

/// Compare paying an obligation as a lump sum or in installments
#[derive(Parser)]
#[command(name = "tuition-strategy", version)]
struct Cli {
    /// JSON request file (camelCase fields); piped stdin is read when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Total amount owed
    #[arg(long)]
    total_amount: Option<String>,

    /// Number of equal installments
    #[arg(long)]
    installments: Option<String>,

    /// One-time fee charged with the first installment payment
    #[arg(long = "fee")]
    on_time_fee: Option<String>,

    /// Assumed annual return in percent (5 means 5%)
    #[arg(long)]
    return_rate: Option<String>,

    /// First installment due date (YYYY-MM-DD)
    #[arg(long)]
    first_payment_date: Option<String>,

    /// Date the lump sum would be paid (YYYY-MM-DD)
    #[arg(long)]
    lump_sum_date: Option<String>,

    /// Installments to defer into the first payment
    #[arg(long)]
    postpone_months: Option<String>,

    /// Fail instead of clamping when the postponement covers every installment
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(exit_code(&e));
    }
}

/// 2 when the request itself was at fault, 1 for everything else
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<StrategyError>() {
        Some(err) if err.is_client_error() => 2,
        _ => 1,
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let request = load_request(cli)?;
    let result = evaluate(cli, request)?;

    match cli.output {
        OutputFormat::Json => println!("{}", result.to_json_pretty()?),
        OutputFormat::Summary => print_summary(&result),
    }

    Ok(())
}

fn load_request(cli: &Cli) -> anyhow::Result<StrategyRequest> {
    let contents = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?,
        None if !io::stdin().is_terminal() => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
        None => String::new(),
    };

    if contents.trim().is_empty() {
        return Ok(StrategyRequest::default());
    }

    Ok(StrategyRequest::from_json(&contents)?)
}

fn evaluate(cli: &Cli, mut request: StrategyRequest) -> anyhow::Result<StrategyResult> {
    apply_overrides(&mut request, cli);
    Ok(calculator_for(cli).calculate_request(&request)?)
}

fn calculator_for(cli: &Cli) -> PaymentStrategyCalculator {
    let config = if cli.strict {
        CalculatorConfig::strict()
    } else {
        CalculatorConfig::default()
    };
    PaymentStrategyCalculator::new(config)
}

fn apply_overrides(request: &mut StrategyRequest, cli: &Cli) {
    let overrides = [
        (&mut request.total_amount, &cli.total_amount),
        (&mut request.installments, &cli.installments),
        (&mut request.on_time_fee, &cli.on_time_fee),
        (&mut request.return_rate, &cli.return_rate),
        (&mut request.first_payment_date, &cli.first_payment_date),
        (&mut request.lump_sum_date, &cli.lump_sum_date),
        (&mut request.postpone_months, &cli.postpone_months),
    ];

    for (field, flag) in overrides {
        if let Some(value) = flag {
            *field = Some(Value::String(value.clone()));
        }
    }
}

fn print_summary(result: &StrategyResult) {
    println!(
        "Recommended: {} (saves ${:.2})",
        result.recommendation.strategy,
        result.recommendation.savings.as_decimal()
    );
    println!();

    println!("{:<20} {:>14} {:>14}", "", "Installment", "Lump Sum");
    println!("{}", "-".repeat(50));
    println!(
        "{:<20} {:>14.2} {:>14.2}",
        "Total amount",
        result.installment.total_amount.as_decimal(),
        result.lump_sum.total_amount.as_decimal()
    );
    println!(
        "{:<20} {:>14.2} {:>14.2}",
        "Fees",
        result.installment.total_fees.as_decimal(),
        result.lump_sum.fees.as_decimal()
    );
    println!(
        "{:<20} {:>14.2} {:>14}",
        "Investment returns",
        result.installment.investment_returns.as_decimal(),
        "-"
    );
    println!(
        "{:<20} {:>14} {:>14.2}",
        "Opportunity cost",
        "-",
        result.lump_sum.opportunity_cost.as_decimal()
    );
    println!(
        "{:<20} {:>14.2} {:>14.2}",
        "Net cost",
        result.installment.net_cost.as_decimal(),
        result.lump_sum.net_cost.as_decimal()
    );
    println!();

    println!(
        "{:>4} {:>14} {:>12} {:>8} {:>14} {:>8}",
        "#", "Date", "Amount", "Fee", "Remaining", "Covers"
    );
    for payment in &result.payment_schedule {
        println!(
            "{:>4} {:>14} {:>12.2} {:>8.2} {:>14.2} {:>8}",
            payment.payment_number,
            payment.date,
            payment.amount.as_decimal(),
            payment.fee.as_decimal(),
            payment.remaining_balance.as_decimal(),
            payment.accumulated_payments
        );
    }
    println!();

    println!("{}", result.insight());
}
