//! # DealCalc CLI
//!
//! Command-line front end for the pricing engine.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           DealCalc CLI                                  │
//! │                                                                         │
//! │  args ──► validate ──► compute ──► print JSON ──► history insert       │
//! │                                        │                                │
//! │                                        ▼ (--analyze)                    │
//! │                                  Gemini advisory ──► set_advice         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::process::ExitCode;

use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use dealcalc_advisor::DealAdvisor;
use dealcalc_core::types::{
    CalculationMode, DealType, DiscountType, HistoryEntry, PricingInput,
};
use dealcalc_core::validation;
use dealcalc_core::{compute, HISTORY_CAPACITY};
use dealcalc_history::{Database, DbConfig};

/// What the invocation asked for.
enum Action {
    Compute,
    History(i64),
    ClearHistory,
}

struct Cli {
    action: Action,
    input: PricingInput,
    mode: CalculationMode,
    db_path: String,
    analyze: bool,
}

fn print_usage() {
    println!("DealCalc - Discount & Deal Calculator");
    println!();
    println!("Usage: dealcalc [OPTIONS]");
    println!();
    println!("Calculation options:");
    println!("  -m, --mode <MODE>       PRICE, DISCOUNT or ORIGINAL (default: PRICE)");
    println!("  -p, --price <AMOUNT>    Original price");
    println!("  -d, --discount <VALUE>  Discount value (percent or fixed amount)");
    println!("  -t, --type <TYPE>       Discount type: percent or fixed (default: percent)");
    println!("      --deal <DEAL>       Deal type: standard, bogo or b2g1 (default: standard)");
    println!("  -q, --quantity <N>      Quantity (default: 1)");
    println!("      --coupon <PCT>      Additional stacking coupon, percent");
    println!("      --tax <PCT>         Tax rate, percent");
    println!("      --shipping <AMT>    Flat shipping cost");
    println!("      --target <AMOUNT>   Target/final price (DISCOUNT and ORIGINAL modes)");
    println!("      --item <NAME>       Item name");
    println!("      --currency <CODE>   Currency code (default: USD)");
    println!();
    println!("General options:");
    println!("      --analyze           Ask the AI advisor for a verdict (needs GEMINI_API_KEY)");
    println!("      --db <PATH>         History database path (default: ./dealcalc.db)");
    println!("      --history [N]       List the N most recent calculations (default: {HISTORY_CAPACITY})");
    println!("      --clear-history     Delete all saved calculations");
    println!("  -h, --help              Show this help message");
}

/// Parses command line arguments. Returns `Ok(None)` when `--help` was
/// requested and the process should exit cleanly.
fn parse_args(args: &[String]) -> Result<Option<Cli>, String> {
    let mut cli = Cli {
        action: Action::Compute,
        input: PricingInput::default(),
        mode: CalculationMode::Price,
        db_path: String::from("./dealcalc.db"),
        analyze: false,
    };

    fn take<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
        *i += 1;
        args.get(*i)
            .map(String::as_str)
            .ok_or_else(|| format!("{flag} requires a value"))
    }

    fn take_f64(args: &[String], i: &mut usize, flag: &str) -> Result<f64, String> {
        let raw = take(args, i, flag)?;
        raw.parse()
            .map_err(|_| format!("{flag}: '{raw}' is not a number"))
    }

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" | "-m" => {
                let raw = take(args, &mut i, "--mode")?;
                cli.mode = CalculationMode::parse(raw)
                    .ok_or_else(|| format!("--mode: '{raw}' is not PRICE, DISCOUNT or ORIGINAL"))?;
            }
            "--price" | "-p" => {
                cli.input.original_price = take_f64(args, &mut i, "--price")?;
            }
            "--discount" | "-d" => {
                cli.input.discount_value = take_f64(args, &mut i, "--discount")?;
            }
            "--type" | "-t" => {
                let raw = take(args, &mut i, "--type")?;
                cli.input.discount_type = DiscountType::parse(raw)
                    .ok_or_else(|| format!("--type: '{raw}' is not percent or fixed"))?;
            }
            "--deal" => {
                let raw = take(args, &mut i, "--deal")?;
                cli.input.deal_type = DealType::parse(raw)
                    .ok_or_else(|| format!("--deal: '{raw}' is not standard, bogo or b2g1"))?;
            }
            "--quantity" | "-q" => {
                let raw = take(args, &mut i, "--quantity")?;
                cli.input.quantity = raw
                    .parse()
                    .map_err(|_| format!("--quantity: '{raw}' is not a whole number"))?;
            }
            "--coupon" => {
                cli.input.additional_coupon = take_f64(args, &mut i, "--coupon")?;
            }
            "--tax" => {
                cli.input.tax_rate = take_f64(args, &mut i, "--tax")?;
            }
            "--shipping" => {
                cli.input.shipping_cost = take_f64(args, &mut i, "--shipping")?;
            }
            "--target" => {
                cli.input.target_price = take_f64(args, &mut i, "--target")?;
            }
            "--item" => {
                cli.input.item_name = take(args, &mut i, "--item")?.to_string();
            }
            "--currency" => {
                cli.input.currency = take(args, &mut i, "--currency")?.to_uppercase();
            }
            "--analyze" => {
                cli.analyze = true;
            }
            "--db" => {
                cli.db_path = take(args, &mut i, "--db")?.to_string();
            }
            "--history" => {
                // Optional count argument
                let limit = match args.get(i + 1) {
                    Some(next) if !next.starts_with('-') => {
                        i += 1;
                        next.parse()
                            .map_err(|_| format!("--history: '{next}' is not a whole number"))?
                    }
                    _ => HISTORY_CAPACITY,
                };
                cli.action = Action::History(limit);
            }
            "--clear-history" => {
                cli.action = Action::ClearHistory;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => {
                return Err(format!("unknown option '{other}' (see --help)"));
            }
        }
        i += 1;
    }

    Ok(Some(cli))
}

/// Rejects input a user almost certainly mistyped. The engine itself is
/// total and would happily produce NaN/Infinity for garbage, but the CLI
/// is an interactive surface and owes a real error message.
fn validate(input: &PricingInput, mode: CalculationMode) -> Result<(), String> {
    let check = |r: validation::ValidationResult<()>| r.map_err(|e| e.to_string());

    // Percent discounts must stay below 100 in the modes that consume
    // them: a 100%+ value would otherwise fall through to the engine's
    // zero-discount fallback in ORIGINAL mode without any signal.
    let check_discount = |input: &PricingInput| match input.discount_type {
        DiscountType::Percent => check(validation::validate_percent(
            "discount",
            input.discount_value,
        )),
        DiscountType::Fixed => check(validation::validate_price(
            "discount",
            input.discount_value,
        )),
    };

    match mode {
        CalculationMode::Price => {
            check(validation::validate_price("price", input.original_price))?;
            check_discount(input)?;
        }
        CalculationMode::Discount => {
            check(validation::validate_price("price", input.original_price))?;
            check(validation::validate_price("target", input.target_price))?;
        }
        CalculationMode::Original => {
            check(validation::validate_price("target", input.target_price))?;
            check_discount(input)?;
        }
    }
    check(validation::validate_quantity(input.quantity))?;
    check(validation::validate_price("shipping", input.shipping_cost))?;
    check(validation::validate_percent("tax", input.tax_rate))?;
    check(validation::validate_percent("coupon", input.additional_coupon))?;
    check(validation::validate_item_name(&input.item_name))?;
    check(validation::validate_currency_code(&input.currency))?;
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(DbConfig::new(&cli.db_path)).await?;

    match cli.action {
        Action::History(limit) => {
            let entries = db.history().list(limit).await?;
            if entries.is_empty() {
                println!("No saved calculations.");
            } else {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }
        Action::ClearHistory => {
            let removed = db.history().clear().await?;
            println!("Removed {removed} saved calculation(s).");
        }
        Action::Compute => {
            if let Err(msg) = validate(&cli.input, cli.mode) {
                db.close().await;
                return Err(msg.into());
            }

            let result = compute(&cli.input, cli.mode);
            println!("{}", serde_json::to_string_pretty(&result)?);

            let mut entry = HistoryEntry::new(cli.input.clone(), result.clone());

            if cli.analyze {
                let advisor = DealAdvisor::from_env();
                let advice = advisor.analyze(&cli.input, &result).await;
                println!();
                println!("{advice}");
                entry.ai_advice = Some(advice);
            }

            db.history().insert(&entry).await?;
            debug!(id = %entry.id, "Calculation saved to history");
        }
    }

    db.close().await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dealcalc")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_compute_flags() {
        let cli = parse_args(&args(&[
            "--mode", "PRICE", "--price", "100", "--discount", "20", "--quantity", "3",
            "--deal", "bogo", "--currency", "eur",
        ]))
        .unwrap()
        .unwrap();

        assert!(matches!(cli.action, Action::Compute));
        assert_eq!(cli.mode, CalculationMode::Price);
        assert_eq!(cli.input.original_price, 100.0);
        assert_eq!(cli.input.discount_value, 20.0);
        assert_eq!(cli.input.quantity, 3);
        assert_eq!(cli.input.deal_type, DealType::Bogo);
        assert_eq!(cli.input.currency, "EUR");
    }

    #[test]
    fn test_parse_history_with_and_without_count() {
        let cli = parse_args(&args(&["--history"])).unwrap().unwrap();
        assert!(matches!(cli.action, Action::History(n) if n == HISTORY_CAPACITY));

        let cli = parse_args(&args(&["--history", "10"])).unwrap().unwrap();
        assert!(matches!(cli.action, Action::History(10)));
    }

    #[test]
    fn test_parse_rejects_unknown_flag_and_bad_values() {
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
        assert!(parse_args(&args(&["--price", "abc"])).is_err());
        assert!(parse_args(&args(&["--mode", "SIDEWAYS"])).is_err());
        assert!(parse_args(&args(&["--price"])).is_err());
    }

    #[test]
    fn test_validate_catches_bad_interactive_input() {
        let mut input = PricingInput {
            original_price: 100.0,
            ..Default::default()
        };
        assert!(validate(&input, CalculationMode::Price).is_ok());

        input.quantity = 0;
        assert!(validate(&input, CalculationMode::Price).is_err());

        input.quantity = 1;
        input.tax_rate = 150.0;
        assert!(validate(&input, CalculationMode::Price).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_percent_discount() {
        // A 150% percent discount would silently hit the engine's
        // zero-discount fallback in ORIGINAL mode; reject it up front.
        let mut input = PricingInput {
            target_price: 80.0,
            discount_value: 150.0,
            discount_type: DiscountType::Percent,
            ..Default::default()
        };
        assert!(validate(&input, CalculationMode::Original).is_err());
        assert!(validate(&input, CalculationMode::Price).is_err());

        input.discount_value = 20.0;
        assert!(validate(&input, CalculationMode::Original).is_ok());

        // Fixed discounts are amounts, not rates: 150 is fine, negative isn't.
        input.discount_type = DiscountType::Fixed;
        input.discount_value = 150.0;
        assert!(validate(&input, CalculationMode::Price).is_ok());
        input.discount_value = -1.0;
        assert!(validate(&input, CalculationMode::Price).is_err());
    }
}
