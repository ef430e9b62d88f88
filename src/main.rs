//! Brunsviga Emulator - CLI Entry Point
//!
//! Commands:
//! - `brunsviga-emu add <a> <b>` - Addition
//! - `brunsviga-emu sub <a> <b>` - Subtraction
//! - `brunsviga-emu mul <a> <b>` - Shift-and-add multiplication
//! - `brunsviga-emu div <a> <b>` - Integer division
//! - `brunsviga-emu ddiv <a> <b>` - Decimal division to five places
//! - `brunsviga-emu sqrt <a>` - Square root by odd numbers
//! - `brunsviga-emu test` - Built-in self-test

use std::time::Instant;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use brunsviga::{Algorithm, AlgorithmError, Calculator, Outcome, PlaybackConfig, Snapshot};

#[derive(Parser)]
#[command(name = "brunsviga-emu")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of the Brunsviga 13 RK pinwheel calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Output {
    /// Print the machine after every step
    #[arg(short, long)]
    trace: bool,
    /// Emit every snapshot as a JSON line
    #[arg(short, long)]
    json: bool,
    /// Play the steps with this many milliseconds between them
    #[arg(short, long)]
    speed: Option<u64>,
    /// Print the step listing before running
    #[arg(short, long)]
    listing: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add two numbers
    Add {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        output: Output,
    },
    /// Subtract the second number from the first
    Sub {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        output: Output,
    },
    /// Multiply by shift-and-add
    Mul {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        output: Output,
    },
    /// Integer division with remainder
    Div {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        output: Output,
    },
    /// Decimal division to five places
    Ddiv {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        output: Output,
    },
    /// Square root to five places
    Sqrt {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[command(flatten)]
        output: Output,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add { a, b, output }) => {
            run_algorithm(&output, |calc| calc.run_addition(&a, &b));
        }
        Some(Commands::Sub { a, b, output }) => {
            run_algorithm(&output, |calc| calc.run_subtraction(&a, &b));
        }
        Some(Commands::Mul { a, b, output }) => {
            run_algorithm(&output, |calc| calc.run_multiplication(&a, &b));
        }
        Some(Commands::Div { a, b, output }) => {
            run_algorithm(&output, |calc| calc.run_division(&a, &b));
        }
        Some(Commands::Ddiv { a, b, output }) => {
            run_algorithm(&output, |calc| calc.run_decimal_division(&a, &b));
        }
        Some(Commands::Sqrt { a, output }) => {
            run_algorithm(&output, |calc| calc.run_square_root(&a));
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Brunsviga Emulator v0.1.0");
            println!("A Brunsviga 13 RK pinwheel calculator emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_multiplication();
        }
    }
}

fn run_algorithm<F>(output: &Output, load: F)
where
    F: FnOnce(&mut Calculator) -> Result<&Algorithm, AlgorithmError>,
{
    let config = output.speed.map_or_else(PlaybackConfig::default, PlaybackConfig::from_millis);
    let mut calc = Calculator::with_config(config);

    let outcome = match load(&mut calc) {
        Ok(algorithm) => {
            println!("🔧 {}: {} steps", algorithm.kind, algorithm.len());
            if output.listing {
                println!();
                println!("{}", brunsviga::algo::listing(&algorithm.steps));
            }
            algorithm.outcome.clone()
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match output.speed {
        Some(_) => play_timed(&mut calc, output),
        None => {
            while !calc.sequencer().is_finished() {
                let snapshot = calc.step_forward();
                emit(&snapshot, output);
            }
        }
    }

    print_result(&calc.snapshot(), &outcome);
}

/// Replay through the playback timer, sleeping until each step is due.
fn play_timed(calc: &mut Calculator, output: &Output) {
    let interval = calc.sequencer().interval();
    calc.play(interval, Instant::now());

    while let Some(deadline) = calc.sequencer().next_deadline() {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        if let Some(snapshot) = calc.tick(Instant::now()) {
            emit(&snapshot, output);
            if !output.trace && !output.json {
                if let Some(description) = &snapshot.description {
                    println!("  {}", description);
                }
            }
        }
    }
}

fn emit(snapshot: &Snapshot, output: &Output) {
    if output.json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("❌ Failed to encode snapshot: {}", e),
        }
    }
    if output.trace {
        println!("{}", snapshot);
        println!();
    }
}

fn print_result(snapshot: &Snapshot, outcome: &Outcome) {
    println!();
    println!("━━━ Machine ━━━");
    println!("Result register:    {}", snapshot.result_text());
    println!(
        "Input register:     {}",
        snapshot.input.iter().map(|d| d.to_string()).collect::<String>()
    );
    println!("Carriage:           {:+}", snapshot.carriage);
    println!(
        "Revolution counter: {}{}",
        if snapshot.counter_negative { '-' } else { '+' },
        snapshot.counter.iter().map(|d| d.to_string()).collect::<String>()
    );
    println!();
    println!("━━━ Result ━━━");
    println!("{}", outcome);
}

fn demo_multiplication() {
    println!("━━━ Multiplication Demo: 4711 × 305 ━━━");
    println!();

    let mut calc = Calculator::new();
    match calc.run_multiplication("4711", "305") {
        Ok(algorithm) => {
            for step in &algorithm.steps {
                println!("  {}", step.description);
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    let snapshot = calc.run_to_end();
    println!();
    println!("{}", snapshot);
    println!();
    println!("✓ Result register holds {}", snapshot.result_text());
}

fn run_self_test() {
    use brunsviga::Decimal;

    println!("━━━ Brunsviga Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool, detail: String| {
        print!("{}... ", name);
        if ok {
            println!("✓");
            passed += 1;
        } else {
            println!("✗ ({})", detail);
            failed += 1;
        }
    };

    // Test 1: Addition
    let mut calc = Calculator::new();
    let ok = calc.run_addition("123", "456").is_ok();
    let text = calc.run_to_end().result_text();
    check("Addition 123 + 456", ok && text == "0000000000579", text);

    // Test 2: Multiplication
    let mut calc = Calculator::new();
    let ok = calc.run_multiplication("12", "3").is_ok();
    let snapshot = calc.run_to_end();
    check(
        "Multiplication 12 × 3",
        ok && snapshot.result_text() == "0000000000036" && snapshot.carriage == 0,
        snapshot.result_text(),
    );

    // Test 3: Division
    let mut calc = Calculator::new();
    let outcome = calc.run_division("100", "7").map(|a| a.outcome.clone());
    check(
        "Division 100 ÷ 7",
        outcome == Ok(Outcome::Division { quotient: 14, remainder: 2 }),
        format!("{:?}", outcome),
    );

    // Test 4: Square root
    let mut calc = Calculator::new();
    let outcome = calc.run_square_root("152399025").map(|a| a.outcome.clone());
    let ok = matches!(
        &outcome,
        Ok(Outcome::SquareRoot { root, remainder, .. })
            if root.integer_digits() == "12345" && remainder.is_zero()
    );
    check("Square root of 152399025", ok, format!("{:?}", outcome));

    // Test 5: Decimal division
    let mut calc = Calculator::new();
    let outcome = calc.run_decimal_division("10", "4").map(|a| a.outcome.clone());
    let expected = Decimal::parse("2.50000").ok();
    let ok = matches!(
        &outcome,
        Ok(Outcome::DecimalDivision { quotient, remainder })
            if Some(quotient) == expected.as_ref() && remainder.to_fixed(5) == "0.00000"
    );
    check("Decimal division 10 ÷ 4", ok, format!("{:?}", outcome));

    // Test 6: Rejected subtraction leaves the machine alone
    let mut calc = Calculator::new();
    let before = calc.snapshot();
    let rejected = calc.run_subtraction("5", "10").is_err();
    check(
        "Subtraction 5 - 10 rejected",
        rejected && calc.snapshot() == before,
        "sequence was generated".to_string(),
    );

    // Test 7: Step back replays to the same state
    let mut calc = Calculator::new();
    let ok = calc.run_division("9876", "54").is_ok();
    let mut replay_ok = ok;
    while !calc.sequencer().is_finished() {
        let before = calc.snapshot();
        calc.step_forward();
        let after = calc.snapshot();
        if calc.step_back() != before {
            replay_ok = false;
            break;
        }
        if calc.step_forward() != after {
            replay_ok = false;
            break;
        }
    }
    check("Step back replay", replay_ok, "snapshots differ".to_string());

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
