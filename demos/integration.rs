//! Integrates a function given as an expression with Simpson's rule.
//!
//! Usage: `cargo run --example integration -- "3*x*x + 2*x + 1" 0 1`

use exevalator_rs::{register_functions, Exevalator};
use std::env;
use std::process;

const INTERVALS: usize = 1000;

fn main() {
    pretty_env_logger::init();

    let mut args = env::args().skip(1);
    let expression = args.next().unwrap_or_else(|| "3*x*x + 2*x + 1".to_string());
    let lower = parse_bound(args.next(), 0.0);
    let upper = parse_bound(args.next(), 1.0);

    let mut exevalator = Exevalator::new();
    register_functions(&mut exevalator).unwrap();
    let x = exevalator.declare_variable("x").unwrap();

    let step = (upper - lower) / INTERVALS as f64;
    let mut sum = 0.0;
    for i in 0..=INTERVALS {
        let weight = match i {
            0 => 1.0,
            i if i == INTERVALS => 1.0,
            i if i % 2 == 1 => 4.0,
            _ => 2.0,
        };
        exevalator
            .write_variable_at(x, lower + step * i as f64)
            .unwrap();
        match exevalator.eval(&expression) {
            Ok(value) => sum += weight * value,
            Err(err) => {
                eprintln!("Error: {}", exevalator.error_message(&err));
                process::exit(1);
            }
        }
    }

    println!(
        "Integral of {expression} over [{lower}, {upper}]: {}",
        sum * step / 3.0
    );
}

fn parse_bound(arg: Option<String>, default: f64) -> f64 {
    match arg.map(|arg| arg.parse::<f64>()) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            eprintln!("Invalid bound: {err}");
            process::exit(1);
        }
        None => default,
    }
}
