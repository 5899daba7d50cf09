use exevalator_macros::exevalator_fn;
use exevalator_rs::{register_functions, ErrorMessages, Exevalator, Settings};

#[exevalator_fn]
fn hypot(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.hypot(b))
}

#[exevalator_fn]
fn clamp(value: f64, low: f64, high: f64) -> Result<f64, String> {
    if low > high {
        return Err(format!("empty range [{low}, {high}]"));
    }
    Ok(value.clamp(low, high))
}

fn main() {
    pretty_env_logger::init();

    let mut exevalator = Exevalator::new();

    let result = exevalator.eval("1.2 + 3.4 * -5.6").unwrap();
    println!("1.2 + 3.4 * -5.6 = {result}");

    exevalator.declare_variable("x").unwrap();
    let y = exevalator.declare_variable("y").unwrap();
    exevalator.write_variable("x", 3.0).unwrap();
    exevalator.write_variable_at(y, 4.0).unwrap();

    exevalator.connect_function("hypot", hypot).unwrap();
    exevalator.connect_function("clamp", clamp).unwrap();
    register_functions(&mut exevalator).unwrap();

    let result = exevalator.eval("hypot(x, y)").unwrap();
    println!("hypot(x, y) = {result}");

    let result = exevalator.eval("clamp(2 * x, 0, sqrt(16))").unwrap();
    println!("clamp(2 * x, 0, sqrt(16)) = {result}");

    exevalator.write_variable_at(y, 1.0).unwrap();
    let result = exevalator.reeval().unwrap();
    println!("after y = 1, reeval = {result}");

    match exevalator.eval("clamp(x, 1, 0)") {
        Ok(result) => println!("Result: {result}"),
        Err(err) => println!("Error: {}", exevalator.error_message(&err)),
    }

    let mut japanese = Exevalator::with_config(Settings::default(), ErrorMessages::japanese());
    match japanese.eval("1 + (2 * 3") {
        Ok(result) => println!("Result: {result}"),
        Err(err) => println!("Error: {}", japanese.error_message(&err)),
    }
}
