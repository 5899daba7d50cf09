use exevalator_rs::{register_functions, Exevalator};
use rayon::prelude::*;

fn main() {
    pretty_env_logger::init();

    let expression = "sqrt(price * volume) / (1 + rate)";
    let rows: Vec<[f64; 3]> = (0..16)
        .map(|i| [100.0 + i as f64, 3000.0 - 50.0 * i as f64, 0.01 * i as f64])
        .collect();

    let results: Vec<f64> = rows
        .par_iter()
        .map_init(
            || {
                let mut exevalator = Exevalator::new();
                register_functions(&mut exevalator).unwrap();
                let addresses = [
                    exevalator.declare_variable("price").unwrap(),
                    exevalator.declare_variable("volume").unwrap(),
                    exevalator.declare_variable("rate").unwrap(),
                ];
                (exevalator, addresses)
            },
            |(exevalator, addresses), row| {
                for (address, value) in addresses.iter().zip(row) {
                    exevalator.write_variable_at(*address, *value).unwrap();
                }
                exevalator.eval(expression).unwrap()
            },
        )
        .collect();

    for (i, result) in results.iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
