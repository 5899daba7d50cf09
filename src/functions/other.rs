use crate::engine::Exevalator;
use crate::error::Result;
use exevalator_macros::exevalator_fn;

pub fn register(exevalator: &mut Exevalator) -> Result<()> {
    exevalator.connect_function("abs", abs)?;
    exevalator.connect_function("pi", pi)?;
    Ok(())
}

#[exevalator_fn]
fn abs(x: f64) -> std::result::Result<f64, String> {
    Ok(x.abs())
}

#[exevalator_fn]
fn pi() -> std::result::Result<f64, String> {
    Ok(std::f64::consts::PI)
}
