use crate::engine::Exevalator;
use crate::error::Result;
use exevalator_macros::exevalator_fn;

pub fn register(exevalator: &mut Exevalator) -> Result<()> {
    exevalator.connect_function("sin", sin)?;
    exevalator.connect_function("cos", cos)?;
    exevalator.connect_function("tan", tan)?;
    exevalator.connect_function("asin", asin)?;
    exevalator.connect_function("acos", acos)?;
    exevalator.connect_function("atan", atan)?;
    Ok(())
}

#[exevalator_fn]
fn sin(x: f64) -> std::result::Result<f64, String> {
    Ok(x.sin())
}

#[exevalator_fn]
fn cos(x: f64) -> std::result::Result<f64, String> {
    Ok(x.cos())
}

#[exevalator_fn]
fn tan(x: f64) -> std::result::Result<f64, String> {
    Ok(x.tan())
}

#[exevalator_fn]
fn asin(x: f64) -> std::result::Result<f64, String> {
    Ok(x.asin())
}

#[exevalator_fn]
fn acos(x: f64) -> std::result::Result<f64, String> {
    Ok(x.acos())
}

#[exevalator_fn]
fn atan(x: f64) -> std::result::Result<f64, String> {
    Ok(x.atan())
}
