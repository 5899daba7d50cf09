use crate::engine::Exevalator;
use crate::error::Result;
use exevalator_macros::exevalator_fn;

pub fn register(exevalator: &mut Exevalator) -> Result<()> {
    exevalator.connect_function("sqrt", sqrt)?;
    exevalator.connect_function("exp", exp)?;
    exevalator.connect_function("pow", pow)?;
    exevalator.connect_function("ln", ln)?;
    exevalator.connect_function("log10", log10)?;
    exevalator.connect_function("log2", log2)?;
    Ok(())
}

#[exevalator_fn]
fn sqrt(x: f64) -> std::result::Result<f64, String> {
    Ok(x.sqrt())
}

#[exevalator_fn]
fn exp(x: f64) -> std::result::Result<f64, String> {
    Ok(x.exp())
}

#[exevalator_fn]
fn pow(base: f64, exponent: f64) -> std::result::Result<f64, String> {
    Ok(base.powf(exponent))
}

#[exevalator_fn]
fn ln(x: f64) -> std::result::Result<f64, String> {
    Ok(x.ln())
}

#[exevalator_fn]
fn log10(x: f64) -> std::result::Result<f64, String> {
    Ok(x.log10())
}

#[exevalator_fn]
fn log2(x: f64) -> std::result::Result<f64, String> {
    Ok(x.log2())
}
