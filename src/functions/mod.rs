//! A preset of math functions, connected through the public engine API only.

pub mod exponential;
pub mod other;
pub mod trigonometric;

use crate::engine::Exevalator;
use crate::error::Result;

/// Connects every function of the preset to `exevalator`.
pub fn register_functions(exevalator: &mut Exevalator) -> Result<()> {
    trigonometric::register(exevalator)?;
    exponential::register(exevalator)?;
    other::register(exevalator)?;
    Ok(())
}
