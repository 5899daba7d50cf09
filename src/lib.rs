pub mod ast;
pub mod engine;
pub mod error;
pub mod functions;
pub mod memory;
pub mod messages;
pub mod settings;

pub use ast::{Function, FunctionHandle};
pub use engine::Exevalator;
pub use error::{ErrorKind, ExevalatorError, Result};
pub use functions::register_functions;
pub use messages::ErrorMessages;
pub use settings::Settings;

/// Evaluates `expression` once, with the functions of [`functions`] connected.
pub fn evaluate_expression(expression: &str) -> Result<f64> {
    let mut exevalator = Exevalator::new();
    register_functions(&mut exevalator)?;
    exevalator.eval(expression)
}
