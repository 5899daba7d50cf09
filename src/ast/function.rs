use std::sync::Arc;

/// Logic of a function callable from expressions.
///
/// Implementations validate their own argument count and report failures as a
/// message, which the engine wraps together with the function name.
pub trait Function: Send + Sync {
    fn invoke(&self, arguments: &[f64]) -> Result<f64, String>;
}

impl<F> Function for F
where
    F: Fn(&[f64]) -> Result<f64, String> + Send + Sync,
{
    fn invoke(&self, arguments: &[f64]) -> Result<f64, String> {
        self(arguments)
    }
}

pub type FunctionHandle = Arc<dyn Function>;
