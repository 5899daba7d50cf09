use crate::ast::FunctionHandle;
use crate::error::{ExevalatorError, Result};
use log::trace;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// A compiled node, evaluated directly against the variable storage.
#[derive(Debug)]
pub enum EvaluatorNode {
    NumberLiteral(f64),
    /// Address of the variable in the storage.
    Variable(usize),
    Minus(Box<EvaluatorNode>),
    Addition(Box<EvaluatorNode>, Box<EvaluatorNode>),
    Subtraction(Box<EvaluatorNode>, Box<EvaluatorNode>),
    Multiplication(Box<EvaluatorNode>, Box<EvaluatorNode>),
    Division(Box<EvaluatorNode>, Box<EvaluatorNode>),
    FunctionCall(FunctionCallNode),
}

pub struct FunctionCallNode {
    function: FunctionHandle,
    name: String,
    arguments: Vec<EvaluatorNode>,
    values: Vec<f64>,
}

impl FunctionCallNode {
    pub fn new(function: FunctionHandle, name: String, arguments: Vec<EvaluatorNode>) -> Self {
        let values = vec![0.0; arguments.len()];
        Self {
            function,
            name,
            arguments,
            values,
        }
    }
}

impl fmt::Debug for FunctionCallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCallNode")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl EvaluatorNode {
    pub fn evaluate(&mut self, memory: &[f64]) -> Result<f64> {
        match self {
            EvaluatorNode::NumberLiteral(value) => Ok(*value),
            EvaluatorNode::Variable(address) => memory
                .get(*address)
                .copied()
                .ok_or(ExevalatorError::InvalidMemoryAddress { address: *address }),
            EvaluatorNode::Minus(operand) => Ok(-operand.evaluate(memory)?),
            EvaluatorNode::Addition(left, right) => {
                Ok(left.evaluate(memory)? + right.evaluate(memory)?)
            }
            EvaluatorNode::Subtraction(left, right) => {
                Ok(left.evaluate(memory)? - right.evaluate(memory)?)
            }
            EvaluatorNode::Multiplication(left, right) => {
                Ok(left.evaluate(memory)? * right.evaluate(memory)?)
            }
            EvaluatorNode::Division(left, right) => {
                Ok(left.evaluate(memory)? / right.evaluate(memory)?)
            }
            EvaluatorNode::FunctionCall(FunctionCallNode {
                function,
                name,
                arguments,
                values,
            }) => {
                for (value, argument) in values.iter_mut().zip(arguments.iter_mut()) {
                    *value = argument.evaluate(memory)?;
                }
                function
                    .invoke(values)
                    .map_err(|message| ExevalatorError::FunctionError {
                        name: name.clone(),
                        message,
                    })
            }
        }
    }
}

/// Compiled expressions keyed by their text, with the most recently used one
/// selected for re-evaluation.
pub struct Evaluator {
    cache: LruCache<String, EvaluatorNode>,
    current: Option<String>,
}

impl Evaluator {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
            current: None,
        }
    }

    /// Selects the compiled form of `expression` if it is cached.
    pub fn select(&mut self, expression: &str) -> bool {
        if !self.cache.contains(expression) {
            return false;
        }
        trace!("reusing compiled expression: {expression}");
        self.cache.promote(expression);
        if self.current.as_deref() != Some(expression) {
            self.current = Some(expression.to_owned());
        }
        true
    }

    /// Caches `node` as the compiled form of `expression` and selects it.
    pub fn insert(&mut self, expression: &str, node: EvaluatorNode) {
        self.cache.put(expression.to_owned(), node);
        self.current = Some(expression.to_owned());
    }

    pub fn is_available(&self) -> bool {
        self.current.is_some()
    }

    /// Evaluates the selected expression.
    pub fn evaluate(&mut self, memory: &[f64]) -> Result<f64> {
        let expression = self
            .current
            .as_ref()
            .ok_or(ExevalatorError::ReevalNotAvailable)?;
        let node = self
            .cache
            .get_mut(expression)
            .ok_or_else(|| ExevalatorError::Unexpected {
                message: format!("compiled form of '{expression}' is missing"),
            })?;
        node.evaluate(memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn literal(value: f64) -> Box<EvaluatorNode> {
        Box::new(EvaluatorNode::NumberLiteral(value))
    }

    #[test]
    fn test_arithmetic_nodes() {
        let memory = [2.5, -4.0];
        let mut node = EvaluatorNode::Subtraction(
            Box::new(EvaluatorNode::Multiplication(
                Box::new(EvaluatorNode::Variable(0)),
                literal(3.0),
            )),
            Box::new(EvaluatorNode::Minus(Box::new(EvaluatorNode::Variable(1)))),
        );
        assert_eq!(node.evaluate(&memory).unwrap(), 2.5 * 3.0 - 4.0);
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        let mut infinite = EvaluatorNode::Division(literal(1.0), literal(0.0));
        assert_eq!(infinite.evaluate(&[]).unwrap(), f64::INFINITY);
        let mut nan = EvaluatorNode::Division(literal(0.0), literal(0.0));
        assert!(nan.evaluate(&[]).unwrap().is_nan());
    }

    #[test]
    fn test_variable_outside_memory() {
        let mut node = EvaluatorNode::Variable(3);
        assert_eq!(
            node.evaluate(&[1.0]),
            Err(ExevalatorError::InvalidMemoryAddress { address: 3 })
        );
    }

    #[test]
    fn test_function_call_reuses_buffer_and_wraps_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let function: FunctionHandle = Arc::new(move |arguments: &[f64]| -> std::result::Result<f64, String> {
            counter.fetch_add(1, Ordering::SeqCst);
            match arguments {
                [a, b] => Ok(a + b),
                _ => Err("Incorrect number of args".to_string()),
            }
        });

        let mut sum = EvaluatorNode::FunctionCall(FunctionCallNode::new(
            Arc::clone(&function),
            "fun".to_string(),
            vec![EvaluatorNode::NumberLiteral(1.25), EvaluatorNode::Variable(0)],
        ));
        assert_eq!(sum.evaluate(&[2.5]).unwrap(), 3.75);
        assert_eq!(sum.evaluate(&[0.5]).unwrap(), 1.75);

        let mut unary = EvaluatorNode::FunctionCall(FunctionCallNode::new(
            function,
            "fun".to_string(),
            vec![EvaluatorNode::NumberLiteral(1.0)],
        ));
        assert_eq!(
            unary.evaluate(&[]),
            Err(ExevalatorError::FunctionError {
                name: "fun".to_string(),
                message: "Incorrect number of args".to_string(),
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_cache_selects_and_evicts() {
        let mut evaluator = Evaluator::new(NonZeroUsize::new(2).unwrap());
        assert!(!evaluator.is_available());
        assert_eq!(evaluator.evaluate(&[]), Err(ExevalatorError::ReevalNotAvailable));

        evaluator.insert("1", EvaluatorNode::NumberLiteral(1.0));
        evaluator.insert("2", EvaluatorNode::NumberLiteral(2.0));
        assert_eq!(evaluator.evaluate(&[]).unwrap(), 2.0);

        assert!(evaluator.select("1"));
        assert_eq!(evaluator.evaluate(&[]).unwrap(), 1.0);

        // "2" is now the least recently used
        evaluator.insert("3", EvaluatorNode::NumberLiteral(3.0));
        assert!(!evaluator.select("2"));
        assert_eq!(evaluator.evaluate(&[]).unwrap(), 3.0);
        assert!(evaluator.select("1"));
    }
}
