use crate::ast::{
    Compiler, Evaluator, EvaluatorNode, Function, FunctionHandle, LexicalAnalyzer, Parser,
};
use crate::error::{ExevalatorError, Result};
use crate::memory::Memory;
use crate::messages::ErrorMessages;
use crate::settings::Settings;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// An expression evaluator holding variables and connected functions.
///
/// Evaluating the same expression text again reuses its compiled form, so the
/// typical loop is to write variables and call [`Exevalator::eval`] (or
/// [`Exevalator::reeval`]) repeatedly.
///
/// # Examples
///
/// ```
/// use exevalator_rs::Exevalator;
///
/// let mut exevalator = Exevalator::new();
/// let x = exevalator.declare_variable("x").unwrap();
/// exevalator.write_variable_at(x, 1.5).unwrap();
/// assert_eq!(exevalator.eval("x * 2 + 1").unwrap(), 4.0);
/// ```
pub struct Exevalator {
    settings: Settings,
    messages: ErrorMessages,
    memory: Memory,
    variables: HashMap<String, usize>,
    functions: HashMap<String, FunctionHandle>,
    evaluator: Evaluator,
}

impl Exevalator {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_config(settings, ErrorMessages::default())
    }

    pub fn with_config(settings: Settings, messages: ErrorMessages) -> Self {
        Self {
            settings,
            messages,
            memory: Memory::with_capacity(settings.initial_memory_capacity),
            variables: HashMap::new(),
            functions: HashMap::new(),
            evaluator: Evaluator::new(settings.cache_capacity),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Evaluates `expression`, compiling it unless its compiled form is cached.
    ///
    /// On failure the previously evaluated expression stays available to [`Exevalator::reeval`].
    pub fn eval(&mut self, expression: &str) -> Result<f64> {
        if expression.chars().count() > self.settings.max_expression_char_count {
            return Err(ExevalatorError::ExpressionTooLong {
                limit: self.settings.max_expression_char_count,
            });
        }
        if !self.evaluator.select(expression) {
            let node = self.compile(expression)?;
            self.evaluator.insert(expression, node);
        }
        self.evaluator.evaluate(self.memory.as_slice())
    }

    /// Evaluates the last evaluated expression again, without parsing it.
    pub fn reeval(&mut self) -> Result<f64> {
        if !self.evaluator.is_available() {
            return Err(ExevalatorError::ReevalNotAvailable);
        }
        self.evaluator.evaluate(self.memory.as_slice())
    }

    fn compile(&self, expression: &str) -> Result<EvaluatorNode> {
        debug!("compiling expression: {expression}");
        let tokens = LexicalAnalyzer::new(self.settings.max_token_count).analyze(expression)?;
        debug!(
            "tokens: {:?}",
            tokens.iter().map(|token| token.lexeme.as_str()).collect::<Vec<_>>()
        );
        let ast = Parser::new(self.settings.max_ast_depth).parse(&tokens)?;
        Compiler::new(&self.variables, &self.functions).compile(&ast)
    }

    /// Declares a variable initialized to 0.0, returning its address.
    pub fn declare_variable(&mut self, name: &str) -> Result<usize> {
        if name.chars().count() > self.settings.max_name_char_count {
            return Err(ExevalatorError::VariableNameTooLong {
                limit: self.settings.max_name_char_count,
            });
        }
        if self.variables.contains_key(name) {
            return Err(ExevalatorError::VariableAlreadyDeclared {
                name: name.to_string(),
            });
        }
        let address = self.memory.allocate();
        self.variables.insert(name.to_string(), address);
        debug!("declared variable '{name}' at address {address}");
        Ok(address)
    }

    fn address_of(&self, name: &str) -> Result<usize> {
        if name.chars().count() > self.settings.max_name_char_count {
            return Err(ExevalatorError::VariableNotFound {
                name: name.to_string(),
            });
        }
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| ExevalatorError::VariableNotFound {
                name: name.to_string(),
            })
    }

    pub fn write_variable(&mut self, name: &str, value: f64) -> Result<()> {
        let address = self.address_of(name)?;
        self.write_variable_at(address, value)
    }

    /// Writes a variable by its address, skipping the name lookup.
    pub fn write_variable_at(&mut self, address: usize, value: f64) -> Result<()> {
        self.memory.write(address, value)
    }

    pub fn read_variable(&self, name: &str) -> Result<f64> {
        self.read_variable_at(self.address_of(name)?)
    }

    pub fn read_variable_at(&self, address: usize) -> Result<f64> {
        self.memory.read(address)
    }

    /// Connects a function callable from expressions as `name(...)`.
    pub fn connect_function<F>(&mut self, name: &str, function: F) -> Result<()>
    where
        F: Function + 'static,
    {
        self.connect_function_handle(name, Arc::new(function))
    }

    /// Connects a function the caller already shares, e.g. across per-thread engines.
    pub fn connect_function_handle(&mut self, name: &str, handle: FunctionHandle) -> Result<()> {
        if name.chars().count() > self.settings.max_name_char_count {
            return Err(ExevalatorError::FunctionNameTooLong {
                limit: self.settings.max_name_char_count,
            });
        }
        if self.functions.contains_key(name) {
            return Err(ExevalatorError::FunctionAlreadyConnected {
                name: name.to_string(),
            });
        }
        self.functions.insert(name.to_string(), handle);
        debug!("connected function '{name}'");
        Ok(())
    }

    /// Renders `error` with the message table of this instance.
    pub fn error_message(&self, error: &ExevalatorError) -> String {
        self.messages.render(error)
    }
}

impl Default for Exevalator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::num::NonZeroUsize;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-12 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual: {actual}, expected: {expected}"
        );
    }

    fn check(expression: &str, expected: f64) {
        let mut exevalator = Exevalator::new();
        match exevalator.eval(expression) {
            Ok(actual) => assert_close(actual, expected),
            Err(error) => panic!("'{expression}' failed: {error}"),
        }
    }

    fn kind_of(exevalator: &mut Exevalator, expression: &str) -> ErrorKind {
        match exevalator.eval(expression) {
            Ok(value) => panic!("'{expression}' unexpectedly evaluated to {value}"),
            Err(error) => error.kind(),
        }
    }

    fn fails_with(expression: &str, kind: ErrorKind) {
        assert_eq!(kind_of(&mut Exevalator::new(), expression), kind, "{expression}");
    }

    fn sum2(arguments: &[f64]) -> std::result::Result<f64, String> {
        match arguments {
            [a, b] => Ok(a + b),
            _ => Err("Incorrect number of args".to_string()),
        }
    }

    #[test]
    fn test_number_literals() {
        check("1", 1.0);
        check("2", 2.0);
        check("1.2", 1.2);
        check("1.2E3", 1.2E3);
        check("1.2E+3", 1.2E3);
        check("1.2E-3", 1.2E-3);
        check("123.4567E12", 123.4567E12);
        check("123.4567E+12", 123.4567E+12);
        check("123.4567E-12", 123.4567E-12);
    }

    #[test]
    fn test_operations_of_operators() {
        check("1.2 + 3.4", 1.2 + 3.4);
        check("1.2 - 3.4", 1.2 - 3.4);
        check("1.2 * 3.4", 1.2 * 3.4);
        check("1.2 / 3.4", 1.2 / 3.4);
        check("-1.2", -1.2);
    }

    #[test]
    fn test_precedences_of_operators() {
        check("1.2 + 3.4 + 5.6 + 7.8", 1.2 + 3.4 + 5.6 + 7.8);
        check("1.2 + 3.4 - 5.6 + 7.8", 1.2 + 3.4 - 5.6 + 7.8);
        check("1.2 + 3.4 * 5.6 + 7.8", 1.2 + 3.4 * 5.6 + 7.8);
        check("1.2 + 3.4 / 5.6 + 7.8", 1.2 + 3.4 / 5.6 + 7.8);
        check("1.2 * 3.4 + 5.6 + 7.8", 1.2 * 3.4 + 5.6 + 7.8);
        check("1.2 * 3.4 - 5.6 + 7.8", 1.2 * 3.4 - 5.6 + 7.8);
        check("1.2 * 3.4 * 5.6 + 7.8", 1.2 * 3.4 * 5.6 + 7.8);
        check("1.2 * 3.4 / 5.6 + 7.8", 1.2 * 3.4 / 5.6 + 7.8);
        check("1.2 + 3.4 + 5.6 * 7.8", 1.2 + 3.4 + 5.6 * 7.8);
        check("1.2 + 3.4 - 5.6 * 7.8", 1.2 + 3.4 - 5.6 * 7.8);
        check("1.2 + 3.4 * 5.6 * 7.8", 1.2 + 3.4 * 5.6 * 7.8);
        check("1.2 + 3.4 / 5.6 * 7.8", 1.2 + 3.4 / 5.6 * 7.8);
        check("-1.2 + 3.4 / 5.6 * 7.8", -1.2 + 3.4 / 5.6 * 7.8);
        check("1.2 + 3.4 / -5.6 * 7.8", 1.2 + 3.4 / -5.6 * 7.8);
        check("1.2 + 3.4 / 5.6 * -7.8", 1.2 + 3.4 / 5.6 * -7.8);
    }

    #[test]
    fn test_unary_minus_chains() {
        let mut exevalator = Exevalator::new();
        assert_eq!(exevalator.eval("1.2 + 3.4 * 5.6").unwrap(), 1.2 + 3.4 * 5.6);
        assert_eq!(exevalator.eval("1.2*--3.4").unwrap(), 1.2 * 3.4);
        assert_eq!(
            exevalator.eval("1.2-----3.4-5.6").unwrap(),
            1.2 - 3.4 - 5.6
        );
        assert_eq!(exevalator.eval("---1").unwrap(), -1.0);
    }

    #[test]
    fn test_parentheses() {
        check("(1.2 + 3.4)", 1.2 + 3.4);
        check("(1.2 + 3.4) + 5.6", (1.2 + 3.4) + 5.6);
        check("1.2 + (3.4 + 5.6)", 1.2 + (3.4 + 5.6));
        check("1.2 + -(3.4 + 5.6)", 1.2 + -(3.4 + 5.6));
        check("1.2 + -(-3.4 + 5.6)", 1.2 + -(-3.4 + 5.6));
        check("(1.2 * 3.4) + 5.6", (1.2 * 3.4) + 5.6);
        check("(1.2 + 3.4) * 5.6", (1.2 + 3.4) * 5.6);
        check("1.2 + (3.4 * 5.6)", 1.2 + (3.4 * 5.6));
        check("1.2 + (3.4 * 5.6) + 7.8", 1.2 + (3.4 * 5.6) + 7.8);
        check("1.2 * (3.4 + 5.6) / 7.8", 1.2 * (3.4 + 5.6) / 7.8);
        check(
            "(1.2 + 3.4 - 5.6) * ((7.8 + 9.0) / 10.1)",
            (1.2 + 3.4 - 5.6) * ((7.8 + 9.0) / 10.1),
        );
        check(
            "(-(1.2 + 3.4 - 5.6) * ((7.8 + 9.0) / 10.1) / 11.2 + 12.3 * ((13.4 + -(15.6 - 17.8)) * 18.9)) + 19.0 * 20.1",
            (-(1.2 + 3.4 - 5.6) * ((7.8 + 9.0) / 10.1) / 11.2
                + 12.3 * ((13.4 + -(15.6 - 17.8)) * 18.9))
                + 19.0 * 20.1,
        );
        assert_close(
            Exevalator::new().eval("(-(1.2 + 3.4) * 5) / 2").unwrap(),
            -11.5,
        );
    }

    #[test]
    fn test_literals_with_exponents_in_parentheses() {
        check(
            "(-(1.2E1 + 3.4E-2 - 5.6E2) * ((7.8E0 + 9.0) / 10.1E-3) / 11.2 + 12.3E-1 * ((13.4 + -(15.6E-12 - 17.8E-10)) * 18.9E-5)) + 19.0E-2 * 20.1E0",
            (-(1.2E1 + 3.4E-2 - 5.6E2) * ((7.8E0 + 9.0) / 10.1E-3) / 11.2
                + 12.3E-1 * ((13.4 + -(15.6E-12 - 17.8E-10)) * 18.9E-5))
                + 19.0E-2 * 20.1E0,
        );
    }

    #[test]
    fn test_correspondence_of_parentheses() {
        check("(1 + 2)", 1.0 + 2.0);
        check("(1 + 2) + (3 + 4)", (1.0 + 2.0) + (3.0 + 4.0));
        check("1 + ((2 + (3 + 4) + 5) + 6)", 1.0 + ((2.0 + (3.0 + 4.0) + 5.0) + 6.0));

        fails_with("((1 + 2)", ErrorKind::DeficientClosedParenthesis);
        fails_with("(1 + 2))", ErrorKind::DeficientOpenParenthesis);
        fails_with("1 + 2) + (3 + 4", ErrorKind::DeficientOpenParenthesis);
        fails_with("1 + ((2 + (3 + 4) + 5) + 6", ErrorKind::DeficientClosedParenthesis);
        fails_with("1 + (2 + (3 + 4) + 5) + 6)", ErrorKind::DeficientOpenParenthesis);

        fails_with("()", ErrorKind::EmptyParenthesis);
        fails_with("1 + ()", ErrorKind::EmptyParenthesis);
        fails_with("() + 1", ErrorKind::EmptyParenthesis);
    }

    #[test]
    fn test_locations_of_operators_and_leafs() {
        check("1 + -123", 1.0 + -123.0);
        check("123 + 456", 123.0 + 456.0);

        fails_with("1 + -", ErrorKind::RightOperandRequired);
        fails_with("(1 + -)", ErrorKind::RightOperandRequired);
        fails_with("123 *", ErrorKind::RightOperandRequired);
        fails_with("* 456", ErrorKind::UnknownUnaryPrefixOperator);
        fails_with("123 + ( * 456)", ErrorKind::UnknownUnaryPrefixOperator);
        fails_with("(123 *) + 456", ErrorKind::RightOperandRequired);
        fails_with("123 456", ErrorKind::RightOperatorRequired);
        fails_with("(1)(2)", ErrorKind::UnexpectedPartialExpression);
    }

    #[test]
    fn test_empty_expressions() {
        for expression in ["", " ", "  ", "   ", "\t\n"] {
            fails_with(expression, ErrorKind::EmptyExpression);
        }
    }

    #[test]
    fn test_variables() {
        let mut exevalator = Exevalator::new();
        assert_eq!(kind_of(&mut exevalator, "x"), ErrorKind::VariableNotFound);

        let x = exevalator.declare_variable("x").unwrap();
        assert_eq!(exevalator.eval("x").unwrap(), 0.0);
        exevalator.write_variable("x", 1.25).unwrap();
        assert_eq!(exevalator.eval("x").unwrap(), 1.25);
        exevalator.write_variable_at(x, 2.5).unwrap();
        assert_eq!(exevalator.eval("x").unwrap(), 2.5);

        assert_eq!(
            exevalator.write_variable_at(100, 5.0),
            Err(ExevalatorError::InvalidMemoryAddress { address: 100 })
        );

        assert_eq!(kind_of(&mut exevalator, "y"), ErrorKind::VariableNotFound);
        let y = exevalator.declare_variable("y").unwrap();
        assert_eq!(exevalator.eval("y").unwrap(), 0.0);
        exevalator.write_variable("y", 0.25).unwrap();
        assert_eq!(exevalator.eval("y").unwrap(), 0.25);
        exevalator.write_variable_at(y, 0.5).unwrap();
        assert_eq!(exevalator.eval("y").unwrap(), 0.5);
        assert_eq!(exevalator.eval("x + y").unwrap(), 2.5 + 0.5);

        exevalator.declare_variable("x2").unwrap();
        exevalator.declare_variable("y2").unwrap();
        exevalator.write_variable("x2", 22.5).unwrap();
        exevalator.write_variable("y2", 32.5).unwrap();
        assert_eq!(
            exevalator.eval("x + y + 2 + x2 + 2 * y2").unwrap(),
            2.5 + 0.5 + 2.0 + 22.5 + 2.0 * 32.5
        );
    }

    #[test]
    fn test_variable_round_trip_is_bit_exact() {
        let mut exevalator = Exevalator::new();
        exevalator.declare_variable("x").unwrap();
        for value in [0.1, -0.0, f64::MIN_POSITIVE, f64::MAX, f64::INFINITY, 1.0 / 3.0] {
            exevalator.write_variable("x", value).unwrap();
            assert_eq!(
                exevalator.read_variable("x").unwrap().to_bits(),
                value.to_bits()
            );
        }
        exevalator.write_variable("x", f64::NAN).unwrap();
        assert!(exevalator.read_variable("x").unwrap().is_nan());
    }

    #[test]
    fn test_variable_declaration_errors() {
        let mut exevalator =
            Exevalator::with_settings(Settings::default().with_max_name_char_count(4));
        exevalator.declare_variable("abcd").unwrap();
        assert_eq!(
            exevalator.declare_variable("abcd"),
            Err(ExevalatorError::VariableAlreadyDeclared {
                name: "abcd".to_string()
            })
        );
        assert_eq!(
            exevalator.declare_variable("abcde"),
            Err(ExevalatorError::VariableNameTooLong { limit: 4 })
        );
        assert_eq!(
            exevalator.read_variable("abcde"),
            Err(ExevalatorError::VariableNotFound {
                name: "abcde".to_string()
            })
        );
        assert_eq!(
            exevalator.write_variable("zz", 1.0),
            Err(ExevalatorError::VariableNotFound {
                name: "zz".to_string()
            })
        );
        assert_eq!(
            exevalator.read_variable_at(1),
            Err(ExevalatorError::InvalidMemoryAddress { address: 1 })
        );
    }

    #[test]
    fn test_storage_growth_keeps_addresses_and_values() {
        let mut exevalator =
            Exevalator::with_settings(Settings::default().with_initial_memory_capacity(2));
        let mut addresses = Vec::new();
        for i in 0..10 {
            let address = exevalator.declare_variable(&format!("v{i}")).unwrap();
            exevalator.write_variable_at(address, i as f64 * 1.5).unwrap();
            addresses.push(address);
        }
        assert_eq!(addresses, (0..10).collect::<Vec<usize>>());
        for (i, address) in addresses.iter().enumerate() {
            assert_eq!(exevalator.read_variable_at(*address).unwrap(), i as f64 * 1.5);
        }
        assert_eq!(exevalator.eval("v0 + v9").unwrap(), 9.0 * 1.5);
    }

    #[test]
    fn test_functions() {
        let mut exevalator = Exevalator::new();
        assert_eq!(kind_of(&mut exevalator, "funA()"), ErrorKind::FunctionNotFound);

        exevalator
            .connect_function("funA", |arguments: &[f64]| {
                if arguments.is_empty() {
                    Ok(1.25)
                } else {
                    Err("Incorrect number of args".to_string())
                }
            })
            .unwrap();
        assert_eq!(exevalator.eval("funA()").unwrap(), 1.25);

        assert_eq!(kind_of(&mut exevalator, "funB(2.5)"), ErrorKind::FunctionNotFound);
        exevalator
            .connect_function("funB", |arguments: &[f64]| match arguments {
                [value] => Ok(*value),
                _ => Err("Incorrect number of args".to_string()),
            })
            .unwrap();
        assert_eq!(exevalator.eval("funB(2.5)").unwrap(), 2.5);

        exevalator.connect_function("funC", sum2).unwrap();
        check_with(&mut exevalator, "funC(1.25, 2.5)", 1.25 + 2.5);
        check_with(&mut exevalator, "funC(funA(), funB(2.5))", 1.25 + 2.5);
        check_with(
            &mut exevalator,
            "funC(funC(funA(), funB(2.5)), funB(1.0))",
            1.25 + 2.5 + 1.0,
        );
        check_with(&mut exevalator, "funC(1.0, 3.5 * funB(2.5) / 2.0)", 1.0 + 3.5 * 2.5 / 2.0);
        check_with(
            &mut exevalator,
            "funA() * funC(funC(funA(), 3.5 * funB(2.5) / 2.0), funB(1.0))",
            1.25 * (1.25 + 3.5 * 2.5 / 2.0 + 1.0),
        );
        check_with(
            &mut exevalator,
            "2 + 256 * funA() * funC(funC(funA(), 3.5 * funB(2.5) / 2.0), funB(1.0)) * 128",
            2.0 + 256.0 * (1.25 * (1.25 + 3.5 * 2.5 / 2.0 + 1.0)) * 128.0,
        );
        check_with(&mut exevalator, "-funB(2.5) * 2", -2.5 * 2.0);
    }

    fn check_with(exevalator: &mut Exevalator, expression: &str, expected: f64) {
        match exevalator.eval(expression) {
            Ok(actual) => assert_close(actual, expected),
            Err(error) => panic!("'{expression}' failed: {error}"),
        }
    }

    #[test]
    fn test_function_errors_are_wrapped() {
        let mut exevalator = Exevalator::new();
        exevalator.connect_function("fun", sum2).unwrap();
        assert_close(exevalator.eval("fun(1.2, 3.4)").unwrap(), 4.6);
        assert_eq!(
            exevalator.eval("fun(1.2)"),
            Err(ExevalatorError::FunctionError {
                name: "fun".to_string(),
                message: "Incorrect number of args".to_string(),
            })
        );
        assert_eq!(
            exevalator.connect_function("fun", sum2),
            Err(ExevalatorError::FunctionAlreadyConnected {
                name: "fun".to_string()
            })
        );
        let long_name = "f".repeat(65);
        assert_eq!(
            exevalator.connect_function(&long_name, sum2),
            Err(ExevalatorError::FunctionNameTooLong { limit: 64 })
        );
    }

    #[test]
    fn test_one_function_handle_shared_by_two_engines() {
        let handle: FunctionHandle = Arc::new(sum2);
        let mut first = Exevalator::new();
        let mut second = Exevalator::new();
        first.connect_function_handle("sum", handle.clone()).unwrap();
        second.connect_function_handle("plus", handle.clone()).unwrap();
        assert_eq!(Arc::strong_count(&handle), 3);

        assert_eq!(first.eval("sum(1, 2)").unwrap(), 3.0);
        assert_eq!(second.eval("plus(2, 2) * 2").unwrap(), 8.0);
        assert_eq!(
            first.connect_function_handle("sum", handle.clone()),
            Err(ExevalatorError::FunctionAlreadyConnected {
                name: "sum".to_string()
            })
        );
        assert_eq!(Arc::strong_count(&handle), 3);
    }

    #[test]
    fn test_zero_argument_call_is_not_empty_parentheses() {
        let mut exevalator = Exevalator::new();
        exevalator
            .connect_function("f", |_: &[f64]| -> std::result::Result<f64, String> { Ok(7.0) })
            .unwrap();
        assert_eq!(exevalator.eval("f()").unwrap(), 7.0);
        assert_eq!(exevalator.eval("(f())").unwrap(), 7.0);
    }

    #[test]
    fn test_reeval() {
        let mut exevalator = Exevalator::new();
        assert_eq!(exevalator.reeval(), Err(ExevalatorError::ReevalNotAvailable));
        assert_eq!(kind_of(&mut exevalator, "1 +"), ErrorKind::RightOperandRequired);
        assert_eq!(exevalator.reeval(), Err(ExevalatorError::ReevalNotAvailable));

        let x = exevalator.declare_variable("x").unwrap();
        exevalator.write_variable_at(x, 2.0).unwrap();
        assert_eq!(exevalator.eval("x * x").unwrap(), 4.0);
        exevalator.write_variable_at(x, 3.0).unwrap();
        assert_eq!(exevalator.reeval().unwrap(), 9.0);
    }

    #[test]
    fn test_failed_eval_keeps_previous_expression() {
        let mut exevalator = Exevalator::new();
        let x = exevalator.declare_variable("x").unwrap();
        exevalator.write_variable_at(x, 1.5).unwrap();
        assert_eq!(exevalator.eval("x + 1").unwrap(), 2.5);

        assert_eq!(kind_of(&mut exevalator, "x + y"), ErrorKind::VariableNotFound);
        assert_eq!(kind_of(&mut exevalator, "(x"), ErrorKind::DeficientClosedParenthesis);
        assert_eq!(exevalator.read_variable("x").unwrap(), 1.5);
        assert_eq!(exevalator.reeval().unwrap(), 2.5);
    }

    #[test]
    fn test_cached_expression_survives_new_declarations() {
        let mut exevalator = Exevalator::new();
        let x = exevalator.declare_variable("x").unwrap();
        assert_eq!(exevalator.eval("x + 1").unwrap(), 1.0);
        exevalator.declare_variable("y").unwrap();
        exevalator.write_variable_at(x, 1.0).unwrap();
        assert_eq!(exevalator.eval(&String::from("x + 1")).unwrap(), 2.0);
    }

    #[test]
    fn test_larger_cache_keeps_several_expressions() {
        let settings = Settings::default().with_cache_capacity(NonZeroUsize::new(4).unwrap());
        let mut exevalator = Exevalator::with_settings(settings);
        let x = exevalator.declare_variable("x").unwrap();
        for value in [1.0, 2.0, 3.0] {
            exevalator.write_variable_at(x, value).unwrap();
            assert_eq!(exevalator.eval("x * 2").unwrap(), value * 2.0);
            assert_eq!(exevalator.eval("x + 2").unwrap(), value + 2.0);
            assert_eq!(exevalator.reeval().unwrap(), value + 2.0);
        }
    }

    #[test]
    fn test_eval_is_deterministic_for_random_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut exevalator = Exevalator::new();
        let x = exevalator.declare_variable("x").unwrap();
        let y = exevalator.declare_variable("y").unwrap();
        exevalator.connect_function("fun", sum2).unwrap();
        let expression = "x * (y - 1.5) / -fun(x, 2) + y";

        for _ in 0..200 {
            let (vx, vy) = (rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
            exevalator.write_variable_at(x, vx).unwrap();
            exevalator.write_variable_at(y, vy).unwrap();

            let expected = vx * (vy - 1.5) / -(vx + 2.0) + vy;
            let first = exevalator.eval(expression).unwrap();
            let second = exevalator.eval(&expression.to_string()).unwrap();
            let again = exevalator.reeval().unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
            assert_eq!(first.to_bits(), again.to_bits());
            assert_eq!(first.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let mut exevalator = Exevalator::new();
        assert_eq!(exevalator.eval("1 / 0").unwrap(), f64::INFINITY);
        assert_eq!(exevalator.eval("-1 / 0").unwrap(), f64::NEG_INFINITY);
        assert!(exevalator.eval("0 / 0").unwrap().is_nan());
    }

    #[test]
    fn test_ceilings() {
        let settings = Settings::default()
            .with_max_expression_char_count(10)
            .with_max_token_count(5);
        let mut exevalator = Exevalator::with_settings(settings);
        assert_eq!(
            exevalator.eval("1 + 2 + 3 + 4"),
            Err(ExevalatorError::ExpressionTooLong { limit: 10 })
        );
        assert_eq!(
            exevalator.eval("1+2+3+4"),
            Err(ExevalatorError::TooManyTokens { limit: 5 })
        );
        assert_eq!(exevalator.eval("1+2+3").unwrap(), 6.0);
    }

    #[test]
    fn test_ast_depth_ceiling() {
        // "-(-(...(1)))" with n minuses has depth n + 1
        let nested = |n: usize| format!("{}1{}", "-(".repeat(n), ")".repeat(n));
        let mut exevalator = Exevalator::with_settings(
            Settings::default()
                .with_max_ast_depth(8)
                .with_max_expression_char_count(1024)
                .with_max_token_count(1024),
        );
        assert_eq!(exevalator.eval(&nested(7)).unwrap(), -1.0);
        assert_eq!(
            exevalator.eval(&nested(8)),
            Err(ExevalatorError::AstDepthExceeded { limit: 8 })
        );
    }

    #[test]
    fn test_localized_error_messages() {
        let mut exevalator =
            Exevalator::with_config(Settings::default(), ErrorMessages::japanese());
        let error = exevalator.eval("1 +").unwrap_err();
        assert_eq!(
            exevalator.error_message(&error),
            "'+' の右に、演算対象の値や変数が必要です。"
        );
        assert_eq!(
            Exevalator::new().error_message(&error),
            "An operand is required at the right of: '+'"
        );
    }
}
