use crate::ast::{AstNode, EvaluatorNode, FunctionCallNode, FunctionHandle, OperatorClass, TokenKind};
use crate::error::{ExevalatorError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Turns an AST into evaluator nodes, resolving variables to addresses and
/// functions to handles.
pub struct Compiler<'a> {
    variables: &'a HashMap<String, usize>,
    functions: &'a HashMap<String, FunctionHandle>,
}

impl<'a> Compiler<'a> {
    pub fn new(
        variables: &'a HashMap<String, usize>,
        functions: &'a HashMap<String, FunctionHandle>,
    ) -> Self {
        Self {
            variables,
            functions,
        }
    }

    pub fn compile(&self, node: &AstNode) -> Result<EvaluatorNode> {
        let token = &node.token;
        match token.kind {
            TokenKind::NumberLiteral => token
                .lexeme
                .parse::<f64>()
                .map(EvaluatorNode::NumberLiteral)
                .map_err(|_| ExevalatorError::InvalidNumberLiteral {
                    literal: token.lexeme.clone(),
                }),

            TokenKind::VariableIdentifier => self
                .variables
                .get(&token.lexeme)
                .map(|address| EvaluatorNode::Variable(*address))
                .ok_or_else(|| ExevalatorError::VariableNotFound {
                    name: token.lexeme.clone(),
                }),

            TokenKind::Operator => self.compile_operator(node),

            // function identifiers are read by their call node
            TokenKind::FunctionIdentifier | TokenKind::Parenthesis => {
                Err(ExevalatorError::UnexpectedToken {
                    token: token.lexeme.clone(),
                })
            }
        }
    }

    fn compile_operator(&self, node: &AstNode) -> Result<EvaluatorNode> {
        let unexpected = || ExevalatorError::UnexpectedOperator {
            symbol: node.token.lexeme.clone(),
        };
        let operator = node.token.operator.ok_or_else(unexpected)?;
        let operand = |child: &AstNode| self.compile(child).map(Box::new);

        let compiled = match (operator.class, operator.symbol, node.children.as_slice()) {
            (OperatorClass::UnaryPrefix, '-', [child]) => EvaluatorNode::Minus(operand(child)?),
            (OperatorClass::Binary, '+', [left, right]) => {
                EvaluatorNode::Addition(operand(left)?, operand(right)?)
            }
            (OperatorClass::Binary, '-', [left, right]) => {
                EvaluatorNode::Subtraction(operand(left)?, operand(right)?)
            }
            (OperatorClass::Binary, '*', [left, right]) => {
                EvaluatorNode::Multiplication(operand(left)?, operand(right)?)
            }
            (OperatorClass::Binary, '/', [left, right]) => {
                EvaluatorNode::Division(operand(left)?, operand(right)?)
            }
            (OperatorClass::Call, '(', [identifier, arguments @ ..])
                if identifier.token.kind == TokenKind::FunctionIdentifier =>
            {
                let name = &identifier.token.lexeme;
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| ExevalatorError::FunctionNotFound { name: name.clone() })?;
                let arguments = arguments
                    .iter()
                    .map(|argument| self.compile(argument))
                    .collect::<Result<Vec<_>>>()?;
                EvaluatorNode::FunctionCall(FunctionCallNode::new(
                    Arc::clone(function),
                    name.clone(),
                    arguments,
                ))
            }
            _ => return Err(unexpected()),
        };
        Ok(compiled)
    }
}
