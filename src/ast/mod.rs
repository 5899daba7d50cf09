use crate::error::{ExevalatorError, Result};
use std::fmt;

mod compiler;
mod evaluator;
mod function;
mod lexer;
mod parser;
mod token;

pub use compiler::Compiler;
pub use evaluator::{Evaluator, EvaluatorNode, FunctionCallNode};
pub use function::{Function, FunctionHandle};
pub use lexer::LexicalAnalyzer;
pub use parser::Parser;
pub use token::{Associativity, Operator, OperatorClass, Token, TokenKind, LEAST_PRIOR};

const AST_INDENT: &str = "  ";

/// A node of the AST. For a function call the first child is the function identifier
/// and the remaining children are the arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub token: Token,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }

    /// The depth of the tree under this node, where this node has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    pub fn check_depth(&self, max_depth: usize) -> Result<()> {
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            if depth > max_depth {
                return Err(ExevalatorError::AstDepthExceeded { limit: max_depth });
            }
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        Ok(())
    }

    fn write_markup(&self, f: &mut fmt::Formatter<'_>, indent_stage: usize) -> fmt::Result {
        let indent = AST_INDENT.repeat(indent_stage);
        let tag = self.token.kind.name();
        write!(f, "{indent}<{tag} word=\"{}\"", self.token.lexeme)?;
        if let Some(operator) = self.token.operator {
            write!(
                f,
                " optype=\"{}\" precedence=\"{}\"",
                operator.class.name(),
                operator.precedence
            )?;
        }
        if self.children.is_empty() {
            return f.write_str(" />");
        }
        f.write_str(">")?;
        for child in &self.children {
            f.write_str("\n")?;
            child.write_markup(f, indent_stage + 1)?;
        }
        write!(f, "\n{indent}</{tag}>")
    }
}

/// XML-like markup of the tree, one element per node.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_markup(f, 0)
    }
}
