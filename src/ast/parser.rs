use crate::ast::token::{Operator, OperatorClass, Token, TokenKind, LEAST_PRIOR};
use crate::ast::AstNode;
use crate::error::{ExevalatorError, Result};
use log::debug;

/// Markers on the working stack isolating the partial expression that started at them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Lid {
    Parenthesis,
    Separator,
    CallBegin,
}

#[derive(Debug)]
enum StackItem {
    Node(AstNode),
    Lid(Lid),
}

/// Builds an AST from analyzed tokens in a single left-to-right pass.
pub struct Parser {
    max_ast_depth: usize,
}

impl Parser {
    pub fn new(max_ast_depth: usize) -> Self {
        Self { max_ast_depth }
    }

    pub fn parse(&self, tokens: &[Token]) -> Result<AstNode> {
        if tokens.is_empty() {
            return Err(ExevalatorError::EmptyExpression);
        }

        let next_precedences = next_operator_precedences(tokens);
        let mut stack: Vec<StackItem> = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];

            let mut node = match token.kind {
                TokenKind::NumberLiteral
                | TokenKind::VariableIdentifier
                | TokenKind::FunctionIdentifier => {
                    stack.push(StackItem::Node(AstNode::new(token.clone())));
                    index += 1;
                    continue;
                }

                TokenKind::Parenthesis if token.is_open_parenthesis() => {
                    stack.push(StackItem::Lid(Lid::Parenthesis));
                    index += 1;
                    continue;
                }

                TokenKind::Parenthesis => {
                    let mut group = pop_partial_expressions(&mut stack, Lid::Parenthesis)?;
                    match (group.pop(), group.is_empty()) {
                        (Some(inner), true) => inner,
                        _ => return Err(ExevalatorError::UnexpectedPartialExpression),
                    }
                }

                TokenKind::Operator => {
                    let operator = token.operator.ok_or_else(|| ExevalatorError::UnexpectedToken {
                        token: token.lexeme.clone(),
                    })?;
                    let mut node = AstNode::new(token.clone());

                    match operator.class {
                        OperatorClass::UnaryPrefix => {
                            if operator.should_add_right_operand(next_precedences[index]) {
                                node.children.push(lookahead_operand(tokens, index)?);
                                index += 1;
                            }
                            node
                        }

                        OperatorClass::Binary => {
                            let left = pop_node(&mut stack).ok_or_else(|| {
                                ExevalatorError::LeftOperandRequired {
                                    token: token.lexeme.clone(),
                                }
                            })?;
                            node.children.push(left);
                            if operator.should_add_right_operand(next_precedences[index]) {
                                node.children.push(lookahead_operand(tokens, index)?);
                                index += 1;
                            }
                            node
                        }

                        OperatorClass::Call => match operator.symbol {
                            '(' => {
                                match pop_node(&mut stack) {
                                    Some(identifier)
                                        if identifier.token.kind == TokenKind::FunctionIdentifier =>
                                    {
                                        node.children.push(identifier)
                                    }
                                    _ => {
                                        return Err(ExevalatorError::UnexpectedOperator {
                                            symbol: token.lexeme.clone(),
                                        })
                                    }
                                }
                                stack.push(StackItem::Node(node));
                                stack.push(StackItem::Lid(Lid::CallBegin));
                                index += 1;
                                continue;
                            }
                            ')' => {
                                let arguments = pop_partial_expressions(&mut stack, Lid::CallBegin)?;
                                let mut call = pop_node(&mut stack)
                                    .filter(|call| call.token.operator == Some(Operator::CALL_BEGIN))
                                    .ok_or(ExevalatorError::UnexpectedPartialExpression)?;
                                call.children.extend(arguments);
                                call
                            }
                            ',' => {
                                stack.push(StackItem::Lid(Lid::Separator));
                                index += 1;
                                continue;
                            }
                            _ => {
                                return Err(ExevalatorError::UnexpectedOperator {
                                    symbol: token.lexeme.clone(),
                                })
                            }
                        },
                    }
                }
            };

            // Connect operators waiting on the stack for a right operand which binds tighter
            // than the next operator.
            let next_precedence = next_precedences[index];
            while let Some(mut operator_node) = pop_absorbing_operator(&mut stack, next_precedence) {
                operator_node.children.push(node);
                node = operator_node;
            }
            stack.push(StackItem::Node(node));
            index += 1;
        }

        let root = match (stack.pop(), stack.is_empty()) {
            (Some(StackItem::Node(root)), true) => root,
            _ => return Err(ExevalatorError::UnexpectedPartialExpression),
        };
        root.check_depth(self.max_ast_depth)?;
        debug!("constructed AST:\n{root}");
        Ok(root)
    }
}

/// At index i, the precedence of the first operator after token i.
///
/// An open parenthesis counts as the most prior operator and a closed one as the least prior.
fn next_operator_precedences(tokens: &[Token]) -> Vec<u32> {
    let mut precedences = vec![LEAST_PRIOR; tokens.len()];
    let mut last_precedence = LEAST_PRIOR;
    for (index, token) in tokens.iter().enumerate().rev() {
        precedences[index] = last_precedence;
        if let Some(operator) = token.operator {
            last_precedence = operator.precedence;
        }
        if token.kind == TokenKind::Parenthesis {
            last_precedence = if token.is_open_parenthesis() {
                0
            } else {
                LEAST_PRIOR
            };
        }
    }
    precedences
}

fn lookahead_operand(tokens: &[Token], index: usize) -> Result<AstNode> {
    tokens
        .get(index + 1)
        .filter(|token| token.is_leaf())
        .map(|token| AstNode::new(token.clone()))
        .ok_or_else(|| ExevalatorError::RightOperandRequired {
            token: tokens[index].lexeme.clone(),
        })
}

fn pop_node(stack: &mut Vec<StackItem>) -> Option<AstNode> {
    match stack.pop() {
        Some(StackItem::Node(node)) => Some(node),
        Some(lid) => {
            stack.push(lid);
            None
        }
        None => None,
    }
}

/// Pops the operator on the stack top if it still lacks its right operand and
/// binds tighter than an operator of `next_precedence`.
fn pop_absorbing_operator(stack: &mut Vec<StackItem>, next_precedence: u32) -> Option<AstNode> {
    let Some(StackItem::Node(top)) = stack.last() else {
        return None;
    };
    let operator = top.token.operator?;
    let incomplete = operator
        .arity()
        .is_some_and(|arity| top.children.len() < arity);
    if incomplete && operator.should_add_right_operand(next_precedence) {
        pop_node(stack)
    } else {
        None
    }
}

/// Pops the partial expressions above `lid` and returns them in FIFO order.
///
/// Argument separators are consumed when collecting the arguments of a call; each
/// separated slot must hold exactly one expression.
fn pop_partial_expressions(stack: &mut Vec<StackItem>, lid: Lid) -> Result<Vec<AstNode>> {
    let mut expressions = Vec::new();
    let mut in_slot = 0usize;
    loop {
        match stack.pop() {
            Some(StackItem::Node(node)) => {
                expressions.push(node);
                in_slot += 1;
            }
            Some(StackItem::Lid(Lid::Separator)) if lid == Lid::CallBegin && in_slot == 1 => {
                in_slot = 0;
            }
            Some(StackItem::Lid(found)) if found == lid && (in_slot == 1 || expressions.is_empty()) => {
                break
            }
            _ => return Err(ExevalatorError::UnexpectedPartialExpression),
        }
    }
    expressions.reverse();
    Ok(expressions)
}
