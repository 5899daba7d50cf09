use crate::ast::token::{Operator, OperatorClass, Token, TokenKind, SPLITTERS};
use crate::error::{ExevalatorError, Result};
use std::collections::HashSet;

/// Placeholder standing for a number literal while the expression is split into words,
/// so that the sign in an exponent such as "1.2E-3" is never taken as an operator.
const ESCAPED_NUMBER_LITERAL: &str = "@NUMBER_LITERAL@";

/// Splits expressions into tokens and checks the syntax visible from the token stream alone.
pub struct LexicalAnalyzer {
    max_token_count: usize,
}

impl LexicalAnalyzer {
    pub fn new(max_token_count: usize) -> Self {
        Self { max_token_count }
    }

    pub fn analyze(&self, expression: &str) -> Result<Vec<Token>> {
        let (escaped, literals) = escape_number_literals(expression);

        let mut spaced = String::with_capacity(escaped.len() * 2);
        for c in escaped.chars() {
            if SPLITTERS.contains(&c) {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else {
                spaced.push(c);
            }
        }
        let words: Vec<&str> = spaced.split_whitespace().collect();

        if words.is_empty() {
            return Err(ExevalatorError::EmptyExpression);
        }
        if words.len() > self.max_token_count {
            return Err(ExevalatorError::TooManyTokens {
                limit: self.max_token_count,
            });
        }

        let tokens = create_tokens(&words, literals)?;
        check_parenthesis_balance(&tokens)?;
        check_empty_parentheses(&tokens)?;
        check_locations_of_operators_and_leafs(&tokens)?;
        Ok(tokens)
    }
}

/// Replaces every number literal with [`ESCAPED_NUMBER_LITERAL`], returning the literals in order.
///
/// A literal is `[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`, and it is recognized only at the
/// beginning of the expression or right after whitespace or a splitter character.
fn escape_number_literals(expression: &str) -> (String, Vec<String>) {
    let bytes = expression.as_bytes();
    let mut escaped = String::with_capacity(expression.len());
    let mut literals = Vec::new();
    let mut previous: Option<char> = None;
    let mut chars = expression.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let at_boundary = previous.map_or(true, |p| p.is_whitespace() || SPLITTERS.contains(&p));
        if at_boundary && c.is_ascii_digit() {
            let end = scan_number_literal(bytes, start);
            literals.push(expression[start..end].to_string());
            escaped.push_str(ESCAPED_NUMBER_LITERAL);
            while chars.peek().is_some_and(|(index, _)| *index < end) {
                chars.next();
            }
            previous = Some(bytes[end - 1] as char);
            continue;
        }
        escaped.push(c);
        previous = Some(c);
    }
    (escaped, literals)
}

/// Returns the end (exclusive) of the number literal starting at `start`.
fn scan_number_literal(bytes: &[u8], start: usize) -> usize {
    let skip_digits = |mut index: usize| {
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            index += 1;
        }
        index
    };

    let mut end = skip_digits(start);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = skip_digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut index = end + 1;
        if matches!(bytes.get(index), Some(b'+' | b'-')) {
            index += 1;
        }
        if bytes.get(index).is_some_and(u8::is_ascii_digit) {
            end = skip_digits(index);
        }
    }
    end
}

fn create_tokens(words: &[&str], literals: Vec<String>) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::with_capacity(words.len());
    let mut literals = literals.into_iter();
    let mut parenthesis_depth = 0usize;
    let mut call_parenthesis_depths = HashSet::new();

    for (index, word) in words.iter().copied().enumerate() {
        let last = tokens.last();
        let token = match word {
            "(" => {
                parenthesis_depth += 1;
                if last.is_some_and(|token| token.kind == TokenKind::FunctionIdentifier) {
                    call_parenthesis_depths.insert(parenthesis_depth);
                    Token::operator(Operator::CALL_BEGIN)
                } else {
                    Token::new(TokenKind::Parenthesis, word)
                }
            }
            ")" => {
                let token = if call_parenthesis_depths.remove(&parenthesis_depth) {
                    Token::operator(Operator::CALL_END)
                } else {
                    Token::new(TokenKind::Parenthesis, word)
                };
                parenthesis_depth = parenthesis_depth.saturating_sub(1);
                token
            }
            "," => Token::operator(Operator::CALL_SEPARATOR),
            ESCAPED_NUMBER_LITERAL => {
                let literal = literals.next().ok_or_else(|| ExevalatorError::Unexpected {
                    message: "literal index out of range".to_string(),
                })?;
                Token::new(TokenKind::NumberLiteral, literal)
            }
            _ => match single_splitter(word) {
                Some(symbol) => Token::operator(classify_operator(symbol, last)?),
                None if words.get(index + 1) == Some(&"(") => {
                    Token::new(TokenKind::FunctionIdentifier, word)
                }
                None => Token::new(TokenKind::VariableIdentifier, word),
            },
        };
        tokens.push(token);
    }

    if literals.next().is_some() {
        return Err(ExevalatorError::Unexpected {
            message: "unrecovered number literals detected".to_string(),
        });
    }
    Ok(tokens)
}

fn single_splitter(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if SPLITTERS.contains(&c) => Some(c),
        _ => None,
    }
}

/// Decides from the preceding token whether `symbol` is a unary-prefix or a binary operator.
fn classify_operator(symbol: char, last: Option<&Token>) -> Result<Operator> {
    let unary_position = match last {
        None => true,
        Some(token) => {
            token.is_open_parenthesis()
                || token.lexeme == ","
                || token
                    .operator
                    .is_some_and(|operator| operator.class != OperatorClass::Call)
        }
    };
    if unary_position {
        return Operator::unary_prefix(symbol).ok_or_else(|| {
            ExevalatorError::UnknownUnaryPrefixOperator {
                symbol: symbol.to_string(),
            }
        });
    }

    let binary_position = last.is_some_and(|token| token.is_closed_parenthesis() || token.is_leaf());
    if binary_position {
        return Operator::binary(symbol).ok_or_else(|| ExevalatorError::UnknownBinaryOperator {
            symbol: symbol.to_string(),
        });
    }

    Err(ExevalatorError::UnknownOperatorSyntax {
        symbol: symbol.to_string(),
    })
}

fn check_parenthesis_balance(tokens: &[Token]) -> Result<()> {
    let mut depth = 0isize;
    for token in tokens {
        if token.is_open_parenthesis() {
            depth += 1;
        } else if token.is_closed_parenthesis() {
            depth -= 1;
        }
        if depth < 0 {
            return Err(ExevalatorError::DeficientOpenParenthesis);
        }
    }
    if depth > 0 {
        return Err(ExevalatorError::DeficientClosedParenthesis);
    }
    Ok(())
}

/// Call parentheses are not checked: "f()" is a call without arguments.
fn check_empty_parentheses(tokens: &[Token]) -> Result<()> {
    let mut content_count = 0usize;
    for token in tokens {
        if token.kind != TokenKind::Parenthesis {
            content_count += 1;
        } else if token.is_open_parenthesis() {
            content_count = 0;
        } else if content_count == 0 {
            return Err(ExevalatorError::EmptyParenthesis);
        }
    }
    Ok(())
}

fn check_locations_of_operators_and_leafs(tokens: &[Token]) -> Result<()> {
    for (index, token) in tokens.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| tokens.get(i));
        let next = tokens.get(index + 1);

        let next_is_leaf = next.is_some_and(Token::is_leaf);
        let previous_is_leaf = previous.is_some_and(Token::is_leaf);
        let next_is_open_parenthesis = next.is_some_and(Token::is_open_parenthesis);
        let previous_is_closed_parenthesis = previous.is_some_and(Token::is_closed_parenthesis);
        let next_is_prefix_operator =
            next.is_some_and(|token| token.is_operator_of(OperatorClass::UnaryPrefix));
        let next_is_call_begin = next.is_some_and(|token| token.is_operator_of(OperatorClass::Call));
        let next_is_function_identifier =
            next.is_some_and(|token| token.kind == TokenKind::FunctionIdentifier);
        let next_is_operand = next_is_leaf
            || next_is_open_parenthesis
            || next_is_prefix_operator
            || next_is_function_identifier;

        match token.kind {
            TokenKind::Operator => {
                let is_prefix = token.is_operator_of(OperatorClass::UnaryPrefix);
                let is_binary = token.is_operator_of(OperatorClass::Binary) || token.lexeme == ",";
                if (is_prefix || is_binary) && !next_is_operand {
                    return Err(ExevalatorError::RightOperandRequired {
                        token: token.lexeme.clone(),
                    });
                }
                if is_binary && !(previous_is_leaf || previous_is_closed_parenthesis) {
                    return Err(ExevalatorError::LeftOperandRequired {
                        token: token.lexeme.clone(),
                    });
                }
            }
            TokenKind::NumberLiteral | TokenKind::VariableIdentifier => {
                if (next_is_open_parenthesis && !next_is_call_begin)
                    || next_is_leaf
                    || next_is_function_identifier
                {
                    return Err(ExevalatorError::RightOperatorRequired {
                        token: token.lexeme.clone(),
                    });
                }
                if previous_is_closed_parenthesis || previous_is_leaf {
                    return Err(ExevalatorError::LeftOperatorRequired {
                        token: token.lexeme.clone(),
                    });
                }
            }
            TokenKind::FunctionIdentifier => {
                if previous_is_closed_parenthesis || previous_is_leaf {
                    return Err(ExevalatorError::LeftOperatorRequired {
                        token: token.lexeme.clone(),
                    });
                }
            }
            TokenKind::Parenthesis => {}
        }
    }
    Ok(())
}
