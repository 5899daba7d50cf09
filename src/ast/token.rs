use std::fmt;

/// Precedence of operators which never force a reduction of the operator before them.
pub const LEAST_PRIOR: u32 = u32::MAX;

/// Characters splitting an expression into token words, besides whitespace.
pub const SPLITTERS: [char; 7] = ['+', '-', '*', '/', '(', ')', ','];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    NumberLiteral,
    Operator,
    Parenthesis,
    VariableIdentifier,
    FunctionIdentifier,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::NumberLiteral => "NUMBER_LITERAL",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Parenthesis => "PARENTHESIS",
            TokenKind::VariableIdentifier => "VARIABLE_IDENTIFIER",
            TokenKind::FunctionIdentifier => "FUNCTION_IDENTIFIER",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    UnaryPrefix,
    Binary,
    Call,
}

impl OperatorClass {
    pub fn name(&self) -> &'static str {
        match self {
            OperatorClass::UnaryPrefix => "UNARY_PREFIX",
            OperatorClass::Binary => "BINARY",
            OperatorClass::Call => "CALL",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Operator metadata. A smaller `precedence` binds tighter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Operator {
    pub class: OperatorClass,
    pub symbol: char,
    pub precedence: u32,
    pub associativity: Associativity,
}

impl Operator {
    const fn new(
        class: OperatorClass,
        symbol: char,
        precedence: u32,
        associativity: Associativity,
    ) -> Self {
        Self {
            class,
            symbol,
            precedence,
            associativity,
        }
    }

    pub const ADDITION: Operator =
        Operator::new(OperatorClass::Binary, '+', 400, Associativity::Left);
    pub const SUBTRACTION: Operator =
        Operator::new(OperatorClass::Binary, '-', 400, Associativity::Left);
    pub const MULTIPLICATION: Operator =
        Operator::new(OperatorClass::Binary, '*', 300, Associativity::Left);
    pub const DIVISION: Operator =
        Operator::new(OperatorClass::Binary, '/', 300, Associativity::Left);
    pub const MINUS: Operator =
        Operator::new(OperatorClass::UnaryPrefix, '-', 200, Associativity::Right);
    pub const CALL_BEGIN: Operator =
        Operator::new(OperatorClass::Call, '(', 100, Associativity::Left);
    pub const CALL_END: Operator =
        Operator::new(OperatorClass::Call, ')', LEAST_PRIOR, Associativity::Left);
    pub const CALL_SEPARATOR: Operator =
        Operator::new(OperatorClass::Call, ',', LEAST_PRIOR, Associativity::Left);

    pub fn unary_prefix(symbol: char) -> Option<Operator> {
        match symbol {
            '-' => Some(Self::MINUS),
            _ => None,
        }
    }

    pub fn binary(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Self::ADDITION),
            '-' => Some(Self::SUBTRACTION),
            '*' => Some(Self::MULTIPLICATION),
            '/' => Some(Self::DIVISION),
            _ => None,
        }
    }

    pub fn call(symbol: char) -> Option<Operator> {
        match symbol {
            '(' => Some(Self::CALL_BEGIN),
            ')' => Some(Self::CALL_END),
            ',' => Some(Self::CALL_SEPARATOR),
            _ => None,
        }
    }

    /// Number of operands, or `None` for call operators whose arity depends on the call site.
    pub fn arity(&self) -> Option<usize> {
        match self.class {
            OperatorClass::UnaryPrefix => Some(1),
            OperatorClass::Binary => Some(2),
            OperatorClass::Call => None,
        }
    }

    /// Whether an operator of this kind takes the operand at its right directly,
    /// when the next operator has precedence `next_precedence`.
    pub fn should_add_right_operand(&self, next_precedence: u32) -> bool {
        self.precedence < next_precedence
            || (self.precedence == next_precedence && self.associativity == Associativity::Left)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub operator: Option<Operator>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            operator: None,
        }
    }

    pub fn operator(operator: Operator) -> Self {
        Self {
            kind: TokenKind::Operator,
            lexeme: operator.symbol.to_string(),
            operator: Some(operator),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::NumberLiteral | TokenKind::VariableIdentifier
        )
    }

    pub fn is_operator_of(&self, class: OperatorClass) -> bool {
        self.operator.is_some_and(|operator| operator.class == class)
    }

    pub fn is_open_parenthesis(&self) -> bool {
        self.lexeme == "("
    }

    pub fn is_closed_parenthesis(&self) -> bool {
        self.lexeme == ")"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
