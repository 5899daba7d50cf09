use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExevalatorError>;

/// Every failure an engine operation can report.
///
/// The `Display` text is the default English message; hosts wanting another
/// language render errors through [`crate::ErrorMessages`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExevalatorError {
    #[error("The inputted expression is empty.")]
    EmptyExpression,

    #[error("The length of the expression exceeds the limit (max_expression_char_count: '{limit}')")]
    ExpressionTooLong { limit: usize },

    #[error("The number of tokens exceeds the limit (max_token_count: '{limit}')")]
    TooManyTokens { limit: usize },

    #[error("The number of open parentheses '(' is deficient.")]
    DeficientOpenParenthesis,

    #[error("The number of closed parentheses ')' is deficient.")]
    DeficientClosedParenthesis,

    #[error("The content of parentheses '()' should not be empty.")]
    EmptyParenthesis,

    #[error("An operand is required at the right of: '{token}'")]
    RightOperandRequired { token: String },

    #[error("An operand is required at the left of: '{token}'")]
    LeftOperandRequired { token: String },

    #[error("An operator is required at the right of: '{token}'")]
    RightOperatorRequired { token: String },

    #[error("An operator is required at the left of: '{token}'")]
    LeftOperatorRequired { token: String },

    #[error("Unknown unary-prefix operator: '{symbol}'")]
    UnknownUnaryPrefixOperator { symbol: String },

    #[error("Unknown binary operator: '{symbol}'")]
    UnknownBinaryOperator { symbol: String },

    #[error("Unknown operator syntax: '{symbol}'")]
    UnknownOperatorSyntax { symbol: String },

    #[error("The depth of the AST exceeds the limit (max_ast_depth: '{limit}')")]
    AstDepthExceeded { limit: usize },

    #[error("Unexpected end of a partial expression")]
    UnexpectedPartialExpression,

    #[error("Invalid number literal: '{literal}'")]
    InvalidNumberLiteral { literal: String },

    #[error("Invalid memory address: '{address}'")]
    InvalidMemoryAddress { address: usize },

    #[error("Function Error ('{name}'): {message}")]
    FunctionError { name: String, message: String },

    #[error("Variable not found: '{name}'")]
    VariableNotFound { name: String },

    #[error("Function not found: '{name}'")]
    FunctionNotFound { name: String },

    #[error("Unexpected operator: '{symbol}'")]
    UnexpectedOperator { symbol: String },

    #[error("Unexpected token: '{token}'")]
    UnexpectedToken { token: String },

    #[error("\"reeval\" is not available before using \"eval\"")]
    ReevalNotAvailable,

    #[error("The length of the variable name exceeds the limit (max_name_char_count: '{limit}')")]
    VariableNameTooLong { limit: usize },

    #[error("The length of the function name exceeds the limit (max_name_char_count: '{limit}')")]
    FunctionNameTooLong { limit: usize },

    #[error("The variable '{name}' is already declared")]
    VariableAlreadyDeclared { name: String },

    #[error("The function '{name}' is already connected")]
    FunctionAlreadyConnected { name: String },

    #[error("Unexpected error occurred: {message}")]
    Unexpected { message: String },
}

/// Field-less discriminant of [`ExevalatorError`], used as the key of message tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    ExpressionTooLong,
    TooManyTokens,
    DeficientOpenParenthesis,
    DeficientClosedParenthesis,
    EmptyParenthesis,
    RightOperandRequired,
    LeftOperandRequired,
    RightOperatorRequired,
    LeftOperatorRequired,
    UnknownUnaryPrefixOperator,
    UnknownBinaryOperator,
    UnknownOperatorSyntax,
    AstDepthExceeded,
    UnexpectedPartialExpression,
    InvalidNumberLiteral,
    InvalidMemoryAddress,
    FunctionError,
    VariableNotFound,
    FunctionNotFound,
    UnexpectedOperator,
    UnexpectedToken,
    ReevalNotAvailable,
    VariableNameTooLong,
    FunctionNameTooLong,
    VariableAlreadyDeclared,
    FunctionAlreadyConnected,
    Unexpected,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 28] = [
        ErrorKind::EmptyExpression,
        ErrorKind::ExpressionTooLong,
        ErrorKind::TooManyTokens,
        ErrorKind::DeficientOpenParenthesis,
        ErrorKind::DeficientClosedParenthesis,
        ErrorKind::EmptyParenthesis,
        ErrorKind::RightOperandRequired,
        ErrorKind::LeftOperandRequired,
        ErrorKind::RightOperatorRequired,
        ErrorKind::LeftOperatorRequired,
        ErrorKind::UnknownUnaryPrefixOperator,
        ErrorKind::UnknownBinaryOperator,
        ErrorKind::UnknownOperatorSyntax,
        ErrorKind::AstDepthExceeded,
        ErrorKind::UnexpectedPartialExpression,
        ErrorKind::InvalidNumberLiteral,
        ErrorKind::InvalidMemoryAddress,
        ErrorKind::FunctionError,
        ErrorKind::VariableNotFound,
        ErrorKind::FunctionNotFound,
        ErrorKind::UnexpectedOperator,
        ErrorKind::UnexpectedToken,
        ErrorKind::ReevalNotAvailable,
        ErrorKind::VariableNameTooLong,
        ErrorKind::FunctionNameTooLong,
        ErrorKind::VariableAlreadyDeclared,
        ErrorKind::FunctionAlreadyConnected,
        ErrorKind::Unexpected,
    ];
}

impl ExevalatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyExpression => ErrorKind::EmptyExpression,
            Self::ExpressionTooLong { .. } => ErrorKind::ExpressionTooLong,
            Self::TooManyTokens { .. } => ErrorKind::TooManyTokens,
            Self::DeficientOpenParenthesis => ErrorKind::DeficientOpenParenthesis,
            Self::DeficientClosedParenthesis => ErrorKind::DeficientClosedParenthesis,
            Self::EmptyParenthesis => ErrorKind::EmptyParenthesis,
            Self::RightOperandRequired { .. } => ErrorKind::RightOperandRequired,
            Self::LeftOperandRequired { .. } => ErrorKind::LeftOperandRequired,
            Self::RightOperatorRequired { .. } => ErrorKind::RightOperatorRequired,
            Self::LeftOperatorRequired { .. } => ErrorKind::LeftOperatorRequired,
            Self::UnknownUnaryPrefixOperator { .. } => ErrorKind::UnknownUnaryPrefixOperator,
            Self::UnknownBinaryOperator { .. } => ErrorKind::UnknownBinaryOperator,
            Self::UnknownOperatorSyntax { .. } => ErrorKind::UnknownOperatorSyntax,
            Self::AstDepthExceeded { .. } => ErrorKind::AstDepthExceeded,
            Self::UnexpectedPartialExpression => ErrorKind::UnexpectedPartialExpression,
            Self::InvalidNumberLiteral { .. } => ErrorKind::InvalidNumberLiteral,
            Self::InvalidMemoryAddress { .. } => ErrorKind::InvalidMemoryAddress,
            Self::FunctionError { .. } => ErrorKind::FunctionError,
            Self::VariableNotFound { .. } => ErrorKind::VariableNotFound,
            Self::FunctionNotFound { .. } => ErrorKind::FunctionNotFound,
            Self::UnexpectedOperator { .. } => ErrorKind::UnexpectedOperator,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::ReevalNotAvailable => ErrorKind::ReevalNotAvailable,
            Self::VariableNameTooLong { .. } => ErrorKind::VariableNameTooLong,
            Self::FunctionNameTooLong { .. } => ErrorKind::FunctionNameTooLong,
            Self::VariableAlreadyDeclared { .. } => ErrorKind::VariableAlreadyDeclared,
            Self::FunctionAlreadyConnected { .. } => ErrorKind::FunctionAlreadyConnected,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Positional context of the error, substituted for `$0`, `$1`, ... in message templates.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Self::EmptyExpression
            | Self::DeficientOpenParenthesis
            | Self::DeficientClosedParenthesis
            | Self::EmptyParenthesis
            | Self::UnexpectedPartialExpression
            | Self::ReevalNotAvailable => Vec::new(),

            Self::ExpressionTooLong { limit }
            | Self::TooManyTokens { limit }
            | Self::AstDepthExceeded { limit }
            | Self::VariableNameTooLong { limit }
            | Self::FunctionNameTooLong { limit } => vec![limit.to_string()],

            Self::RightOperandRequired { token }
            | Self::LeftOperandRequired { token }
            | Self::RightOperatorRequired { token }
            | Self::LeftOperatorRequired { token }
            | Self::UnexpectedToken { token } => vec![token.clone()],

            Self::UnknownUnaryPrefixOperator { symbol }
            | Self::UnknownBinaryOperator { symbol }
            | Self::UnknownOperatorSyntax { symbol }
            | Self::UnexpectedOperator { symbol } => vec![symbol.clone()],

            Self::InvalidNumberLiteral { literal } => vec![literal.clone()],
            Self::InvalidMemoryAddress { address } => vec![address.to_string()],
            Self::FunctionError { name, message } => vec![name.clone(), message.clone()],

            Self::VariableNotFound { name }
            | Self::FunctionNotFound { name }
            | Self::VariableAlreadyDeclared { name }
            | Self::FunctionAlreadyConnected { name } => vec![name.clone()],

            Self::Unexpected { message } => vec![message.clone()],
        }
    }
}
