use crate::error::{ErrorKind, ExevalatorError};
use std::borrow::Cow;
use std::collections::HashMap;

/// Message templates keyed by [`ErrorKind`].
///
/// Templates refer to the error context positionally: `$0` is the first entry of
/// [`ExevalatorError::arguments`], `$1` the second.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessages {
    templates: HashMap<ErrorKind, Cow<'static, str>>,
}

const ENGLISH: [(ErrorKind, &str); 28] = [
    (ErrorKind::EmptyExpression, "The inputted expression is empty."),
    (
        ErrorKind::ExpressionTooLong,
        "The length of the expression exceeds the limit (max_expression_char_count: '$0')",
    ),
    (
        ErrorKind::TooManyTokens,
        "The number of tokens exceeds the limit (max_token_count: '$0')",
    ),
    (
        ErrorKind::DeficientOpenParenthesis,
        "The number of open parentheses '(' is deficient.",
    ),
    (
        ErrorKind::DeficientClosedParenthesis,
        "The number of closed parentheses ')' is deficient.",
    ),
    (
        ErrorKind::EmptyParenthesis,
        "The content of parentheses '()' should not be empty.",
    ),
    (
        ErrorKind::RightOperandRequired,
        "An operand is required at the right of: '$0'",
    ),
    (
        ErrorKind::LeftOperandRequired,
        "An operand is required at the left of: '$0'",
    ),
    (
        ErrorKind::RightOperatorRequired,
        "An operator is required at the right of: '$0'",
    ),
    (
        ErrorKind::LeftOperatorRequired,
        "An operator is required at the left of: '$0'",
    ),
    (
        ErrorKind::UnknownUnaryPrefixOperator,
        "Unknown unary-prefix operator: '$0'",
    ),
    (ErrorKind::UnknownBinaryOperator, "Unknown binary operator: '$0'"),
    (ErrorKind::UnknownOperatorSyntax, "Unknown operator syntax: '$0'"),
    (
        ErrorKind::AstDepthExceeded,
        "The depth of the AST exceeds the limit (max_ast_depth: '$0')",
    ),
    (
        ErrorKind::UnexpectedPartialExpression,
        "Unexpected end of a partial expression",
    ),
    (ErrorKind::InvalidNumberLiteral, "Invalid number literal: '$0'"),
    (ErrorKind::InvalidMemoryAddress, "Invalid memory address: '$0'"),
    (ErrorKind::FunctionError, "Function Error ('$0'): $1"),
    (ErrorKind::VariableNotFound, "Variable not found: '$0'"),
    (ErrorKind::FunctionNotFound, "Function not found: '$0'"),
    (ErrorKind::UnexpectedOperator, "Unexpected operator: '$0'"),
    (ErrorKind::UnexpectedToken, "Unexpected token: '$0'"),
    (
        ErrorKind::ReevalNotAvailable,
        "\"reeval\" is not available before using \"eval\"",
    ),
    (
        ErrorKind::VariableNameTooLong,
        "The length of the variable name exceeds the limit (max_name_char_count: '$0')",
    ),
    (
        ErrorKind::FunctionNameTooLong,
        "The length of the function name exceeds the limit (max_name_char_count: '$0')",
    ),
    (
        ErrorKind::VariableAlreadyDeclared,
        "The variable '$0' is already declared",
    ),
    (
        ErrorKind::FunctionAlreadyConnected,
        "The function '$0' is already connected",
    ),
    (ErrorKind::Unexpected, "Unexpected error occurred: $0"),
];

const JAPANESE: [(ErrorKind, &str); 28] = [
    (ErrorKind::EmptyExpression, "入力された計算式が空です。"),
    (
        ErrorKind::ExpressionTooLong,
        "式の長さが、許容上限を超過しています (max_expression_char_count: '$0')",
    ),
    (
        ErrorKind::TooManyTokens,
        "入力トークンの数が、許容上限を超過しています (max_token_count: '$0')",
    ),
    (
        ErrorKind::DeficientOpenParenthesis,
        "開き括弧 '(' の数が足りません。",
    ),
    (
        ErrorKind::DeficientClosedParenthesis,
        "閉じ括弧 ')' の数が足りません。",
    ),
    (
        ErrorKind::EmptyParenthesis,
        "括弧 '()' の中が空になっていますが、何かが必要です。",
    ),
    (
        ErrorKind::RightOperandRequired,
        "'$0' の右に、演算対象の値や変数が必要です。",
    ),
    (
        ErrorKind::LeftOperandRequired,
        "'$0' の左に、演算対象の値や変数が必要です。",
    ),
    (
        ErrorKind::RightOperatorRequired,
        "'$0' の右に、演算子（ + や - 等の演算記号）が必要です。",
    ),
    (
        ErrorKind::LeftOperatorRequired,
        "'$0' の左に、演算子（ + や - 等の演算記号）が必要です。",
    ),
    (
        ErrorKind::UnknownUnaryPrefixOperator,
        "'$0' は文法的に前置演算子と解釈されましたが、サポートされていない記号です。",
    ),
    (
        ErrorKind::UnknownBinaryOperator,
        "'$0' は文法的に二項演算子と解釈されましたが、サポートされていない記号です。",
    ),
    (
        ErrorKind::UnknownOperatorSyntax,
        "'$0' は文法的に演算子と推測されますが、サポートされていない書き方や記号です。",
    ),
    (
        ErrorKind::AstDepthExceeded,
        "抽象構文木の深さが、許容上限を超過しています (max_ast_depth: '$0')",
    ),
    (
        ErrorKind::UnexpectedPartialExpression,
        "部分式が、予期しない形で終わっています。",
    ),
    (
        ErrorKind::InvalidNumberLiteral,
        "数値リテラル '$0' は、記法が想定外の形になっています。",
    ),
    (
        ErrorKind::InvalidMemoryAddress,
        "アドレス '$0' は未割当か、許容領域外です。",
    ),
    (ErrorKind::FunctionError, "関数エラー ('$0'): $1"),
    (ErrorKind::VariableNotFound, "変数が見つかりません: '$0'"),
    (ErrorKind::FunctionNotFound, "関数が見つかりません: '$0'"),
    (
        ErrorKind::UnexpectedOperator,
        "'$0' は文法的に演算子と推測されますが、種類や文法などを解釈できませんでした。",
    ),
    (
        ErrorKind::UnexpectedToken,
        "トークン '$0' の種類や文法などを解釈できませんでした。",
    ),
    (
        ErrorKind::ReevalNotAvailable,
        "\"reeval\" は、 \"eval\" を一度も使用する前にコールする事はできません。",
    ),
    (
        ErrorKind::VariableNameTooLong,
        "変数名の長さが、許容上限を超過しています (max_name_char_count: '$0')",
    ),
    (
        ErrorKind::FunctionNameTooLong,
        "関数名の長さが、許容上限を超過しています (max_name_char_count: '$0')",
    ),
    (
        ErrorKind::VariableAlreadyDeclared,
        "変数 '$0' は既に宣言されています。",
    ),
    (
        ErrorKind::FunctionAlreadyConnected,
        "関数 '$0' は既に登録されています。",
    ),
    (
        ErrorKind::Unexpected,
        "通常想定されていないエラーが発生しました: $0",
    ),
];

impl ErrorMessages {
    fn from_table(table: &[(ErrorKind, &'static str)]) -> Self {
        Self {
            templates: table
                .iter()
                .map(|(kind, template)| (*kind, Cow::Borrowed(*template)))
                .collect(),
        }
    }

    pub fn english() -> Self {
        Self::from_table(&ENGLISH)
    }

    pub fn japanese() -> Self {
        Self::from_table(&JAPANESE)
    }

    /// Replaces the template of one error kind.
    pub fn with_template(mut self, kind: ErrorKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, Cow::Owned(template.into()));
        self
    }

    pub fn template(&self, kind: ErrorKind) -> Option<&str> {
        self.templates.get(&kind).map(|template| template.as_ref())
    }

    /// Renders `error` with its context substituted into the template.
    ///
    /// Falls back to the error's own `Display` text when no template is set for its kind.
    pub fn render(&self, error: &ExevalatorError) -> String {
        let Some(template) = self.template(error.kind()) else {
            return error.to_string();
        };
        let arguments = error.arguments();
        let mut message = String::with_capacity(template.len());
        let mut rest = template;
        // Only the template is scanned, never the substituted arguments.
        while let Some(position) = rest.find('$') {
            message.push_str(&rest[..position]);
            let after = &rest[position + 1..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let argument = after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| arguments.get(index));
            match argument {
                Some(argument) => {
                    message.push_str(argument);
                    rest = &after[digits..];
                }
                None => {
                    message.push('$');
                    rest = after;
                }
            }
        }
        message.push_str(rest);
        message
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::english()
    }
}
