use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position, Span};

/// Broad error classes. Lexical errors abort tokenization, parse and
/// unterminated-block errors abort only the current statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lex,
    Parse,
    UnterminatedBlock,
    /// Internal invariant violation; never expected from a correct grammar.
    Ambiguity,
    Budget,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    /// Creates an error covering a single position.
    pub fn at(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            span: Span {
                start: position.clone(),
                end: position,
            },
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    /// Token kinds the grammar would have accepted. Empty for errors that are
    /// not about a missing token.
    pub fn get_expected(&self) -> &[TokenKind] {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn get_class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedLiteral { .. }
            | ErrorImpl::MalformedEscape { .. }
            | ErrorImpl::InvalidCharLiteral { .. }
            | ErrorImpl::InvalidIdentifier { .. } => ErrorClass::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorClass::Parse,
            ErrorImpl::UnterminatedBlock { .. } => ErrorClass::UnterminatedBlock,
            ErrorImpl::Ambiguity { .. } => ErrorClass::Ambiguity,
            ErrorImpl::BudgetExceeded { .. } => ErrorClass::Budget,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::MalformedEscape { .. } => "MalformedEscape",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnterminatedBlock { .. } => "UnterminatedBlock",
            ErrorImpl::Ambiguity { .. } => "Ambiguity",
            ErrorImpl::BudgetExceeded { .. } => "BudgetExceeded",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { kind } => {
                ErrorTip::Suggestion(format!("Missing closing quote for {} literal", kind))
            }
            ErrorImpl::MalformedEscape { sequence } => ErrorTip::Suggestion(format!(
                "Unknown escape `{}`, expected one of \\n \\r \\t \\b \\f \\\\ \\/ \\\" \\u{{XXXX}}",
                sequence
            )),
            ErrorImpl::InvalidCharLiteral { literal } => ErrorTip::Suggestion(format!(
                "Char literal `{}` must hold exactly one character",
                literal
            )),
            ErrorImpl::InvalidIdentifier { token } => ErrorTip::Suggestion(format!(
                "Identifier `{}` must start with a letter, or be the hole `_`",
                token
            )),
            ErrorImpl::UnexpectedToken { token, expected } => {
                if expected.is_empty() {
                    ErrorTip::Suggestion(format!("Unexpected token: {}", token))
                } else {
                    ErrorTip::Suggestion(format!(
                        "expected {}, found {}",
                        describe_expected(expected),
                        token
                    ))
                }
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: {}, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnterminatedBlock { found } => ErrorTip::Suggestion(format!(
                "Arm list opened with `{{` is never closed, found {}",
                found
            )),
            ErrorImpl::Ambiguity { message } => ErrorTip::Suggestion(format!(
                "Internal parser error, please report: {}",
                message
            )),
            ErrorImpl::BudgetExceeded { budget } => ErrorTip::Suggestion(format!(
                "Stopped after consuming more than {} tokens",
                budget
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}..{}: {}",
            self.span.start.1, self.span.start.0, self.span.end.0, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    let names = expected
        .iter()
        .map(|kind| kind.describe())
        .collect::<Vec<_>>();

    match names.as_slice() {
        [] => String::from("something else"),
        [single] => single.to_string(),
        _ => format!("one of {}", names.join(", ")),
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated {kind} literal")]
    UnterminatedLiteral { kind: &'static str },
    #[error("malformed escape sequence: {sequence:?}")]
    MalformedEscape { sequence: String },
    #[error("char literal must contain exactly one character: {literal:?}")]
    InvalidCharLiteral { literal: String },
    #[error("invalid identifier: {token:?}")]
    InvalidIdentifier { token: String },
    #[error("unexpected token {token}, expected {}", describe_expected(.expected))]
    UnexpectedToken {
        token: String,
        expected: Vec<TokenKind>,
    },
    #[error("unexpected token ({message}): {token}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unterminated arm block, expected `}}`, found {found}")]
    UnterminatedBlock { found: String },
    #[error("ambiguous parse: {message}")]
    Ambiguity { message: String },
    #[error("token budget of {budget} exceeded")]
    BudgetExceeded { budget: usize },
}
