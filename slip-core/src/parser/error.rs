use std::fmt;

use thiserror::Error;

use crate::lexer::{LexError, Token};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Unterminated list opened at offset {start}")]
    UnterminatedList { start: usize },
    #[error("Unexpected token '{}' at offset {}", .0.kind, .0.start)]
    UnexpectedToken(Token),
    #[error("Premature end of input, expected {expected}")]
    PrematureEndOfInput { expected: Expected },
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Expected {
    Value,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value => write!(f, "a value"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_value() -> Self {
        ParseError::PrematureEndOfInput {
            expected: Expected::Value,
        }
    }
}
