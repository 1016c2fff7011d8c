pub mod error;

use tracing::debug;

use crate::lexer::{Token, TokenKind, Tokenizer};
use crate::value::{List, Value};
pub use error::ParseError;

/// Recursive-descent reader over the token stream.
///
/// Grammar:
///
/// ```text
/// program = value*
/// value   = list | "'" value | INTEGER | DOUBLE | BOOL | STRING | SYMBOL
/// list    = "(" value* ")"
/// ```
pub struct Parser<'a> {
    pub iter: std::iter::Peekable<Tokenizer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        let iter = tokenizer.peekable();
        Self { iter }
    }

    /// Reads every top-level form. Nothing is returned unless the whole input
    /// is well formed.
    pub fn parse_program(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut values = Vec::new();

        while self.iter.peek().is_some() {
            values.push(self.parse_value()?);
        }

        debug!(forms = values.len(), "parsed program");
        Ok(values)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        Ok(self.iter.next().transpose()?)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self
            .next_token()?
            .ok_or_else(ParseError::premature_end_expected_value)?;
        self.parse_value_from(token)
    }

    fn parse_value_from(&mut self, token: Token) -> Result<Value, ParseError> {
        match token.kind {
            TokenKind::LParen => self.parse_list(token.start),
            // 'x reads as (quote x)
            TokenKind::Quote => {
                let quoted = self.parse_value()?;
                Ok(Value::list([Value::symbol("quote"), quoted]))
            }
            TokenKind::Integer(value) => Ok(Value::Integer(value)),
            TokenKind::Double(value) => Ok(Value::Double(value)),
            TokenKind::Boolean(value) => Ok(Value::boolean(value)),
            TokenKind::String(value) => Ok(Value::String(value)),
            TokenKind::Symbol(name) => Ok(Value::Symbol(name)),
            TokenKind::RParen => Err(ParseError::UnexpectedToken(token)),
        }
    }

    fn parse_list(&mut self, start: usize) -> Result<Value, ParseError> {
        let mut elements = Vec::new();

        loop {
            match self.next_token()? {
                None => return Err(ParseError::UnterminatedList { start }),
                Some(Token {
                    kind: TokenKind::RParen,
                    ..
                }) => break,
                Some(token) => elements.push(self.parse_value_from(token)?),
            }
        }

        Ok(Value::List(elements.into_iter().collect::<List>()))
    }
}

/// Parses `input` into its top-level forms.
pub fn parse(input: &str) -> Result<Vec<Value>, ParseError> {
    Parser::new(Tokenizer::new(input)).parse_program()
}
