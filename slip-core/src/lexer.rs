use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    LParen,
    RParen,
    Quote,

    // Literals
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(Rc<str>),

    Symbol(Rc<str>),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Quote => write!(f, "'"),
            TokenKind::Integer(value) => write!(f, "{}", value),
            TokenKind::Double(value) => write!(f, "{}", value),
            TokenKind::Boolean(value) => write!(f, "{}", value),
            TokenKind::String(value) => write!(f, "{:?}", value),
            TokenKind::Symbol(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at offset {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("unterminated string literal starting at offset {start}")]
    UnterminatedString { start: usize },
    #[error("invalid escape sequence '\\{character}' at offset {position}")]
    InvalidEscape { character: char, position: usize },
    #[error("invalid number literal '{literal}' at offset {start}")]
    InvalidNumber { literal: Rc<str>, start: usize },
}

/// Splits source text into tokens, skipping whitespace and `;` comments.
///
/// The tokenizer is cheap to clone, which is how [`Tokenizer::peek_token`]
/// looks ahead without consuming input.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        self.next()
    }

    pub fn peek_token(&self) -> Option<Result<Token, LexError>> {
        self.clone().next()
    }

    pub fn is_symbol_char(ch: char) -> bool {
        ch.is_alphanumeric()
            || matches!(
                ch,
                '!' | '@'
                    | '$'
                    | '%'
                    | '^'
                    | '&'
                    | '*'
                    | '-'
                    | '_'
                    | '+'
                    | '='
                    | '|'
                    | '~'
                    | ':'
                    | '<'
                    | '>'
                    | '.'
                    | '?'
                    | '\\'
                    | '/'
                    | ','
            )
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}

            if self.iter.next_if(|(_, ch)| *ch == ';').is_none() {
                break;
            }
            while self.iter.next_if(|(_, ch)| *ch != '\n').is_some() {}
        }
    }

    fn read_symbol(&mut self, start: usize) -> Token {
        while self
            .iter
            .next_if(|(_, ch)| Self::is_symbol_char(*ch))
            .is_some()
        {}

        let end = self.next_idx();
        let name = &self.input[start..end];
        let kind = match name {
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            _ => TokenKind::Symbol(name.into()),
        };
        Token { kind, start, end }
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        let mut point = false;
        while let Some((_, ch)) = self
            .iter
            .next_if(|(_, ch)| ch.is_ascii_digit() || (*ch == '.' && !point))
        {
            if ch == '.' {
                point = true;
            }
        }

        let end = self.next_idx();
        let literal = &self.input[start..end];
        let invalid = || LexError::InvalidNumber {
            literal: literal.into(),
            start,
        };

        let kind = if point {
            TokenKind::Double(literal.parse().map_err(|_| invalid())?)
        } else {
            TokenKind::Integer(literal.parse().map_err(|_| invalid())?)
        };
        Ok(Token { kind, start, end })
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        let mut value = String::new();
        loop {
            match self.iter.next() {
                Some((_, '"')) => break,
                Some((position, '\\')) => match self.iter.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, character)) => {
                        return Err(LexError::InvalidEscape {
                            character,
                            position,
                        })
                    }
                    None => return Err(LexError::UnterminatedString { start }),
                },
                Some((_, ch)) => value.push(ch),
                None => return Err(LexError::UnterminatedString { start }),
            }
        }

        Ok(Token {
            kind: TokenKind::String(value.into()),
            start,
            end: self.next_idx(),
        })
    }

    fn starts_number(&mut self, ch: char) -> bool {
        match ch {
            '+' | '-' => matches!(self.iter.peek(), Some((_, next)) if next.is_ascii_digit()),
            _ => ch.is_ascii_digit(),
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace_and_comments();

        let (idx, ch) = self.iter.next()?;
        let token = match ch {
            '(' => Ok(Token {
                kind: TokenKind::LParen,
                start: idx,
                end: self.next_idx(),
            }),
            ')' => Ok(Token {
                kind: TokenKind::RParen,
                start: idx,
                end: self.next_idx(),
            }),
            '\'' => Ok(Token {
                kind: TokenKind::Quote,
                start: idx,
                end: self.next_idx(),
            }),
            '"' => self.read_string(idx),
            c if self.starts_number(c) => self.read_number(idx),
            c if Tokenizer::is_symbol_char(c) => Ok(self.read_symbol(idx)),
            character => Err(LexError::UnexpectedCharacter {
                character,
                position: idx,
            }),
        };

        trace!(?token, "lexed");
        Some(token)
    }
}

/// Tokenizes the whole input, stopping at the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).collect()
}
