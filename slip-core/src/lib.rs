pub mod environment;
pub mod lexer;
pub mod parser;
pub mod value;

pub use environment::Environment;
pub use lexer::{LexError, Token, TokenKind, Tokenizer};
pub use parser::{parse, ParseError, Parser};
pub use value::{Arity, EvaluationError, Function, List, Primitive, PrimitiveFn, Value};
