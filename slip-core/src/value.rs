use std::fmt::{self, Write};
use std::rc::Rc;

use gc::{unsafe_empty_trace, Finalize, Gc, Trace};
use thiserror::Error;

use crate::environment::Environment;

/// A runtime value. Parsed source is made of the same values, so a list is
/// both list data and the expression tree of a call or special form.
#[derive(Debug, Clone, Trace, Finalize)]
pub enum Value {
    Nil,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(Rc<str>),
    Symbol(Rc<str>),
    List(List),
    Primitive(Primitive),
    Function(Gc<Function>),
}

impl Value {
    pub fn nil() -> Value {
        Value::Nil
    }
    pub fn boolean(value: bool) -> Value {
        Value::Boolean(value)
    }
    pub fn integer(value: i64) -> Value {
        Value::Integer(value)
    }
    pub fn double(value: f64) -> Value {
        Value::Double(value)
    }
    pub fn string(value: impl Into<Rc<str>>) -> Value {
        Value::String(value.into())
    }
    pub fn symbol(name: impl Into<Rc<str>>) -> Value {
        Value::Symbol(name.into())
    }
    pub fn list(values: impl IntoIterator<Item = Value>) -> Value {
        Value::List(values.into_iter().collect())
    }
    pub fn empty_list() -> Value {
        Value::List(List::Empty)
    }
    pub fn primitive(primitive: Primitive) -> Value {
        Value::Primitive(primitive)
    }
    pub fn function(
        name: Option<Rc<str>>,
        parameters: Vec<Rc<str>>,
        body: List,
        env: Environment,
    ) -> Value {
        Value::Function(Gc::new(Function {
            name,
            parameters,
            body,
            env,
        }))
    }

    /// Only nil and `false` are falsy; zero and the empty list are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Primitive(_) | Value::Function(_))
    }

    pub fn as_symbol(&self) -> Option<&Rc<str>> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Primitive(_) | Value::Function(_) => "function",
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Integer(left), Value::Integer(right)) => left == right,
            (Value::Double(left), Value::Double(right)) => left == right,
            (Value::Integer(int), Value::Double(double))
            | (Value::Double(double), Value::Integer(int)) => *int as f64 == *double,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Symbol(left), Value::Symbol(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => Gc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Double(value) => {
                let rendered = value.to_string();
                if value.is_finite() && !rendered.contains('.') {
                    write!(f, "{}.0", rendered)
                } else {
                    f.write_str(&rendered)
                }
            }
            Value::Boolean(value) => write!(f, "{}", value),
            Value::String(value) => write_escaped(f, value),
            Value::Symbol(name) => f.write_str(name),
            Value::List(list) => write!(f, "{}", list),
            Value::Primitive(primitive) => write!(f, "<builtin-fn {}>", primitive.name),
            Value::Function(function) => match &function.name {
                Some(name) => write!(f, "<fn {}>", name),
                None => f.write_str("<fn>"),
            },
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            ch => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

/// An immutable singly-linked list. Tails are shared between lists, so
/// `cons` never copies or mutates the list it extends.
#[derive(Debug, Clone, Default)]
pub enum List {
    #[default]
    Empty,
    Cons(Rc<Cons>),
}

#[derive(Debug)]
pub struct Cons {
    pub head: Value,
    pub tail: List,
}

// Lists are reference counted rather than collected, so tracing stops here.
// A closure stored inside a list stays rooted for as long as the list lives.
impl Finalize for List {}
unsafe impl Trace for List {
    unsafe_empty_trace!();
}

// Unlinks the tail one cell at a time, so dropping a long list takes constant
// stack.
impl Drop for Cons {
    fn drop(&mut self) {
        let mut tail = std::mem::take(&mut self.tail);
        while let List::Cons(cell) = tail {
            match Rc::try_unwrap(cell) {
                Ok(mut cons) => tail = std::mem::take(&mut cons.tail),
                Err(_) => break,
            }
        }
    }
}

impl List {
    pub fn new() -> Self {
        List::Empty
    }

    pub fn cons(&self, head: Value) -> List {
        List::Cons(Rc::new(Cons {
            head,
            tail: self.clone(),
        }))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, List::Empty)
    }

    pub fn first(&self) -> Option<&Value> {
        match self {
            List::Empty => None,
            List::Cons(cell) => Some(&cell.head),
        }
    }

    /// Everything after the first element; the empty list for the empty list.
    pub fn rest(&self) -> List {
        match self {
            List::Empty => List::Empty,
            List::Cons(cell) => cell.tail.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> ListIter<'_> {
        ListIter { current: self }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(l), Some(r)) if l == r => continue,
                _ => return false,
            }
        }
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let values: Vec<Value> = iter.into_iter().collect();
        values
            .into_iter()
            .rev()
            .fold(List::Empty, |tail, head| tail.cons(head))
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{}", value)?;
        }
        f.write_char(')')
    }
}

pub struct ListIter<'a> {
    current: &'a List,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        match self.current {
            List::Empty => None,
            List::Cons(cell) => {
                self.current = &cell.tail;
                Some(&cell.head)
            }
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = ListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A closure: parameters, a body evaluated as an implicit `do`, and the
/// environment it was created in, held by reference.
#[derive(Trace, Finalize)]
pub struct Function {
    pub name: Option<Rc<str>>,
    pub parameters: Vec<Rc<str>>,
    pub body: List,
    pub env: Environment,
}

impl Function {
    pub fn display_name(&self) -> Rc<str> {
        self.name.clone().unwrap_or_else(|| "<fn>".into())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("ptr", &(self as *const Function as usize))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(expected) => write!(f, "{}", expected),
            Arity::AtLeast(minimum) => write!(f, "at least {}", minimum),
        }
    }
}

/// The host function behind a primitive, shaped by how many arguments it
/// takes. [`Primitive::call`] matches the arguments against the shape, so the
/// functions themselves never see a wrong count.
#[derive(Clone, Copy)]
pub enum PrimitiveFn {
    Nullary(fn() -> Result<Value, EvaluationError>),
    Unary(fn(&Value) -> Result<Value, EvaluationError>),
    Binary(fn(&Value, &Value) -> Result<Value, EvaluationError>),
    /// One or more arguments, split into the first and the rest.
    Fold(fn(&Value, &[Value]) -> Result<Value, EvaluationError>),
    Variadic(fn(&[Value]) -> Result<Value, EvaluationError>),
}

/// A built-in function. Primitives compare unequal to everything, themselves
/// included.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub func: PrimitiveFn,
}

impl Primitive {
    pub fn new(name: &'static str, func: PrimitiveFn) -> Self {
        Self { name, func }
    }

    pub fn arity(&self) -> Arity {
        match self.func {
            PrimitiveFn::Nullary(_) => Arity::Exactly(0),
            PrimitiveFn::Unary(_) => Arity::Exactly(1),
            PrimitiveFn::Binary(_) => Arity::Exactly(2),
            PrimitiveFn::Fold(_) => Arity::AtLeast(1),
            PrimitiveFn::Variadic(_) => Arity::AtLeast(0),
        }
    }

    pub fn call(&self, arguments: &[Value]) -> Result<Value, EvaluationError> {
        match (self.func, arguments) {
            (PrimitiveFn::Nullary(func), []) => func(),
            (PrimitiveFn::Unary(func), [value]) => func(value),
            (PrimitiveFn::Binary(func), [left, right]) => func(left, right),
            (PrimitiveFn::Fold(func), [first, rest @ ..]) => func(first, rest),
            (PrimitiveFn::Variadic(func), arguments) => func(arguments),
            _ => Err(EvaluationError::WrongArgumentCount {
                function: self.name.into(),
                expected: self.arity(),
                actual: arguments.len(),
            }),
        }
    }
}

impl Finalize for Primitive {}
unsafe impl Trace for Primitive {
    unsafe_empty_trace!();
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish()
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("Unbound symbol: {0}")]
    UnboundSymbol(Rc<str>),
    #[error("Called an object that is not a function: {0}")]
    CallNonFunction(Value),
    #[error("Wrong number of arguments for {function}. Expected {expected}, got {actual}")]
    WrongArgumentCount {
        function: Rc<str>,
        expected: Arity,
        actual: usize,
    },
    #[error(
        "Invalid argument for {function}. Expected {expected}, got {} {actual}",
        .actual.type_name()
    )]
    TypeMismatch {
        function: &'static str,
        expected: &'static str,
        actual: Value,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in {0}")]
    IntegerOverflow(&'static str),
    #[error("Malformed {form}: {reason}")]
    MalformedSpecialForm {
        form: &'static str,
        reason: &'static str,
    },
    #[error("Output error: {0}")]
    Io(Rc<str>),
}

impl EvaluationError {
    pub fn type_mismatch(function: &'static str, expected: &'static str, actual: &Value) -> Self {
        EvaluationError::TypeMismatch {
            function,
            expected,
            actual: actual.clone(),
        }
    }

    pub fn malformed(form: &'static str, reason: &'static str) -> Self {
        EvaluationError::MalformedSpecialForm { form, reason }
    }
}
