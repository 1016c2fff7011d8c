mod arithmetic;
mod io;
mod lists;
mod predicates;
mod relational;

use slip_core::{Environment, Primitive, PrimitiveFn, Value};

pub use io::render_arguments;

/// The table of every built-in function, in no particular order.
pub fn standard_library() -> Vec<Primitive> {
    use PrimitiveFn::{Binary, Fold, Nullary, Unary, Variadic};

    vec![
        // Arithmetic
        Primitive::new("+", Fold(arithmetic::add)),
        Primitive::new("-", Fold(arithmetic::subtract)),
        Primitive::new("*", Fold(arithmetic::multiply)),
        Primitive::new("/", Fold(arithmetic::divide)),
        Primitive::new("mod", Binary(arithmetic::modulo)),
        Primitive::new("rem", Binary(arithmetic::remainder)),
        Primitive::new("inc", Unary(arithmetic::increment)),
        Primitive::new("dec", Unary(arithmetic::decrement)),
        // Relational
        Primitive::new(">", Variadic(relational::greater_than)),
        Primitive::new(">=", Variadic(relational::greater_or_equal)),
        Primitive::new("=", Variadic(relational::equal)),
        Primitive::new("!=", Variadic(relational::not_equal)),
        Primitive::new("<=", Variadic(relational::less_or_equal)),
        Primitive::new("<", Variadic(relational::less_than)),
        // Logic
        Primitive::new("not", Unary(predicates::not)),
        // Predicates
        Primitive::new("nil?", Unary(predicates::is_nil)),
        Primitive::new("zero?", Unary(predicates::is_zero)),
        Primitive::new("pos?", Unary(predicates::is_positive)),
        Primitive::new("neg?", Unary(predicates::is_negative)),
        Primitive::new("even?", Unary(predicates::is_even)),
        Primitive::new("odd?", Unary(predicates::is_odd)),
        Primitive::new("empty?", Unary(predicates::is_empty)),
        Primitive::new("int?", Unary(predicates::is_int)),
        Primitive::new("number?", Unary(predicates::is_number)),
        Primitive::new("double?", Unary(predicates::is_double)),
        Primitive::new("bool?", Unary(predicates::is_bool)),
        Primitive::new("string?", Unary(predicates::is_string)),
        Primitive::new("list?", Unary(predicates::is_list)),
        Primitive::new("symbol?", Unary(predicates::is_symbol)),
        // Lists
        Primitive::new("first", Unary(lists::first)),
        Primitive::new("next", Unary(lists::next)),
        Primitive::new("cons", Binary(lists::cons)),
        // IO
        Primitive::new("print", Variadic(io::print)),
        Primitive::new("println", Variadic(io::println)),
        Primitive::new("newline", Nullary(io::newline)),
    ]
}

/// Binds the standard library, and `nil`, into `environment`.
pub fn register(environment: &Environment) {
    for primitive in standard_library() {
        environment.define(primitive.name, Value::primitive(primitive));
    }
    environment.define("nil", Value::Nil);
}
