use std::rc::Rc;

use slip_core::{Arity, Environment, EvaluationError, Function, List, Value};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    Def,
    Defn,
    Fn,
    If,
    Let,
    Do,
    And,
    Or,
}

impl SpecialForm {
    pub fn from_name(name: &str) -> Option<SpecialForm> {
        match name {
            "quote" => Some(SpecialForm::Quote),
            "def" => Some(SpecialForm::Def),
            "defn" => Some(SpecialForm::Defn),
            "fn" => Some(SpecialForm::Fn),
            "if" => Some(SpecialForm::If),
            "let" => Some(SpecialForm::Let),
            "do" => Some(SpecialForm::Do),
            "and" => Some(SpecialForm::And),
            "or" => Some(SpecialForm::Or),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::Def => "def",
            SpecialForm::Defn => "defn",
            SpecialForm::Fn => "fn",
            SpecialForm::If => "if",
            SpecialForm::Let => "let",
            SpecialForm::Do => "do",
            SpecialForm::And => "and",
            SpecialForm::Or => "or",
        }
    }
}

/// Evaluates a single expression.
///
/// Symbols resolve through the environment chain, non-empty lists are special
/// forms or applications, and everything else (the empty list included)
/// evaluates to itself.
pub fn eval(value: &Value, environment: &Environment) -> Result<Value, EvaluationError> {
    match value {
        Value::Symbol(name) => environment
            .resolve(name)
            .ok_or_else(|| EvaluationError::UnboundSymbol(name.clone())),
        Value::List(List::Cons(cell)) => eval_list(&cell.head, &cell.tail, environment),
        _ => Ok(value.clone()),
    }
}

fn eval_list(
    head: &Value,
    operands: &List,
    environment: &Environment,
) -> Result<Value, EvaluationError> {
    if let Some(form) = head.as_symbol().and_then(|name| SpecialForm::from_name(name)) {
        return eval_special_form(form, operands, environment);
    }

    let function = eval(head, environment)?;
    if !function.is_callable() {
        return Err(EvaluationError::CallNonFunction(function));
    }
    let arguments = eval_expressions(operands, environment)?;
    apply(&function, &arguments)
}

fn eval_expressions(
    expressions: &List,
    environment: &Environment,
) -> Result<Vec<Value>, EvaluationError> {
    let mut result = Vec::new();
    for expression in expressions {
        result.push(eval(expression, environment)?);
    }
    Ok(result)
}

/// Evaluates `body` in order and returns the last value, or nil when empty.
pub fn eval_body(body: &List, environment: &Environment) -> Result<Value, EvaluationError> {
    let mut result = Value::Nil;
    for expression in body {
        result = eval(expression, environment)?;
    }
    Ok(result)
}

/// Applies an already evaluated function to already evaluated arguments.
pub fn apply(function: &Value, arguments: &[Value]) -> Result<Value, EvaluationError> {
    match function {
        Value::Primitive(primitive) => {
            trace!(
                function = primitive.name,
                arguments = arguments.len(),
                "applying primitive"
            );
            primitive.call(arguments)
        }
        Value::Function(function) => apply_function(function, arguments),
        _ => Err(EvaluationError::CallNonFunction(function.clone())),
    }
}

fn apply_function(function: &Function, arguments: &[Value]) -> Result<Value, EvaluationError> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::WrongArgumentCount {
            function: function.display_name(),
            expected: Arity::Exactly(function.parameters.len()),
            actual: arguments.len(),
        });
    }
    trace!(
        function = %function.display_name(),
        arguments = arguments.len(),
        "applying function"
    );

    let environment = Environment::new_enclosed(&function.env);
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        environment.define(parameter.clone(), argument.clone());
    }
    eval_body(&function.body, &environment)
}

fn eval_special_form(
    form: SpecialForm,
    operands: &List,
    environment: &Environment,
) -> Result<Value, EvaluationError> {
    match form {
        SpecialForm::Quote => match operands.iter().collect::<Vec<_>>().as_slice() {
            [quoted] => Ok((*quoted).clone()),
            _ => Err(EvaluationError::malformed(
                "quote",
                "expected exactly one operand",
            )),
        },
        SpecialForm::Def => match operands.iter().collect::<Vec<_>>().as_slice() {
            [name, expression] => {
                let name = symbol_operand(form, name)?;
                let value = eval(expression, environment)?;
                debug!(%name, value = %value, "def");
                environment.define(name, value);
                Ok(Value::Nil)
            }
            _ => Err(EvaluationError::malformed(
                "def",
                "expected a symbol and an expression",
            )),
        },
        SpecialForm::Defn => {
            let name = operands
                .first()
                .ok_or_else(|| EvaluationError::malformed("defn", "expected a name"))?;
            let name = symbol_operand(form, name)?;
            let definition = operands.rest();
            let function = make_function(form, Some(name.clone()), &definition, environment)?;
            debug!(%name, "defn");
            environment.define(name, function);
            Ok(Value::Nil)
        }
        SpecialForm::Fn => make_function(form, None, operands, environment),
        SpecialForm::If => match operands.iter().collect::<Vec<_>>().as_slice() {
            [test, then] => {
                if eval(test, environment)?.is_truthy() {
                    eval(then, environment)
                } else {
                    Ok(Value::Nil)
                }
            }
            [test, then, otherwise] => {
                if eval(test, environment)?.is_truthy() {
                    eval(then, environment)
                } else {
                    eval(otherwise, environment)
                }
            }
            _ => Err(EvaluationError::malformed(
                "if",
                "expected a test, a consequence and an optional alternative",
            )),
        },
        SpecialForm::Let => eval_let(operands, environment),
        SpecialForm::Do => eval_body(operands, environment),
        SpecialForm::And => {
            let mut last = Value::boolean(true);
            for expression in operands {
                last = eval(expression, environment)?;
                if !last.is_truthy() {
                    return Ok(last);
                }
            }
            Ok(last)
        }
        SpecialForm::Or => {
            let mut last = Value::Nil;
            for expression in operands {
                last = eval(expression, environment)?;
                if last.is_truthy() {
                    return Ok(last);
                }
            }
            Ok(last)
        }
    }
}

fn symbol_operand(form: SpecialForm, operand: &Value) -> Result<Rc<str>, EvaluationError> {
    match operand {
        Value::Symbol(name) => Ok(name.clone()),
        _ => Err(EvaluationError::malformed(
            form.name(),
            "expected a symbol to bind",
        )),
    }
}

fn parameters(
    form: SpecialForm,
    operand: Option<&Value>,
) -> Result<Vec<Rc<str>>, EvaluationError> {
    let malformed =
        || EvaluationError::malformed(form.name(), "parameters must be a list of symbols");
    let list = operand.and_then(Value::as_list).ok_or_else(malformed)?;
    list.iter()
        .map(|parameter| parameter.as_symbol().cloned().ok_or_else(malformed))
        .collect()
}

/// Builds a closure from `(params...) body...`, capturing `environment`.
fn make_function(
    form: SpecialForm,
    name: Option<Rc<str>>,
    definition: &List,
    environment: &Environment,
) -> Result<Value, EvaluationError> {
    let parameters = parameters(form, definition.first())?;
    Ok(Value::function(
        name,
        parameters,
        definition.rest(),
        environment.clone(),
    ))
}

/// `(let ((name expr)...) body...)` evaluates every expr in the outer
/// environment, then applies a closure over the names to the results.
fn eval_let(operands: &List, environment: &Environment) -> Result<Value, EvaluationError> {
    let malformed = || {
        EvaluationError::malformed("let", "bindings must be a list of (symbol expression) pairs")
    };
    let bindings = operands
        .first()
        .and_then(Value::as_list)
        .ok_or_else(malformed)?;

    let mut names = Vec::new();
    let mut values = Vec::new();
    for binding in bindings {
        let pair = binding.as_list().ok_or_else(malformed)?;
        match pair.iter().collect::<Vec<_>>().as_slice() {
            [Value::Symbol(name), expression] => {
                names.push(name.clone());
                values.push(eval(expression, environment)?);
            }
            _ => return Err(malformed()),
        }
    }

    let function = Function {
        name: None,
        parameters: names,
        body: operands.rest(),
        env: environment.clone(),
    };
    apply_function(&function, &values)
}
