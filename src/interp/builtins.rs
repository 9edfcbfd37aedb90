//! Builtin procedures
//!
//! The injectable name-to-callable table the global environment is seeded
//! with. Builtins receive already-evaluated arguments; the ones that need to
//! re-enter the evaluator (`map`, `filter`, `reduce`, `apply`, `eval`) get
//! the calling environment as context.

use std::io::Write;
use std::rc::Rc;

use crate::diagnostics::SilexError;

use super::env::Env;
use super::eval;
use super::value::{BuiltinFn, Value};

/// The full builtin table, in registration order
pub fn table() -> Vec<(&'static str, BuiltinFn)> {
    vec![
        // calc
        ("+", add as BuiltinFn),
        ("-", subtract),
        ("*", multiply),
        ("/", divide),
        ("abs", abs),
        ("expt", expt),
        ("quotient", quotient),
        ("remainder", remainder),
        ("modulo", modulo),
        // pair and list
        ("car", car),
        ("cdr", cdr),
        ("cons", cons),
        ("length", length),
        ("list", list),
        ("append", append),
        ("map", map),
        ("filter", filter),
        ("reduce", reduce),
        // type predicates
        ("atom?", is_atom),
        ("boolean?", is_boolean),
        ("integer?", is_integer),
        ("list?", is_list),
        ("number?", is_number),
        ("null?", is_null),
        ("pair?", is_pair),
        ("procedure?", is_procedure),
        ("string?", is_string),
        ("symbol?", is_symbol),
        // core
        ("apply", apply),
        ("eval", eval_builtin),
        ("display", display),
        ("newline", newline),
        ("displayln", displayln),
        ("print", print),
        ("error", error),
        ("exit", exit),
        // comparison
        ("eq?", is_eq),
        ("equal?", is_equal),
        ("not", not),
        ("=", num_equal),
        ("<", lesser),
        (">", greater),
        ("<=", lesser_or_equal),
        (">=", greater_or_equal),
        ("zero?", is_zero),
        ("odd?", is_odd),
        ("even?", is_even),
    ]
}

fn check_args(args: &[Value], min: usize, max: Option<usize>) -> Result<(), SilexError> {
    let count = args.len();
    if count >= min && max.is_none_or(|m| count <= m) {
        return Ok(());
    }
    let expected = match max {
        Some(m) if m == min => format!("exactly {min}"),
        Some(m) => format!("between {min} and {m}"),
        None => format!("at least {min}"),
    };
    Err(SilexError::arity(expected, count))
}

fn numbers(args: &[Value]) -> Result<Vec<f64>, SilexError> {
    args.iter().map(Value::as_number).collect()
}

// === calc ===

fn add(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    Ok(Value::Number(numbers(args)?.iter().sum()))
}

fn subtract(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(2))?;
    let nums = numbers(args)?;
    match nums[..] {
        [x] => Ok(Value::Number(-x)),
        [a, b] => Ok(Value::Number(a - b)),
        _ => unreachable!("checked above"),
    }
}

fn multiply(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    Ok(Value::Number(numbers(args)?.iter().product()))
}

fn divide(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(2))?;
    let nums = numbers(args)?;
    match nums[..] {
        [x] => Ok(Value::Number(1.0 / x)),
        [a, b] => Ok(Value::Number(a / b)),
        _ => unreachable!("checked above"),
    }
}

fn abs(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Number(args[0].as_number()?.abs()))
}

fn expt(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Number(args[0].as_number()?.powf(args[1].as_number()?)))
}

fn quotient(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Number(
        (args[0].as_number()? / args[1].as_number()?).trunc(),
    ))
}

fn remainder(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    let (a, b) = (args[0].as_number()?, args[1].as_number()?);
    // truncated division: result takes the sign of the dividend
    Ok(Value::Number(a - b * (a / b).trunc()))
}

fn modulo(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    let (a, b) = (args[0].as_number()?, args[1].as_number()?);
    // floored division: result takes the sign of the divisor
    Ok(Value::Number(a - b * (a / b).floor()))
}

// === pair and list ===

fn car(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    match &args[0] {
        Value::Pair(p) => Ok(p.car.clone()),
        other => Err(SilexError::type_mismatch("a pair", other.to_string())),
    }
}

fn cdr(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    match &args[0] {
        Value::Pair(p) => Ok(p.cdr.clone()),
        other => Err(SilexError::type_mismatch("a pair", other.to_string())),
    }
}

fn cons(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

fn length(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Number(args[0].to_vector()?.len() as f64))
}

fn list(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    Ok(Value::make_list(args.to_vec()))
}

fn append(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    let mut appended = Vec::new();
    for arg in args {
        appended.extend(arg.to_vector()?);
    }
    Ok(Value::make_list(appended))
}

fn map(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    if !args[0].is_procedure() {
        return Err(SilexError::NotAProcedure {
            found: args[0].to_string(),
        });
    }
    let mut mapped = Vec::new();
    for item in args[1].to_vector()? {
        mapped.push(eval::apply(&args[0], vec![item], env)?);
    }
    Ok(Value::make_list(mapped))
}

fn filter(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    if !args[0].is_procedure() {
        return Err(SilexError::NotAProcedure {
            found: args[0].to_string(),
        });
    }
    let mut kept = Vec::new();
    for item in args[1].to_vector()? {
        if eval::apply(&args[0], vec![item.clone()], env)?.is_truthy() {
            kept.push(item);
        }
    }
    Ok(Value::make_list(kept))
}

fn reduce(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    if !args[0].is_procedure() {
        return Err(SilexError::NotAProcedure {
            found: args[0].to_string(),
        });
    }
    let items = args[1].to_vector()?;
    let Some((first, rest)) = items.split_first() else {
        return Err(SilexError::type_mismatch(
            "a non-empty list",
            args[1].to_string(),
        ));
    };
    let mut acc = first.clone();
    for item in rest {
        acc = eval::apply(&args[0], vec![acc, item.clone()], env)?;
    }
    Ok(acc)
}

// === type predicates ===

fn is_atom(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    let v = &args[0];
    Ok(Value::Boolean(
        v.is_nil() || v.is_self_evaluating() || v.is_symbol(),
    ))
}

fn is_boolean(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(matches!(args[0], Value::Boolean(_))))
}

fn is_integer(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(
        matches!(args[0], Value::Number(n) if n.fract() == 0.0),
    ))
}

fn is_list(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].is_list()))
}

fn is_number(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(matches!(args[0], Value::Number(_))))
}

fn is_null(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].is_nil()))
}

fn is_pair(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].is_pair()))
}

fn is_procedure(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].is_procedure()))
}

fn is_string(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(matches!(args[0], Value::Str(_))))
}

fn is_symbol(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].is_symbol()))
}

// === core ===

fn apply(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    let proc_args = args[1].to_vector()?;
    eval::apply(&args[0], proc_args, env)
}

fn eval_builtin(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    eval::eval(&args[0], env)
}

fn display(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    for arg in args {
        // strings print raw, everything else in canonical form
        match arg {
            Value::Str(s) => print!("{s}"),
            other => print!("{other}"),
        }
    }
    Ok(Value::Nil)
}

fn newline(_args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    println!();
    Ok(Value::Nil)
}

fn displayln(args: &[Value], env: &Rc<Env>) -> Result<Value, SilexError> {
    display(args, env)?;
    newline(&[], env)
}

fn print(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    for arg in args {
        println!("{arg}");
    }
    Ok(Value::Nil)
}

fn error(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    let message = args
        .first()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "error".to_string());
    Err(SilexError::Raised { message })
}

fn exit(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 0, Some(1))?;
    let code = match args.first() {
        Some(v) => v.as_number()? as i32,
        None => 0,
    };
    // pending output must land before the process dies
    std::io::stdout().flush().ok();
    std::process::exit(code);
}

// === comparison ===

fn is_eq(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    let same = match (&args[0], &args[1]) {
        (Value::Boolean(_), Value::Boolean(_))
        | (Value::Number(_), Value::Number(_))
        | (Value::Symbol(_), Value::Symbol(_))
        | (Value::Nil, Value::Nil) => args[0] == args[1],
        // identity, not structure
        (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
        (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
        (Value::Builtin(_) | Value::Lambda(_), Value::Builtin(_) | Value::Lambda(_)) => {
            args[0] == args[1]
        }
        _ => false,
    };
    Ok(Value::Boolean(same))
}

fn is_equal(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0] == args[1]))
}

fn not(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(!args[0].is_truthy()))
}

fn num_equal(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0].as_number()? == args[1].as_number()?))
}

fn lesser(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0].as_number()? < args[1].as_number()?))
}

fn greater(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0].as_number()? > args[1].as_number()?))
}

fn lesser_or_equal(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0].as_number()? <= args[1].as_number()?))
}

fn greater_or_equal(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 2, Some(2))?;
    Ok(Value::Boolean(args[0].as_number()? >= args[1].as_number()?))
}

fn is_zero(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    Ok(Value::Boolean(args[0].as_number()? == 0.0))
}

fn is_odd(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    let n = args[0].as_number()?;
    Ok(Value::Boolean(n.fract() == 0.0 && n % 2.0 != 0.0))
}

fn is_even(args: &[Value], _env: &Rc<Env>) -> Result<Value, SilexError> {
    check_args(args, 1, Some(1))?;
    let n = args[0].as_number()?;
    Ok(Value::Boolean(n.fract() == 0.0 && n % 2.0 == 0.0))
}
