//! Special forms
//!
//! A fixed table from form name to handler. Handlers receive the unevaluated
//! tail of the call form plus the calling environment, and validate their own
//! argument shape before acting.

use std::rc::Rc;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::diagnostics::SilexError;

use super::env::Env;
use super::eval::{self, EvalResult};
use super::value::{LambdaProc, Value};

pub type SpecialFormFn = fn(&[Value], &Rc<Env>) -> EvalResult;

static FORMS: LazyLock<FxHashMap<&'static str, SpecialFormFn>> = LazyLock::new(|| {
    let mut table: FxHashMap<&'static str, SpecialFormFn> = FxHashMap::default();
    table.insert("define", define_form);
    table.insert("lambda", lambda_form);
    table.insert("quote", quote_form);
    table.insert("quasiquote", quasiquote_form);
    table.insert("unquote", unquote_form);
    table.insert("if", if_form);
    table.insert("cond", cond_form);
    table.insert("and", and_form);
    table.insert("or", or_form);
    table.insert("let", let_form);
    table.insert("begin", begin_form);
    table.insert("set!", set_form);
    table
});

/// Look up a special-form handler by name
pub fn lookup(name: &str) -> Option<SpecialFormFn> {
    FORMS.get(name).copied()
}

fn define_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    if args.len() < 2 {
        return Err(SilexError::syntax("define expects a name and a value"));
    }
    match &args[0] {
        // (define (name p1 p2 ...) body...) is sugar for
        // (define name (lambda (p1 p2 ...) body...))
        Value::Pair(_) => {
            let signature = args[0].to_vector()?;
            let (name_expr, params) = signature
                .split_first()
                .ok_or_else(|| SilexError::syntax("define: empty signature"))?;
            let Value::Symbol(name) = name_expr else {
                return Err(SilexError::syntax(format!(
                    "define: expected a procedure name, found {name_expr}"
                )));
            };
            let mut lambda_args = Vec::with_capacity(args.len());
            lambda_args.push(Value::make_list(params.iter().cloned()));
            lambda_args.extend_from_slice(&args[1..]);
            let lambda = lambda_form(&lambda_args, env)?;
            env.define(Rc::clone(name), lambda);
            Ok(Value::Symbol(Rc::clone(name)))
        }
        Value::Symbol(name) => {
            if args.len() != 2 {
                return Err(SilexError::syntax(
                    "define expects exactly one value expression",
                ));
            }
            let value = eval::eval(&args[1], env)?;
            env.define(Rc::clone(name), value);
            Ok(Value::Symbol(Rc::clone(name)))
        }
        other => Err(SilexError::syntax(format!(
            "define: expected a name or signature, found {other}"
        ))),
    }
}

fn lambda_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    if args.len() < 2 {
        return Err(SilexError::syntax(
            "lambda expects a parameter list and a body",
        ));
    }
    let param_exprs = args[0].to_vector()?;
    let mut params = Vec::with_capacity(param_exprs.len());
    for param in &param_exprs {
        match param {
            Value::Symbol(name) => params.push(Rc::clone(name)),
            other => {
                return Err(SilexError::syntax(format!(
                    "Expected symbol in lambda parameter list, found {other}"
                )));
            }
        }
    }
    Ok(Value::Lambda(Rc::new(LambdaProc {
        params,
        body: args[1..].to_vec(),
        // captured by reference: later definitions in this environment are
        // visible to the closure
        env: Rc::clone(env),
    })))
}

fn quote_form(args: &[Value], _env: &Rc<Env>) -> EvalResult {
    if args.len() != 1 {
        return Err(SilexError::syntax("quote expects a single datum"));
    }
    Ok(args[0].clone())
}

fn quasiquote_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    if args.len() != 1 {
        return Err(SilexError::syntax("quasiquote expects a single template"));
    }
    quasi(&args[0], env)
}

/// Rebuild a quasiquote template, substituting `(unquote x)` with the value
/// of `x` at any nesting depth
fn quasi(template: &Value, env: &Rc<Env>) -> EvalResult {
    if !template.is_pair() || !template.is_list() {
        return Ok(template.clone());
    }
    let items = template.to_vector()?;
    if let Some(Value::Symbol(head)) = items.first() {
        if &**head == "unquote" {
            if items.len() != 2 {
                return Err(SilexError::syntax("unquote expects a single expression"));
            }
            return eval::eval(&items[1], env);
        }
    }
    let mut rebuilt = Vec::with_capacity(items.len());
    for item in &items {
        rebuilt.push(quasi(item, env)?);
    }
    Ok(Value::make_list(rebuilt))
}

fn unquote_form(_args: &[Value], _env: &Rc<Env>) -> EvalResult {
    Err(SilexError::syntax(
        "unquote used outside a quasiquote template",
    ))
}

fn if_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    if args.len() < 2 || args.len() > 3 {
        return Err(SilexError::syntax(
            "if expects a condition, a then-branch, and an optional else-branch",
        ));
    }
    if eval::eval(&args[0], env)?.is_truthy() {
        eval::eval(&args[1], env)
    } else if let Some(else_branch) = args.get(2) {
        eval::eval(else_branch, env)
    } else {
        Ok(Value::Nil)
    }
}

fn cond_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    for (i, clause_expr) in args.iter().enumerate() {
        let clause = clause_expr.to_vector()?;
        let Some((test_expr, body)) = clause.split_first() else {
            return Err(SilexError::syntax("cond clause cannot be empty"));
        };
        let is_else = matches!(test_expr, Value::Symbol(s) if &**s == "else");
        let test = if is_else {
            if i != args.len() - 1 {
                return Err(SilexError::syntax("else clause must appear at the end"));
            }
            Value::Boolean(true)
        } else {
            eval::eval(test_expr, env)?
        };
        if !test.is_truthy() {
            continue;
        }
        // A test-only clause returns the test's value
        let Some((last, init)) = body.split_last() else {
            return Ok(test);
        };
        for expr in init {
            eval::eval(expr, env)?;
        }
        return eval::eval(last, env);
    }
    Ok(Value::Nil)
}

fn and_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    let Some((last, init)) = args.split_last() else {
        return Ok(Value::Boolean(true));
    };
    for expr in init {
        if !eval::eval(expr, env)?.is_truthy() {
            return Ok(Value::Boolean(false));
        }
    }
    let value = eval::eval(last, env)?;
    if value.is_truthy() {
        Ok(value)
    } else {
        Ok(Value::Boolean(false))
    }
}

fn or_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    for expr in args {
        let value = eval::eval(expr, env)?;
        if value.is_truthy() {
            return Ok(value);
        }
    }
    Ok(Value::Boolean(false))
}

fn let_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    // (let ((x 42) (y 56)) body...) is an immediate application of
    // (lambda (x y) body...) to 42 and 56
    if args.len() < 2 {
        return Err(SilexError::syntax("let expects a binding list and a body"));
    }
    let binding_exprs = args[0].to_vector()?;
    let mut names = Vec::with_capacity(binding_exprs.len());
    let mut values = Vec::with_capacity(binding_exprs.len());
    for binding in &binding_exprs {
        let pair = binding.to_vector()?;
        if pair.len() != 2 {
            return Err(SilexError::syntax(format!(
                "let binding must be a (name value) pair, found {binding}"
            )));
        }
        let Value::Symbol(name) = &pair[0] else {
            return Err(SilexError::syntax(format!(
                "Expected let binding name, found {}",
                pair[0]
            )));
        };
        names.push(Rc::clone(name));
        // initializers see the outer environment only: bindings are
        // simultaneous, not sequential
        values.push(eval::eval(&pair[1], env)?);
    }
    let lambda = Value::Lambda(Rc::new(LambdaProc {
        params: names,
        body: args[1..].to_vec(),
        env: Rc::clone(env),
    }));
    eval::apply(&lambda, values, env)
}

fn begin_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    let Some((last, init)) = args.split_last() else {
        return Err(SilexError::syntax("begin expects at least one expression"));
    };
    for expr in init {
        eval::eval(expr, env)?;
    }
    eval::eval(last, env)
}

fn set_form(args: &[Value], env: &Rc<Env>) -> EvalResult {
    if args.len() != 2 {
        return Err(SilexError::syntax("set! expects a name and a value"));
    }
    let Value::Symbol(name) = &args[0] else {
        return Err(SilexError::syntax(format!(
            "set!: expected a symbol, found {}",
            args[0]
        )));
    };
    let value = eval::eval(&args[1], env)?;
    // unlike define, set! never creates a binding
    env.assign(name, value)?;
    Ok(Value::Nil)
}
