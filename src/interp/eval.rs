//! The eval/apply protocol
//!
//! Evaluation is a pure recursive walk over expression trees; the only state
//! threaded through is the environment chain. Special forms receive their
//! tail arguments unevaluated and control evaluation order themselves.

use std::rc::Rc;

use crate::diagnostics::SilexError;

use super::env::Env;
use super::forms;
use super::value::Value;

pub type EvalResult = Result<Value, SilexError>;

/// Evaluate one expression against an environment
pub fn eval(expr: &Value, env: &Rc<Env>) -> EvalResult {
    match expr {
        // Self-evaluating atoms
        Value::Number(_) | Value::Str(_) | Value::Boolean(_) => Ok(expr.clone()),

        Value::Nil => Err(SilexError::EvalNil),

        Value::Symbol(name) => env.lookup(name),

        Value::Pair(pair) if expr.is_list() => {
            let mut head = pair.car.clone();
            // The operator position may itself be a computed expression,
            // e.g. ((if (> b 0) + -) a b)
            if head.is_list() {
                head = eval(&head, env)?;
            }
            match &head {
                Value::Symbol(name) => {
                    if let Some(form) = forms::lookup(name) {
                        // The handler, not eval, decides which of the
                        // unevaluated tail arguments to evaluate and when.
                        let tail = pair.cdr.to_vector()?;
                        form(&tail, env)
                    } else {
                        let proc = env.lookup(name)?;
                        let args = eval_list(&pair.cdr, env)?;
                        apply(&proc, args, env)
                    }
                }
                proc if proc.is_procedure() => {
                    let args = eval_list(&pair.cdr, env)?;
                    apply(proc, args, env)
                }
                other => Err(SilexError::NotAProcedure {
                    found: other.to_string(),
                }),
            }
        }

        // An improper list used as a call form
        Value::Pair(_) => Err(SilexError::MalformedList {
            found: expr.to_string(),
        }),

        // Procedure values evaluate to themselves; they cannot be produced
        // by the parser but can reach here through the `eval` builtin.
        Value::Builtin(_) | Value::Lambda(_) => Ok(expr.clone()),
    }
}

/// Evaluate every element of a proper list, left to right
pub fn eval_list(list: &Value, env: &Rc<Env>) -> Result<Vec<Value>, SilexError> {
    list.to_vector()?.iter().map(|e| eval(e, env)).collect()
}

/// Apply a procedure to already-evaluated arguments
pub fn apply(proc: &Value, args: Vec<Value>, env: &Rc<Env>) -> EvalResult {
    match proc {
        Value::Builtin(func) => func(&args, env),
        Value::Lambda(lambda) => {
            let call_env = Env::child(&lambda.env, &lambda.params, args)?;
            let Some((last, init)) = lambda.body.split_last() else {
                return Ok(Value::Nil);
            };
            for expr in init {
                eval(expr, &call_env)?;
            }
            eval(last, &call_env)
        }
        _ => Err(SilexError::NotAProcedure {
            found: proc.to_string(),
        }),
    }
}
