//! Runtime values for the interpreter

use std::fmt;
use std::rc::Rc;

use crate::diagnostics::SilexError;

use super::env::Env;

/// A native procedure callable from Silex code.
///
/// Receives the already-evaluated argument list plus the environment the call
/// happened in, so builtins like `map`, `apply`, and `eval` can re-enter the
/// evaluator.
pub type BuiltinFn = fn(&[Value], &Rc<Env>) -> Result<Value, SilexError>;

/// A user-defined procedure with its captured environment
pub struct LambdaProc {
    pub params: Vec<Rc<str>>,
    /// Unevaluated body expressions, evaluated in sequence at call time
    pub body: Vec<Value>,
    /// Defining environment, captured by reference
    pub env: Rc<Env>,
}

/// A cons cell
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// Runtime value
#[derive(Clone)]
pub enum Value {
    /// Boolean `#t` / `#f`
    Boolean(bool),
    /// Double-precision number
    Number(f64),
    /// String
    Str(Rc<str>),
    /// Symbol (identifier)
    Symbol(Rc<str>),
    /// The empty list `()`
    Nil,
    /// Cons cell; chains of pairs ending in `Nil` form proper lists
    Pair(Rc<Pair>),
    /// Builtin procedure
    Builtin(BuiltinFn),
    /// User-defined procedure
    Lambda(Rc<LambdaProc>),
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Rc::from(name))
    }

    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Rc::new(Pair { car, cdr }))
    }

    /// Build a right-nested chain of pairs terminated by `Nil`,
    /// preserving input order
    pub fn make_list(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, head| Value::cons(head, tail))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Nil => "nil",
            Value::Pair(_) => "pair",
            Value::Builtin(_) | Value::Lambda(_) => "procedure",
        }
    }

    /// Numbers, strings, and booleans evaluate to themselves
    pub fn is_self_evaluating(&self) -> bool {
        matches!(
            self,
            Value::Number(_) | Value::Str(_) | Value::Boolean(_)
        )
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Lambda(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// Proper-list check: the cdr chain must terminate in `Nil`
    pub fn is_list(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return true,
                Value::Pair(p) => cur = &p.cdr,
                _ => return false,
            }
        }
    }

    /// Falsity is exactly `#f`; every other value is true
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    pub fn as_number(&self) -> Result<f64, SilexError> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(SilexError::type_mismatch("a number", self.to_string())),
        }
    }

    pub fn as_bool(&self) -> Result<bool, SilexError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(SilexError::type_mismatch("a boolean", self.to_string())),
        }
    }

    pub fn as_str(&self) -> Result<Rc<str>, SilexError> {
        match self {
            Value::Str(s) => Ok(Rc::clone(s)),
            _ => Err(SilexError::type_mismatch("a string", self.to_string())),
        }
    }

    pub fn as_symbol(&self) -> Result<Rc<str>, SilexError> {
        match self {
            Value::Symbol(s) => Ok(Rc::clone(s)),
            _ => Err(SilexError::type_mismatch("a symbol", self.to_string())),
        }
    }

    /// Flatten a proper-list chain into a vector, in order
    pub fn to_vector(&self) -> Result<Vec<Value>, SilexError> {
        let mut items = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return Ok(items),
                Value::Pair(p) => {
                    items.push(p.car.clone());
                    cur = &p.cdr;
                }
                _ => {
                    return Err(SilexError::MalformedList {
                        found: self.to_string(),
                    });
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Number(n) => {
                // Integral values print without a decimal point
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Nil => write!(f, "()"),
            Value::Pair(p) => {
                write!(f, "({}", p.car)?;
                let mut cur = &p.cdr;
                loop {
                    match cur {
                        Value::Nil => break,
                        Value::Pair(next) => {
                            write!(f, " {}", next.car)?;
                            cur = &next.cdr;
                        }
                        tail => {
                            write!(f, " . {}", tail)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Builtin(_) | Value::Lambda(_) => write!(f, "#<procedure>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Pair(a), Value::Pair(b)) => a.car == b.car && a.cdr == b.cdr,
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
