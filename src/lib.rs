//! Silex: a tree-walking interpreter for a small Scheme-like language
//!
//! Lexical scoping with closure capture, a fixed special-form table
//! (`define`, `lambda`, `if`, `cond`, `and`/`or`, `let`, `begin`,
//! `quote`/`quasiquote`/`unquote`, `set!`), and an injectable builtin table.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → Expression trees → Evaluator → Value
//! ```
//!
//! # Example
//!
//! ```scheme
//! (define (make-counter)
//!   (define n 0)
//!   (lambda () (set! n (+ n 1)) n))
//!
//! (define tick (make-counter))
//! (tick) ; => 1
//! (tick) ; => 2
//! ```

pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod repl;

// Re-exports for convenience
pub use diagnostics::SilexError;
pub use interp::{Env, Value};

use std::rc::Rc;

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source text into its top-level datum trees
pub fn parse_str(source: &str) -> Result<Vec<Value>, SilexError> {
    let tokens = lexer::lex(source)?;
    parser::parse_all(&tokens, source)
}

/// Evaluate every expression in `source` against `env`, returning the last
/// result
pub fn eval_str(source: &str, env: &Rc<Env>) -> Result<Value, SilexError> {
    let mut result = Value::Nil;
    for expr in &parse_str(source)? {
        result = interp::eval(expr, env)?;
    }
    Ok(result)
}

/// Interpret source code in a fresh global environment
pub fn interpret(source: &str) -> Result<Value, SilexError> {
    eval_str(source, &interp::global_env())
}
