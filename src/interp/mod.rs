//! Tree-walking interpreter
//!
//! Evaluates parsed expression trees against lexically-scoped environments.

pub mod builtins;
pub mod env;
pub mod eval;
pub mod forms;
pub mod value;

pub use env::Env;
pub use eval::{EvalResult, apply, eval, eval_list};
pub use value::Value;

use std::rc::Rc;

/// Build a global environment seeded with the full builtin table
pub fn global_env() -> Rc<Env> {
    Env::global(builtins::table())
}
