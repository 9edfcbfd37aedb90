//! Lexically-scoped environment frames
//!
//! A frame owns its symbol table and shares its parent. Frames are
//! reference-counted because a closure keeps its defining frame alive past
//! the call that created it; parent links only ever point outward, so the
//! chain is acyclic.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::diagnostics::SilexError;

use super::value::{BuiltinFn, Value};

/// One scope level: a symbol table plus a link to the enclosing scope
pub struct Env {
    bindings: RefCell<IndexMap<Rc<str>, Value>>,
    parent: Option<Rc<Env>>,
}

impl Env {
    /// Build the global frame, pre-populated from a builtin table
    pub fn global<I>(builtins: I) -> Rc<Env>
    where
        I: IntoIterator<Item = (&'static str, BuiltinFn)>,
    {
        let env = Env {
            bindings: RefCell::new(IndexMap::new()),
            parent: None,
        };
        for (name, func) in builtins {
            env.bindings
                .borrow_mut()
                .insert(Rc::from(name), Value::Builtin(func));
        }
        Rc::new(env)
    }

    /// Build a frame binding parameters to argument values under `parent`.
    /// Parameter and argument counts must match exactly.
    pub fn child(
        parent: &Rc<Env>,
        params: &[Rc<str>],
        args: Vec<Value>,
    ) -> Result<Rc<Env>, SilexError> {
        if params.len() != args.len() {
            return Err(SilexError::arity(params.len().to_string(), args.len()));
        }
        let child = Env {
            bindings: RefCell::new(IndexMap::new()),
            parent: Some(Rc::clone(parent)),
        };
        for (param, arg) in params.iter().zip(args) {
            child.bindings.borrow_mut().insert(Rc::clone(param), arg);
        }
        Ok(Rc::new(child))
    }

    /// Insert or overwrite a binding in this frame only
    pub fn define(&self, name: Rc<str>, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Resolve a symbol outward through the parent chain
    pub fn lookup(&self, name: &str) -> Result<Value, SilexError> {
        let mut env = self;
        loop {
            if let Some(value) = env.bindings.borrow().get(name) {
                return Ok(value.clone());
            }
            match &env.parent {
                Some(parent) => env = parent.as_ref(),
                None => return Err(SilexError::unbound(name)),
            }
        }
    }

    /// Mutate an existing binding in whichever frame holds it.
    /// Unlike `define`, this never creates a binding.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), SilexError> {
        let mut env = self;
        loop {
            let mut bindings = env.bindings.borrow_mut();
            if let Some(slot) = bindings.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            drop(bindings);
            match &env.parent {
                Some(parent) => env = parent.as_ref(),
                None => return Err(SilexError::unbound(name)),
            }
        }
    }
}
