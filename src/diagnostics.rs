//! Diagnostic reporting with source locations
//!
//! This module provides rich error messages using miette. Reader errors
//! (lexer/parser) carry a labeled span into the offending source; evaluator
//! errors are produced from expression trees and carry printed forms instead.

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Interpreter diagnostic
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SilexError {
    // === Lexer errors ===
    #[error("Unrecognized character in input")]
    #[diagnostic(code(lex::unrecognized))]
    UnrecognizedToken {
        #[label("cannot lex this")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    // === Parser errors ===
    #[error("Unexpected end of input")]
    #[diagnostic(code(parse::unexpected_eof))]
    UnexpectedEof {
        #[label("expected a datum")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unterminated list")]
    #[diagnostic(code(parse::unterminated_list), help("add a closing `)`"))]
    UnterminatedList {
        #[label("list opened here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected `)`")]
    #[diagnostic(code(parse::unexpected_close))]
    UnexpectedCloseParen {
        #[label("no matching `(`")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Malformed dotted tail")]
    #[diagnostic(
        code(parse::bad_dotted_tail),
        help("`.` must be followed by exactly one datum before `)`")
    )]
    BadDottedTail {
        #[label("dot here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Expected a datum after quote")]
    #[diagnostic(code(parse::dangling_quote))]
    DanglingQuote {
        #[label("quote here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    // === Evaluator errors ===
    #[error("Bad syntax: {message}")]
    #[diagnostic(code(eval::syntax))]
    Syntax { message: String },

    #[error("Unbound variable `{name}`")]
    #[diagnostic(
        code(eval::unbound_variable),
        help("did you mean to `define` it first?")
    )]
    UnboundVariable { name: String },

    #[error("Type mismatch: expected {expected}, found `{found}`")]
    #[diagnostic(code(eval::type_mismatch))]
    Type { expected: String, found: String },

    #[error("Procedure expected {expected} arguments, got {found}")]
    #[diagnostic(code(eval::arity))]
    Arity { expected: String, found: usize },

    #[error("Not a procedure: `{found}`")]
    #[diagnostic(code(eval::not_a_procedure))]
    NotAProcedure { found: String },

    #[error("Malformed list: `{found}`")]
    #[diagnostic(
        code(eval::malformed_list),
        help("call forms must be proper lists terminated by `()`")
    )]
    MalformedList { found: String },

    #[error("Evaluating `()` is prohibited")]
    #[diagnostic(code(eval::empty_application))]
    EvalNil,

    #[error("{message}")]
    #[diagnostic(code(eval::raised))]
    Raised { message: String },
}

impl SilexError {
    pub fn syntax(message: impl Into<String>) -> Self {
        SilexError::Syntax {
            message: message.into(),
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        SilexError::UnboundVariable { name: name.into() }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        SilexError::Type {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn arity(expected: impl Into<String>, found: usize) -> Self {
        SilexError::Arity {
            expected: expected.into(),
            found,
        }
    }
}
