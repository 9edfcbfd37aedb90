//! Token definitions for the Silex lexer

use crate::common::Span;
use logos::Logos;
use serde::{Deserialize, Serialize};

/// A token with its kind, span, and text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Token kinds recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
#[logos(skip r"#\|([^|]|\|[^#])*\|#")]
pub enum TokenKind {
    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("'")]
    Quote,
    #[token("`")]
    Quasiquote,
    #[token(",")]
    Unquote,
    #[token(".")]
    Dot,

    // Literals
    #[token("#t")]
    #[token("#f")]
    Boolean,
    #[regex(r"[+\-]?[0-9]+(\.[0-9]*)?", priority = 3)]
    #[regex(r"[+\-]?\.[0-9]+", priority = 3)]
    Number,
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    // Identifiers: Scheme symbols, including operator names like `+` or `<=`
    #[regex(
        r"[a-zA-Z!$%&*/:<=>?^_~+\-][a-zA-Z0-9!$%&*/:<=>?^_~+\-.@]*",
        priority = 1
    )]
    Symbol,
}
