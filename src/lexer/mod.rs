//! Lexer for Silex source text
//!
//! Produces a flat token stream from raw input. Whitespace, `;` line
//! comments, and `#| ... |#` block comments are skipped.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::SilexError;
use logos::Logos;
use miette::NamedSource;

/// Lex source text into a token stream
pub fn lex(source: &str) -> Result<Vec<Token>, SilexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                return Err(SilexError::UnrecognizedToken {
                    span: span.into(),
                    src: NamedSource::new("<input>", source.to_string()),
                });
            }
        }
    }

    Ok(tokens)
}
