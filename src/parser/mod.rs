//! Parser for Silex source
//!
//! A recursive descent parser that produces expression trees (datum `Value`s)
//! from a token stream. Lists become right-nested `Pair` chains terminated by
//! `Nil`; `'x`, `` `x ``, and `,x` desugar to `(quote x)`, `(quasiquote x)`,
//! and `(unquote x)`.

use crate::common::Span;
use crate::diagnostics::SilexError;
use crate::interp::Value;
use crate::lexer::{Token, TokenKind};
use miette::NamedSource;

/// Parse a token stream into every top-level datum, in order
pub fn parse_all(tokens: &[Token], source: &str) -> Result<Vec<Value>, SilexError> {
    let mut parser = Parser::new(tokens, source);
    let mut data = Vec::new();
    while !parser.at_end() {
        data.push(parser.parse_datum()?);
    }
    Ok(data)
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new("<input>", self.source.to_string())
    }

    /// Span to blame when the input ends too early
    fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| t.span)
            .unwrap_or(Span::new(0, 0))
    }

    fn parse_datum(&mut self) -> Result<Value, SilexError> {
        let Some(token) = self.advance() else {
            return Err(SilexError::UnexpectedEof {
                span: self.eof_span().into(),
                src: self.named_source(),
            });
        };
        let (kind, span) = (token.kind, token.span);
        let text = token.text.clone();
        match kind {
            TokenKind::Boolean => Ok(Value::Boolean(text == "#t")),
            TokenKind::Number => {
                text.parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| SilexError::UnrecognizedToken {
                        span: span.into(),
                        src: self.named_source(),
                    })
            }
            TokenKind::Str => Ok(Value::string(&unescape(&text))),
            TokenKind::Symbol => Ok(Value::symbol(&text)),
            TokenKind::Quote => self.parse_quoted("quote", span),
            TokenKind::Quasiquote => self.parse_quoted("quasiquote", span),
            TokenKind::Unquote => self.parse_quoted("unquote", span),
            TokenKind::LParen => self.parse_list_tail(span),
            TokenKind::RParen => Err(SilexError::UnexpectedCloseParen {
                span: span.into(),
                src: self.named_source(),
            }),
            TokenKind::Dot => Err(SilexError::BadDottedTail {
                span: span.into(),
                src: self.named_source(),
            }),
        }
    }

    /// `'x` => `(quote x)` and friends
    fn parse_quoted(&mut self, form: &str, quote_span: Span) -> Result<Value, SilexError> {
        if self.at_end() {
            return Err(SilexError::DanglingQuote {
                span: quote_span.into(),
                src: self.named_source(),
            });
        }
        let datum = self.parse_datum()?;
        Ok(Value::make_list([Value::symbol(form), datum]))
    }

    /// The remainder of a list after its opening paren
    fn parse_list_tail(&mut self, open_span: Span) -> Result<Value, SilexError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SilexError::UnterminatedList {
                        span: open_span.into(),
                        src: self.named_source(),
                    });
                }
                Some(TokenKind::RParen) => {
                    self.advance();
                    return Ok(Value::make_list(items));
                }
                Some(TokenKind::Dot) => {
                    let dot_span = self
                        .advance()
                        .map(|t| t.span)
                        .unwrap_or(open_span);
                    // `.` needs at least one datum on its left and exactly
                    // one on its right
                    if items.is_empty() || self.at_end() {
                        return Err(SilexError::BadDottedTail {
                            span: dot_span.into(),
                            src: self.named_source(),
                        });
                    }
                    let tail = self.parse_datum()?;
                    if self.peek() != Some(TokenKind::RParen) {
                        return Err(SilexError::BadDottedTail {
                            span: dot_span.into(),
                            src: self.named_source(),
                        });
                    }
                    self.advance();
                    let improper = items
                        .into_iter()
                        .rev()
                        .fold(tail, |cdr, car| Value::cons(car, cdr));
                    return Ok(improper);
                }
                Some(_) => items.push(self.parse_datum()?),
            }
        }
    }
}

/// Strip the surrounding quotes and process escape sequences
fn unescape(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}
