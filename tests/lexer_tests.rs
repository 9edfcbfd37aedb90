//! Lexer tests

use silex::lexer::{TokenKind, lex};

#[test]
fn test_lex_empty() {
    let tokens = lex("").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_lex_whitespace() {
    let tokens = lex("   \t\n  ").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_lex_delimiters() {
    let tokens = lex("( ) ' ` , .").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LParen);
    assert_eq!(tokens[1].kind, TokenKind::RParen);
    assert_eq!(tokens[2].kind, TokenKind::Quote);
    assert_eq!(tokens[3].kind, TokenKind::Quasiquote);
    assert_eq!(tokens[4].kind, TokenKind::Unquote);
    assert_eq!(tokens[5].kind, TokenKind::Dot);
}

#[test]
fn test_lex_literals() {
    let source = r#"42 -3.14 .5 "hello" #t #f"#;
    let tokens = lex(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "42");

    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].text, "-3.14");

    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].text, ".5");

    assert_eq!(tokens[3].kind, TokenKind::Str);
    assert_eq!(tokens[3].text, "\"hello\"");

    assert_eq!(tokens[4].kind, TokenKind::Boolean);
    assert_eq!(tokens[4].text, "#t");

    assert_eq!(tokens[5].kind, TokenKind::Boolean);
    assert_eq!(tokens[5].text, "#f");
}

#[test]
fn test_lex_symbols() {
    let source = "foo list->vector null? set! <= + -";
    let tokens = lex(source).unwrap();

    for token in &tokens {
        assert_eq!(token.kind, TokenKind::Symbol);
    }
    assert_eq!(tokens[0].text, "foo");
    assert_eq!(tokens[1].text, "list->vector");
    assert_eq!(tokens[2].text, "null?");
    assert_eq!(tokens[3].text, "set!");
    assert_eq!(tokens[4].text, "<=");
    assert_eq!(tokens[5].text, "+");
    assert_eq!(tokens[6].text, "-");
}

#[test]
fn test_lex_signed_number_vs_operator() {
    // `+1` is a number, a lone `+` is a symbol
    let tokens = lex("+1 +").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
}

#[test]
fn test_lex_simple_form() {
    let tokens = lex("(+ 1 2)").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LParen);
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].text, "+");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[4].kind, TokenKind::RParen);
}

#[test]
fn test_lex_quote_sugar() {
    let tokens = lex("'(1 2) `(a ,b)").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Quote);
    assert_eq!(tokens[1].kind, TokenKind::LParen);
    assert_eq!(tokens[5].kind, TokenKind::Quasiquote);
    assert_eq!(tokens[8].kind, TokenKind::Unquote);
}

#[test]
fn test_lex_line_comment() {
    let source = "(f) ; this is a comment\n(g)";
    let tokens = lex(source).unwrap();

    // Comments should be skipped
    let symbol_count = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Symbol)
        .count();
    assert_eq!(symbol_count, 2);
}

#[test]
fn test_lex_block_comment() {
    let source = "(f #| comment |# x)";
    let tokens = lex(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LParen);
    assert_eq!(tokens[1].text, "f");
    assert_eq!(tokens[2].text, "x");
    assert_eq!(tokens[3].kind, TokenKind::RParen);
}

#[test]
fn test_lex_string_escapes() {
    let tokens = lex(r#""with \"inner\" quotes""#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Str);
}

#[test]
fn test_lex_spans() {
    let tokens = lex("(foo)").unwrap();
    assert_eq!(tokens[0].span.start, 0);
    assert_eq!(tokens[1].span.start, 1);
    assert_eq!(tokens[1].span.end, 4);
}

#[test]
fn test_lex_unrecognized_character() {
    assert!(lex("(f [x])").is_err());
}
