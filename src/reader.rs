//! Balanced-input detection for the REPL
//!
//! The REPL keeps accepting continuation lines while the accumulated input
//! has more `(` than `)`. Parens inside strings and comments do not count.

use crate::diagnostics::SilexError;
use miette::NamedSource;

/// How many `(` remain unclosed in `input`.
///
/// Returns an error on a stray `)` or an unmatched `"`. An open block
/// comment counts as unfinished input so the caller keeps reading.
pub fn balance(input: &str) -> Result<i32, SilexError> {
    let mut depth: i32 = 0;
    let mut chars = input.char_indices().peekable();
    let mut in_string = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some((offset, c)) = chars.next() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            if c == '|' && chars.peek().is_some_and(|&(_, next)| next == '#') {
                chars.next();
                in_block_comment = false;
            }
            continue;
        }
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            ';' => in_line_comment = true,
            '#' if chars.peek().is_some_and(|&(_, next)| next == '|') => {
                chars.next();
                in_block_comment = true;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SilexError::UnexpectedCloseParen {
                        span: (offset..offset + 1).into(),
                        src: NamedSource::new("<input>", input.to_string()),
                    });
                }
            }
            _ => {}
        }
    }

    if in_string {
        return Err(SilexError::syntax("Unmatched `\"` in input"));
    }
    if in_block_comment {
        // keep reading until the comment closes
        return Ok(depth.max(1));
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_input_is_complete() {
        assert_eq!(balance("(+ 1 2)").unwrap(), 0);
        assert_eq!(balance("42").unwrap(), 0);
        assert_eq!(balance("").unwrap(), 0);
    }

    #[test]
    fn open_parens_request_continuation() {
        assert_eq!(balance("(define (f x)").unwrap(), 2);
        assert_eq!(balance("(let ((x 1))").unwrap(), 1);
    }

    #[test]
    fn parens_in_strings_and_comments_do_not_count() {
        assert_eq!(balance("\"(((\"").unwrap(), 0);
        assert_eq!(balance("(f) ; comment with (parens").unwrap(), 0);
        assert_eq!(balance("#| ((( |# ()").unwrap(), 0);
    }

    #[test]
    fn stray_close_paren_is_an_error() {
        assert!(balance(")").is_err());
        assert!(balance("(+ 1 2))").is_err());
    }

    #[test]
    fn open_block_comment_requests_continuation() {
        assert!(balance("#| still open").unwrap() >= 1);
    }

    #[test]
    fn unmatched_string_quote_is_an_error() {
        assert!(balance("\"half").is_err());
    }
}
