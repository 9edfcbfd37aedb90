//! Interactive read-eval-print loop
//!
//! One persistent global environment for the whole session; errors are
//! reported and the loop continues.

use std::rc::Rc;

use miette::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::diagnostics::SilexError;
use crate::interp::{self, Env};
use crate::{lexer, parser, reader};

pub fn run(env: &Rc<Env>) -> Result<()> {
    println!("Silex {}", crate::VERSION);
    println!("Press Ctrl-D to exit");

    let mut rl =
        DefaultEditor::new().map_err(|e| miette::miette!("failed to start line editor: {e}"))?;

    loop {
        let mut input = match rl.readline(">>> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(miette::miette!("readline failed: {e}")),
        };

        // accumulate continuation lines until parens balance
        loop {
            match reader::balance(&input) {
                Ok(depth) if depth > 0 => match rl.readline("... ") {
                    Ok(more) => {
                        input.push('\n');
                        input.push_str(&more);
                    }
                    Err(ReadlineError::Interrupted) => {
                        input.clear();
                        break;
                    }
                    Err(ReadlineError::Eof) => return Ok(()),
                    Err(e) => return Err(miette::miette!("readline failed: {e}")),
                },
                Ok(_) => break,
                Err(e) => {
                    eprintln!("{:?}", miette::Report::new(e));
                    input.clear();
                    break;
                }
            }
        }

        if input.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(&input).ok();

        // report and continue: one bad expression must not kill the session
        if let Err(e) = eval_input(&input, env) {
            eprintln!("{:?}", miette::Report::new(e));
        }
    }

    Ok(())
}

/// Evaluate every expression in `input`, echoing each result
fn eval_input(input: &str, env: &Rc<Env>) -> Result<(), SilexError> {
    let tokens = lexer::lex(input)?;
    let data = parser::parse_all(&tokens, input)?;
    for expr in &data {
        let value = interp::eval(expr, env)?;
        println!("{value}");
    }
    Ok(())
}
