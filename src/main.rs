//! Silex CLI
//!
//! Main entry point for the `silex` command.

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "silex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A tree-walking interpreter for a small Scheme-like language", long_about = None)]
struct Cli {
    /// Source file to run; starts a REPL when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Drop into a REPL after running FILE
    #[arg(short, long)]
    interactive: bool,

    /// Dump an intermediate representation instead of evaluating
    #[arg(long, value_enum)]
    emit: Option<EmitType>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum EmitType {
    /// Lexed tokens (JSON)
    Tokens,
    /// Parsed datum forms
    Ast,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let env = silex::interp::global_env();

    match cli.file {
        Some(file) => {
            run_file(&file, cli.emit, &env)?;
            if cli.interactive {
                silex::repl::run(&env)?;
            }
            Ok(())
        }
        None => silex::repl::run(&env),
    }
}

fn run_file(
    input: &std::path::Path,
    emit: Option<EmitType>,
    env: &std::rc::Rc<silex::Env>,
) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;

    let tokens = silex::lexer::lex(&source)?;
    tracing::debug!("Lexed {} tokens", tokens.len());

    if emit == Some(EmitType::Tokens) {
        let json = serde_json::to_string_pretty(&tokens)
            .map_err(|e| miette::miette!("Failed to serialize tokens: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    let data = silex::parser::parse_all(&tokens, &source)?;
    tracing::debug!("Parsed {} top-level forms", data.len());

    if emit == Some(EmitType::Ast) {
        for datum in &data {
            println!("{}", datum);
        }
        return Ok(());
    }

    // evaluate top-level forms in order against the shared global frame
    for expr in &data {
        silex::interp::eval(expr, env)?;
    }

    Ok(())
}
