//! `uson` CLI — parse, inspect, and validate USON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse USON to pretty-printed JSON (stdin → stdout)
//! echo 'a: 1, b: [2 3]' | uson parse
//!
//! # Merge top-level items into one object
//! uson parse --object -i config.uson -o config.json
//!
//! # Dump the raw parse tree
//! uson tokenize -i config.uson
//!
//! # Validate only; exits non-zero with line:column on error
//! uson check -i config.uson
//! ```
//!
//! Set `RUST_LOG=debug` or pass `-v` for parser diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::process;
use uson_core::{ParseOptions, UsonError, DEFAULT_MAX_DEPTH};

#[derive(Parser)]
#[command(name = "uson", version, about = "USON notation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse USON and print the result as JSON
    Parse {
        #[command(flatten)]
        files: IoArgs,
        /// Merge top-level items into a single object
        #[arg(long)]
        object: bool,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Print the raw parse tree as JSON
    Tokenize {
        #[command(flatten)]
        files: IoArgs,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Check that the input is valid USON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct LimitArgs {
    /// Maximum nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Reject inputs larger than this many bytes
    #[arg(long)]
    max_bytes: Option<usize>,
}

impl LimitArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .max_depth(self.max_depth)
            .max_input_len(self.max_bytes)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            files,
            object,
            compact,
            limits,
        } => {
            let text = read_input(files.input.as_deref())?;
            let options = limits.options().object_mode(object);
            let value = uson_core::parse_with(&text, &options)
                .map_err(|e| describe(&e, files.input.as_deref()))
                .context("Failed to parse USON")?;
            let json = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            write_output(files.output.as_deref(), &json)?;
        }
        Commands::Tokenize { files, limits } => {
            let text = read_input(files.input.as_deref())?;
            let document = uson_core::tokenize_with(&text, &limits.options())
                .map_err(|e| describe(&e, files.input.as_deref()))
                .context("Failed to tokenize USON")?;
            let json = serde_json::to_string_pretty(&document)?;
            write_output(files.output.as_deref(), &json)?;
        }
        Commands::Check { input, limits } => {
            let text = read_input(input.as_deref())?;
            match uson_core::tokenize_with(&text, &limits.options()) {
                Ok(document) => {
                    log::debug!("{} top-level items", document.len());
                    println!("ok");
                }
                Err(e) => {
                    eprintln!("{}", describe(&e, input.as_deref()));
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Render an error with its source location, e.g. `config.uson:3:7: Expected ...`.
fn describe(err: &UsonError, path: Option<&str>) -> anyhow::Error {
    let source = path.unwrap_or("<stdin>");
    match err {
        UsonError::Syntax(e) => anyhow::anyhow!("{source}:{}:{}: {}", e.line, e.column, e.message),
        other => anyhow::anyhow!("{source}: {other}"),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
