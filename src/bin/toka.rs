//! Prints the tokens of C source files.
//!
//! Each file is tokenized with the C rule set, one `[line,column]: kind: text` line per token.
//! The log output is controlled by the `RUST_LOG` environment variable.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, ValueEnum};
use log::debug;
use toka::{
    c_rules::{CRuleConfig, CRules, CTokenKind},
    Result, ScanContext, TokaError, TokaErrorKind,
};

/// How the input files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Read the file lazily while scanning.
    Stream,
    /// Read the whole file into memory before scanning.
    Text,
}

/// How the tokens are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One `[line,column]: kind: text` line per token.
    Plain,
    /// A JSON array of tokens.
    Json,
}

#[derive(Parser)]
#[command(name = "toka", about = "Prints the tokens of C source files", version)]
struct Cli {
    /// JSON file with the rule set configuration. The built-in C tables are used if omitted.
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// How the input files are read.
    #[arg(short, long, value_enum, default_value_t = Mode::Stream)]
    mode: Mode,

    /// How the tokens are printed.
    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// The files to tokenize.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let rules = match load_rules(cli.config.as_deref()) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    let mut context = ScanContext::new();
    if let Err(e) = context.register_set(&rules) {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let failed = run(
        &mut context,
        &cli.files,
        cli.mode,
        cli.format,
        &mut out,
        &mut io::stderr(),
    );
    let flushed = out.flush();
    match (failed, flushed) {
        (Ok(0), Ok(())) => {}
        (Ok(_), Ok(())) => process::exit(1),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn load_rules(config: Option<&Path>) -> Result<CRules> {
    match config {
        Some(path) => {
            debug!("Loading rule set configuration from {}", path.display());
            CRules::new(&CRuleConfig::from_reader(File::open(path)?)?)
        }
        None => Ok(CRules::default()),
    }
}

/// Tokenizes the files one after the other and prints their tokens to `out`.
/// A failing file is reported on `errors` and does not stop the run.
/// Returns the number of files that failed.
fn run<W: Write, E: Write>(
    context: &mut ScanContext<CTokenKind>,
    files: &[PathBuf],
    mode: Mode,
    format: Format,
    out: &mut W,
    errors: &mut E,
) -> io::Result<usize> {
    let mut failed = 0;
    for path in files {
        // Keep the rules, drop the tokens of the previous file.
        context.reset(false);
        let result = File::open(path)
            .map_err(TokaError::from)
            .and_then(|file| tokenize(context, file, mode))
            .and_then(|_| print_tokens(context, format, out));
        if let Err(e) = result {
            writeln!(errors, "{}: {}", path.display(), e)?;
            failed += 1;
        }
    }
    Ok(failed)
}

fn tokenize<R: Read>(
    context: &mut ScanContext<CTokenKind>,
    mut input: R,
    mode: Mode,
) -> Result<()> {
    debug!("Tokenizing in {:?} mode", mode);
    match mode {
        Mode::Stream => context.scan_reader(BufReader::new(input)),
        Mode::Text => {
            let mut bytes = Vec::new();
            input.read_to_end(&mut bytes)?;
            context.scan_str(&decode(bytes)?)
        }
    }
}

// Invalid input is reported with the offset of the first bad byte, as in stream mode.
fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        TokaError::new(TokaErrorKind::InvalidUtf8(e.utf8_error().valid_up_to()))
    })
}

fn print_tokens<W: Write>(
    context: &ScanContext<CTokenKind>,
    format: Format,
    out: &mut W,
) -> Result<()> {
    match format {
        Format::Plain => {
            for token in context.tokens() {
                writeln!(out, "{}", token)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, context.tokens().as_slice())
                .map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
