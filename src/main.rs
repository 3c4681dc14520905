//! csexp CLI.
//!
//! Reads one S-expression in any of the three forms and re-emits it in
//! the requested forms. Warnings go to stderr; a parse error sets a
//! non-zero exit code.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use csexp::{write_advanced, write_canonical, write_transport, Limits, DEFAULT_LINE_LENGTH};

#[derive(Parser)]
#[command(name = "csexp")]
#[command(about = "Convert S-expressions between canonical, advanced and transport forms")]
#[command(version)]
struct Cli {
    /// Input file (standard input if omitted)
    input: Option<PathBuf>,

    /// Emit the canonical form
    #[arg(short, long)]
    canonical: bool,

    /// Emit the advanced form (the default when no form is selected)
    #[arg(short, long)]
    advanced: bool,

    /// Emit the transport form
    #[arg(short, long)]
    transport: bool,

    /// Line width for advanced and transport output; 0 disables wrapping
    #[arg(short, long, default_value_t = DEFAULT_LINE_LENGTH)]
    width: usize,

    /// Relax the nesting and string-size limits
    #[arg(long)]
    lenient: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("csexp: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let input = match &cli.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let limits = if cli.lenient {
        Limits::lenient()
    } else {
        Limits::standard()
    };
    let parsed = csexp::parse_with_limits(&input, limits)?;
    for warning in &parsed.warnings {
        eprintln!("csexp: warning: {warning}");
    }

    let mut stdout = io::stdout().lock();
    if cli.canonical {
        write_canonical(&parsed.value, &mut stdout)?;
    }
    if cli.transport {
        write_transport(&parsed.value, &mut stdout, cli.width)?;
        stdout.write_all(b"\n")?;
    }
    if cli.advanced || !(cli.canonical || cli.transport) {
        write_advanced(&parsed.value, &mut stdout, cli.width)?;
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
