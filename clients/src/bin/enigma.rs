//! `enigma`: enciphers and deciphers message files with a rotor machine.
//!
//! Reads a machine configuration, then processes the input line by line:
//! setup lines (`* B Beta III IV I AXLE (HQ) (EX)`) reconfigure the
//! machine, blank lines are copied, and every other line is converted and
//! written in groups of five symbols.
//!
//! **Usage:**
//! ```
//! enigma [--verbose] [--describe] <CONFIG> [INPUT] [OUTPUT]
//! ```
//!
//! INPUT defaults to stdin and OUTPUT to stdout. On error, output for the
//! lines before the failing one has already been written.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use enigma::session::Session;
use enigma::{LogSink, MachineConfig};

/// Run messages through a configured rotor machine.
#[derive(Parser)]
#[command(
    name = "enigma",
    about = "Encipher or decipher messages with a rotor cipher machine"
)]
struct Args {
    /// Machine configuration file.
    config: PathBuf,

    /// Message file (default: stdin).
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    output: Option<PathBuf>,

    /// Log the path of every symbol through the machine.
    #[arg(short, long)]
    verbose: bool,

    /// Print the parsed configuration as JSON and exit.
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = args.config.display();
    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("reading configuration {config_path}"))?;
    let config: MachineConfig = text
        .parse()
        .with_context(|| format!("parsing configuration {config_path}"))?;

    if args.describe {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut machine = config
        .build()
        .with_context(|| format!("building machine from {config_path}"))?;
    if args.verbose {
        machine = machine.with_diagnostics(LogSink::new());
    }

    let reader = open_input(args.input.as_deref())?;
    let mut writer = open_output(args.output.as_deref())?;
    let result = run(&mut Session::new(&mut machine), reader, &mut writer);
    writer.flush().context("flushing output")?;
    result
}

fn init_logging(verbose: bool) {
    let default = if verbose { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    let Some(path) = path else {
        return Ok(Box::new(BufReader::new(io::stdin())));
    };
    let file = File::open(path)
        .with_context(|| format!("opening input {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    };
    let file = File::create(path)
        .with_context(|| format!("creating output {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run(session: &mut Session<'_>, reader: impl BufRead, writer: &mut impl Write) -> Result<()> {
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("reading input")?;
        let converted = session
            .line(&line)
            .with_context(|| format!("input line {}", number + 1))?;
        if let Some(out) = converted {
            writeln!(writer, "{out}").context("writing output")?;
        }
    }
    log::debug!("final settings {}", session.machine().settings());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    const CONFIG: &str = "
        ABCDEFGHIJKLMNOPQRSTUVWXYZ
        4 3
        B R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
        I MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
        II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
        III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    ";

    const TWO_MESSAGES: &str = "* B I II III AAA\nHELLO WORLD\n\nAAAAA\n";
    const BAD_SECOND_SETUP: &str = "* B I II III AAA\nHELLOWORLD\n* B I II IX AAA\nAAAAA\n";

    fn convert(input: &str) -> (Result<()>, String) {
        let config: MachineConfig = CONFIG.parse().expect("test configuration parses");
        let mut machine = config.build().expect("test configuration builds");
        let mut output = Vec::new();
        let result = run(
            &mut Session::new(&mut machine),
            input.as_bytes(),
            &mut output,
        );
        (result, String::from_utf8(output).expect("output is UTF-8"))
    }

    #[test]
    fn test_run_writes_grouped_lines() {
        let (result, output) = convert(TWO_MESSAGES);
        assert!(result.is_ok());
        assert_eq!(output, "DCSBU QBMEH\n\nNOJVR\n");
    }

    #[test]
    fn test_run_keeps_output_before_error() {
        let (result, output) = convert(BAD_SECOND_SETUP);
        assert_eq!(output, "DCSBU QBMEH\n");
        let err = result.expect_err("unknown rotor fails the run");
        let message = format!("{err:#}");
        assert!(message.starts_with("input line 3"), "{message}");
        assert!(message.contains("unknown rotor IX"), "{message}");
    }

    #[test]
    fn test_run_rejects_message_before_setup() {
        let (result, output) = convert("HELLO\n");
        assert!(output.is_empty());
        assert!(result.is_err());
    }
}
