//! Processing a stream of setup lines and messages.
//!
//! Input is read line by line:
//!
//! - a line starting with `*` reconfigures the machine,
//! - an empty line is copied through,
//! - any other line is a message: its whitespace is removed and the
//!   converted text is written in groups of five symbols.

use crate::config::SetupLine;
use crate::error::{ConfigurationError, Result};
use crate::machine::Machine;

/// Line-at-a-time driver over one machine.
///
/// Each call to [`line`](Self::line) either succeeds with the output for
/// that line or fails without producing any, so a caller that writes
/// outputs as they arrive keeps everything before the first error.
#[derive(Debug)]
pub struct Session<'m> {
    machine: &'m mut Machine,
    configured: bool,
}

impl<'m> Session<'m> {
    /// A session that has not yet seen a setup line.
    pub fn new(machine: &'m mut Machine) -> Self {
        Self {
            machine,
            configured: false,
        }
    }

    /// The machine being driven.
    #[must_use]
    pub fn machine(&self) -> &Machine {
        &*self.machine
    }

    /// Processes one input line. Returns the output line, or `None` for a
    /// setup line, which produces no output.
    ///
    /// # Errors
    ///
    /// - Any error from parsing or applying a setup line.
    /// - [`ConfigurationError::MissingMarker`] for a message before the
    ///   first setup line.
    /// - [`ConfigurationError::UnknownSymbol`] for a message symbol outside
    ///   the alphabet.
    pub fn line(&mut self, line: &str) -> Result<Option<String>> {
        if SetupLine::is_setup(line) {
            let setup = SetupLine::parse(line, self.machine.num_rotors())?;
            self.machine.apply_setup(&setup)?;
            self.configured = true;
            return Ok(None);
        }
        if line.trim().is_empty() {
            return Ok(Some(String::new()));
        }
        if !self.configured {
            return Err(ConfigurationError::MissingMarker);
        }
        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = self.machine.convert_str(&message)?;
        Ok(Some(group_five(&converted)))
    }
}

/// Processes all of `input`, returning the output with one line per
/// message or blank input line.
///
/// # Errors
///
/// The first error of [`Session::line`]; output for earlier lines is lost.
/// Use [`Session`] directly to keep it.
pub fn process(machine: &mut Machine, input: &str) -> Result<String> {
    let mut session = Session::new(machine);
    let mut output = String::new();
    for line in input.lines() {
        if let Some(out) = session.line(line)? {
            output.push_str(&out);
            output.push('\n');
        }
    }
    Ok(output)
}

/// Splits `text` into groups of five symbols separated by single spaces;
/// the last group may be shorter.
///
/// # Example
///
/// ```
/// use enigma::session::group_five;
///
/// assert_eq!(group_five("QVPQSOKOILPUBKJZPISFXDW"), "QVPQS OKOIL PUBKJ ZPISF XDW");
/// assert_eq!(group_five("ABCDE"), "ABCDE");
/// assert_eq!(group_five(""), "");
/// ```
#[must_use]
pub fn group_five(text: &str) -> String {
    let mut grouped = String::with_capacity(text.len() + text.len() / 5);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % 5 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}
