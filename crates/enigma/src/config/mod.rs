//! Machine configurations and setup lines in their text form.
//!
//! A configuration names the alphabet, the slot geometry and every rotor
//! available to the machine:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!  5 3
//!  I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!  Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!  B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ```
//!
//! The type token is `M` (moving, followed by its notch symbols), `N`
//! (fixed) or `R` (reflector). A rotor's cycles may continue on the
//! following lines.
//!
//! A setup line selects rotors, settings and plugboard for the messages
//! that follow it:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! ```

mod scan;

use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::alphabet::Alphabet;
use crate::error::{ConfigurationError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

use scan::Scanner;

/// Kind of rotor named by a configuration's type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RotorType {
    /// `M`: advanced by a pawl.
    Moving,
    /// `N`: never moves.
    Fixed,
    /// `R`: reflector.
    Reflector,
}

impl RotorType {
    /// The type letter used in configuration text.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Moving => 'M',
            Self::Fixed => 'N',
            Self::Reflector => 'R',
        }
    }
}

/// One rotor descriptor from a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotorSpec {
    /// Rotor name, unique within a configuration.
    pub name: String,
    /// Rotor kind.
    pub kind: RotorType,
    /// Notch symbols; empty unless `kind` is [`RotorType::Moving`].
    pub notches: String,
    /// Wiring in cycle notation.
    pub cycles: String,
}

impl RotorSpec {
    /// Builds the rotor over `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for malformed cycles or notches.
    pub fn build(&self, alphabet: &Arc<Alphabet>) -> Result<Rotor> {
        let wiring = Permutation::new(&self.cycles, alphabet.clone())?;
        Ok(match self.kind {
            RotorType::Moving => Rotor::moving(self.name.clone(), wiring, &self.notches)?,
            RotorType::Fixed => Rotor::fixed(self.name.clone(), wiring),
            RotorType::Reflector => Rotor::reflector(self.name.clone(), wiring),
        })
    }
}

/// A parsed machine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Alphabet symbols, in order.
    pub alphabet: String,
    /// Number of rotor slots.
    pub num_rotors: usize,
    /// Number of pawls.
    pub pawls: usize,
    /// Every available rotor.
    pub rotors: Vec<RotorSpec>,
}

impl MachineConfig {
    /// Builds the alphabet, every rotor and the machine.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for an invalid alphabet, rotor or
    /// geometry.
    pub fn build(&self) -> Result<Machine> {
        let alphabet = Arc::new(Alphabet::new(&self.alphabet)?);
        let rotors = self
            .rotors
            .iter()
            .map(|spec| spec.build(&alphabet))
            .collect::<Result<Vec<_>>>()?;
        Machine::new(alphabet, self.num_rotors, self.pawls, rotors)
    }
}

impl FromStr for MachineConfig {
    type Err = ConfigurationError;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
        let alphabet = lines
            .next()
            .map(str::trim)
            .ok_or_else(|| malformed("missing alphabet line"))?
            .to_owned();
        let body = lines.collect::<Vec<_>>().join("\n");
        let mut scan = Scanner::new(&body);

        let num_rotors = number(scan.word(), "number of rotor slots")?;
        let pawls = number(scan.word(), "number of pawls")?;

        let mut rotors = Vec::new();
        while !scan.is_empty() {
            let name = scan
                .word()
                .ok_or_else(|| malformed("cycles without a rotor name"))?;
            let type_token = scan
                .word()
                .ok_or_else(|| malformed(format!("rotor {name} has no type")))?;
            let mut chars = type_token.chars();
            let kind = match chars.next() {
                Some('M') => RotorType::Moving,
                Some('N') => RotorType::Fixed,
                Some('R') => RotorType::Reflector,
                _ => {
                    let what = format!("rotor {name} has unknown type {type_token:?}");
                    return Err(malformed(what));
                }
            };
            let notches: String = chars.collect();
            if kind != RotorType::Moving && !notches.is_empty() {
                return Err(malformed(format!("non-moving rotor {name} has notches")));
            }
            rotors.push(RotorSpec {
                name: name.to_owned(),
                kind,
                notches,
                cycles: scan.groups(),
            });
        }

        Ok(Self {
            alphabet,
            num_rotors,
            pawls,
            rotors,
        })
    }
}

fn malformed(what: impl Into<String>) -> ConfigurationError {
    ConfigurationError::MalformedConfig(what.into())
}

fn number(token: Option<&str>, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| malformed(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| malformed(format!("{what} {token:?} is not a number")))
}

/// A parsed setup line: `* <rotor names> <settings> [<plugboard cycles>]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetupLine {
    /// Rotor names, reflector first.
    pub rotors: Vec<String>,
    /// One setting symbol per non-reflector slot.
    pub settings: String,
    /// Plugboard in cycle notation; empty for no plugboard.
    pub plugboard: String,
}

impl SetupLine {
    /// True if `line` is a setup line rather than a message.
    #[must_use]
    pub fn is_setup(line: &str) -> bool {
        line.trim_start().starts_with('*')
    }

    /// Parses a setup line for a machine with `num_rotors` slots.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingMarker`] if the line does not start
    ///   with `*`.
    /// - [`ConfigurationError::MissingRotorNames`] if fewer than
    ///   `num_rotors` names follow the marker.
    /// - [`ConfigurationError::MissingSetting`] if no settings token follows
    ///   the names.
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let body = line
            .trim_start()
            .strip_prefix('*')
            .ok_or(ConfigurationError::MissingMarker)?;
        let mut scan = Scanner::new(body);

        let mut rotors = Vec::with_capacity(num_rotors);
        while rotors.len() < num_rotors {
            let Some(name) = scan.word() else {
                return Err(ConfigurationError::MissingRotorNames {
                    expected: num_rotors,
                    found: rotors.len(),
                });
            };
            rotors.push(name.to_owned());
        }
        let settings = scan
            .word()
            .ok_or(ConfigurationError::MissingSetting)?
            .to_owned();

        Ok(Self {
            rotors,
            settings,
            plugboard: scan.remainder().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";

    const CONFIG: &str = "
        ABCDEFGHIJKLMNOPQRSTUVWXYZ
         5 3
         I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
         II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
         Beta N    (ALBEVFCYODJWUGNMQTZSKPR)
                   (HIX)
         B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
                   (RX) (SZ) (TV)
    ";

    fn parsed() -> MachineConfig {
        match CONFIG.parse() {
            Ok(config) => config,
            Err(e) => unreachable!("test configuration: {e}"),
        }
    }

    #[test]
    fn test_parse_header() {
        let config = parsed();
        assert_eq!(config.alphabet, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(config.num_rotors, 5);
        assert_eq!(config.pawls, 3);
        assert_eq!(config.rotors.len(), 4);
    }

    #[test]
    fn test_parse_rotors() {
        let config = parsed();
        assert_eq!(
            config.rotors[0],
            RotorSpec {
                name: "I".into(),
                kind: RotorType::Moving,
                notches: "Q".into(),
                cycles: String::from(ROTOR_I),
            }
        );
        assert_eq!(config.rotors[2].kind, RotorType::Fixed);
        assert_eq!(config.rotors[2].cycles, "(ALBEVFCYODJWUGNMQTZSKPR) (HIX)");
        assert_eq!(config.rotors[3].kind, RotorType::Reflector);
        assert!(config.rotors[3].cycles.ends_with("(RX) (SZ) (TV)"));
    }

    #[test]
    fn test_build() {
        let machine = parsed().build();
        let Ok(m) = machine else {
            unreachable!("test configuration builds");
        };
        assert_eq!((m.num_rotors(), m.num_pawls()), (5, 3));
        let reflector = m.rotor_named("B");
        assert!(reflector.is_some_and(Rotor::reflects));
        assert!(reflector.is_some_and(|r| r.permutation().derangement()));
    }

    #[test]
    fn test_rejects_bad_header() {
        assert_eq!(
            "".parse::<MachineConfig>(),
            Err(malformed("missing alphabet line"))
        );
        assert!(matches!(
            "ABC\n x 1".parse::<MachineConfig>(),
            Err(ConfigurationError::MalformedConfig(_))
        ));
        assert!(matches!(
            "ABC\n 3".parse::<MachineConfig>(),
            Err(ConfigurationError::MalformedConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_type() {
        assert!(matches!(
            "ABC\n 2 1\n X Q (AB)".parse::<MachineConfig>(),
            Err(ConfigurationError::MalformedConfig(_))
        ));
        assert!(matches!(
            "ABC\n 2 1\n X NA (AB)".parse::<MachineConfig>(),
            Err(ConfigurationError::MalformedConfig(_))
        ));
        assert!(matches!(
            "ABC\n 2 1\n X".parse::<MachineConfig>(),
            Err(ConfigurationError::MalformedConfig(_))
        ));
    }

    #[test]
    fn test_build_rejects_repeated_cycle_symbol() {
        let text = "ABC\n 2 1\n R R (AB) (BC)\n X MA (ABC)";
        let config = text.parse::<MachineConfig>();
        assert!(config.is_ok());
        assert_eq!(
            config.and_then(|c| c.build()).err(),
            Some(ConfigurationError::RepeatedCycleSymbol { symbol: 'B' })
        );
    }

    #[test]
    fn test_setup_line() {
        let line = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";
        let rotors = ["B", "Beta", "III", "IV", "I"];
        assert_eq!(
            SetupLine::parse(line, 5),
            Ok(SetupLine {
                rotors: rotors.map(String::from).to_vec(),
                settings: "AXLE".into(),
                plugboard: "(HQ) (EX) (IP) (TR) (BY)".into(),
            })
        );
    }

    #[test]
    fn test_setup_line_without_plugboard() {
        let setup = SetupLine::parse("  *B I II III AAA", 4);
        assert_eq!(setup.as_ref().map(|s| s.settings.as_str()), Ok("AAA"));
        assert!(setup.is_ok_and(|s| s.plugboard.is_empty()));
    }

    #[test]
    fn test_setup_line_errors() {
        assert_eq!(
            SetupLine::parse("B I II III AAA", 4),
            Err(ConfigurationError::MissingMarker)
        );
        assert_eq!(
            SetupLine::parse("* B I (AB)", 4),
            Err(ConfigurationError::MissingRotorNames {
                expected: 4,
                found: 2,
            })
        );
        assert_eq!(
            SetupLine::parse("* B I II III", 4),
            Err(ConfigurationError::MissingSetting)
        );
        assert_eq!(
            SetupLine::parse("* B I II III (AB)", 4),
            Err(ConfigurationError::MissingSetting)
        );
    }

    #[test]
    fn test_is_setup() {
        assert!(SetupLine::is_setup("* B I"));
        assert!(SetupLine::is_setup("   *"));
        assert!(!SetupLine::is_setup("HELLO"));
        assert!(!SetupLine::is_setup(""));
    }

    #[test]
    fn test_type_letters() {
        assert_eq!(RotorType::Moving.letter(), 'M');
        assert_eq!(RotorType::Fixed.letter(), 'N');
        assert_eq!(RotorType::Reflector.letter(), 'R');
    }
}
