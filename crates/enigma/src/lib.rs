//! Enigma: a rotor cipher machine simulator.
//!
//! The machine is a substitution cipher whose mapping changes with every
//! symbol: an ordered stack of rotors is advanced mechanically before each
//! conversion, and the signal passes through a plugboard, right to left
//! through the rotors, back through a reflector, left to right through the
//! rotors again, and through the plugboard once more.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`Alphabet`] | Ordered symbols numbered `0..size` |
//! | [`Permutation`] | Bijection on indices, written in cycle notation |
//! | [`Rotor`] | Wiring permutation shifted by a setting; fixed, moving or reflecting |
//! | [`Machine`] | Rotor slots, plugboard, stepping rule and signal path |
//! | [`MachineConfig`], [`SetupLine`] | Text forms of configurations and setups |
//! | [`session`] | Line-by-line message processing |
//!
//! # Stepping
//!
//! Before each symbol the fast (rightmost) rotor advances. A pawl rotor at
//! one of its notches advances together with its left neighbour, if that
//! neighbour can move, which reproduces the historical double step of the
//! middle rotor:
//!
//! ```text
//! ADU -> ADV -> AEW -> BFX -> BFY
//! ```
//!
//! # Example
//!
//! ```
//! use enigma::MachineConfig;
//!
//! let config: MachineConfig = "
//!     ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!     5 3
//!     I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!     III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!     IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//!     Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!     B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ".parse().unwrap();
//!
//! let mut machine = config.build().unwrap();
//! machine.insert_rotors(&["B", "Beta", "III", "IV", "I"]).unwrap();
//! machine.set_rotors("AXLE").unwrap();
//! machine.set_plugboard(
//!     enigma::Permutation::new("(HQ) (EX) (IP) (TR) (BY)", machine.alphabet().clone()).unwrap(),
//! ).unwrap();
//!
//! assert_eq!(machine.convert_str("FROMHISSHOULDERHIAWATHA").unwrap(), "QVPQSOKOILPUBKJZPISFXDW");
//! ```
//!
//! # Diagnostics
//!
//! Each conversion can be observed through a [`DiagnosticSink`] passed to
//! [`Machine::with_diagnostics`]. [`LogSink`] writes the path of every
//! symbol through the `log` facade at trace level.

// Core data types (alphabet, ring helpers)
mod core;

// Cycle-notation permutations
pub mod permutation;

// Rotor kinds and settings
pub mod rotor;

// Slots, stepping and signal path
pub mod machine;

// Observers of the signal path
pub mod diagnostics;

// Configuration and setup-line text
pub mod config;

// Message streams
pub mod session;

mod error;

pub use core::alphabet;
pub use core::ring;

pub use config::{MachineConfig, RotorSpec, RotorType, SetupLine};
pub use core::alphabet::Alphabet;
pub use diagnostics::{DiagnosticSink, LogSink, NullSink, Recorder, TraceEvent};
pub use error::{ConfigurationError, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorId, RotorKind};

/// Prelude module for convenient imports.
///
/// ```
/// use enigma::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{MachineConfig, RotorSpec, RotorType, SetupLine};
    pub use crate::core::alphabet::Alphabet;
    pub use crate::diagnostics::{DiagnosticSink, LogSink, NullSink, Recorder, TraceEvent};
    pub use crate::error::{ConfigurationError, Result};
    pub use crate::machine::Machine;
    pub use crate::permutation::Permutation;
    pub use crate::rotor::{Rotor, RotorId, RotorKind};
    pub use crate::session::{group_five, process, Session};
}
