//! Configuration errors.
//!
//! Every failure in this crate is a configuration failure: the machine is a
//! deterministic offline computation, so nothing is transient or retried.
//! Errors are raised while a configuration or setup line is being applied,
//! before any symbol of the affected message is converted.

use thiserror::Error;

/// Error raised when a machine, rotor, permutation or message is
/// inconsistent with the configuration it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A symbol appears twice in an alphabet.
    #[error("duplicate symbol '{symbol}' in alphabet")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// An alphabet contains a character reserved by the text formats.
    #[error("symbol '{symbol}' is reserved and cannot be part of an alphabet")]
    ReservedSymbol {
        /// The reserved character.
        symbol: char,
    },

    /// A symbol is not a member of the machine's alphabet.
    #[error("symbol '{symbol}' is not in the alphabet")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
    },

    /// Cycle notation with a missing or extra parenthesis.
    #[error("unbalanced parentheses in cycle notation at position {position}")]
    UnbalancedCycle {
        /// Character offset of the first unbalanced parenthesis.
        position: usize,
    },

    /// Cycle notation with symbols outside any parenthesised group.
    #[error("symbol '{symbol}' outside of a cycle at position {position}")]
    StrayText {
        /// The stray symbol.
        symbol: char,
        /// Character offset of the stray symbol.
        position: usize,
    },

    /// A symbol that occurs in more than one place in cycle notation.
    #[error("symbol '{symbol}' appears in more than one cycle")]
    RepeatedCycleSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// Rotor count or pawl count out of range.
    #[error("invalid geometry: {num_rotors} rotor slots with {pawls} pawls")]
    InvalidGeometry {
        /// Requested number of rotor slots.
        num_rotors: usize,
        /// Requested number of pawls.
        pawls: usize,
    },

    /// A rotor whose wiring was built over a different alphabet.
    #[error("rotor {name} uses a different alphabet than the machine")]
    AlphabetMismatch {
        /// Name of the rotor.
        name: String,
    },

    /// A moving rotor declared without notches.
    #[error("moving rotor {name} has no notches")]
    MissingNotches {
        /// Name of the rotor.
        name: String,
    },

    /// A rotor name that is not in the machine's catalog.
    #[error("unknown rotor {name}")]
    UnknownRotor {
        /// The unknown name.
        name: String,
    },

    /// A rotor name that occurs twice in a catalog or a slot assignment.
    #[error("duplicate rotor {name}")]
    DuplicateRotor {
        /// The repeated name.
        name: String,
    },

    /// Wrong number of rotor names for the machine's slots.
    #[error("expected {expected} rotors, found {found}")]
    WrongRotorCount {
        /// Number of slots.
        expected: usize,
        /// Number of names supplied.
        found: usize,
    },

    /// The rotor in slot 0 does not reflect.
    #[error("rotor {name} in the reflector slot does not reflect")]
    ReflectorSlot {
        /// Name of the rotor placed in slot 0.
        name: String,
    },

    /// A reflector placed in any slot other than 0.
    #[error("reflector {name} placed in slot {slot}")]
    MisplacedReflector {
        /// Name of the reflector.
        name: String,
        /// The slot it was placed in.
        slot: usize,
    },

    /// A rotor whose ability to rotate disagrees with its pawl slot.
    #[error("rotor {name} in slot {slot} does not match the pawl arrangement")]
    PawlMismatch {
        /// Name of the rotor.
        name: String,
        /// The slot it was placed in.
        slot: usize,
    },

    /// A settings string of the wrong length.
    #[error("setting {setting:?} has {found} symbols, expected {expected}")]
    SettingLength {
        /// The settings text.
        setting: String,
        /// Number of non-reflector slots.
        expected: usize,
        /// Number of symbols supplied.
        found: usize,
    },

    /// Conversion requested before any rotors were inserted.
    #[error("no rotors have been inserted")]
    RotorsNotInserted,

    /// A setup line that does not start with the `*` marker, or a message
    /// that arrives before any setup line.
    #[error("setup line must start with '*'")]
    MissingMarker,

    /// A setup line with fewer rotor names than the machine has slots.
    #[error("setup line names {found} rotors, expected {expected}")]
    MissingRotorNames {
        /// Number of slots.
        expected: usize,
        /// Number of names found.
        found: usize,
    },

    /// A setup line without its settings token.
    #[error("setup line has no rotor settings")]
    MissingSetting,

    /// Configuration text that does not follow the expected layout.
    #[error("malformed configuration: {0}")]
    MalformedConfig(String),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
