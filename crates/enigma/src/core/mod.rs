//! Core data types.
//!
//! - [`alphabet::Alphabet`]: ordered symbol set with index bijection
//! - [`ring`]: modular index helpers shared by permutations and rotors

pub mod alphabet;
pub mod ring;
