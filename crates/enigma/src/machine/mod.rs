//! The machine: rotor slots, plugboard, stepping and the signal path.
//!
//! A [`Machine`] owns a catalog of rotors (an arena addressed by
//! [`RotorId`]) and an ordered array of slots holding ids into that arena.
//! Slot 0 holds the reflector, slot `num_rotors - 1` the fast rotor, and
//! the rightmost `pawls` slots hold the moving rotors.
//!
//! # Signal path
//!
//! ```text
//! step rotors
//!   -> plugboard
//!   -> slot n-1 .. slot 1 (forward) -> slot 0 (reflect)
//!   -> slot 1 .. slot n-1 (backward)
//!   -> plugboard
//! ```
//!
//! With an involutory plugboard the path is its own inverse at any fixed
//! rotor position, so the same machine state both enciphers and deciphers.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use enigma::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alpha = Arc::new(Alphabet::latin());
//! let wiring = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();
//! let rotors = vec![
//!     Rotor::reflector("B", wiring("(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)")),
//!     Rotor::moving("I", wiring("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q").unwrap(),
//!     Rotor::moving("II", wiring("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E").unwrap(),
//!     Rotor::moving("III", wiring("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V").unwrap(),
//! ];
//! let mut machine = Machine::new(alpha.clone(), 4, 3, rotors).unwrap();
//! machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
//! machine.set_rotors("ADU").unwrap();
//!
//! let cipher = machine.convert_str("HELLO").unwrap();
//! machine.set_rotors("ADU").unwrap();
//! assert_eq!(machine.convert_str(&cipher).unwrap(), "HELLO");
//! ```

mod stepping;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::SetupLine;
use crate::core::alphabet::Alphabet;
use crate::diagnostics::{DiagnosticSink, NullSink, TraceEvent};
use crate::error::{ConfigurationError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorId};

use stepping::SlotState;

/// A complete rotor machine.
///
/// Conversion mutates rotor settings, so a machine must not be shared
/// between concurrent conversions; separate machines are independent.
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    rotors: Vec<Rotor>,
    by_name: HashMap<String, RotorId>,
    slots: Vec<RotorId>,
    plugboard: Permutation,
    sink: Box<dyn DiagnosticSink + Send>,
}

impl Machine {
    /// A machine over `alphabet` with `num_rotors` slots and `pawls` pawls,
    /// able to use any rotor in `rotors`.
    ///
    /// No rotors are inserted and the plugboard is the identity.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidGeometry`] unless
    ///   `1 < num_rotors` and `pawls < num_rotors`.
    /// - [`ConfigurationError::AlphabetMismatch`] if a rotor is wired over a
    ///   different alphabet.
    /// - [`ConfigurationError::DuplicateRotor`] if two rotors share a name.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        rotors: impl IntoIterator<Item = Rotor>,
    ) -> Result<Self> {
        if num_rotors < 2 || pawls >= num_rotors {
            return Err(ConfigurationError::InvalidGeometry { num_rotors, pawls });
        }

        let mut catalog = Vec::new();
        let mut by_name = HashMap::new();
        for rotor in rotors {
            if **rotor.alphabet() != *alphabet {
                return Err(ConfigurationError::AlphabetMismatch {
                    name: rotor.name().to_owned(),
                });
            }
            let id = RotorId(catalog.len());
            if by_name.insert(rotor.name().to_owned(), id).is_some() {
                return Err(ConfigurationError::DuplicateRotor {
                    name: rotor.name().to_owned(),
                });
            }
            catalog.push(rotor);
        }

        log::debug!(
            "machine over {} symbols: {num_rotors} slots, {pawls} pawls, {} rotors available",
            alphabet.size(),
            catalog.len()
        );

        Ok(Self {
            plugboard: Permutation::identity(alphabet.clone()),
            alphabet,
            num_rotors,
            pawls,
            rotors: catalog,
            by_name,
            slots: Vec::new(),
            sink: Box::new(NullSink),
        })
    }

    /// Replaces the diagnostic sink that observes every conversion.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Number of rotor slots.
    #[must_use]
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls, and so of moving rotors.
    #[must_use]
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// The common alphabet of the machine and its rotors.
    #[must_use]
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// The current plugboard.
    #[must_use]
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// The rotor in slot `k` (0 is the reflector), if rotors are inserted.
    #[must_use]
    pub fn rotor(&self, k: usize) -> Option<&Rotor> {
        self.slots.get(k).map(|id| &self.rotors[id.0])
    }

    /// The catalog rotor called `name`.
    #[must_use]
    pub fn rotor_named(&self, name: &str) -> Option<&Rotor> {
        self.by_name.get(name).map(|id| &self.rotors[id.0])
    }

    /// Every rotor this machine can use, in catalog order.
    pub fn catalog(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }

    /// Current settings of slots `1..num_rotors` as symbols, leftmost
    /// first. Empty before any rotors are inserted.
    #[must_use]
    pub fn settings(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .map(|id| self.alphabet.symbol_at(self.rotors[id.0].setting()))
            .collect()
    }

    /// Places the rotors called `names` into the slots, left to right;
    /// `names[0]` must name a reflector. Every inserted rotor starts at
    /// setting 0.
    ///
    /// The slot assignment is replaced only if every check passes.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::WrongRotorCount`] unless there is one name
    ///   per slot.
    /// - [`ConfigurationError::UnknownRotor`] for a name not in the catalog.
    /// - [`ConfigurationError::DuplicateRotor`] for a name used twice.
    /// - [`ConfigurationError::ReflectorSlot`] if slot 0 does not reflect.
    /// - [`ConfigurationError::MisplacedReflector`] for a reflector in any
    ///   other slot.
    /// - [`ConfigurationError::PawlMismatch`] if a moving rotor sits outside
    ///   the rightmost `pawls` slots or a non-moving one inside them.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(ConfigurationError::WrongRotorCount {
                expected: self.num_rotors,
                found: names.len(),
            });
        }

        let mut slots: Vec<RotorId> = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            let id = *self
                .by_name
                .get(name)
                .ok_or_else(|| ConfigurationError::UnknownRotor {
                    name: name.to_owned(),
                })?;
            if slots.contains(&id) {
                return Err(ConfigurationError::DuplicateRotor {
                    name: name.to_owned(),
                });
            }
            slots.push(id);
        }

        let reflector = &self.rotors[slots[0].0];
        if !reflector.reflects() {
            return Err(ConfigurationError::ReflectorSlot {
                name: reflector.name().to_owned(),
            });
        }
        let first_pawl = self.num_rotors - self.pawls;
        for (slot, id) in slots.iter().enumerate().skip(1) {
            let rotor = &self.rotors[id.0];
            if rotor.reflects() {
                return Err(ConfigurationError::MisplacedReflector {
                    name: rotor.name().to_owned(),
                    slot,
                });
            }
            if rotor.rotates() != (slot >= first_pawl) {
                return Err(ConfigurationError::PawlMismatch {
                    name: rotor.name().to_owned(),
                    slot,
                });
            }
        }

        for id in &slots {
            self.rotors[id.0].set(0);
        }
        self.slots = slots;
        log::debug!("inserted rotors {}", self.slot_names().join(" "));
        Ok(())
    }

    /// Sets the rotors in slots `1..num_rotors` from `setting`, one symbol
    /// per slot, leftmost first.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::RotorsNotInserted`] before
    ///   [`insert_rotors`](Self::insert_rotors).
    /// - [`ConfigurationError::SettingLength`] unless `setting` has exactly
    ///   `num_rotors - 1` symbols.
    /// - [`ConfigurationError::UnknownSymbol`] for a symbol outside the
    ///   alphabet. No rotor is changed in that case.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(ConfigurationError::RotorsNotInserted);
        }
        let found = setting.chars().count();
        if found != self.num_rotors - 1 {
            return Err(ConfigurationError::SettingLength {
                setting: setting.to_owned(),
                expected: self.num_rotors - 1,
                found,
            });
        }
        let positions = setting
            .chars()
            .map(|c| self.alphabet.index_of(c))
            .collect::<Result<Vec<_>>>()?;
        for (id, posn) in self.slots[1..].iter().zip(positions) {
            self.rotors[id.0].set(posn);
        }
        log::debug!("rotor settings {setting}");
        Ok(())
    }

    /// Replaces the plugboard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::AlphabetMismatch`] if `plugboard` is
    /// over a different alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(ConfigurationError::AlphabetMismatch {
                name: "plugboard".to_owned(),
            });
        }
        if !plugboard.is_involution() {
            log::warn!("plugboard {plugboard} is not an involution");
        }
        log::debug!("plugboard {plugboard}");
        self.plugboard = plugboard;
        Ok(())
    }

    /// Applies a parsed setup line: inserts its rotors, sets them, and
    /// installs its plugboard.
    ///
    /// # Errors
    ///
    /// Any error of [`insert_rotors`](Self::insert_rotors),
    /// [`set_rotors`](Self::set_rotors) or of parsing the plugboard cycles.
    /// The plugboard is parsed first, so a malformed plugboard leaves the
    /// machine untouched.
    pub fn apply_setup(&mut self, setup: &SetupLine) -> Result<()> {
        let plugboard = Permutation::new(&setup.plugboard, self.alphabet.clone())?;
        self.insert_rotors(&setup.rotors)?;
        self.set_rotors(&setup.settings)?;
        self.set_plugboard(plugboard)
    }

    /// Converts the alphabet index `c`, after first advancing the rotors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::RotorsNotInserted`] before
    /// [`insert_rotors`](Self::insert_rotors).
    pub fn convert(&mut self, c: usize) -> Result<usize> {
        if self.slots.is_empty() {
            return Err(ConfigurationError::RotorsNotInserted);
        }
        Ok(self.convert_index(c))
    }

    /// Converts every symbol of `msg`, advancing the rotors before each.
    ///
    /// Not a pure function: converting the same text twice gives different
    /// results because the rotors have moved. Reset the settings with
    /// [`set_rotors`](Self::set_rotors) to decipher.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::RotorsNotInserted`] before
    ///   [`insert_rotors`](Self::insert_rotors).
    /// - [`ConfigurationError::UnknownSymbol`] if `msg` contains a symbol
    ///   outside the alphabet; the message is checked before any rotor moves.
    pub fn convert_str(&mut self, msg: &str) -> Result<String> {
        if self.slots.is_empty() {
            return Err(ConfigurationError::RotorsNotInserted);
        }
        let indices = msg
            .chars()
            .map(|c| self.alphabet.index_of(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(indices
            .into_iter()
            .map(|c| {
                let out = self.convert_index(c);
                self.alphabet.symbol_at(out)
            })
            .collect())
    }

    fn convert_index(&mut self, c: usize) -> usize {
        self.advance_rotors();
        let tracing = self.sink.enabled();
        if tracing {
            let settings = self.slots[1..]
                .iter()
                .map(|id| self.rotors[id.0].setting())
                .collect();
            self.trace(TraceEvent::Stepped { settings });
            self.trace(TraceEvent::Input(c));
        }

        let mut c = self.plugboard.permute(c);
        if tracing {
            self.trace(TraceEvent::Plugboard(c));
        }
        c = self.apply_rotors(c, tracing);
        c = self.plugboard.permute(c);
        if tracing {
            self.trace(TraceEvent::Output(c));
        }
        c
    }

    /// Advances every slot the stepping rule selects, from a snapshot taken
    /// before any of them moves.
    fn advance_rotors(&mut self) {
        let states: Vec<SlotState> = self
            .slots
            .iter()
            .map(|id| {
                let rotor = &self.rotors[id.0];
                SlotState {
                    rotates: rotor.rotates(),
                    at_notch: rotor.at_notch(),
                }
            })
            .collect();
        let plan = stepping::plan(&states, self.pawls);
        for (id, advance) in self.slots.iter().zip(plan) {
            if advance {
                self.rotors[id.0].advance();
            }
        }
    }

    fn apply_rotors(&mut self, mut c: usize, tracing: bool) -> usize {
        for slot in (0..self.num_rotors).rev() {
            c = self.rotors[self.slots[slot].0].convert_forward(c);
            if tracing {
                self.trace(match slot {
                    0 => TraceEvent::Reflected(c),
                    _ => TraceEvent::Forward { slot, output: c },
                });
            }
        }
        for slot in 1..self.num_rotors {
            c = self.rotors[self.slots[slot].0].convert_backward(c);
            if tracing {
                self.trace(TraceEvent::Backward { slot, output: c });
            }
        }
        c
    }

    fn trace(&mut self, event: TraceEvent) {
        self.sink.record(&self.alphabet, event);
    }

    fn slot_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|id| self.rotors[id.0].name())
            .collect()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("alphabet", &self.alphabet)
            .field("num_rotors", &self.num_rotors)
            .field("pawls", &self.pawls)
            .field("slots", &self.slot_names())
            .field("settings", &self.settings())
            .field("plugboard", &self.plugboard)
            .finish_non_exhaustive()
    }
}
