//! Rotors: a wiring permutation turned by a mechanical setting.
//!
//! A rotor is one of three kinds, distinguished by [`RotorKind`]:
//!
//! | Kind | rotates | reflects | notches |
//! |------|---------|----------|---------|
//! | [`RotorKind::Fixed`] | no | no | none |
//! | [`RotorKind::Moving`] | yes | no | one or more |
//! | [`RotorKind::Reflector`] | no | yes | none |
//!
//! The signal enters a rotor at contact `p`, is shifted by the current
//! setting, passes the zero-position wiring and is shifted back:
//!
//! ```text
//! forward(p)  = wrap(permute(wrap(p + setting)) - setting)
//! backward(e) = wrap(invert(wrap(e + setting)) - setting)
//! ```

use std::fmt;
use std::sync::Arc;

use crate::core::alphabet::Alphabet;
use crate::core::ring::shift;
use crate::error::{ConfigurationError, Result};
use crate::permutation::Permutation;

/// Stable identifier of a rotor within a machine's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RotorId(pub(crate) usize);

impl RotorId {
    /// Position of the rotor in the catalog it was registered with.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Capabilities of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Never moves; may occupy any non-reflector, non-pawl slot.
    Fixed,
    /// Advanced by a pawl; `notches` are the settings (as alphabet
    /// indices) at which it lets its left neighbour advance.
    Moving {
        /// Notch positions, sorted and deduplicated.
        notches: Vec<usize>,
    },
    /// Never moves; turns the signal around in slot 0.
    Reflector,
}

/// A rotor with its wiring at setting zero and its current setting.
#[derive(Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    setting: usize,
    kind: RotorKind,
}

impl Rotor {
    /// A non-moving, non-reflecting rotor.
    #[must_use]
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name.into(), permutation, RotorKind::Fixed)
    }

    /// A rotor advanced by a pawl, with notches at each symbol of `notches`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingNotches`] if `notches` is empty
    /// and [`ConfigurationError::UnknownSymbol`] if a notch symbol is not in
    /// the permutation's alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self> {
        let name = name.into();
        let alphabet = permutation.alphabet();
        let mut positions = notches
            .chars()
            .map(|c| alphabet.index_of(c))
            .collect::<Result<Vec<_>>>()?;
        if positions.is_empty() {
            return Err(ConfigurationError::MissingNotches { name });
        }
        positions.sort_unstable();
        positions.dedup();
        Ok(Self::with_kind(
            name,
            permutation,
            RotorKind::Moving { notches: positions },
        ))
    }

    /// A reflector.
    ///
    /// Historical reflectors are derangements; other wirings are accepted
    /// but logged.
    #[must_use]
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        let name = name.into();
        if !permutation.derangement() {
            log::warn!("reflector {name} wiring {permutation} has fixed points");
        }
        Self::with_kind(name, permutation, RotorKind::Reflector)
    }

    fn with_kind(name: String, permutation: Permutation, kind: RotorKind) -> Self {
        Self {
            name,
            permutation,
            setting: 0,
            kind,
        }
    }

    /// My name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// My capabilities.
    #[must_use]
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// My wiring at setting zero.
    #[must_use]
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// My alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Size of my alphabet.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// True iff I have a ratchet and can move.
    #[inline]
    #[must_use]
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// True iff I reflect.
    #[inline]
    #[must_use]
    pub fn reflects(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// My current setting.
    #[inline]
    #[must_use]
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Sets my setting to `posn` modulo my size.
    pub fn set(&mut self, posn: usize) {
        self.setting = match self.size() {
            0 => 0,
            n => posn % n,
        };
    }

    /// Sets my setting to the index of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownSymbol`] if `symbol` is not in
    /// my alphabet.
    pub fn set_symbol(&mut self, symbol: char) -> Result<()> {
        let posn = self.alphabet().index_of(symbol)?;
        self.set(posn);
        Ok(())
    }

    /// My notch positions as symbols, in alphabet order. Empty unless I
    /// am a moving rotor.
    #[must_use]
    pub fn notches(&self) -> String {
        match &self.kind {
            RotorKind::Moving { notches } => notches
                .iter()
                .map(|&i| self.alphabet().symbol_at(i))
                .collect(),
            RotorKind::Fixed | RotorKind::Reflector => String::new(),
        }
    }

    /// True iff my current setting is one of my notches, so that my left
    /// neighbour may advance.
    #[must_use]
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.binary_search(&self.setting).is_ok(),
            RotorKind::Fixed | RotorKind::Reflector => false,
        }
    }

    /// Advances me one position if I can move.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.set(self.setting + 1);
        }
    }

    /// Converts contact `p` entering from the right.
    #[inline]
    #[must_use]
    pub fn convert_forward(&self, p: usize) -> usize {
        let offset = self.setting as i64;
        let n = self.size();
        shift(self.permutation.permute(shift(p, offset, n)), -offset, n)
    }

    /// Converts contact `e` entering from the left.
    #[inline]
    #[must_use]
    pub fn convert_backward(&self, e: usize) -> usize {
        let offset = self.setting as i64;
        let n = self.size();
        shift(self.permutation.invert(shift(e, offset, n)), -offset, n)
    }
}

impl fmt::Debug for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("setting", &self.alphabet().symbol_at(self.setting))
            .field("wiring", &self.permutation.to_string())
            .finish()
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotor {}", self.name)
    }
}
