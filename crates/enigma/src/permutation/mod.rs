//! Permutations of alphabet indices in cycle notation.
//!
//! A [`Permutation`] is parsed once from its cycle text and then answers
//! `permute` and `invert` queries from two precomputed lookup tables, so
//! both directions are O(1). Indices that appear in no cycle map to
//! themselves.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use enigma::{Alphabet, Permutation};
//!
//! let alpha = Arc::new(Alphabet::new("ABCDEF").unwrap());
//! let perm = Permutation::new("(ABC) (DE)", alpha).unwrap();
//!
//! assert_eq!(perm.permute(0), 1);
//! assert_eq!(perm.invert(0), 2);
//! assert_eq!(perm.permute_symbol('E'), 'D');
//! assert_eq!(perm.permute_symbol('F'), 'F');
//! assert!(!perm.derangement());
//! ```

mod cycles;

use std::fmt;
use std::sync::Arc;

use crate::core::alphabet::Alphabet;
use crate::core::ring;
use crate::error::Result;

/// A bijection over the indices of an alphabet, stored as disjoint cycles.
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    backward: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` (e.g. `"(AELTPHQXRU) (BKNW)"`) over `alphabet`.
    ///
    /// An empty description is the identity permutation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`](crate::ConfigurationError) for
    /// unbalanced parentheses, symbols outside any cycle, symbols not in
    /// the alphabet, or a symbol repeated across cycles.
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let cycles = cycles::parse(cycles, &alphabet)?;
        Ok(Self::from_cycles(cycles, alphabet))
    }

    /// The identity permutation over `alphabet`.
    #[must_use]
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        Self::from_cycles(Vec::new(), alphabet)
    }

    fn from_cycles(cycles: Vec<Vec<usize>>, alphabet: Arc<Alphabet>) -> Self {
        let mut forward: Vec<usize> = (0..alphabet.size()).collect();
        let mut backward = forward.clone();
        for cycle in &cycles {
            for (k, &from) in cycle.iter().enumerate() {
                let to = cycle[(k + 1) % cycle.len()];
                forward[from] = to;
                backward[to] = from;
            }
        }
        Self {
            alphabet,
            cycles,
            forward,
            backward,
        }
    }

    /// Size of the underlying alphabet.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// The alphabet this permutation acts on.
    #[must_use]
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// The disjoint cycles, as alphabet indices, in the order they were
    /// written.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Reduces `p` modulo the alphabet size.
    #[inline]
    #[must_use]
    pub fn wrap(&self, p: i64) -> usize {
        ring::wrap(p, self.size())
    }

    /// Applies the permutation to `p`, taken modulo the alphabet size.
    #[inline]
    #[must_use]
    pub fn permute(&self, p: usize) -> usize {
        match self.size() {
            0 => p,
            n => self.forward[p % n],
        }
    }

    /// Applies the inverse permutation to `c`, taken modulo the alphabet
    /// size.
    #[inline]
    #[must_use]
    pub fn invert(&self, c: usize) -> usize {
        match self.size() {
            0 => c,
            n => self.backward[c % n],
        }
    }

    /// Applies the permutation to a symbol. Symbols outside the alphabet
    /// are returned unchanged.
    #[must_use]
    pub fn permute_symbol(&self, p: char) -> char {
        match self.alphabet.to_index(p) {
            Some(i) => self.alphabet.symbol_at(self.permute(i)),
            None => p,
        }
    }

    /// Applies the inverse permutation to a symbol. Symbols outside the
    /// alphabet are returned unchanged.
    #[must_use]
    pub fn invert_symbol(&self, c: char) -> char {
        match self.alphabet.to_index(c) {
            Some(i) => self.alphabet.symbol_at(self.invert(i)),
            None => c,
        }
    }

    /// Returns true iff every cycle has at least two elements and every
    /// alphabet index belongs to a cycle, i.e. nothing maps to itself.
    #[must_use]
    pub fn derangement(&self) -> bool {
        let covered: usize = self.cycles.iter().map(Vec::len).sum();
        self.cycles.iter().all(|c| c.len() >= 2) && covered == self.size()
    }

    /// Returns true iff applying the permutation twice is the identity,
    /// i.e. every cycle has at most two elements.
    #[must_use]
    pub fn is_involution(&self) -> bool {
        self.cycles.iter().all(|c| c.len() <= 2)
    }
}

impl fmt::Display for Permutation {
    /// Writes the canonical cycle notation, e.g. `(AB) (CDE)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, cycle) in self.cycles.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for &i in cycle {
                write!(f, "{}", self.alphabet.symbol_at(i))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation({self})")
    }
}
