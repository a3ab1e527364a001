//! Ordered symbol sets.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ConfigurationError, Result};

/// Characters with a meaning of their own in cycle notation and setup lines.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// An ordered sequence of unique symbols, numbered `0..size()`.
///
/// `to_index` and `to_symbol` are mutual inverses over the alphabet. An
/// alphabet is immutable once constructed and is shared between the
/// permutations built over it.
///
/// # Example
///
/// ```
/// use enigma::Alphabet;
///
/// let alpha = Alphabet::new("ABCD").unwrap();
/// assert_eq!(alpha.size(), 4);
/// assert_eq!(alpha.to_index('C'), Some(2));
/// assert_eq!(alpha.to_symbol(2), Some('C'));
/// assert!(Alphabet::new("ABCA").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Returned by [`symbol_at`](Self::symbol_at) for an empty alphabet.
    /// Reserved, so it can never be an alphabet symbol.
    pub const PLACEHOLDER: char = '*';

    /// Builds an alphabet from the characters of `symbols`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateSymbol`] if a character occurs
    /// twice, and [`ConfigurationError::ReservedSymbol`] for whitespace,
    /// parentheses or `*`.
    pub fn new(symbols: &str) -> Result<Self> {
        let mut alphabet = Self::default();
        for symbol in symbols.chars() {
            if symbol.is_whitespace() || RESERVED.contains(&symbol) {
                return Err(ConfigurationError::ReservedSymbol { symbol });
            }
            let next = alphabet.symbols.len();
            if alphabet.index.insert(symbol, next).is_some() {
                return Err(ConfigurationError::DuplicateSymbol { symbol });
            }
            alphabet.symbols.push(symbol);
        }
        Ok(alphabet)
    }

    /// The 26 upper-case Latin letters.
    #[must_use]
    pub fn latin() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    /// Number of symbols.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns true if `symbol` is in the alphabet.
    #[inline]
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Index of `symbol`, or `None` if it is not in the alphabet.
    #[inline]
    #[must_use]
    pub fn to_index(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Symbol at `index`, or `None` if the index is out of range.
    #[inline]
    #[must_use]
    pub fn to_symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Index of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownSymbol`] if `symbol` is not in
    /// the alphabet.
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        self.to_index(symbol)
            .ok_or(ConfigurationError::UnknownSymbol { symbol })
    }

    /// Symbol at `index` reduced modulo the alphabet size.
    ///
    /// This is the infallible form used on the conversion path, where
    /// indices always come from permutations and rotors over this alphabet.
    ///
    /// An empty alphabet has no symbol to return, so it yields
    /// [`PLACEHOLDER`](Self::PLACEHOLDER), which is never a member of any
    /// alphabet. Use [`to_symbol`](Self::to_symbol) to tell the two cases
    /// apart.
    #[must_use]
    pub fn symbol_at(&self, index: usize) -> char {
        match self.symbols.len() {
            0 => Self::PLACEHOLDER,
            n => self.symbols[index % n],
        }
    }

    /// The symbols in index order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({self})")
    }
}
