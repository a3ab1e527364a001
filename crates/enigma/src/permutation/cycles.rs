//! Cycle-notation parser.
//!
//! Accepts text of the form `(ABCD) (EF) ...`. Whitespace is ignored
//! everywhere, groups may be adjacent, and `()` contributes nothing.

use crate::core::alphabet::Alphabet;
use crate::error::{ConfigurationError, Result};

/// Parses `text` into disjoint cycles of alphabet indices.
///
/// # Errors
///
/// - [`ConfigurationError::UnbalancedCycle`] for a nested `(`, a `)` with no
///   open group, or a group left open at the end of the text.
/// - [`ConfigurationError::StrayText`] for a symbol outside any group.
/// - [`ConfigurationError::UnknownSymbol`] for a symbol not in `alphabet`.
/// - [`ConfigurationError::RepeatedCycleSymbol`] for a symbol that occurs
///   twice anywhere in the text, within one cycle or across cycles.
pub(crate) fn parse(text: &str, alphabet: &Alphabet) -> Result<Vec<Vec<usize>>> {
    let mut cycles = Vec::new();
    let mut seen = vec![false; alphabet.size()];
    // (offset of the opening parenthesis, indices so far)
    let mut open: Option<(usize, Vec<usize>)> = None;

    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        match (c, open.as_mut()) {
            ('(', None) => open = Some((position, Vec::new())),
            ('(', Some(_)) | (')', None) => {
                return Err(ConfigurationError::UnbalancedCycle { position });
            }
            (')', Some(_)) => {
                if let Some((_, cycle)) = open.take() {
                    if !cycle.is_empty() {
                        cycles.push(cycle);
                    }
                }
            }
            (symbol, None) => return Err(ConfigurationError::StrayText { symbol, position }),
            (symbol, Some((_, cycle))) => {
                let index = alphabet.index_of(symbol)?;
                if seen[index] {
                    return Err(ConfigurationError::RepeatedCycleSymbol { symbol });
                }
                seen[index] = true;
                cycle.push(index);
            }
        }
    }

    if let Some((position, _)) = open {
        return Err(ConfigurationError::UnbalancedCycle { position });
    }
    Ok(cycles)
}
