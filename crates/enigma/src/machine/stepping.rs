//! The stepping rule.
//!
//! Which slots advance is decided from a snapshot of every slot taken
//! before anything moves, then all marked slots advance together. No notch
//! is read after a neighbour has moved in the same step.
//!
//! ```text
//! slot:    0     1     2     3
//!         [B]   [I]   [II]  [III]
//!                ^-----'^-----'      neighbour pairs inside the pawl range
//! ```
//!
//! - The rightmost slot always advances.
//! - A pawl slot `i > 0` sitting at a notch advances together with slot
//!   `i - 1`, provided slot `i - 1` can rotate. Because the pawl also
//!   engages slot `i` itself, a middle rotor at its notch moves on two
//!   consecutive keypresses: the double step.
//! - The reflector never advances.

/// What the stepping rule needs to know about one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SlotState {
    /// The rotor in the slot can rotate.
    pub rotates: bool,
    /// The rotor in the slot is at one of its notches.
    pub at_notch: bool,
}

/// Returns, for each slot, whether it advances on this step.
pub(crate) fn plan(states: &[SlotState], pawls: usize) -> Vec<bool> {
    let n = states.len();
    let mut advance = vec![false; n];
    let Some(last) = n.checked_sub(1) else {
        return advance;
    };
    advance[last] = true;

    let first_pawl = n.saturating_sub(pawls).max(1);
    for i in first_pawl..n {
        if states[i].at_notch && states[i - 1].rotates {
            advance[i] = true;
            advance[i - 1] = true;
        }
    }
    advance
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFLECTOR: SlotState = SlotState {
        rotates: false,
        at_notch: false,
    };
    const FIXED: SlotState = REFLECTOR;
    const IDLE: SlotState = SlotState {
        rotates: true,
        at_notch: false,
    };
    const NOTCHED: SlotState = SlotState {
        rotates: true,
        at_notch: true,
    };

    #[test]
    fn test_rightmost_always_advances() {
        assert_eq!(
            plan(&[REFLECTOR, IDLE, IDLE, IDLE], 3),
            [false, false, false, true]
        );
    }

    #[test]
    fn test_right_notch_carries() {
        assert_eq!(
            plan(&[REFLECTOR, IDLE, IDLE, NOTCHED], 3),
            [false, false, true, true]
        );
    }

    #[test]
    fn test_middle_notch_double_steps() {
        assert_eq!(
            plan(&[REFLECTOR, IDLE, NOTCHED, IDLE], 3),
            [false, true, true, true]
        );
    }

    #[test]
    fn test_both_notches() {
        assert_eq!(
            plan(&[REFLECTOR, IDLE, NOTCHED, NOTCHED], 3),
            [false, true, true, true]
        );
    }

    #[test]
    fn test_leftmost_notch_ignored_next_to_reflector() {
        assert_eq!(
            plan(&[REFLECTOR, NOTCHED, IDLE, IDLE], 3),
            [false, false, false, true]
        );
    }

    #[test]
    fn test_notch_next_to_fixed_rotor_ignored() {
        assert_eq!(
            plan(&[REFLECTOR, FIXED, NOTCHED, IDLE, IDLE], 3),
            [false, false, false, false, true]
        );
    }

    #[test]
    fn test_slots_outside_pawls_ignored() {
        // Slot 1 is notched but has no pawl of its own.
        assert_eq!(
            plan(&[REFLECTOR, NOTCHED, IDLE, IDLE], 2),
            [false, false, false, true]
        );
    }

    #[test]
    fn test_two_slots() {
        assert_eq!(plan(&[REFLECTOR, NOTCHED], 1), [false, true]);
        assert!(plan(&[], 0).is_empty());
    }
}
