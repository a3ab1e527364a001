//! Property-based tests for permutations and the machine.
//!
//! Uses proptest to check that inverse laws and the self-inverse signal
//! path hold for arbitrary wirings, settings and messages.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use enigma::{Alphabet, Machine, Permutation, Rotor};
use proptest::prelude::*;

const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Cycle notation for a permutation of `order`, split into cycles at every
/// index marked in `cuts`.
fn cycles_of(order: &[usize], cuts: &[bool]) -> String {
    let symbols: Vec<char> = LATIN.chars().collect();
    let mut text = String::from("(");
    for (i, &k) in order.iter().enumerate() {
        if i > 0 && cuts[i] {
            text.push_str(") (");
        }
        text.push(symbols[k]);
    }
    text.push(')');
    text
}

fn wiring() -> impl Strategy<Value = String> {
    (
        Just((0..26).collect::<Vec<usize>>()).prop_shuffle(),
        prop::collection::vec(any::<bool>(), 26),
    )
        .prop_map(|(order, cuts)| cycles_of(&order, &cuts))
}

/// A derangement made of 13 disjoint pairs.
fn reflector_wiring() -> impl Strategy<Value = String> {
    Just((0..26).collect::<Vec<usize>>())
        .prop_shuffle()
        .prop_map(|order| {
            let cuts: Vec<bool> = (0..26).map(|i| i % 2 == 0).collect();
            cycles_of(&order, &cuts)
        })
}

fn setting() -> impl Strategy<Value = String> {
    "[A-Z]{3}"
}

// =============================================================================
// Permutation laws
// =============================================================================

proptest! {
    /// invert(permute(p)) = p
    #[test]
    fn prop_invert_undoes_permute(cycles in wiring(), p in 0usize..26) {
        let perm = Permutation::new(&cycles, Arc::new(Alphabet::latin())).unwrap();
        prop_assert_eq!(perm.invert(perm.permute(p)), p);
        prop_assert_eq!(perm.permute(perm.invert(p)), p);
    }

    /// permute is a bijection on indices
    #[test]
    fn prop_permute_is_bijection(cycles in wiring()) {
        let perm = Permutation::new(&cycles, Arc::new(Alphabet::latin())).unwrap();
        let mut image: Vec<usize> = (0..26).map(|p| perm.permute(p)).collect();
        image.sort_unstable();
        prop_assert_eq!(image, (0..26).collect::<Vec<_>>());
    }

    /// Cycle notation written by Display parses back to the same mapping.
    #[test]
    fn prop_display_reparses(cycles in wiring()) {
        let alphabet = Arc::new(Alphabet::latin());
        let perm = Permutation::new(&cycles, alphabet.clone()).unwrap();
        let again = Permutation::new(&perm.to_string(), alphabet).unwrap();
        for p in 0..26 {
            prop_assert_eq!(perm.permute(p), again.permute(p));
        }
    }

    /// A perfect pairing is a derangement and an involution.
    #[test]
    fn prop_pairing_is_reflector(cycles in reflector_wiring()) {
        let perm = Permutation::new(&cycles, Arc::new(Alphabet::latin())).unwrap();
        prop_assert!(perm.derangement());
        prop_assert!(perm.is_involution());
    }
}

// =============================================================================
// Machine
// =============================================================================

const PAIRS: &str = "(AB) (CD) (EF) (GH) (IJ) (KL) (MN) (OP) (QR) (ST) (UV) (WX) (YZ)";

fn machine(reflector: &str, rotors: &[String; 3]) -> Machine {
    let alphabet = Arc::new(Alphabet::latin());
    let wire = |cycles: &str| Permutation::new(cycles, alphabet.clone()).unwrap();
    let catalog = vec![
        Rotor::reflector("R", wire(reflector)),
        Rotor::moving("L", wire(&rotors[0]), "Q").unwrap(),
        Rotor::moving("M", wire(&rotors[1]), "EV").unwrap(),
        Rotor::moving("F", wire(&rotors[2]), "V").unwrap(),
    ];
    let mut m = Machine::new(alphabet, 4, 3, catalog).unwrap();
    m.insert_rotors(&["R", "L", "M", "F"]).unwrap();
    m
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Deciphering from the same settings restores the plaintext.
    #[test]
    fn prop_machine_is_self_inverse(
        reflector in reflector_wiring(),
        rotors in [wiring(), wiring(), wiring()],
        start in setting(),
        plugs in reflector_wiring(),
        text in "[A-Z]{0,80}",
    ) {
        let mut m = machine(&reflector, &rotors);
        let plugboard = Permutation::new(&plugs, m.alphabet().clone()).unwrap();
        m.set_plugboard(plugboard).unwrap();

        m.set_rotors(&start).unwrap();
        let cipher = m.convert_str(&text).unwrap();
        let end = m.settings();
        m.set_rotors(&start).unwrap();
        prop_assert_eq!(m.convert_str(&cipher).unwrap(), text);
        prop_assert_eq!(m.settings(), end);
    }

    /// With a derangement reflector no symbol enciphers to itself.
    #[test]
    fn prop_no_fixed_points(
        reflector in reflector_wiring(),
        rotors in [wiring(), wiring(), wiring()],
        start in setting(),
        text in "[A-Z]{1,40}",
    ) {
        let mut m = machine(&reflector, &rotors);
        m.set_rotors(&start).unwrap();
        let cipher = m.convert_str(&text).unwrap();
        for (plain, enc) in text.chars().zip(cipher.chars()) {
            prop_assert_ne!(plain, enc);
        }
    }

    /// The fast rotor advances exactly once per converted symbol.
    #[test]
    fn prop_fast_rotor_counts_symbols(
        rotors in [wiring(), wiring(), wiring()],
        start in setting(),
        len in 0usize..100,
    ) {
        let mut m = machine(PAIRS, &rotors);
        m.set_rotors(&start).unwrap();
        let before = m.rotor(3).unwrap().setting();
        m.convert_str(&"A".repeat(len)).unwrap();
        prop_assert_eq!(m.rotor(3).unwrap().setting(), (before + len) % 26);
    }
}
