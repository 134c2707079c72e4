//! The three-rotor Enigma scrambler: rotors + reflector + plugboard, wired together
//! with the historical double-step anomaly.

use crate::error::EnigmaResult;
use crate::plugboard::Plugboard;
use crate::rotor::{Reflector, ReflectorKind, Rotor, RotorKind};

/// A fully configured Enigma machine.
///
/// `Copy` because every rotor and the plugboard are themselves cheap, fixed-size
/// values; the Bombe farm clones one of these per worker rather than sharing a
/// single mutable instance across threads.
#[derive(Debug, Copy, Clone)]
pub struct Enigma {
    left: Rotor,
    middle: Rotor,
    right: Rotor,
    reflector: Reflector,
    plugboard: Plugboard,
}

impl Enigma {
    pub fn new(left: Rotor, middle: Rotor, right: Rotor, reflector: Reflector) -> Self {
        Self {
            left,
            middle,
            right,
            reflector,
            plugboard: Plugboard::identity(),
        }
    }

    pub fn from_kinds(left: RotorKind, middle: RotorKind, right: RotorKind, reflector: ReflectorKind) -> Self {
        Self::new(Rotor::new(left, 0, 0), Rotor::new(middle, 0, 0), Rotor::new(right, 0, 0), Reflector::new(reflector))
    }

    pub fn left(&self) -> &Rotor {
        &self.left
    }

    pub fn middle(&self) -> &Rotor {
        &self.middle
    }

    pub fn right(&self) -> &Rotor {
        &self.right
    }

    pub fn set_rotors(&mut self, left: Rotor, middle: Rotor, right: Rotor) {
        self.left = left;
        self.middle = middle;
        self.right = right;
    }

    pub fn set_ring_offsets(&mut self, left: u8, middle: u8, right: u8) {
        self.left.set_ring_offset(left);
        self.middle.set_ring_offset(middle);
        self.right.set_ring_offset(right);
    }

    pub fn set_rotations(&mut self, left: u8, middle: u8, right: u8) {
        self.left.set_rotation_permanent(left);
        self.middle.set_rotation_permanent(middle);
        self.right.set_rotation_permanent(right);
    }

    pub fn set_plugboard(&mut self, plugboard: Plugboard) {
        self.plugboard = plugboard;
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Evaluates stepping for the upcoming key press: the right rotor always steps;
    /// the middle rotor steps if it or the right rotor is at its notch (the `OR` is
    /// the double-step anomaly); the left rotor steps only if the middle rotor was at
    /// its notch.
    fn step(&mut self) {
        let should_middle_rotate = self.right.is_at_notch() || self.middle.is_at_notch();
        let should_left_rotate = self.middle.is_at_notch();

        self.right.rotate();
        if should_middle_rotate {
            self.middle.rotate();
        }
        if should_left_rotate {
            self.left.rotate();
        }
    }

    /// Encodes a single already-stepped letter through plugboard -> rotors ->
    /// reflector -> rotors -> plugboard. Does not step the rotors; callers that want
    /// a full key press should call `step()` first (as `press`/`encode` do).
    fn encode_letter(&self, c: u8) -> u8 {
        let mut c = self.plugboard.swap(c);

        c = self.right.encode(c, true);
        c = self.middle.encode(c, true);
        c = self.left.encode(c, true);

        c = self.reflector.reflect(c);

        c = self.left.encode(c, false);
        c = self.middle.encode(c, false);
        c = self.right.encode(c, false);

        self.plugboard.swap(c)
    }

    /// Exposes the scrambler-only substitution (no stepping, no plugboard side
    /// effects beyond the pass-through lookup) so the Bombe's scrambler cache can be
    /// checked for equivalence against a plain `Enigma` in tests.
    #[cfg(test)]
    pub(crate) fn press_no_step_for_test(&self, c: u8) -> u8 {
        self.encode_letter(c)
    }

    /// Steps the rotors and encodes one letter, as a single key press would.
    pub fn press(&mut self, c: u8) -> u8 {
        self.step();
        self.encode_letter(c)
    }

    /// Encodes a whole message. Spaces pass through unchanged and do not cause
    /// stepping. Rotations are reset to their pre-message values once the message is
    /// finished (rings and wiring are untouched).
    ///
    /// Input is case-folded to lowercase on entry; output is uppercased.
    ///
    /// # Errors
    /// Returns [`crate::error::EnigmaError::InvalidInput`] if the message contains a
    /// character that is neither an ASCII letter nor a space.
    pub fn encode(&mut self, message: &str) -> EnigmaResult<String> {
        let mut output = String::with_capacity(message.len());
        for c in message.to_lowercase().chars() {
            if c == ' ' {
                output.push(' ');
                continue;
            }
            let index = crate::alphabet::index_of(c)?;
            let encoded = self.press(index);
            output.push(crate::alphabet::letter_at(encoded).to_ascii_uppercase());
        }
        self.left.reset();
        self.middle.reset();
        self.right.reset();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugboard::Plugboard;

    fn stock_enigma() -> Enigma {
        Enigma::from_kinds(RotorKind::I, RotorKind::II, RotorKind::III, ReflectorKind::B)
    }

    impl Enigma {
        /// Test-only hook exposing a single stepping event without doing a full
        /// `encode_letter` pass, so the double-step scenario can check rotation state
        /// directly.
        fn step_for_test(&mut self) {
            self.step();
        }
    }

    #[test]
    fn known_encoding() {
        let mut enigma = stock_enigma();
        assert_eq!(enigma.encode("aaaaa").unwrap(), "BDZGO");
    }

    #[test]
    fn double_step_anomaly() {
        // Right rotor (III, notch at 'v') starts two presses away from its notch;
        // middle rotor (II, notch at 'e') sits right at its own notch one press later.
        // This reproduces the textbook double-step: the middle rotor advances on two
        // consecutive key presses (from reaching the right rotor's notch, then from
        // sitting at its own).
        let mut enigma = stock_enigma();
        enigma.set_rotations(0, 3, 19); // a, d, t

        let expected = [(0, 3, 20), (0, 3, 21), (0, 4, 22), (1, 5, 23)]; // a,d,u / a,d,v / a,e,w / b,f,x
        for &(l, m, r) in &expected {
            enigma.step_for_test();
            assert_eq!((enigma.left.rotation(), enigma.middle.rotation(), enigma.right.rotation()), (l, m, r));
        }
    }

    #[test]
    fn reciprocity_with_plugboard() {
        let plugboard = Plugboard::parse("ab cd").unwrap();

        let mut encoder = stock_enigma();
        encoder.set_plugboard(plugboard);
        let cipher = encoder.encode("hello").unwrap();

        let mut decoder = stock_enigma();
        decoder.set_plugboard(plugboard);
        let plain = decoder.encode(&cipher).unwrap();

        assert_eq!(plain, "HELLO");
    }

    #[test]
    fn no_letter_ever_maps_to_itself() {
        let enigma = stock_enigma();
        for c in 0..26u8 {
            let mut probe = enigma;
            let out = probe.press(c);
            assert_ne!(out, c);
        }
    }

    #[test]
    fn rejects_non_letter_non_space() {
        let mut enigma = stock_enigma();
        assert!(enigma.encode("hi5").is_err());
    }
}
