//! Rotor and reflector wiring, and the per-instance state (ring offset, rotation)
//! that sits on top of it.
//!
//! The wiring tables are generated at compile time from the historical wiring
//! strings: parsing them at const-eval time means there's no runtime cost and no
//! chance of a typo silently producing a non-bijective wiring.

use crate::error::{EnigmaError, EnigmaResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RotorKind {
    I,
    II,
    III,
    IV,
    V,
}

pub const ALL_ROTORS: [RotorKind; 5] = [RotorKind::I, RotorKind::II, RotorKind::III, RotorKind::IV, RotorKind::V];

const fn chars(kind: RotorKind) -> &'static [u8; 26] {
    match kind {
        RotorKind::I => b"EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        RotorKind::II => b"AJDKSIRUXBLHWTMCQGZNPYFVOE",
        RotorKind::III => b"BDFHJLCPRTXVZNYEIWGAKMUSQO",
        RotorKind::IV => b"ESOVPZJAYQUIRHXLNFTGKDCMWB",
        RotorKind::V => b"VZBRGITYUPSDNHLXAWMJQOFECK",
    }
}

const fn notch(kind: RotorKind) -> u8 {
    // Turnover letter, as an index from 'A'.
    match kind {
        RotorKind::I => b'Q' - b'A',
        RotorKind::II => b'E' - b'A',
        RotorKind::III => b'V' - b'A',
        RotorKind::IV => b'J' - b'A',
        RotorKind::V => b'Z' - b'A',
    }
}

const fn gen_forward_wiring(kind: RotorKind) -> [u8; 26] {
    let chars = chars(kind);
    let mut wiring = [0u8; 26];
    let mut i = 0;
    while i < 26 {
        wiring[i] = chars[i] - b'A';
        i += 1;
    }
    wiring
}

const fn gen_backward_wiring(kind: RotorKind) -> [u8; 26] {
    let forward = gen_forward_wiring(kind);
    let mut backward = [0u8; 26];
    let mut i = 0;
    while i < 26 {
        backward[forward[i] as usize] = i as u8;
        i += 1;
    }
    backward
}

const ROTOR_FORWARD_WIRING: [[u8; 26]; 5] = [
    gen_forward_wiring(RotorKind::I),
    gen_forward_wiring(RotorKind::II),
    gen_forward_wiring(RotorKind::III),
    gen_forward_wiring(RotorKind::IV),
    gen_forward_wiring(RotorKind::V),
];

const ROTOR_BACKWARD_WIRING: [[u8; 26]; 5] = [
    gen_backward_wiring(RotorKind::I),
    gen_backward_wiring(RotorKind::II),
    gen_backward_wiring(RotorKind::III),
    gen_backward_wiring(RotorKind::IV),
    gen_backward_wiring(RotorKind::V),
];

impl RotorKind {
    fn index(self) -> usize {
        match self {
            RotorKind::I => 0,
            RotorKind::II => 1,
            RotorKind::III => 2,
            RotorKind::IV => 3,
            RotorKind::V => 4,
        }
    }

    fn forward_wiring(self) -> &'static [u8; 26] {
        &ROTOR_FORWARD_WIRING[self.index()]
    }

    fn backward_wiring(self) -> &'static [u8; 26] {
        &ROTOR_BACKWARD_WIRING[self.index()]
    }

    fn notch(self) -> u8 {
        notch(self)
    }
}

impl TryFrom<&str> for RotorKind {
    type Error = EnigmaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value.to_uppercase().as_str() {
            "I" => RotorKind::I,
            "II" => RotorKind::II,
            "III" => RotorKind::III,
            "IV" => RotorKind::IV,
            "V" => RotorKind::V,
            other => return Err(EnigmaError::InvalidInput(format!("unknown rotor: {other}"))),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReflectorKind {
    B,
    C,
}

const fn gen_reflector_wiring(kind: ReflectorKind) -> [u8; 26] {
    let chars: &[u8; 26] = match kind {
        ReflectorKind::B => b"YRUHQSLDPXNGOKMIEBFZCWVJAT",
        ReflectorKind::C => b"FVPJIAOYEDRZXWGCTKUQSBNMHL",
    };
    let mut wiring = [0u8; 26];
    let mut i = 0;
    while i < 26 {
        wiring[i] = chars[i] - b'A';
        i += 1;
    }
    wiring
}

const REFLECTOR_WIRING: [[u8; 26]; 2] = [gen_reflector_wiring(ReflectorKind::B), gen_reflector_wiring(ReflectorKind::C)];

impl TryFrom<&str> for ReflectorKind {
    type Error = EnigmaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value.to_uppercase().as_str() {
            "B" => ReflectorKind::B,
            "C" => ReflectorKind::C,
            other => return Err(EnigmaError::InvalidInput(format!("unknown reflector: {other}"))),
        })
    }
}

/// A reflector. Ring offset and rotation are always zero and it never steps, so
/// unlike `Rotor` there's no mutable state at all: it's just a wiring lookup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Reflector {
    kind: ReflectorKind,
}

impl Reflector {
    pub fn new(kind: ReflectorKind) -> Self {
        Self { kind }
    }

    /// Reflects `c` (an involution: `reflect(reflect(c)) == c` is NOT what this does,
    /// since this is only one half of the pipeline; the wiring itself is an involution,
    /// i.e. `wiring[wiring[c]] == c`).
    pub fn reflect(&self, c: u8) -> u8 {
        REFLECTOR_WIRING[self.kind as usize][c as usize]
    }
}

/// One Enigma wheel: its wiring plus the mutable state (`ring_offset`, `rotation`)
/// that changes as the machine is configured and run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rotor {
    kind: RotorKind,
    ring_offset: u8,
    rotation: u8,
    original_rotation: u8,
}

impl Rotor {
    pub fn new(kind: RotorKind, ring_offset: u8, rotation: u8) -> Self {
        assert!(ring_offset < 26 && rotation < 26);
        Self {
            kind,
            ring_offset,
            rotation,
            original_rotation: rotation,
        }
    }

    pub fn kind(&self) -> RotorKind {
        self.kind
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn ring_offset(&self) -> u8 {
        self.ring_offset
    }

    pub fn set_ring_offset(&mut self, ring_offset: u8) {
        assert!(ring_offset < 26);
        self.ring_offset = ring_offset;
    }

    /// Sets the rotor's rotation for this message and remembers it as the value
    /// `reset()` should return to once the message is finished.
    pub fn set_rotation_permanent(&mut self, rotation: u8) {
        assert!(rotation < 26);
        self.rotation = rotation;
        self.original_rotation = rotation;
    }

    /// Advances the rotation by one position (mod 26), as happens on every key press
    /// this rotor participates in.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 26;
    }

    /// True iff this rotor is currently sitting at its turnover notch.
    pub fn is_at_notch(&self) -> bool {
        self.rotation == self.kind.notch()
    }

    /// Restores the rotation to the value it had when the message started
    /// (`set_rotation_permanent` or construction), without touching the ring or wiring.
    pub fn reset(&mut self) {
        self.rotation = self.original_rotation;
    }

    /// A rotor with the same wiring but ring offset and rotation both zeroed. Used to
    /// build the Bombe's scrambler cache, which assumes rings are 'a' and sweeps every
    /// rotation itself.
    pub fn copy(&self) -> Rotor {
        Rotor::new(self.kind, 0, 0)
    }

    /// Substitutes letter `c` through this rotor's wiring, in the given direction.
    ///
    /// `v = (c - ring_offset + rotation) mod 26`; then `pi(v)` or `pi^-1(v)`; then
    /// `(result + ring_offset - rotation) mod 26`.
    pub fn encode(&self, c: u8, forwards: bool) -> u8 {
        let shift = self.rotation as i16 - self.ring_offset as i16;
        let v = modulo(c as i16 + shift);
        let mapped = if forwards {
            self.kind.forward_wiring()[v as usize]
        } else {
            self.kind.backward_wiring()[v as usize]
        };
        modulo(mapped as i16 - shift)
    }
}

fn modulo(value: i16) -> u8 {
    value.rem_euclid(26) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiring_is_involutive_with_ring_and_rotation() {
        for &kind in &ALL_ROTORS {
            for ring in [0u8, 5, 25] {
                for rotation in [0u8, 1, 17, 25] {
                    let rotor = Rotor::new(kind, ring, rotation);
                    for c in 0..26u8 {
                        let out = rotor.encode(c, true);
                        assert_eq!(rotor.encode(out, false), c);
                    }
                }
            }
        }
    }

    #[test]
    fn notch_detection() {
        let mut rotor = Rotor::new(RotorKind::I, 0, 16); // 'Q' index = 16
        assert!(rotor.is_at_notch());
        rotor.rotate();
        assert!(!rotor.is_at_notch());
    }

    #[test]
    fn reset_restores_original_rotation_not_ring() {
        let mut rotor = Rotor::new(RotorKind::III, 4, 2);
        rotor.rotate();
        rotor.rotate();
        rotor.reset();
        assert_eq!(rotor.rotation(), 2);
        assert_eq!(rotor.ring_offset(), 4);
    }

    #[test]
    fn copy_zeroes_ring_and_rotation() {
        let rotor = Rotor::new(RotorKind::V, 11, 9);
        let copied = rotor.copy();
        assert_eq!(copied.ring_offset(), 0);
        assert_eq!(copied.rotation(), 0);
        assert_eq!(copied.kind(), rotor.kind());
    }

    #[test]
    fn reflector_is_an_involution() {
        for &kind in &[ReflectorKind::B, ReflectorKind::C] {
            let reflector = Reflector::new(kind);
            for c in 0..26u8 {
                let out = reflector.reflect(c);
                assert_ne!(out, c, "reflectors never map a letter to itself");
                assert_eq!(reflector.reflect(out), c);
            }
        }
    }

    #[test]
    fn rotor_name_parsing() {
        assert_eq!(RotorKind::try_from("iii").unwrap(), RotorKind::III);
        assert!(RotorKind::try_from("VI").is_err());
    }
}
