//! The Bombe's precomputed scrambler cache.
//!
//! For a single, fixed rotor order this holds every possible `(left, middle, right,
//! input)` scrambler output — no plugboard, rings forced to zero, and no stepping
//! within the single letter being looked up. Building it is `O(26^4)` but every
//! subsequent lookup during a Bombe sweep is `O(1)`, which is the entire point: the
//! sweep needs to evaluate the scrambler hundreds of millions of times.

use crate::rotor::{Reflector, Rotor};

const SIZE: usize = 26 * 26 * 26 * 26;

fn index(l: u8, m: u8, r: u8, x: u8) -> usize {
    ((l as usize * 26 + m as usize) * 26 + r as usize) * 26 + x as usize
}

pub struct BombeEnigma {
    cache: Box<[u8; SIZE]>,
    /// The rotation cursor set by `set_rotation`, used by `encode`. Kept as a plain
    /// triple rather than reusing any residual `rotation` field on the zeroed rotors
    /// used to build the cache, since that field is left at 25 after construction
    /// (the last value the build loop assigned) and means nothing at lookup time.
    cursor: (u8, u8, u8),
}

impl BombeEnigma {
    /// Builds the cache for one rotor order. `left`/`middle`/`right` only contribute
    /// their wiring: ring offset and rotation are forced to zero via `Rotor::copy`.
    pub fn build(left: &Rotor, middle: &Rotor, right: &Rotor, reflector: &Reflector) -> Self {
        let left = left.copy();
        let middle = middle.copy();
        let right = right.copy();

        let mut cache = Box::new([0u8; SIZE]);
        for l in 0..26u8 {
            let mut left = left;
            left.set_rotation_permanent(l);
            for m in 0..26u8 {
                let mut middle = middle;
                middle.set_rotation_permanent(m);
                for r in 0..26u8 {
                    let mut right = right;
                    right.set_rotation_permanent(r);
                    for x in 0..26u8 {
                        let mut c = right.encode(x, true);
                        c = middle.encode(c, true);
                        c = left.encode(c, true);
                        c = reflector.reflect(c);
                        c = left.encode(c, false);
                        c = middle.encode(c, false);
                        c = right.encode(c, false);
                        cache[index(l, m, r, x)] = c;
                    }
                }
            }
        }

        Self { cache, cursor: (0, 0, 0) }
    }

    pub fn set_rotation(&mut self, left: u8, middle: u8, right: u8) {
        self.cursor = (left, middle, right);
    }

    pub fn cursor(&self) -> (u8, u8, u8) {
        self.cursor
    }

    /// Looks up the scrambler's output for `letter`, with the right rotor shifted by
    /// `right_shift` positions from the cursor. Only the right rotor is ever offset:
    /// the Bombe assumes crib lengths are short enough that the middle and left
    /// rotors never step while traversing a menu.
    pub fn encode(&self, letter: u8, right_shift: u8) -> u8 {
        let (l, m, r) = self.cursor;
        let r = (r + right_shift) % 26;
        self.cache[index(l, m, r, letter)]
    }

    /// The cursor rendered as a three-letter uppercase indicator, e.g. `"ABC"`.
    pub fn indicator(&self) -> String {
        let (l, m, r) = self.cursor;
        [l, m, r].iter().map(|&i| crate::alphabet::letter_at(i).to_ascii_uppercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enigma::Enigma;
    use crate::rotor::{ReflectorKind, RotorKind};

    #[test]
    fn cache_matches_a_fresh_enigma_with_no_stepping() {
        let left = Rotor::new(RotorKind::I, 0, 0);
        let middle = Rotor::new(RotorKind::II, 0, 0);
        let right = Rotor::new(RotorKind::III, 0, 0);
        let reflector = Reflector::new(ReflectorKind::B);

        let mut scrambler = BombeEnigma::build(&left, &middle, &right, &reflector);

        for l in [0u8, 5, 25] {
            for m in [0u8, 12, 25] {
                for r in [0u8, 1, 25] {
                    scrambler.set_rotation(l, m, r);
                    let mut enigma = Enigma::new(Rotor::new(RotorKind::I, 0, l), Rotor::new(RotorKind::II, 0, m), Rotor::new(RotorKind::III, 0, r), reflector);
                    for x in 0..26u8 {
                        assert_eq!(scrambler.encode(x, 0), enigma.press_no_step_for_test(x));
                    }
                }
            }
        }
    }

    #[test]
    fn indicator_formatting() {
        let left = Rotor::new(RotorKind::I, 0, 0);
        let middle = Rotor::new(RotorKind::II, 0, 0);
        let right = Rotor::new(RotorKind::III, 0, 0);
        let reflector = Reflector::new(ReflectorKind::B);
        let mut scrambler = BombeEnigma::build(&left, &middle, &right, &reflector);
        scrambler.set_rotation(0, 1, 2);
        assert_eq!(scrambler.indicator(), "ABC");
    }
}
