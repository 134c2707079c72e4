//! The Bombe: wire-matrix energization, stop detection, and the checking machine.
//!
//! `energize` is written as an explicit work stack rather than the historical
//! recursion — depth here is bounded by the 676 possible wires, which would be fine
//! either way, but a stack sidesteps any assumption about the host's call-stack size
//! and makes the early exit on `live_wires == 26` a plain loop condition.

use log::trace;

use crate::bombe_enigma::BombeEnigma;
use crate::menu::Menu;
use crate::plugboard::Plugboard;

/// A fixed stecker hypothesis the Bombe tests every hypothesis against: the menu's
/// most-connected node is assumed steckered to 'b' (index 1). Any contradiction this
/// produces is just as informative as a contradiction from the true pairing, since
/// the diagonal board propagates the same implications regardless of which partner
/// is hypothesized first.
const TEST_REGISTER_PAIR: u8 = 1;

fn wire_index(i: u8, j: u8) -> usize {
    26 * i as usize + j as usize
}

/// The outcome of a single rotation's sweep: a configuration the Bombe could not
/// eliminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub indicator: String,
    pub plugboard: Plugboard,
}

pub struct Bombe<'a> {
    menu: &'a Menu,
    scrambler: BombeEnigma,
    wires: [bool; 676],
    live_wires: u32,
    test_register: u8,
    check: bool,
}

impl<'a> Bombe<'a> {
    pub fn new(menu: &'a Menu, scrambler: BombeEnigma, check: bool) -> Self {
        Self {
            menu,
            scrambler,
            wires: [false; 676],
            live_wires: 0,
            test_register: menu.test_register(),
            check,
        }
    }

    fn reset_wires(&mut self) {
        self.wires = [false; 676];
        self.live_wires = 0;
    }

    /// Propagates the stecker hypothesis `(i, j)` through every scrambler-connected
    /// wire reachable from it, stopping early once `test_register`'s cable saturates.
    fn energize(&mut self, i: u8, j: u8) {
        let mut stack = vec![(i, j)];
        while let Some((i, j)) = stack.pop() {
            if self.live_wires == 26 {
                return;
            }
            let idx = wire_index(i, j);
            if self.wires[idx] {
                continue;
            }
            self.wires[idx] = true;
            self.wires[wire_index(j, i)] = true;

            if i == self.test_register || j == self.test_register {
                self.live_wires += 1;
                if self.live_wires == 26 {
                    return;
                }
            }

            for &k in self.menu.neighbors(i) {
                let shift = self.menu.crib_offset(i, k).expect("adjacency implies a surviving edge");
                let e = self.scrambler.encode(j, (shift % 26) as u8);
                if !self.wires[wire_index(k, e)] {
                    stack.push((k, e));
                }
            }
            if i != j {
                for &k in self.menu.neighbors(j) {
                    let shift = self.menu.crib_offset(j, k).expect("adjacency implies a surviving edge");
                    let e = self.scrambler.encode(i, (shift % 26) as u8);
                    if !self.wires[wire_index(k, e)] {
                        stack.push((k, e));
                    }
                }
            }
        }
    }

    /// Re-energizes from `(test_register, pair)` if necessary, then reads the
    /// resulting wire state into a full plugboard. Returns `None` on a contradiction
    /// (some letter has more than one live partner).
    fn checking_machine(&mut self, pair: u8) -> Option<Plugboard> {
        if pair != TEST_REGISTER_PAIR {
            self.reset_wires();
            self.energize(self.test_register, pair);
        }

        let mut wiring: [u8; 26] = std::array::from_fn(|i| i as u8);
        wiring[self.test_register as usize] = pair;
        wiring[pair as usize] = self.test_register;

        for i in 0..26u8 {
            let live: Vec<u8> = (0..26u8).filter(|&j| self.wires[wire_index(i, j)]).collect();
            match live.len() {
                0 => continue,
                1 => {
                    let j = live[0];
                    wiring[i as usize] = j;
                }
                _ => return None,
            }
        }

        Plugboard::from_wiring(wiring).ok()
    }

    /// Runs `checkStop` against the hypothesis currently energized in `self.wires`.
    fn check_stop(&mut self) -> Option<Plugboard> {
        match self.live_wires {
            26 => None,
            25 => {
                let partner = (0..26u8).find(|&x| !self.wires[wire_index(self.test_register, x)])?;
                if self.check {
                    self.checking_machine(partner)
                } else {
                    let mut wiring: [u8; 26] = std::array::from_fn(|i| i as u8);
                    wiring[self.test_register as usize] = partner;
                    wiring[partner as usize] = self.test_register;
                    Plugboard::from_wiring(wiring).ok()
                }
            }
            1 => {
                if self.check {
                    self.checking_machine(TEST_REGISTER_PAIR)
                } else {
                    let mut wiring: [u8; 26] = std::array::from_fn(|i| i as u8);
                    wiring[self.test_register as usize] = TEST_REGISTER_PAIR;
                    wiring[TEST_REGISTER_PAIR as usize] = self.test_register;
                    Plugboard::from_wiring(wiring).ok()
                }
            }
            _ => {
                if !self.check {
                    return Some(Plugboard::identity());
                }
                let mut found: Option<Plugboard> = None;
                let mut candidates = 0;
                for pair in 0..26u8 {
                    if let Some(board) = self.checking_machine(pair) {
                        candidates += 1;
                        found = Some(board);
                    }
                }
                match candidates {
                    0 => None,
                    1 => found,
                    _ => Some(Plugboard::identity()),
                }
            }
        }
    }

    /// Sweeps all `26^3` rotation settings for this Bombe's fixed rotor order,
    /// emitting a [`Stop`] for every rotation the energization could not eliminate.
    /// Emission order is lexicographic in `(left, middle, right)`.
    pub fn run_sweep(mut self) -> Vec<Stop> {
        let mut stops = Vec::new();
        for l in 0..26u8 {
            for m in 0..26u8 {
                for r in 0..26u8 {
                    self.scrambler.set_rotation(l, m, r);
                    self.reset_wires();
                    self.energize(self.test_register, TEST_REGISTER_PAIR);
                    if let Some(plugboard) = self.check_stop() {
                        let indicator = self.scrambler.indicator().to_lowercase();
                        trace!("stop at {indicator}: {}", plugboard.to_spec_string());
                        stops.push(Stop { indicator, plugboard });
                    }
                }
            }
        }
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::{Reflector, ReflectorKind, Rotor, RotorKind};

    fn scrambler() -> BombeEnigma {
        let left = Rotor::new(RotorKind::I, 0, 0);
        let middle = Rotor::new(RotorKind::II, 0, 0);
        let right = Rotor::new(RotorKind::III, 0, 0);
        let reflector = Reflector::new(ReflectorKind::B);
        BombeEnigma::build(&left, &middle, &right, &reflector)
    }

    #[test]
    fn energize_is_idempotent() {
        let menu = Menu::build("abcdefghij", "jihgfedcba").unwrap();
        let mut bombe = Bombe::new(&menu, scrambler(), false);
        bombe.energize(bombe.test_register, TEST_REGISTER_PAIR);
        let wires_once = bombe.wires;
        let live_once = bombe.live_wires;
        bombe.energize(bombe.test_register, TEST_REGISTER_PAIR);
        assert_eq!(bombe.wires, wires_once);
        assert_eq!(bombe.live_wires, live_once);
    }

    #[test]
    fn wire_matrix_stays_symmetric() {
        let menu = Menu::build("abcdefghij", "jihgfedcba").unwrap();
        let mut bombe = Bombe::new(&menu, scrambler(), false);
        bombe.energize(bombe.test_register, TEST_REGISTER_PAIR);
        for i in 0..26u8 {
            for j in 0..26u8 {
                assert_eq!(bombe.wires[wire_index(i, j)], bombe.wires[wire_index(j, i)]);
            }
        }
    }

    #[test]
    fn sweep_emits_in_lexicographic_indicator_order() {
        let menu = Menu::build("abcdefghij", "jihgfedcba").unwrap();
        let bombe = Bombe::new(&menu, scrambler(), false);
        let stops = bombe.run_sweep();
        let indicators: Vec<&str> = stops.iter().map(|s| s.indicator.as_str()).collect();
        let mut sorted = indicators.clone();
        sorted.sort();
        assert_eq!(indicators, sorted);
    }
}
