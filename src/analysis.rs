//! Statistical cryptanalysis: brute-force rotor-order/rotation search and plugboard
//! hill-climbing, scored by n-gram or index-of-coincidence fitness.
//!
//! This is a supplement to the crib-driven Bombe attack in [`crate::bombe`] — useful
//! when no crib is available, at the cost of being a heuristic rather than a proof.
//! Ring-setting recovery is intentionally not offered here: rings are assumed `a`
//! throughout, the same assumption the Bombe sweep makes.

pub mod fitness;

use std::cmp::Ordering;

use itertools::iproduct;
use log::debug;
use rayon::prelude::*;

use crate::enigma::Enigma;
use crate::plugboard::Plugboard;
use crate::rotor::{Reflector, ReflectorKind, Rotor, RotorKind, ALL_ROTORS};
use fitness::FitnessFunction;

pub enum EnigmaAnalysisRotors {
    Three,
    Five,
}

/// A candidate machine configuration, paired with the fitness score of the text it
/// produces against a fixed ciphertext.
#[derive(Debug, Copy, Clone)]
pub struct ScoredConfiguration {
    pub left: Rotor,
    pub middle: Rotor,
    pub right: Rotor,
    pub plugboard: Plugboard,
    pub score: f32,
}

impl PartialEq for ScoredConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl PartialOrd for ScoredConfiguration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.score.partial_cmp(&other.score)
    }
}

/// For each distinct rotor order (and reflector B), finds the starting rotation that
/// maximizes `f`'s score against `cipher`, then keeps the `required_keys` best orders.
pub fn find_rotor_configurations(
    cipher: &str,
    rotors: EnigmaAnalysisRotors,
    plugboard: Plugboard,
    required_keys: usize,
    f: &(impl FitnessFunction + Sync),
) -> Vec<ScoredConfiguration> {
    let available_rotors: &[RotorKind] = match rotors {
        EnigmaAnalysisRotors::Three => &ALL_ROTORS[..3],
        EnigmaAnalysisRotors::Five => &ALL_ROTORS,
    };

    let orders: Vec<(RotorKind, RotorKind, RotorKind)> = iproduct!(available_rotors, available_rotors, available_rotors)
        .map(|(a, b, c)| (*a, *b, *c))
        .filter(|(a, b, c)| a != b && a != c && b != c)
        .collect();

    let mut key_set: Vec<ScoredConfiguration> = orders
        .into_par_iter()
        .filter_map(|(a, b, c)| {
            debug!("{a:?} {b:?} {c:?}");
            let mut max_fitness: f32 = -1e30;
            let mut best: Option<(Rotor, Rotor, Rotor)> = None;

            const RANGE: std::ops::Range<u8> = 0..26;
            iproduct!(RANGE, RANGE, RANGE).for_each(|(i, j, k)| {
                let left = Rotor::new(a, 0, i);
                let middle = Rotor::new(b, 0, j);
                let right = Rotor::new(c, 0, k);

                let mut enigma = Enigma::new(left, middle, right, Reflector::new(ReflectorKind::B));
                enigma.set_plugboard(plugboard);

                if let Ok(text) = enigma.encode(cipher) {
                    let fitness = f.score(&text);
                    if fitness > max_fitness {
                        max_fitness = fitness;
                        best = Some((left, middle, right));
                    }
                }
            });

            best.map(|(left, middle, right)| ScoredConfiguration {
                left,
                middle,
                right,
                plugboard,
                score: max_fitness,
            })
        })
        .collect();

    key_set.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap().reverse());
    key_set.truncate(required_keys);
    key_set
}

/// Greedily adds up to `max_plugs` stecker pairs, keeping each addition only if it
/// doesn't reduce the fitness score.
pub fn find_plugs(cipher: &str, left: Rotor, middle: Rotor, right: Rotor, max_plugs: u8, f: &(impl FitnessFunction + Sync)) -> ScoredConfiguration {
    let mut board = Plugboard::identity();
    let mut max_fitness = -1e30_f32;
    let mut best = ScoredConfiguration {
        left,
        middle,
        right,
        plugboard: board,
        score: max_fitness,
    };

    for _ in 0..max_plugs {
        let (fitness, next_plug) = find_plug(left, middle, right, board, cipher, f);
        let Some((a, b)) = next_plug else { break };

        // The next best plug would make it worse, so stop.
        if fitness < max_fitness {
            break;
        }

        board.add(a, b).expect("both letters confirmed unplugged by find_plug");
        max_fitness = fitness;
        best = ScoredConfiguration {
            left,
            middle,
            right,
            plugboard: board,
            score: max_fitness,
        };
    }

    best
}

fn find_plug(left: Rotor, middle: Rotor, right: Rotor, board: Plugboard, cipher: &str, f: &(impl FitnessFunction + Sync)) -> (f32, Option<(u8, u8)>) {
    let mut optimal_plug = None;
    let mut max_fitness = -1e30_f32;

    for i in 0..26u8 {
        if board.swap(i) != i {
            continue;
        }
        for j in (i + 1)..26u8 {
            if board.swap(j) != j {
                continue;
            }

            let mut candidate = board;
            if candidate.add(i, j).is_err() {
                continue;
            }

            let mut enigma = Enigma::new(left, middle, right, Reflector::new(ReflectorKind::B));
            enigma.set_plugboard(candidate);

            if let Ok(text) = enigma.encode(cipher) {
                let fitness = f.score(&text);
                if fitness > max_fitness {
                    max_fitness = fitness;
                    optimal_plug = Some((i, j));
                }
            }
        }
    }

    (max_fitness, optimal_plug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness::IoCFitness;

    #[test]
    fn rotor_search_returns_requested_number_of_candidates() {
        let mut enigma = Enigma::from_kinds(RotorKind::III, RotorKind::II, RotorKind::I, ReflectorKind::B);
        enigma.set_rotations(5, 10, 2);
        let plaintext = "thequickbrownfoxjumpsoverthelazydogagainandagainandagain";
        let cipher = enigma.encode(plaintext).unwrap();

        let found = find_rotor_configurations(&cipher, EnigmaAnalysisRotors::Three, Plugboard::identity(), 1, &IoCFitness::new());
        assert_eq!(found.len(), 1);
        assert!(found[0].score.is_finite());
    }
}
