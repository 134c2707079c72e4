//! The search driver: sweeps every rotor order in parallel and aggregates stops.
//!
//! Rotor-order enumeration follows the same `iproduct!`-then-`filter`-then-
//! `into_par_iter` shape used for exhaustive rotor search elsewhere in this crate:
//! build the candidate tuples with `itertools`, discard the non-distinct ones, then
//! hand the rest to `rayon` for shared-nothing data parallelism.

use std::time::Instant;

use itertools::iproduct;
use log::info;
use rayon::prelude::*;

use crate::bombe::{Bombe, Stop};
use crate::bombe_enigma::BombeEnigma;
use crate::menu::Menu;
use crate::rotor::{Reflector, ReflectorKind, Rotor, RotorKind, ALL_ROTORS};

/// One rotor order's sweep result, paired with the configuration that produced it.
#[derive(Debug, Clone)]
pub struct FarmStop {
    pub stop: Stop,
    pub configuration: String,
}

/// Sweeps all 60 distinct (left, middle, right) rotor orders against a fixed
/// ciphertext/crib pair, reflector B only.
///
/// Reflector C is deliberately never tried here: the outer loop only ever runs for
/// one reflector, matching the historical search driver this is ported from.
pub fn run(cipher: &str, crib: &str, check: bool) -> crate::error::EnigmaResult<Vec<FarmStop>> {
    let menu = Menu::build(cipher, crib)?;

    let available_rotors: &[RotorKind] = &ALL_ROTORS;
    let orders: Vec<(RotorKind, RotorKind, RotorKind)> = iproduct!(available_rotors, available_rotors, available_rotors)
        .map(|(a, b, c)| (*a, *b, *c))
        .filter(|(a, b, c)| a != b && a != c && b != c)
        .collect();

    info!("farm sweep starting: {} rotor orders, check={}", orders.len(), check);

    let results: Vec<FarmStop> = orders
        .into_par_iter()
        .flat_map(|(l, m, r)| {
            let started = Instant::now();

            let reflector = Reflector::new(ReflectorKind::B);
            let left = Rotor::new(l, 0, 0);
            let middle = Rotor::new(m, 0, 0);
            let right = Rotor::new(r, 0, 0);
            let scrambler = BombeEnigma::build(&left, &middle, &right, &reflector);

            let bombe = Bombe::new(&menu, scrambler, check);
            let configuration = format!("B, {l:?}, {m:?}, {r:?}");

            let stops = bombe.run_sweep();
            info!("rotor order {configuration} complete: {} stop(s) in {:?}", stops.len(), started.elapsed());

            stops
                .into_iter()
                .map(move |stop| FarmStop {
                    stop,
                    configuration: configuration.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_sixty_distinct_rotor_orders() {
        let available_rotors: &[RotorKind] = &ALL_ROTORS;
        let orders: Vec<(RotorKind, RotorKind, RotorKind)> = iproduct!(available_rotors, available_rotors, available_rotors)
            .map(|(a, b, c)| (*a, *b, *c))
            .filter(|(a, b, c)| a != b && a != c && b != c)
            .collect();
        assert_eq!(orders.len(), 60);
    }
}
