//! Historical cryptanalysis core: a three-rotor Enigma emulator and a
//! Turing-Welchman Bombe that runs ciphertext/crib pairs against it.
//!
//! The interactive shell in [`cli`] is a thin front end; everything it calls
//! through is plain library API, usable without a terminal attached.

pub mod alphabet;
pub mod analysis;
pub mod bombe;
pub mod bombe_enigma;
pub mod cli;
pub mod enigma;
pub mod error;
pub mod farm;
pub mod menu;
pub mod plugboard;
pub mod rotor;

pub use enigma::Enigma;
pub use error::{EnigmaError, EnigmaResult};
pub use menu::Menu;
pub use plugboard::Plugboard;
pub use rotor::{Reflector, ReflectorKind, Rotor, RotorKind};
