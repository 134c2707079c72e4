//! Error taxonomy for the Enigma/Bombe core.
//!
//! `InvalidInput` and `EmptyMenu` are ordinary, caller-facing failures: bad rotor
//! names, mismatched crib/ciphertext lengths, and the like. They are returned, never
//! panicked. Invariant violations inside the Bombe's wire propagation (a broken
//! diagonal-board symmetry, `live_wires` outside `0..=26`) are bugs in this crate, not
//! bad input, so they stay as `debug_assert!`/`panic!` at the point of detection rather
//! than threading through `Result`.

#[derive(Debug, thiserror::Error)]
pub enum EnigmaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("menu has no connected component to crack: {0}")]
    EmptyMenu(String),
}

pub type EnigmaResult<T> = Result<T, EnigmaError>;
