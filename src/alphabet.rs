//! Letter <-> index conversions shared by every other module.
//!
//! Internally every letter is a `u8` in `0..26`, with `0` meaning `'a'`. Inputs are
//! case-folded to lowercase on the way in; uppercasing only happens at the
//! presentation boundary (`Enigma::encode`'s return value, stop indicators, etc).

use crate::error::{EnigmaError, EnigmaResult};

/// Converts a character to its `0..26` alphabet index, case-folding first.
///
/// # Errors
/// Returns [`EnigmaError::InvalidInput`] if `c` is not an ASCII letter.
pub fn index_of(c: char) -> EnigmaResult<u8> {
    let lower = c.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Ok(lower as u8 - b'a')
    } else {
        Err(EnigmaError::InvalidInput(format!("'{c}' is not an alphabetic character")))
    }
}

/// Converts a `0..26` alphabet index back to its lowercase letter.
///
/// Panics if `index >= 26`; callers in this crate never construct an out-of-range
/// index, so this is an internal invariant rather than a user-facing error.
pub fn letter_at(index: u8) -> char {
    assert!(index < 26, "alphabet index out of range: {index}");
    (b'a' + index) as char
}

/// Lowercases and validates a whole string of letters (and, optionally, spaces).
pub fn to_indices(text: &str, allow_space: bool) -> EnigmaResult<Vec<u8>> {
    text.chars()
        .filter_map(|c| {
            if allow_space && c == ' ' {
                None
            } else {
                Some(index_of(c))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_letter() {
        for i in 0..26u8 {
            let letter = letter_at(i);
            assert_eq!(index_of(letter).unwrap(), i);
            assert_eq!(index_of(letter.to_ascii_uppercase()).unwrap(), i);
        }
    }

    #[test]
    fn rejects_non_alphabetic() {
        assert!(index_of('1').is_err());
        assert!(index_of(' ').is_err());
    }
}
