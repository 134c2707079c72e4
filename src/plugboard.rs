//! The plugboard: a partial involution on the alphabet.
//!
//! Storage is a flat `[u8; 26]` identity-by-default wiring array rather than a
//! `HashMap`, since it's copied into every `Enigma` and every Bombe sweep worker and
//! needs to be cheap to clone.

use crate::alphabet;
use crate::error::{EnigmaError, EnigmaResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Plugboard {
    wiring: [u8; 26],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::identity()
    }
}

impl Plugboard {
    pub fn identity() -> Self {
        let mut wiring = [0u8; 26];
        for (i, w) in wiring.iter_mut().enumerate() {
            *w = i as u8;
        }
        Self { wiring }
    }

    /// Parses a whitespace-separated string of two-letter pairs, e.g. `"ab cd"`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if any group is not exactly two letters,
    /// or if a letter appears in more than one pair.
    pub fn parse(spec: &str) -> EnigmaResult<Self> {
        let mut board = Self::identity();
        for group in spec.split_whitespace() {
            let letters: Vec<char> = group.chars().collect();
            if letters.len() != 2 {
                return Err(EnigmaError::InvalidInput(format!(
                    "plugboard group must be exactly two letters: {group}"
                )));
            }
            let a = alphabet::index_of(letters[0])?;
            let b = alphabet::index_of(letters[1])?;
            board.add(a, b)?;
        }
        Ok(board)
    }

    /// Builds a plugboard directly from a wiring array, e.g. one assembled letter by
    /// letter from the Bombe's checking machine rather than parsed from text.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `wiring` is not an involution
    /// (`wiring[wiring[i]] != i` for some `i`).
    pub fn from_wiring(wiring: [u8; 26]) -> EnigmaResult<Self> {
        for (i, &w) in wiring.iter().enumerate() {
            if wiring[w as usize] != i as u8 {
                return Err(EnigmaError::InvalidInput(format!(
                    "wiring is not an involution at {}",
                    alphabet::letter_at(i as u8)
                )));
            }
        }
        Ok(Self { wiring })
    }

    /// Installs the pair `(a, b)` bidirectionally.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if either letter is already paired with
    /// something else.
    pub fn add(&mut self, a: u8, b: u8) -> EnigmaResult<()> {
        if self.wiring[a as usize] != a || self.wiring[b as usize] != b {
            return Err(EnigmaError::InvalidInput(format!(
                "letter already plugged: {} or {}",
                alphabet::letter_at(a),
                alphabet::letter_at(b)
            )));
        }
        self.wiring[a as usize] = b;
        self.wiring[b as usize] = a;
        Ok(())
    }

    /// Returns `S(c)` if `c` is paired, else `c` unchanged.
    pub fn swap(&self, c: u8) -> u8 {
        self.wiring[c as usize]
    }

    /// Renders the current pairing back into `"ab cd"` form.
    pub fn to_spec_string(&self) -> String {
        let mut seen = [false; 26];
        let mut groups = Vec::new();
        for (i, &other) in self.wiring.iter().enumerate() {
            if i as u8 == other || seen[i] {
                continue;
            }
            seen[i] = true;
            seen[other as usize] = true;
            groups.push(format!("{}{}", alphabet::letter_at(i as u8), alphabet::letter_at(other)));
        }
        groups.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaired_letters_map_to_themselves() {
        let board = Plugboard::identity();
        for c in 0..26u8 {
            assert_eq!(board.swap(c), c);
        }
    }

    #[test]
    fn involution_property() {
        let board = Plugboard::parse("ab cd xy").unwrap();
        for c in 0..26u8 {
            assert_eq!(board.swap(board.swap(c)), c);
        }
    }

    #[test]
    fn rejects_malformed_groups() {
        assert!(Plugboard::parse("abc").is_err());
        assert!(Plugboard::parse("a").is_err());
    }

    #[test]
    fn rejects_duplicate_letters() {
        assert!(Plugboard::parse("ab ac").is_err());
    }

    #[test]
    fn from_wiring_rejects_non_involution() {
        let mut wiring: [u8; 26] = std::array::from_fn(|i| i as u8);
        wiring[0] = 1; // 0 -> 1 but 1 -> 1, not an involution
        assert!(Plugboard::from_wiring(wiring).is_err());
    }

    #[test]
    fn from_wiring_accepts_valid_involution() {
        let mut wiring: [u8; 26] = std::array::from_fn(|i| i as u8);
        wiring.swap(0, 1);
        let board = Plugboard::from_wiring(wiring).unwrap();
        assert_eq!(board.swap(0), 1);
        assert_eq!(board.swap(1), 0);
    }

    #[test]
    fn round_trips_through_spec_string() {
        let board = Plugboard::parse("ab cd xy").unwrap();
        let rendered = board.to_spec_string();
        let reparsed = Plugboard::parse(&rendered).unwrap();
        assert_eq!(board, reparsed);
    }
}
