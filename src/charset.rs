use rand::{Rng, RngCore};
use std::fmt;

pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_-+={}[]|/?.<,>~:`;\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    // Mandatory-inclusion priority.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c as u8))
    }

    pub fn sample<R: RngCore + ?Sized>(self, rng: &mut R) -> char {
        let alphabet = self.alphabet();
        alphabet[rng.gen_range(0..alphabet.len())] as char
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "Uppercase (A-Z)",
            CharacterClass::Lowercase => "Lowercase (a-z)",
            CharacterClass::Digit => "Numbers (0-9)",
            CharacterClass::Symbol => "Symbols (!@#$%)",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Uppercase => "upper",
            CharacterClass::Lowercase => "lower",
            CharacterClass::Digit => "numbers",
            CharacterClass::Symbol => "symbols",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(UPPERCASE.len(), 26);
        assert_eq!(LOWERCASE.len(), 26);
        assert_eq!(DIGITS.len(), 10);
        assert_eq!(
            SYMBOLS.len(),
            30,
            "Symbol alphabet should have 30 characters, found {}",
            SYMBOLS.len()
        );
    }

    #[test]
    fn test_alphabets_have_no_duplicates_or_overlap() {
        let mut seen = HashSet::new();
        for class in CharacterClass::ALL {
            for &byte in class.alphabet() {
                assert!(
                    seen.insert(byte),
                    "Byte {:?} appears twice across alphabets",
                    byte as char
                );
            }
        }
        assert_eq!(seen.len(), 92);
    }

    #[test]
    fn test_symbol_alphabet_is_exact() {
        assert_eq!(
            std::str::from_utf8(SYMBOLS).unwrap(),
            "!@#$%^&*()_-+={}[]|/?.<,>~:`;\""
        );
        assert!(CharacterClass::Symbol.contains('"'));
        assert!(CharacterClass::Symbol.contains(';'));
        assert!(CharacterClass::Symbol.contains('`'));
        assert!(!CharacterClass::Symbol.contains('\''));
        assert!(!CharacterClass::Symbol.contains(' '));
    }

    #[test]
    fn test_sample_stays_in_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        for class in CharacterClass::ALL {
            for _ in 0..500 {
                let c = class.sample(&mut rng);
                assert!(class.contains(c), "{} sampled foreign char {:?}", class, c);
            }
        }
    }

    #[test]
    fn test_sample_covers_digit_alphabet() {
        let mut rng = StdRng::seed_from_u64(11);
        let drawn: HashSet<char> = (0..1000)
            .map(|_| CharacterClass::Digit.sample(&mut rng))
            .collect();
        assert_eq!(drawn.len(), 10);
    }

    #[test]
    fn test_contains_rejects_non_ascii() {
        assert!(!CharacterClass::Uppercase.contains('Ä'));
        assert!(!CharacterClass::Lowercase.contains('é'));
        assert!(CharacterClass::Uppercase.contains('Q'));
        assert!(!CharacterClass::Uppercase.contains('q'));
    }
}
