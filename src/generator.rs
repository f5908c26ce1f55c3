use crate::charset::CharacterClass;
use crate::error::OptionsError;
use rand::{Rng, RngCore};
use zeroize::Zeroizing;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 32;
pub const DEFAULT_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
        }
    }
}

impl GenerationOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(OptionsError::LengthOutOfRange {
                length: self.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        Ok(())
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Digit => self.numbers,
            CharacterClass::Symbol => self.symbols,
        }
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        let flag = match class {
            CharacterClass::Uppercase => &mut self.uppercase,
            CharacterClass::Lowercase => &mut self.lowercase,
            CharacterClass::Digit => &mut self.numbers,
            CharacterClass::Symbol => &mut self.symbols,
        };
        *flag = !*flag;
    }

    // Mandatory-inclusion order.
    pub fn active_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.is_enabled(*class))
            .collect()
    }

    pub fn pool_size(&self) -> usize {
        self.active_classes()
            .iter()
            .map(|class| class.alphabet().len())
            .sum()
    }

    pub fn entropy_bits(&self) -> f64 {
        match self.pool_size() {
            0 => 0.0,
            pool => self.length as f64 * (pool as f64).log2(),
        }
    }
}

/// Generates one password for `options`.
///
/// Every enabled class contributes at least one character. When `length` is
/// smaller than the number of enabled classes the result keeps one character
/// per class and is therefore longer than requested. With no class enabled
/// the result is empty.
pub fn generate<R: RngCore + ?Sized>(
    options: &GenerationOptions,
    rng: &mut R,
) -> Zeroizing<String> {
    let classes = options.active_classes();

    if classes.is_empty() {
        log::debug!("No character classes enabled, returning empty password");
        return Zeroizing::new(String::new());
    }

    log::debug!(
        "Generating {} chars from {} classes",
        options.length.max(classes.len()),
        classes.len()
    );

    let mut chars: Zeroizing<Vec<char>> =
        Zeroizing::new(Vec::with_capacity(options.length.max(classes.len())));

    for class in &classes {
        chars.push(class.sample(rng));
    }

    while chars.len() < options.length {
        let class = classes[rng.gen_range(0..classes.len())];
        chars.push(class.sample(rng));
    }

    shuffle(chars.as_mut_slice(), rng);

    Zeroizing::new(chars.iter().collect())
}

// Fisher-Yates, last index down to 1.
pub fn shuffle<T, R: RngCore + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
