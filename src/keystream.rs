use anyhow::Result;
use blake2::{Blake2b512, Digest};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;
const BUFFER_LEN: usize = 1024;

pub struct Keystream {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl Keystream {
    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut stream = Self {
            cipher,
            buffer: Zeroizing::new(vec![0u8; BUFFER_LEN]),
            pos: 0,
        };
        stream.refill();
        stream
    }

    pub fn from_entropy() -> Self {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut key[..]);
        Self::from_key(&key)
    }

    pub fn from_seed_phrase(phrase: &str) -> Result<Self> {
        let normalized = Zeroizing::new(normalize_phrase(phrase));
        if normalized.is_empty() {
            anyhow::bail!("Seed phrase cannot be empty");
        }

        let mut hasher = Blake2b512::new();
        hasher.update(normalized.as_bytes());
        let digest = Zeroizing::new(hasher.finalize().to_vec());

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&digest[..KEY_LEN]);

        Ok(Self::from_key(&key))
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }
}

pub fn normalize_phrase(phrase: &str) -> String {
    phrase.trim().nfc().collect()
}

impl RngCore for Keystream {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            if self.pos >= self.buffer.len() {
                self.refill();
            }
            *byte = self.buffer[self.pos];
            self.buffer[self.pos] = 0;
            self.pos += 1;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Keystream {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationOptions, generate};

    #[test]
    fn test_seed_phrase_deterministic() {
        let mut a = Keystream::from_seed_phrase("correct horse").unwrap();
        let mut b = Keystream::from_seed_phrase("correct horse").unwrap();

        let mut out_a = [0u8; 64];
        let mut out_b = [0u8; 64];
        a.fill_bytes(&mut out_a);
        b.fill_bytes(&mut out_b);

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_different_phrases_different_streams() {
        let mut a = Keystream::from_seed_phrase("phrase one").unwrap();
        let mut b = Keystream::from_seed_phrase("phrase two").unwrap();
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_empty_seed_phrase() {
        let result = Keystream::from_seed_phrase("   \t\n");
        assert!(result.is_err());
        assert!(
            result
                .err()
                .unwrap()
                .to_string()
                .contains("Seed phrase cannot be empty")
        );
    }

    #[test]
    fn test_seed_phrase_normalization() {
        let mut nfc = Keystream::from_seed_phrase("café").unwrap();
        let mut nfd = Keystream::from_seed_phrase("  cafe\u{0301}\t").unwrap();
        assert_eq!(nfc.next_u64(), nfd.next_u64());
    }

    #[test]
    fn test_refill_across_buffer_boundary() {
        let mut chunked = Keystream::from_key(&[7u8; 32]);
        let mut whole = Keystream::from_key(&[7u8; 32]);

        let mut first = vec![0u8; BUFFER_LEN - 3];
        let mut second = vec![0u8; 10];
        chunked.fill_bytes(&mut first);
        chunked.fill_bytes(&mut second);

        let mut expected = vec![0u8; BUFFER_LEN + 7];
        whole.fill_bytes(&mut expected);

        assert_eq!(&expected[..BUFFER_LEN - 3], &first[..]);
        assert_eq!(&expected[BUFFER_LEN - 3..], &second[..]);
    }

    #[test]
    fn test_refill_produces_fresh_keystream() {
        let mut stream = Keystream::from_key(&[1u8; 32]);
        let mut first = vec![0u8; BUFFER_LEN];
        let mut second = vec![0u8; BUFFER_LEN];
        stream.fill_bytes(&mut first);
        stream.fill_bytes(&mut second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_entropy_streams_differ() {
        let mut a = Keystream::from_entropy();
        let mut b = Keystream::from_entropy();
        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.fill_bytes(&mut out_a);
        b.fill_bytes(&mut out_b);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_seeded_passwords_reproducible() {
        let options = GenerationOptions {
            length: 24,
            symbols: true,
            ..GenerationOptions::default()
        };

        let mut a = Keystream::from_seed_phrase("life out of balance").unwrap();
        let mut b = Keystream::from_seed_phrase("life out of balance").unwrap();

        for _ in 0..3 {
            assert_eq!(*generate(&options, &mut a), *generate(&options, &mut b));
        }
    }
}
