//! Deterministic randomness, for recovering keys from a seed.
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// A randomness source which hands out the bytes of a seed, in order, once.
///
/// Key generation draws everything it needs through this, so the same seed
/// always yields the same keys. Once the seed runs dry, [`RngCore::try_fill_bytes`]
/// fails instead of repeating or inventing bytes.
///
/// The seed is expected to carry real entropy, e.g. a BIP-39 seed derived from
/// a mnemonic, which is why this is marked as a [`CryptoRng`].
pub struct SeedReader {
    seed: Vec<u8>,
    position: usize,
}

impl SeedReader {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: seed.to_vec(),
            position: 0,
        }
    }

    /// How many bytes are left to read.
    pub fn remaining(&self) -> usize {
        self.seed.len() - self.position
    }
}

impl Drop for SeedReader {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl RngCore for SeedReader {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    /// # Panics
    ///
    /// Panics if the seed is exhausted; use `try_fill_bytes` to handle that.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("{e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        if dest.len() > self.remaining() {
            return Err(rand_core::Error::new("seed exhausted"));
        }
        let end = self.position + dest.len();
        dest.copy_from_slice(&self.seed[self.position..end]);
        self.position = end;
        Ok(())
    }
}

impl CryptoRng for SeedReader {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reads_in_order_then_fails() {
        let mut rng = SeedReader::new(&[1, 2, 3, 4, 5]);
        let mut buf = [0u8; 2];
        rng.try_fill_bytes(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        rng.try_fill_bytes(&mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
        assert!(rng.try_fill_bytes(&mut buf).is_err());
        // A failed read consumes nothing.
        assert_eq!(rng.remaining(), 1);
    }
}
