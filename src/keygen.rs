//! Generating a client's primary key, fresh or recovered from a seed.
use chrono::{DateTime, Utc};
use rand_core::CryptoRngCore;
use tracing::{debug, instrument};

use crate::compat::GroupBackend;
use crate::error::Result;
use crate::keys::SecretKey;
use crate::rng::SeedReader;
use crate::wallet::{KeyPair, Wallet};

fn do_generate<B: GroupBackend>(
    rng: &mut impl CryptoRngCore,
    created_at: DateTime<Utc>,
) -> Result<Wallet> {
    let secret = SecretKey::<B>::random(rng)?;
    let public_key = secret.public_key();
    let wallet = Wallet::new(&public_key, vec![KeyPair::from_secret_key(&secret)], created_at);
    debug!(backend = B::NAME, client_id = wallet.client_id(), "generated primary key");
    Ok(wallet)
}

/// Generate a wallet from a seed, stamped with the current time.
///
/// The key is a pure function of the seed: see [`generate_keys_at`] for a
/// version whose whole output is.
pub fn generate_keys<B: GroupBackend>(seed: &[u8]) -> Result<Wallet> {
    generate_keys_at::<B>(seed, Utc::now())
}

/// Generate a wallet from a seed, with a given creation time.
///
/// The seed is consumed [`crate::constants::WIDE_SCALAR_LEN`] bytes at a time.
/// If it runs out before a key has been drawn, this fails with
/// [`crate::KeyError::EntropyExhausted`].
#[instrument(skip_all, err(Debug))]
pub fn generate_keys_at<B: GroupBackend>(
    seed: &[u8],
    created_at: DateTime<Utc>,
) -> Result<Wallet> {
    debug!(seed_len = seed.len(), "recovering key from seed");
    let mut rng = SeedReader::new(seed);
    do_generate::<B>(&mut rng, created_at)
}

/// Generate a fresh wallet from some source of randomness.
#[instrument(skip_all, err(Debug))]
pub fn generate_keys_with_rng<B: GroupBackend>(rng: &mut impl CryptoRngCore) -> Result<Wallet> {
    do_generate::<B>(rng, Utc::now())
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use rand_core::OsRng;

    use super::*;
    use crate::constants::WIDE_SCALAR_LEN;
    use crate::error::KeyError;

    fn check_seed_determinism<B: GroupBackend>() {
        let seed = [0x42u8; WIDE_SCALAR_LEN];
        let at = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        let a = generate_keys_at::<B>(&seed, at).unwrap();
        let b = generate_keys_at::<B>(&seed, at).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());

        let mut other = seed;
        other[0] ^= 1;
        let c = generate_keys_at::<B>(&other, at).unwrap();
        assert_ne!(a.client_id(), c.client_id());
    }

    fn check_wallet_is_consistent<B: GroupBackend>() {
        let wallet = generate_keys_with_rng::<B>(&mut OsRng).unwrap();
        assert_eq!(wallet.keys().len(), 1);
        assert_eq!(wallet.keys()[0].public_key, wallet.client_public_key());
        assert!(wallet.has_valid_client_id::<B>().unwrap());
        let secret = wallet.keys()[0].secret_key::<B>().unwrap();
        assert_eq!(secret.public_key().to_hex(), wallet.client_public_key());
    }

    fn check_short_seed<B: GroupBackend>() {
        assert_eq!(
            generate_keys::<B>(&[1u8; WIDE_SCALAR_LEN - 1]),
            Err(KeyError::EntropyExhausted)
        );
        assert_eq!(generate_keys::<B>(&[]), Err(KeyError::EntropyExhausted));
    }

    fn check_all<B: GroupBackend>() {
        check_seed_determinism::<B>();
        check_wallet_is_consistent::<B>();
        check_short_seed::<B>();
    }

    #[cfg(feature = "blst")]
    #[test]
    fn test_keygen_blst() {
        check_all::<crate::compat::Blst>();
    }

    #[cfg(feature = "portable")]
    #[test]
    fn test_keygen_portable() {
        check_all::<crate::compat::Bls12381>();
    }
}
