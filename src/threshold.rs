//! Polynomial, t-of-n sharing of a primary key.
//!
//! The primary key becomes the constant term of a random polynomial of
//! degree `t - 1`, and each party's share is that polynomial evaluated at
//! the party's identifier. Any `t` shares recover the key; fewer say nothing
//! about it.
use rand_core::CryptoRngCore;
use tracing::{debug, error, instrument};

use crate::compat::GroupBackend;
use crate::error::{KeyError, Result};
use crate::keys::SecretKey;
use crate::math::interpolate_zero;
use crate::participants::{PartyId, PartyList};
use crate::wallet::{KeyPair, SecretKeyShare};

/// Deal threshold shares of a primary key to the given parties.
///
/// `threshold` must lie in `1..=party_ids.len()`, and the parties must be distinct.
#[instrument(skip_all, err(Debug))]
pub fn generate_threshold_shares<B: GroupBackend>(
    primary: &KeyPair,
    threshold: usize,
    party_ids: &[PartyId<B>],
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<SecretKeyShare>> {
    if threshold < 1 {
        return Err(KeyError::InvalidThresholdParameter(
            "threshold cannot be < 1".to_string(),
        ));
    }
    if threshold > party_ids.len() {
        return Err(KeyError::InvalidThresholdParameter(format!(
            "threshold must be <= party count, found: {threshold} > {}",
            party_ids.len()
        )));
    }
    let parties = PartyList::new(party_ids)?;
    if primary.private_key.is_empty() {
        return Err(KeyError::InvalidThresholdParameter(
            "primary private key is empty".to_string(),
        ));
    }
    let secret = primary.secret_key::<B>()?;
    debug!(backend = B::NAME, threshold, n = parties.len(), "dealing shares");

    let f = secret.master_polynomial(rng, threshold)?;
    let shares = parties
        .iter()
        .map(|id| {
            let share = SecretKey::evaluate_at(&f, id);
            SecretKeyShare::new(&KeyPair::from_secret_key(&share), Some(id.to_hex()))
        })
        .collect();
    Ok(shares)
}

/// Deal threshold shares to the parties `1..=n`.
pub fn generate_threshold_shares_for<B: GroupBackend>(
    primary: &KeyPair,
    threshold: usize,
    n: usize,
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<SecretKeyShare>> {
    let party_ids = (1..=n as u64)
        .map(PartyId::from_u64)
        .collect::<Result<Vec<_>>>()?;
    generate_threshold_shares::<B>(primary, threshold, &party_ids, rng)
}

/// Recover the primary key pair from `threshold` of its shares.
///
/// Extra shares beyond the first `threshold` are ignored. Handing in shares
/// from a polynomial of higher degree than `threshold - 1` gives back some
/// other key, without any error.
#[instrument(skip_all, err(Debug))]
pub fn recover_secret_key<B: GroupBackend>(
    shares: &[SecretKeyShare],
    threshold: usize,
) -> Result<KeyPair> {
    if threshold < 1 {
        return Err(KeyError::InvalidThresholdParameter(
            "threshold cannot be < 1".to_string(),
        ));
    }
    if shares.len() < threshold {
        error!(have = shares.len(), threshold, "too few shares to recover key");
        return Err(KeyError::NotEnoughShares(shares.len(), threshold));
    }
    let mut points = Vec::with_capacity(threshold);
    for share in &shares[..threshold] {
        let id = share.party_id::<B>()?;
        let secret = share.key_pair().secret_key::<B>()?;
        points.push((id, *secret.scalar()));
    }
    let recovered = SecretKey::<B>::from_scalar(interpolate_zero(&points)?);
    Ok(KeyPair::from_secret_key(&recovered))
}

#[cfg(test)]
mod test {
    use rand_core::OsRng;

    use super::*;

    fn primary<B: GroupBackend>() -> KeyPair {
        KeyPair::from_secret_key(&SecretKey::<B>::random(&mut OsRng).unwrap())
    }

    fn check_any_t_shares_recover<B: GroupBackend>() {
        let pair = primary::<B>();
        for (t, n) in [(1, 1), (1, 3), (2, 3), (3, 5), (5, 5)] {
            let shares = generate_threshold_shares_for::<B>(&pair, t, n, &mut OsRng).unwrap();
            assert_eq!(shares.len(), n);
            assert_eq!(recover_secret_key::<B>(&shares, t).unwrap(), pair);

            let mut reversed = shares.clone();
            reversed.reverse();
            assert_eq!(recover_secret_key::<B>(&reversed, t).unwrap(), pair);

            if t > 1 {
                assert_ne!(recover_secret_key::<B>(&shares, t - 1).unwrap(), pair);
            }
        }
    }

    fn check_shares_carry_ids<B: GroupBackend>() {
        let pair = primary::<B>();
        let ids: Vec<_> = [3u64, 10, 255]
            .iter()
            .map(|&x| PartyId::<B>::from_u64(x).unwrap())
            .collect();
        let shares = generate_threshold_shares::<B>(&pair, 2, &ids, &mut OsRng).unwrap();
        let hex: Vec<_> = shares.iter().map(|s| s.id().unwrap()).collect();
        assert_eq!(hex, ["3", "a", "ff"]);
        assert_eq!(recover_secret_key::<B>(&shares[1..], 2).unwrap(), pair);
    }

    fn check_bad_parameters<B: GroupBackend>() {
        let pair = primary::<B>();
        assert!(matches!(
            generate_threshold_shares_for::<B>(&pair, 5, 3, &mut OsRng),
            Err(KeyError::InvalidThresholdParameter(_))
        ));
        assert!(matches!(
            generate_threshold_shares_for::<B>(&pair, 0, 3, &mut OsRng),
            Err(KeyError::InvalidThresholdParameter(_))
        ));
        let one = PartyId::<B>::from_u64(1).unwrap();
        assert_eq!(
            generate_threshold_shares::<B>(&pair, 2, &[one, one], &mut OsRng).unwrap_err(),
            KeyError::DuplicatePartyId("1".to_string())
        );

        let shares = generate_threshold_shares_for::<B>(&pair, 3, 4, &mut OsRng).unwrap();
        assert_eq!(
            recover_secret_key::<B>(&shares[..2], 3),
            Err(KeyError::NotEnoughShares(2, 3))
        );
        let twice = [shares[0].clone(), shares[0].clone(), shares[1].clone()];
        assert!(matches!(
            recover_secret_key::<B>(&twice, 3),
            Err(KeyError::DuplicatePartyId(_))
        ));
        let empty = KeyPair::new(pair.public_key.clone(), "");
        assert_eq!(
            generate_threshold_shares_for::<B>(&empty, 2, 3, &mut OsRng).unwrap_err(),
            KeyError::InvalidThresholdParameter("primary private key is empty".to_string())
        );

        let anonymous = SecretKeyShare::new(&shares[0].key_pair(), None);
        assert!(matches!(
            recover_secret_key::<B>(&[anonymous, shares[1].clone()], 2),
            Err(KeyError::InvalidPartyId(_))
        ));
    }

    fn check_all<B: GroupBackend>() {
        check_any_t_shares_recover::<B>();
        check_shares_carry_ids::<B>();
        check_bad_parameters::<B>();
    }

    #[cfg(feature = "blst")]
    #[test]
    fn test_threshold_blst() {
        check_all::<crate::compat::Blst>();
    }

    #[cfg(feature = "portable")]
    #[test]
    fn test_threshold_portable() {
        check_all::<crate::compat::Bls12381>();
    }
}
