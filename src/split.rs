//! Additive, n-of-n splitting of a primary key.
//!
//! The shares sum to the primary key modulo the group order, so partial
//! signatures made by every share over the same hash add up to the primary
//! key's signature. This is *not* a threshold scheme: every single share is
//! needed, and losing one makes the primary key unrecoverable. For t-of-n
//! sharing, see [`crate::threshold`].
use chrono::Utc;
use rand_core::CryptoRngCore;
use tracing::{debug, error, instrument};

use crate::compat::GroupBackend;
use crate::error::{KeyError, Result};
use crate::keys::{PublicKey, SecretKey};
use crate::wallet::{KeyPair, Wallet};

fn primary_secret<B: GroupBackend>(primary: &KeyPair) -> Result<SecretKey<B>> {
    if primary.private_key.is_empty() {
        return Err(KeyError::InvalidSplitParameter(
            "primary private key is empty".to_string(),
        ));
    }
    primary.secret_key::<B>().map_err(|e| {
        error!("primary key pair is unusable");
        KeyError::InvalidSplitParameter(e.to_string())
    })
}

fn do_split<B: GroupBackend>(
    rng: &mut impl CryptoRngCore,
    primary: &SecretKey<B>,
    n: usize,
) -> Result<Vec<SecretKey<B>>> {
    let mut shares = Vec::with_capacity(n);
    for _ in 1..n {
        shares.push(SecretKey::<B>::random(rng)?);
    }
    let aggregate: SecretKey<B> = shares.iter().copied().sum();
    shares.push(*primary - aggregate);
    Ok(shares)
}

/// Split a primary key pair into `n` key pairs summing to it.
///
/// `n` must be at least 2; the primary pair must carry a private key, and
/// its public key, if present, must match.
#[instrument(skip_all, err(Debug))]
pub fn split_key<B: GroupBackend>(
    primary: &KeyPair,
    n: usize,
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<KeyPair>> {
    if n < 2 {
        return Err(KeyError::InvalidSplitParameter(format!(
            "share count cannot be < 2, found: {n}"
        )));
    }
    let secret = primary_secret::<B>(primary)?;
    debug!(backend = B::NAME, n, "splitting key");
    let shares = do_split(rng, &secret, n)?;
    Ok(shares.iter().map(KeyPair::from_secret_key).collect())
}

/// Split the primary key of a wallet, returning a wallet holding the shares.
///
/// The client identity is unchanged: `client_key` and `client_id` still
/// refer to the primary public key.
#[instrument(skip_all, err(Debug))]
pub fn split_wallet<B: GroupBackend>(
    primary: &Wallet,
    n: usize,
    rng: &mut impl CryptoRngCore,
) -> Result<Wallet> {
    let key = primary.keys().first().ok_or_else(|| {
        KeyError::InvalidSplitParameter("wallet holds no key pair".to_string())
    })?;
    let public_key = PublicKey::<B>::from_hex(primary.client_public_key())
        .map_err(|e| KeyError::InvalidSplitParameter(e.to_string()))?;
    if key.public_key != primary.client_public_key() {
        error!("wallet key pair does not belong to the client key");
        return Err(KeyError::InvalidSplitParameter(
            "first key pair is not the client key".to_string(),
        ));
    }
    let shares = split_key::<B>(key, n, rng)?;
    Ok(Wallet::new(&public_key, shares, Utc::now())
        .with_mnemonic(primary.mnemonic())
        .mark_split())
}

/// Add additive shares back up into the primary key pair.
///
/// Every share produced by [`split_key`] is needed.
pub fn combine_additive_shares<B: GroupBackend>(shares: &[KeyPair]) -> Result<KeyPair> {
    if shares.is_empty() {
        return Err(KeyError::NotEnoughShares(0, 1));
    }
    let mut secrets = Vec::with_capacity(shares.len());
    for share in shares {
        secrets.push(share.secret_key::<B>()?);
    }
    let primary: SecretKey<B> = secrets.into_iter().sum();
    Ok(KeyPair::from_secret_key(&primary))
}
