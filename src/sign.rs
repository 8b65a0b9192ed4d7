//! Signing, aggregation and verification on the hex boundary.
//!
//! Message hashes arrive hex encoded and are signed as raw bytes; hashing
//! the message itself is the caller's business (see [`crate::crypto::hash`]).
//!
//! Aggregation cannot tell whether its inputs were made over the same hash.
//! Callers must keep track of which hash every partial signature belongs to;
//! [`aggregate_and_verify`] is the way to find out after the fact.
use tracing::{debug, error, instrument};

use crate::compat::GroupBackend;
use crate::encoding::decode_hex;
use crate::error::{KeyError, Result};
use crate::keys::{PublicKey, SecretKey, Signature};
use crate::participants::{PartyId, PartyList};
use crate::wallet::SecretKeyShare;

fn decode_hash(hash_hex: &str) -> Result<Vec<u8>> {
    let hash = decode_hex(hash_hex)?;
    if hash.is_empty() {
        return Err(KeyError::Deserialization("empty message hash".to_string()));
    }
    Ok(hash)
}

/// Sign a hex encoded hash with a hex encoded private key, or share of one.
pub fn sign<B: GroupBackend>(private_key_hex: &str, hash_hex: &str) -> Result<String> {
    if private_key_hex.is_empty() {
        return Err(KeyError::UninitializedKey("no private key to sign with"));
    }
    let hash = decode_hash(hash_hex)?;
    let secret = SecretKey::<B>::from_hex(private_key_hex)?;
    Ok(secret.sign(&hash).to_hex())
}

/// Add hex encoded signatures together.
pub fn aggregate<B: GroupBackend>(signatures: &[impl AsRef<str>]) -> Result<String> {
    let mut parsed = Vec::with_capacity(signatures.len());
    for s in signatures {
        parsed.push(Signature::<B>::from_hex(s.as_ref())?);
    }
    Ok(Signature::aggregate(parsed)?.to_hex())
}

/// Check a signature on a hash.
///
/// A well formed signature which doesn't check out gives `Ok(false)`;
/// malformed hex gives an error.
pub fn verify<B: GroupBackend>(
    signature_hex: &str,
    public_key_hex: &str,
    hash_hex: &str,
) -> Result<bool> {
    if public_key_hex.is_empty() {
        return Err(KeyError::UninitializedKey("no public key to verify with"));
    }
    let signature = Signature::<B>::from_hex(signature_hex)?;
    let hash = decode_hash(hash_hex)?;
    let public_key = PublicKey::<B>::from_hex(public_key_hex)?;
    Ok(signature.verify(&public_key, &hash))
}

/// Aggregate partial signatures, then check the result against the public key.
///
/// This is what a caller gathering a quorum of signatures over one hash wants:
/// a mismatch surfaces as [`KeyError::AggregationMismatch`] rather than as a
/// signature that quietly fails later.
#[instrument(skip_all, err(Debug))]
pub fn aggregate_and_verify<B: GroupBackend>(
    signatures: &[impl AsRef<str>],
    public_key_hex: &str,
    hash_hex: &str,
) -> Result<String> {
    debug!(backend = B::NAME, count = signatures.len(), "aggregating signatures");
    let combined = aggregate::<B>(signatures)?;
    if !verify::<B>(&combined, public_key_hex, hash_hex)? {
        error!("aggregated signature does not verify");
        return Err(KeyError::AggregationMismatch);
    }
    Ok(combined)
}

/// A signature made with a threshold share, tagged with the share's party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSignature<B: GroupBackend> {
    pub id: PartyId<B>,
    pub signature: String,
}

/// Sign a hash with a threshold share.
pub fn sign_share<B: GroupBackend>(
    share: &SecretKeyShare,
    hash_hex: &str,
) -> Result<PartialSignature<B>> {
    let id = share.party_id::<B>()?;
    let signature = sign::<B>(&share.key_pair().private_key, hash_hex)?;
    Ok(PartialSignature { id, signature })
}

/// Combine `threshold` partial signatures into the primary key's signature.
///
/// This is interpolation at zero, carried out on the signatures directly, so
/// the primary key is never rebuilt. Only the first `threshold` partials are used.
#[instrument(skip_all, err(Debug))]
pub fn recover_signature<B: GroupBackend>(
    partials: &[PartialSignature<B>],
    threshold: usize,
) -> Result<String> {
    if threshold < 1 {
        return Err(KeyError::InvalidThresholdParameter(
            "threshold cannot be < 1".to_string(),
        ));
    }
    if partials.len() < threshold {
        error!(have = partials.len(), threshold, "too few partial signatures");
        return Err(KeyError::NotEnoughShares(partials.len(), threshold));
    }
    let partials = &partials[..threshold];
    let ids: Vec<_> = partials.iter().map(|p| p.id).collect();
    let parties = PartyList::new(&ids)?;

    let mut terms: Vec<Signature<B>> = Vec::with_capacity(threshold);
    for (i, partial) in partials.iter().enumerate() {
        let signature = Signature::<B>::from_hex(&partial.signature)?;
        let lambda = parties.lagrange(i)?;
        terms.push(Signature::from_point(B::signature_mul(
            signature.point(),
            &lambda,
        )));
    }
    Ok(Signature::aggregate(terms)?.to_hex())
}
