//! BLS key management for a blockchain client: generating a client's key,
//! splitting it into shares, and combining what those shares sign.
//!
//! Signatures are BLS over BLS12-381, with public keys in G1 and signatures
//! in G2. The scheme is additively homomorphic: signatures by different keys
//! over the same message hash add up to a signature by the sum of those keys.
//! Everything here builds on that.
//!
//! # Warning
//!
//! This library has not undergone any form of audit.
//!
//! # Design
//!
//! A client's identity is a single primary key pair, generated from a seed
//! (usually derived from a mnemonic) so that it can always be recovered:
//!
//! - [`generate_keys`] turns a seed into a [`Wallet`], deterministically.
//!
//! The primary key can then be spread across several holders, in one of two
//! quite different ways:
//!
//! - [`split_key`] splits the key *additively* into `n` shares. Each share can
//! sign on its own, and the `n` partial signatures add up to the primary key's
//! signature, via [`aggregate`]. Every share is needed: this is an n-of-n
//! scheme, and losing a share loses the key.
//! - [`generate_threshold_shares`] deals *threshold* shares: the key becomes the
//! constant term of a random polynomial of degree `t - 1`, and each party gets
//! that polynomial evaluated at its [`PartyId`]. Any `t` shares recover the key
//! with [`recover_secret_key`], and any `t` partial signatures recover its
//! signature with [`recover_signature`].
//!
//! Signing and verifying happen with [`sign`] and [`verify`], on hex encoded
//! keys, signatures and message hashes. Nothing here hashes messages itself,
//! apart from the helper [`crypto::hash`].
//!
//! ## Aggregation
//!
//! A signature carries no trace of the hash it was made over. Adding up
//! signatures over *different* hashes succeeds, and gives a signature which
//! simply fails to verify. Callers combining partial signatures must keep
//! track of which hash each one belongs to; [`aggregate_and_verify`] checks
//! the result against the expected public key straight away.
//!
//! ## Randomness
//!
//! Everything which needs randomness takes it as an argument, in the form
//! of a [`rand_core::CryptoRngCore`]. Deterministic generation from a seed
//! just uses a [`SeedReader`] as that source, so concurrent calls never
//! share any state.
//!
//! # Generic Backends
//!
//! The group arithmetic is abstracted behind the [`GroupBackend`] trait,
//! and all of the protocol code is generic over it.
//! This crate provides two implementations behind features,
//! as per the following table:
//!
//! | Backend | Feature | Engine |
//! |---------|---------|--------|
//! |`Blst`|`blst`|the native `blst` library|
//! |`Bls12381`|`portable`|the pure Rust `bls12_381` crate|
//!
//! Both use the same encodings, so keys and signatures move freely between them.
pub mod compat;
pub mod constants;
pub mod crypto;
mod encoding;
mod error;
mod keygen;
mod keys;
mod math;
mod participants;
mod rng;
mod scheme;
mod sign;
mod split;
#[cfg(test)]
mod test;
mod threshold;
mod wallet;

pub use compat::GroupBackend;
#[cfg(feature = "portable")]
pub use compat::Bls12381;
#[cfg(feature = "blst")]
pub use compat::Blst;
pub use error::{KeyError, Result};
pub use keygen::{generate_keys, generate_keys_at, generate_keys_with_rng};
pub use keys::{PublicKey, SecretKey, Signature};
pub use math::Polynomial;
pub use participants::{PartyId, PartyList};
pub use rng::SeedReader;
pub use scheme::{BlsScheme, Role};
pub use sign::{
    aggregate, aggregate_and_verify, recover_signature, sign, sign_share, verify,
    PartialSignature,
};
pub use split::{combine_additive_shares, split_key, split_wallet};
pub use threshold::{generate_threshold_shares, generate_threshold_shares_for, recover_secret_key};
pub use wallet::{KeyPair, SecretKeyShare, Wallet};
