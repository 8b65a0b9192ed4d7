use std::fmt::Debug;

use crate::constants::{PUBLIC_KEY_LEN, SCALAR_LEN, SIGNATURE_LEN, WIDE_SCALAR_LEN};

#[cfg(feature = "portable")]
pub mod bls12_381_impl;
#[cfg(feature = "blst")]
pub mod blst_impl;

#[cfg(feature = "portable")]
pub use bls12_381_impl::Bls12381;
#[cfg(feature = "blst")]
pub use blst_impl::Blst;

/// Represents a pairing-friendly group implementation usable by this crate.
///
/// This is the trait any arithmetic engine must implement. The crate ships
/// two feature-gated implementations over BLS12-381: [`Blst`], wrapping the
/// native `blst` library, and [`Bls12381`], a pure Rust one which also builds
/// for restricted targets such as wasm.
///
/// Public keys live in G1, signatures in G2. Implementations must agree on
/// every encoding: scalars are 32 little-endian bytes, points use the standard
/// compressed form. Keys produced by one backend are then usable by any other.
///
/// Implementors are zero-sized marker types; all operations are associated
/// functions, so protocol code just carries a `B: GroupBackend` parameter.
pub trait GroupBackend: Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static {
    /// A name for the backend, used in logs.
    const NAME: &'static str;

    /// An element of the scalar field, of prime order `r`.
    type Scalar: Copy + Send + Sync + 'static;
    /// A point on G1.
    type PublicKey: Copy + Send + Sync + 'static;
    /// A point on G2.
    type Signature: Copy + Send + Sync + 'static;

    fn scalar_from_u64(x: u64) -> Self::Scalar;

    /// Reduce 64 uniformly random bytes, read as a little-endian integer, modulo `r`.
    fn scalar_from_wide(bytes: &[u8; WIDE_SCALAR_LEN]) -> Self::Scalar;

    /// Decode a canonical little-endian scalar, rejecting values `>= r`.
    fn scalar_from_bytes(bytes: &[u8; SCALAR_LEN]) -> Option<Self::Scalar>;

    fn scalar_to_bytes(x: &Self::Scalar) -> [u8; SCALAR_LEN];

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Returns `None` for zero.
    fn scalar_invert(x: &Self::Scalar) -> Option<Self::Scalar>;

    fn scalar_is_zero(x: &Self::Scalar) -> bool;

    /// Compute `x * G1`.
    fn public_key(x: &Self::Scalar) -> Self::PublicKey;

    fn public_key_add(a: &Self::PublicKey, b: &Self::PublicKey) -> Self::PublicKey;

    fn public_key_to_bytes(p: &Self::PublicKey) -> [u8; PUBLIC_KEY_LEN];

    /// Decode a compressed point, rejecting points off the curve, outside
    /// the prime order subgroup, or at infinity.
    fn public_key_from_bytes(bytes: &[u8]) -> Option<Self::PublicKey>;

    /// Compute `x * H(msg)`, with `H` hashing onto G2.
    fn sign(x: &Self::Scalar, msg: &[u8]) -> Self::Signature;

    fn signature_add(a: &Self::Signature, b: &Self::Signature) -> Self::Signature;

    fn signature_mul(s: &Self::Signature, x: &Self::Scalar) -> Self::Signature;

    fn signature_to_bytes(s: &Self::Signature) -> [u8; SIGNATURE_LEN];

    /// Decode a compressed point, rejecting points off the curve or outside
    /// the prime order subgroup.
    fn signature_from_bytes(bytes: &[u8]) -> Option<Self::Signature>;

    /// Check that `e(p, H(msg)) == e(G1, s)`.
    fn verify(p: &Self::PublicKey, msg: &[u8], s: &Self::Signature) -> bool;
}
