//! Typed handles over a backend's scalars and points.
//!
//! Everything outside this module and [`crate::compat`] works with these,
//! never with a backend's raw types.
use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
};

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::compat::GroupBackend;
use crate::constants::{SCALAR_LEN, WIDE_SCALAR_LEN};
use crate::encoding::{decode_hex, decode_hex_array};
use crate::error::{KeyError, Result};
use crate::math::Polynomial;
use crate::participants::PartyId;

/// Sample a uniform, non-zero scalar.
///
/// Each attempt draws [`WIDE_SCALAR_LEN`] bytes, so a seed of that length
/// yields exactly one scalar (barring the negligible chance of hitting zero).
pub(crate) fn random_scalar<B: GroupBackend>(rng: &mut impl CryptoRngCore) -> Result<B::Scalar> {
    loop {
        let mut wide = Zeroizing::new([0u8; WIDE_SCALAR_LEN]);
        rng.try_fill_bytes(&mut wide[..])
            .map_err(|_| KeyError::EntropyExhausted)?;
        let x = B::scalar_from_wide(&wide);
        if !B::scalar_is_zero(&x) {
            return Ok(x);
        }
    }
}

/// A private key, or a share of one.
pub struct SecretKey<B: GroupBackend> {
    scalar: B::Scalar,
}

impl<B: GroupBackend> SecretKey<B> {
    pub(crate) fn from_scalar(scalar: B::Scalar) -> Self {
        Self { scalar }
    }

    pub(crate) fn scalar(&self) -> &B::Scalar {
        &self.scalar
    }

    pub(crate) fn zero() -> Self {
        Self::from_scalar(B::scalar_from_u64(0))
    }

    /// Generate a fresh key from some source of randomness.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        random_scalar::<B>(rng).map(Self::from_scalar)
    }

    /// Decode a key from its 32 little-endian bytes.
    ///
    /// The zero key is rejected, since its public key is the point at infinity.
    pub fn from_bytes(bytes: &[u8; SCALAR_LEN]) -> Result<Self> {
        let scalar = B::scalar_from_bytes(bytes).ok_or_else(|| {
            KeyError::Deserialization("private key is not a canonical scalar".to_string())
        })?;
        if B::scalar_is_zero(&scalar) {
            return Err(KeyError::Deserialization(
                "private key cannot be zero".to_string(),
            ));
        }
        Ok(Self::from_scalar(scalar))
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_LEN]> {
        Zeroizing::new(B::scalar_to_bytes(&self.scalar))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(decode_hex_array::<SCALAR_LEN>(s, "private key")?);
        Self::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.to_bytes()[..])
    }

    pub fn public_key(&self) -> PublicKey<B> {
        PublicKey::from_point(B::public_key(&self.scalar))
    }

    /// Sign a message hash.
    ///
    /// This is deterministic: the same key and hash always give the same signature.
    pub fn sign(&self, hash: &[u8]) -> Signature<B> {
        Signature::from_point(B::sign(&self.scalar, hash))
    }

    /// A random polynomial of degree `threshold - 1` with this key as its constant term.
    pub fn master_polynomial(
        &self,
        rng: &mut impl CryptoRngCore,
        threshold: usize,
    ) -> Result<Polynomial<B>> {
        Polynomial::extend_random(rng, threshold, &self.scalar)
    }

    /// The share of the party `id` under some master polynomial.
    pub fn evaluate_at(polynomial: &Polynomial<B>, id: &PartyId<B>) -> Self {
        Self::from_scalar(polynomial.evaluate(id.scalar()))
    }
}

impl<B: GroupBackend> Clone for SecretKey<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: GroupBackend> Copy for SecretKey<B> {}

impl<B: GroupBackend> PartialEq for SecretKey<B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..]).into()
    }
}

impl<B: GroupBackend> Eq for SecretKey<B> {}

impl<B: GroupBackend> fmt::Debug for SecretKey<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([redacted])")
    }
}

impl<B: GroupBackend> Add for SecretKey<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_scalar(B::scalar_add(&self.scalar, &rhs.scalar))
    }
}

/// Subtraction modulo the group order, so this wraps instead of underflowing.
impl<B: GroupBackend> Sub for SecretKey<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_scalar(B::scalar_sub(&self.scalar, &rhs.scalar))
    }
}

impl<B: GroupBackend> Sum for SecretKey<B> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

/// A public key, a point on G1.
pub struct PublicKey<B: GroupBackend> {
    point: B::PublicKey,
}

impl<B: GroupBackend> PublicKey<B> {
    pub(crate) fn from_point(point: B::PublicKey) -> Self {
        Self { point }
    }

    pub(crate) fn point(&self) -> &B::PublicKey {
        &self.point
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        B::public_key_from_bytes(bytes)
            .map(Self::from_point)
            .ok_or_else(|| KeyError::Deserialization("invalid public key".to_string()))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        B::public_key_to_bytes(&self.point).to_vec()
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl<B: GroupBackend> Clone for PublicKey<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: GroupBackend> Copy for PublicKey<B> {}

impl<B: GroupBackend> PartialEq for PublicKey<B> {
    fn eq(&self, other: &Self) -> bool {
        B::public_key_to_bytes(&self.point) == B::public_key_to_bytes(&other.point)
    }
}

impl<B: GroupBackend> Eq for PublicKey<B> {}

impl<B: GroupBackend> fmt::Debug for PublicKey<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl<B: GroupBackend> Add for PublicKey<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_point(B::public_key_add(&self.point, &rhs.point))
    }
}

/// A signature, a point on G2.
pub struct Signature<B: GroupBackend> {
    point: B::Signature,
}

impl<B: GroupBackend> Signature<B> {
    pub(crate) fn from_point(point: B::Signature) -> Self {
        Self { point }
    }

    pub(crate) fn point(&self) -> &B::Signature {
        &self.point
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        B::signature_from_bytes(bytes)
            .map(Self::from_point)
            .ok_or_else(|| KeyError::Deserialization("invalid signature".to_string()))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        B::signature_to_bytes(&self.point).to_vec()
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Check this signature on a message hash against a public key.
    pub fn verify(&self, public_key: &PublicKey<B>, hash: &[u8]) -> bool {
        B::verify(public_key.point(), hash, &self.point)
    }

    /// Add signatures together.
    ///
    /// Signatures by different keys over the *same* hash add up to a signature
    /// by the sum of those keys. Nothing here can check that the hashes match:
    /// combining signatures over different hashes silently gives garbage.
    pub fn aggregate<I: IntoIterator<Item = Self>>(signatures: I) -> Result<Self> {
        signatures
            .into_iter()
            .reduce(|acc, s| acc + s)
            .ok_or(KeyError::EmptyAggregation)
    }
}

impl<B: GroupBackend> Clone for Signature<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: GroupBackend> Copy for Signature<B> {}

impl<B: GroupBackend> PartialEq for Signature<B> {
    fn eq(&self, other: &Self) -> bool {
        B::signature_to_bytes(&self.point) == B::signature_to_bytes(&other.point)
    }
}

impl<B: GroupBackend> Eq for Signature<B> {}

impl<B: GroupBackend> fmt::Debug for Signature<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

impl<B: GroupBackend> Add for Signature<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_point(B::signature_add(&self.point, &rhs.point))
    }
}

#[cfg(test)]
mod test {
    use rand_core::OsRng;

    use super::*;
    use crate::rng::SeedReader;

    fn check_hex_round_trip<B: GroupBackend>() {
        let sk = SecretKey::<B>::random(&mut OsRng).unwrap();
        assert_eq!(SecretKey::<B>::from_hex(&sk.to_hex()).unwrap(), sk);

        let pk = sk.public_key();
        assert_eq!(PublicKey::<B>::from_hex(&pk.to_hex()).unwrap(), pk);

        let sig = sk.sign(b"hash");
        assert_eq!(Signature::<B>::from_hex(&sig.to_hex()).unwrap(), sig);
        assert!(sig.verify(&pk, b"hash"));
        assert!(!sig.verify(&pk, b"hasH"));
    }

    fn check_malformed_input<B: GroupBackend>() {
        assert!(matches!(
            SecretKey::<B>::from_hex("abc"),
            Err(KeyError::Deserialization(_))
        ));
        assert!(SecretKey::<B>::from_hex(&"00".repeat(SCALAR_LEN)).is_err());
        assert!(SecretKey::<B>::from_hex(&"ff".repeat(SCALAR_LEN)).is_err());
        assert!(PublicKey::<B>::from_hex(&"00".repeat(48)).is_err());
        assert!(Signature::<B>::from_hex("0").is_err());
    }

    fn check_sum_and_difference<B: GroupBackend>() {
        let a = SecretKey::<B>::random(&mut OsRng).unwrap();
        let b = SecretKey::<B>::random(&mut OsRng).unwrap();
        assert_eq!((a - b) + b, a);
        assert_eq!([a, b].into_iter().sum::<SecretKey<B>>(), a + b);
        assert_eq!(a.public_key() + b.public_key(), (a + b).public_key());
    }

    fn check_signature_homomorphism<B: GroupBackend>() {
        let a = SecretKey::<B>::random(&mut OsRng).unwrap();
        let b = SecretKey::<B>::random(&mut OsRng).unwrap();
        let combined = Signature::aggregate([a.sign(b"m"), b.sign(b"m")]).unwrap();
        assert_eq!(combined, (a + b).sign(b"m"));
        assert!(combined.verify(&(a.public_key() + b.public_key()), b"m"));
        assert_eq!(
            Signature::<B>::aggregate(Vec::new()),
            Err(KeyError::EmptyAggregation)
        );
    }

    fn check_random_stops_when_seed_runs_dry<B: GroupBackend>() {
        let mut rng = SeedReader::new(&[7u8; WIDE_SCALAR_LEN]);
        assert!(SecretKey::<B>::random(&mut rng).is_ok());
        assert_eq!(
            SecretKey::<B>::random(&mut rng),
            Err(KeyError::EntropyExhausted)
        );
    }

    fn check_all<B: GroupBackend>() {
        check_hex_round_trip::<B>();
        check_malformed_input::<B>();
        check_sum_and_difference::<B>();
        check_signature_homomorphism::<B>();
        check_random_stops_when_seed_runs_dry::<B>();
    }

    #[cfg(feature = "blst")]
    #[test]
    fn test_keys_blst() {
        check_all::<crate::compat::Blst>();
    }

    #[cfg(feature = "portable")]
    #[test]
    fn test_keys_portable() {
        check_all::<crate::compat::Bls12381>();
    }
}
