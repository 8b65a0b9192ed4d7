//! The portable backend, built on the pure Rust `bls12_381` crate.
use bls12_381::{
    hash_to_curve::{ExpandMsgXmd, HashToCurve},
    pairing, G1Affine, G1Projective, G2Affine, G2Projective, Scalar,
};
use ff::Field;
use group::Curve;

use super::GroupBackend;
use crate::constants::{DST, PUBLIC_KEY_LEN, SCALAR_LEN, SIGNATURE_LEN, WIDE_SCALAR_LEN};

/// BLS12-381 through the `bls12_381` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bls12381;

fn hash_to_g2(msg: &[u8]) -> G2Projective {
    <G2Projective as HashToCurve<ExpandMsgXmd<sha2::Sha256>>>::hash_to_curve(msg, DST)
}

impl GroupBackend for Bls12381 {
    const NAME: &'static str = "bls12_381";

    type Scalar = Scalar;
    type PublicKey = G1Projective;
    type Signature = G2Projective;

    fn scalar_from_u64(x: u64) -> Self::Scalar {
        Scalar::from(x)
    }

    fn scalar_from_wide(bytes: &[u8; WIDE_SCALAR_LEN]) -> Self::Scalar {
        Scalar::from_bytes_wide(bytes)
    }

    fn scalar_from_bytes(bytes: &[u8; SCALAR_LEN]) -> Option<Self::Scalar> {
        Scalar::from_bytes(bytes).into()
    }

    fn scalar_to_bytes(x: &Self::Scalar) -> [u8; SCALAR_LEN] {
        x.to_bytes()
    }

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a + b
    }

    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a - b
    }

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a * b
    }

    fn scalar_invert(x: &Self::Scalar) -> Option<Self::Scalar> {
        Field::invert(x).into()
    }

    fn scalar_is_zero(x: &Self::Scalar) -> bool {
        Field::is_zero(x).into()
    }

    fn public_key(x: &Self::Scalar) -> Self::PublicKey {
        G1Projective::generator() * x
    }

    fn public_key_add(a: &Self::PublicKey, b: &Self::PublicKey) -> Self::PublicKey {
        a + b
    }

    fn public_key_to_bytes(p: &Self::PublicKey) -> [u8; PUBLIC_KEY_LEN] {
        p.to_affine().to_compressed()
    }

    fn public_key_from_bytes(bytes: &[u8]) -> Option<Self::PublicKey> {
        let bytes: &[u8; PUBLIC_KEY_LEN] = bytes.try_into().ok()?;
        let affine: G1Affine = Option::from(G1Affine::from_compressed(bytes))?;
        if bool::from(affine.is_identity()) {
            return None;
        }
        Some(affine.into())
    }

    fn sign(x: &Self::Scalar, msg: &[u8]) -> Self::Signature {
        hash_to_g2(msg) * x
    }

    fn signature_add(a: &Self::Signature, b: &Self::Signature) -> Self::Signature {
        a + b
    }

    fn signature_mul(s: &Self::Signature, x: &Self::Scalar) -> Self::Signature {
        s * x
    }

    fn signature_to_bytes(s: &Self::Signature) -> [u8; SIGNATURE_LEN] {
        s.to_affine().to_compressed()
    }

    fn signature_from_bytes(bytes: &[u8]) -> Option<Self::Signature> {
        let bytes: &[u8; SIGNATURE_LEN] = bytes.try_into().ok()?;
        let affine: G2Affine = Option::from(G2Affine::from_compressed(bytes))?;
        Some(affine.into())
    }

    fn verify(p: &Self::PublicKey, msg: &[u8], s: &Self::Signature) -> bool {
        let p = p.to_affine();
        if bool::from(p.is_identity()) {
            return false;
        }
        let lhs = pairing(&p, &hash_to_g2(msg).to_affine());
        let rhs = pairing(&G1Affine::generator(), &s.to_affine());
        lhs == rhs
    }
}
