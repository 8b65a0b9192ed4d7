//! The native backend, wrapping the `blst` assembly-optimized library.
//!
//! Every `unsafe` call below passes pointers to live, initialized stack values
//! or to slices whose lengths are passed alongside.
use blst::{
    blst_core_verify_pk_in_g1, blst_fr, blst_fr_add, blst_fr_from_scalar, blst_fr_inverse,
    blst_fr_mul, blst_fr_sub, blst_hash_to_g2, blst_p1, blst_p1_add_or_double, blst_p1_affine,
    blst_p1_affine_in_g1, blst_p1_affine_is_inf, blst_p1_compress, blst_p1_from_affine,
    blst_p1_to_affine, blst_p1_uncompress, blst_p2, blst_p2_add_or_double,
    blst_p2_affine, blst_p2_affine_in_g2, blst_p2_compress, blst_p2_from_affine, blst_p2_mult,
    blst_p2_to_affine, blst_p2_uncompress, blst_scalar, blst_scalar_fr_check, blst_scalar_from_fr,
    blst_scalar_from_le_bytes, blst_sign_pk_in_g1, blst_sk_to_pk_in_g1, BLST_ERROR,
};
use zeroize::Zeroize;

use super::GroupBackend;
use crate::constants::{DST, PUBLIC_KEY_LEN, SCALAR_LEN, SIGNATURE_LEN, WIDE_SCALAR_LEN};

/// The bit length of the group order.
const ORDER_BITS: usize = 255;

/// BLS12-381 through `blst`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blst;

fn to_scalar(x: &blst_fr) -> blst_scalar {
    let mut out = blst_scalar::default();
    unsafe { blst_scalar_from_fr(&mut out, x) };
    out
}

fn from_scalar(s: &blst_scalar) -> blst_fr {
    let mut out = blst_fr::default();
    unsafe { blst_fr_from_scalar(&mut out, s) };
    out
}

fn hash_to_g2(msg: &[u8]) -> blst_p2 {
    let aug: &[u8] = &[];
    let mut out = blst_p2::default();
    unsafe {
        blst_hash_to_g2(
            &mut out,
            msg.as_ptr(),
            msg.len(),
            DST.as_ptr(),
            DST.len(),
            aug.as_ptr(),
            aug.len(),
        )
    };
    out
}

impl GroupBackend for Blst {
    const NAME: &'static str = "blst";

    type Scalar = blst_fr;
    type PublicKey = blst_p1;
    type Signature = blst_p2;

    fn scalar_from_u64(x: u64) -> Self::Scalar {
        let mut s = blst_scalar::default();
        s.b[..8].copy_from_slice(&x.to_le_bytes());
        from_scalar(&s)
    }

    fn scalar_from_wide(bytes: &[u8; WIDE_SCALAR_LEN]) -> Self::Scalar {
        let mut s = blst_scalar::default();
        unsafe { blst_scalar_from_le_bytes(&mut s, bytes.as_ptr(), bytes.len()) };
        let out = from_scalar(&s);
        s.b.zeroize();
        out
    }

    fn scalar_from_bytes(bytes: &[u8; SCALAR_LEN]) -> Option<Self::Scalar> {
        let mut s = blst_scalar { b: *bytes };
        let canonical = unsafe { blst_scalar_fr_check(&s) };
        let out = canonical.then(|| from_scalar(&s));
        s.b.zeroize();
        out
    }

    fn scalar_to_bytes(x: &Self::Scalar) -> [u8; SCALAR_LEN] {
        to_scalar(x).b
    }

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        let mut out = blst_fr::default();
        unsafe { blst_fr_add(&mut out, a, b) };
        out
    }

    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        let mut out = blst_fr::default();
        unsafe { blst_fr_sub(&mut out, a, b) };
        out
    }

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        let mut out = blst_fr::default();
        unsafe { blst_fr_mul(&mut out, a, b) };
        out
    }

    fn scalar_invert(x: &Self::Scalar) -> Option<Self::Scalar> {
        if Self::scalar_is_zero(x) {
            return None;
        }
        let mut out = blst_fr::default();
        unsafe { blst_fr_inverse(&mut out, x) };
        Some(out)
    }

    fn scalar_is_zero(x: &Self::Scalar) -> bool {
        Self::scalar_to_bytes(x).iter().all(|b| *b == 0)
    }

    fn public_key(x: &Self::Scalar) -> Self::PublicKey {
        let mut s = to_scalar(x);
        let mut out = blst_p1::default();
        unsafe { blst_sk_to_pk_in_g1(&mut out, &s) };
        s.b.zeroize();
        out
    }

    fn public_key_add(a: &Self::PublicKey, b: &Self::PublicKey) -> Self::PublicKey {
        let mut out = blst_p1::default();
        unsafe { blst_p1_add_or_double(&mut out, a, b) };
        out
    }

    fn public_key_to_bytes(p: &Self::PublicKey) -> [u8; PUBLIC_KEY_LEN] {
        let mut out = [0u8; PUBLIC_KEY_LEN];
        unsafe { blst_p1_compress(out.as_mut_ptr(), p) };
        out
    }

    fn public_key_from_bytes(bytes: &[u8]) -> Option<Self::PublicKey> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return None;
        }
        let mut affine = blst_p1_affine::default();
        if unsafe { blst_p1_uncompress(&mut affine, bytes.as_ptr()) } != BLST_ERROR::BLST_SUCCESS {
            return None;
        }
        if unsafe { blst_p1_affine_is_inf(&affine) } || !unsafe { blst_p1_affine_in_g1(&affine) } {
            return None;
        }
        let mut out = blst_p1::default();
        unsafe { blst_p1_from_affine(&mut out, &affine) };
        Some(out)
    }

    fn sign(x: &Self::Scalar, msg: &[u8]) -> Self::Signature {
        let hash = hash_to_g2(msg);
        let mut s = to_scalar(x);
        let mut out = blst_p2::default();
        unsafe { blst_sign_pk_in_g1(&mut out, &hash, &s) };
        s.b.zeroize();
        out
    }

    fn signature_add(a: &Self::Signature, b: &Self::Signature) -> Self::Signature {
        let mut out = blst_p2::default();
        unsafe { blst_p2_add_or_double(&mut out, a, b) };
        out
    }

    fn signature_mul(s: &Self::Signature, x: &Self::Scalar) -> Self::Signature {
        let k = to_scalar(x);
        let mut out = blst_p2::default();
        unsafe { blst_p2_mult(&mut out, s, k.b.as_ptr(), ORDER_BITS) };
        out
    }

    fn signature_to_bytes(s: &Self::Signature) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        unsafe { blst_p2_compress(out.as_mut_ptr(), s) };
        out
    }

    fn signature_from_bytes(bytes: &[u8]) -> Option<Self::Signature> {
        if bytes.len() != SIGNATURE_LEN {
            return None;
        }
        let mut affine = blst_p2_affine::default();
        if unsafe { blst_p2_uncompress(&mut affine, bytes.as_ptr()) } != BLST_ERROR::BLST_SUCCESS {
            return None;
        }
        if !unsafe { blst_p2_affine_in_g2(&affine) } {
            return None;
        }
        let mut out = blst_p2::default();
        unsafe { blst_p2_from_affine(&mut out, &affine) };
        Some(out)
    }

    fn verify(p: &Self::PublicKey, msg: &[u8], s: &Self::Signature) -> bool {
        let aug: &[u8] = &[];
        let mut pk = blst_p1_affine::default();
        let mut sig = blst_p2_affine::default();
        unsafe {
            blst_p1_to_affine(&mut pk, p);
            blst_p2_to_affine(&mut sig, s);
        }
        let rc = unsafe {
            blst_core_verify_pk_in_g1(
                &pk,
                &sig,
                true,
                msg.as_ptr(),
                msg.len(),
                DST.as_ptr(),
                DST.len(),
                aug.as_ptr(),
                aug.len(),
            )
        };
        rc == BLST_ERROR::BLST_SUCCESS
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scalar_arithmetic_wraps_at_the_order() {
        let one = Blst::scalar_from_u64(1);
        let two = Blst::scalar_from_u64(2);
        let minus_one = Blst::scalar_sub(&one, &two);
        assert_eq!(
            Blst::scalar_to_bytes(&Blst::scalar_add(&minus_one, &one)),
            [0u8; SCALAR_LEN]
        );
        let inv = Blst::scalar_invert(&two).unwrap();
        assert_eq!(
            Blst::scalar_to_bytes(&Blst::scalar_mul(&inv, &two)),
            Blst::scalar_to_bytes(&one)
        );
        assert!(Blst::scalar_invert(&Blst::scalar_from_u64(0)).is_none());
    }

    #[test]
    fn test_non_canonical_scalar_is_rejected() {
        assert!(Blst::scalar_from_bytes(&[0xff; SCALAR_LEN]).is_none());
    }

    #[test]
    fn test_identity_public_key_is_rejected() {
        let mut infinity = [0u8; PUBLIC_KEY_LEN];
        infinity[0] = 0xc0;
        assert!(Blst::public_key_from_bytes(&infinity).is_none());
    }
}
