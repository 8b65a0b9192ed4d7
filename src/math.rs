use std::ops::Index;

use rand_core::CryptoRngCore;

use crate::compat::GroupBackend;
use crate::error::Result;
use crate::keys::random_scalar;
use crate::participants::{PartyId, PartyList};

/// Represents a polynomial with coefficients in the scalar field.
pub struct Polynomial<B: GroupBackend> {
    /// The coefficients of our polynomial, from 0..size-1.
    coefficients: Vec<B::Scalar>,
}

impl<B: GroupBackend> Polynomial<B> {
    /// Extend a constant to a random polynomial of a certain size.
    ///
    /// This is useful if you want the polynomial to have a certain value, but
    /// otherwise be random.
    pub fn extend_random(
        rng: &mut impl CryptoRngCore,
        size: usize,
        constant: &B::Scalar,
    ) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(size);
        coefficients.push(*constant);
        for _ in 1..size {
            coefficients.push(random_scalar::<B>(rng)?);
        }
        Ok(Self { coefficients })
    }

    /// The number of coefficients, one more than the degree.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluate this polynomial at a point, using Horner's rule.
    pub fn evaluate(&self, x: &B::Scalar) -> B::Scalar {
        let mut out = B::scalar_from_u64(0);
        for c in self.coefficients.iter().rev() {
            out = B::scalar_add(&B::scalar_mul(&out, x), c);
        }
        out
    }
}

impl<B: GroupBackend> Index<usize> for Polynomial<B> {
    type Output = B::Scalar;

    fn index(&self, i: usize) -> &Self::Output {
        &self.coefficients[i]
    }
}

/// Recover `f(0)` from evaluations `f(x_i)` at distinct points.
///
/// The result is only meaningful if there are at least as many points as
/// `f` has coefficients; with fewer, it is just some unrelated scalar.
pub fn interpolate_zero<B: GroupBackend>(points: &[(PartyId<B>, B::Scalar)]) -> Result<B::Scalar> {
    let ids: Vec<_> = points.iter().map(|(id, _)| *id).collect();
    let list = PartyList::new(&ids)?;

    let mut out = B::scalar_from_u64(0);
    for (i, (_, y)) in points.iter().enumerate() {
        let term = B::scalar_mul(&list.lagrange(i)?, y);
        out = B::scalar_add(&out, &term);
    }
    Ok(out)
}
