//! This module holds some utilities for working with the parties holding threshold shares.
//!
//! Each party is identified by a non-zero scalar, the point at which the
//! master polynomial is evaluated to produce that party's share.

use std::{collections::HashSet, fmt};

use crate::compat::GroupBackend;
use crate::constants::SCALAR_LEN;
use crate::error::{KeyError, Result};

/// Identifies a party in a threshold scheme.
///
/// The hex form is the minimal big-endian hex of the underlying integer,
/// so the party created from `10` prints as `"a"`.
pub struct PartyId<B: GroupBackend> {
    scalar: B::Scalar,
}

impl<B: GroupBackend> PartyId<B> {
    fn from_scalar(scalar: B::Scalar) -> Result<Self> {
        if B::scalar_is_zero(&scalar) {
            return Err(KeyError::InvalidPartyId(
                "party id cannot be zero".to_string(),
            ));
        }
        Ok(Self { scalar })
    }

    pub fn from_u64(x: u64) -> Result<Self> {
        Self::from_scalar(B::scalar_from_u64(x))
    }

    /// Parse a party identifier, with or without leading zeros.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 2 * SCALAR_LEN {
            return Err(KeyError::InvalidPartyId(format!(
                "party id must have 1 to {} hex digits, found {}",
                2 * SCALAR_LEN,
                s.len()
            )));
        }
        let padded = format!("{:0>width$}", s, width = 2 * SCALAR_LEN);
        let mut bytes = [0u8; SCALAR_LEN];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| KeyError::InvalidPartyId(format!("{s}: {e}")))?;
        bytes.reverse();
        let scalar = B::scalar_from_bytes(&bytes)
            .ok_or_else(|| KeyError::InvalidPartyId(format!("{s} is not a canonical scalar")))?;
        Self::from_scalar(scalar)
    }

    pub fn to_hex(&self) -> String {
        let mut bytes = B::scalar_to_bytes(&self.scalar);
        bytes.reverse();
        let digits = hex::encode(bytes);
        let trimmed = digits.trim_start_matches('0');
        trimmed.to_string()
    }

    pub(crate) fn scalar(&self) -> &B::Scalar {
        &self.scalar
    }

    fn bytes(&self) -> [u8; SCALAR_LEN] {
        B::scalar_to_bytes(&self.scalar)
    }
}

impl<B: GroupBackend> Clone for PartyId<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: GroupBackend> Copy for PartyId<B> {}

impl<B: GroupBackend> PartialEq for PartyId<B> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl<B: GroupBackend> Eq for PartyId<B> {}

impl<B: GroupBackend> fmt::Debug for PartyId<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PartyId").field(&self.to_hex()).finish()
    }
}

/// Represents a list of distinct parties.
///
/// Interpolation is only defined over distinct points, so this is the only
/// way to get at Lagrange coefficients.
#[derive(Debug, Clone)]
pub struct PartyList<B: GroupBackend> {
    parties: Vec<PartyId<B>>,
}

impl<B: GroupBackend> PartyList<B> {
    /// Create a party list, failing if any party appears twice.
    pub fn new(parties: &[PartyId<B>]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(parties.len());
        for p in parties {
            if !seen.insert(p.bytes()) {
                return Err(KeyError::DuplicatePartyId(p.to_hex()));
            }
        }
        Ok(Self {
            parties: parties.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Check if this list has a given party.
    pub fn contains(&self, party: &PartyId<B>) -> bool {
        self.parties.contains(party)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartyId<B>> + '_ {
        self.parties.iter()
    }

    /// Get the lagrange coefficient of the `i`th party, for interpolating at zero.
    ///
    /// This is the product of `x_j / (x_j - x_i)` over every other party `j`.
    pub fn lagrange(&self, i: usize) -> Result<B::Scalar> {
        let x_i = self.parties[i].scalar();

        let mut num = B::scalar_from_u64(1);
        let mut den = B::scalar_from_u64(1);
        for (j, p) in self.parties.iter().enumerate() {
            if j == i {
                continue;
            }
            let x_j = p.scalar();
            num = B::scalar_mul(&num, x_j);
            den = B::scalar_mul(&den, &B::scalar_sub(x_j, x_i));
        }

        let den_inv = B::scalar_invert(&den)
            .ok_or_else(|| KeyError::DuplicatePartyId(self.parties[i].to_hex()))?;
        Ok(B::scalar_mul(&num, &den_inv))
    }
}
