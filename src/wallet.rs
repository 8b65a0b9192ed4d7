//! The wallet shapes handed across the SDK boundary.
//!
//! Field names are fixed by the JSON every other SDK component reads:
//! `client_id`, `client_key`, `keys[] {public_key, private_key}`, `mnemonics`,
//! `version` and `date_created`.
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::compat::GroupBackend;
use crate::constants::FORMAT_VERSION;
use crate::crypto::client_id;
use crate::encoding::{decode, encode};
use crate::error::{KeyError, Result};
use crate::keys::{PublicKey, SecretKey};
use crate::participants::PartyId;

/// A hex encoded key pair.
///
/// The private key string is wiped from memory when this is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl KeyPair {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn from_secret_key<B: GroupBackend>(secret: &SecretKey<B>) -> Self {
        Self::new(secret.public_key().to_hex(), secret.to_hex())
    }

    /// Decode the private key, checking that it matches the public key when one is present.
    pub fn secret_key<B: GroupBackend>(&self) -> Result<SecretKey<B>> {
        if self.private_key.is_empty() {
            return Err(KeyError::UninitializedKey("key pair has no private key"));
        }
        let secret = SecretKey::<B>::from_hex(&self.private_key)?;
        if !self.public_key.is_empty() && PublicKey::<B>::from_hex(&self.public_key)? != secret.public_key() {
            return Err(KeyError::Deserialization(
                "public key does not match private key".to_string(),
            ));
        }
        Ok(secret)
    }

    pub fn public_key<B: GroupBackend>(&self) -> Result<PublicKey<B>> {
        PublicKey::from_hex(&self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[redacted]")
            .finish()
    }
}

/// A client's wallet: its identity, and the key pairs backing it.
///
/// For a freshly generated wallet `keys` holds the primary key pair. For a
/// split wallet it holds the shares, while `client_key` stays the primary
/// public key, so the client's identity does not change.
///
/// `peer_public_key`, `nonce` and `is_split` are carried for wallets written
/// by other SDK components, and only serialized when set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    client_id: String,
    #[serde(rename = "client_key")]
    client_public_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    peer_public_key: String,
    keys: Vec<KeyPair>,
    #[serde(rename = "mnemonics", default)]
    mnemonic: String,
    #[serde(rename = "version")]
    format_version: String,
    #[serde(rename = "date_created")]
    created_at: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    nonce: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_split: bool,
}

fn is_zero(x: &i64) -> bool {
    *x == 0
}

impl Wallet {
    pub(crate) fn new<B: GroupBackend>(
        public_key: &PublicKey<B>,
        keys: Vec<KeyPair>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            client_id: client_id(&public_key.to_bytes()),
            client_public_key: public_key.to_hex(),
            peer_public_key: String::new(),
            keys,
            mnemonic: String::new(),
            format_version: FORMAT_VERSION.to_string(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            nonce: 0,
            is_split: false,
        }
    }

    pub(crate) fn mark_split(mut self) -> Self {
        self.is_split = true;
        self
    }

    /// Record the mnemonic phrase the wallet's seed was derived from.
    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = mnemonic.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_public_key(&self) -> &str {
        &self.client_public_key
    }

    pub fn keys(&self) -> &[KeyPair] {
        &self.keys
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn peer_public_key(&self) -> &str {
        &self.peer_public_key
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// Whether `keys` holds additive shares rather than the primary key pair.
    pub fn is_split(&self) -> bool {
        self.is_split
    }

    /// Check that the client id is the hash of the client public key.
    pub fn has_valid_client_id<B: GroupBackend>(&self) -> Result<bool> {
        let public_key = PublicKey::<B>::from_hex(&self.client_public_key)?;
        Ok(client_id(&public_key.to_bytes()) == self.client_id)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| KeyError::Serialization(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| KeyError::Deserialization(e.to_string()))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("client_id", &self.client_id)
            .field("client_public_key", &self.client_public_key)
            .field("keys", &self.keys)
            .field("mnemonic", &"[redacted]")
            .field("format_version", &self.format_version)
            .field("created_at", &self.created_at)
            .field("peer_public_key", &self.peer_public_key)
            .field("nonce", &self.nonce)
            .field("is_split", &self.is_split)
            .finish()
    }
}

/// A key pair handed to one party, possibly tagged with that party's identifier.
///
/// Additive shares carry no identifier; threshold shares must, since
/// recombining them needs to know where each one was evaluated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyShare {
    public_key: String,
    private_key: String,
    #[serde(
        rename = "threshold_scheme_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<String>,
}

impl SecretKeyShare {
    pub fn new(key_pair: &KeyPair, id: Option<String>) -> Self {
        Self {
            public_key: key_pair.public_key.clone(),
            private_key: key_pair.private_key.clone(),
            id,
        }
    }

    pub fn key_pair(&self) -> KeyPair {
        KeyPair::new(self.public_key.clone(), self.private_key.clone())
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The hex form of the party identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn party_id<B: GroupBackend>(&self) -> Result<PartyId<B>> {
        let id = self
            .id
            .as_deref()
            .ok_or_else(|| KeyError::InvalidPartyId("share carries no party id".to_string()))?;
        PartyId::from_hex(id)
    }

    /// A compact binary form, for handing the share to its holder.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        decode(data)
    }
}

impl fmt::Debug for SecretKeyShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeyShare")
            .field("public_key", &self.public_key)
            .field("private_key", &"[redacted]")
            .field("id", &self.id)
            .finish()
    }
}
