//! A single party's view of the signature scheme.
//!
//! A [`BlsScheme`] starts out holding no key, and then takes on exactly one
//! role for the rest of its life: a signer, once given a private key, or a
//! verifier, once given a public key.
use rand_core::CryptoRngCore;
use tracing::{debug, instrument};

use crate::compat::GroupBackend;
use crate::error::{KeyError, Result};
use crate::keygen::generate_keys;
use crate::keys::{PublicKey, SecretKey, Signature};
use crate::participants::PartyId;
use crate::sign::{sign, verify};
use crate::split::split_wallet;
use crate::threshold::generate_threshold_shares;
use crate::wallet::{KeyPair, SecretKeyShare, Wallet};

/// The role a [`BlsScheme`] currently plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    NoKey,
    Signer,
    Verifier,
}

#[derive(Debug, Clone, Copy)]
enum KeyState<B: GroupBackend> {
    NoKey,
    Signer {
        secret: SecretKey<B>,
        public: PublicKey<B>,
    },
    Verifier(PublicKey<B>),
}

/// Holds one party's keys, and enforces what it may do with them.
#[derive(Debug, Clone)]
pub struct BlsScheme<B: GroupBackend> {
    state: KeyState<B>,
    id: Option<PartyId<B>>,
}

impl<B: GroupBackend> Default for BlsScheme<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: GroupBackend> BlsScheme<B> {
    pub fn new() -> Self {
        Self {
            state: KeyState::NoKey,
            id: None,
        }
    }

    pub fn role(&self) -> Role {
        match self.state {
            KeyState::NoKey => Role::NoKey,
            KeyState::Signer { .. } => Role::Signer,
            KeyState::Verifier(_) => Role::Verifier,
        }
    }

    /// Become a signer. The public key is derived from the private key.
    pub fn set_private_key(&mut self, private_key_hex: &str) -> Result<()> {
        match self.state {
            KeyState::Verifier(_) => Err(KeyError::ConflictingKeyState(
                "cannot set private key when there is a public key",
            )),
            KeyState::Signer { .. } => {
                Err(KeyError::ConflictingKeyState("private key already exists"))
            }
            KeyState::NoKey => {
                let secret = SecretKey::<B>::from_hex(private_key_hex)?;
                self.state = KeyState::Signer {
                    secret,
                    public: secret.public_key(),
                };
                Ok(())
            }
        }
    }

    /// Become a verifier.
    pub fn set_public_key(&mut self, public_key_hex: &str) -> Result<()> {
        match self.state {
            KeyState::Signer { .. } => Err(KeyError::ConflictingKeyState(
                "cannot set public key when there is a private key",
            )),
            KeyState::Verifier(_) => {
                Err(KeyError::ConflictingKeyState("public key already exists"))
            }
            KeyState::NoKey => {
                self.state = KeyState::Verifier(PublicKey::from_hex(public_key_hex)?);
                Ok(())
            }
        }
    }

    pub fn public_key(&self) -> Option<String> {
        match &self.state {
            KeyState::NoKey => None,
            KeyState::Signer { public, .. } | KeyState::Verifier(public) => Some(public.to_hex()),
        }
    }

    pub fn private_key(&self) -> Option<String> {
        match &self.state {
            KeyState::Signer { secret, .. } => Some(secret.to_hex()),
            _ => None,
        }
    }

    fn key_pair(&self) -> Result<KeyPair> {
        match &self.state {
            KeyState::Signer { secret, .. } => Ok(KeyPair::from_secret_key(secret)),
            _ => Err(KeyError::UninitializedKey("no private key set")),
        }
    }

    pub fn sign(&self, hash_hex: &str) -> Result<String> {
        let pair = self.key_pair()?;
        sign::<B>(&pair.private_key, hash_hex)
    }

    pub fn verify(&self, signature_hex: &str, hash_hex: &str) -> Result<bool> {
        let public_key = self
            .public_key()
            .ok_or(KeyError::UninitializedKey("no public key set"))?;
        verify::<B>(signature_hex, &public_key, hash_hex)
    }

    /// Sign a hash, and add the result into an existing signature over the same hash.
    pub fn add(&self, signature_hex: &str, hash_hex: &str) -> Result<String> {
        let existing = Signature::<B>::from_hex(signature_hex)?;
        let own = Signature::<B>::from_hex(&self.sign(hash_hex)?)?;
        Ok((existing + own).to_hex())
    }

    /// Split this party's key additively. See [`crate::split`].
    pub fn split_keys(&self, n: usize, rng: &mut impl CryptoRngCore) -> Result<Wallet> {
        let pair = self.key_pair()?;
        let public_key = PublicKey::<B>::from_hex(&pair.public_key)?;
        let wallet = Wallet::new(&public_key, vec![pair], chrono::Utc::now());
        split_wallet::<B>(&wallet, n, rng)
    }

    /// Deal threshold shares of this party's key. See [`crate::threshold`].
    pub fn generate_threshold_shares(
        &self,
        threshold: usize,
        party_ids: &[PartyId<B>],
        rng: &mut impl CryptoRngCore,
    ) -> Result<Vec<SecretKeyShare>> {
        let pair = self.key_pair()?;
        generate_threshold_shares::<B>(&pair, threshold, party_ids, rng)
    }

    /// Recover a wallet from a seed, and become its signer.
    ///
    /// This is refused once any key is set.
    #[instrument(skip_all, err(Debug))]
    pub fn recover_keys(&mut self, seed: &[u8]) -> Result<Wallet> {
        if !matches!(self.state, KeyState::NoKey) {
            return Err(KeyError::ConflictingKeyState(
                "cannot recover when there are keys",
            ));
        }
        let wallet = generate_keys::<B>(seed)?;
        let pair = wallet
            .keys()
            .first()
            .ok_or(KeyError::UninitializedKey("recovered wallet holds no key"))?;
        self.set_private_key(&pair.private_key)?;
        debug!(client_id = wallet.client_id(), "recovered keys");
        Ok(wallet)
    }

    /// Set this party's threshold identifier, from its hex form.
    pub fn set_id(&mut self, id_hex: &str) -> Result<()> {
        self.id = Some(PartyId::from_hex(id_hex)?);
        Ok(())
    }

    pub fn id(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}
