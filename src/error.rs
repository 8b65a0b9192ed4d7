use thiserror::Error;

/// Specialisation of `std::Result` for this crate.
pub type Result<T, E = KeyError> = std::result::Result<T, E>;

/// Everything that can go wrong when generating, splitting, or using keys.
///
/// None of these are transient: retrying with the same input fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyError {
    /// Additive splitting was requested with bad parameters.
    #[error("invalid split parameter: {0}")]
    InvalidSplitParameter(String),

    /// Threshold sharing was requested with bad parameters.
    #[error("invalid threshold parameter: {0}")]
    InvalidThresholdParameter(String),

    /// The same party identifier appeared more than once.
    #[error("duplicate party id: {0}")]
    DuplicatePartyId(String),

    /// A party identifier was missing, zero, or malformed.
    #[error("invalid party id: {0}")]
    InvalidPartyId(String),

    /// Signing or verifying before the corresponding key was set.
    #[error("uninitialized key: {0}")]
    UninitializedKey(&'static str),

    /// Setting a key on a party which already plays a role.
    #[error("conflicting key state: {0}")]
    ConflictingKeyState(&'static str),

    /// Malformed hex, wrong length, or a value outside its group.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Fewer shares than the threshold were supplied.
    #[error("not enough shares: {0}/{1}")]
    NotEnoughShares(usize, usize),

    /// The randomness source ran dry before a key could be drawn.
    #[error("randomness source exhausted")]
    EntropyExhausted,

    /// Aggregation was asked to combine nothing.
    #[error("cannot aggregate an empty list of signatures")]
    EmptyAggregation,

    /// An aggregated signature did not verify against the expected key.
    ///
    /// This usually means the partial signatures were made over different messages.
    #[error("aggregated signature does not verify against the public key")]
    AggregationMismatch,
}
