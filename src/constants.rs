/// Domain separation tag for hashing messages onto G2.
///
/// This is the ciphersuite of the IETF BLS draft for the "minimal public key
/// size" variant, with the basic (NUL) scheme.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// The version recorded in every wallet we produce.
pub const FORMAT_VERSION: &str = "1.0";

/// The size of an encoded scalar, and thus of a private key.
pub const SCALAR_LEN: usize = 32;

/// How many random bytes we reduce to produce one uniform scalar.
pub const WIDE_SCALAR_LEN: usize = 64;

/// The size of a compressed public key, a point on G1.
pub const PUBLIC_KEY_LEN: usize = 48;

/// The size of a compressed signature, a point on G2.
pub const SIGNATURE_LEN: usize = 96;
