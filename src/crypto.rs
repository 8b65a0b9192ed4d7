use digest::Digest;
use sha3::Sha3_256;

/// Hash some data with SHA3-256, returning lowercase hex.
///
/// This is the digest used for client identifiers, and the one callers
/// are expected to use for the message hashes they hand us.
pub fn hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// The client identifier corresponding to an encoded public key.
pub fn client_id(public_key: &[u8]) -> String {
    hash(public_key)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hash_is_sha3_256() {
        assert_eq!(
            hash(b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(hash("TEST").len(), 64);
    }
}
