//! The hex boundary, and a compact binary encoding for moving shares around.
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{KeyError, Result};

/// Encode an arbitrary serializable value into a vec.
pub fn encode<T: Serialize + ?Sized>(val: &T) -> Vec<u8> {
    rmp_serde::encode::to_vec_named(val).expect("failed to encode value")
}

/// Decode a value produced by [`encode`].
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    rmp_serde::decode::from_slice(data).map_err(|e| KeyError::Deserialization(e.to_string()))
}

/// Decode hex, rejecting odd lengths before looking at any digit.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(KeyError::Deserialization(format!(
            "odd length hex string ({} characters)",
            s.len()
        )));
    }
    hex::decode(s).map_err(|e| KeyError::Deserialization(e.to_string()))
}

/// Decode hex into exactly `N` bytes.
pub fn decode_hex_array<const N: usize>(s: &str, what: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(s)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        KeyError::Deserialization(format!("{what} must be {N} bytes, found {len}"))
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_odd_length_is_rejected_before_decoding() {
        // "zzz" is not hex either, but the length check comes first.
        let err = decode_hex("zzz").unwrap_err();
        assert!(err.to_string().contains("odd length"));
        assert!(decode_hex("zz").is_err());
        assert_eq!(decode_hex("00ff").unwrap(), vec![0x00, 0xff]);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        assert!(decode_hex_array::<4>("0011", "thing").is_err());
        assert_eq!(decode_hex_array::<2>("0011", "thing").unwrap(), [0x00, 0x11]);
    }
}
