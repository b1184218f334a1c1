//! Binary encode/decode of f32 tensors.
//!
//! The wire format is the raw concatenation of native-endian f32 values with
//! no header, no padding, and no shape metadata. The consuming executables
//! mmap the artifact on the same host, so host byte order is the contract.

use crate::errors::{CodecResult, FormatError};
use crate::tensor::TensorSchema;

/// Stateless codec for the headerless f32 buffer format.
pub struct TensorCodec;

impl TensorCodec {
    /// Encodes values into exactly `4 * values.len()` bytes, one native-endian
    /// f32 per element, in natural flattening order.
    pub fn encode(values: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for value in values {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        bytes
    }

    /// Decodes a buffer produced by [`encode`](Self::encode).
    ///
    /// The buffer length is validated against the schema before any element is
    /// read; a mismatch is a contract violation, not a recoverable condition.
    pub fn decode(bytes: &[u8], schema: &TensorSchema) -> CodecResult<Vec<f32>> {
        if bytes.len() != schema.byte_len() {
            return Err(FormatError::ByteLengthMismatch {
                expected: schema.byte_len(),
                actual: bytes.len(),
                element_count: schema.element_count,
            });
        }

        let values = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_four_bytes_per_element() {
        let bytes = TensorCodec::encode(&[1.0, -2.5, 0.0]);
        assert_eq!(bytes.len(), 12);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let bytes = TensorCodec::encode(&[1.0, 2.0]);
        let result = TensorCodec::decode(&bytes[..7], &TensorSchema::new(2));
        assert!(matches!(
            result,
            Err(FormatError::ByteLengthMismatch {
                expected: 8,
                actual: 7,
                element_count: 2,
            })
        ));
    }
}
