//! Embedding blob encoding: a packed little-endian f32 array.

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::ChunkId;

/// Decode a stored embedding blob.
pub fn bytes_to_f32_vec(chunk_id: ChunkId, bytes: &[u8]) -> QuarryResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::MalformedEmbedding {
            chunk_id,
            len: bytes.len(),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Encode a vector the way ingestion stores it.
pub fn f32_slice_to_bytes(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}
