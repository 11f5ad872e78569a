//! Corpus read queries.

use rusqlite::{params, Connection, Row};

use quarry_core::errors::QuarryResult;
use quarry_core::models::{Chunk, ChunkId, EmbeddedChunk, EmbeddingChannel};

use crate::blob::bytes_to_f32_vec;
use crate::to_storage_err;

const CHUNK_COLUMNS: &str = "d.id, d.source, d.chunk_text, d.chunk_index, d.metadata";

/// All chunks with a vector on `channel`, ordered by chunk id.
pub fn embeddings_for_channel(
    conn: &Connection,
    channel: &EmbeddingChannel,
) -> QuarryResult<Vec<EmbeddedChunk>> {
    let sql = format!(
        "SELECT {CHUNK_COLUMNS}, e.embedding
         FROM docs d
         JOIN embeddings e ON e.doc_id = d.id
         WHERE e.embedding_type = ?1
         ORDER BY d.id"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![channel.as_str()], |row| {
            let chunk = row_to_chunk(row)?;
            let blob: Vec<u8> = row.get(5)?;
            Ok((chunk, blob))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (chunk, blob) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let vector = bytes_to_f32_vec(chunk.id, &blob)?;
        out.push(EmbeddedChunk { chunk, vector });
    }
    Ok(out)
}

pub fn all_chunks(conn: &Connection) -> QuarryResult<Vec<Chunk>> {
    let sql = format!("SELECT {CHUNK_COLUMNS} FROM docs d ORDER BY d.id");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], row_to_chunk)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn chunk_count(conn: &Connection) -> QuarryResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM docs", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}

pub fn channels(conn: &Connection) -> QuarryResult<Vec<EmbeddingChannel>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT embedding_type FROM embeddings ORDER BY embedding_type")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.map(|r| r.map(EmbeddingChannel::new))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn row_to_chunk(row: &Row<'_>) -> rusqlite::Result<Chunk> {
    let id: ChunkId = row.get(0)?;
    let chunk_index: Option<i64> = row.get(3)?;
    let metadata: Option<String> = row.get(4)?;
    Ok(Chunk {
        id,
        source: row.get(1)?,
        text: row.get(2)?,
        chunk_index: chunk_index.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
        metadata: parse_metadata(metadata),
    })
}

/// Metadata is stored as JSON text. Anything unparseable is kept as a string.
fn parse_metadata(raw: Option<String>) -> serde_json::Value {
    match raw {
        None => serde_json::Value::Null,
        Some(text) => {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        }
    }
}
