//! Byte encoding for cached matrices
//!
//! The data key holds the values as consecutive little-endian `i64`s in
//! row-major order; the shape key holds `"<rows>x<cols>"`. Both are needed
//! to rebuild a [`MatrixRecord`].

use super::MatrixRecord;
use thiserror::Error;

/// Bytes per encoded element
pub const ELEMENT_SIZE: usize = std::mem::size_of::<i64>();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid shape {0:?}")]
    BadShape(String),

    #[error("expected {expected} bytes for shape {shape}, found {found}")]
    LengthMismatch {
        shape: String,
        expected: usize,
        found: usize,
    },
}

/// Encode values as little-endian `i64` bytes
pub fn encode(data: &[i64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * ELEMENT_SIZE);
    for value in data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Parse a `"<rows>x<cols>"` shape string
pub fn parse_shape(shape: &str) -> Result<(usize, usize), CodecError> {
    let bad = || CodecError::BadShape(shape.to_string());
    let (rows, cols) = shape.trim().split_once('x').ok_or_else(bad)?;
    let rows = rows.parse().map_err(|_| bad())?;
    let cols = cols.parse().map_err(|_| bad())?;
    Ok((rows, cols))
}

/// Rebuild a matrix from its cached bytes and shape string
pub fn decode(bytes: &[u8], shape: &str) -> Result<MatrixRecord, CodecError> {
    let (rows, cols) = parse_shape(shape)?;
    let expected = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(ELEMENT_SIZE))
        .ok_or_else(|| CodecError::BadShape(shape.to_string()))?;

    if bytes.len() != expected {
        return Err(CodecError::LengthMismatch {
            shape: shape.to_string(),
            expected,
            found: bytes.len(),
        });
    }

    let data = bytes
        .chunks_exact(ELEMENT_SIZE)
        .map(|chunk| {
            let mut buf = [0u8; ELEMENT_SIZE];
            buf.copy_from_slice(chunk);
            i64::from_le_bytes(buf)
        })
        .collect();

    MatrixRecord::new(rows, cols, data).map_err(|_| CodecError::BadShape(shape.to_string()))
}
