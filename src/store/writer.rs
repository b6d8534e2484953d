//! Writes one matrix as a data key and a shape key, and reads it back
//!
//! Key scheme: `<file_path>_<index>` holds the encoded values and
//! `<file_path>_<index>_shape` holds `"<rows>x<cols>"`. The two writes are
//! not atomic; data is always written first.

use super::CacheStore;
use crate::error::{MatcacheError, MatcacheResult};
use crate::matrix::{decode, encode, MatrixRecord};
use std::path::Path;

/// The pair of keys a matrix is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    pub data: String,
    pub shape: String,
}

impl CacheKeys {
    /// Keys for the `index`-th parsed matrix of `path`
    pub fn for_matrix(path: &Path, index: usize) -> Self {
        Self::from_data_key(format!("{}_{}", path.display(), index))
    }

    /// Keys derived from an existing data key
    pub fn from_data_key(data: impl Into<String>) -> Self {
        let data = data.into();
        let shape = format!("{}_shape", data);
        Self { data, shape }
    }
}

/// Write the encoded values, then the shape string
pub async fn write_matrix(
    store: &dyn CacheStore,
    record: &MatrixRecord,
    keys: &CacheKeys,
) -> MatcacheResult<()> {
    store.set(&keys.data, &encode(record.data())).await?;
    store.set(&keys.shape, record.shape().as_bytes()).await?;
    Ok(())
}

/// Fetch both keys and rebuild the matrix
pub async fn read_matrix(store: &dyn CacheStore, keys: &CacheKeys) -> MatcacheResult<MatrixRecord> {
    let bytes = store
        .get(&keys.data)
        .await?
        .ok_or_else(|| MatcacheError::KeyNotFound(keys.data.clone()))?;
    let shape = store
        .get(&keys.shape)
        .await?
        .ok_or_else(|| MatcacheError::KeyNotFound(keys.shape.clone()))?;

    let shape = String::from_utf8(shape).map_err(|_| MatcacheError::MalformedValue {
        key: keys.shape.clone(),
        reason: "shape is not UTF-8".to_string(),
    })?;

    decode(&bytes, &shape).map_err(|e| MatcacheError::MalformedValue {
        key: keys.data.clone(),
        reason: e.to_string(),
    })
}
