//! Matrix records and the line-based text format
//!
//! A matrix source file holds one matrix per line:
//!
//! ```text
//! 2x3: 1 2 3 4 5 6
//! ```
//!
//! Values are row-major. Cached tensors are the little-endian `i64`
//! encoding of the values plus a `"<rows>x<cols>"` shape string.

pub mod codec;
pub mod parse;

pub use codec::{decode, encode, parse_shape, CodecError};
pub use parse::{parse_line, parse_text, LineError, LineErrorKind, ParsedText};

/// A parsed matrix with row-major values
///
/// Construction enforces `data.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRecord {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl MatrixRecord {
    /// Build a record, rejecting data that does not fill the shape exactly
    pub fn new(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self, LineErrorKind> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(LineErrorKind::DimensionOverflow { rows, cols })?;

        if data.len() != expected {
            return Err(LineErrorKind::CountMismatch {
                rows,
                cols,
                expected,
                found: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major values
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Shape string as stored under the `_shape` key
    pub fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// Iterate over the rows as slices
    ///
    /// A matrix without values yields no rows, whatever its row count.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        let rows = if self.data.is_empty() { 0 } else { self.rows };
        (0..rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }
}
