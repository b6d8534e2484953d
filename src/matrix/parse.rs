//! Line parser for the `RxC: v1 v2 ...` matrix format

use super::MatrixRecord;
use thiserror::Error;

/// Why a single line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineErrorKind {
    #[error("missing ':' between shape and values")]
    MissingColon,

    #[error("shape must be <rows>x<cols>, got {0:?}")]
    BadShape(String),

    #[error("invalid dimension {0:?}")]
    BadDimension(String),

    #[error("invalid value {0:?}")]
    BadValue(String),

    #[error("shape {rows}x{cols} is too large")]
    DimensionOverflow { rows: usize, cols: usize },

    #[error("expected {expected} values for a {rows}x{cols} matrix, found {found}")]
    CountMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
}

/// A rejected line, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_no}: {line:?}: {kind}")]
pub struct LineError {
    pub line_no: usize,
    pub line: String,
    pub kind: LineErrorKind,
}

/// Result of parsing a whole file's text
#[derive(Debug, Default)]
pub struct ParsedText {
    /// Successfully parsed matrices in line order
    pub records: Vec<MatrixRecord>,
    /// Rejected lines in line order
    pub errors: Vec<LineError>,
}

/// Parse one line into a matrix
pub fn parse_line(line: &str) -> Result<MatrixRecord, LineErrorKind> {
    let (shape, values) = line
        .trim()
        .split_once(':')
        .ok_or(LineErrorKind::MissingColon)?;

    let (rows, cols) = parse_dimensions(shape)?;

    let data = values
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| LineErrorKind::BadValue(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    MatrixRecord::new(rows, cols, data)
}

/// Parse every line of `text`, keeping going past bad lines
///
/// A whitespace-only line has no `:` and is reported like any other bad line.
pub fn parse_text(text: &str) -> ParsedText {
    let mut parsed = ParsedText::default();

    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(kind) => parsed.errors.push(LineError {
                line_no: idx + 1,
                line: line.trim().to_string(),
                kind,
            }),
        }
    }

    parsed
}

fn parse_dimensions(shape: &str) -> Result<(usize, usize), LineErrorKind> {
    let mut parts = shape.split('x');
    let (rows, cols) = match (parts.next(), parts.next(), parts.next()) {
        (Some(rows), Some(cols), None) => (rows, cols),
        _ => return Err(LineErrorKind::BadShape(shape.trim().to_string())),
    };

    Ok((parse_dimension(rows)?, parse_dimension(cols)?))
}

fn parse_dimension(token: &str) -> Result<usize, LineErrorKind> {
    let token = token.trim();
    token
        .parse()
        .map_err(|_| LineErrorKind::BadDimension(token.to_string()))
}
