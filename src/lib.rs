//! matcache - parallel matrix file cache
//!
//! Parses text files holding one matrix per line and stores every matrix
//! in Redis as little-endian `i64` data plus a `RxC` shape string.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod matrix;
pub mod processor;
pub mod report;
pub mod store;
pub mod ui;

pub use error::{MatcacheError, MatcacheResult};
