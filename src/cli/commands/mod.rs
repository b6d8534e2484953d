//! CLI command implementations

pub mod config;
pub mod process;
pub mod show;

pub use config::execute as config;
pub use process::execute as process;
pub use show::execute as show;
