//! CLI argument definitions using clap derive

use crate::config::schema::CacheConfig;
use crate::config::Config;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// matcache - cache matrix text files in Redis
///
/// Parses every file in a directory as one matrix per line
/// (`RxC: v1 v2 ...`) and stores each matrix as binary data plus a
/// shape string, processing files in parallel.
#[derive(Parser, Debug)]
#[command(name = "matcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MATCACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a directory of matrix files and cache every matrix
    Process(ProcessArgs),

    /// Read a cached matrix back and print it
    Show(ShowArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Redis connection overrides shared by several commands
#[derive(Args, Debug, Default)]
pub struct CacheTarget {
    /// Redis host (default: from config)
    #[arg(long)]
    pub host: Option<String>,

    /// Redis port (default: from config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Redis logical database index (default: from config)
    #[arg(long)]
    pub db: Option<i64>,
}

impl CacheTarget {
    /// Apply the overrides on top of the configured connection
    pub fn resolve(&self, config: &Config) -> CacheConfig {
        let mut cache = config.cache.clone();
        if let Some(ref host) = self.host {
            cache.host = host.clone();
        }
        if let Some(port) = self.port {
            cache.port = port;
        }
        if let Some(db) = self.db {
            cache.db = db;
        }
        cache
    }
}

/// Arguments for the process command
#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Directory of matrix files (default: input.dir from config)
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub cache: CacheTarget,

    /// Maximum concurrent files, further capped by CPU count
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Seconds to wait before abandoning unfinished files
    #[arg(long)]
    pub timeout: Option<u64>,

    /// File the timing line is written to
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Parse and encode without a Redis server (in-memory store)
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format; with json the timing line goes to stderr
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Data key of the matrix, e.g. /data/in/a.txt_0
    pub key: String,

    #[command(flatten)]
    pub cache: CacheTarget,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.host)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Minimal text
    Plain,
}

impl OutputFormat {
    /// Whether the format is meant for other programs
    pub fn is_machine_readable(self) -> bool {
        !matches!(self, Self::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_process() {
        let cli = Cli::parse_from(["matcache", "process", "/data/in", "--workers", "2"]);
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.dir, Some(PathBuf::from("/data/in")));
                assert_eq!(args.workers, Some(2));
                assert!(!args.dry_run);
                assert_eq!(args.format, OutputFormat::Table);
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn cli_parses_process_without_dir() {
        let cli = Cli::parse_from(["matcache", "process", "--dry-run", "--format", "json"]);
        match cli.command {
            Commands::Process(args) => {
                assert!(args.dir.is_none());
                assert!(args.dry_run);
                assert_eq!(args.format, OutputFormat::Json);
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn cli_parses_cache_overrides() {
        let cli = Cli::parse_from([
            "matcache", "show", "a.txt_0", "--host", "redis", "--port", "6380", "--db", "2",
        ]);
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.key, "a.txt_0");
                let cache = args.cache.resolve(&Config::default());
                assert_eq!(cache.host, "redis");
                assert_eq!(cache.port, 6380);
                assert_eq!(cache.db, 2);
            }
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cache_target_keeps_config_values() {
        let mut config = Config::default();
        config.cache.host = "cache.local".to_string();
        let cache = CacheTarget::default().resolve(&config);
        assert_eq!(cache, config.cache);
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["matcache", "config", "set", "cache.port", "6380"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Set { key, value }),
            }) => {
                assert_eq!(key, "cache.port");
                assert_eq!(value, "6380");
            }
            _ => panic!("expected config set"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["matcache", "config"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["matcache", "-v", "config"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["matcache", "-vv", "config"]);
        assert_eq!(cli.verbose, 2);
    }
}
