//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{MatcacheError, MatcacheResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

const VALID_KEYS: &[&str] = &[
    "input.dir",
    "cache.host",
    "cache.port",
    "cache.db",
    "workers.max_workers",
    "workers.timeout_secs",
    "report.path",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> MatcacheResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut updated = config.clone();
            apply_value(&mut updated, &key, &value)?;
            manager.save(&updated).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> MatcacheResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> MatcacheResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

/// Set a dot-separated key on `config`
fn apply_value(config: &mut Config, key: &str, value: &str) -> MatcacheResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["input", "dir"] => config.input.dir = Some(PathBuf::from(value)),
        ["cache", "host"] => config.cache.host = value.to_string(),
        ["cache", "port"] => config.cache.port = parse_number(value)?,
        ["cache", "db"] => config.cache.db = parse_number(value)?,
        ["workers", "max_workers"] => config.workers.max_workers = parse_number(value)?,
        ["workers", "timeout_secs"] => config.workers.timeout_secs = parse_number(value)?,
        ["report", "path"] => config.report.path = PathBuf::from(value),
        _ => {
            return Err(MatcacheError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: &str) -> MatcacheResult<T> {
    value
        .parse()
        .map_err(|_| MatcacheError::User(format!("Invalid number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn apply_known_keys() {
        let mut config = Config::default();
        apply_value(&mut config, "cache.port", "6380").unwrap();
        apply_value(&mut config, "input.dir", "/data/in").unwrap();
        apply_value(&mut config, "workers.timeout_secs", "30").unwrap();

        assert_eq!(config.cache.port, 6380);
        assert_eq!(config.input.dir, Some(PathBuf::from("/data/in")));
        assert_eq!(config.workers.timeout_secs, 30);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply_value(&mut config, "cache.password", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn apply_rejects_bad_number() {
        let mut config = Config::default();
        assert!(apply_value(&mut config, "cache.port", "99999").is_err());
        assert!(apply_value(&mut config, "workers.max_workers", "-1").is_err());
    }

    #[tokio::test]
    async fn set_persists_to_file() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let args = ConfigArgs {
            action: Some(ConfigAction::Set {
                key: "cache.host".to_string(),
                value: "redis.internal".to_string(),
            }),
        };

        execute(args, &Config::default(), &manager).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.cache.host, "redis.internal");
    }
}
