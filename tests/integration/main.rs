//! Integration tests for matcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's config file
    fn matcache(temp: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("matcache");
        cmd.env("MATCACHE_CONFIG", temp.join("config.toml"))
            .env("CI", "true");
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache matrix text files in Redis"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("matcache"));
    }

    #[test]
    fn process_help_mentions_json_timing_on_stderr() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["process", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timing line goes to stderr"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("port = 6379"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["config", "set", "cache.host", "redis.internal"])
            .assert()
            .success();

        matcache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("redis.internal"));
    }

    #[test]
    fn config_set_unknown_key() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["config", "set", "cache.user", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn process_missing_dir() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["process", "--dry-run"])
            .arg(temp.path().join("nope"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Input directory not found"));
    }

    #[test]
    fn process_without_dir_or_config() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["process", "--dry-run"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No input directory given"));
    }

    #[test]
    fn process_empty_dir_writes_report() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        fs::create_dir(&input).unwrap();
        let report = temp.path().join("timing.txt");

        matcache(temp.path())
            .args(["process", "--dry-run", "--report"])
            .arg(&report)
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Redis cache processing time:"));

        let line = fs::read_to_string(&report).unwrap();
        assert!(line.starts_with("Redis cache processing time: "));
        assert!(line.ends_with(" seconds\n"));
    }

    #[test]
    fn process_dry_run_counts_matrices() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("a.txt"), "2x2: 1 2 3 4\nbad line\n1x3: 5 6 7\n").unwrap();
        fs::write(input.join("b.txt"), "1x1: 9\n").unwrap();
        let report = temp.path().join("timing.txt");

        let output = matcache(temp.path())
            .args(["process", "--dry-run", "--format", "plain", "--report"])
            .arg(&report)
            .arg(&input)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let stdout = String::from_utf8(output).unwrap();
        assert!(stdout.contains("a.txt\t2"));
        assert!(stdout.contains("b.txt\t1"));
    }

    #[test]
    fn process_json_keeps_stdout_parseable() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("m.txt"), "1x2: 3 4\n").unwrap();
        let report = temp.path().join("timing.txt");

        let output = matcache(temp.path())
            .args(["process", "--dry-run", "--format", "json", "--report"])
            .arg(&report)
            .arg(&input)
            .assert()
            .success()
            .stderr(predicate::str::contains("Redis cache processing time"))
            .get_output()
            .stdout
            .clone();

        let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(summary["files"], 1);
        assert_eq!(summary["matrices_cached"], 1);
        assert_eq!(summary["line_errors"], 0);
    }

    #[test]
    fn show_unreachable_cache() {
        let temp = TempDir::new().unwrap();
        matcache(temp.path())
            .args(["show", "a.txt_0", "--host", "127.0.0.1", "--port", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to connect to cache"));
    }
}
