// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option can also come from an environment variable. The names follow
// the GitHub Actions convention (INPUT_<NAME>), so the same binary works as
// a CLI and as an Action step:
//
//   link-sentinel --file-path README.md --concurrent-workers 10
//   INPUT_FILE_PATH=README.md link-sentinel
//
// Numeric settings are read as plain strings on purpose. A bad value like
// "abc" or "0" must not stop the run: we print a warning and use the default.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct
// - Generics: resolve_setting works for any number type that can be parsed
// - FromStr: the trait behind str::parse()
// =============================================================================

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use link_sentinel::checker::{
    ProbeConfig, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKER_COUNT,
};

#[derive(Parser, Debug)]
#[command(
    name = "link-sentinel",
    version,
    about = "Checks that every link in a document is still reachable",
    long_about = "link-sentinel finds every http(s) link in a text or Markdown document and \
                  checks each one concurrently. It exits with status 1 if any link is unreachable, \
                  which makes it easy to use in CI pipelines."
)]
pub struct Cli {
    /// Path of the document to scan (required)
    #[arg(long, env = "INPUT_FILE_PATH")]
    pub file_path: PathBuf,

    /// Number of links checked at the same time (default: 30)
    #[arg(long, env = "INPUT_CONCURRENT_WORKERS")]
    pub concurrent_workers: Option<String>,

    /// Timeout in seconds for each request (default: 5)
    #[arg(long, env = "INPUT_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<String>,

    /// Redirects to follow before using the last response (default: 10)
    #[arg(long, env = "INPUT_MAX_REDIRECTS")]
    pub max_redirects: Option<String>,

    /// Output results in JSON format instead of lists
    ///
    /// From the environment, "", "false", "no", "off" and "0" mean off and
    /// anything else means on, so an unset Action input never fails the run.
    #[arg(long, env = "INPUT_JSON", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub json: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    // Turns the raw options into a validated ProbeConfig.
    // Never fails: invalid values are replaced by their defaults.
    pub fn probe_config(&self) -> ProbeConfig {
        let worker_count = resolve_setting(
            "concurrent_workers",
            self.concurrent_workers.as_deref(),
            DEFAULT_WORKER_COUNT,
            1,
        );
        let timeout_secs = resolve_setting(
            "timeout_seconds",
            self.timeout_seconds.as_deref(),
            DEFAULT_TIMEOUT_SECS,
            1,
        );
        let max_redirects = resolve_setting(
            "max_redirects",
            self.max_redirects.as_deref(),
            DEFAULT_MAX_REDIRECTS,
            0,
        );

        ProbeConfig {
            timeout: Duration::from_secs(timeout_secs),
            max_redirects,
            worker_count,
        }
    }
}

// Parses one numeric setting, falling back to `default` when the value is
// missing, empty, not a number, or below `min`.
fn resolve_setting<T>(name: &str, raw: Option<&str>, default: T, min: T) -> T
where
    T: FromStr + PartialOrd + Display + Copy,
{
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return default,
    };

    match raw.parse::<T>() {
        Ok(value) if value >= min => value,
        _ => {
            tracing::warn!("invalid {}: {:?}, using default value of {}", name, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The environment is shared by every test thread, so any test that
    // parses a Cli takes this lock first.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const INPUT_VARS: [&str; 5] = [
        "INPUT_FILE_PATH",
        "INPUT_CONCURRENT_WORKERS",
        "INPUT_TIMEOUT_SECONDS",
        "INPUT_MAX_REDIRECTS",
        "INPUT_JSON",
    ];

    // Runs `f` with exactly the given INPUT_* variables set
    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in INPUT_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        let result = f();
        for name in INPUT_VARS {
            std::env::remove_var(name);
        }
        result
    }

    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full = vec!["link-sentinel"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full)
    }

    fn parse(args: &[&str]) -> Cli {
        with_env(&[], || try_parse(args).unwrap())
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--file-path", "README.md"]);
        assert_eq!(cli.file_path, PathBuf::from("README.md"));
        assert_eq!(cli.probe_config(), ProbeConfig::default());
    }

    #[test]
    fn test_explicit_values() {
        let cli = parse(&[
            "--file-path",
            "docs.md",
            "--concurrent-workers",
            "8",
            "--timeout-seconds",
            "12",
            "--max-redirects",
            "0",
        ]);
        let config = cli.probe_config();
        assert_eq!(config.worker_count, 8);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.max_redirects, 0);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let cli = parse(&[
            "--file-path",
            "docs.md",
            "--concurrent-workers",
            "0",
            "--timeout-seconds",
            "soon",
            "--max-redirects",
            "many",
        ]);
        assert_eq!(cli.probe_config(), ProbeConfig::default());
    }

    #[test]
    fn test_resolve_setting_edge_cases() {
        assert_eq!(resolve_setting("workers", None, 30usize, 1), 30);
        assert_eq!(resolve_setting("workers", Some(""), 30usize, 1), 30);
        assert_eq!(resolve_setting("workers", Some("  4 "), 30usize, 1), 4);
        assert_eq!(resolve_setting("workers", Some("-1"), 30usize, 1), 30);
        assert_eq!(resolve_setting("timeout", Some("2.5"), 5u64, 1), 5);
    }

    #[test]
    fn test_missing_file_path_is_usage_error() {
        with_env(&[], || assert!(try_parse(&[]).is_err()));
        with_env(&[("INPUT_FILE_PATH", "")], || assert!(try_parse(&[]).is_err()));
    }

    #[test]
    fn test_file_path_from_env() {
        let cli = with_env(&[("INPUT_FILE_PATH", "docs/CHANGELOG.md")], || {
            try_parse(&[]).unwrap()
        });
        assert_eq!(cli.file_path, PathBuf::from("docs/CHANGELOG.md"));
        assert_eq!(cli.probe_config(), ProbeConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn test_settings_from_env() {
        let cli = with_env(
            &[
                ("INPUT_FILE_PATH", "README.md"),
                ("INPUT_CONCURRENT_WORKERS", "7"),
                ("INPUT_TIMEOUT_SECONDS", "3"),
                ("INPUT_MAX_REDIRECTS", "2"),
            ],
            || try_parse(&[]).unwrap(),
        );
        let config = cli.probe_config();
        assert_eq!(config.worker_count, 7);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_redirects, 2);
    }

    #[test]
    fn test_empty_env_settings_use_defaults() {
        let cli = with_env(
            &[
                ("INPUT_FILE_PATH", "README.md"),
                ("INPUT_CONCURRENT_WORKERS", ""),
                ("INPUT_TIMEOUT_SECONDS", ""),
                ("INPUT_MAX_REDIRECTS", ""),
                ("INPUT_JSON", ""),
            ],
            || try_parse(&[]).unwrap(),
        );
        assert_eq!(cli.probe_config(), ProbeConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn test_invalid_env_settings_use_defaults() {
        let cli = with_env(
            &[
                ("INPUT_FILE_PATH", "README.md"),
                ("INPUT_CONCURRENT_WORKERS", "lots"),
                ("INPUT_TIMEOUT_SECONDS", "0"),
            ],
            || try_parse(&[]).unwrap(),
        );
        assert_eq!(cli.probe_config(), ProbeConfig::default());
    }

    #[test]
    fn test_flags_override_env() {
        let cli = with_env(
            &[
                ("INPUT_FILE_PATH", "from-env.md"),
                ("INPUT_CONCURRENT_WORKERS", "7"),
            ],
            || try_parse(&["--file-path", "from-flag.md", "--concurrent-workers", "2"]).unwrap(),
        );
        assert_eq!(cli.file_path, PathBuf::from("from-flag.md"));
        assert_eq!(cli.probe_config().worker_count, 2);
    }

    #[test]
    fn test_json_from_env() {
        let json_for = |value: &str| {
            with_env(&[("INPUT_FILE_PATH", "README.md"), ("INPUT_JSON", value)], || {
                try_parse(&[]).unwrap().json
            })
        };

        assert!(json_for("true"));
        assert!(json_for("1"));
        assert!(json_for("yes"));
        assert!(!json_for(""));
        assert!(!json_for("false"));
        assert!(!json_for("0"));
    }

    #[test]
    fn test_json_flag() {
        assert!(parse(&["--file-path", "README.md", "--json"]).json);
        assert!(!parse(&["--file-path", "README.md"]).json);
    }
}
