//! Runner configuration loaded from environment variables.

use std::path::PathBuf;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Runner configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `FACTORY_SCENARIO`: scenario file to replay (default: `"scenario.json"`)
/// - `FACTORY_EXPORT`: print the stored event stream as JSON lines (default: `true`)
/// - `FACTORY_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scenario_path: PathBuf,
    pub export: bool,
    pub log_format: LogFormat,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            scenario_path: lookup("FACTORY_SCENARIO")
                .map(PathBuf::from)
                .unwrap_or(defaults.scenario_path),
            export: lookup("FACTORY_EXPORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.export),
            log_format: lookup("FACTORY_LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_format),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Applies command-line arguments. The first argument, if any, replaces
    /// the scenario path.
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.scenario_path = PathBuf::from(path);
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenario_path: PathBuf::from("scenario.json"),
            export: true,
            log_format: LogFormat::Pretty,
            log_level: "info".to_string(),
        }
    }
}
