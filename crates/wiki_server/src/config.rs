//! Environment-driven server configuration.
//!
//! Every setting has a default; a present but unparsable value is a startup
//! error rather than a silent fallback.

use std::{env, fmt::Display, fs, path::Path, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;
use wiki_core::{default_log_level, LogDestination, SectionTable};

pub const HOST_KEY: &str = "WIKI_HOST";
pub const PORT_KEY: &str = "WIKI_PORT";
pub const STORE_KEY: &str = "WIKI_STORE";
pub const ENTRIES_DIR_KEY: &str = "WIKI_ENTRIES_DIR";
pub const DB_PATH_KEY: &str = "WIKI_DB_PATH";
pub const SECTIONS_FILE_KEY: &str = "WIKI_SECTIONS_FILE";
pub const LOG_LEVEL_KEY: &str = "WIKI_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "WIKI_LOG_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value `{value}`: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error("Failed to read sections file `{path}`: {source}")]
    SectionsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Sections file `{path}` is not a YAML list of strings: {source}")]
    SectionsFormat {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Entry store backend selected by `WIKI_STORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Files,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "files" | "file" => Ok(Self::Files),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown store `{other}`; expected files|sqlite")),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Files => write!(f, "files"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub entries_dir: PathBuf,
    pub db_path: PathBuf,
    pub sections_file: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: try_load(&lookup, HOST_KEY, "127.0.0.1")?,
            port: try_load(&lookup, PORT_KEY, "8000")?,
            store: try_load(&lookup, STORE_KEY, "files")?,
            entries_dir: try_load(&lookup, ENTRIES_DIR_KEY, "entries")?,
            db_path: try_load(&lookup, DB_PATH_KEY, "wiki.sqlite3")?,
            sections_file: optional_path(&lookup, SECTIONS_FILE_KEY),
            log_level: try_load(&lookup, LOG_LEVEL_KEY, default_log_level())?,
            log_dir: optional_path(&lookup, LOG_DIR_KEY),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_dir {
            Some(dir) => LogDestination::Directory(dir.clone()),
            None => LogDestination::Stderr,
        }
    }

    /// Builds the section table from the configured YAML file, or the
    /// built-in texts when no file is configured.
    pub fn load_sections(&self) -> Result<SectionTable, ConfigError> {
        match &self.sections_file {
            Some(path) => read_sections(path),
            None => Ok(SectionTable::default()),
        }
    }
}

#[derive(Deserialize)]
#[serde(transparent)]
struct SectionsFile(Vec<String>);

fn read_sections(path: &Path) -> Result<SectionTable, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::SectionsIo {
        path: path.to_path_buf(),
        source,
    })?;
    let SectionsFile(texts) =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::SectionsFormat {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SectionTable::new(texts))
}

fn var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = var(lookup, key).unwrap_or_else(|| default.to_string());
    value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key,
        message: err.to_string(),
        value,
    })
}

fn optional_path<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    var(lookup, key).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, StoreBackend};
    use std::collections::HashMap;
    use std::io::Write;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.store, StoreBackend::Files);
        assert_eq!(config.entries_dir.to_str(), Some("entries"));
        assert!(config.sections_file.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("WIKI_PORT", "9001"),
            ("WIKI_STORE", "SQLite"),
            ("WIKI_DB_PATH", "/tmp/w.db"),
            ("WIKI_LOG_DIR", "  "),
        ])
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.db_path.to_str(), Some("/tmp/w.db"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config_from(&[("WIKI_PORT", "eighty")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "WIKI_PORT", .. }
        ));
    }

    #[test]
    fn unknown_store_is_an_error() {
        assert!(config_from(&[("WIKI_STORE", "redis")]).is_err());
    }

    #[test]
    fn sections_load_from_yaml_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- first text\n- second text").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = config_from(&[("WIKI_SECTIONS_FILE", path.as_str())]).unwrap();
        let sections = config.load_sections().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get(2), Some("second text"));
    }

    #[test]
    fn malformed_sections_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not: a list").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = config_from(&[("WIKI_SECTIONS_FILE", path.as_str())]).unwrap();
        assert!(matches!(
            config.load_sections(),
            Err(ConfigError::SectionsFormat { .. })
        ));
    }
}
