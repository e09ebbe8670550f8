//! Configuration for folio.
//!
//! Settings are layered, later layers overriding earlier ones:
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, picked by extension); when
//!    no file is given, `folio.toml` in the platform config directory is
//!    used if it exists,
//! 3. `FOLIO_`-prefixed environment variables, with `__` separating nested
//!    keys (e.g. `FOLIO_DATABASE__MAX_CONNECTIONS=2`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "FOLIO_";
const CONFIG_FILE_NAME: &str = "folio.toml";
const DATABASE_FILE_NAME: &str = "folio.sqlite";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "folio")
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Location of the SQLite database file.
    pub path: PathBuf,
    pub max_connections: u32,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = match project_dirs() {
            Some(dirs) => dirs.data_dir().join(DATABASE_FILE_NAME),
            None => PathBuf::from(DATABASE_FILE_NAME),
        };
        Self { path, max_connections: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
    pub format: LogFormat,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), format: LogFormat::Text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load configuration from defaults, an optional file, and the environment.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(file)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(database = %config.database.path.display(), "configuration loaded");
        Ok(config)
    }

    /// The layered configuration sources, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            },
            // A missing default file is not an error.
            None => match project_dirs() {
                Some(dirs) => figment.merge(Toml::file(dirs.config_dir().join(CONFIG_FILE_NAME))),
                None => figment,
            },
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            exn::bail!(ErrorKind::Invalid("database.max_connections must be at least 1"));
        }
        if self.log.filter.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("log.filter must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.path.ends_with(DATABASE_FILE_NAME));
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[rstest]
    #[case(".toml", "[database]\npath = \"/tmp/folio-test.sqlite\"\nmax_connections = 2\n\n[log]\nformat = \"json\"\n")]
    #[case(".yaml", "database:\n  path: /tmp/folio-test.sqlite\n  max_connections: 2\nlog:\n  format: json\n")]
    #[case(".json", r#"{"database": {"path": "/tmp/folio-test.sqlite", "max_connections": 2}, "log": {"format": "json"}}"#)]
    fn test_load_from_file(#[case] suffix: &str, #[case] contents: &str) {
        let file = write_config(suffix, contents);
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/folio-test.sqlite"));
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.log.format, LogFormat::Json);
        // Untouched keys keep their defaults.
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config(".toml", "[database\nmax_connections = ");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".ini", "[database]\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[rstest]
    #[case("[database]\nmax_connections = 0\n")]
    #[case("[log]\nfilter = \"  \"\n")]
    fn test_invalid_values(#[case] contents: &str) {
        let file = write_config(".toml", contents);
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)));
    }
}
