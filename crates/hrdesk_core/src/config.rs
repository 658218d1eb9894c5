//! Application configuration surface.
//!
//! # Responsibility
//! - Parse the optional TOML config file into typed settings.
//! - Provide defaults for every key so an empty file is valid.
//!
//! # Invariants
//! - `password` never appears in `Debug` output.
//! - `HRDESK_DB_PASSWORD` takes precedence over the file value.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding `database.password`.
pub const PASSWORD_ENV_VAR: &str = "HRDESK_DB_PASSWORD";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hrdesk.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Connection parameters for the record store.
///
/// The embedded engine reads `service` as the database file (`:memory:` for
/// a transient database). `host` must name the local machine.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub service: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1521,
            service: "hrdesk.sqlite3".to_string(),
            user: "SYSTEM".to_string(),
            password: String::new(),
        }
    }
}

impl Debug for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// File logging settings. Logging stays off unless `dir` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parses config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolves the startup config from the working directory and the
    /// process environment.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present and built-in defaults otherwise. Environment
    /// overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_in(Path::new(""), explicit, |key| std::env::var(key).ok())
    }

    /// [`Self::resolve`] with the default-file directory and the
    /// environment lookup supplied by the caller.
    pub fn resolve_in(
        default_dir: &Path,
        explicit: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let default_file = default_dir.join(DEFAULT_CONFIG_FILE);
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None if default_file.is_file() => Self::load(&default_file)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(password) = lookup(PASSWORD_ENV_VAR) {
            self.database.password = password;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DatabaseConfig, DEFAULT_CONFIG_FILE, PASSWORD_ENV_VAR};
    use std::io::Write;
    use std::path::PathBuf;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_text_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 1521);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn parses_all_recognized_options() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            host = "127.0.0.1"
            port = 5000
            service = "/tmp/hr.sqlite3"
            user = "hr"
            password = "secret"

            [logging]
            level = "warn"
            dir = "/var/log/hrdesk"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.host, "127.0.0.1");
        assert_eq!(config.database.port, 5000);
        assert_eq!(config.database.service, "/tmp/hr.sqlite3");
        assert_eq!(config.database.user, "hr");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/hrdesk")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("[database]\nsid = \"xe\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = DatabaseConfig {
            password: "hunter2".to_string(),
            ..DatabaseConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn env_override_replaces_password() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == PASSWORD_ENV_VAR).then(|| "from-env".to_string())
        });
        assert_eq!(config.database.password, "from-env");
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nservice = \":memory:\"").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.database.service, ":memory:");

        let err = AppConfig::load("/nonexistent/hrdesk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/hrdesk.toml"));
    }

    #[test]
    fn resolve_without_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::resolve_in(dir.path(), None, no_env).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn resolve_reads_default_file_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[database]\nservice = \"staff.sqlite3\"\n",
        )
        .unwrap();

        let config = AppConfig::resolve_in(dir.path(), None, no_env).unwrap();
        assert_eq!(config.database.service, "staff.sqlite3");
    }

    #[test]
    fn resolve_requires_explicit_path_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        let missing = dir.path().join("missing.toml");

        let err =
            AppConfig::resolve_in(dir.path(), Some(missing.as_path()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path, .. } if path == missing));
    }

    #[test]
    fn resolve_applies_env_override_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "[database]\npassword = \"from-file\"\n").unwrap();

        let config = AppConfig::resolve_in(dir.path(), Some(explicit.as_path()), |key| {
            (key == PASSWORD_ENV_VAR).then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(config.database.password, "from-env");

        let config =
            AppConfig::resolve_in(dir.path(), Some(explicit.as_path()), no_env).unwrap();
        assert_eq!(config.database.password, "from-file");
    }
}
