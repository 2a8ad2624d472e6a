use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub storage: StorageConfig,
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub dsn: String,
}

/// Upper bounds on list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub notes: usize,
    pub activity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            storage: StorageConfig::default(),
            limits: Limits::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Postgres,
            dsn: String::new(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            notes: 50,
            activity: 20,
        }
    }
}

impl Config {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `PG_DSN`, `PORT`, `MATTY_STORAGE` and `MATTY_LOG_LEVEL`
    /// overrides, reading variables through `var`.
    pub fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dsn) = var("PG_DSN") {
            self.storage.dsn = dsn;
        }
        if let Some(port) = var("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::Env {
                var: "PORT",
                value: port,
            })?;
        }
        if let Some(backend) = var("MATTY_STORAGE") {
            self.storage.backend = match backend.to_lowercase().as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => {
                    return Err(ConfigError::Env {
                        var: "MATTY_STORAGE",
                        value: backend,
                    });
                }
            };
        }
        if let Some(level) = var("MATTY_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.dsn.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "postgres storage needs a dsn (storage.dsn or PG_DSN)".to_string(),
            ));
        }
        if self.limits.notes == 0 || self.limits.activity == 0 {
            return Err(ConfigError::Invalid(
                "list limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(format!("bad listen address {}:{}", self.host, self.port))
            })
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The requested file (`MATTY_CONFIG`, default `config.yaml`).
    File(PathBuf),
    /// The requested file was missing and a fallback file was read instead.
    Fallback { requested: PathBuf, used: PathBuf },
    /// No file was found.
    Defaults,
}

impl ConfigSource {
    /// Reports the source. Call once the subscriber is installed.
    pub fn log(&self) {
        match self {
            Self::File(path) => tracing::info!("Loaded config from '{}'", path.display()),
            Self::Fallback { requested, used } => tracing::warn!(
                "Config file '{}' not found, falling back to '{}'",
                requested.display(),
                used.display()
            ),
            Self::Defaults => {
                tracing::info!("No config file found, using defaults and environment variables");
            }
        }
    }
}

const FALLBACK_FILES: [&str; 2] = ["config.yaml", "config.example.yaml"];

fn locate_config(requested: &Path, exists: impl Fn(&Path) -> bool) -> ConfigSource {
    if exists(requested) {
        return ConfigSource::File(requested.to_path_buf());
    }
    FALLBACK_FILES
        .iter()
        .map(Path::new)
        .find(|path| exists(path))
        .map_or(ConfigSource::Defaults, |used| ConfigSource::Fallback {
            requested: requested.to_path_buf(),
            used: used.to_path_buf(),
        })
}

fn read_config_file() -> Result<(Config, ConfigSource), ConfigError> {
    let requested = env::var("MATTY_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let source = locate_config(Path::new(&requested), Path::exists);

    let config = match &source {
        ConfigSource::File(path) | ConfigSource::Fallback { used: path, .. } => {
            Config::load_from(path)?
        }
        // environment variables are applied by the caller
        ConfigSource::Defaults => Config::default(),
    };
    Ok((config, source))
}

/// Loads, overrides and validates the configuration. The returned source is
/// logged by the caller after tracing is initialized.
pub fn load_config() -> Result<(Config, ConfigSource), ConfigError> {
    let (mut config, source) = read_config_file()?;
    config.apply_overrides(|name| env::var(name).ok())?;
    config.validate()?;
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_fixed_limits() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.limits.notes, 50);
        assert_eq!(config.limits.activity, 20);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
    }

    #[test]
    fn parses_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 9100\nstorage:\n  backend: memory\nlimits:\n  activity: 5\n"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.limits.activity, 5);
        // unset fields keep their defaults
        assert_eq!(config.limits.notes, 50);
        assert_eq!(config.log_level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn rejects_unparseable_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: [not a number").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[
                ("PG_DSN", "host=db user=matty"),
                ("PORT", "8080"),
                ("MATTY_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.storage.dsn, "host=db user=matty");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "debug");
        config.validate().unwrap();
    }

    #[test]
    fn bad_env_values_are_reported() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(vars(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));

        let err = config
            .apply_overrides(vars(&[("MATTY_STORAGE", "mongo")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "MATTY_STORAGE", .. }));
    }

    #[test]
    fn requested_file_wins_over_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("matty.yaml");
        fs::write(&requested, "port: 9000\n").unwrap();

        let source = locate_config(&requested, Path::exists);
        assert_eq!(source, ConfigSource::File(requested));
    }

    #[test]
    fn missing_file_falls_back_in_order() {
        let requested = Path::new("/nonexistent/matty.yaml");

        let only_example = |path: &Path| path == Path::new("config.example.yaml");
        assert_eq!(
            locate_config(requested, only_example),
            ConfigSource::Fallback {
                requested: requested.to_path_buf(),
                used: PathBuf::from("config.example.yaml"),
            }
        );

        let both = |path: &Path| path != requested;
        assert_eq!(
            locate_config(requested, both),
            ConfigSource::Fallback {
                requested: requested.to_path_buf(),
                used: PathBuf::from("config.yaml"),
            }
        );

        assert_eq!(locate_config(requested, |_| false), ConfigSource::Defaults);
    }

    #[test]
    fn postgres_without_dsn_is_invalid() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut memory = Config::default();
        memory.storage.backend = StorageBackend::Memory;
        memory.validate().unwrap();
    }
}
