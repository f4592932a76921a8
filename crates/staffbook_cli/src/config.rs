//! Runtime configuration for the staffbook binary.
//!
//! Loaded from (in order of precedence):
//! 1. Command-line flags
//! 2. Environment variables (`STAFFBOOK_*`)
//! 3. Config file (`<config dir>/staffbook/config.toml` or `--config`)
//! 4. Default values

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors")]
    pub cors: bool,

    /// `trace|debug|info|warn|error`; build-mode default when unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_db_path() -> PathBuf {
    data_dir().join("staffbook.sqlite3")
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    5000
}

fn default_cors() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("staffbook")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
            log_level: None,
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Layers defaults, the config file and `STAFFBOOK_*` variables.
    ///
    /// A missing config file is not an error.
    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        let path = config_file.map_or_else(Self::config_path, Path::to_path_buf);
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("STAFFBOOK_"))
            .extract()
    }

    /// Default config file location.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("staffbook")
            .join("config.toml")
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| staffbook_core::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use figment::Jail;
    use std::path::Path;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("missing.toml");
            let config = Config::load(Some(&path))?;
            assert_eq!(config, Config::default());
            assert_eq!(config.listen_addr().port(), 5000);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "staffbook.toml",
                r#"
                    port = 8081
                    cors = false
                    db_path = "/srv/staffbook/records.db"
                "#,
            )?;
            jail.set_env("STAFFBOOK_PORT", "9090");
            jail.set_env("STAFFBOOK_LOG_LEVEL", "warn");

            let config = Config::load(Some(Path::new("staffbook.toml")))?;
            assert_eq!(config.port, 9090);
            assert!(!config.cors);
            assert_eq!(config.db_path, Path::new("/srv/staffbook/records.db"));
            assert_eq!(config.effective_log_level(), "warn");
            Ok(())
        });
    }

    #[test]
    fn invalid_value_is_reported() {
        Jail::expect_with(|jail| {
            jail.set_env("STAFFBOOK_PORT", "not-a-port");
            assert!(Config::load(Some(Path::new("absent.toml"))).is_err());
            Ok(())
        });
    }
}
