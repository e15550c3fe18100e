use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default Cavalier endpoint queried with `?domain=<target>`.
pub const DEFAULT_API_ENDPOINT: &str =
    "https://cavalier.hudsonrock.com/api/json/v2/osint-tools/urls-by-domain";

/// Logging section (`[logging]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only log file. Relative paths resolve against the working directory.
    pub file: PathBuf,
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "debug").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("subrock.log"),
            level: "info".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/subrock/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubrockConfig {
    /// URL of the urls-by-domain API.
    pub api_endpoint: String,
    /// Connect timeout in seconds for both the API call and the probe; 0 = libcurl default.
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds; 0 = none (libcurl default).
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    pub logging: LoggingConfig,
}

impl Default for SubrockConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            connect_timeout_secs: 0,
            timeout_secs: 0,
            user_agent: format!("subrock/{}", env!("CARGO_PKG_VERSION")),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("subrock")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Where a loaded configuration came from. Config is read before logging is
/// initialized, so callers log this once the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file existed; defaults were written to this path.
    Created(PathBuf),
    /// Read from this path.
    Loaded(PathBuf),
}

/// Load configuration from the default XDG location, creating a default file if none exists.
pub fn load_or_init() -> Result<(SubrockConfig, ConfigSource)> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<(SubrockConfig, ConfigSource)> {
    if !path.exists() {
        let default_cfg = SubrockConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        return Ok((default_cfg, ConfigSource::Created(path.to_path_buf())));
    }

    let cfg = load_from_path(path)?;
    Ok((cfg, ConfigSource::Loaded(path.to_path_buf())))
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from_path(path: &Path) -> Result<SubrockConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SubrockConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = SubrockConfig::default();
        assert_eq!(cfg.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(cfg.connect_timeout_secs, 0);
        assert_eq!(cfg.timeout_secs, 0);
        assert!(cfg.user_agent.starts_with("subrock/"));
        assert_eq!(cfg.logging.file, PathBuf::from("subrock.log"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SubrockConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SubrockConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            timeout_secs = 5

            [logging]
            level = "debug"
        "#;
        let cfg: SubrockConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.connect_timeout_secs, 0);
        assert_eq!(cfg.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.file, PathBuf::from("subrock.log"));
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"api_endpoint = \"http://127.0.0.1:9/api\"\n")
            .unwrap();
        f.flush().unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.api_endpoint, "http://127.0.0.1:9/api");
    }

    #[test]
    fn load_or_init_at_creates_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subrock").join("config.toml");

        let (cfg, source) = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, SubrockConfig::default());
        assert_eq!(source, ConfigSource::Created(path.clone()));
        assert!(path.exists());

        fs::write(&path, "timeout_secs = 9\n").unwrap();
        let (cfg, source) = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.timeout_secs, 9);
        assert_eq!(source, ConfigSource::Loaded(path));
    }

    #[test]
    fn load_from_path_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("read config"));
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"timeout_secs = \"soon\"\n").unwrap();
        f.flush().unwrap();
        let err = load_from_path(f.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config"));
    }
}
