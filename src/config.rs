use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub disk_path: PathBuf,
    pub secret_path: PathBuf,
    pub file_mode: u32,
    pub log_level: String,
}

/// Optional TOML file named by `NANOKEEP_CONFIG`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    disk_path: Option<PathBuf>,
    secret_path: Option<PathBuf>,
    file_mode: Option<String>,
    log_level: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io("read config", path, e))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let file = match env::var("NANOKEEP_CONFIG") {
            Ok(path) => FileConfig::load(Path::new(&path))?,
            Err(_) => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| env::var(key).ok()))
    }

    /// Layer: built-in defaults, then file values, then environment
    fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            disk_path: lookup("NANOKEEP_DISK_PATH")
                .map(PathBuf::from)
                .or(file.disk_path)
                .unwrap_or(defaults.disk_path),
            secret_path: lookup("NANOKEEP_SECRET_PATH")
                .map(PathBuf::from)
                .or(file.secret_path)
                .unwrap_or(defaults.secret_path),
            file_mode: lookup("NANOKEEP_FILE_MODE")
                .and_then(|s| parse_mode(&s))
                .or_else(|| file.file_mode.as_deref().and_then(parse_mode))
                .unwrap_or(defaults.file_mode),
            log_level: lookup("NANOKEEP_LOG_LEVEL")
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disk_path: PathBuf::from("/"),
            secret_path: PathBuf::from("/var/lib/nanokeep/secret"),
            file_mode: 0o644,
            log_level: "info".to_string(),
        }
    }
}

/// Parse an octal permission string such as `644`, `0644` or `0o600`
pub fn parse_mode(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
}
