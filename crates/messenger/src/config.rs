//! Messenger configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::crypto::CipherKind;
use crate::error::{Error, Result};

/// Port the messenger listens on and connects to by default.
pub const DEFAULT_PORT: u16 = 1234;

/// Connection and cipher settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote host for client mode.
    pub host: String,
    /// TCP port for both modes.
    pub port: u16,
    /// Cipher applied to every message.
    pub cipher: CipherKind,
    /// Shared key as text; empty when unset.
    pub key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: DEFAULT_PORT,
            cipher: CipherKind::default(),
            key: String::new(),
        }
    }
}

impl Config {
    /// Parses a TOML document; missing fields take their defaults.
    pub fn from_toml(text: &str) -> core::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().port, 1234);
        assert_eq!(Config::default().cipher, CipherKind::Aes128);
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_toml(
            r#"
            host = "10.0.0.7"
            port = 4000
            cipher = "none"
            key = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "10.0.0.7");
        assert_eq!(config.port, 4000);
        assert_eq!(config.cipher, CipherKind::None);
        assert_eq!(config.key, "hunter2");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = std::env::temp_dir().join(format!("smsg-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        fs::write(&path, "port = \"not a number\"").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { path: ref p, .. } if p == &path));
        fs::remove_dir_all(&dir).unwrap();
    }
}
