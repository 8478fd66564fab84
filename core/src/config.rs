//! config.rs
//! Process-level configuration for a capture pipeline.
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid document.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_MAX_CONTROL_FRAME_LEN, DEFAULT_MAX_DATA_FRAME_LEN, LEN_PREFIX};
use crate::crypto::{AnonymisationKey, CryptoError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    pub decoder: DecoderConfig,
    /// Absent means addresses leave the pipeline untouched.
    pub anonymiser: Option<AnonymiserConfig>,
}

/// Frame size limits enforced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    pub max_data_frame_len: u32,
    pub max_control_frame_len: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_data_frame_len: DEFAULT_MAX_DATA_FRAME_LEN,
            max_control_frame_len: DEFAULT_MAX_CONTROL_FRAME_LEN,
        }
    }
}

/// Source of the anonymisation key. Exactly one of `passphrase` or
/// `key_hex` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnonymiserConfig {
    /// Derive the key; `salt` falls back to the tool default.
    Passphrase {
        passphrase: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        salt: Option<String>,
    },
    /// Use 32 hex digits directly as the key.
    Key { key_hex: String },
}

/// Wire shape of the `anonymiser` section before the key source is resolved.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAnonymiserConfig {
    passphrase: Option<String>,
    salt: Option<String>,
    key_hex: Option<String>,
}

impl TryFrom<RawAnonymiserConfig> for AnonymiserConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAnonymiserConfig) -> Result<Self, ConfigError> {
        match (raw.passphrase, raw.key_hex) {
            (Some(passphrase), None) => Ok(Self::Passphrase { passphrase, salt: raw.salt }),
            (None, Some(key_hex)) if raw.salt.is_none() => Ok(Self::Key { key_hex }),
            (None, Some(_)) => Err(ConfigError::SaltWithoutPassphrase),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingKeySources),
            (None, None) => Err(ConfigError::MissingKeySource),
        }
    }
}

impl<'de> Deserialize<'de> for AnonymiserConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAnonymiserConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_control_frame_len must be at least {min}, got {actual}")]
    ControlLimitTooSmall { min: u32, actual: u32 },

    #[error("max_data_frame_len must be non-zero")]
    ZeroDataLimit,

    #[error("anonymiser passphrase must not be empty")]
    EmptyPassphrase,

    #[error("anonymiser must set exactly one of passphrase or key_hex, not both")]
    ConflictingKeySources,

    #[error("anonymiser must set passphrase or key_hex")]
    MissingKeySource,

    #[error("anonymiser salt only applies to a passphrase")]
    SaltWithoutPassphrase,

    #[error("invalid anonymiser key: {0}")]
    InvalidKey(#[from] CryptoError),
}

impl CaptureConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: CaptureConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decoder.validate()?;
        match &self.anonymiser {
            Some(AnonymiserConfig::Passphrase { passphrase, .. }) if passphrase.is_empty() => {
                Err(ConfigError::EmptyPassphrase)
            }
            Some(AnonymiserConfig::Key { key_hex }) => {
                AnonymisationKey::from_hex(key_hex)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.max_control_frame_len as usize) < LEN_PREFIX {
            return Err(ConfigError::ControlLimitTooSmall {
                min: LEN_PREFIX as u32,
                actual: self.max_control_frame_len,
            });
        }
        if self.max_data_frame_len == 0 {
            return Err(ConfigError::ZeroDataLimit);
        }
        Ok(())
    }
}
