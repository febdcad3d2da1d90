//! Library configuration, loadable from TOML.
//!
//! ```toml
//! spec_version = "1.0"
//!
//! [signing]
//! key_bits = 2048
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, VConError};

/// vCon specification version written into new records.
pub const DEFAULT_SPEC_VERSION: &str = "1.0";

/// Smallest RSA modulus accepted for key generation.
pub const MIN_KEY_BITS: usize = 2048;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VConConfig {
    #[serde(default = "default_spec_version")]
    pub spec_version: String,
    #[serde(default)]
    pub signing: SigningConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    /// RSA modulus size used by `generate_key_pair_with`
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,
}

fn default_spec_version() -> String {
    DEFAULT_SPEC_VERSION.to_string()
}

fn default_key_bits() -> usize {
    MIN_KEY_BITS
}

impl Default for VConConfig {
    fn default() -> Self {
        Self {
            spec_version: default_spec_version(),
            signing: SigningConfig::default(),
        }
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
        }
    }
}

impl VConConfig {
    /// Parses a TOML document. An empty document yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: VConConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing or empty file yields the defaults; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).inspect_err(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", path, e);
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.spec_version.trim().is_empty() {
            return Err(VConError::config("spec_version must not be empty"));
        }
        self.signing.validate()
    }
}

impl SigningConfig {
    pub fn validate(&self) -> Result<()> {
        if self.key_bits < MIN_KEY_BITS {
            return Err(VConError::config(format!(
                "key_bits must be at least {}, got {}",
                MIN_KEY_BITS, self.key_bits
            )));
        }
        Ok(())
    }
}
