//! RSA key generation and PEM parsing.

use rand::rngs::OsRng;
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;

use crate::config::SigningConfig;
use crate::error::{Result, VConError};

/// PEM-encoded RSA key pair (PKCS#1).
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key_pem: String,
    pub public_key_pem: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key_pem", &"<redacted>")
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Generates a fresh 2048-bit RSA key pair.
pub fn generate_key_pair() -> Result<KeyPair> {
    generate_key_pair_with(&SigningConfig::default())
}

/// Generates an RSA key pair with the modulus size from `config`.
pub fn generate_key_pair_with(config: &SigningConfig) -> Result<KeyPair> {
    config.validate()?;
    tracing::info!(bits = config.key_bits, "Generating RSA key pair");

    let private_key = RsaPrivateKey::new(&mut OsRng, config.key_bits)
        .map_err(|e| VConError::key(format!("key generation failed: {}", e)))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| VConError::key(format!("failed to encode private key: {}", e)))?
        .to_string();
    let public_key_pem = public_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| VConError::key(format!("failed to encode public key: {}", e)))?;

    tracing::info!("Generated RSA key pair");
    Ok(KeyPair {
        private_key_pem,
        public_key_pem,
    })
}

/// Accepts `RSA PRIVATE KEY` (PKCS#1) or `PRIVATE KEY` (PKCS#8) PEM.
pub(crate) fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map_err(|e| VConError::signing(format!("invalid private key: {}", e)))
}

/// Accepts `RSA PUBLIC KEY` (PKCS#1) or `PUBLIC KEY` (SPKI) PEM.
pub(crate) fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPublicKey::from_public_key_pem(pem))
        .map_err(|e| VConError::verification(format!("invalid public key: {}", e)))
}
