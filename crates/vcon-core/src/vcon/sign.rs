//! Signing and verification of the whole record.
//!
//! The signed payload is the record minus its `signatures` member, rendered
//! as compact JSON with object keys sorted. Verification rebuilds that
//! payload from the current state, so any change after signing makes it
//! fail.

use serde_json::Value;

use super::VCon;
use crate::error::{Result, VConError};
use crate::signing::Signature;
use crate::signing::jws::{self, ALG_RS256};

impl VCon {
    /// Canonical signing payload.
    pub fn canonical_payload(&self) -> Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(members) = &mut value {
            members.remove("signatures");
        }
        Ok(serde_json::to_string(&value)?)
    }

    /// Appends an RS256 JWS signature made with `private_key_pem`.
    ///
    /// Timestamps are left untouched so the signature covers the record as
    /// it stands.
    pub fn sign(&mut self, private_key_pem: &str) -> Result<()> {
        tracing::info!(uuid = %self.uuid, "Signing vCon with JWS");

        let payload = self
            .canonical_payload()
            .map_err(|e| VConError::signing(format!("failed to build payload: {}", e)))?;
        let header = jws::rs256_header();
        let input = jws::signing_input(&header, &payload)
            .map_err(|e| VConError::signing(e.to_string()))?;
        let signature = jws::sign_rs256(&input, private_key_pem)?;

        self.signatures.push(Signature::new(header, signature));
        tracing::info!(
            uuid = %self.uuid,
            signatures = self.signatures.len(),
            "Successfully signed vCon with JWS"
        );
        Ok(())
    }

    /// Checks the first signature against `public_key_pem`.
    ///
    /// Returns `false` when there is no signature, the algorithm is not
    /// RS256, the key or signature cannot be decoded, or the signature does
    /// not match the current content.
    pub fn verify(&self, public_key_pem: &str) -> bool {
        match self.verify_strict(public_key_pem) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(uuid = %self.uuid, "vCon verification failed: {}", e);
                false
            }
        }
    }

    /// Same check as [`VCon::verify`], reporting why it failed.
    pub fn verify_strict(&self, public_key_pem: &str) -> Result<()> {
        let signature = self
            .signatures
            .first()
            .ok_or_else(|| VConError::verification("no signatures found"))?;

        match signature.alg() {
            Some(ALG_RS256) => {}
            other => {
                return Err(VConError::verification(format!(
                    "unsupported signature algorithm: {}",
                    other.unwrap_or("<missing>")
                )));
            }
        }

        let payload = self.canonical_payload()?;
        let input = jws::signing_input(&signature.header, &payload)?;
        jws::verify_rs256(&input, &signature.signature, public_key_pem)
    }
}
