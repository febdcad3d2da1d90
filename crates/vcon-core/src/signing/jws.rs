//! Compact JWS primitives: base64url, signing input, RS256.

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use rsa::pkcs1v15::{Signature as RsaSignature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use serde_json::{Map, Value};
use sha2::Sha256;

use super::keys::{parse_private_key, parse_public_key};
use crate::error::{Result, VConError};

pub const ALG_RS256: &str = "RS256";
pub const TYP_JWS: &str = "JWS";

/// base64url decoder that accepts input with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// `{"alg": "RS256", "typ": "JWS"}`
pub fn rs256_header() -> Map<String, Value> {
    let mut header = Map::new();
    header.insert("alg".to_string(), Value::String(ALG_RS256.to_string()));
    header.insert("typ".to_string(), Value::String(TYP_JWS.to_string()));
    header
}

pub fn base64url_encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn base64url_decode(encoded: &str) -> Result<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(encoded)
        .map_err(|e| VConError::verification(format!("invalid base64url: {}", e)))
}

/// `base64url(header) "." base64url(payload)`
pub fn signing_input(header: &Map<String, Value>, payload: &str) -> Result<String> {
    let header_json = serde_json::to_string(header)?;
    Ok(format!(
        "{}.{}",
        base64url_encode(header_json),
        base64url_encode(payload)
    ))
}

/// RSASSA-PKCS1-v1_5 with SHA-256 over `signing_input`, base64url encoded.
pub fn sign_rs256(signing_input: &str, private_key_pem: &str) -> Result<String> {
    let private_key = parse_private_key(private_key_pem)?;
    let signing_key = SigningKey::<Sha256>::new(private_key);
    let signature = signing_key
        .try_sign(signing_input.as_bytes())
        .map_err(|e| VConError::signing(e.to_string()))?;
    Ok(base64url_encode(signature.to_bytes()))
}

/// Checks an RS256 signature produced by [`sign_rs256`].
pub fn verify_rs256(signing_input: &str, signature: &str, public_key_pem: &str) -> Result<()> {
    let public_key = parse_public_key(public_key_pem)?;
    let bytes = base64url_decode(signature)?;
    let signature = RsaSignature::try_from(bytes.as_slice())
        .map_err(|e| VConError::verification(format!("malformed signature: {}", e)))?;

    VerifyingKey::<Sha256>::new(public_key)
        .verify(signing_input.as_bytes(), &signature)
        .map_err(|_| VConError::verification("signature does not match"))
}
