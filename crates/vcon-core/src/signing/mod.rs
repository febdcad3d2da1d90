//! JWS-style RS256 signatures over the canonical vCon payload.
//!
//! The protocol itself (payload construction, appending signatures) lives on
//! [`crate::VCon`]; this module holds the wire type, the compact JWS
//! primitives and RSA key handling.

pub mod jws;
mod keys;
mod model;

pub use keys::{KeyPair, generate_key_pair, generate_key_pair_with};
pub use model::Signature;
