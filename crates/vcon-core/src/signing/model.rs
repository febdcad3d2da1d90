use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Extensions;

/// One detached JWS signature over the vCon payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Protected header (`alg`, `typ`, ...)
    pub header: Map<String, Value>,
    /// base64url signature bytes, no padding
    pub signature: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Signature {
    pub fn new(header: Map<String, Value>, signature: impl Into<String>) -> Self {
        Self {
            header,
            signature: signature.into(),
            extensions: Extensions::new(),
        }
    }

    /// The `alg` header value, if present and a string.
    pub fn alg(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }
}
