//! Content encodings used by attachments, analyses and dialog bodies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::VConError;

/// How an opaque `body` value is encoded on the wire.
///
/// Known names are matched case-insensitively and written back lowercase.
/// Any other name read from a document is kept in `Other` and written back
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    Base64,
    Base64Url,
    Json,
    #[default]
    None,
    Other(String),
}

impl Encoding {
    /// Wire name of the encoding.
    pub fn as_str(&self) -> &str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
            Encoding::Json => "json",
            Encoding::None => "none",
            Encoding::Other(name) => name,
        }
    }

    /// Reads a wire name, keeping unrecognized names in `Encoding::Other`.
    pub fn from_wire(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Encoding::Other(value.to_string()))
    }

    /// Case-insensitive parse that falls back to `Encoding::None` for
    /// anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Encoding::Other(_))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts only the four known names, in any case.
impl FromStr for Encoding {
    type Err = VConError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base64" => Ok(Encoding::Base64),
            "base64url" => Ok(Encoding::Base64Url),
            "json" => Ok(Encoding::Json),
            "none" => Ok(Encoding::None),
            _ => Err(VConError::validation(
                "encoding",
                format!("unknown encoding '{}'", s),
            )),
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Encoding::from_wire(&name))
    }
}
