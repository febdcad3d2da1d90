use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of the `redacted` / `appended` members.
///
/// Either a bare flag or an object describing the vCon this one was
/// derived from (typically `uuid`, `type`, `url`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DerivationMarker {
    Flag(bool),
    Details(Map<String, Value>),
}

impl DerivationMarker {
    /// `true` for `Flag(true)` or a non-empty object.
    pub fn is_set(&self) -> bool {
        match self {
            DerivationMarker::Flag(flag) => *flag,
            DerivationMarker::Details(details) => !details.is_empty(),
        }
    }
}
