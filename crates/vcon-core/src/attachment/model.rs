use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Extensions;
use crate::encoding::Encoding;

/// An arbitrary document attached to the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME type of the attached content
    #[serde(rename = "type")]
    pub attachment_type: String,
    /// Opaque content, interpreted according to `encoding`
    pub body: Value,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Attachment {
    pub fn new(
        attachment_type: impl Into<String>,
        body: impl Into<Value>,
        encoding: Encoding,
    ) -> Self {
        Self {
            attachment_type: attachment_type.into(),
            body: body.into(),
            encoding,
            extensions: Extensions::new(),
        }
    }
}
