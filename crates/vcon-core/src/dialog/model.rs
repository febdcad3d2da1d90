//! Dialog domain model.
//!
//! A dialog carries its content either inline (`body`, optionally
//! `encoding`) or by reference (`url`). The content fields are private and
//! only change through [`Dialog::add_external_data`] and
//! [`Dialog::add_inline_data`], which keep the two locations exclusive and
//! check the mimetype against [`mimetype::MIME_TYPES`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::PartyHistory;
use super::mimetype;
use crate::Extensions;
use crate::encoding::Encoding;
use crate::error::{Result, VConError};

/// One turn or segment of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    /// Free-form dialog type (e.g. "recording", "text", "transfer")
    #[serde(rename = "type")]
    pub dialog_type: String,
    pub start: DateTime<Utc>,
    /// Indices into the vCon's parties
    pub parties: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoding: Option<Encoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    /// Content hash algorithm for external data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Content hash for external data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_history: Option<Vec<PartyHistory>>,

    // Transfer dialogs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferee: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferor: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_target: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dialog: Option<usize>,

    // Contact center context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,

    /// Length of the dialog in seconds. Must be finite to serialize.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_duration"
    )]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Dialog {
    /// Creates a dialog with no content attached.
    ///
    /// Fails when `dialog_type` is blank or `parties` is empty.
    pub fn new(
        dialog_type: impl Into<String>,
        start: DateTime<Utc>,
        parties: Vec<usize>,
    ) -> Result<Self> {
        let dialog_type = dialog_type.into();
        if dialog_type.trim().is_empty() {
            return Err(VConError::missing("type"));
        }
        if parties.is_empty() {
            return Err(VConError::validation(
                "parties",
                "a dialog needs at least one party",
            ));
        }

        Ok(Self {
            dialog_type,
            start,
            parties,
            originator: None,
            mimetype: None,
            filename: None,
            body: None,
            encoding: None,
            url: None,
            alg: None,
            signature: None,
            disposition: None,
            party_history: None,
            transferee: None,
            transferor: None,
            transfer_target: None,
            original: None,
            consultation: None,
            target_dialog: None,
            campaign: None,
            interaction: None,
            skill: None,
            duration: None,
            meta: None,
            extensions: Extensions::new(),
        })
    }

    /// Builds a dialog from a loosely-typed JSON object.
    ///
    /// `type`, `start` and `parties` are required. A supplied `mimetype` must
    /// be in the whitelist, and `url` may not be combined with `body`.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        for required in ["type", "start", "parties"] {
            if fields.get(required).is_none_or(Value::is_null) {
                return Err(VConError::missing(required));
            }
        }

        let dialog: Dialog = serde_json::from_value(Value::Object(fields))
            .map_err(|e| VConError::validation("dialog", e.to_string()))?;

        if dialog.dialog_type.trim().is_empty() {
            return Err(VConError::missing("type"));
        }
        if dialog.parties.is_empty() {
            return Err(VConError::validation(
                "parties",
                "a dialog needs at least one party",
            ));
        }
        if let Some(mimetype) = dialog.mimetype.as_deref() {
            ensure_supported(mimetype)?;
        }
        if dialog.url.is_some() && (dialog.body.is_some() || dialog.encoding.is_some()) {
            return Err(VConError::validation(
                "url",
                "external and inline content are mutually exclusive",
            ));
        }

        Ok(dialog)
    }

    // ============================================================================
    // Content
    // ============================================================================

    /// Points the dialog at content stored elsewhere, dropping any inline body.
    pub fn add_external_data(
        &mut self,
        url: impl Into<String>,
        filename: impl Into<String>,
        mimetype: impl Into<String>,
    ) -> Result<()> {
        let mimetype = mimetype.into();
        ensure_supported(&mimetype)?;

        self.url = Some(url.into());
        self.filename = Some(filename.into());
        self.mimetype = Some(mimetype);
        self.body = None;
        self.encoding = None;
        Ok(())
    }

    /// Embeds content in the dialog, dropping any external reference.
    ///
    /// A previously set `encoding` is left as is.
    pub fn add_inline_data(
        &mut self,
        body: impl Into<String>,
        filename: impl Into<String>,
        mimetype: impl Into<String>,
    ) -> Result<()> {
        let mimetype = mimetype.into();
        ensure_supported(&mimetype)?;

        self.body = Some(body.into());
        self.filename = Some(filename.into());
        self.mimetype = Some(mimetype);
        self.url = None;
        Ok(())
    }

    /// Like [`Dialog::add_inline_data`] but also records the body encoding.
    pub fn add_inline_data_encoded(
        &mut self,
        body: impl Into<String>,
        filename: impl Into<String>,
        mimetype: impl Into<String>,
        encoding: Encoding,
    ) -> Result<()> {
        self.add_inline_data(body, filename, mimetype)?;
        self.encoding = Some(encoding);
        Ok(())
    }

    pub fn is_external_data(&self) -> bool {
        self.url.is_some()
    }

    pub fn is_inline_data(&self) -> bool {
        self.body.is_some()
    }

    pub fn is_text(&self) -> bool {
        self.mimetype.as_deref().is_some_and(mimetype::is_text)
    }

    pub fn is_audio(&self) -> bool {
        self.mimetype.as_deref().is_some_and(mimetype::is_audio)
    }

    pub fn is_video(&self) -> bool {
        self.mimetype.as_deref().is_some_and(mimetype::is_video)
    }

    pub fn is_email(&self) -> bool {
        self.mimetype.as_deref().is_some_and(mimetype::is_email)
    }

    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn encoding(&self) -> Option<&Encoding> {
        self.encoding.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Party indices this dialog refers to, in field order.
    pub(crate) fn party_refs(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        let history = self
            .party_history
            .iter()
            .flatten()
            .map(|h| ("party_history", h.party));

        self.parties
            .iter()
            .map(|&p| ("parties", p))
            .chain(self.originator.map(|p| ("originator", p)))
            .chain(self.transferee.map(|p| ("transferee", p)))
            .chain(self.transferor.map(|p| ("transferor", p)))
            .chain(self.transfer_target.map(|p| ("transfer_target", p)))
            .chain(history)
    }

    /// Dialog indices this dialog refers to.
    pub(crate) fn dialog_refs(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.original
            .map(|d| ("original", d))
            .into_iter()
            .chain(self.consultation.map(|d| ("consultation", d)))
            .chain(self.target_dialog.map(|d| ("target_dialog", d)))
    }
}

/// JSON has no NaN or infinity; serde_json would write them as `null`.
fn serialize_duration<S: Serializer>(
    duration: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match duration {
        Some(seconds) if !seconds.is_finite() => Err(serde::ser::Error::custom(format!(
            "duration must be a finite number of seconds, got {}",
            seconds
        ))),
        _ => duration.serialize(serializer),
    }
}

fn ensure_supported(mimetype: &str) -> Result<()> {
    if mimetype::is_supported(mimetype) {
        Ok(())
    } else {
        Err(VConError::InvalidMimeType(mimetype.to_string()))
    }
}
