//! The vCon aggregate.
//!
//! `VCon` owns every party, dialog, attachment, analysis and signature. All
//! state is private: reads go through accessors and every mutation goes
//! through a method that bumps `updated_at`, so the timestamp can never fall
//! behind `created_at` or move backwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::DerivationMarker;
use crate::Extensions;
use crate::analysis::Analysis;
use crate::attachment::Attachment;
use crate::config::{DEFAULT_SPEC_VERSION, VConConfig};
use crate::dialog::Dialog;
use crate::encoding::Encoding;
use crate::error::{Result, VConError};
use crate::party::Party;
use crate::signing::Signature;

/// A virtual conversation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VCon {
    #[serde(default = "new_uuid")]
    pub(crate) uuid: String,
    #[serde(default = "default_spec_version")]
    pub(crate) vcon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) redacted: Option<DerivationMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) appended: Option<DerivationMarker>,
    /// References to related vCons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) meta: Option<Map<String, Value>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) parties: Vec<Party>,
    #[serde(rename = "dialog", default, deserialize_with = "null_as_default")]
    pub(crate) dialogs: Vec<Dialog>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) analysis: Vec<Analysis>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) tags: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub(crate) signatures: Vec<Signature>,

    #[serde(flatten)]
    pub(crate) extensions: Extensions,
}

fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

fn default_spec_version() -> String {
    DEFAULT_SPEC_VERSION.to_string()
}

/// Treats an explicit `null` collection like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl VCon {
    // ============================================================================
    // Construction
    // ============================================================================

    /// Creates an empty vCon with a fresh UUID and `created_at == updated_at == now`.
    pub fn build_new() -> Self {
        Self::build_new_with(&VConConfig::default())
    }

    /// Like [`VCon::build_new`], taking the spec version from `config`.
    pub fn build_new_with(config: &VConConfig) -> Self {
        let now = Utc::now();
        Self {
            uuid: new_uuid(),
            vcon: config.spec_version.clone(),
            subject: None,
            created_at: Some(now),
            updated_at: Some(now),
            redacted: None,
            appended: None,
            group: None,
            meta: None,
            parties: Vec::new(),
            dialogs: Vec::new(),
            attachments: Vec::new(),
            analysis: Vec::new(),
            tags: BTreeMap::new(),
            signatures: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Parses a vCon JSON document.
    ///
    /// Identity and timestamps are taken from the document as is. Missing
    /// collections become empty; unknown members are kept and re-emitted.
    pub fn build_from_json(json: &str) -> Result<Self> {
        let vcon: VCon = serde_json::from_str(json)?;
        tracing::debug!(
            uuid = %vcon.uuid,
            parties = vcon.parties.len(),
            dialogs = vcon.dialogs.len(),
            "Parsed vCon"
        );
        Ok(vcon)
    }

    // ============================================================================
    // Serialization
    // ============================================================================

    /// Compact JSON document. Absent optional fields are omitted.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON document, same content as [`VCon::to_json`].
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The `vcon` member (specification version).
    pub fn spec_version(&self) -> &str {
        &self.vcon
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn redacted(&self) -> Option<&DerivationMarker> {
        self.redacted.as_ref()
    }

    pub fn appended(&self) -> Option<&DerivationMarker> {
        self.appended.as_ref()
    }

    pub fn is_redacted(&self) -> bool {
        self.redacted.as_ref().is_some_and(DerivationMarker::is_set)
    }

    pub fn is_appended(&self) -> bool {
        self.appended.as_ref().is_some_and(DerivationMarker::is_set)
    }

    pub fn group(&self) -> Option<&[Value]> {
        self.group.as_deref()
    }

    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn analysis(&self) -> &[Analysis] {
        &self.analysis
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Top-level members this version does not model.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    // ============================================================================
    // Mutation
    // ============================================================================

    /// Appends a party and returns its index.
    pub fn add_party(&mut self, party: Party) -> usize {
        self.parties.push(party);
        self.touch();
        self.parties.len() - 1
    }

    /// Appends a dialog and returns its index.
    ///
    /// Party indices are not checked here; see [`VCon::check_references`].
    pub fn add_dialog(&mut self, dialog: Dialog) -> usize {
        self.dialogs.push(dialog);
        self.touch();
        self.dialogs.len() - 1
    }

    /// Applies `update` to the dialog at `index`.
    ///
    /// `updated_at` is bumped only when `update` succeeds.
    pub fn update_dialog<F>(&mut self, index: usize, update: F) -> Result<()>
    where
        F: FnOnce(&mut Dialog) -> Result<()>,
    {
        let count = self.dialogs.len();
        let dialog = self.dialogs.get_mut(index).ok_or_else(|| {
            VConError::validation(
                "dialog",
                format!("index {} out of range ({} dialogs)", index, count),
            )
        })?;
        update(dialog)?;
        self.touch();
        Ok(())
    }

    /// Appends an attachment built from the given parts and returns it.
    pub fn add_attachment(
        &mut self,
        attachment_type: impl Into<String>,
        body: impl Into<Value>,
        encoding: Encoding,
    ) -> &Attachment {
        self.attachments
            .push(Attachment::new(attachment_type, body, encoding));
        self.touch();
        &self.attachments[self.attachments.len() - 1]
    }

    /// Validates `fields` as an analysis entry and appends it.
    ///
    /// Fails with a validation error when `type`, `dialog`, `vendor` or
    /// `body` is missing; nothing is appended in that case.
    pub fn add_analysis(&mut self, fields: Map<String, Value>) -> Result<&Analysis> {
        let analysis = Analysis::from_fields(fields)?;
        Ok(self.push_analysis(analysis))
    }

    /// Appends an already constructed analysis.
    pub fn push_analysis(&mut self, analysis: Analysis) -> &Analysis {
        self.analysis.push(analysis);
        self.touch();
        &self.analysis[self.analysis.len() - 1]
    }

    /// Sets a tag, replacing any previous value under the same name.
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(name.into(), value.into());
        self.touch();
    }

    pub fn set_subject(&mut self, subject: Option<String>) {
        self.subject = subject;
        self.touch();
    }

    pub fn set_group(&mut self, group: Option<Vec<Value>>) {
        self.group = group;
        self.touch();
    }

    pub fn set_meta(&mut self, meta: Option<Map<String, Value>>) {
        self.meta = meta;
        self.touch();
    }

    pub fn set_redacted(&mut self, marker: Option<DerivationMarker>) {
        self.redacted = marker;
        self.touch();
    }

    pub fn set_appended(&mut self, marker: Option<DerivationMarker>) {
        self.appended = marker;
        self.touch();
    }

    // ============================================================================
    // Lookup
    // ============================================================================

    pub fn get_tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    /// First attachment with the given type, in insertion order.
    pub fn find_attachment_by_type(&self, attachment_type: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.attachment_type == attachment_type)
    }

    /// First analysis with the given type, in insertion order.
    pub fn find_analysis_by_type(&self, analysis_type: &str) -> Option<&Analysis> {
        self.analysis
            .iter()
            .find(|a| a.analysis_type == analysis_type)
    }

    /// Moves `updated_at` to now, never behind its previous value or `created_at`.
    fn touch(&mut self) {
        let now = [self.updated_at, self.created_at]
            .into_iter()
            .flatten()
            .fold(Utc::now(), |latest, t| latest.max(t));
        self.updated_at = Some(now);
    }
}
