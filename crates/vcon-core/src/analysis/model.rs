//! Analysis domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Extensions;
use crate::encoding::Encoding;
use crate::error::{Result, VConError};

/// The dialog(s) an analysis was derived from.
///
/// Serializes as a bare integer or an integer array, matching whichever
/// form was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialogRef {
    Single(usize),
    Many(Vec<usize>),
}

impl DialogRef {
    /// All referenced dialog indices in order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            DialogRef::Single(index) => vec![*index],
            DialogRef::Many(indices) => indices.clone(),
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(|i| DialogRef::Single(i as usize))
                .ok_or_else(|| {
                    VConError::validation("dialog", "index must be a non-negative integer")
                }),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64().map(|i| i as usize).ok_or_else(|| {
                        VConError::validation("dialog", "indices must be non-negative integers")
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(DialogRef::Many),
            _ => Err(VConError::validation(
                "dialog",
                "expected an index or an array of indices",
            )),
        }
    }
}

impl From<usize> for DialogRef {
    fn from(index: usize) -> Self {
        DialogRef::Single(index)
    }
}

impl From<Vec<usize>> for DialogRef {
    fn from(indices: Vec<usize>) -> Self {
        DialogRef::Many(indices)
    }
}

/// A piece of analysis produced by some vendor over one or more dialogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "type")]
    pub analysis_type: String,
    pub dialog: DialogRef,
    pub vendor: String,
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Vendor-specific parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Analysis {
    pub fn new(
        analysis_type: impl Into<String>,
        dialog: impl Into<DialogRef>,
        vendor: impl Into<String>,
        body: impl Into<Value>,
    ) -> Self {
        Self {
            analysis_type: analysis_type.into(),
            dialog: dialog.into(),
            vendor: vendor.into(),
            body: body.into(),
            encoding: None,
            extra: None,
            extensions: Extensions::new(),
        }
    }

    /// Builds an analysis from a loosely-typed JSON object.
    ///
    /// `type`, `dialog`, `vendor` and `body` are required. `encoding` is
    /// matched case-insensitively, unknown names become `none`. Keys outside
    /// the model are kept in `extensions`.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self> {
        let analysis_type = take_string(&mut fields, "type")?;
        let dialog = match fields.remove("dialog") {
            Some(value) if !value.is_null() => DialogRef::from_value(&value)?,
            _ => return Err(VConError::missing("dialog")),
        };
        let vendor = take_string(&mut fields, "vendor")?;
        let body = match fields.remove("body") {
            Some(value) if !value.is_null() => value,
            _ => return Err(VConError::missing("body")),
        };

        let encoding = match fields.remove("encoding") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(Encoding::parse_lenient(&name)),
            Some(_) => {
                return Err(VConError::validation("encoding", "expected a string"));
            }
        };
        let extra = match fields.remove("extra") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(VConError::validation("extra", "expected an object"));
            }
        };

        Ok(Self {
            analysis_type,
            dialog,
            vendor,
            body,
            encoding,
            extra,
            extensions: fields,
        })
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Result<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Err(VConError::missing(key)),
        Some(_) => Err(VConError::validation(key, "expected a string")),
    }
}
