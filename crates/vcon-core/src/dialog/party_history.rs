use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Extensions;

/// A join/leave/hold style event of a party within one dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyHistory {
    /// Index into the vCon's parties
    pub party: usize,
    /// Free-form event name (e.g. "join", "drop", "hold")
    pub event: String,
    pub time: DateTime<Utc>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PartyHistory {
    pub fn new(party: usize, event: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            party,
            event: event.into(),
            time,
            extensions: Extensions::new(),
        }
    }
}
