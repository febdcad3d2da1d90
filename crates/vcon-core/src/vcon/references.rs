//! Positional cross-reference checks.
//!
//! Dialogs and analyses refer to parties and dialogs by index. Nothing in the
//! mutation API rejects an out-of-range index, so consumers that need the
//! guarantee call [`VCon::check_references`] themselves.

use std::fmt;

use super::VCon;

/// One index that points past the end of its target collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIssue {
    /// "dialog" or "analysis"
    pub entity: &'static str,
    /// Position of the referring entity
    pub position: usize,
    pub field: &'static str,
    pub index: usize,
    /// Length of the referenced collection
    pub bound: usize,
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}].{} = {} is out of range (len {})",
            self.entity, self.position, self.field, self.index, self.bound
        )
    }
}

impl VCon {
    /// Lists every out-of-range party/dialog index, in document order.
    pub fn check_references(&self) -> Vec<ReferenceIssue> {
        let party_count = self.parties.len();
        let dialog_count = self.dialogs.len();
        let mut issues = Vec::new();

        for (position, dialog) in self.dialogs.iter().enumerate() {
            for (field, index) in dialog.party_refs() {
                if index >= party_count {
                    issues.push(ReferenceIssue {
                        entity: "dialog",
                        position,
                        field,
                        index,
                        bound: party_count,
                    });
                }
            }
            for (field, index) in dialog.dialog_refs() {
                if index >= dialog_count {
                    issues.push(ReferenceIssue {
                        entity: "dialog",
                        position,
                        field,
                        index,
                        bound: dialog_count,
                    });
                }
            }
        }

        for (position, analysis) in self.analysis.iter().enumerate() {
            for index in analysis.dialog.indices() {
                if index >= dialog_count {
                    issues.push(ReferenceIssue {
                        entity: "analysis",
                        position,
                        field: "dialog",
                        index,
                        bound: dialog_count,
                    });
                }
            }
        }

        issues
    }
}
