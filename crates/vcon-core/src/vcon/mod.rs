//! The vCon aggregate and its signing protocol.

mod marker;
mod model;
mod references;
mod sign;

pub use marker::DerivationMarker;
pub use model::VCon;
pub use references::ReferenceIssue;
