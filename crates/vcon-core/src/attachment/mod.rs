//! Files and documents attached to a vCon.

mod model;

pub use model::Attachment;
