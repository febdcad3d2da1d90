//! Conversation participants.

mod civic_address;
mod model;

pub use civic_address::CivicAddress;
pub use model::Party;
