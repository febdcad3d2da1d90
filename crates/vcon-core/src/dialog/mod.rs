//! Dialog turns and their content.

pub mod mimetype;
mod model;
mod party_history;

pub use model::Dialog;
pub use party_history::PartyHistory;
