//! Core data model for vCon (virtual conversation) records.
//!
//! A [`VCon`] holds the parties, dialog turns, attachments and analysis of
//! one recorded interaction. It serializes to a canonical JSON document that
//! keeps unknown members intact, and it can carry RS256 JWS signatures over
//! that document.
//!
//! ```no_run
//! use vcon_core::{Dialog, Party, VCon, generate_key_pair};
//!
//! # fn main() -> vcon_core::Result<()> {
//! let mut vcon = VCon::build_new();
//! let caller = vcon.add_party(Party::new().with_tel("+15551234567"));
//! let agent = vcon.add_party(Party::new().with_name("Support"));
//!
//! let mut dialog = Dialog::new("text", chrono::Utc::now(), vec![caller, agent])?;
//! dialog.add_inline_data("Hello!", "chat.txt", "text/plain")?;
//! vcon.add_dialog(dialog);
//!
//! let keys = generate_key_pair()?;
//! vcon.sign(&keys.private_key_pem)?;
//! assert!(vcon.verify(&keys.public_key_pem));
//!
//! let restored = VCon::build_from_json(&vcon.to_json()?)?;
//! assert!(restored.verify(&keys.public_key_pem));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod attachment;
pub mod config;
pub mod dialog;
pub mod encoding;
pub mod error;
pub mod party;
pub mod signing;
pub mod vcon;

/// Unrecognized members of an entity, kept verbatim for round-tripping.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

pub use analysis::{Analysis, DialogRef};
pub use attachment::Attachment;
pub use config::{SigningConfig, VConConfig};
pub use dialog::{Dialog, PartyHistory};
pub use encoding::Encoding;
pub use error::{Result, VConError};
pub use party::{CivicAddress, Party};
pub use signing::{KeyPair, Signature, generate_key_pair, generate_key_pair_with};
pub use vcon::{DerivationMarker, ReferenceIssue, VCon};
