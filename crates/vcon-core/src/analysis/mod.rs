//! Derived analysis (transcripts, sentiment, summaries) over dialogs.

mod model;

pub use model::{Analysis, DialogRef};
