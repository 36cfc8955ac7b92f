//! Edit Engine - Document state, selection, and undo/redo
//!
//! [`DocumentState`] owns the document being edited. Every mutation produces a
//! new snapshot that is appended to a bounded linear [`History`].

mod error;
mod history;
mod state;

pub use error::*;
pub use history::*;
pub use state::*;
