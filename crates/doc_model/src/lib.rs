//! Document Model - Block-based document schema
//!
//! A document is an ordered list of content blocks (headings, paragraphs,
//! lists, tables, quotes, images, dividers, page breaks) plus page settings.
//! Block order is the single source of truth for layout and export.

mod block;
mod document;
mod error;
mod ids;
mod patch;
mod style;
mod table;

pub use block::*;
pub use document::*;
pub use error::*;
pub use ids::*;
pub use patch::*;
pub use style::*;
pub use table::*;
