//! Render-to-markup translators
//!
//! One pure function per block and target format, plus a whole-document
//! wrapper. User text is always escaped for the target syntax, and tables
//! without a grid render as nothing.

mod escape;
mod html;
mod latex;
mod markdown;
mod text;

pub use escape::*;
pub use html::*;
pub use latex::*;
pub use markdown::*;
pub use text::*;
