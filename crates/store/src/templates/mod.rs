//! Template system
//!
//! This module provides:
//! - The academic report generator
//! - Built-in templates
//! - Custom templates persisted in a key-value store
//! - Document/template conversion

mod academic;
mod builtin;
mod error;
mod manager;
mod model;
mod report;

#[cfg(test)]
mod tests;

pub use academic::*;
pub use builtin::*;
pub use error::*;
pub use manager::*;
pub use model::*;
pub use report::*;
