//! Layout Engine - Pagination and page geometry
//!
//! Pages are formed by greedily packing whole blocks under a height budget.
//! This is a heuristic model; no text is shaped or broken into lines here.

mod estimate;
mod geometry;
mod paginator;

pub use estimate::*;
pub use geometry::*;
pub use paginator::*;
