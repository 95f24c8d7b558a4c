//! Tracker integration
//!
//! Converts the external tracker's per-frame output into typed entities.

mod grouping;
mod palette;

pub use grouping::*;
pub use palette::*;
