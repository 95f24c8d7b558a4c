//! Hand-person assignment
//!
//! Containment tests, contested-hand scoring and the optimal matching that
//! resolves which hands belong to which persons.

pub mod engine;
pub mod hungarian;
pub mod pairs;
pub mod scoring;

pub use engine::*;
pub use hungarian::*;
pub use pairs::*;
pub use scoring::*;
