//! Customer lifecycle management
//!
//! Turns per-frame hand-person assignments into customer identities that
//! survive frames in which their person goes unassigned.

mod customer;
mod registry;

pub use customer::*;
pub use registry::*;
