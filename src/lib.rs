//! handcart: hand-to-person assignment and customer tracking
//!
//! Resolves, frame by frame, which tracked hands belong to which tracked
//! persons, and keeps durable customer identities built from those pairs.
//!
//! # Features
//!
//! - **Assignment**: inflated-box containment, interception handling and a
//!   maximum-weight Hungarian matching scored on frame-to-frame continuity
//! - **Customers**: active and on-hold registries keyed by person track id
//! - **Store**: product inventory diffs and hand-to-product proximity
//! - **no_std Support**: Works with `alloc` only when the `std` feature is off
//!
//! Logging goes through the [`log`] facade; the embedding application picks
//! the sink.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod assignment;
pub mod customers;
pub mod frame;
pub mod pipeline;
pub mod store;
pub mod types;

pub mod prelude {
    pub use crate::assignment::{Assignment, AssignmentConfig, HandPersonAssigner, ScoreWeights};
    pub use crate::customers::{Customer, CustomerConfig, CustomerRegistry, LifecycleReport};
    pub use crate::frame::{FrameEntities, PersonPalette, TrackedObject};
    pub use crate::pipeline::{FramePipeline, FrameReport, PipelineConfig};
    pub use crate::store::{IdentityProjection, ProductInventory, ProximityConfig, TopViewProjection};
    pub use crate::types::entities::*;
    pub use crate::types::geometry::*;
    pub use crate::types::labels::*;
    pub use crate::{HandcartError, Result};
}

use crate::types::labels::TrackId;

/// Error types for the library
#[derive(Debug, Clone, PartialEq)]
pub enum HandcartError {
    /// A hand was offered as a customer's second hand while already being
    /// its first hand
    DuplicateHand { person: TrackId, hand: TrackId },
    /// A score matrix does not match the entities it was built for
    ShapeMismatch { expected: usize, actual: usize },
    /// Assignment algorithm failed to find a solution
    AssignmentFailed,
    /// A tracked box cannot produce an integer center
    InvalidBoundingBox { track: TrackId },
}

#[cfg(feature = "std")]
impl std::error::Error for HandcartError {}

impl ::core::fmt::Display for HandcartError {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            HandcartError::DuplicateHand { person, hand } => {
                write!(f, "Customer {} already holds hand {}", person, hand)
            }
            HandcartError::ShapeMismatch { expected, actual } => {
                write!(f, "Score matrix has {} cells, expected {}", actual, expected)
            }
            HandcartError::AssignmentFailed => write!(f, "Assignment algorithm failed"),
            HandcartError::InvalidBoundingBox { track } => {
                write!(f, "Track {} has a non-finite bounding box", track)
            }
        }
    }
}

pub type Result<T> = ::core::result::Result<T, HandcartError>;
