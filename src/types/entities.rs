//! Per-frame tracked entities
//!
//! Entities are value snapshots rebuilt from tracker output every frame.
//! Nothing here holds a reference across frames; "the same hand" in two
//! frames means two snapshots with equal [`TrackId`]s.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use nalgebra::Point2;

use super::geometry::BoundingBox;
use super::labels::{DetectionLabel, ProductKind, TrackId};
use crate::{HandcartError, Result};

/// Display color of a person, `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub [u8; 3]);

// ============================================================================
// Tracked Entity
// ============================================================================

/// Fields shared by every tracked entity.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    /// Identifier assigned by the tracker
    pub track_id: TrackId,
    /// Smoothed box from the tracker's estimate
    pub bbox: BoundingBox<f64>,
    /// Box of the last raw detection matched to this track
    pub last_detection: BoundingBox<f64>,
    /// Integer midpoint of `bbox`
    pub center: Point2<i64>,
    /// Class label of the last detection
    pub label: DetectionLabel,
}

impl TrackedEntity {
    /// Creates an entity and derives its center.
    ///
    /// Fails if the tracking box has a coordinate that cannot produce an
    /// integer center.
    pub fn new(
        track_id: TrackId,
        bbox: BoundingBox<f64>,
        last_detection: BoundingBox<f64>,
        label: DetectionLabel,
    ) -> Result<Self> {
        let center = bbox
            .center()
            .ok_or(HandcartError::InvalidBoundingBox { track: track_id })?;
        Ok(Self {
            track_id,
            bbox,
            last_detection,
            center,
            label,
        })
    }
}

/// Access to the shared entity fields.
pub trait Tracked {
    /// Returns the shared entity record.
    fn entity(&self) -> &TrackedEntity;

    #[inline]
    fn track_id(&self) -> TrackId {
        self.entity().track_id
    }

    #[inline]
    fn bbox(&self) -> &BoundingBox<f64> {
        &self.entity().bbox
    }

    #[inline]
    fn center(&self) -> Point2<i64> {
        self.entity().center
    }
}

// ============================================================================
// Hand
// ============================================================================

/// A tracked hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub entity: TrackedEntity,
    /// Persons whose inflated box contains this hand, filled during the
    /// current frame's containment pass
    pub potential_persons: Vec<TrackId>,
}

impl Hand {
    /// Creates a hand with no potential persons.
    pub fn new(
        track_id: TrackId,
        bbox: BoundingBox<f64>,
        last_detection: BoundingBox<f64>,
    ) -> Result<Self> {
        Ok(Self {
            entity: TrackedEntity::new(track_id, bbox, last_detection, DetectionLabel::Hand)?,
            potential_persons: Vec::new(),
        })
    }

    /// Records a person as a candidate owner of this hand.
    #[inline]
    pub fn add_potential_person(&mut self, person: TrackId) {
        self.potential_persons.push(person);
    }

    /// Clears candidates left over from an earlier pass.
    #[inline]
    pub fn clear_potential_persons(&mut self) {
        self.potential_persons.clear();
    }

    /// Number of candidate persons.
    #[inline]
    pub fn n_potential_assignments(&self) -> usize {
        self.potential_persons.len()
    }

    /// A hand contained by more than one person.
    #[inline]
    pub fn is_intercepted(&self) -> bool {
        self.potential_persons.len() > 1
    }
}

impl Tracked for Hand {
    fn entity(&self) -> &TrackedEntity {
        &self.entity
    }
}

// ============================================================================
// Person
// ============================================================================

/// A tracked person.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub entity: TrackedEntity,
    /// First hand assigned to this person in the current frame
    pub first_hand: Option<TrackId>,
    /// Second hand assigned to this person in the current frame
    pub second_hand: Option<TrackId>,
    /// Cosmetic color; not used by matching
    pub color: Rgb,
}

impl Person {
    /// Creates a person with empty hand slots.
    pub fn new(
        track_id: TrackId,
        bbox: BoundingBox<f64>,
        last_detection: BoundingBox<f64>,
        color: Rgb,
    ) -> Result<Self> {
        Ok(Self {
            entity: TrackedEntity::new(track_id, bbox, last_detection, DetectionLabel::Person)?,
            first_hand: None,
            second_hand: None,
            color,
        })
    }

    /// Fills the next free hand slot. Returns false if both are taken.
    pub fn attach_hand(&mut self, hand: TrackId) -> bool {
        if self.first_hand.is_none() {
            self.first_hand = Some(hand);
            true
        } else if self.second_hand.is_none() {
            self.second_hand = Some(hand);
            true
        } else {
            false
        }
    }
}

impl Tracked for Person {
    fn entity(&self) -> &TrackedEntity {
        &self.entity
    }
}

// ============================================================================
// Product
// ============================================================================

/// A tracked product on the shelf or table.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub entity: TrackedEntity,
    pub kind: ProductKind,
    /// `"{name}#{track_id}"`, unique while the track lives
    pub code: String,
}

impl Product {
    /// Creates a product and derives its code.
    pub fn new(
        track_id: TrackId,
        bbox: BoundingBox<f64>,
        last_detection: BoundingBox<f64>,
        kind: ProductKind,
    ) -> Result<Self> {
        Ok(Self {
            entity: TrackedEntity::new(track_id, bbox, last_detection, kind.label())?,
            kind,
            code: format!("{}#{}", kind.name(), track_id.get()),
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Tracked for Product {
    fn entity(&self) -> &TrackedEntity {
        &self.entity
    }
}
