//! Grouping of raw tracker output into typed entities

use alloc::vec::Vec;

use crate::types::entities::{Hand, Person, Product};
use crate::types::geometry::BoundingBox;
use crate::types::labels::{DetectionLabel, TrackId};
use crate::Result;

use super::palette::PersonPalette;

/// One object as reported by the external tracker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedObject {
    pub track_id: TrackId,
    /// Raw class number of the last matched detection
    pub label: i64,
    /// The tracker's smoothed estimate
    pub estimate: BoundingBox<f64>,
    /// Box of the last raw detection
    pub last_detection: BoundingBox<f64>,
}

impl TrackedObject {
    pub fn new(
        track_id: TrackId,
        label: i64,
        estimate: BoundingBox<f64>,
        last_detection: BoundingBox<f64>,
    ) -> Self {
        Self {
            track_id,
            label,
            estimate,
            last_detection,
        }
    }
}

/// One frame's entities, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEntities {
    pub persons: Vec<Person>,
    pub hands: Vec<Hand>,
    pub products: Vec<Product>,
}

impl FrameEntities {
    /// Builds typed entities from tracker output.
    ///
    /// Objects with a class number outside the known labels are skipped.
    /// Persons take their color from `palette`.
    pub fn from_tracked(objects: &[TrackedObject], palette: &mut PersonPalette) -> Result<Self> {
        let mut frame = Self::default();

        for object in objects {
            let TrackedObject {
                track_id,
                label,
                estimate,
                last_detection,
            } = *object;

            match DetectionLabel::from_class(label) {
                Some(DetectionLabel::Person) => {
                    let color = palette.color_for(track_id);
                    frame
                        .persons
                        .push(Person::new(track_id, estimate, last_detection, color)?);
                }
                Some(DetectionLabel::Hand) => {
                    frame.hands.push(Hand::new(track_id, estimate, last_detection)?);
                }
                Some(other) => match other.product_kind() {
                    Some(kind) => frame
                        .products
                        .push(Product::new(track_id, estimate, last_detection, kind)?),
                    None => log::debug!("Skipping {} with grouping label {:?}", track_id, other),
                },
                None => log::debug!("Skipping {} with unknown class {}", track_id, label),
            }
        }

        Ok(frame)
    }

    /// Number of entities grouped under `label`.
    pub fn count(&self, label: DetectionLabel) -> usize {
        match label.group() {
            DetectionLabel::Person => self.persons.len(),
            DetectionLabel::Hand => self.hands.len(),
            _ => self.products.len(),
        }
    }

    /// True if the frame has at least one person and one hand.
    pub fn is_assignable(&self) -> bool {
        !self.persons.is_empty() && !self.hands.is_empty()
    }
}
