//! Hand-to-product proximity
//!
//! Hand centers of active customers are projected onto the top-view layout
//! and compared against product locations on the same layout. The projection
//! itself comes from the caller.

use alloc::string::String;
use alloc::vec::Vec;

use nalgebra::Point2;

use crate::customers::Customer;
use crate::types::entities::{Product, Tracked};
use crate::types::geometry::to_real;
use crate::types::labels::TrackId;

/// Configuration for proximity matching.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityConfig {
    /// Top-view distance under which a hand counts as close to a product
    pub close_distance_threshold: f64,
}

impl ProximityConfig {
    pub fn new(close_distance_threshold: f64) -> Self {
        Self {
            close_distance_threshold,
        }
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self::new(50.0)
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Maps a camera-space point onto the top-view layout.
pub trait TopViewProjection {
    fn project(&self, point: Point2<f64>) -> Point2<f64>;
}

/// Leaves points unchanged, for layouts already in camera space.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl TopViewProjection for IdentityProjection {
    #[inline]
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        point
    }
}

/// Adapts a closure into a projection.
#[derive(Debug, Clone, Copy)]
pub struct FnProjection<F>(pub F);

impl<F> TopViewProjection for FnProjection<F>
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    #[inline]
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        (self.0)(point)
    }
}

// ============================================================================
// Matching
// ============================================================================

/// A customer's hand found close to a product.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseProduct {
    pub person_id: TrackId,
    pub hand_id: TrackId,
    pub product_code: String,
    /// Top-view distance between hand and product
    pub distance: f64,
}

/// A product together with its location on the top-view layout.
#[derive(Debug, Clone, Copy)]
pub struct PlacedProduct<'a> {
    pub product: &'a Product,
    pub top_view: Point2<f64>,
}

/// Projects the hand centers of `customers`, dropping any that land at a
/// negative coordinate.
pub fn project_hands<P: TopViewProjection>(
    customers: &[Customer],
    projection: &P,
) -> Vec<(TrackId, TrackId, Point2<f64>)> {
    customers
        .iter()
        .flat_map(|c| c.hands().map(move |h| (c.person_id(), h.track_id(), h.center())))
        .map(|(person, hand, center)| (person, hand, projection.project(to_real(&center))))
        .filter(|(_, _, p)| p.x >= 0.0 && p.y >= 0.0)
        .collect()
}

/// Finds every (hand, product) pair closer than the configured threshold.
///
/// Pairs come out hand-major: customers in order, first hand before second,
/// then products in order.
pub fn find_close_products<P: TopViewProjection>(
    customers: &[Customer],
    products: &[PlacedProduct<'_>],
    projection: &P,
    config: &ProximityConfig,
) -> Vec<CloseProduct> {
    let hands = project_hands(customers, projection);
    if hands.is_empty() || products.is_empty() {
        return Vec::new();
    }

    let mut close = Vec::new();
    for (person_id, hand_id, hand_point) in &hands {
        for placed in products {
            let distance = nalgebra::distance(hand_point, &placed.top_view);
            if distance < config.close_distance_threshold {
                close.push(CloseProduct {
                    person_id: *person_id,
                    hand_id: *hand_id,
                    product_code: placed.product.code.clone(),
                    distance,
                });
            }
        }
    }

    log::debug!(
        "{} projected hands, {} products, {} close pairs",
        hands.len(),
        products.len(),
        close.len()
    );
    close
}
