//! Per-frame pipeline from tracker output to customers
//!
//! Runs grouping, hand-person assignment, customer lifecycle and product
//! inventory in order. Every stage needs the complete result of the previous
//! frame, so frames must be processed one at a time.

use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use nalgebra::Point2;

use crate::assignment::{Assignment, AssignmentConfig, HandPersonAssigner};
use crate::customers::{Customer, CustomerConfig, CustomerRegistry, LifecycleReport};
use crate::frame::{FrameEntities, PersonPalette, TrackedObject};
use crate::store::{
    find_close_products, CloseProduct, PlacedProduct, ProductInventory, ProximityConfig,
    TopViewProjection,
};
use crate::types::entities::Tracked;
use crate::types::labels::TrackId;
use crate::Result;

/// Configuration for every stage of the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    pub assignment: AssignmentConfig,
    pub customers: CustomerConfig,
    pub proximity: ProximityConfig,
    /// Seed for person display colors
    pub palette_seed: u64,
}

/// Outcome of one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub assignments: Vec<Assignment>,
    pub lifecycle: LifecycleReport,
    pub products_added: BTreeSet<String>,
    pub products_gone: BTreeSet<String>,
}

/// Owns all cross-frame state.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    assigner: HandPersonAssigner,
    registry: CustomerRegistry,
    inventory: ProductInventory,
    palette: PersonPalette,
    proximity: ProximityConfig,
    frame_index: u64,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            assigner: HandPersonAssigner::new(config.assignment),
            registry: CustomerRegistry::new(config.customers),
            inventory: ProductInventory::new(),
            palette: PersonPalette::seeded(config.palette_seed),
            proximity: config.proximity,
            frame_index: 0,
        }
    }

    /// Processes one frame of tracker output.
    ///
    /// On error the frame is abandoned and no stage has stored its output:
    /// the assigner, registry and inventory still hold the last good frame.
    pub fn process(&mut self, objects: &[TrackedObject]) -> Result<FrameReport> {
        let frame_index = self.frame_index;
        self.frame_index += 1;

        let FrameEntities {
            persons,
            mut hands,
            products,
        } = FrameEntities::from_tracked(objects, &mut self.palette)?;
        log::debug!(
            "Frame {}: {} persons, {} hands, {} products",
            frame_index,
            persons.len(),
            hands.len(),
            products.len()
        );

        let assignments = self.assigner.assign(&persons, &mut hands)?.to_vec();
        let lifecycle = self.registry.manage(&assignments);
        let diff = self.inventory.update(products);

        // Colors stay with customers and with persons still in view
        let registry = &self.registry;
        self.palette.retain(|track| {
            registry.contains(track) || persons.iter().any(|p| p.track_id() == track)
        });

        Ok(FrameReport {
            frame_index,
            assignments,
            lifecycle,
            products_added: diff.added,
            products_gone: diff.gone,
        })
    }

    /// Matches active customers' hands against the current products and
    /// records the hits in the customers' histories.
    ///
    /// `locations` holds top-view positions by product track id; products
    /// without a location are skipped.
    pub fn close_products<P: TopViewProjection>(
        &mut self,
        locations: &BTreeMap<TrackId, Point2<f64>>,
        projection: &P,
    ) -> Vec<CloseProduct> {
        let placed: Vec<PlacedProduct<'_>> = self
            .inventory
            .current()
            .iter()
            .filter_map(|product| {
                locations.get(&product.track_id()).map(|&top_view| PlacedProduct {
                    product,
                    top_view,
                })
            })
            .collect();

        let close = find_close_products(self.registry.active(), &placed, projection, &self.proximity);
        self.registry.record_close_products(&close);
        close
    }

    /// Customers active in the latest frame.
    pub fn active_customers(&self) -> &[Customer] {
        self.registry.active()
    }

    pub fn registry(&self) -> &CustomerRegistry {
        &self.registry
    }

    pub fn assigner(&self) -> &HandPersonAssigner {
        &self.assigner
    }

    pub fn inventory(&self) -> &ProductInventory {
        &self.inventory
    }

    pub fn palette(&self) -> &PersonPalette {
        &self.palette
    }

    /// Number of frames handed to [`process`](Self::process) so far.
    pub fn frames_processed(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
