//! Active and on-hold customer registries
//!
//! Each frame's assignment list drives a small state machine per person
//! track id:
//!
//! - absent → active: first pair for an unknown id creates a customer
//! - active → active: the id's first pair this frame replaces the first
//!   hand, a second pair fills the second hand
//! - on-hold → active: the customer is reactivated and updated the same way
//! - active → on-hold: a customer active before the frame and not touched by
//!   it is parked, replacing any older on-hold snapshot of the same id
//!
//! On-hold customers are never dropped.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::assignment::Assignment;
use crate::store::CloseProduct;
use crate::types::labels::TrackId;
use crate::HandcartError;

use super::customer::{Customer, HandSlot, DEFAULT_HISTORY_CAPACITY};

/// Configuration for customer records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerConfig {
    /// Close products remembered per customer
    pub history_capacity: usize,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// What one call to [`CustomerRegistry::manage`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifecycleReport {
    pub created: Vec<TrackId>,
    pub updated: Vec<TrackId>,
    pub reactivated: Vec<TrackId>,
    pub moved_on_hold: Vec<TrackId>,
    /// Updates refused without affecting the rest of the frame
    pub rejected: Vec<HandcartError>,
}

/// Registry of customers keyed by person track id.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    config: CustomerConfig,
    active: Vec<Customer>,
    on_hold: BTreeMap<TrackId, Customer>,
}

impl CustomerRegistry {
    pub fn new(config: CustomerConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
            on_hold: BTreeMap::new(),
        }
    }

    /// Customers seen in the latest frame, in the order they were touched.
    pub fn active(&self) -> &[Customer] {
        &self.active
    }

    /// Customers waiting to be reactivated. No ordering is promised.
    pub fn on_hold(&self) -> impl Iterator<Item = &Customer> {
        self.on_hold.values()
    }

    pub fn get_active(&self, person_id: TrackId) -> Option<&Customer> {
        self.active.iter().find(|c| c.person_id() == person_id)
    }

    pub fn get_on_hold(&self, person_id: TrackId) -> Option<&Customer> {
        self.on_hold.get(&person_id)
    }

    /// True if the person is a customer, active or on hold.
    pub fn contains(&self, person_id: TrackId) -> bool {
        self.on_hold.contains_key(&person_id) || self.get_active(person_id).is_some()
    }

    /// Applies a frame's assignments to the registries.
    pub fn manage(&mut self, assignments: &[Assignment]) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        let mut previously_active: BTreeMap<TrackId, Customer> = core::mem::take(&mut self.active)
            .into_iter()
            .map(|c| (c.person_id(), c))
            .collect();

        // Touched this frame, with each id's position in `touched`
        let mut touched: Vec<Customer> = Vec::new();
        let mut touched_index: BTreeMap<TrackId, usize> = BTreeMap::new();

        for assignment in assignments {
            let id = assignment.person_id();

            let (idx, slot) = match touched_index.get(&id) {
                Some(&idx) => (idx, HandSlot::Second),
                None => {
                    let customer = if let Some(customer) = previously_active.remove(&id) {
                        report.updated.push(id);
                        customer
                    } else if let Some(mut customer) = self.on_hold.remove(&id) {
                        log::info!("Customer {} reactivated", id);
                        customer.set_active(true);
                        report.reactivated.push(id);
                        customer
                    } else {
                        log::info!("Customer {} created", id);
                        report.created.push(id);
                        Customer::from_assignment(assignment, self.config.history_capacity)
                    };

                    let idx = touched.len();
                    touched_index.insert(id, idx);
                    touched.push(customer);
                    (idx, HandSlot::First)
                }
            };

            if let Err(err) = touched[idx].apply(assignment, slot) {
                log::warn!("Rejected hand update: {}", err);
                report.rejected.push(err);
            }
        }

        for (id, mut customer) in previously_active {
            customer.set_active(false);
            report.moved_on_hold.push(id);
            self.on_hold.insert(id, customer);
        }

        self.active = touched;
        report
    }

    /// Pushes close products onto the matching active customers' histories.
    ///
    /// Entries for persons that are not active are ignored.
    pub fn record_close_products(&mut self, close: &[CloseProduct]) {
        for entry in close {
            if let Some(customer) = self
                .active
                .iter_mut()
                .find(|c| c.person_id() == entry.person_id)
            {
                customer.record_close_product(entry.product_code.clone());
            }
        }
    }
}
