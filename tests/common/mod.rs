//! Common test helpers for assignment and customer integration tests

#![allow(dead_code)]

use handcart::assignment::Assignment;
use handcart::frame::TrackedObject;
use handcart::types::entities::{Hand, Person, Rgb};
use handcart::types::geometry::BoundingBox;
use handcart::types::labels::{DetectionLabel, TrackId};

/// Creates a hand whose tracking and detection boxes coincide
pub fn make_hand(id: u64, bbox: [f64; 4]) -> Hand {
    let b = BoundingBox::from_array(bbox);
    Hand::new(TrackId(id), b, b).unwrap()
}

/// Creates a person whose tracking and detection boxes coincide
pub fn make_person(id: u64, bbox: [f64; 4]) -> Person {
    let b = BoundingBox::from_array(bbox);
    Person::new(TrackId(id), b, b, Rgb([128, 128, 128])).unwrap()
}

/// Creates a raw tracker object with the given label
pub fn make_object(id: u64, label: DetectionLabel, bbox: [f64; 4]) -> TrackedObject {
    let b = BoundingBox::from_array(bbox);
    TrackedObject::new(TrackId(id), label.class() as i64, b, b)
}

/// Creates a pair from freshly built snapshots
pub fn make_pair(hand_id: u64, person_id: u64) -> Assignment {
    Assignment::new(
        make_hand(hand_id, [10.0, 10.0, 20.0, 20.0]),
        make_person(person_id, [0.0, 0.0, 100.0, 100.0]),
    )
}

/// Flattens pairs into `(hand_id, person_id)` tuples
pub fn pair_ids(pairs: &[Assignment]) -> Vec<(u64, u64)> {
    pairs
        .iter()
        .map(|a| (a.hand_id().get(), a.person_id().get()))
        .collect()
}

/// Installs a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
