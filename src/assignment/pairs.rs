//! Hand-person pairs produced by the assignment engine

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::types::entities::{Hand, Person, Tracked};
use crate::types::labels::TrackId;

/// "This hand belongs to this person" for one frame.
///
/// Both sides are owned snapshots, so a frame's result can be kept as the
/// previous assignment after the frame's entities are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub hand: Hand,
    pub person: Person,
}

impl Assignment {
    /// Creates a pair from cloned snapshots.
    pub fn new(hand: Hand, person: Person) -> Self {
        Self { hand, person }
    }

    #[inline]
    pub fn hand_id(&self) -> TrackId {
        self.hand.track_id()
    }

    #[inline]
    pub fn person_id(&self) -> TrackId {
        self.person.track_id()
    }
}

/// Keeps at most `max_per_person` pairs per person, in iteration order.
///
/// When more hands compete for one person, the ones seen last are dropped.
pub fn cap_hands_per_person(assignments: Vec<Assignment>, max_per_person: usize) -> Vec<Assignment> {
    let mut counts: BTreeMap<TrackId, usize> = BTreeMap::new();
    assignments
        .into_iter()
        .filter(|a| {
            let count = counts.entry(a.person_id()).or_insert(0);
            *count += 1;
            if *count > max_per_person {
                log::debug!(
                    "Dropping hand {} from person {}: already holds {} hands",
                    a.hand_id(),
                    a.person_id(),
                    max_per_person
                );
                false
            } else {
                true
            }
        })
        .collect()
}

/// Fills every person snapshot's hand slots from the frame's pairs.
///
/// All pairs of the same person end up carrying the same slots.
pub fn attach_hands(assignments: &mut [Assignment]) {
    let mut slots: BTreeMap<TrackId, Vec<TrackId>> = BTreeMap::new();
    for a in assignments.iter() {
        slots.entry(a.person_id()).or_default().push(a.hand_id());
    }
    for a in assignments.iter_mut() {
        a.person.first_hand = None;
        a.person.second_hand = None;
        if let Some(hands) = slots.get(&a.person_id()) {
            for hand in hands {
                a.person.attach_hand(*hand);
            }
        }
    }
}
