//! Durable customer records built from hand-person assignments

use alloc::collections::VecDeque;
use alloc::string::String;

use crate::assignment::Assignment;
use crate::types::entities::{Hand, Person, Tracked};
use crate::types::labels::TrackId;
use crate::{HandcartError, Result};

/// Default number of close products remembered per customer.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

// ============================================================================
// Product History
// ============================================================================

/// Bounded, most-recent-first list of product codes a customer was close to.
///
/// Pushing onto a full history evicts the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ProductHistory {
    /// Creates an empty history holding at most `capacity` codes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a product code as the most recent entry.
    pub fn push(&mut self, code: String) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(code);
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Iterates from most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ============================================================================
// Customer
// ============================================================================

/// Which of a customer's hand slots an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSlot {
    First,
    Second,
}

/// A person identity that persists across assignment gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    person_id: TrackId,
    person: Person,
    first_hand: Hand,
    second_hand: Option<Hand>,
    close_products: ProductHistory,
    active: bool,
    // Never incremented; on-hold customers do not age out.
    frames_inactive: u32,
}

impl Customer {
    /// Creates an active customer from its first assignment.
    ///
    /// Only the first hand slot is filled.
    pub fn from_assignment(assignment: &Assignment, history_capacity: usize) -> Self {
        Self {
            person_id: assignment.person_id(),
            person: assignment.person.clone(),
            first_hand: assignment.hand.clone(),
            second_hand: None,
            close_products: ProductHistory::with_capacity(history_capacity),
            active: true,
            frames_inactive: 0,
        }
    }

    pub fn person_id(&self) -> TrackId {
        self.person_id
    }

    /// Latest person snapshot.
    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn first_hand(&self) -> &Hand {
        &self.first_hand
    }

    pub fn second_hand(&self) -> Option<&Hand> {
        self.second_hand.as_ref()
    }

    /// Iterates over the held hands, first hand first.
    pub fn hands(&self) -> impl Iterator<Item = &Hand> {
        core::iter::once(&self.first_hand).chain(self.second_hand.iter())
    }

    pub fn close_products(&self) -> &ProductHistory {
        &self.close_products
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn frames_inactive(&self) -> u32 {
        self.frames_inactive
    }

    /// Replaces the hand in `slot`.
    ///
    /// The second slot rejects a hand whose track id equals the first hand's;
    /// the customer is left unchanged in that case. A first hand that was
    /// held as the second hand leaves the second slot empty.
    pub fn update_hand(&mut self, hand: Hand, slot: HandSlot) -> Result<()> {
        match slot {
            HandSlot::First => {
                if self
                    .second_hand
                    .as_ref()
                    .is_some_and(|h| h.track_id() == hand.track_id())
                {
                    self.second_hand = None;
                }
                self.first_hand = hand;
                Ok(())
            }
            HandSlot::Second => self.add_second_hand(hand),
        }
    }

    fn add_second_hand(&mut self, hand: Hand) -> Result<()> {
        if hand.track_id() == self.first_hand.track_id() {
            return Err(HandcartError::DuplicateHand {
                person: self.person_id,
                hand: hand.track_id(),
            });
        }
        self.second_hand = Some(hand);
        Ok(())
    }

    /// Applies one assignment pair to the customer.
    ///
    /// The person snapshot is refreshed only if the hand update succeeds.
    pub fn apply(&mut self, assignment: &Assignment, slot: HandSlot) -> Result<()> {
        self.update_hand(assignment.hand.clone(), slot)?;
        self.person = assignment.person.clone();
        Ok(())
    }

    /// Records a product the customer was close to.
    pub fn record_close_product(&mut self, code: String) {
        self.close_products.push(code);
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entities::Rgb;
    use crate::types::geometry::BoundingBox;
    use alloc::string::ToString;

    fn pair(hand_id: u64, person_id: u64) -> Assignment {
        let hb = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        let pb = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        Assignment::new(
            Hand::new(TrackId(hand_id), hb, hb).unwrap(),
            Person::new(TrackId(person_id), pb, pb, Rgb([9, 9, 9])).unwrap(),
        )
    }

    #[test]
    fn test_new_customer_has_only_first_hand() {
        let c = Customer::from_assignment(&pair(1, 7), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(c.person_id(), TrackId(7));
        assert_eq!(c.first_hand().track_id(), TrackId(1));
        assert!(c.second_hand().is_none());
        assert!(c.is_active());
        assert_eq!(c.hands().count(), 1);
    }

    #[test]
    fn test_second_hand_is_added() {
        let mut c = Customer::from_assignment(&pair(1, 7), DEFAULT_HISTORY_CAPACITY);
        c.apply(&pair(2, 7), HandSlot::Second).unwrap();
        assert_eq!(c.second_hand().map(|h| h.track_id()), Some(TrackId(2)));
        assert_eq!(c.hands().count(), 2);
    }

    #[test]
    fn test_duplicate_second_hand_is_rejected() {
        let mut c = Customer::from_assignment(&pair(1, 7), DEFAULT_HISTORY_CAPACITY);
        let before = c.clone();

        let err = c.apply(&pair(1, 7), HandSlot::Second).unwrap_err();

        assert_eq!(
            err,
            HandcartError::DuplicateHand {
                person: TrackId(7),
                hand: TrackId(1)
            }
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_second_hand_moving_to_first_slot_is_not_held_twice() {
        let mut c = Customer::from_assignment(&pair(11, 7), DEFAULT_HISTORY_CAPACITY);
        c.apply(&pair(12, 7), HandSlot::Second).unwrap();

        c.apply(&pair(12, 7), HandSlot::First).unwrap();

        assert_eq!(c.first_hand().track_id(), TrackId(12));
        assert!(c.second_hand().is_none());
        let held: Vec<TrackId> = c.hands().map(|h| h.track_id()).collect();
        assert_eq!(held, vec![TrackId(12)]);
    }

    #[test]
    fn test_history_is_bounded_most_recent_first() {
        let mut history = ProductHistory::with_capacity(3);
        for i in 0..5 {
            history.push(i.to_string());
        }
        let entries: Vec<&str> = history.iter().collect();
        assert_eq!(entries, vec!["4", "3", "2"]);
        assert_eq!(history.latest(), Some("4"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_zero_capacity_history_stays_empty() {
        let mut history = ProductHistory::with_capacity(0);
        history.push("cocas#1".to_string());
        assert!(history.is_empty());
    }
}
