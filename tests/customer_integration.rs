//! Integration tests for customer lifecycle management

mod common;

use common::{init_logging, make_pair};
use handcart::customers::{CustomerConfig, CustomerRegistry};
use handcart::store::CloseProduct;
use handcart::types::entities::Tracked;
use handcart::types::labels::TrackId;

fn close(person: u64, hand: u64, code: &str) -> CloseProduct {
    CloseProduct {
        person_id: TrackId(person),
        hand_id: TrackId(hand),
        product_code: code.to_string(),
        distance: 1.0,
    }
}

#[test]
fn test_reactivation_never_duplicates() {
    init_logging();
    let mut registry = CustomerRegistry::default();

    for cycle in 0..5u64 {
        let report = registry.manage(&[make_pair(10 + cycle, 1)]);
        if cycle == 0 {
            assert_eq!(report.created, vec![TrackId(1)]);
        } else {
            assert_eq!(report.reactivated, vec![TrackId(1)]);
        }
        assert_eq!(registry.active().len(), 1);
        assert!(registry.get_on_hold(TrackId(1)).is_none());

        let report = registry.manage(&[make_pair(50, 2)]);
        assert_eq!(report.moved_on_hold, vec![TrackId(1)]);
        assert_eq!(registry.on_hold().filter(|c| c.person_id() == TrackId(1)).count(), 1);
        assert!(registry.get_active(TrackId(1)).is_none());
    }
}

#[test]
fn test_history_survives_time_on_hold() {
    let mut registry = CustomerRegistry::default();
    registry.manage(&[make_pair(11, 1)]);
    registry.record_close_products(&[close(1, 11, "pringles#7")]);

    registry.manage(&[]);
    let parked = registry.get_on_hold(TrackId(1)).unwrap();
    assert_eq!(parked.close_products().latest(), Some("pringles#7"));

    registry.manage(&[make_pair(12, 1)]);
    let back = registry.get_active(TrackId(1)).unwrap();
    assert_eq!(back.close_products().latest(), Some("pringles#7"));
    assert_eq!(back.first_hand().track_id(), TrackId(12));
}

#[test]
fn test_history_is_bounded_and_newest_first() {
    let config = CustomerConfig {
        history_capacity: 3,
    };
    let mut registry = CustomerRegistry::new(config);
    registry.manage(&[make_pair(11, 1)]);

    for i in 0..5 {
        let code = format!("ememes#{}", i);
        registry.record_close_products(&[close(1, 11, &code)]);
    }

    let history = registry.get_active(TrackId(1)).unwrap().close_products();
    assert_eq!(history.len(), 3);
    let codes: Vec<&str> = history.iter().collect();
    assert_eq!(codes, vec!["ememes#4", "ememes#3", "ememes#2"]);
}

#[test]
fn test_second_hand_kept_when_only_one_pair_arrives() {
    let mut registry = CustomerRegistry::default();
    registry.manage(&[make_pair(11, 1), make_pair(12, 1)]);
    registry.manage(&[make_pair(13, 1)]);

    let c = registry.get_active(TrackId(1)).unwrap();
    assert_eq!(c.first_hand().track_id(), TrackId(13));
    assert_eq!(c.second_hand().map(|h| h.track_id()), Some(TrackId(12)));
    assert_eq!(c.hands().count(), 2);
}

#[test]
fn test_second_hand_taking_first_slot_is_held_once() {
    let mut registry = CustomerRegistry::default();
    registry.manage(&[make_pair(11, 1), make_pair(12, 1)]);

    let report = registry.manage(&[make_pair(12, 1)]);
    assert!(report.rejected.is_empty());

    let c = registry.get_active(TrackId(1)).unwrap();
    assert_eq!(c.first_hand().track_id(), TrackId(12));
    assert!(c.second_hand().is_none());
    let held: Vec<u64> = c.hands().map(|h| h.track_id().get()).collect();
    assert_eq!(held, vec![12]);

    // One hit per hand, so the history grows by one entry
    registry.record_close_products(&[close(1, 12, "cocas#30")]);
    let history = registry.get_active(TrackId(1)).unwrap().close_products();
    assert_eq!(history.len(), 1);
    assert!(registry.contains(TrackId(1)));
    assert!(!registry.contains(TrackId(2)));
}

#[test]
fn test_active_order_follows_assignment_order() {
    let mut registry = CustomerRegistry::default();
    registry.manage(&[make_pair(11, 1), make_pair(12, 2)]);
    registry.manage(&[make_pair(12, 2), make_pair(13, 3), make_pair(11, 1)]);

    let ids: Vec<u64> = registry.active().iter().map(|c| c.person_id().get()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}
