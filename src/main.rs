//! Example usage of the handcart library
//!
//! Runs a short synthetic scene through the frame pipeline: two shoppers
//! walk up to a table, one reaches across the other, then leaves and comes
//! back.

use std::collections::BTreeMap;

use handcart::prelude::*;
use nalgebra::Point2;

fn object(id: u64, label: DetectionLabel, bbox: [f64; 4]) -> TrackedObject {
    let b = BoundingBox::from_array(bbox);
    TrackedObject::new(TrackId(id), label.class() as i64, b, b)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("handcart: hand-person assignment demo");
    println!("=====================================\n");

    let products = [
        object(20, DetectionLabel::ProductA, [120.0, 150.0, 130.0, 170.0]),
        object(21, DetectionLabel::ProductD, [260.0, 150.0, 275.0, 170.0]),
    ];

    let frames: Vec<Vec<TrackedObject>> = vec![
        // Frame 0: two shoppers, one hand each, well apart
        vec![
            object(1, DetectionLabel::Person, [0.0, 0.0, 100.0, 200.0]),
            object(2, DetectionLabel::Person, [200.0, 0.0, 300.0, 200.0]),
            object(10, DetectionLabel::Hand, [90.0, 80.0, 110.0, 100.0]),
            object(11, DetectionLabel::Hand, [210.0, 80.0, 230.0, 100.0]),
        ],
        // Frame 1: shopper 1 moves closer, both hands sit in the overlap
        vec![
            object(1, DetectionLabel::Person, [40.0, 0.0, 160.0, 200.0]),
            object(2, DetectionLabel::Person, [150.0, 0.0, 270.0, 200.0]),
            object(10, DetectionLabel::Hand, [140.0, 80.0, 158.0, 100.0]),
            object(11, DetectionLabel::Hand, [152.0, 80.0, 170.0, 100.0]),
        ],
        // Frame 2: shopper 1 steps out of view
        vec![
            object(2, DetectionLabel::Person, [200.0, 0.0, 300.0, 200.0]),
            object(11, DetectionLabel::Hand, [250.0, 140.0, 270.0, 160.0]),
        ],
        // Frame 3: shopper 1 is back with both hands
        vec![
            object(1, DetectionLabel::Person, [0.0, 0.0, 100.0, 200.0]),
            object(2, DetectionLabel::Person, [200.0, 0.0, 300.0, 200.0]),
            object(10, DetectionLabel::Hand, [110.0, 150.0, 125.0, 165.0]),
            object(12, DetectionLabel::Hand, [10.0, 80.0, 30.0, 100.0]),
            object(11, DetectionLabel::Hand, [250.0, 140.0, 270.0, 160.0]),
        ],
    ];

    // Products sit on a table whose top view matches camera space
    let locations: BTreeMap<TrackId, Point2<f64>> = products
        .iter()
        .map(|p| {
            let center = p.estimate.center().unwrap_or(Point2::origin());
            (p.track_id, to_real(&center))
        })
        .collect();

    let mut pipeline = FramePipeline::default();

    for objects in frames {
        let mut input = objects;
        input.extend(products.iter().cloned());

        let report = match pipeline.process(&input) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("Skipping frame: {}", err);
                continue;
            }
        };

        println!("Frame {}: {} assignments", report.frame_index, report.assignments.len());
        for a in &report.assignments {
            println!("  hand {} -> person {}", a.hand_id(), a.person_id());
        }

        let close = pipeline.close_products(&locations, &IdentityProjection);
        for hit in &close {
            println!(
                "  hand {} of customer {} is {:.1} from {}",
                hit.hand_id, hit.person_id, hit.distance, hit.product_code
            );
        }

        println!("  Active customers:");
        for customer in pipeline.active_customers() {
            let second = customer
                .second_hand()
                .map(|h| h.track_id().to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "    {}: hands {} / {}, recent products {:?}",
                customer.person_id(),
                customer.first_hand().track_id(),
                second,
                customer.close_products().iter().collect::<Vec<_>>()
            );
        }
        let on_hold: Vec<String> = pipeline
            .registry()
            .on_hold()
            .map(|c| c.person_id().to_string())
            .collect();
        println!("  On hold: {:?}\n", on_hold);
    }

    println!("Processed {} frames", pipeline.frames_processed());
}
