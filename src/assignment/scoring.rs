//! Scores for contested hand-person cells
//!
//! Every score here is maximized by the solver. With history, a cell scores
//! how well the pair continues the best-matching previous pair. Without
//! history, it scores the center distance.

use crate::types::entities::{Hand, Person, Tracked};
use crate::types::geometry::euclidean_distance;

use super::hungarian::ScoreMatrix;
use super::pairs::Assignment;

/// Weights of the history score terms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Weight of "both track ids equal the previous pair's"
    pub same_id: f64,
    /// Weight of IoU between current and previous hand boxes
    pub hand_iou: f64,
    /// Weight of IoU between current and previous person boxes
    pub person_iou: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            same_id: 0.2,
            hand_iou: 0.3,
            person_iou: 0.5,
        }
    }
}

/// Score of a cell against a single previous pair.
pub fn continuity_score(
    hand: &Hand,
    person: &Person,
    previous: &Assignment,
    weights: &ScoreWeights,
) -> f64 {
    let same_ids = hand.track_id() == previous.hand_id() && person.track_id() == previous.person_id();
    let same_id_term = if same_ids { 1.0 } else { 0.0 };

    weights.same_id * same_id_term
        + weights.hand_iou * hand.bbox().iou(previous.hand.bbox())
        + weights.person_iou * person.bbox().iou(previous.person.bbox())
}

/// Best continuity score over all previous pairs.
///
/// Returns `None` when there is no history to score against.
pub fn history_score(
    hand: &Hand,
    person: &Person,
    previous: &[Assignment],
    weights: &ScoreWeights,
) -> Option<f64> {
    previous
        .iter()
        .map(|prev| continuity_score(hand, person, prev, weights))
        .reduce(f64::max)
}

/// Fallback score when no history exists: center-to-center distance.
///
/// This is maximized like every other score, so farther pairs win.
#[inline]
pub fn distance_score(hand: &Hand, person: &Person) -> f64 {
    euclidean_distance(&hand.center(), &person.center())
}

/// Builds the hands-by-persons score matrix.
///
/// Uses history scoring when `previous` is non-empty and distance scoring
/// otherwise.
pub fn build_score_matrix(
    hands: &[&Hand],
    persons: &[&Person],
    previous: &[Assignment],
    weights: &ScoreWeights,
) -> ScoreMatrix {
    let mut scores = ScoreMatrix::zeros(hands.len(), persons.len());
    for (i, hand) in hands.iter().enumerate() {
        for (j, person) in persons.iter().enumerate() {
            let score = history_score(hand, person, previous, weights)
                .unwrap_or_else(|| distance_score(hand, person));
            scores.set(i, j, score);
        }
    }
    scores
}
