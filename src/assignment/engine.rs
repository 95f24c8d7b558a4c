//! Hand-person assignment engine
//!
//! Resolves, frame by frame, which hands belong to which persons:
//!
//! 1. **Containment**: each hand is tested against every person's box grown
//!    by a margin. One containing person gives a *pure* assignment; more than
//!    one marks the hand *intercepted*.
//! 2. **Bleed-through**: every candidate person of an intercepted hand is
//!    intercepted too, and pure assignments onto such persons are demoted so
//!    their hands compete in matching.
//! 3. **Matching**: intercepted hands and persons are matched by a global
//!    maximum-weight assignment with every person column duplicated, so one
//!    person can win two hands.
//! 4. **Cap**: surviving pure assignments keep at most two hands per person.
//!
//! The result is kept as history for the next frame's scores.

use alloc::vec::Vec;

use crate::types::entities::{Hand, Person, Tracked};
use crate::{HandcartError, Result};

use super::hungarian::{hungarian_maximize, ScoreMatrix};
use super::pairs::{attach_hands, cap_hands_per_person, Assignment};
use super::scoring::{build_score_matrix, ScoreWeights};

/// Configuration for hand-person assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentConfig {
    /// Horizontal growth of a person box in the containment test
    pub margin_x: f64,
    /// Vertical growth of a person box in the containment test
    pub margin_y: f64,
    /// Weights of the history score
    pub weights: ScoreWeights,
    /// Pure assignments kept per person
    pub max_hands_per_person: usize,
}

impl AssignmentConfig {
    /// Creates a configuration with the same margin on both axes.
    pub fn with_margin(margin: f64) -> Self {
        Self {
            margin_x: margin,
            margin_y: margin,
            ..Self::default()
        }
    }

    /// Replaces the history score weights.
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            margin_x: 35.0,
            margin_y: 35.0,
            weights: ScoreWeights::default(),
            max_hands_per_person: 2,
        }
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Outcome of the containment pass, as indices into the frame's slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Containment {
    /// `(hand, person)` pairs where the hand has exactly one candidate
    pub pure: Vec<(usize, usize)>,
    /// Hands with more than one candidate, in hand order
    pub intercepted_hands: Vec<usize>,
    /// Hands no person contains
    pub unassigned_hands: Vec<usize>,
}

/// Tests every hand against every person and records candidates on the hands.
///
/// Candidate lists from an earlier pass are cleared first.
pub fn containment_pass(
    persons: &[Person],
    hands: &mut [Hand],
    margin_x: f64,
    margin_y: f64,
) -> Containment {
    let mut result = Containment::default();

    for (h, hand) in hands.iter_mut().enumerate() {
        hand.clear_potential_persons();
        let bbox = *hand.bbox();
        let mut first = None;
        for (p, person) in persons.iter().enumerate() {
            if bbox.is_inside(person.bbox(), margin_x, margin_y) {
                hand.add_potential_person(person.track_id());
                first.get_or_insert(p);
            }
        }

        match (hand.n_potential_assignments(), first) {
            (1, Some(p)) => result.pure.push((h, p)),
            (0, _) => {
                log::info!("Hand {} is not inside any person", hand.track_id());
                result.unassigned_hands.push(h);
            }
            _ => result.intercepted_hands.push(h),
        }
    }

    result
}

/// Collects the candidate persons of intercepted hands, de-duplicated in
/// first-seen order.
pub fn intercepted_persons(
    persons: &[Person],
    hands: &[Hand],
    intercepted_hands: &[usize],
) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    for &h in intercepted_hands {
        for id in &hands[h].potential_persons {
            if let Some(p) = persons.iter().position(|person| person.track_id() == *id) {
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
    }
    out
}

/// Splits pure assignments into those that stay pure and the hands that must
/// compete because their person is intercepted.
pub fn demote_contested(
    pure: Vec<(usize, usize)>,
    intercepted_persons: &[usize],
) -> (Vec<(usize, usize)>, Vec<usize>) {
    let mut kept = Vec::with_capacity(pure.len());
    let mut demoted = Vec::new();
    for (h, p) in pure {
        if intercepted_persons.contains(&p) {
            demoted.push(h);
        } else {
            kept.push((h, p));
        }
    }
    (kept, demoted)
}

/// Matches contested hands to contested persons.
///
/// Each person appears as two columns. The matrix is padded to a square
/// with zero-score placeholder rows or columns, and any pair that lands on
/// a placeholder is dropped. Returns `(hand, person)` index pairs in row
/// order.
pub fn match_intercepted(
    persons: &[Person],
    hands: &[Hand],
    hand_rows: &[usize],
    person_cols: &[usize],
    previous: &[Assignment],
    weights: &ScoreWeights,
) -> Result<Vec<(usize, usize)>> {
    if hand_rows.is_empty() || person_cols.is_empty() {
        return Ok(Vec::new());
    }

    let row_hands: Vec<&Hand> = hand_rows.iter().map(|&h| &hands[h]).collect();
    let col_persons: Vec<&Person> = person_cols.iter().map(|&p| &persons[p]).collect();

    let scores = build_score_matrix(&row_hands, &col_persons, previous, weights);
    check_shape(&scores, row_hands.len(), col_persons.len())?;

    let doubled = scores.duplicate_columns();
    let n_cols = doubled.cols();
    let square = doubled.padded_square(0.0);

    let matching = hungarian_maximize(&square)?;

    let pairs = matching
        .pairs()
        .filter(|&(row, col)| row < hand_rows.len() && col < n_cols)
        .map(|(row, col)| (hand_rows[row], person_cols[col % person_cols.len()]))
        .collect();
    Ok(pairs)
}

fn check_shape(scores: &ScoreMatrix, rows: usize, cols: usize) -> Result<()> {
    if scores.rows() != rows || scores.cols() != cols {
        return Err(HandcartError::ShapeMismatch {
            expected: rows * cols,
            actual: scores.rows() * scores.cols(),
        });
    }
    Ok(())
}

// ============================================================================
// Engine
// ============================================================================

/// Stateful hand-person assigner.
///
/// Holds the previous frame's result, which scores contested cells in the
/// next frame.
#[derive(Debug, Clone, Default)]
pub struct HandPersonAssigner {
    config: AssignmentConfig,
    previous: Vec<Assignment>,
}

impl HandPersonAssigner {
    /// Creates an assigner with no history.
    pub fn new(config: AssignmentConfig) -> Self {
        Self {
            config,
            previous: Vec::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// The most recent frame's assignment.
    pub fn previous(&self) -> &[Assignment] {
        &self.previous
    }

    /// Forgets the stored history.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Assigns the frame's hands to its persons.
    ///
    /// An empty `persons` or `hands` slice yields an empty result. The
    /// returned pairs are stored as history for the next call.
    pub fn assign(&mut self, persons: &[Person], hands: &mut [Hand]) -> Result<&[Assignment]> {
        if persons.is_empty() || hands.is_empty() {
            log::info!(
                "No assignment possible: {} persons, {} hands",
                persons.len(),
                hands.len()
            );
            self.previous.clear();
            return Ok(&self.previous);
        }

        let containment =
            containment_pass(persons, hands, self.config.margin_x, self.config.margin_y);
        let contested_persons = intercepted_persons(persons, hands, &containment.intercepted_hands);
        let (pure, demoted) = demote_contested(containment.pure, &contested_persons);

        let mut contested_hands = containment.intercepted_hands;
        for h in demoted {
            if !contested_hands.contains(&h) {
                contested_hands.push(h);
            }
        }

        log::debug!(
            "Containment: {} pure, {} contested hands, {} contested persons, {} unassigned",
            pure.len(),
            contested_hands.len(),
            contested_persons.len(),
            containment.unassigned_hands.len()
        );
        if contested_hands.is_empty() {
            log::info!("No intercepted hands in this frame");
        }

        let pure_pairs: Vec<Assignment> = pure
            .into_iter()
            .map(|(h, p)| Assignment::new(hands[h].clone(), persons[p].clone()))
            .collect();
        let mut current = cap_hands_per_person(pure_pairs, self.config.max_hands_per_person);

        let matched = match_intercepted(
            persons,
            hands,
            &contested_hands,
            &contested_persons,
            &self.previous,
            &self.config.weights,
        )?;
        log::debug!("Matched {} contested hands", matched.len());

        current.extend(
            matched
                .into_iter()
                .map(|(h, p)| Assignment::new(hands[h].clone(), persons[p].clone())),
        );
        attach_hands(&mut current);

        self.previous = current;
        Ok(&self.previous)
    }
}
