//! Stable display colors per person track

use alloc::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::entities::Rgb;
use crate::types::labels::TrackId;

/// Hands out one random color per person track id and keeps it.
#[derive(Debug, Clone)]
pub struct PersonPalette {
    rng: SmallRng,
    colors: BTreeMap<TrackId, Rgb>,
}

impl PersonPalette {
    /// Creates a palette whose colors are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            colors: BTreeMap::new(),
        }
    }

    /// Returns the track's color, drawing a new one on first sight.
    pub fn color_for(&mut self, track: TrackId) -> Rgb {
        let rng = &mut self.rng;
        *self.colors.entry(track).or_insert_with(|| Rgb(rng.random()))
    }

    /// Color already drawn for the track, if any.
    pub fn get(&self, track: TrackId) -> Option<Rgb> {
        self.colors.get(&track).copied()
    }

    /// Keeps only the colors of tracks for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(TrackId) -> bool,
    {
        self.colors.retain(|track, _| keep(*track));
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for PersonPalette {
    fn default() -> Self {
        Self::seeded(0)
    }
}
