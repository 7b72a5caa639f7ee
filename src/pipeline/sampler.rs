/// Size-bounded, reproducible subsampling for the 3D scatter view.
///
/// Sampling uses ChaCha8 seeded through `SeedableRng::seed_from_u64`, and a
/// partial Fisher–Yates shuffle over record indices: for `i in 0..cap`, swap
/// index `i` with a uniformly drawn index in `i..n`. The first `cap` indices
/// are then sorted so the subset keeps scan order. Same input and seed give
/// the same subset on every run and platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::table::PixelRecord;

/// Maximum number of points handed to the 3D view.
pub const DEFAULT_SAMPLE_CAP: usize = 20_000;

/// Seed used for every sampling pass.
pub const DEFAULT_SAMPLE_SEED: u64 = 0;

/// Points selected for plotting plus the size of the set they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    pub records: Vec<PixelRecord>,
    pub total: usize,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when fewer points are plotted than exist.
    pub fn was_sampled(&self) -> bool {
        self.records.len() < self.total
    }

    /// "plotted N of M" disclosure, only when sampling happened.
    pub fn disclosure(&self) -> Option<String> {
        self.was_sampled().then(|| {
            format!(
                "Showing {} of {} points (random sample, seed {})",
                self.records.len(),
                self.total,
                DEFAULT_SAMPLE_SEED
            )
        })
    }
}

/// Return `records` unchanged when it fits in `cap`, otherwise exactly `cap`
/// uniformly chosen records in their original order.
pub fn sample(records: Vec<PixelRecord>, cap: usize, seed: u64) -> SampleSet {
    let total = records.len();
    if total <= cap {
        return SampleSet { records, total };
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..total).collect();
    for i in 0..cap {
        let j = rng.random_range(i..total);
        indices.swap(i, j);
    }
    let mut chosen = indices[..cap].to_vec();
    chosen.sort_unstable();

    log::debug!("Sampled {} of {} records (seed {})", cap, total, seed);
    SampleSet {
        records: chosen.into_iter().map(|i| records[i]).collect(),
        total,
    }
}
