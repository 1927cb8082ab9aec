//! Deterministic batch sampling.
//!
//! The sampler walks the dataset in shuffled-epoch order: a monotonically
//! increasing step counter selects a window into a permutation of the row
//! indices, and the permutation is derived from the epoch number alone.
//! Any step can therefore be replayed in isolation and the whole schedule
//! is reproducible without shared random state.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::dataset::TabularDataset;

/// Seed-driven batch partitioner over a [`TabularDataset`].
#[derive(Debug, Clone)]
pub struct BatchSampler {
    batch_size: usize,
}

impl BatchSampler {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of steps needed to visit every row at least once.
    pub fn steps_per_epoch(&self, num_rows: usize) -> usize {
        num_rows.div_ceil(self.batch_size)
    }

    /// Row indices selected for `step`.
    ///
    /// The permutation is recomputed from the epoch number on every call,
    /// so all steps of one epoch see an identical shuffle. The permuted
    /// sequence is cycled, which keeps the window well-defined even when
    /// it runs past the end of the index set or when `batch_size` exceeds
    /// `num_rows`.
    pub fn batch_indices(&self, num_rows: usize, step: usize) -> Vec<usize> {
        let start = (self.batch_size * step) % num_rows;
        let shuffle_epoch = (self.batch_size * step) / num_rows;

        let mut indices: Vec<usize> = (0..num_rows).collect();
        let mut rng = StdRng::seed_from_u64(shuffle_epoch as u64);
        indices.shuffle(&mut rng);

        indices
            .iter()
            .copied()
            .cycle()
            .skip(start)
            .take(self.batch_size)
            .collect()
    }

    /// Materialize the batch for `step` as a `(batch_size, data_dim)` matrix.
    pub fn sample(&self, dataset: &TabularDataset, step: usize) -> Array2<f64> {
        let indices = self.batch_indices(dataset.len(), step);

        let mut batch = Array2::<f64>::zeros((self.batch_size, dataset.data_dim()));
        for (row, &index) in indices.iter().enumerate() {
            batch.row_mut(row).assign(&dataset.row(index));
        }
        batch
    }
}
