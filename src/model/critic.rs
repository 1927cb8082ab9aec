//! Critic network.
//!
//! The critic maps a record to an unbounded scalar score. Higher scores
//! mean "more real"; the output is not a probability, which is what makes
//! the Wasserstein objective applicable.

use tch::{nn, nn::Module, nn::ModuleT, Tensor};

/// Dropout rate applied after the first two hidden layers.
pub const CRITIC_DROPOUT: f64 = 0.1;

/// Critic network
///
/// Architecture:
/// 1. Three dense layers of widths `4*dim`, `2*dim`, `dim` with ReLU,
///    dropout after the first two
/// 2. A final linear projection to a single score with no activation
#[derive(Debug)]
pub struct Critic {
    dropout: f64,
    fc1: nn::Linear,
    fc2: nn::Linear,
    fc3: nn::Linear,
    out: nn::Linear,
}

impl Critic {
    /// Create a new Critic network rooted at `vs`.
    pub fn new(vs: &nn::Path, data_dim: i64, dim: i64) -> Self {
        let fc1 = nn::linear(vs / "fc1", data_dim, dim * 4, Default::default());
        let fc2 = nn::linear(vs / "fc2", dim * 4, dim * 2, Default::default());
        let fc3 = nn::linear(vs / "fc3", dim * 2, dim, Default::default());
        let out = nn::linear(vs / "out", dim, 1, Default::default());

        Self {
            dropout: CRITIC_DROPOUT,
            fc1,
            fc2,
            fc3,
            out,
        }
    }

    /// Forward pass: `(batch, data_dim)` -> `(batch, 1)` scores.
    ///
    /// `train` controls dropout only; weights are never changed here.
    pub fn forward_t(&self, records: &Tensor, train: bool) -> Tensor {
        let x = self.fc1.forward(records).relu();
        let x = x.dropout(self.dropout, train);
        let x = self.fc2.forward(&x).relu();
        let x = x.dropout(self.dropout, train);
        let x = self.fc3.forward(&x).relu();
        self.out.forward(&x)
    }

    /// Score records with dropout disabled.
    pub fn score(&self, records: &Tensor) -> Tensor {
        self.forward_t(records, false)
    }

    /// Forward-only view of this critic for the generator phase.
    pub fn frozen(&self) -> FrozenCritic<'_> {
        FrozenCritic { critic: self }
    }
}

impl ModuleT for Critic {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        Critic::forward_t(self, xs, train)
    }
}

/// Evaluation-only handle to a critic.
///
/// Gradients still flow through the forward pass so the generator can
/// learn from the critic's judgment, but no optimizer owns these weights
/// while the view is in use, so they cannot change.
pub struct FrozenCritic<'a> {
    critic: &'a Critic,
}

impl FrozenCritic<'_> {
    /// Score records in training mode (dropout active, weights fixed).
    pub fn forward(&self, records: &Tensor) -> Tensor {
        self.critic.forward_t(records, true)
    }
}
