//! Generator network.
//!
//! The generator transforms latent noise vectors into synthetic tabular
//! records. All randomness enters through the noise input; the forward
//! pass itself is deterministic given the weights.

use tch::{nn, nn::Module, Tensor};

/// Generator network
///
/// Architecture:
/// 1. Three dense layers of widths `dim`, `2*dim`, `4*dim` with ReLU
/// 2. A final linear projection to `data_dim` with no activation, so the
///    output range matches unscaled record values
#[derive(Debug)]
pub struct Generator {
    noise_dim: i64,
    data_dim: i64,
    fc1: nn::Linear,
    fc2: nn::Linear,
    fc3: nn::Linear,
    out: nn::Linear,
}

impl Generator {
    /// Create a new Generator network rooted at `vs`.
    pub fn new(vs: &nn::Path, noise_dim: i64, data_dim: i64, dim: i64) -> Self {
        let fc1 = nn::linear(vs / "fc1", noise_dim, dim, Default::default());
        let fc2 = nn::linear(vs / "fc2", dim, dim * 2, Default::default());
        let fc3 = nn::linear(vs / "fc3", dim * 2, dim * 4, Default::default());
        let out = nn::linear(vs / "out", dim * 4, data_dim, Default::default());

        Self {
            noise_dim,
            data_dim,
            fc1,
            fc2,
            fc3,
            out,
        }
    }

    /// Forward pass: `(batch, noise_dim)` -> `(batch, data_dim)`.
    pub fn forward(&self, noise: &Tensor) -> Tensor {
        let x = self.fc1.forward(noise).relu();
        let x = self.fc2.forward(&x).relu();
        let x = self.fc3.forward(&x).relu();
        self.out.forward(&x)
    }

    pub fn noise_dim(&self) -> i64 {
        self.noise_dim
    }

    pub fn data_dim(&self) -> i64 {
        self.data_dim
    }
}

impl Module for Generator {
    fn forward(&self, xs: &Tensor) -> Tensor {
        Generator::forward(self, xs)
    }
}
