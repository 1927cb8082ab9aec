//! # WGAN for Tabular Data
//!
//! This crate trains a Wasserstein GAN (with weight clipping) on tabular
//! numeric records and samples synthetic records from the learned
//! distribution.
//!
//! ## Modules
//!
//! - `data`: in-memory tabular dataset and deterministic batch sampling
//! - `model`: generator and critic networks plus the WGAN wrapper
//! - `training`: training loop, Wasserstein loss and metrics
//! - `utils`: configuration and checkpoint handling

pub mod data;
pub mod error;
pub mod model;
pub mod training;
pub mod utils;

pub use data::{BatchSampler, TabularDataset};
pub use error::{Result, WganError};
pub use model::{ClipConstraint, Critic, FrozenCritic, Generator, PostUpdateConstraint, Wgan};
pub use training::{wasserstein_loss, Trainer, TrainingMetrics};
pub use utils::{Config, ModelParameters, TrainArguments};
