//! Training module for the WGAN
//!
//! This module provides:
//! - The alternating critic/generator training loop
//! - The Wasserstein loss and label helpers
//! - Per-epoch training metrics

mod losses;
mod metrics;
mod trainer;

pub use losses::{critic_accuracy, fake_labels, valid_labels, wasserstein_loss};
pub use metrics::TrainingMetrics;
pub use trainer::Trainer;
