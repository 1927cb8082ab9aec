//! Training loop for the WGAN.
//!
//! Runs the alternating schedule: `n_critic` critic updates, then one
//! generator update, once per epoch. The critic is trained closer to
//! optimality before each generator step so its loss approximates the
//! Earth-Mover distance (arXiv:1701.07875).

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;
use tch::{Device, Kind, Tensor};
use tracing::{info, warn};

use crate::data::{BatchSampler, TabularDataset};
use crate::error::Result;
use crate::model::Wgan;
use crate::utils::checkpoint;
use crate::utils::config::TrainArguments;

use super::losses::{critic_accuracy, fake_labels, valid_labels, wasserstein_loss};
use super::metrics::TrainingMetrics;

/// WGAN trainer
///
/// Owns the run arguments and collected metrics; the model and its
/// optimizers are borrowed for the duration of [`Trainer::train`].
pub struct Trainer {
    args: TrainArguments,
    cache_dir: PathBuf,
    metrics: TrainingMetrics,
}

impl Trainer {
    /// Create a trainer writing checkpoints to the default cache directory.
    pub fn new(args: TrainArguments) -> Self {
        Self {
            args,
            cache_dir: PathBuf::from(checkpoint::DEFAULT_CACHE_DIR),
            metrics: TrainingMetrics::new(),
        }
    }

    /// Write checkpoints somewhere other than the default directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn into_metrics(self) -> TrainingMetrics {
        self.metrics
    }

    /// Train `model` on `data` for the configured number of epochs.
    ///
    /// Each epoch runs `n_critic` critic updates followed by one generator
    /// update; checkpoints are written whenever
    /// `epoch % sample_interval == 0`. Any failure aborts the run.
    pub fn train(&mut self, model: &mut Wgan, data: &TabularDataset) -> Result<()> {
        self.args.validate()?;

        let mut gen_opt = model.gen_optimizer()?;
        let mut critic_opt = model.critic_optimizer()?;

        let batch_size = model.params().batch_size;
        let noise_dim = model.params().noise_dim;
        let n_critic = model.n_critic();
        let device = model.device();

        let sampler = BatchSampler::new(batch_size);
        // Adversarial ground truths, constant across the whole run.
        let valid = valid_labels(batch_size as i64, device);
        let fake = fake_labels(batch_size as i64, device);

        info!(
            "Starting training for {} epochs ({} critic steps per generator step)",
            self.args.epochs, n_critic
        );

        let pb = ProgressBar::new(self.args.epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );

        let mut step = 0;
        for epoch in 0..self.args.epochs {
            let mut critic_loss = 0.0;
            let mut acc = 0.0;

            for _ in 0..n_critic {
                // ========== Critic phase ==========
                let real = batch_to_tensor(&sampler.sample(data, step), device);
                step += 1;

                let noise = Tensor::randn([batch_size as i64, noise_dim], (Kind::Float, device));
                // The generator only supplies data here; it is updated in
                // its own phase.
                let gen_records = model.generator.forward(&noise).detach();

                // One step on the real batch against the valid label.
                let real_scores = model.critic.forward_t(&real, true);
                let loss_real = wasserstein_loss(&valid, &real_scores);
                critic_opt.zero_grad();
                loss_real.backward();
                critic_opt.step();
                model.constrain_critic();

                // One step on the generated batch against the fake label.
                let fake_scores = model.critic.forward_t(&gen_records, true);
                let loss_fake = wasserstein_loss(&fake, &fake_scores);
                critic_opt.zero_grad();
                loss_fake.backward();
                critic_opt.step();
                model.constrain_critic();

                critic_loss += 0.5 * (loss_real.double_value(&[]) + loss_fake.double_value(&[]));
                acc += critic_accuracy(&real_scores, &fake_scores);
            }

            let critic_loss = critic_loss / n_critic as f64;
            let acc = acc / n_critic as f64;

            // ========== Generator phase ==========
            // The critic only scores here; no optimizer owns its weights.
            let noise = Tensor::randn([batch_size as i64, noise_dim], (Kind::Float, device));
            let gen_records = model.generator.forward(&noise);
            let scores = model.critic.frozen().forward(&gen_records);
            let g_loss = wasserstein_loss(&valid, &scores);
            gen_opt.zero_grad();
            g_loss.backward();
            gen_opt.step();
            let gen_loss = g_loss.double_value(&[]);

            self.metrics.record_epoch(critic_loss, acc, gen_loss);
            info!(
                "Epoch {}/{}: critic_loss={:.4}, critic_acc={:.2}%, gen_loss={:.4}",
                epoch,
                self.args.epochs,
                critic_loss,
                acc * 100.0,
                gen_loss
            );

            if epoch % self.args.sample_interval == 0 {
                checkpoint::save_checkpoint(model, &self.cache_dir, &self.args.cache_prefix, epoch)?;
            }

            pb.set_message(format!("D: {critic_loss:.4}, G: {gen_loss:.4}"));
            pb.inc(1);
        }

        pb.finish_with_message("done");

        let metrics_path = self
            .cache_dir
            .join(format!("{}_training_metrics.csv", self.args.cache_prefix));
        if let Err(e) = self.metrics.save_csv(&metrics_path) {
            warn!("Failed to save metrics: {}", e);
        }

        Ok(())
    }
}

/// Convert a row-major host batch into a float tensor on `device`.
fn batch_to_tensor(batch: &Array2<f64>, device: Device) -> Tensor {
    let (rows, cols) = batch.dim();
    let flat: Vec<f64> = batch.iter().copied().collect();
    Tensor::from_slice(&flat)
        .view([rows as i64, cols as i64])
        .to_kind(Kind::Float)
        .to_device(device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainer_defaults_to_cache_dir() {
        let args = TrainArguments {
            cache_prefix: "run".to_string(),
            epochs: 1,
            sample_interval: 1,
        };
        let trainer = Trainer::new(args);
        assert_eq!(trainer.cache_dir, PathBuf::from(checkpoint::DEFAULT_CACHE_DIR));
    }

    #[test]
    fn test_batch_to_tensor_shape_and_values() {
        let batch = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let tensor = batch_to_tensor(&batch, Device::Cpu);

        assert_eq!(tensor.size(), vec![2, 3]);
        assert!((tensor.double_value(&[1, 2]) - 6.0).abs() < 1e-6);
    }
}
