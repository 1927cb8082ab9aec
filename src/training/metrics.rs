//! Training metrics for monitoring WGAN progress.

use std::path::Path;

/// Per-epoch losses and critic accuracy collected during training.
#[derive(Debug, Clone, Default)]
pub struct TrainingMetrics {
    /// Critic losses per epoch (average over critic steps)
    pub critic_losses: Vec<f64>,
    /// Critic accuracies per epoch
    pub critic_accuracies: Vec<f64>,
    /// Generator losses per epoch
    pub gen_losses: Vec<f64>,
}

impl TrainingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one epoch's values.
    pub fn record_epoch(&mut self, critic_loss: f64, critic_accuracy: f64, gen_loss: f64) {
        self.critic_losses.push(critic_loss);
        self.critic_accuracies.push(critic_accuracy);
        self.gen_losses.push(gen_loss);
    }

    pub fn num_epochs(&self) -> usize {
        self.gen_losses.len()
    }

    pub fn latest_gen_loss(&self) -> Option<f64> {
        self.gen_losses.last().copied()
    }

    pub fn latest_critic_loss(&self) -> Option<f64> {
        self.critic_losses.last().copied()
    }

    pub fn latest_critic_accuracy(&self) -> Option<f64> {
        self.critic_accuracies.last().copied()
    }

    /// Save metrics to a CSV file.
    pub fn save_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["epoch", "critic_loss", "critic_accuracy", "gen_loss"])?;
        for i in 0..self.num_epochs() {
            writer.write_record([
                i.to_string(),
                self.critic_losses[i].to_string(),
                self.critic_accuracies[i].to_string(),
                self.gen_losses[i].to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_metrics() {
        let mut metrics = TrainingMetrics::new();

        metrics.record_epoch(0.8, 0.6, 1.5);
        metrics.record_epoch(0.75, 0.65, 1.3);

        assert_eq!(metrics.num_epochs(), 2);
        assert_eq!(metrics.latest_gen_loss(), Some(1.3));
        assert_eq!(metrics.latest_critic_loss(), Some(0.75));
        assert_eq!(metrics.latest_critic_accuracy(), Some(0.65));
    }

    #[test]
    fn test_save_csv() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_epoch(0.8, 0.6, 1.5);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        metrics.save_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("epoch,critic_loss,critic_accuracy,gen_loss"));
        assert!(contents.contains("0,0.8,0.6,1.5"));
    }
}
