//! Configuration management.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WganError};

/// Hyper-parameters fixed at model construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Records per training batch
    pub batch_size: usize,
    /// Adam learning rate for both networks
    pub learning_rate: f64,
    /// Length of the latent noise vector
    pub noise_dim: i64,
    /// Width of each record
    pub data_dim: i64,
    /// Base width of the hidden layers
    pub layer_width: i64,
}

impl ModelParameters {
    /// Reject non-positive dimensions and rates.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(WganError::Config("batch_size must be > 0".to_string()));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(WganError::Config(
                "learning_rate must be a positive number".to_string(),
            ));
        }
        if self.noise_dim <= 0 {
            return Err(WganError::Config("noise_dim must be > 0".to_string()));
        }
        if self.data_dim <= 0 {
            return Err(WganError::Config("data_dim must be > 0".to_string()));
        }
        if self.layer_width <= 0 {
            return Err(WganError::Config("layer_width must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Arguments controlling one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainArguments {
    /// Prefix embedded in checkpoint file names
    pub cache_prefix: String,
    /// Number of training epochs
    pub epochs: usize,
    /// Checkpoint every N epochs
    pub sample_interval: usize,
}

impl TrainArguments {
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval == 0 {
            return Err(WganError::Config(
                "sample_interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// On-disk configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model hyper-parameters
    pub model: ModelParameters,
    /// Training run arguments
    pub train: TrainArguments,
    /// Critic updates per generator update
    pub n_critic: usize,
    /// Device: "cpu" or "cuda"
    pub device: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelParameters {
                batch_size: 128,
                learning_rate: 5e-4,
                noise_dim: 32,
                data_dim: 16,
                layer_width: 128,
            },
            train: TrainArguments {
                cache_prefix: "wgan".to_string(),
                epochs: 200,
                sample_interval: 10,
            },
            n_critic: 5,
            device: "cpu".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml(&self, path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_json(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the configured device, falling back to CPU.
    pub fn get_device(&self) -> tch::Device {
        match self.device.to_lowercase().as_str() {
            "cuda" | "gpu" => {
                if tch::Cuda::is_available() {
                    tch::Device::Cuda(0)
                } else {
                    tracing::warn!("CUDA requested but not available, falling back to CPU");
                    tch::Device::Cpu
                }
            }
            _ => tch::Device::Cpu,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.train.validate()?;
        if self.n_critic == 0 {
            return Err(WganError::Config("n_critic must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_critic, 5);
    }

    #[test]
    fn test_config_validation_rejects_zero_batch() {
        let mut config = Config::default();
        config.model.batch_size = 0;
        assert!(matches!(config.validate(), Err(WganError::Config(_))));
    }

    #[test]
    fn test_config_validation_rejects_zero_interval() {
        let mut config = Config::default();
        config.train.sample_interval = 0;
        assert!(matches!(config.validate(), Err(WganError::Config(_))));
    }

    #[test]
    fn test_model_parameters_reject_negative_rate() {
        let params = ModelParameters {
            batch_size: 4,
            learning_rate: -0.1,
            noise_dim: 2,
            data_dim: 3,
            layer_width: 8,
        };
        assert!(matches!(params.validate(), Err(WganError::Config(_))));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.model.noise_dim, loaded.model.noise_dim);
        assert_eq!(config.train.cache_prefix, loaded.train.cache_prefix);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&text).unwrap();

        assert_eq!(config.model.batch_size, loaded.model.batch_size);
        assert_eq!(config.device, loaded.device);
    }
}
