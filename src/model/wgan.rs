//! WGAN wrapper combining the generator and critic.
//!
//! Owns both networks and their variable stores, builds their optimizers
//! and handles weight snapshots.

use std::path::Path;

use tch::{nn, nn::VarStore, Device, Kind, Tensor};

use crate::data::TabularDataset;
use crate::error::{Result, WganError};
use crate::training::{Trainer, TrainingMetrics};
use crate::utils::checkpoint;
use crate::utils::config::{ModelParameters, TrainArguments};

use super::constraint::{constrain_vars, ClipConstraint};
use super::critic::Critic;
use super::generator::Generator;

// Adam moments used for both networks, per the original WGAN training
// setup (arXiv:1701.07875).
const ADAM_BETA1: f64 = 0.5;
const ADAM_BETA2: f64 = 0.9;

/// Complete WGAN model
///
/// Generator and critic weights live in separate variable stores, so each
/// optimizer can only ever move its own network's parameters.
pub struct Wgan {
    params: ModelParameters,
    n_critic: usize,
    /// Generator network
    pub generator: Generator,
    /// Critic network
    pub critic: Critic,
    /// Variable store for generator weights
    pub gen_vs: VarStore,
    /// Variable store for critic weights
    pub critic_vs: VarStore,
    constraint: ClipConstraint,
    device: Device,
}

impl Wgan {
    /// Create a new WGAN model.
    ///
    /// `n_critic` is the number of critic updates per generator update.
    /// Fails with a configuration error when any dimension is non-positive
    /// or `n_critic` is zero.
    pub fn new(params: ModelParameters, n_critic: usize, device: Device) -> Result<Self> {
        params.validate()?;
        if n_critic == 0 {
            return Err(WganError::Config(
                "n_critic must be at least 1".to_string(),
            ));
        }

        let gen_vs = VarStore::new(device);
        let critic_vs = VarStore::new(device);

        let generator = Generator::new(
            &gen_vs.root(),
            params.noise_dim,
            params.data_dim,
            params.layer_width,
        );
        let critic = Critic::new(&critic_vs.root(), params.data_dim, params.layer_width);

        Ok(Self {
            params,
            n_critic,
            generator,
            critic,
            gen_vs,
            critic_vs,
            constraint: ClipConstraint::default(),
            device,
        })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn n_critic(&self) -> usize {
        self.n_critic
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn clip_constraint(&self) -> &ClipConstraint {
        &self.constraint
    }

    /// Build the generator optimizer.
    pub fn gen_optimizer(&self) -> Result<nn::Optimizer> {
        let opt = nn::Adam {
            beta1: ADAM_BETA1,
            beta2: ADAM_BETA2,
            wd: 0.0,
        }
        .build(&self.gen_vs, self.params.learning_rate)?;
        Ok(opt)
    }

    /// Build the critic optimizer.
    pub fn critic_optimizer(&self) -> Result<nn::Optimizer> {
        let opt = nn::Adam {
            beta1: ADAM_BETA1,
            beta2: ADAM_BETA2,
            wd: 0.0,
        }
        .build(&self.critic_vs, self.params.learning_rate)?;
        Ok(opt)
    }

    /// Clamp every trainable critic tensor back into the clip hypercube.
    ///
    /// Must be called after each critic optimizer step; the step itself
    /// does not enforce the constraint.
    pub fn constrain_critic(&mut self) {
        constrain_vars(&self.critic_vs, &self.constraint);
    }

    /// Generate `num_samples` synthetic records from fresh noise.
    pub fn generate(&self, num_samples: i64) -> Tensor {
        let noise = Tensor::randn(
            [num_samples, self.params.noise_dim],
            (Kind::Float, self.device),
        );
        self.generator.forward(&noise)
    }

    /// Generate records from caller-supplied noise of shape `(n, noise_dim)`.
    pub fn generate_from_noise(&self, noise: &Tensor) -> Tensor {
        self.generator.forward(noise)
    }

    /// Train on `data`, writing checkpoints per `args.sample_interval`.
    ///
    /// Checkpoints land in the default cache directory; use a [`Trainer`]
    /// directly to redirect them.
    pub fn train(&mut self, data: &TabularDataset, args: &TrainArguments) -> Result<TrainingMetrics> {
        let mut trainer = Trainer::new(args.clone());
        trainer.train(self, data)?;
        Ok(trainer.into_metrics())
    }

    /// Save weight snapshots for both networks.
    pub fn save(&self, gen_path: &Path, critic_path: &Path) -> Result<()> {
        self.gen_vs.save(gen_path)?;
        self.critic_vs.save(critic_path)?;
        Ok(())
    }

    /// Restore the generator from the most recent snapshot in `dir`.
    ///
    /// `dir` must be an existing directory holding at least one generator
    /// weight file; anything else is a configuration error. The restored
    /// generator replaces the current one and is returned for further
    /// sampling.
    pub fn load(&mut self, dir: &Path) -> Result<&Generator> {
        if !dir.is_dir() {
            return Err(WganError::Config(format!(
                "load path must be an existing directory: {}",
                dir.display()
            )));
        }

        let weights = checkpoint::latest_generator_weights(dir)?;
        let mut vs = VarStore::new(self.device);
        let generator = Generator::new(
            &vs.root(),
            self.params.noise_dim,
            self.params.data_dim,
            self.params.layer_width,
        );
        vs.load(&weights)?;

        self.generator = generator;
        self.gen_vs = vs;
        Ok(&self.generator)
    }
}
