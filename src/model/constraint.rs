//! Weight constraints applied to the critic after optimizer updates.

use serde::{Deserialize, Serialize};
use tch::{nn, Tensor};

/// Default clip magnitude for critic weights.
pub const DEFAULT_CLIP_VALUE: f64 = 0.01;

/// A constraint re-applied to a weight tensor after each optimizer step.
///
/// Optimizer steps do not enforce constraints on their own; the trainer
/// must invoke the constraint after every update. Implementations are pure
/// and return the constrained tensor without touching the input.
pub trait PostUpdateConstraint {
    /// Return the constrained version of `weights`.
    fn apply(&self, weights: &Tensor) -> Tensor;
}

/// Clips every weight elementwise into the hypercube `[-clip_value, clip_value]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipConstraint {
    clip_value: f64,
}

impl ClipConstraint {
    pub fn new(clip_value: f64) -> Self {
        Self { clip_value }
    }

    pub fn clip_value(&self) -> f64 {
        self.clip_value
    }
}

impl Default for ClipConstraint {
    fn default() -> Self {
        Self::new(DEFAULT_CLIP_VALUE)
    }
}

impl PostUpdateConstraint for ClipConstraint {
    fn apply(&self, weights: &Tensor) -> Tensor {
        weights.clamp(-self.clip_value, self.clip_value)
    }
}

/// Apply `constraint` to every trainable tensor in `vs`, in place.
///
/// Runs outside gradient tracking so the overwrite is invisible to autograd.
pub fn constrain_vars(vs: &nn::VarStore, constraint: &dyn PostUpdateConstraint) {
    tch::no_grad(|| {
        for mut var in vs.trainable_variables() {
            let bounded = constraint.apply(&var);
            var.copy_(&bounded);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::{nn::VarStore, Device, Kind};

    #[test]
    fn test_clip_bounds_values() {
        let constraint = ClipConstraint::new(0.01);
        let weights = Tensor::from_slice(&[0.5f32, -0.5, 0.005, -0.003]);
        let clipped = constraint.apply(&weights);

        let values: Vec<f32> = clipped.try_into().unwrap();
        assert_eq!(values, vec![0.01, -0.01, 0.005, -0.003]);
    }

    #[test]
    fn test_default_clip_value() {
        let constraint = ClipConstraint::default();
        assert_eq!(constraint.clip_value(), 0.01);
    }

    #[test]
    fn test_clip_config_roundtrip() {
        let constraint = ClipConstraint::new(0.02);
        let json = serde_json::to_string(&constraint).unwrap();
        assert_eq!(json, r#"{"clip_value":0.02}"#);

        let restored: ClipConstraint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.clip_value(), 0.02);
    }

    #[test]
    fn test_apply_is_pure() {
        let constraint = ClipConstraint::new(0.01);
        let weights = Tensor::from_slice(&[1.0f32, -1.0]);
        let _ = constraint.apply(&weights);

        let untouched: Vec<f32> = weights.try_into().unwrap();
        assert_eq!(untouched, vec![1.0, -1.0]);
    }

    #[test]
    fn test_constrain_vars_clips_store() {
        let vs = VarStore::new(Device::Cpu);
        let init = Tensor::randn([6, 4], (Kind::Float, Device::Cpu)) * 3.0;
        let _var = vs.root().var_copy("w", &init);

        constrain_vars(&vs, &ClipConstraint::new(0.01));

        for var in vs.trainable_variables() {
            let max_abs = var.abs().max().double_value(&[]);
            assert!(max_abs <= 0.01 + 1e-8);
        }
    }
}
