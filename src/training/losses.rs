//! Loss functions for WGAN training.

use tch::{Device, Kind, Tensor};

/// Wasserstein loss: `mean(y_true * y_pred)`.
///
/// Real records carry label -1 and generated records +1, so minimizing
/// this loss drives the critic's score up for real data and down for fake
/// data. The generator minimizes the same loss against the `valid` label,
/// pushing its output toward records the critic scores as real.
pub fn wasserstein_loss(y_true: &Tensor, y_pred: &Tensor) -> Tensor {
    (y_true * y_pred).mean(Kind::Float)
}

/// Label tensor for real records: `(batch_size, 1)` filled with -1.
pub fn valid_labels(batch_size: i64, device: Device) -> Tensor {
    Tensor::full(&[batch_size, 1], -1.0, (Kind::Float, device))
}

/// Label tensor for generated records: `(batch_size, 1)` filled with +1.
pub fn fake_labels(batch_size: i64, device: Device) -> Tensor {
    Tensor::full(&[batch_size, 1], 1.0, (Kind::Float, device))
}

/// Fraction of records the critic ranks on the correct side of zero.
///
/// Real records count as correct when scored above zero, generated ones
/// when scored below. Reported for monitoring only; the scores are not
/// probabilities.
pub fn critic_accuracy(real_scores: &Tensor, fake_scores: &Tensor) -> f64 {
    let real_correct = real_scores
        .gt(0.0)
        .to_kind(Kind::Float)
        .mean(Kind::Float)
        .double_value(&[]);
    let fake_correct = fake_scores
        .lt(0.0)
        .to_kind(Kind::Float)
        .mean(Kind::Float)
        .double_value(&[]);
    0.5 * (real_correct + fake_correct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasserstein_loss_valid_labels_negates_mean() {
        let predictions = Tensor::from_slice(&[1.0f32, -2.0, 3.0, 0.5]).view([4, 1]);
        let valid = valid_labels(4, Device::Cpu);

        let loss = wasserstein_loss(&valid, &predictions).double_value(&[]);
        assert!((loss - (-0.625)).abs() < 1e-6);
    }

    #[test]
    fn test_wasserstein_loss_fake_labels_keeps_mean() {
        let predictions = Tensor::from_slice(&[1.0f32, -2.0, 3.0, 0.5]).view([4, 1]);
        let fake = fake_labels(4, Device::Cpu);

        let loss = wasserstein_loss(&fake, &predictions).double_value(&[]);
        assert!((loss - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_label_shapes() {
        assert_eq!(valid_labels(4, Device::Cpu).size(), vec![4, 1]);
        assert_eq!(fake_labels(4, Device::Cpu).size(), vec![4, 1]);
    }

    #[test]
    fn test_critic_accuracy() {
        let real = Tensor::from_slice(&[1.0f32, -1.0]).view([2, 1]);
        let fake = Tensor::from_slice(&[-2.0f32, 3.0]).view([2, 1]);

        let acc = critic_accuracy(&real, &fake);
        assert!((acc - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_critic_accuracy() {
        let real = Tensor::from_slice(&[5.0f32, 2.0, 0.1]).view([3, 1]);
        let fake = Tensor::from_slice(&[-5.0f32, -2.0, -0.1]).view([3, 1]);

        assert!((critic_accuracy(&real, &fake) - 1.0).abs() < 1e-9);
    }
}
