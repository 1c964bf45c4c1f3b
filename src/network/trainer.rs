//! Back-propagation trainer.
//!
//! The trainer drives a fixed number of full-batch iterations over one
//! [`Network`]: forward pass, per-boundary derivatives computed from the
//! last layer backward, then rate-scaled weight and bias updates. Error
//! samples are collected at a fixed cadence so the snapshot carries a
//! training curve.

use std::time::Instant;

use chrono::Utc;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::network::Network;

/// Number of error samples collected across a training run.
const ERROR_SAMPLES: usize = 20;

/// The gradient pair computed at one layer boundary during one iteration.
///
/// `delta` feeds the bias update (and the next boundary's derivatives);
/// `adjustment` feeds the weight update. Both are transient and dropped at
/// the end of the iteration.
#[derive(Clone, Debug)]
pub struct Derivative {
    /// Gradient with respect to the boundary's pre-activations.
    pub delta: Matrix,
    /// Gradient with respect to the boundary's weights.
    pub adjustment: Matrix,
}

/// Fixed-iteration back-propagation trainer.
#[derive(Clone, Copy, Debug)]
pub struct Trainer {
    iterations: usize,
}

impl Trainer {
    /// The iteration budget used by the control endpoint.
    pub const DEFAULT_ITERATIONS: usize = 200;

    /// Create a trainer with the given iteration budget.
    pub fn new(iterations: usize) -> Self {
        Trainer { iterations }
    }

    /// The configured iteration budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the training loop to completion, recording error samples and the
    /// elapsed wall-clock seconds on the network.
    ///
    /// Any shape mismatch aborts the run; the network is left partially
    /// updated and must not be persisted by the caller.
    pub fn train(&self, network: &mut Network) -> Result<()> {
        let start = Instant::now();

        log::info!(
            "training the {} neural network for {} iterations",
            network.locale,
            self.iterations
        );

        // A budget below the sample count would otherwise divide to zero.
        let sample_every = (self.iterations / ERROR_SAMPLES).max(1);

        for i in 0..self.iterations {
            network.feed_forward()?;
            self.feed_backward(network)?;

            if i % sample_every == 0 {
                let error = network.compute_error()?;
                network.errors.push(error);
            }
        }

        let final_error = network.compute_error()?;
        network.time = (start.elapsed().as_secs_f64() * 100.0).floor() / 100.0;
        network.trained_at = Some(Utc::now());

        log::info!(
            "training finished in {}s with error rate {:.5}",
            network.time,
            final_error
        );

        Ok(())
    }

    /// One backward pass: derivatives for every boundary, last first, then
    /// the matching updates.
    fn feed_backward(&self, network: &mut Network) -> Result<()> {
        let mut derivatives = vec![self.last_layer_derivatives(network)?];

        for i in 0..network.layers.len().saturating_sub(2) {
            let derivative = self.hidden_layer_derivatives(network, i, &derivatives)?;
            derivatives.push(derivative);
        }

        self.adjust(network, &derivatives)
    }

    /// Derivatives at the output boundary.
    ///
    /// `cost` is the signed residual `output − predicted`; the logistic
    /// gradient `a ⊙ (1 − a)` scales it onto the pre-activations.
    fn last_layer_derivatives(&self, network: &Network) -> Result<Derivative> {
        let l = network.layers.len() - 1;
        let last = &network.layers[l];

        let cost = network.output.sub(last)?;
        let sigmoid_gradient = last.hadamard(&last.map(|x| 1.0 - x))?;

        let delta = cost.scale(2.0).hadamard(&sigmoid_gradient)?;
        let adjustment = network.layers[l - 1].transpose().dot(&delta)?;

        Ok(Derivative { delta, adjustment })
    }

    /// Derivatives at the `i`-th boundary walking backward from the output.
    fn hidden_layer_derivatives(
        &self,
        network: &Network,
        i: usize,
        derivatives: &[Derivative],
    ) -> Result<Derivative> {
        let l = network.layers.len() - 2 - i;
        let layer = &network.layers[l];

        let sigmoid_gradient = layer.hadamard(&layer.map(|x| 1.0 - x))?;
        let delta = derivatives[i]
            .delta
            .dot(&network.weights[l].transpose())?
            .hadamard(&sigmoid_gradient)?;
        let adjustment = network.layers[l - 1].transpose().dot(&delta)?;

        Ok(Derivative { delta, adjustment })
    }

    /// Apply the rate-scaled updates.
    ///
    /// Derivatives arrive last-boundary-first, so index `i` maps back to
    /// boundary `len − 1 − i`.
    fn adjust(&self, network: &mut Network, derivatives: &[Derivative]) -> Result<()> {
        for (i, derivative) in derivatives.iter().enumerate() {
            let l = derivatives.len() - 1 - i;

            network.weights[l] = network.weights[l].add(&derivative.adjustment.scale(network.rate))?;
            network.biases[l] = network.biases[l].add(&derivative.delta.scale(network.rate))?;
        }

        Ok(())
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Trainer::new(Self::DEFAULT_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn toy_network() -> Network {
        let inputs = Matrix::from_rows(vec![
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let outputs = Matrix::from_rows(vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ])
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        Network::with_rng("en", 0.1, inputs, outputs, &[6], &mut rng)
    }

    fn mean_absolute_output_error(network: &mut Network) -> f64 {
        network.feed_forward().unwrap();
        let diff = network.output().sub(network.predicted()).unwrap();
        diff.map(f64::abs).mean()
    }

    #[test]
    fn test_derivative_shapes() {
        let mut network = toy_network();
        network.feed_forward().unwrap();

        let trainer = Trainer::default();
        let last = trainer.last_layer_derivatives(&network).unwrap();
        assert_eq!(last.delta.rows(), network.output().rows());
        assert_eq!(last.delta.columns(), network.output().columns());
        assert_eq!(last.adjustment.rows(), network.weights()[1].rows());
        assert_eq!(last.adjustment.columns(), network.weights()[1].columns());

        let hidden = trainer
            .hidden_layer_derivatives(&network, 0, &[last])
            .unwrap();
        assert_eq!(hidden.adjustment.rows(), network.weights()[0].rows());
        assert_eq!(hidden.adjustment.columns(), network.weights()[0].columns());
    }

    #[test]
    fn test_adjust_moves_weights() {
        let mut network = toy_network();
        network.feed_forward().unwrap();
        let before = network.weights()[1].clone();

        let trainer = Trainer::default();
        trainer.feed_backward(&mut network).unwrap();

        assert_ne!(network.weights()[1], before);
    }

    #[test]
    fn test_training_reduces_absolute_error() {
        let mut network = toy_network();
        let before = mean_absolute_output_error(&mut network);

        Trainer::new(200).train(&mut network).unwrap();

        let after = mean_absolute_output_error(&mut network);
        assert!(
            after < before,
            "expected error to shrink: before={before}, after={after}"
        );
    }

    #[test]
    fn test_error_sampling_cadence() {
        let mut network = toy_network();
        Trainer::new(200).train(&mut network).unwrap();

        assert_eq!(network.errors().len(), 20);
        assert!(network.elapsed_seconds() >= 0.0);
        assert!(network.trained_at().is_some());
    }

    #[test]
    fn test_small_iteration_budget_is_guarded() {
        let mut network = toy_network();
        Trainer::new(10).train(&mut network).unwrap();

        // Sampling falls back to every iteration instead of dividing by zero.
        assert_eq!(network.errors().len(), 10);
    }
}
