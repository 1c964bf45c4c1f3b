//! Feed-forward network model.
//!
//! A [`Network`] owns the layered topology for one training run: the layer
//! activations, the weight and bias matrices between them, and the target
//! output matrix. It is created from the corpus matrices, mutated in place
//! by the trainer, then serialized as an opaque snapshot; there is no
//! reload path.

pub mod trainer;

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::Matrix;

/// The logistic activation applied between layers.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A feed-forward network over one training corpus.
///
/// Invariants: `layers.len() == weights.len() + 1 == biases.len() + 1`;
/// `weights[i]` is `columns(layers[i]) × columns(layers[i+1])` and
/// `biases[i]` is `rows(layers[i]) × columns(layers[i+1])`. The first and
/// last layers carry one synthetic all-zero leading row standing in for a
/// bias unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Network {
    pub(crate) layers: Vec<Matrix>,
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Matrix>,
    pub(crate) output: Matrix,
    pub(crate) rate: f64,
    pub(crate) errors: Vec<f64>,
    pub(crate) time: f64,
    pub(crate) locale: String,
    pub(crate) trained_at: Option<DateTime<Utc>>,
}

impl Network {
    /// Create a network for the given training matrices.
    ///
    /// A zero bias row is prepended to both the input and output matrices;
    /// each hidden layer is zero-initialized with one row per (augmented)
    /// input row; weights and biases start as independent uniform values in
    /// `[-1, 1]`.
    pub fn new(
        locale: &str,
        rate: f64,
        inputs: Matrix,
        outputs: Matrix,
        hidden_widths: &[usize],
    ) -> Network {
        Self::with_rng(locale, rate, inputs, outputs, hidden_widths, &mut rand::rng())
    }

    /// Like [`Network::new`] but with a caller-supplied random source, so
    /// tests can fix the seed.
    pub fn with_rng<R: Rng + ?Sized>(
        locale: &str,
        rate: f64,
        inputs: Matrix,
        outputs: Matrix,
        hidden_widths: &[usize],
        rng: &mut R,
    ) -> Network {
        let input = prepend_zero_row(inputs);
        let output = prepend_zero_row(outputs);

        let mut layers = vec![input];
        for &width in hidden_widths {
            layers.push(Matrix::zeros(layers[0].rows(), width));
        }
        layers.push(output.clone());

        let mut weights = Vec::with_capacity(layers.len() - 1);
        let mut biases = Vec::with_capacity(layers.len() - 1);
        for i in 0..layers.len() - 1 {
            let columns = layers[i + 1].columns();
            weights.push(Matrix::random_with(layers[i].columns(), columns, rng));
            biases.push(Matrix::random_with(layers[i].rows(), columns, rng));
        }

        Network {
            layers,
            weights,
            biases,
            output,
            rate,
            errors: Vec::new(),
            time: 0.0,
            locale: locale.to_string(),
            trained_at: None,
        }
    }

    /// Propagate the input layer forward through every boundary:
    /// `layers[i+1] = sigmoid(layers[i] · weights[i] + biases[i])`.
    pub fn feed_forward(&mut self) -> Result<()> {
        for i in 0..self.layers.len() - 1 {
            let product = self.layers[i]
                .dot(&self.weights[i])?
                .add(&self.biases[i])?
                .map(sigmoid);

            self.layers[i + 1] = product;
        }

        Ok(())
    }

    /// Run a fresh forward pass and return the arithmetic mean of the
    /// signed differences `output − predicted` over all output cells.
    ///
    /// The mean is signed, not absolute: residuals of opposite sign cancel,
    /// so a near-zero value does not by itself certify good predictions.
    pub fn compute_error(&mut self) -> Result<f64> {
        self.feed_forward()?;
        let errors = self.output.sub(self.predicted())?;
        Ok(errors.mean())
    }

    /// The most recent activations of the final layer.
    pub fn predicted(&self) -> &Matrix {
        self.layers.last().expect("network always has layers")
    }

    /// The target output matrix (bias row included).
    pub fn output(&self) -> &Matrix {
        &self.output
    }

    /// The layer activations, input first.
    pub fn layers(&self) -> &[Matrix] {
        &self.layers
    }

    /// The weight matrices, one per layer boundary.
    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// The bias matrices, one per layer boundary.
    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    /// The learning rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The locale this network was trained for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Error samples collected during training.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Wall-clock training time in seconds, floored to two decimals.
    pub fn elapsed_seconds(&self) -> f64 {
        self.time
    }

    /// When training last completed, if it has.
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    /// Serialize the full network as a JSON structural dump.
    pub fn save_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Serialize the full network to a file, creating parent directories as
    /// needed.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        self.save_to(file)
    }
}

fn prepend_zero_row(matrix: Matrix) -> Matrix {
    let columns = matrix.columns();
    let mut rows = Vec::with_capacity(matrix.rows() + 1);
    rows.push(vec![0.0; columns]);
    rows.extend(matrix.into_rows());

    Matrix::from_rows(rows).expect("prepending a matching row keeps the matrix rectangular")
}
