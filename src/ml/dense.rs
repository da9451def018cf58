//! Dense classifier inference (CPU-only).
//!
//! The screening artifacts are small MLPs exported to JSON: layer weights,
//! optional z-score input normalization, and a decision threshold. Shapes are
//! validated eagerly so a corrupt artifact fails at load rather than inside a
//! submission.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VitalisError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
    Tanh,
    Sigmoid,
}

impl Default for Activation {
    fn default() -> Self {
        Self::Linear
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weights shape: [out_dim][in_dim]
    pub weights: Vec<Vec<f64>>,
    /// Bias shape: [out_dim]
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn in_dim(&self) -> usize {
        self.weights.first().map(|r| r.len()).unwrap_or(0)
    }

    fn out_dim(&self) -> usize {
        self.weights.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseClassifier {
    /// Expected input dimension (one slot per form field).
    pub input_dim: usize,

    /// Optional z-score normalization baked in at export time.
    #[serde(default)]
    pub input_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub input_std: Option<Vec<f64>>,

    pub layers: Vec<DenseLayer>,

    /// Decision threshold for single-output networks.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Optional free-form metadata (versioning, training info, etc).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

fn default_threshold() -> f64 {
    0.5
}

impl DenseClassifier {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let model: Self = serde_json::from_str(&content)?;
        model.validate().map_err(VitalisError::Validation)?;
        Ok(model)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input_dim == 0 {
            return Err("input_dim must be > 0".to_string());
        }
        if self.layers.is_empty() {
            return Err("layers must not be empty".to_string());
        }
        if !self.threshold.is_finite() {
            return Err("threshold must be finite".to_string());
        }
        if let (Some(mean), Some(std)) = (&self.input_mean, &self.input_std) {
            if mean.len() != self.input_dim {
                return Err(format!(
                    "input_mean length {} != input_dim {}",
                    mean.len(),
                    self.input_dim
                ));
            }
            if std.len() != self.input_dim {
                return Err(format!(
                    "input_std length {} != input_dim {}",
                    std.len(),
                    self.input_dim
                ));
            }
            if std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err("input_std must be finite and > 0".to_string());
            }
        } else if self.input_mean.is_some() || self.input_std.is_some() {
            return Err("input_mean and input_std must be provided together".to_string());
        }

        let mut expected_in = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.out_dim() == 0 {
                return Err(format!("layer[{idx}] out_dim must be > 0"));
            }
            if layer.bias.len() != layer.out_dim() {
                return Err(format!(
                    "layer[{idx}] bias len {} != out_dim {}",
                    layer.bias.len(),
                    layer.out_dim()
                ));
            }
            for (r, row) in layer.weights.iter().enumerate() {
                if row.len() != expected_in {
                    return Err(format!(
                        "layer[{idx}] weights row {r} len {} != expected in_dim {expected_in}",
                        row.len()
                    ));
                }
                if row.iter().any(|v| !v.is_finite()) {
                    return Err(format!("layer[{idx}] weights contain non-finite values"));
                }
            }
            if layer.bias.iter().any(|v| !v.is_finite()) {
                return Err(format!("layer[{idx}] bias contain non-finite values"));
            }
            expected_in = layer.out_dim();
        }

        // Binary classifiers only: one probability output or two class scores.
        let out = self.layers.last().map(|l| l.out_dim()).unwrap_or(0);
        if out != 1 && out != 2 {
            return Err(format!("final layer out_dim must be 1 or 2, got {out}"));
        }
        Ok(())
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.out_dim()).unwrap_or(0)
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_dim {
            return Err(VitalisError::Validation(format!(
                "DenseClassifier input dim mismatch: got {}, expected {}",
                input.len(),
                self.input_dim
            )));
        }

        let mut x: Vec<f64> = input.to_vec();

        if let (Some(mean), Some(std)) = (&self.input_mean, &self.input_std) {
            for i in 0..x.len() {
                let denom = std[i].max(1e-12);
                x[i] = (x[i] - mean[i]) / denom;
            }
        }

        for layer in &self.layers {
            let out_dim = layer.out_dim();
            let in_dim = layer.in_dim();

            let mut y = vec![0.0_f64; out_dim];
            for o in 0..out_dim {
                let mut sum = layer.bias[o];
                // weights[o] is the o-th row (len = in_dim)
                let row = &layer.weights[o];
                debug_assert_eq!(row.len(), in_dim);
                for i in 0..in_dim {
                    sum += row[i] * x[i];
                }
                y[o] = apply_activation(sum, layer.activation);
            }
            x = y;
        }

        Ok(x)
    }

    /// Run the network and collapse its output to a 0/1 class label.
    ///
    /// Single-output networks threshold the score; two-output networks take
    /// the argmax. A non-finite score (garbage input, degenerate weights) is
    /// a prediction error, not a silent negative.
    pub fn predict_label(&self, input: &[f64]) -> Result<f64> {
        let out = self.forward(input)?;
        if out.iter().any(|v| !v.is_finite()) {
            return Err(VitalisError::Prediction(format!(
                "classifier produced non-finite output: {out:?}"
            )));
        }
        match out.as_slice() {
            [score] => Ok(if *score >= self.threshold { 1.0 } else { 0.0 }),
            [neg, pos] => Ok(if pos > neg { 1.0 } else { 0.0 }),
            other => Err(VitalisError::Prediction(format!(
                "classifier output dim must be 1 or 2, got {}",
                other.len()
            ))),
        }
    }
}

fn apply_activation(x: f64, act: Activation) -> f64 {
    match act {
        Activation::Linear => x,
        Activation::Relu => x.max(0.0),
        Activation::Tanh => x.tanh(),
        Activation::Sigmoid => sigmoid(x),
    }
}

fn sigmoid(x: f64) -> f64 {
    // Numerically-stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigmoid_net(weights: Vec<f64>, bias: f64) -> DenseClassifier {
        let dim = weights.len();
        DenseClassifier {
            input_dim: dim,
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights: vec![weights],
                bias: vec![bias],
                activation: Activation::Sigmoid,
            }],
            threshold: 0.5,
            metadata: serde_json::json!({}),
        }
    }

    #[test]
    fn forward_sigmoid_midpoint() {
        let net = sigmoid_net(vec![1.0, 2.0], 0.0);
        net.validate().unwrap();

        let p0 = net.forward(&[0.0, 0.0]).unwrap();
        assert!((p0[0] - 0.5).abs() < 1e-12);

        let p1 = net.forward(&[1.0, 0.0]).unwrap();
        assert!(p1[0] > 0.5);
    }

    #[test]
    fn predict_label_thresholds_single_output() {
        let net = sigmoid_net(vec![10.0], 0.0);
        assert_eq!(net.predict_label(&[1.0]).unwrap(), 1.0);
        assert_eq!(net.predict_label(&[-1.0]).unwrap(), 0.0);
    }

    #[test]
    fn predict_label_argmax_two_outputs() {
        let net = DenseClassifier {
            input_dim: 1,
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights: vec![vec![-1.0], vec![1.0]],
                bias: vec![0.0, 0.0],
                activation: Activation::Linear,
            }],
            threshold: 0.5,
            metadata: serde_json::json!({}),
        };
        net.validate().unwrap();
        assert_eq!(net.predict_label(&[2.0]).unwrap(), 1.0);
        assert_eq!(net.predict_label(&[-2.0]).unwrap(), 0.0);
    }

    #[test]
    fn predict_label_rejects_non_finite() {
        let net = sigmoid_net(vec![1.0], 0.0);
        let err = net.predict_label(&[f64::NAN]).unwrap_err();
        assert!(matches!(err, VitalisError::Prediction(_)));
    }

    #[test]
    fn validates_shapes() {
        let bad = DenseClassifier {
            input_dim: 3,
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights: vec![vec![1.0, 2.0]], // in_dim mismatch
                bias: vec![0.0],
                activation: Activation::Linear,
            }],
            threshold: 0.5,
            metadata: serde_json::json!({}),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validates_output_arity() {
        let bad = DenseClassifier {
            input_dim: 2,
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
                bias: vec![0.0, 0.0, 0.0],
                activation: Activation::Linear,
            }],
            threshold: 0.5,
            metadata: serde_json::json!({}),
        };
        assert!(bad.validate().unwrap_err().contains("out_dim must be 1 or 2"));
    }
}
