//! Lightweight ML utilities (deploy-safe inference).
//!
//! This module is intentionally dependency-light so the service can run on
//! small instances without GPU/toolchain complexity. Artifacts are either
//! JSON-serialized dense classifiers or, with the `onnx` feature, ONNX
//! exports run through `tract`.

pub mod dense;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use dense::{Activation, DenseClassifier, DenseLayer};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use std::path::Path;

use crate::error::{Result, VitalisError};

/// A loaded classifier artifact, independent of its on-disk format.
#[derive(Debug, Clone)]
pub enum Predictor {
    Dense(DenseClassifier),
    #[cfg(feature = "onnx")]
    Onnx(OnnxClassifier),
}

impl Predictor {
    /// Deserialize an artifact, picking the loader from the file extension.
    pub fn from_file(path: &Path, input_dim: usize) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Dense(DenseClassifier::from_file(path)?)),
            #[cfg(feature = "onnx")]
            Some("onnx") => Ok(Self::Onnx(OnnxClassifier::load(
                &path.to_string_lossy(),
                input_dim,
            )?)),
            #[cfg(not(feature = "onnx"))]
            Some("onnx") => {
                let _ = input_dim;
                Err(VitalisError::Validation(format!(
                    "{} is an ONNX artifact but the onnx feature is not compiled in",
                    path.display()
                )))
            }
            _ => Err(VitalisError::Validation(format!(
                "unsupported artifact format: {}",
                path.display()
            ))),
        }
    }

    /// Input dimensionality the artifact was trained on.
    pub fn input_dim(&self) -> usize {
        match self {
            Self::Dense(m) => m.input_dim(),
            #[cfg(feature = "onnx")]
            Self::Onnx(m) => m.input_dim(),
        }
    }

    /// Run the classifier over one ordered feature vector.
    ///
    /// Returns the artifact's raw 0/1 label output; mapping to a verdict
    /// (and rejecting out-of-domain labels) happens in the dispatcher.
    pub fn predict_label(&self, input: &[f64]) -> Result<f64> {
        match self {
            Self::Dense(m) => m.predict_label(input),
            #[cfg(feature = "onnx")]
            Self::Onnx(m) => m.predict_label(input),
        }
    }
}

impl From<DenseClassifier> for Predictor {
    fn from(model: DenseClassifier) -> Self {
        Self::Dense(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_rejects_unknown_extension() {
        let err = Predictor::from_file(Path::new("models/diabetes.pkl"), 8).unwrap_err();
        assert!(matches!(err, VitalisError::Validation(_)));
    }
}
