//! ONNX inference wrapper (pure Rust via `tract-onnx`).
//!
//! Alternate artifact format for classifiers exported from other toolchains
//! (e.g. sklearn via skl2onnx). Such exports emit the class label as the
//! first output tensor, so no thresholding happens on our side.

use crate::error::{Result, VitalisError};

use tract_onnx::prelude::*;

#[derive(Clone)]
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
    input_dim: usize,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_dim", &self.input_dim)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load an ONNX model and specialize it to a fixed `[1, input_dim]` f32 input.
    pub fn load(path: &str, input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(VitalisError::Validation(
                "input_dim must be > 0".to_string(),
            ));
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| VitalisError::Internal(format!("onnx load failed: {e}")))?;

        let model = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_dim)),
            )
            .map_err(|e| VitalisError::Internal(format!("onnx input fact failed: {e}")))?;

        let plan = model
            .into_optimized()
            .map_err(|e| VitalisError::Internal(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| VitalisError::Internal(format!("onnx runnable failed: {e}")))?;

        Ok(Self { plan, input_dim })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Run inference and return the artifact's raw label output.
    pub fn predict_label(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_dim {
            return Err(VitalisError::Validation(format!(
                "onnx input dim mismatch: got {}, expected {}",
                input.len(),
                self.input_dim
            )));
        }

        let values: Vec<f32> = input.iter().map(|v| *v as f32).collect();
        let tensor = tract_ndarray::ArrayD::<f32>::from_shape_vec(
            tract_ndarray::IxDyn(&[1, self.input_dim]),
            values,
        )
        .map_err(|e| VitalisError::Internal(format!("onnx input reshape failed: {e}")))?
        .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| VitalisError::Prediction(format!("onnx run failed: {e}")))?;
        if outputs.is_empty() {
            return Err(VitalisError::Prediction(
                "onnx produced no outputs".to_string(),
            ));
        }

        let arr = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| VitalisError::Prediction(format!("onnx output decode failed: {e}")))?;

        let raw = arr
            .iter()
            .next()
            .copied()
            .ok_or_else(|| VitalisError::Prediction("onnx output is empty".to_string()))?;

        if !raw.is_finite() {
            return Err(VitalisError::Prediction(format!(
                "onnx produced non-finite label: {raw}"
            )));
        }

        Ok(raw as f64)
    }
}
