//! Form dispatch: completeness validation, numeric coercion, ordered vector
//! assembly, and mapping raw classifier labels onto user-facing verdicts.
//!
//! The vector is rebuilt from the field schema on every submission, so the
//! order reaching the classifier is always the schema order regardless of how
//! the client serialized its map.

use serde_json::{Map, Value};

use crate::error::{Result, VitalisError};
use crate::registry::{Disease, DiseaseEntry, FieldSpec};

/// Binary screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Positive,
    Negative,
}

const LABEL_TOLERANCE: f64 = 1e-6;

impl Verdict {
    /// Map a classifier's raw label onto a verdict.
    ///
    /// Only 0 and 1 are valid labels; anything else is an out-of-domain
    /// error rather than a silent negative.
    pub fn from_raw(raw: f64) -> Result<Verdict> {
        if (raw - 1.0).abs() < LABEL_TOLERANCE {
            Ok(Verdict::Positive)
        } else if raw.abs() < LABEL_TOLERANCE {
            Ok(Verdict::Negative)
        } else {
            Err(VitalisError::PredictionOutOfDomain { raw })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Positive => "positive",
            Verdict::Negative => "negative",
        }
    }

    /// The canned message shown for this verdict.
    pub fn message(&self, disease: Disease) -> String {
        match self {
            Verdict::Positive => {
                format!("You may have {disease}. Please consult a doctor.")
            }
            Verdict::Negative => format!("You do NOT have {disease}. Stay healthy!"),
        }
    }
}

/// A completed screening result.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub verdict: Verdict,
    pub message: String,
}

/// Coerce one submitted value to a float.
///
/// Numbers pass through; strings are parsed. Everything else is a coercion
/// failure surfaced to the user.
pub fn coerce(field: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| VitalisError::Coercion {
            field: field.to_string(),
            value: n.to_string(),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| VitalisError::Coercion {
            field: field.to_string(),
            value: s.clone(),
        }),
        other => Err(VitalisError::Coercion {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Assemble the ordered input vector from a named value map.
///
/// Every schema field must be present and non-null; otherwise the submission
/// is incomplete and no prediction is attempted.
pub fn build_vector(fields: &[FieldSpec], values: &Map<String, Value>) -> Result<Vec<f64>> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|f| matches!(values.get(f.name), None | Some(Value::Null)))
        .map(|f| f.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(VitalisError::IncompleteSubmission { missing });
    }

    fields
        .iter()
        .map(|f| coerce(f.name, &values[f.name]))
        .collect()
}

/// Assemble the ordered input vector from positional raw values (CLI path).
pub fn build_vector_ordered(fields: &[FieldSpec], raw: &[String]) -> Result<Vec<f64>> {
    if raw.len() < fields.len() {
        let missing = fields[raw.len()..]
            .iter()
            .map(|f| f.name.to_string())
            .collect();
        return Err(VitalisError::IncompleteSubmission { missing });
    }
    if raw.len() > fields.len() {
        return Err(VitalisError::Validation(format!(
            "expected {} values, got {}",
            fields.len(),
            raw.len()
        )));
    }

    fields
        .iter()
        .zip(raw)
        .map(|(f, v)| coerce(f.name, &Value::String(v.clone())))
        .collect()
}

/// Run one classifier call over an assembled vector and map the label.
pub fn classify(entry: &DiseaseEntry, vector: &[f64]) -> Result<Prediction> {
    let raw = entry.predictor.predict_label(vector)?;
    let verdict = Verdict::from_raw(raw)?;
    Ok(Prediction {
        verdict,
        message: verdict.message(entry.disease),
    })
}

/// Full submission flow: validate, coerce, assemble, classify.
pub fn submit(entry: &DiseaseEntry, values: &Map<String, Value>) -> Result<Prediction> {
    let vector = build_vector(entry.fields, values)?;
    classify(entry, &vector)
}
