//! JSON request/response types for the screening API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::{DiseaseEntry, FieldSpec};

/// Selector row: one entry per disease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseSummary {
    pub key: String,
    pub name: String,
    pub field_count: usize,
}

impl From<&DiseaseEntry> for DiseaseSummary {
    fn from(entry: &DiseaseEntry) -> Self {
        Self {
            key: entry.disease.key().to_string(),
            name: entry.disease.display_name().to_string(),
            field_count: entry.fields.len(),
        }
    }
}

/// One renderable numeric input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl From<&FieldSpec> for FieldDescriptor {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            min: spec.min,
            max: spec.max,
            default: spec.default,
        }
    }
}

/// Full form description for one disease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseDetail {
    pub key: String,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl From<&DiseaseEntry> for DiseaseDetail {
    fn from(entry: &DiseaseEntry) -> Self {
        Self {
            key: entry.disease.key().to_string(),
            name: entry.disease.display_name().to_string(),
            fields: entry.fields.iter().map(FieldDescriptor::from).collect(),
        }
    }
}

/// Submission body: one value per field name.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub values: Map<String, Value>,
}

/// Screening outcome returned to the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub disease: String,
    pub verdict: String,
    pub message: String,
    /// Lottie payload for the verdict slot; null when the fetch degraded.
    pub animation: Option<Value>,
}
