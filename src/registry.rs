//! Model registry: disease → (ordered field schema, classifier artifact).
//!
//! Built once at startup and shared read-only behind an `Arc`. Every artifact
//! is loaded eagerly; a missing or corrupt file, or an artifact whose input
//! dimensionality disagrees with the field schema, is a fatal startup error.
//! There is no partial availability and no lazy loading.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{Result, VitalisError};
use crate::ml::Predictor;

/// The five screening targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Hypothyroid,
    LungCancer,
    Parkinsons,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Hypothyroid,
        Disease::LungCancer,
        Disease::Parkinsons,
    ];

    /// Stable key used in URLs and config.
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart-disease",
            Disease::Hypothyroid => "hypothyroid",
            Disease::LungCancer => "lung-cancer",
            Disease::Parkinsons => "parkinsons",
        }
    }

    /// Human-readable name shown in the selector and verdict messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::HeartDisease => "Heart Disease",
            Disease::Hypothyroid => "Hypothyroid",
            Disease::LungCancer => "Lung Cancer",
            Disease::Parkinsons => "Parkinson's",
        }
    }

    /// Artifact file stem under the models directory.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Hypothyroid => "hypothyroid",
            Disease::LungCancer => "lung_cancer",
            Disease::Parkinsons => "parkinsons",
        }
    }

    pub fn from_key(key: &str) -> Option<Disease> {
        Disease::ALL.iter().copied().find(|d| d.key() == key)
    }

    /// Ordered input schema the artifact was trained on.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Disease::Diabetes => DIABETES_FIELDS,
            Disease::HeartDisease => HEART_DISEASE_FIELDS,
            Disease::Hypothyroid => HYPOTHYROID_FIELDS,
            Disease::LungCancer => LUNG_CANCER_FIELDS,
            Disease::Parkinsons => PARKINSONS_FIELDS,
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One bounded numeric form input.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl FieldSpec {
    const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            min,
            max,
            default: 0.0,
        }
    }
}

const DIABETES_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Pregnancies", 0.0, 20.0),
    FieldSpec::new("Glucose", 0.0, 300.0),
    FieldSpec::new("BloodPressure", 0.0, 200.0),
    FieldSpec::new("SkinThickness", 0.0, 100.0),
    FieldSpec::new("Insulin", 0.0, 900.0),
    FieldSpec::new("BMI", 0.0, 70.0),
    FieldSpec::new("DiabetesPedigreeFunction", 0.0, 3.0),
    FieldSpec::new("Age", 0.0, 120.0),
];

const HEART_DISEASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Age", 0.0, 120.0),
    FieldSpec::new("Sex", 0.0, 1.0),
    FieldSpec::new("ChestPainType", 0.0, 3.0),
    FieldSpec::new("RestingBP", 0.0, 250.0),
    FieldSpec::new("Cholesterol", 0.0, 600.0),
    FieldSpec::new("FBS", 0.0, 1.0),
    FieldSpec::new("RestECG", 0.0, 2.0),
    FieldSpec::new("MaxHR", 0.0, 250.0),
    FieldSpec::new("ExerciseAngina", 0.0, 1.0),
    FieldSpec::new("Oldpeak", 0.0, 10.0),
    FieldSpec::new("Slope", 0.0, 2.0),
    FieldSpec::new("Ca", 0.0, 4.0),
    FieldSpec::new("Thal", 0.0, 3.0),
];

const HYPOTHYROID_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("TSH", 0.0, 100.0),
    FieldSpec::new("T3", 0.0, 10.0),
    FieldSpec::new("TT4", 0.0, 300.0),
    FieldSpec::new("T4U", 0.0, 3.0),
    FieldSpec::new("FTI", 0.0, 300.0),
];

const LUNG_CANCER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Age", 0.0, 120.0),
    FieldSpec::new("Smokes", 0.0, 1.0),
    FieldSpec::new("Coughing", 0.0, 1.0),
    FieldSpec::new("ShortBreath", 0.0, 1.0),
    FieldSpec::new("Wheezing", 0.0, 1.0),
    FieldSpec::new("SwallowingDiff", 0.0, 1.0),
    FieldSpec::new("ChestPain", 0.0, 1.0),
    FieldSpec::new("FrequentCold", 0.0, 1.0),
    FieldSpec::new("Fatigue", 0.0, 1.0),
    FieldSpec::new("WeightLoss", 0.0, 1.0),
    FieldSpec::new("Hoarseness", 0.0, 1.0),
    FieldSpec::new("Pollution", 0.0, 1.0),
    FieldSpec::new("Asbestos", 0.0, 1.0),
    FieldSpec::new("FamilyHistory", 0.0, 1.0),
    FieldSpec::new("Pneumonia", 0.0, 1.0),
    FieldSpec::new("LungNodules", 0.0, 1.0),
];

const PARKINSONS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Fo", 50.0, 300.0),
    FieldSpec::new("Fhi", 50.0, 600.0),
    FieldSpec::new("Flo", 50.0, 300.0),
    FieldSpec::new("Jitter", 0.0, 1.0),
    FieldSpec::new("Shimmer", 0.0, 1.0),
    FieldSpec::new("HNR", 0.0, 40.0),
];

/// One disease with its schema and loaded classifier.
#[derive(Debug, Clone)]
pub struct DiseaseEntry {
    pub disease: Disease,
    pub fields: &'static [FieldSpec],
    pub predictor: Predictor,
}

impl DiseaseEntry {
    pub fn new(disease: Disease, predictor: Predictor) -> Self {
        Self {
            disease,
            fields: disease.schema(),
            predictor,
        }
    }

    /// The schema length must match the artifact's trained input width.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(VitalisError::Validation(format!(
                "{} has an empty field schema",
                self.disease
            )));
        }
        let expected = self.predictor.input_dim();
        if self.fields.len() != expected {
            return Err(VitalisError::Validation(format!(
                "{}: schema has {} fields but artifact expects {expected} inputs",
                self.disease,
                self.fields.len()
            )));
        }
        Ok(())
    }
}

/// Immutable process-wide registry of loaded classifiers.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: HashMap<Disease, DiseaseEntry>,
}

impl ModelRegistry {
    /// Eagerly load all five artifacts from `dir`. Any failure is fatal.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut entries = HashMap::new();
        for disease in Disease::ALL {
            let path = Self::artifact_path(dir, disease)?;
            let predictor =
                Predictor::from_file(&path, disease.schema().len()).map_err(|e| {
                    VitalisError::ModelLoad {
                        disease: disease.display_name().to_string(),
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?;

            let entry = DiseaseEntry::new(disease, predictor);
            entry.validate().map_err(|e| VitalisError::ModelLoad {
                disease: disease.display_name().to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

            info!(
                disease = disease.key(),
                path = %path.display(),
                fields = entry.fields.len(),
                "loaded classifier artifact"
            );
            entries.insert(disease, entry);
        }
        Ok(Self { entries })
    }

    /// Build a registry from pre-constructed entries (used by `check`-style
    /// tooling and tests). The dimensionality invariant still applies.
    pub fn from_entries(items: Vec<DiseaseEntry>) -> Result<Self> {
        let mut entries = HashMap::new();
        for entry in items {
            entry.validate()?;
            entries.insert(entry.disease, entry);
        }
        Ok(Self { entries })
    }

    fn artifact_path(dir: &Path, disease: Disease) -> Result<PathBuf> {
        let stem = disease.artifact_stem();
        let candidates = [format!("{stem}.json"), format!("{stem}.onnx")];
        for name in &candidates {
            let path = dir.join(name);
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(VitalisError::ModelLoad {
            disease: disease.display_name().to_string(),
            path: dir.join(format!("{stem}.json")).display().to_string(),
            reason: "artifact file not found".to_string(),
        })
    }

    pub fn entry(&self, disease: Disease) -> Option<&DiseaseEntry> {
        self.entries.get(&disease)
    }

    /// Lookup by URL/config key.
    pub fn by_key(&self, key: &str) -> Result<&DiseaseEntry> {
        Disease::from_key(key)
            .and_then(|d| self.entries.get(&d))
            .ok_or_else(|| VitalisError::UnknownDisease(key.to_string()))
    }

    /// Entries in selector order.
    pub fn entries(&self) -> impl Iterator<Item = &DiseaseEntry> {
        Disease::ALL.iter().filter_map(|d| self.entries.get(d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{Activation, DenseClassifier, DenseLayer};

    fn stub_classifier(input_dim: usize) -> DenseClassifier {
        DenseClassifier {
            input_dim,
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights: vec![vec![0.1; input_dim]],
                bias: vec![0.0],
                activation: Activation::Sigmoid,
            }],
            threshold: 0.5,
            metadata: serde_json::json!({}),
        }
    }

    #[test]
    fn schemas_are_non_empty_with_expected_widths() {
        let widths: Vec<usize> = Disease::ALL.iter().map(|d| d.schema().len()).collect();
        assert_eq!(widths, vec![8, 13, 5, 16, 6]);
    }

    #[test]
    fn keys_round_trip() {
        for disease in Disease::ALL {
            assert_eq!(Disease::from_key(disease.key()), Some(disease));
        }
        assert_eq!(Disease::from_key("gout"), None);
    }

    #[test]
    fn from_entries_checks_dimensionality() {
        // Hypothyroid expects 5 inputs; a 3-wide artifact must be rejected.
        let entry = DiseaseEntry::new(Disease::Hypothyroid, stub_classifier(3).into());
        let err = ModelRegistry::from_entries(vec![entry]).unwrap_err();
        assert!(matches!(err, VitalisError::Validation(_)));
    }

    #[test]
    fn from_entries_accepts_matching_artifacts() {
        let entries: Vec<DiseaseEntry> = Disease::ALL
            .iter()
            .map(|d| DiseaseEntry::new(*d, stub_classifier(d.schema().len()).into()))
            .collect();
        let registry = ModelRegistry::from_entries(entries).unwrap();
        assert_eq!(registry.len(), 5);
        for entry in registry.entries() {
            assert!(!entry.fields.is_empty());
            assert_eq!(entry.fields.len(), entry.predictor.input_dim());
        }
    }

    #[test]
    fn load_fails_on_missing_artifact() {
        let dir = std::env::temp_dir().join(format!("vitalis-missing-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let err = ModelRegistry::load(&dir).unwrap_err();
        match err {
            VitalisError::ModelLoad { reason, .. } => {
                assert!(reason.contains("not found"));
            }
            other => panic!("expected ModelLoad, got {other}"),
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_reads_json_artifacts() {
        let dir = std::env::temp_dir().join(format!("vitalis-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for disease in Disease::ALL {
            let model = stub_classifier(disease.schema().len());
            let path = dir.join(format!("{}.json", disease.artifact_stem()));
            std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();
        }

        let registry = ModelRegistry::load(&dir).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.by_key("hypothyroid").unwrap().fields.len(),
            5
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
