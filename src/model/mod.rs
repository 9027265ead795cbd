/// Model layer: artifact parsing, tree evaluation, and scoring dispatch.
///
/// ```text
///  *.json (XGBoost)
///        │
///        ▼
///   ┌──────────┐
///   │ xgboost   │  serde mirror of the JSON layout
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TreeEnsemble  │  validated trees + link function
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ModelHandle   │  Regressor | ProbabilityClassifier → one scalar
///   └──────────────┘
/// ```
pub mod ensemble;
pub mod xgboost;

use std::fmt;

use thiserror::Error;

use crate::data::model::AlignedRecord;
use ensemble::{Link, TreeEnsemble};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A model artifact that cannot be turned into a usable handle.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid XGBoost JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported booster '{0}' (only gbtree and dart are supported)")]
    UnsupportedBooster(String),
    #[error("unsupported objective '{0}'")]
    UnsupportedObjective(String),
    #[error("multi-class models are not supported (num_class = {0})")]
    MultiClass(i64),
    #[error("model declares no input features")]
    NoFeatures,
    #[error("tree {tree} uses categorical splits, which are not supported")]
    CategoricalSplit { tree: usize },
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error("tree {tree} splits on feature {feature} but the model has {width} features")]
    SplitFeatureOutOfRange {
        tree: usize,
        feature: i64,
        width: usize,
    },
    #[error("DART model has {weights} tree weights for {trees} trees")]
    DartWeights { weights: usize, trees: usize },
    #[error("model expects {model} features but its schema lists {schema}")]
    SchemaWidth { model: usize, schema: usize },
    #[error("objective '{objective}' cannot back a {kind} model")]
    RoleMismatch { kind: ModelKind, objective: String },
}

/// A prediction round that cannot produce a value.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("record has {found} columns but the model expects {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[error("model produced a non-finite score ({0})")]
    NonFinite(f64),
}

// ---------------------------------------------------------------------------
// ModelHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Regression,
    ProbabilityClassification,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Regression => write!(f, "regression"),
            ModelKind::ProbabilityClassification => write!(f, "probability_classification"),
        }
    }
}

/// A loaded model tagged with what it produces.
#[derive(Debug, Clone)]
pub enum ModelHandle {
    /// One continuous estimate per row.
    Regressor(TreeEnsemble),
    /// Probability of the positive class per row.
    ProbabilityClassifier(TreeEnsemble),
}

impl ModelHandle {
    /// Tag `ensemble` as `kind`, rejecting objectives that cannot serve it.
    pub fn new(kind: ModelKind, ensemble: TreeEnsemble) -> Result<Self, ModelError> {
        let fits = match kind {
            ModelKind::Regression => !ensemble.objective().starts_with("binary:"),
            ModelKind::ProbabilityClassification => ensemble.link() == Link::Logistic,
        };
        if !fits {
            return Err(ModelError::RoleMismatch {
                kind,
                objective: ensemble.objective().to_string(),
            });
        }
        Ok(match kind {
            ModelKind::Regression => ModelHandle::Regressor(ensemble),
            ModelKind::ProbabilityClassification => ModelHandle::ProbabilityClassifier(ensemble),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelHandle::Regressor(_) => ModelKind::Regression,
            ModelHandle::ProbabilityClassifier(_) => ModelKind::ProbabilityClassification,
        }
    }

    pub fn ensemble(&self) -> &TreeEnsemble {
        match self {
            ModelHandle::Regressor(e) | ModelHandle::ProbabilityClassifier(e) => e,
        }
    }

    /// Score one aligned row.
    ///
    /// The record must have been aligned against this model's schema; only
    /// its width is checked here.
    pub fn score(&self, record: &AlignedRecord) -> Result<f64, ScoringError> {
        let ensemble = self.ensemble();
        if record.len() != ensemble.num_features() {
            return Err(ScoringError::FeatureCount {
                expected: ensemble.num_features(),
                found: record.len(),
            });
        }
        let row = record.to_row();

        let value = match self {
            ModelHandle::Regressor(e) => e.predict_row(&row),
            ModelHandle::ProbabilityClassifier(e) => {
                let [_, positive] = class_probabilities(e.predict_row(&row));
                positive
            }
        };

        if !value.is_finite() {
            return Err(ScoringError::NonFinite(value));
        }
        Ok(value)
    }
}

/// `[P(negative), P(positive)]` for a binary logistic output.
fn class_probabilities(p: f64) -> [f64; 2] {
    let p = p.clamp(0.0, 1.0);
    [1.0 - p, p]
}

/// Run one model over one aligned record.
pub fn predict(model: &ModelHandle, record: &AlignedRecord) -> Result<f64, ScoringError> {
    model.score(record)
}
