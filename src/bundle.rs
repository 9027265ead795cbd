use anyhow::{Context, Result};

use crate::config::{ArtifactPair, ArtifactPaths};
use crate::data::align::{align, alignment_gap};
use crate::data::loader::{load_model, load_schema};
use crate::data::model::{AlignedRecord, FeatureSchema, RawInputRecord};
use crate::model::{predict, ModelHandle, ModelKind};

// ---------------------------------------------------------------------------
// Loaded models
// ---------------------------------------------------------------------------

/// One model with the schema its inputs are aligned to.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: &'static str,
    pub handle: ModelHandle,
    pub schema: FeatureSchema,
}

impl LoadedModel {
    fn load(name: &'static str, pair: &ArtifactPair, kind: ModelKind) -> Result<Self> {
        let schema = load_schema(&pair.schema)
            .with_context(|| format!("{name}: schema {}", pair.schema.display()))?;
        let handle = load_model(&pair.model, kind, &schema).with_context(|| name)?;
        Ok(Self {
            name,
            handle,
            schema,
        })
    }

    /// Align `raw` to this model and score it.
    fn run(&self, raw: &RawInputRecord) -> Result<(f64, AlignedRecord)> {
        let gap = alignment_gap(raw, &self.schema);
        log::debug!(
            "{}: {} column(s) default-filled, {} input column(s) dropped",
            self.name,
            gap.filled,
            gap.dropped
        );
        let record = align(raw, &self.schema);
        let value = predict(&self.handle, &record).with_context(|| self.name)?;
        Ok((value, record))
    }
}

/// Regressor + threshold classifier for one statistic.
#[derive(Debug, Clone)]
pub struct StatModels {
    pub regressor: LoadedModel,
    pub classifier: LoadedModel,
}

impl StatModels {
    fn run(&self, raw: &RawInputRecord) -> Result<(PredictionResult, [AlignedRecord; 2])> {
        let (expected, reg_record) = self.regressor.run(raw)?;
        let (probability, clf_record) = self.classifier.run(raw)?;
        Ok((
            PredictionResult {
                expected,
                probability,
            },
            [reg_record, clf_record],
        ))
    }
}

// ---------------------------------------------------------------------------
// ModelBundle – everything loaded at startup
// ---------------------------------------------------------------------------

/// The four models the dashboard needs. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub strikeouts: StatModels,
    pub walks: StatModels,
}

impl ModelBundle {
    /// Load every artifact; the first failure aborts the whole load.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        for pair in paths.all() {
            log::debug!(
                "Expecting {} with schema {}",
                pair.model.display(),
                pair.schema.display()
            );
        }
        let strikeouts = StatModels {
            regressor: LoadedModel::load(
                "strikeout regressor",
                &paths.so_regressor,
                ModelKind::Regression,
            )?,
            classifier: LoadedModel::load(
                "strikeout classifier",
                &paths.so_classifier,
                ModelKind::ProbabilityClassification,
            )?,
        };
        let walks = StatModels {
            regressor: LoadedModel::load(
                "walk regressor",
                &paths.bb_regressor,
                ModelKind::Regression,
            )?,
            classifier: LoadedModel::load(
                "walk classifier",
                &paths.bb_classifier,
                ModelKind::ProbabilityClassification,
            )?,
        };
        Ok(Self { strikeouts, walks })
    }

    /// Run all four models over one submission. Any scoring failure fails the round.
    pub fn predict_round(&self, raw: &RawInputRecord) -> Result<PredictionRound> {
        let (strikeouts, [so_reg, so_clf]) = self.strikeouts.run(raw)?;
        let (walks, [bb_reg, bb_clf]) = self.walks.run(raw)?;

        let inputs = vec![
            (self.strikeouts.regressor.name, so_reg),
            (self.strikeouts.classifier.name, so_clf),
            (self.walks.regressor.name, bb_reg),
            (self.walks.classifier.name, bb_clf),
        ];
        Ok(PredictionRound {
            strikeouts,
            walks,
            inputs,
        })
    }
}

// ---------------------------------------------------------------------------
// Round results
// ---------------------------------------------------------------------------

/// Expected value and exceedance probability for one statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub expected: f64,
    pub probability: f64,
}

/// Output of one submit: both statistics plus what each model was fed.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRound {
    pub strikeouts: PredictionResult,
    pub walks: PredictionResult,
    /// Model name → aligned input row, in display order.
    pub inputs: Vec<(&'static str, AlignedRecord)>,
}
