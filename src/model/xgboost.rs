//! XGBoost JSON model format.
//!
//! These are "foreign types" that mirror `Booster.save_model("model.json")`
//! output closely enough to deserialize it. Conversion into the evaluable
//! [`TreeEnsemble`](super::ensemble::TreeEnsemble) happens in `ensemble.rs`.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};

// ---------------------------------------------------------------------------
// Custom deserializers for XGBoost's loosely typed fields
// ---------------------------------------------------------------------------

/// `base_score` shows up as a number, a numeric string, a bracketed string
/// such as `"[5E-1]"` (XGBoost >= 2.0) or a one-element array.
fn deserialize_base_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let mut cur = Value::deserialize(deserializer)?;
    loop {
        cur = match cur {
            Value::Number(n) => {
                return n
                    .as_f64()
                    .ok_or_else(|| D::Error::custom("invalid base_score number"));
            }
            Value::String(s) => {
                return parse_base_score(&s).ok_or_else(|| {
                    D::Error::custom(format!("cannot parse base_score from string: {s}"))
                });
            }
            Value::Array(arr) => arr
                .into_iter()
                .next()
                .ok_or_else(|| D::Error::custom("empty base_score array"))?,
            _ => {
                return Err(D::Error::custom(
                    "base_score must be number, string, or array",
                ))
            }
        };
    }
}

fn parse_base_score(s: &str) -> Option<f64> {
    let t = s.trim();
    let inner = t
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(t);
    inner.trim().parse().ok()
}

/// `default_left` is written as 0/1 integers by most versions, as booleans by some.
fn deserialize_flags<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|v| match v {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => n
                .as_i64()
                .map(|i| i != 0)
                .ok_or_else(|| D::Error::custom("invalid flag number")),
            other => Err(D::Error::custom(format!("invalid flag value: {other}"))),
        })
        .collect()
}

fn default_num_class() -> i64 {
    0
}

// ---------------------------------------------------------------------------
// Tree / booster definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct XgbTree {
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<i64>,
    /// Threshold for split nodes, leaf value for leaves.
    pub split_conditions: Vec<f32>,
    #[serde(deserialize_with = "deserialize_flags")]
    pub default_left: Vec<bool>,
    /// 0 = numeric, 1 = categorical. Absent in pre-1.6 models.
    #[serde(default)]
    pub split_type: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbTrees {
    pub trees: Vec<XgbTree>,
    #[serde(default)]
    pub tree_info: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbDartInner {
    pub model: XgbTrees,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum XgbBooster {
    Gbtree {
        model: XgbTrees,
    },
    Dart {
        gbtree: XgbDartInner,
        weight_drop: Vec<f64>,
    },
    Gblinear {
        #[allow(dead_code)]
        model: Value,
    },
}

impl XgbBooster {
    pub fn name(&self) -> &'static str {
        match self {
            XgbBooster::Gbtree { .. } => "gbtree",
            XgbBooster::Dart { .. } => "dart",
            XgbBooster::Gblinear { .. } => "gblinear",
        }
    }
}

// ---------------------------------------------------------------------------
// Learner-level definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct XgbObjective {
    pub name: String,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct XgbModelParam {
    #[serde(deserialize_with = "deserialize_base_score")]
    pub base_score: f64,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_num_class")]
    pub num_class: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub num_feature: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbLearner {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: XgbBooster,
    pub objective: XgbObjective,
    pub learner_model_param: XgbModelParam,
}

// ---------------------------------------------------------------------------
// Top-level model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct XgbModel {
    #[serde(default)]
    pub version: Vec<u32>,
    pub learner: XgbLearner,
}

impl XgbModel {
    pub fn from_file(path: &Path) -> Result<Self, super::ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
