use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::FeatureSchema;
use crate::model::ensemble::TreeEnsemble;
use crate::model::xgboost::XgbModel;
use crate::model::{ModelError, ModelHandle, ModelKind};

// ---------------------------------------------------------------------------
// Feature schema artifacts
// ---------------------------------------------------------------------------

/// Load a feature schema from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `["DR", "Start_Depth", ...]`
/// * `.csv`  – a single header row naming the columns
/// * `.txt`  – one column name per non-blank line
pub fn load_schema(path: &Path) -> Result<FeatureSchema> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let names = match ext.as_str() {
        "json" => schema_names_json(path)?,
        "csv" => schema_names_csv(path)?,
        "txt" => schema_names_txt(path)?,
        other => bail!("Unsupported schema file extension: .{other}"),
    };

    FeatureSchema::new(names).with_context(|| format!("invalid schema in {}", path.display()))
}

fn schema_names_json(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).context("reading JSON schema")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON schema")?;

    let items = root
        .as_array()
        .context("Expected top-level JSON array of feature names")?;

    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(str::to_string)
                .with_context(|| format!("Entry {i} is not a string"))
        })
        .collect()
}

fn schema_names_csv(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context("opening CSV schema")?;
    let headers = reader.headers().context("reading CSV headers")?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

fn schema_names_txt(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).context("reading text schema")?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

// ---------------------------------------------------------------------------
// Model artifacts
// ---------------------------------------------------------------------------

/// Load an XGBoost JSON model as `kind` and check it against its schema.
pub fn load_model(path: &Path, kind: ModelKind, schema: &FeatureSchema) -> Result<ModelHandle> {
    let raw = XgbModel::from_file(path)
        .with_context(|| format!("loading model {}", path.display()))?;
    log::debug!("{}: saved by XGBoost {:?}", path.display(), raw.version);
    let ensemble = TreeEnsemble::from_xgboost(raw)
        .with_context(|| format!("converting model {}", path.display()))?;

    if ensemble.num_features() != schema.len() {
        return Err(ModelError::SchemaWidth {
            model: ensemble.num_features(),
            schema: schema.len(),
        })
        .with_context(|| format!("checking model {}", path.display()));
    }

    let trained_names = ensemble.feature_names();
    if !trained_names.is_empty() && trained_names != schema.names() {
        log::warn!(
            "{}: feature names stored in the model differ from its schema file",
            path.display()
        );
    }

    let handle = ModelHandle::new(kind, ensemble)
        .with_context(|| format!("checking model {}", path.display()))?;
    log::info!(
        "Loaded {} model {} ({} trees, objective {}, {} features)",
        handle.kind(),
        path.display(),
        handle.ensemble().num_trees(),
        handle.ensemble().objective(),
        schema.len()
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn stump_json(num_feature: usize, objective: &str) -> String {
        json!({
            "learner": {
                "feature_names": [],
                "learner_model_param": {
                    "base_score": "0.5",
                    "num_class": "0",
                    "num_feature": num_feature.to_string()
                },
                "objective": {"name": objective},
                "gradient_booster": {"name": "gbtree", "model": {"trees": [{
                    "left_children": [1, -1, -1],
                    "right_children": [2, -1, -1],
                    "split_indices": [0, 0, 0],
                    "split_conditions": [1.0, 0.1, 0.2],
                    "default_left": [1, 0, 0]
                }]}}
            }
        })
        .to_string()
    }

    #[test]
    fn schema_formats_agree() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("s.json");
        let csv_path = dir.path().join("s.csv");
        let txt_path = dir.path().join("s.txt");
        fs::write(&json_path, r#"["DR", "Team_ID", "Opp_ID"]"#).unwrap();
        fs::write(&csv_path, "DR,Team_ID, Opp_ID\n").unwrap();
        fs::write(&txt_path, "DR\n\nTeam_ID\n  Opp_ID  \n").unwrap();

        let expected = FeatureSchema::new(["DR", "Team_ID", "Opp_ID"]).unwrap();
        assert_eq!(load_schema(&json_path).unwrap(), expected);
        assert_eq!(load_schema(&csv_path).unwrap(), expected);
        assert_eq!(load_schema(&txt_path).unwrap(), expected);
    }

    #[test]
    fn schema_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad_ext = dir.path().join("s.pkl");
        let not_strings = dir.path().join("n.json");
        let dupes = dir.path().join("d.json");
        fs::write(&bad_ext, "").unwrap();
        fs::write(&not_strings, "[1, 2]").unwrap();
        fs::write(&dupes, r#"["DR", "DR"]"#).unwrap();

        assert!(load_schema(&bad_ext).is_err());
        assert!(load_schema(&not_strings).is_err());
        assert!(load_schema(&dupes).is_err());
        assert!(load_schema(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn model_width_must_match_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        fs::write(&path, stump_json(3, "reg:squarederror")).unwrap();

        let two = FeatureSchema::new(["a", "b"]).unwrap();
        let three = FeatureSchema::new(["a", "b", "c"]).unwrap();
        assert!(load_model(&path, ModelKind::Regression, &two).is_err());

        let handle = load_model(&path, ModelKind::Regression, &three).unwrap();
        assert_eq!(handle.kind(), ModelKind::Regression);
    }

    #[test]
    fn corrupt_or_mislabelled_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("corrupt.json");
        let regressor = dir.path().join("reg.json");
        fs::write(&corrupt, "{ not json").unwrap();
        fs::write(&regressor, stump_json(1, "reg:squarederror")).unwrap();

        let schema = FeatureSchema::new(["a"]).unwrap();
        assert!(load_model(&corrupt, ModelKind::Regression, &schema).is_err());
        assert!(load_model(&regressor, ModelKind::ProbabilityClassification, &schema).is_err());
    }
}
