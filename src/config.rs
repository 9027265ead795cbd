use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Fixed artifact locations and display thresholds
// ---------------------------------------------------------------------------

/// Strikeout count the classifier was trained to exceed.
pub const STRIKEOUT_THRESHOLD: u32 = 6;

/// Walk count the classifier was trained to exceed.
pub const WALK_THRESHOLD: u32 = 1;

/// Model and schema file names, relative to the working directory.
pub const SO_REGRESSOR: &str = "strikeout_regression_model.json";
pub const SO_CLASSIFIER: &str = "strikeout_model_over6.json";
pub const BB_REGRESSOR: &str = "BB_regression_model.json";
pub const BB_CLASSIFIER: &str = "BB_model_over1.json";

/// Suffix replacing `.json` on a model file name to find its schema file.
const SCHEMA_SUFFIX: &str = "_features.json";

/// Where one model and its feature schema live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
    pub model: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPair {
    fn in_dir(dir: &Path, model_file: &str) -> Self {
        let stem = model_file.strip_suffix(".json").unwrap_or(model_file);
        Self {
            model: dir.join(model_file),
            schema: dir.join(format!("{stem}{SCHEMA_SUFFIX}")),
        }
    }
}

/// The eight artifacts the dashboard needs before it can open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub so_regressor: ArtifactPair,
    pub so_classifier: ArtifactPair,
    pub bb_regressor: ArtifactPair,
    pub bb_classifier: ArtifactPair,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            so_regressor: ArtifactPair::in_dir(dir, SO_REGRESSOR),
            so_classifier: ArtifactPair::in_dir(dir, SO_CLASSIFIER),
            bb_regressor: ArtifactPair::in_dir(dir, BB_REGRESSOR),
            bb_classifier: ArtifactPair::in_dir(dir, BB_CLASSIFIER),
        }
    }

    pub fn all(&self) -> [&ArtifactPair; 4] {
        [
            &self.so_regressor,
            &self.so_classifier,
            &self.bb_regressor,
            &self.bb_classifier,
        ]
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
