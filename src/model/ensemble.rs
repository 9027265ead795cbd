use super::xgboost::{XgbBooster, XgbModel, XgbTree};
use super::ModelError;

// ---------------------------------------------------------------------------
// Link functions
// ---------------------------------------------------------------------------

/// Maps a raw margin to the prediction space of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Identity,
    Exp,
    Logistic,
}

impl Link {
    /// Resolve the link for an XGBoost objective name.
    pub fn for_objective(objective: &str) -> Result<Self, ModelError> {
        match objective {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:quantileerror" | "reg:squaredlogerror" => Ok(Link::Identity),
            "count:poisson" | "reg:gamma" | "reg:tweedie" => Ok(Link::Exp),
            "binary:logistic" | "reg:logistic" => Ok(Link::Logistic),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }

    pub fn apply(self, margin: f64) -> f64 {
        match self {
            Link::Identity => margin,
            Link::Exp => margin.exp(),
            Link::Logistic => 1.0 / (1.0 + (-margin).exp()),
        }
    }

    /// XGBoost stores `base_score` in prediction space; trees add to margin space.
    pub fn base_margin(self, base_score: f64) -> f64 {
        match self {
            Link::Identity => base_score,
            Link::Exp => base_score.max(1e-7).ln(),
            Link::Logistic => {
                let p = base_score.clamp(1e-7, 1.0 - 1e-7);
                (p / (1.0 - p)).ln()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(f32),
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
}

/// One regression tree. Children always sit at a higher index than their
/// parent, so a walk from the root terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Leaf value reached by `row`. `NaN` counts as missing.
    pub fn leaf_value(&self, row: &[f64]) -> f32 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row[*feature];
                    let go_left = if x.is_nan() {
                        *default_left
                    } else {
                        (x as f32) < *threshold
                    };
                    idx = if go_left { *left } else { *right };
                }
            }
        }
    }
}

fn convert_tree(tree: &XgbTree, tree_idx: usize, num_features: usize) -> Result<Tree, ModelError> {
    let n = tree.left_children.len();
    let malformed = |reason: String| ModelError::MalformedTree {
        tree: tree_idx,
        reason,
    };

    if n == 0 {
        return Err(malformed("tree has no nodes".into()));
    }
    if tree.right_children.len() != n
        || tree.split_indices.len() != n
        || tree.split_conditions.len() != n
        || tree.default_left.len() != n
    {
        return Err(malformed("node arrays have different lengths".into()));
    }
    if tree.split_type.iter().any(|&t| t != 0) {
        return Err(ModelError::CategoricalSplit { tree: tree_idx });
    }

    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        let left = tree.left_children[i];
        if left == -1 {
            nodes.push(Node::Leaf(tree.split_conditions[i]));
            continue;
        }

        let right = tree.right_children[i];
        let child_ok = |c: i32| c > i as i32 && (c as usize) < n;
        if !child_ok(left) || !child_ok(right) {
            return Err(malformed(format!(
                "node {i} has invalid children ({left}, {right})"
            )));
        }

        let feature = tree.split_indices[i];
        if feature < 0 || feature as usize >= num_features {
            return Err(ModelError::SplitFeatureOutOfRange {
                tree: tree_idx,
                feature,
                width: num_features,
            });
        }

        nodes.push(Node::Split {
            feature: feature as usize,
            threshold: tree.split_conditions[i],
            left: left as usize,
            right: right as usize,
            default_left: tree.default_left[i],
        });
    }

    Ok(Tree { nodes })
}

// ---------------------------------------------------------------------------
// TreeEnsemble
// ---------------------------------------------------------------------------

/// A single-output boosted tree ensemble ready to score dense rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    /// Per-tree weights (DART); `None` means every tree weighs 1.
    tree_weights: Option<Vec<f64>>,
    base_margin: f64,
    link: Link,
    objective: String,
    num_features: usize,
    feature_names: Vec<String>,
}

impl TreeEnsemble {
    pub fn from_xgboost(model: XgbModel) -> Result<Self, ModelError> {
        let learner = model.learner;
        let param = &learner.learner_model_param;

        if param.num_class > 1 {
            return Err(ModelError::MultiClass(param.num_class));
        }
        if param.num_feature <= 0 {
            return Err(ModelError::NoFeatures);
        }
        let num_features = param.num_feature as usize;

        let objective = learner.objective.name;
        let link = Link::for_objective(&objective)?;

        let (xgb_trees, tree_weights) = match learner.gradient_booster {
            XgbBooster::Gbtree { model } => (model.trees, None),
            XgbBooster::Dart {
                gbtree,
                weight_drop,
            } => {
                if weight_drop.len() != gbtree.model.trees.len() {
                    return Err(ModelError::DartWeights {
                        weights: weight_drop.len(),
                        trees: gbtree.model.trees.len(),
                    });
                }
                (gbtree.model.trees, Some(weight_drop))
            }
            other => return Err(ModelError::UnsupportedBooster(other.name().to_string())),
        };

        let trees = xgb_trees
            .iter()
            .enumerate()
            .map(|(i, t)| convert_tree(t, i, num_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            tree_weights,
            base_margin: link.base_margin(param.base_score),
            link,
            objective,
            num_features,
            feature_names: learner.feature_names,
        })
    }

    /// Raw margin for one row. `row.len()` must equal [`num_features`](Self::num_features).
    pub fn margin(&self, row: &[f64]) -> f64 {
        let leaves = self.trees.iter().map(|t| t.leaf_value(row) as f64);
        let sum: f64 = match &self.tree_weights {
            Some(weights) => leaves.zip(weights).map(|(v, w)| v * w).sum(),
            None => leaves.sum(),
        };
        self.base_margin + sum
    }

    /// Prediction in objective space (probability for logistic objectives).
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.link.apply(self.margin(row))
    }

    pub fn link(&self) -> Link {
        self.link
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Column names recorded at training time, if the model kept them.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Two stumps over a 2-feature input:
    ///   tree 0: x0 < 5   → -1.0 | 1.0   (missing → left)
    ///   tree 1: x1 < 0.5 →  0.25 | 0.75 (missing → right)
    fn model_json(objective: &str, base_score: Value) -> Value {
        json!({
            "version": [2, 0, 3],
            "learner": {
                "feature_names": ["a", "b"],
                "learner_model_param": {
                    "base_score": base_score,
                    "num_class": "0",
                    "num_feature": "2"
                },
                "objective": {"name": objective},
                "gradient_booster": {
                    "name": "gbtree",
                    "model": {
                        "tree_info": [0, 0],
                        "trees": [
                            {
                                "left_children": [1, -1, -1],
                                "right_children": [2, -1, -1],
                                "split_indices": [0, 0, 0],
                                "split_conditions": [5.0, -1.0, 1.0],
                                "default_left": [1, 0, 0],
                                "split_type": [0, 0, 0]
                            },
                            {
                                "left_children": [1, -1, -1],
                                "right_children": [2, -1, -1],
                                "split_indices": [1, 0, 0],
                                "split_conditions": [0.5, 0.25, 0.75],
                                "default_left": [0, 0, 0]
                            }
                        ]
                    }
                }
            }
        })
    }

    fn ensemble(objective: &str, base_score: Value) -> TreeEnsemble {
        TreeEnsemble::from_xgboost(XgbModel::from_value(model_json(objective, base_score)).unwrap())
            .unwrap()
    }

    #[test]
    fn regression_sums_leaves_onto_base_score() {
        let model = ensemble("reg:squarederror", json!("[5E0]"));
        assert_eq!(model.num_trees(), 2);
        assert_eq!(model.predict_row(&[1.0, 0.0]), 5.0 - 1.0 + 0.25);
        assert_eq!(model.predict_row(&[9.0, 1.0]), 5.0 + 1.0 + 0.75);
    }

    #[test]
    fn threshold_is_strict_less_than() {
        let model = ensemble("reg:squarederror", json!(0.0));
        assert_eq!(model.predict_row(&[5.0, 0.5]), 1.0 + 0.75);
    }

    #[test]
    fn missing_values_follow_default_direction() {
        let model = ensemble("reg:squarederror", json!(0.0));
        assert_eq!(model.predict_row(&[f64::NAN, f64::NAN]), -1.0 + 0.75);
    }

    #[test]
    fn logistic_objective_maps_base_score_through_logit() {
        let model = ensemble("binary:logistic", json!(0.5));
        assert_eq!(model.link(), Link::Logistic);
        // margin = logit(0.5) + (-1.0 + 0.25) = -0.75
        let p = model.predict_row(&[0.0, 0.0]);
        assert!((p - 1.0 / (1.0 + 0.75f64.exp())).abs() < 1e-12);
    }

    #[test]
    fn poisson_objective_uses_log_link() {
        let model = ensemble("count:poisson", json!(2.0));
        let expected = (2.0f64.ln() + 1.0 + 0.75).exp();
        assert!((model.predict_row(&[9.0, 9.0]) - expected).abs() < 1e-9);
    }

    #[test]
    fn dart_weights_scale_each_tree() {
        let mut v = model_json("reg:squarederror", json!(0.0));
        let trees = v["learner"]["gradient_booster"].clone();
        v["learner"]["gradient_booster"] = json!({
            "name": "dart",
            "gbtree": trees,
            "weight_drop": [0.5, 2.0]
        });
        let model = TreeEnsemble::from_xgboost(XgbModel::from_value(v).unwrap()).unwrap();
        assert_eq!(model.predict_row(&[9.0, 1.0]), 0.5 * 1.0 + 2.0 * 0.75);
    }

    #[test]
    fn rejects_unsupported_models() {
        let mut v = model_json("multi:softprob", json!(0.5));
        assert!(matches!(
            TreeEnsemble::from_xgboost(XgbModel::from_value(v.clone()).unwrap()),
            Err(ModelError::UnsupportedObjective(_))
        ));

        v["learner"]["objective"]["name"] = json!("reg:squarederror");
        v["learner"]["learner_model_param"]["num_class"] = json!("3");
        assert!(matches!(
            TreeEnsemble::from_xgboost(XgbModel::from_value(v.clone()).unwrap()),
            Err(ModelError::MultiClass(3))
        ));

        v["learner"]["learner_model_param"]["num_class"] = json!("0");
        v["learner"]["gradient_booster"]["model"]["trees"][0]["split_type"] = json!([1, 0, 0]);
        assert!(matches!(
            TreeEnsemble::from_xgboost(XgbModel::from_value(v).unwrap()),
            Err(ModelError::CategoricalSplit { tree: 0 })
        ));
    }

    #[test]
    fn rejects_out_of_range_split_feature_and_bad_children() {
        let mut v = model_json("reg:squarederror", json!(0.0));
        v["learner"]["gradient_booster"]["model"]["trees"][1]["split_indices"] = json!([2, 0, 0]);
        assert!(matches!(
            TreeEnsemble::from_xgboost(XgbModel::from_value(v.clone()).unwrap()),
            Err(ModelError::SplitFeatureOutOfRange {
                tree: 1,
                feature: 2,
                width: 2
            })
        ));

        v["learner"]["gradient_booster"]["model"]["trees"][1]["split_indices"] = json!([1, 0, 0]);
        v["learner"]["gradient_booster"]["model"]["trees"][0]["left_children"] = json!([0, -1, -1]);
        assert!(matches!(
            TreeEnsemble::from_xgboost(XgbModel::from_value(v).unwrap()),
            Err(ModelError::MalformedTree { tree: 0, .. })
        ));
    }
}
