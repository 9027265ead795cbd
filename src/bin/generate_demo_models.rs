//! Writes a small, deterministic set of demo artifacts so the dashboard can
//! start without the training pipeline.
//!
//! Usage: `generate_demo_models [OUTPUT_DIR]` (defaults to the current directory).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Value};

const BASE_FEATURES: [&str; 7] = [
    "DR",
    "Start_Depth",
    "Team_ID",
    "Opp_ID",
    "Rolling_SO_5",
    "Rolling_BB_5",
    "Rolling_IP_5",
];

/// Hand-written tree: `Split(feature, threshold, default_left, left, right)`.
enum Node {
    Leaf(f64),
    Split(usize, f64, bool, Box<Node>, Box<Node>),
}

fn split(feature: usize, threshold: f64, left: Node, right: Node) -> Node {
    Node::Split(feature, threshold, true, Box::new(left), Box::new(right))
}

#[derive(Default)]
struct FlatTree {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<usize>,
    split_conditions: Vec<f64>,
    default_left: Vec<u8>,
}

impl FlatTree {
    /// Pre-order layout keeps every child after its parent, as XGBoost does.
    fn push(&mut self, node: &Node) -> i32 {
        let idx = self.left_children.len();
        self.left_children.push(-1);
        self.right_children.push(-1);
        match node {
            Node::Leaf(value) => {
                self.split_indices.push(0);
                self.split_conditions.push(*value);
                self.default_left.push(0);
            }
            Node::Split(feature, threshold, default_left, left, right) => {
                self.split_indices.push(*feature);
                self.split_conditions.push(*threshold);
                self.default_left.push(u8::from(*default_left));
                let l = self.push(left);
                let r = self.push(right);
                self.left_children[idx] = l;
                self.right_children[idx] = r;
            }
        }
        idx as i32
    }

    fn to_json(&self, id: usize) -> Value {
        let n = self.left_children.len();
        json!({
            "id": id,
            "tree_param": {"num_nodes": n.to_string(), "num_feature": "0", "size_leaf_vector": "1", "num_deleted": "0"},
            "left_children": self.left_children,
            "right_children": self.right_children,
            "split_indices": self.split_indices,
            "split_conditions": self.split_conditions,
            "default_left": self.default_left,
            "split_type": vec![0; n],
        })
    }
}

fn xgboost_model(objective: &str, base_score: f64, features: &[&str], trees: &[Node]) -> Value {
    let trees: Vec<Value> = trees
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut flat = FlatTree::default();
            flat.push(t);
            flat.to_json(i)
        })
        .collect();
    json!({
        "version": [2, 0, 3],
        "learner": {
            "feature_names": features,
            "learner_model_param": {
                "base_score": format!("[{base_score:E}]"),
                "num_class": "0",
                "num_feature": features.len().to_string(),
                "num_target": "1",
                "boost_from_average": "1"
            },
            "objective": {"name": objective},
            "gradient_booster": {
                "name": "gbtree",
                "model": {
                    "gbtree_model_param": {"num_trees": trees.len().to_string(), "num_parallel_tree": "1"},
                    "tree_info": vec![0; trees.len()],
                    "trees": trees
                }
            }
        }
    })
}

fn write_artifact(dir: &Path, model_file: &str, model: &Value, features: &[&str]) -> Result<()> {
    let model_path = dir.join(model_file);
    let stem = model_file.trim_end_matches(".json");
    let schema_path = dir.join(format!("{stem}_features.json"));

    std::fs::write(&model_path, serde_json::to_string_pretty(model)?)
        .with_context(|| format!("writing {}", model_path.display()))?;
    std::fs::write(&schema_path, serde_json::to_string_pretty(&json!(features))?)
        .with_context(|| format!("writing {}", schema_path.display()))?;

    println!("Wrote {} and {}", model_path.display(), schema_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    // Indices into BASE_FEATURES
    let (dr, depth, _team, opp, so, bb, ip) = (0, 1, 2, 3, 4, 5, 6);

    // Strikeout regressor: plain game features.
    let so_reg = xgboost_model(
        "reg:squarederror",
        5.0,
        &BASE_FEATURES,
        &[
            split(
                so,
                6.0,
                split(ip, 5.0, Node::Leaf(-1.2), Node::Leaf(-0.4)),
                split(dr, 4.5, Node::Leaf(0.6), Node::Leaf(1.1)),
            ),
            split(opp, 15.0, Node::Leaf(0.2), Node::Leaf(-0.15)),
        ],
    );
    write_artifact(&out_dir, "strikeout_regression_model.json", &so_reg, &BASE_FEATURES)?;

    // Strikeout classifier: game features plus one-hot pitcher columns.
    let mut so_clf_features = BASE_FEATURES.to_vec();
    so_clf_features.extend(["pitcher_id_snellbl01", "pitcher_id_colege01"]);
    let snell = 7;
    let so_clf = xgboost_model(
        "binary:logistic",
        0.5,
        &so_clf_features,
        &[
            split(so, 6.5, Node::Leaf(-0.8), Node::Leaf(0.9)),
            split(snell, 0.5, Node::Leaf(-0.1), Node::Leaf(0.45)),
            split(depth, 2.0, Node::Leaf(0.1), Node::Leaf(-0.2)),
        ],
    );
    write_artifact(&out_dir, "strikeout_model_over6.json", &so_clf, &so_clf_features)?;

    // Walk regressor: reduced, reordered schema.
    let bb_features = ["DR", "Rolling_BB_5", "Rolling_IP_5", "Team_ID"];
    let bb_reg = xgboost_model(
        "reg:squarederror",
        1.8,
        &bb_features,
        &[
            split(1, 2.0, Node::Leaf(-0.5), Node::Leaf(0.7)),
            split(2, 5.5, Node::Leaf(0.15), Node::Leaf(-0.1)),
        ],
    );
    write_artifact(&out_dir, "BB_regression_model.json", &bb_reg, &bb_features)?;

    // Walk classifier: a column the form never provides, so it is always 0.
    let mut bb_clf_features = BASE_FEATURES.to_vec();
    bb_clf_features.push("Extra_Feature");
    let bb_clf = xgboost_model(
        "binary:logistic",
        0.5,
        &bb_clf_features,
        &[
            split(bb, 1.0, Node::Leaf(-0.9), Node::Leaf(0.35)),
            split(7, 0.5, Node::Leaf(0.05), Node::Leaf(-0.3)),
        ],
    );
    write_artifact(&out_dir, "BB_model_over1.json", &bb_clf, &bb_clf_features)?;

    Ok(())
}
