//! Decision tree regressor loaded from a JSON artifact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ResaleError, Result};
use crate::input::FeatureRecord;

use super::metadata::ModelMetadata;
use super::regressor::Regressor;

/// One node of the tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node: go `left` when `x[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node holding the predicted value.
    Leaf { value: f64 },
}

/// On-disk representation of a trained tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    /// Human-readable model name.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Feature names in training order.
    pub feature_names: Vec<String>,
    /// Flattened nodes; children always come after their parent.
    pub nodes: Vec<TreeNode>,
}

fn default_model_name() -> String {
    "decision-tree".to_string()
}

fn invalid(message: impl Into<String>) -> ResaleError {
    ResaleError::InvalidModel(message.into())
}

/// CART-style regression tree.
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    name: String,
    feature_names: Vec<String>,
    nodes: Vec<TreeNode>,
}

impl DecisionTreeRegressor {
    /// Build a regressor from an artifact, checking that the tree is well formed.
    ///
    /// Every split must reference a known feature and point forward to
    /// in-bounds children. Each node other than the root must have exactly one
    /// parent, so the nodes form a single tree and every walk over it visits a
    /// node at most once.
    pub fn from_artifact(artifact: TreeArtifact) -> Result<Self> {
        let TreeArtifact {
            name,
            feature_names,
            nodes,
        } = artifact;

        if feature_names.is_empty() {
            return Err(invalid("model declares no features"));
        }
        if nodes.is_empty() {
            return Err(invalid("model has no nodes"));
        }

        let node_count = nodes.len();
        let mut seen = vec![false; node_count];
        seen[0] = true;

        for (index, node) in nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= feature_names.len() {
                        return Err(invalid(format!(
                            "node {index} splits on feature {feature}, but only {} features are declared",
                            feature_names.len()
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {index} has a non-finite threshold")));
                    }
                    for child in [left, right] {
                        if child <= index || child >= node_count {
                            return Err(invalid(format!(
                                "node {index} has invalid child {child} (tree has {node_count} nodes)"
                            )));
                        }
                        if seen[child] {
                            return Err(invalid(format!(
                                "node {child} has more than one parent (again from node {index})"
                            )));
                        }
                        seen[child] = true;
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!("leaf {index} has a non-finite value")));
                    }
                }
            }
        }

        if let Some(orphan) = seen.iter().position(|reached| !reached) {
            return Err(invalid(format!("node {orphan} is not reachable from the root")));
        }

        Ok(Self {
            name,
            feature_names,
            nodes,
        })
    }

    /// Parse and validate an artifact from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let artifact: TreeArtifact =
            serde_json::from_slice(bytes).map_err(|e| invalid(format!("invalid model JSON: {e}")))?;
        Self::from_artifact(artifact)
    }

    /// Load a model file and describe it.
    ///
    /// A missing, unreadable or malformed file is a `ResourceLoad` error.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, ModelMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| ResaleError::resource_load(path, e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let model = Self::from_slice(&contents)
            .map_err(|e| ResaleError::resource_load(path, e.to_string()))?;

        let metadata = ModelMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            model.node_count(),
            model.depth(),
        );

        Ok((model, metadata))
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TreeNode::Leaf { .. }))
            .count()
    }

    /// Longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some(TreeNode::Split { left, right, .. }) = self.nodes.get(index) {
                stack.push((*left, depth + 1));
                stack.push((*right, depth + 1));
            }
        }
        deepest
    }

    /// Walk the tree for an already ordered feature vector.
    fn evaluate(&self, features: &[f64]) -> Result<f64> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => {
                    return Err(ResaleError::Inference(format!(
                        "tree walked to missing node {index}"
                    )));
                }
            }
        }
    }
}

impl Regressor for DecisionTreeRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        if record.len() != self.feature_names.len() {
            return Err(ResaleError::Inference(format!(
                "model expects {} features, record has {}",
                self.feature_names.len(),
                record.len()
            )));
        }

        let mut features = Vec::with_capacity(record.len());
        for (position, ((name, value), expected)) in
            record.iter().zip(&self.feature_names).enumerate()
        {
            if *name != expected.as_str() {
                return Err(ResaleError::Inference(format!(
                    "feature {position} is '{name}', model expects '{expected}'"
                )));
            }
            if !value.is_finite() {
                return Err(ResaleError::Inference(format!(
                    "feature '{name}' is not a finite number"
                )));
            }
            features.push(*value);
        }

        Ok(vec![self.evaluate(&features)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn two_feature_tree() -> DecisionTreeRegressor {
        let json = r#"{
            "name": "toy",
            "feature_names": ["a", "b"],
            "nodes": [
                {"kind": "split", "feature": 0, "threshold": 10.0, "left": 1, "right": 2},
                {"kind": "leaf", "value": 100.0},
                {"kind": "split", "feature": 1, "threshold": 0.5, "left": 3, "right": 4},
                {"kind": "leaf", "value": 200.0},
                {"kind": "leaf", "value": 300.0}
            ]
        }"#;
        DecisionTreeRegressor::from_slice(json.as_bytes()).unwrap()
    }

    fn record(a: f64, b: f64) -> FeatureRecord {
        [("a", a), ("b", b)].into_iter().collect()
    }

    #[test]
    fn test_threshold_goes_left_when_equal() {
        let tree = two_feature_tree();
        assert_eq!(tree.predict(&record(10.0, 9.0)).unwrap(), vec![100.0]);
        assert_eq!(tree.predict(&record(10.5, 0.5)).unwrap(), vec![200.0]);
        assert_eq!(tree.predict(&record(10.5, 0.6)).unwrap(), vec![300.0]);
    }

    #[test]
    fn test_shape_statistics() {
        let tree = two_feature_tree();
        assert_eq!(tree.name(), "toy");
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_rejects_reordered_record() {
        let tree = two_feature_tree();
        let swapped: FeatureRecord = [("b", 1.0), ("a", 1.0)].into_iter().collect();
        let err = tree.predict(&swapped).unwrap_err();
        assert!(matches!(err, ResaleError::Inference(_)));
        assert!(err.to_string().contains("feature 0 is 'b'"));
    }

    #[test]
    fn test_rejects_wrong_feature_count() {
        let tree = two_feature_tree();
        let short: FeatureRecord = [("a", 1.0)].into_iter().collect();
        assert!(matches!(tree.predict(&short), Err(ResaleError::Inference(_))));
    }

    #[test]
    fn test_rejects_non_finite_feature() {
        let tree = two_feature_tree();
        assert!(tree.predict(&record(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_rejects_backward_child() {
        let artifact = TreeArtifact {
            name: "loop".into(),
            feature_names: vec!["a".into()],
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        let err = DecisionTreeRegressor::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ResaleError::InvalidModel(_)));
        assert!(err.to_string().contains("invalid child 0"));
    }

    #[test]
    fn test_rejects_shared_child() {
        // Each split points both branches at the next node: a chain of
        // shared children whose root-to-leaf paths double per level.
        let depth = 40;
        let mut nodes: Vec<TreeNode> = (0..depth)
            .map(|index| TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: index + 1,
                right: index + 1,
            })
            .collect();
        nodes.push(TreeNode::Leaf { value: 1.0 });

        let artifact = TreeArtifact {
            name: "shared".into(),
            feature_names: vec!["a".into()],
            nodes,
        };
        let err = DecisionTreeRegressor::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ResaleError::InvalidModel(_)));
        assert!(err.to_string().contains("node 1 has more than one parent"));
    }

    #[test]
    fn test_rejects_child_shared_across_parents() {
        let artifact = TreeArtifact {
            name: "diamond".into(),
            feature_names: vec!["a".into()],
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 3,
                    right: 4,
                },
                TreeNode::Split {
                    feature: 0,
                    threshold: 2.0,
                    left: 3,
                    right: 4,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ],
        };
        assert!(DecisionTreeRegressor::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_rejects_unreachable_node() {
        let artifact = TreeArtifact {
            name: "orphan".into(),
            feature_names: vec!["a".into()],
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
                TreeNode::Leaf { value: 3.0 },
            ],
        };
        let err = DecisionTreeRegressor::from_artifact(artifact).unwrap_err();
        assert_eq!(err.to_string(), "Invalid model: node 3 is not reachable from the root");
    }

    #[test]
    fn test_load_reports_invalid_tree_as_resource_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"feature_names": ["a"], "nodes": [
                {"kind": "split", "feature": 0, "threshold": 1.0, "left": 1, "right": 1},
                {"kind": "leaf", "value": 1.0}
            ]}"#,
        )
        .unwrap();

        let err = DecisionTreeRegressor::load(file.path()).unwrap_err();
        assert!(matches!(err, ResaleError::ResourceLoad { .. }));
        assert!(err.to_string().contains("more than one parent"));
    }

    #[test]
    fn test_rejects_unknown_split_feature() {
        let artifact = TreeArtifact {
            name: "bad".into(),
            feature_names: vec!["a".into()],
            nodes: vec![
                TreeNode::Split {
                    feature: 3,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ],
        };
        assert!(DecisionTreeRegressor::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_rejects_empty_tree() {
        let result = DecisionTreeRegressor::from_slice(br#"{"feature_names": ["a"], "nodes": []}"#);
        assert_eq!(result.unwrap_err().to_string(), "Invalid model: model has no nodes");
    }

    #[test]
    fn test_default_name() {
        let tree = DecisionTreeRegressor::from_slice(
            br#"{"feature_names": ["a"], "nodes": [{"kind": "leaf", "value": 7.0}]}"#,
        )
        .unwrap();
        assert_eq!(tree.name(), "decision-tree");
        assert_eq!(tree.depth(), 0);
        let single: FeatureRecord = [("a", 3.0)].into_iter().collect();
        assert_eq!(tree.predict(&single).unwrap(), vec![7.0]);
    }
}
