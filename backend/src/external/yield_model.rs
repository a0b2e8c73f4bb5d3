//! Gradient-boosted tree yield model
//!
//! Evaluates a regression model saved with XGBoost's JSON format
//! (`Booster.save_model("model.json")`). Only inference is supported.

use std::path::Path;

use serde::Deserialize;
use shared::{ModelFeatureVector, YieldPrediction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("unsupported objective '{0}'")]
    UnsupportedObjective(String),

    #[error("model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

/// Anything that maps a feature vector to a yield per unit area
pub trait YieldEstimator: Send + Sync {
    fn predict(&self, features: &ModelFeatureVector) -> Result<YieldPrediction, EstimatorError>;

    /// Training column names, when the model carries them
    fn feature_names(&self) -> Option<&[String]>;

    fn num_features(&self) -> usize;
}

// ----------------------------------------------------------------------------
// XGBoost JSON layout
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct XgbDocument {
    learner: XgbLearner,
}

#[derive(Debug, Deserialize)]
struct XgbLearner {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: XgbBooster,
    learner_model_param: XgbModelParam,
    objective: XgbObjective,
}

#[derive(Debug, Deserialize)]
struct XgbBooster {
    name: String,
    model: Option<XgbTreeEnsemble>,
}

#[derive(Debug, Deserialize)]
struct XgbTreeEnsemble {
    trees: Vec<XgbTree>,
}

#[derive(Debug, Deserialize)]
struct XgbTree {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
}

/// `default_left` is written as 0/1 by newer releases and as booleans by older ones
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct XgbModelParam {
    base_score: String,
    num_feature: String,
}

#[derive(Debug, Deserialize)]
struct XgbObjective {
    name: String,
}

// ----------------------------------------------------------------------------
// Evaluator
// ----------------------------------------------------------------------------

const LEAF: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
struct TreeNode {
    left: i32,
    right: i32,
    feature: usize,
    /// Split threshold for internal nodes, leaf value for leaves
    value: f32,
    default_left: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn from_xgb(index: usize, tree: XgbTree, num_features: usize) -> Result<Self, EstimatorError> {
        let n = tree.left_children.len();
        if n == 0
            || tree.right_children.len() != n
            || tree.split_indices.len() != n
            || tree.split_conditions.len() != n
            || tree.default_left.len() != n
        {
            return Err(EstimatorError::InvalidModel(format!(
                "tree {} has inconsistent node arrays",
                index
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (tree.left_children[i], tree.right_children[i]);
            let feature = tree.split_indices[i] as usize;
            if left != LEAF {
                let in_range = |c: i32| c > 0 && (c as usize) < n;
                if !in_range(left) || !in_range(right) {
                    return Err(EstimatorError::InvalidModel(format!(
                        "tree {} node {} has an out-of-range child",
                        index, i
                    )));
                }
                if feature >= num_features {
                    return Err(EstimatorError::InvalidModel(format!(
                        "tree {} node {} splits on feature {} of {}",
                        index, i, feature, num_features
                    )));
                }
            }
            nodes.push(TreeNode {
                left,
                right,
                feature,
                value: tree.split_conditions[i],
                default_left: tree.default_left[i].is_set(),
            });
        }

        Ok(Self { nodes })
    }

    /// Leaf value reached by `features`.
    ///
    /// Goes left when `x < threshold`, and follows the default branch for NaN.
    fn leaf_value(&self, features: &[f32]) -> f32 {
        let mut idx = 0usize;

        // A well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            let node = &self.nodes[idx];
            if node.left == LEAF {
                return node.value;
            }

            let x = features[node.feature];
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                x < node.value
            };
            idx = if go_left { node.left } else { node.right } as usize;
        }

        0.0
    }
}

/// How the summed margin maps to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Identity,
    Log,
}

impl Link {
    fn for_objective(name: &str) -> Result<Self, EstimatorError> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:squaredlogerror" => Ok(Link::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Link::Log),
            other => Err(EstimatorError::UnsupportedObjective(other.to_string())),
        }
    }
}

/// XGBoost regression ensemble loaded once at startup
#[derive(Debug, Clone)]
pub struct GbdtYieldModel {
    trees: Vec<RegressionTree>,
    base_margin: f32,
    link: Link,
    feature_names: Option<Vec<String>>,
    num_features: usize,
}

/// Parse `"5E-1"` or the bracketed `"[5E-1]"` written by newer releases
fn parse_param(raw: &str, name: &str) -> Result<f64, EstimatorError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .parse::<f64>()
        .map_err(|_| EstimatorError::InvalidModel(format!("bad {} '{}'", name, raw)))
}

impl GbdtYieldModel {
    /// Load a model file. Failure here is fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EstimatorError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| EstimatorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            trees = model.trees.len(),
            features = model.num_features,
            "Yield model loaded"
        );
        Ok(model)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EstimatorError> {
        let doc: XgbDocument = serde_json::from_str(raw)?;
        let learner = doc.learner;

        if learner.gradient_booster.name != "gbtree" {
            return Err(EstimatorError::InvalidModel(format!(
                "booster '{}' is not a tree ensemble",
                learner.gradient_booster.name
            )));
        }
        let ensemble = learner
            .gradient_booster
            .model
            .ok_or_else(|| EstimatorError::InvalidModel("missing tree ensemble".to_string()))?;

        let link = Link::for_objective(&learner.objective.name)?;
        let num_features = parse_param(&learner.learner_model_param.num_feature, "num_feature")? as usize;
        let base_score = parse_param(&learner.learner_model_param.base_score, "base_score")?;

        let base_margin = match link {
            Link::Identity => base_score,
            Link::Log => base_score.ln(),
        } as f32;

        let trees = ensemble
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| RegressionTree::from_xgb(i, t, num_features))
            .collect::<Result<Vec<_>, _>>()?;

        let feature_names = if learner.feature_names.is_empty() {
            None
        } else if learner.feature_names.len() != num_features {
            return Err(EstimatorError::InvalidModel(format!(
                "{} feature names for {} features",
                learner.feature_names.len(),
                num_features
            )));
        } else {
            Some(learner.feature_names)
        };

        Ok(Self {
            trees,
            base_margin,
            link,
            feature_names,
            num_features,
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl YieldEstimator for GbdtYieldModel {
    fn predict(&self, features: &ModelFeatureVector) -> Result<YieldPrediction, EstimatorError> {
        if features.len() != self.num_features {
            return Err(EstimatorError::FeatureCount {
                expected: self.num_features,
                actual: features.len(),
            });
        }

        // Split thresholds are single precision
        let x: Vec<f32> = features.as_slice().iter().map(|v| *v as f32).collect();

        let margin = self
            .trees
            .iter()
            .fold(self.base_margin, |acc, tree| acc + tree.leaf_value(&x));

        let value = match self.link {
            Link::Identity => margin,
            Link::Log => margin.exp(),
        };
        Ok(YieldPrediction::new(value as f64))
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn num_features(&self) -> usize {
        self.num_features
    }
}
