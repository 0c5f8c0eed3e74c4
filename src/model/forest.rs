use super::{FeatureRecord, RiskModel};
use crate::error::{CropRiskError, Result};
use crate::models::RiskLevel;
use serde::Deserialize;
use std::path::Path;

const NUMERIC_FEATURES: usize = 3;

#[derive(Debug, Clone, Deserialize)]
struct ForestArtifact {
    #[serde(default = "default_name")]
    name: String,
    classes: Vec<String>,
    diseases: Vec<String>,
    severities: Vec<String>,
    trees: Vec<TreeArtifact>,
}

fn default_name() -> String {
    "random_forest".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct TreeArtifact {
    feature: Vec<i64>,
    threshold: Vec<f64>,
    left: Vec<i64>,
    right: Vec<i64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Normalised class distribution
    Leaf(Vec<f64>),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(t: TreeArtifact, n_features: usize, n_classes: usize) -> Result<Self> {
        let n = t.feature.len();
        if n == 0 {
            return Err(invalid("tree has no nodes"));
        }
        if t.threshold.len() != n || t.left.len() != n || t.right.len() != n || t.value.len() != n
        {
            return Err(invalid("inconsistent node array lengths"));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            if t.feature[i] < 0 {
                let counts = &t.value[i];
                if counts.len() != n_classes {
                    return Err(invalid(format!(
                        "leaf {} has {} class weights, expected {}",
                        i,
                        counts.len(),
                        n_classes
                    )));
                }
                if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                    return Err(invalid(format!("leaf {} has invalid class weights", i)));
                }
                let total: f64 = counts.iter().sum();
                if total <= 0.0 {
                    return Err(invalid(format!("leaf {} has no class weight", i)));
                }
                nodes.push(Node::Leaf(counts.iter().map(|c| c / total).collect()));
                continue;
            }

            let feature = t.feature[i] as usize;
            if feature >= n_features {
                return Err(invalid(format!(
                    "node {} splits on feature {} of {}",
                    i, feature, n_features
                )));
            }
            // Children always follow their parent, which also rules out cycles
            let child = |c: i64| -> Result<usize> {
                if c > i as i64 && (c as usize) < n {
                    Ok(c as usize)
                } else {
                    Err(invalid(format!("node {} has invalid child {}", i, c)))
                }
            };
            nodes.push(Node::Split {
                feature,
                threshold: t.threshold[i],
                left: child(t.left[i])?,
                right: child(t.right[i])?,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_distribution(&self, x: &[f64]) -> Result<&[f64]> {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf(dist)) => return Ok(dist.as_slice()),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).copied().ok_or_else(|| {
                        CropRiskError::ModelInference(format!("missing feature {}", feature))
                    })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(CropRiskError::ModelInference(format!(
                        "node {} out of range",
                        idx
                    )))
                }
            }
        }
    }
}

fn invalid(msg: impl Into<String>) -> CropRiskError {
    CropRiskError::ModelUnavailable(msg.into())
}

/// Random forest over the four risk levels, loaded from a JSON artifact.
///
/// Trees use the array layout sklearn exports: parallel `feature`,
/// `threshold`, `left`, `right` arrays plus a per-node class distribution in
/// `value`. Leaves have a negative feature index. Samples with
/// `x[feature] <= threshold` go left.
///
/// Feature vector layout: one-hot disease (artifact vocabulary order), one-hot
/// severity, then mean temperature, 7-day rainfall and humidity. Categories the
/// artifact does not know encode as all zeros.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    name: String,
    classes: Vec<RiskLevel>,
    diseases: Vec<String>,
    severities: Vec<String>,
    trees: Vec<Tree>,
}

impl RandomForestModel {
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ForestArtifact = serde_json::from_str(json)
            .map_err(|e| invalid(format!("malformed model artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| invalid(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    fn from_artifact(artifact: ForestArtifact) -> Result<Self> {
        if artifact.classes.is_empty() {
            return Err(invalid("model declares no classes"));
        }
        let classes = artifact
            .classes
            .iter()
            .map(|c| {
                RiskLevel::parse(c).ok_or_else(|| invalid(format!("unknown class label '{}'", c)))
            })
            .collect::<Result<Vec<_>>>()?;

        if artifact.trees.is_empty() {
            return Err(invalid("model has no trees"));
        }

        let n_features = artifact.diseases.len() + artifact.severities.len() + NUMERIC_FEATURES;
        let trees = artifact
            .trees
            .into_iter()
            .map(|t| Tree::from_artifact(t, n_features, classes.len()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: artifact.name,
            classes,
            diseases: artifact.diseases,
            severities: artifact.severities,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn classes(&self) -> &[RiskLevel] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.diseases.len() + self.severities.len() + NUMERIC_FEATURES
    }

    fn encode(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut x = Vec::with_capacity(self.n_features());
        x.extend(
            self.diseases
                .iter()
                .map(|d| if *d == record.disease { 1.0 } else { 0.0 }),
        );
        x.extend(
            self.severities
                .iter()
                .map(|s| if *s == record.severity { 1.0 } else { 0.0 }),
        );
        x.push(record.tmean_c);
        x.push(record.rain_7d_mm);
        x.push(record.humidity_pct);
        x
    }
}

impl RiskModel for RandomForestModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureRecord) -> Result<RiskLevel> {
        let proba = self.predict_proba(features)?;
        // First maximum wins on ties
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes
            .get(best)
            .copied()
            .ok_or_else(|| CropRiskError::ModelInference("empty probability vector".into()))
    }

    fn predict_proba(&self, features: &FeatureRecord) -> Result<Vec<f64>> {
        let x = self.encode(features);
        if x.iter().any(|v| !v.is_finite()) {
            return Err(CropRiskError::ModelInference(
                "non-finite feature value".into(),
            ));
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(&x)?) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }
}
