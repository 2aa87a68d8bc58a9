//! Core type definitions

use crate::core::{KnnError, Result};
use serde::{Deserialize, Serialize};

/// Default number of neighbours taking part in the majority vote
pub const DEFAULT_NUM_NEIGHBOURS: usize = 3;

/// A single sample: features, an optional class label and a "marked" flag
///
/// The class index is filled in after construction, e.g. once the point has
/// been classified. `marked` is independent of classification and is meant for
/// display purposes such as highlighting support vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datapoint<L> {
    pub features: Vec<f64>,
    pub class_index: Option<L>,
    #[serde(default)]
    pub marked: bool,
}

impl<L> Datapoint<L> {
    /// Create an unlabeled, unmarked data point
    pub fn new(features: Vec<f64>) -> Self {
        Self {
            features,
            class_index: None,
            marked: false,
        }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Number of features
    pub fn dim(&self) -> usize {
        self.features.len()
    }

    pub fn set_class_index(&mut self, class_index: L) {
        self.class_index = Some(class_index);
    }

    pub fn class_index(&self) -> Option<&L> {
        self.class_index.as_ref()
    }

    /// Change the "marked" status, e.g. for support vectors
    pub fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// User-facing options for the k-NN classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct KnnConfig {
    /// Number of nearest neighbours to consider for the majority vote
    pub num_neighbours: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            num_neighbours: DEFAULT_NUM_NEIGHBOURS,
        }
    }
}

impl KnnConfig {
    /// Check that the options describe a usable classifier
    pub fn validate(&self) -> Result<()> {
        if self.num_neighbours == 0 {
            return Err(KnnError::InvalidParameter(
                "numNeighbours must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse options from a JSON object such as `{"numNeighbours": 5}`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| KnnError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Distance from a query to one training vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Position of the training vector in the training set
    pub index: usize,
    /// Euclidean distance to the query
    pub distance: f64,
}

impl Neighbour {
    pub fn new(index: usize, distance: f64) -> Self {
        Self { index, distance }
    }
}
