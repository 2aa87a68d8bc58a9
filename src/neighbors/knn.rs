//! k-nearest-neighbours classifier
//!
//! Classifies a query by majority vote among its `k` nearest training
//! vectors under the Euclidean distance.
//!
//! # Example
//!
//! ```rust
//! use rknn::KNN;
//!
//! # fn main() -> rknn::Result<()> {
//! let x = vec![vec![0.0, 0.0], vec![0.1, 0.2], vec![5.0, 5.0], vec![5.2, 4.9]];
//! let y = vec!["low", "low", "high", "high"];
//!
//! let mut knn = KNN::new().with_num_neighbours(1);
//! knn.train(&x, &y)?;
//!
//! let predictions = knn.predict(&[vec![4.8, 5.1], vec![0.3, 0.0]])?;
//! assert_eq!(predictions, vec!["high", "low"]);
//! # Ok(())
//! # }
//! ```

use crate::core::{Classifier, Datapoint, KnnConfig, KnnError, Neighbour, Result};
use crate::utils::arrays;
use std::hash::Hash;

/// Borrowed training data, `x.len() == y.len()`
#[derive(Debug)]
struct TrainingSet<'a, L> {
    x: &'a [Vec<f64>],
    y: &'a [L],
}

impl<L> Clone for TrainingSet<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for TrainingSet<'_, L> {}

impl<'a, L> TrainingSet<'a, L> {
    fn dim(&self) -> Option<usize> {
        self.x.first().map(Vec::len)
    }
}

/// k-NN classifier with two states: untrained, and trained on a borrowed
/// training set
#[derive(Debug, Clone)]
pub struct KNN<'a, L> {
    config: KnnConfig,
    training: Option<TrainingSet<'a, L>>,
}

impl<'a, L> KNN<'a, L> {
    /// Create an untrained classifier with default options
    pub fn new() -> Self {
        Self {
            config: KnnConfig::default(),
            training: None,
        }
    }

    /// Create an untrained classifier from validated options
    pub fn from_config(config: KnnConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            training: None,
        })
    }

    /// Set the number of neighbours taking part in the vote
    pub fn with_num_neighbours(mut self, num_neighbours: usize) -> Self {
        self.config.num_neighbours = num_neighbours;
        self
    }

    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    pub fn num_neighbours(&self) -> usize {
        self.config.num_neighbours
    }

    /// Whether a training set is stored
    pub fn is_trained(&self) -> bool {
        self.training.is_some()
    }

    /// Number of stored training samples (0 when untrained)
    pub fn n_samples(&self) -> usize {
        self.training.map_or(0, |t| t.x.len())
    }

    /// Dimensionality of the stored training vectors
    pub fn n_features(&self) -> Option<usize> {
        self.training.and_then(|t| t.dim())
    }

    /// Store the training set, replacing any previous one
    ///
    /// Fails if the number of data points and labels differ, or if the
    /// training vectors do not all share the first vector's length.
    pub fn train(&mut self, x: &'a [Vec<f64>], y: &'a [L]) -> Result<()> {
        self.config.validate()?;

        if x.len() != y.len() {
            return Err(KnnError::ShapeMismatch {
                samples: x.len(),
                labels: y.len(),
            });
        }

        if let Some(expected) = x.first().map(Vec::len) {
            check_dimensions(x, expected)?;
        }

        log::debug!(
            "Stored {} training samples (k = {})",
            x.len(),
            self.config.num_neighbours
        );
        self.training = Some(TrainingSet { x, y });
        Ok(())
    }

    /// Distances to the `k` nearest training vectors, closest first
    ///
    /// Equal distances keep training-set order. `k` is clamped to the size
    /// of the training set.
    pub fn kneighbors(&self, sample: &[f64]) -> Result<Vec<Neighbour>> {
        let training = self.trained_set()?;
        check_query(training, sample, 0)?;
        Ok(self.nearest(training, sample))
    }

    fn trained_set(&self) -> Result<TrainingSet<'a, L>> {
        let training = self.training.ok_or(KnnError::NotTrained)?;
        self.config.validate()?;
        if training.x.is_empty() {
            return Err(KnnError::EmptyTrainingSet);
        }
        Ok(training)
    }

    fn nearest(&self, training: TrainingSet<'a, L>, sample: &[f64]) -> Vec<Neighbour> {
        let mut distances: Vec<Neighbour> = arrays::zip_with_index(
            training
                .x
                .iter()
                .map(|x| arrays::euclidean_distance(sample, x)),
        )
        .into_iter()
        .map(|(distance, index)| Neighbour::new(index, distance))
        .collect();

        // sort_by is stable: ties stay in training order. NaN of either sign goes last.
        distances.sort_by(|a, b| {
            a.distance
                .is_nan()
                .cmp(&b.distance.is_nan())
                .then_with(|| a.distance.total_cmp(&b.distance))
        });

        let k = self.config.num_neighbours.min(distances.len());
        distances.truncate(k);
        distances
    }
}

impl<'a, L: Eq + Hash + Clone> KNN<'a, L> {
    /// Predict one label per query vector, in query order
    ///
    /// Every query vector is checked against the training dimensionality
    /// before any prediction is made.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<L>> {
        let training = self.trained_set()?;
        for (index, sample) in x.iter().enumerate() {
            check_query(training, sample, index)?;
        }

        log::debug!(
            "Predicting {} samples against {} training samples",
            x.len(),
            training.x.len()
        );
        x.iter()
            .map(|sample| self.vote(training, sample))
            .collect()
    }

    /// Predict the label of a single query vector
    pub fn predict_sample(&self, sample: &[f64]) -> Result<L> {
        let training = self.trained_set()?;
        check_query(training, sample, 0)?;
        self.vote(training, sample)
    }

    /// Predict every data point and store the result as its class index
    pub fn classify_datapoints(&self, points: &mut [Datapoint<L>]) -> Result<()> {
        let training = self.trained_set()?;
        for (index, point) in points.iter().enumerate() {
            check_query(training, point.features(), index)?;
        }

        for point in points.iter_mut() {
            let label = self.vote(training, point.features())?;
            point.set_class_index(label);
        }
        Ok(())
    }

    /// Majority vote among the nearest neighbours
    ///
    /// Ties go to the label seen first among the neighbours, which are
    /// ordered by ascending distance.
    fn vote(&self, training: TrainingSet<'a, L>, sample: &[f64]) -> Result<L> {
        let neighbours = self.nearest(training, sample);
        let votes = arrays::value_counts(neighbours.iter().map(|n| training.y[n.index].clone()));

        let mut best: Option<(L, usize)> = None;
        for (label, count) in votes {
            if best.as_ref().map_or(true, |&(_, highest)| count > highest) {
                best = Some((label, count));
            }
        }

        best.map(|(label, _)| label).ok_or(KnnError::EmptyTrainingSet)
    }
}

impl<'a, L> Default for KNN<'a, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, L> Classifier<'a, L> for KNN<'a, L>
where
    L: Eq + Hash + Clone + Sync,
{
    fn train(&mut self, x: &'a [Vec<f64>], y: &'a [L]) -> Result<()> {
        KNN::train(self, x, y)
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<L>> {
        KNN::predict(self, x)
    }

    fn is_trained(&self) -> bool {
        KNN::is_trained(self)
    }
}

fn check_dimensions(x: &[Vec<f64>], expected: usize) -> Result<()> {
    match x.iter().position(|v| v.len() != expected) {
        Some(index) => Err(KnnError::DimensionMismatch {
            index,
            expected,
            actual: x[index].len(),
        }),
        None => Ok(()),
    }
}

fn check_query<L>(training: TrainingSet<'_, L>, sample: &[f64], index: usize) -> Result<()> {
    let expected = training.dim().unwrap_or(0);
    if sample.len() != expected {
        return Err(KnnError::DimensionMismatch {
            index,
            expected,
            actual: sample.len(),
        });
    }
    Ok(())
}
