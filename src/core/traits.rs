//! Core traits for supervised learners

use crate::core::Result;

/// A supervised classifier over dense feature vectors
///
/// `train` borrows the training data for the lifetime `'a`, so a trained
/// classifier can never observe the caller's buffers changing underneath it.
pub trait Classifier<'a, L>: Send + Sync {
    /// Store the training set, replacing any previous one
    fn train(&mut self, x: &'a [Vec<f64>], y: &'a [L]) -> Result<()>;

    /// Predict one label per query vector, in query order
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<L>>;

    /// Whether `train` has succeeded at least once
    fn is_trained(&self) -> bool;
}
