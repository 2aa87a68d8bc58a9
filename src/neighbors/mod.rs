//! Neighbour-based learners
//!
//! Training data is borrowed, not copied: a trained classifier holds shared
//! references to the caller's feature matrix and labels, and the borrow
//! checker keeps those buffers immutable for as long as the classifier lives.

pub mod knn;

pub use self::knn::*;
