//! Rust implementation of a k-nearest-neighbours classifier
//!
//! Training data is labeled dense feature vectors; labels can be any type
//! that supports equality and hashing.

pub mod core;
pub mod neighbors;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{KnnError, Result};
pub use crate::neighbors::KNN;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
