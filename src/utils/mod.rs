//! Utility functions shared by the learners

pub mod arrays;

pub use self::arrays::*;
