//! # id3-tree
//!
//! `id3-tree` grows decision tree classifiers over categorical tabular data
//! with the ID3 algorithm (entropy and information gain attribute selection)
//! and uses them to label new records.
//!
//! ## Getting Started
//!
//! To use `id3-tree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! id3-tree = "*"
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use id3_tree::data::Dataset;
//! use id3_tree::trees::Id3Classifier;
//!
//! let training = Dataset::from_rows(
//!     ["Weather", "Play"],
//!     [["Sunny", "No"], ["Sunny", "No"], ["Rainy", "Yes"], ["Overcast", "Yes"]],
//! )
//! .unwrap();
//!
//! let mut classifier = Id3Classifier::new();
//! classifier.fit(&training).unwrap();
//!
//! let mut unlabeled = Dataset::from_rows(["Weather", "Play"], [["Sunny", "?"]]).unwrap();
//! classifier.predict(&mut unlabeled).unwrap();
//!
//! assert_eq!(unlabeled.records()[0].get(1).unwrap(), "No");
//! ```

/// Records, datasets and delimited text ingestion
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Functions for evaluating classifier performance
pub mod metrics;
/// ID3 decision trees
pub mod trees;

pub use error::{Id3Error, Result};
