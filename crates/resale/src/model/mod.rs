//! Regression model integration.
//!
//! The prediction flow only depends on the [`Regressor`] trait: a model takes
//! one named, ordered [`FeatureRecord`](crate::FeatureRecord) and returns its
//! outputs. The shipped implementation is a CART-style decision tree loaded
//! from a JSON artifact.
//!
//! # Example
//!
//! ```no_run
//! use resale::{DecisionTreeRegressor, PropertyInputs, build_and_predict};
//!
//! let (model, metadata) = DecisionTreeRegressor::load("data/decision_tree_model.json").unwrap();
//! println!("Loaded {} ({})", metadata.file, metadata.hash);
//!
//! let price = build_and_predict(&model, &PropertyInputs::default()).unwrap();
//! println!("Estimated price: {price:.0}");
//! ```

mod metadata;
mod mock;
mod regressor;
mod tree;

pub use metadata::ModelMetadata;
pub use mock::MockRegressor;
pub use regressor::Regressor;
pub use tree::{DecisionTreeRegressor, TreeArtifact, TreeNode};
