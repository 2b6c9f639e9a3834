//! # dinerec
//!
//! A content-based restaurant recommendation engine in Rust.
//!
//! This library provides:
//! - A fixed restaurant catalog loaded from a tabular artifact
//! - A precomputed pairwise similarity matrix, loaded and held immutable
//! - Exact-then-fuzzy restaurant name resolution
//! - Similarity-ranked recommendations with a similarity floor and
//!   aggregate quality metrics
//! - Catalog-wide analytics
//!
//! ## Example
//!
//! ```rust
//! use dinerec::{CatalogRow, CatalogStore, Engine, ModelArtifact, Recommender, SimilarityIndex};
//! use ndarray::array;
//!
//! let catalog = CatalogStore::from_rows(vec![
//!     CatalogRow {
//!         index: 0,
//!         name: "Pizza Place".to_string(),
//!         location: "Indiranagar".to_string(),
//!         cuisines: "Italian".to_string(),
//!         cost: 10.0,
//!         rating: 4.0,
//!         rest_type: "Casual Dining".to_string(),
//!     },
//!     CatalogRow {
//!         index: 1,
//!         name: "Pizza Palace".to_string(),
//!         location: "Koramangala".to_string(),
//!         cuisines: "Italian".to_string(),
//!         cost: 12.0,
//!         rating: 4.2,
//!         rest_type: "Casual Dining".to_string(),
//!     },
//! ]);
//! let similarity = SimilarityIndex::from_matrix(array![[1.0, 0.9], [0.9, 1.0]]).unwrap();
//! let engine = Engine::from_parts(catalog, similarity, ModelArtifact::default()).unwrap();
//!
//! let service = Recommender::from_engine(engine);
//! let result = service.recommend("Pizza Place", 5, 0.3).unwrap();
//! assert_eq!(result.recommendations[0].restaurant.name, "Pizza Palace");
//! ```

pub mod analytics;
pub mod artifact;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod resolver;
pub mod server;
pub mod similarity;

pub use analytics::{AnalyticsReport, ModelPerformance};
pub use artifact::ModelArtifact;
pub use catalog::{CatalogRow, CatalogStore, SearchParams};
pub use engine::{Engine, ModelPaths, Recommendation, Recommender, ScoredRestaurant};
pub use error::{RecError, Result};
pub use similarity::SimilarityIndex;
