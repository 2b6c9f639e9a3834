//! Recommendation engine: artifact loading, ranking, readiness gate

use crate::analytics::{self, AnalyticsReport};
use crate::artifact::ModelArtifact;
use crate::catalog::{CatalogRow, CatalogStore, SearchParams};
use crate::error::{RecError, Result};
use crate::resolver;
use crate::similarity::SimilarityIndex;
use rayon::slice::ParallelSliceMut;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info};

/// Locations of the three load-time artifacts.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    /// Tabular catalog (CSV).
    pub catalog: PathBuf,
    /// Dense similarity matrix (binary).
    pub matrix: PathBuf,
    /// Trained-model metadata bundle (JSON).
    pub artifact: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("models/restaurant_data.csv"),
            matrix: PathBuf::from("models/similarity_matrix.bin"),
            artifact: PathBuf::from("models/recommender_meta.json"),
        }
    }
}

/// One recommended restaurant with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRestaurant {
    #[serde(flatten)]
    pub restaurant: CatalogRow,
    pub similarity_score: f32,
}

/// Result of a recommendation query: the resolved query row, the ranked
/// neighbor list, and aggregate quality metrics over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub query_restaurant: CatalogRow,
    pub recommendations: Vec<ScoredRestaurant>,
    pub total_recommendations: usize,
    pub avg_similarity: f32,
    pub diversity_score: f32,
    pub coverage_score: f32,
}

/// A fully-loaded engine: catalog, similarity matrix, and model metadata,
/// immutable for the process lifetime. All operations are pure reads.
#[derive(Debug)]
pub struct Engine {
    catalog: CatalogStore,
    similarity: SimilarityIndex,
    artifact: ModelArtifact,
}

impl Engine {
    /// Load all three artifacts and validate that the catalog and matrix
    /// agree on the row count.
    pub fn load(paths: &ModelPaths) -> Result<Self> {
        let artifact = ModelArtifact::load(&paths.artifact)?;
        let catalog = CatalogStore::load_csv(&paths.catalog)?;
        let similarity = SimilarityIndex::open(&paths.matrix)?;
        Self::from_parts(catalog, similarity, artifact)
    }

    /// Assemble an engine from already-loaded parts (tests, embedders).
    pub fn from_parts(
        catalog: CatalogStore,
        similarity: SimilarityIndex,
        artifact: ModelArtifact,
    ) -> Result<Self> {
        if catalog.len() != similarity.dimension() {
            return Err(RecError::DimensionMismatch {
                expected: catalog.len(),
                actual: similarity.dimension(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
            artifact,
        })
    }

    /// Rank the neighbors of the restaurant resolved from `query`.
    ///
    /// The full similarity row is sorted by score descending (ties broken by
    /// ascending index, so output is deterministic), the single top-ranked
    /// entry is skipped — self-similarity is the row maximum, so it is rank 0
    /// by construction; entries merely tied with it stay eligible — then the
    /// next `top_n` entries are kept and filtered by the inclusive
    /// `min_similarity` floor.
    pub fn recommend(
        &self,
        query: &str,
        top_n: usize,
        min_similarity: f32,
    ) -> Result<Recommendation> {
        let index = resolver::resolve(query, &self.catalog).ok_or_else(|| {
            RecError::RestaurantNotFound {
                name: query.to_string(),
            }
        })?;

        let row = self.similarity.row(index)?;
        let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        scored.par_sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let survivors: Vec<(usize, f32)> = scored
            .into_iter()
            .skip(1)
            .take(top_n)
            .filter(|&(_, score)| score >= min_similarity)
            .collect();

        if survivors.is_empty() {
            return Err(RecError::NoSimilarRestaurants);
        }

        let mut recommendations = Vec::with_capacity(survivors.len());
        for &(i, score) in &survivors {
            recommendations.push(ScoredRestaurant {
                restaurant: self.catalog.get(i)?.clone(),
                similarity_score: score,
            });
        }

        let count = recommendations.len();
        let avg_similarity =
            survivors.iter().map(|&(_, score)| score).sum::<f32>() / count as f32;

        let cuisines: HashSet<&str> = recommendations
            .iter()
            .map(|r| r.restaurant.cuisines.as_str())
            .collect();
        let locations: HashSet<&str> = recommendations
            .iter()
            .map(|r| r.restaurant.location.as_str())
            .collect();
        let diversity_score = cuisines.len() as f32 / count as f32;
        let coverage_score = locations.len() as f32 / count as f32;

        Ok(Recommendation {
            query_restaurant: self.catalog.get(index)?.clone(),
            recommendations,
            total_recommendations: count,
            avg_similarity,
            diversity_score,
            coverage_score,
        })
    }

    /// Catalog-wide summary statistics.
    pub fn analyze(&self) -> AnalyticsReport {
        analytics::analyze(&self.catalog, &self.similarity, &self.artifact)
    }

    /// Filtered catalog scan.
    pub fn search(&self, params: &SearchParams) -> Vec<CatalogRow> {
        self.catalog
            .search(params)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityIndex {
        &self.similarity
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

/// Process-wide holder for the engine, with an explicit readiness gate.
///
/// A load failure is sticky: the service keeps answering, every read
/// operation returns `NotReady`, and nothing is retried.
#[derive(Debug)]
pub struct Recommender {
    engine: Option<Engine>,
}

impl Recommender {
    /// A recommender with no loaded engine (the pre-load state).
    pub fn not_ready() -> Self {
        Self { engine: None }
    }

    /// Load the engine from disk; on failure, log and stay not-ready.
    pub fn load(paths: &ModelPaths) -> Self {
        match Engine::load(paths) {
            Ok(engine) => {
                info!(
                    restaurants = engine.catalog().len(),
                    features = engine.artifact().feature_count(),
                    "recommendation models loaded"
                );
                Self {
                    engine: Some(engine),
                }
            }
            Err(e) => {
                error!(error = %e, "failed to load recommendation models, serving not-ready");
                Self { engine: None }
            }
        }
    }

    /// Wrap an already-constructed engine.
    pub fn from_engine(engine: Engine) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Whether the engine loaded successfully.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    fn engine(&self) -> Result<&Engine> {
        self.engine.as_ref().ok_or(RecError::NotReady)
    }

    /// See [`Engine::recommend`]. Fails with `NotReady` before a successful load.
    pub fn recommend(
        &self,
        query: &str,
        top_n: usize,
        min_similarity: f32,
    ) -> Result<Recommendation> {
        self.engine()?.recommend(query, top_n, min_similarity)
    }

    /// See [`Engine::analyze`]. Fails with `NotReady` before a successful load.
    pub fn analyze(&self) -> Result<AnalyticsReport> {
        Ok(self.engine()?.analyze())
    }

    /// See [`Engine::search`]. Fails with `NotReady` before a successful load.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<CatalogRow>> {
        Ok(self.engine()?.search(params))
    }
}
