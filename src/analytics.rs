//! Catalog-wide summary statistics

use crate::artifact::ModelArtifact;
use crate::catalog::CatalogStore;
use crate::similarity::SimilarityIndex;
use serde::Serialize;
use std::collections::HashSet;

/// Model-level figures reported alongside the catalog statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPerformance {
    pub similarity_matrix_shape: (usize, usize),
    pub feature_count: usize,
    pub is_loaded: bool,
}

/// Catalog-wide summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_restaurants: usize,
    pub total_cuisines: usize,
    pub total_locations: usize,
    pub avg_rating: f64,
    pub avg_cost: f64,
    pub model_performance: ModelPerformance,
}

/// Compute summary statistics over the full catalog.
///
/// Means are arithmetic means over every row. The catalog is never empty
/// here: engine construction rejects a zero-dimension matrix and enforces
/// that the catalog length matches it.
pub fn analyze(
    catalog: &CatalogStore,
    similarity: &SimilarityIndex,
    artifact: &ModelArtifact,
) -> AnalyticsReport {
    let rows = catalog.rows();

    let cuisines: HashSet<&str> = rows.iter().map(|r| r.cuisines.as_str()).collect();
    let locations: HashSet<&str> = rows.iter().map(|r| r.location.as_str()).collect();

    let count = rows.len() as f64;
    let avg_rating = rows.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count;
    let avg_cost = rows.iter().map(|r| f64::from(r.cost)).sum::<f64>() / count;

    let n = similarity.dimension();

    AnalyticsReport {
        total_restaurants: rows.len(),
        total_cuisines: cuisines.len(),
        total_locations: locations.len(),
        avg_rating,
        avg_cost,
        model_performance: ModelPerformance {
            similarity_matrix_shape: (n, n),
            feature_count: artifact.feature_count(),
            is_loaded: true,
        },
    }
}
