//! Integration tests for the recommendation engine

use dinerec::{
    CatalogRow, CatalogStore, Engine, ModelArtifact, ModelPaths, RecError, Recommender,
    SimilarityIndex,
};
use ndarray::array;
use std::path::PathBuf;

fn row(name: &str, location: &str, cuisines: &str, cost: f32, rating: f32, rest_type: &str) -> CatalogRow {
    CatalogRow {
        index: 0,
        name: name.to_string(),
        location: location.to_string(),
        cuisines: cuisines.to_string(),
        cost,
        rating,
        rest_type: rest_type.to_string(),
    }
}

fn pizza_engine() -> Engine {
    let catalog = CatalogStore::from_rows(vec![
        row("Pizza Place", "Indiranagar", "Italian", 10.0, 4.0, "Casual"),
        row("Pizza Palace", "Koramangala", "Italian", 12.0, 4.2, "Casual"),
        row("Sushi Bar", "Indiranagar", "Japanese", 20.0, 4.5, "Fine"),
    ]);
    let similarity = SimilarityIndex::from_matrix(array![
        [1.0, 0.9, 0.1],
        [0.9, 1.0, 0.2],
        [0.1, 0.2, 1.0],
    ])
    .unwrap();
    Engine::from_parts(catalog, similarity, ModelArtifact::default()).unwrap()
}

#[test]
fn recommend_pizza_place_scenario() {
    let service = Recommender::from_engine(pizza_engine());
    let result = service.recommend("Pizza Place", 2, 0.3).unwrap();

    assert_eq!(result.query_restaurant.name, "Pizza Place");
    assert_eq!(result.total_recommendations, 1);
    assert_eq!(result.recommendations[0].restaurant.index, 1);
    assert_eq!(result.recommendations[0].restaurant.name, "Pizza Palace");
    assert!((result.recommendations[0].similarity_score - 0.9).abs() < 1e-6);
    assert!((result.avg_similarity - 0.9).abs() < 1e-6);
    assert!((result.diversity_score - 1.0).abs() < 1e-6);
    assert!((result.coverage_score - 1.0).abs() < 1e-6);
}

#[test]
fn recommend_nonexistent_restaurant() {
    let service = Recommender::from_engine(pizza_engine());
    assert!(matches!(
        service.recommend("Nonexistent", 5, 0.0),
        Err(RecError::RestaurantNotFound { .. })
    ));
}

#[test]
fn recommend_with_unreachable_floor() {
    let service = Recommender::from_engine(pizza_engine());
    assert!(matches!(
        service.recommend("Pizza Place", 2, 0.95),
        Err(RecError::NoSimilarRestaurants)
    ));
}

#[test]
fn recommend_before_load_is_not_ready() {
    let service = Recommender::not_ready();
    assert!(!service.is_ready());
    assert!(matches!(
        service.recommend("Pizza Place", 2, 0.3),
        Err(RecError::NotReady)
    ));
}

#[test]
fn recommend_is_idempotent() {
    let service = Recommender::from_engine(pizza_engine());
    let first = service.recommend("Pizza Place", 2, 0.0).unwrap();
    let second = service.recommend("Pizza Place", 2, 0.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fuzzy_query_reaches_ranker() {
    let service = Recommender::from_engine(pizza_engine());
    let result = service.recommend("sushi", 2, 0.0).unwrap();
    assert_eq!(result.query_restaurant.name, "Sushi Bar");
}

#[test]
fn load_from_artifacts_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();

    let catalog_path = dir.path().join("restaurant_data.csv");
    std::fs::write(
        &catalog_path,
        "name,location,cuisines,cost_clean,rating_clean,rest_type\n\
         Pizza Place,Indiranagar,Italian,10.0,4.0,Casual\n\
         Pizza Palace,Koramangala,Italian,12.0,4.2,Casual\n\
         Sushi Bar,Indiranagar,Japanese,20.0,4.5,Fine\n",
    )
    .unwrap();

    let matrix_path = dir.path().join("similarity_matrix.bin");
    SimilarityIndex::from_matrix(array![
        [1.0, 0.9, 0.1],
        [0.9, 1.0, 0.2],
        [0.1, 0.2, 1.0],
    ])
    .unwrap()
    .save(&matrix_path)
    .unwrap();

    let artifact_path = dir.path().join("recommender_meta.json");
    std::fs::write(
        &artifact_path,
        r#"{"similarity_features": ["cuisines", "location"]}"#,
    )
    .unwrap();

    let paths = ModelPaths {
        catalog: catalog_path,
        matrix: matrix_path,
        artifact: artifact_path,
    };
    let service = Recommender::load(&paths);
    assert!(service.is_ready());

    let result = service.recommend("Pizza Place", 2, 0.3).unwrap();
    assert_eq!(result.recommendations[0].restaurant.name, "Pizza Palace");

    let report = service.analyze().unwrap();
    assert_eq!(report.total_restaurants, 3);
    assert_eq!(report.model_performance.feature_count, 2);
    assert_eq!(report.model_performance.similarity_matrix_shape, (3, 3));
}

#[test]
fn load_with_mismatched_artifacts_is_not_ready() {
    let dir = tempfile::TempDir::new().unwrap();

    // Two catalog rows against a 3x3 matrix.
    let catalog_path = dir.path().join("restaurant_data.csv");
    std::fs::write(
        &catalog_path,
        "name,location,cuisines,cost_clean,rating_clean,rest_type\n\
         Pizza Place,Indiranagar,Italian,10.0,4.0,Casual\n\
         Sushi Bar,Indiranagar,Japanese,20.0,4.5,Fine\n",
    )
    .unwrap();

    let matrix_path = dir.path().join("similarity_matrix.bin");
    SimilarityIndex::from_matrix(array![
        [1.0, 0.9, 0.1],
        [0.9, 1.0, 0.2],
        [0.1, 0.2, 1.0],
    ])
    .unwrap()
    .save(&matrix_path)
    .unwrap();

    let artifact_path = dir.path().join("recommender_meta.json");
    std::fs::write(&artifact_path, "{}").unwrap();

    let service = Recommender::load(&ModelPaths {
        catalog: catalog_path,
        matrix: matrix_path,
        artifact: artifact_path,
    });
    assert!(!service.is_ready());
    assert!(matches!(service.analyze(), Err(RecError::NotReady)));
}

#[test]
fn load_with_missing_files_is_not_ready() {
    let service = Recommender::load(&ModelPaths {
        catalog: PathBuf::from("/nonexistent/data.csv"),
        matrix: PathBuf::from("/nonexistent/matrix.bin"),
        artifact: PathBuf::from("/nonexistent/meta.json"),
    });
    assert!(!service.is_ready());
}
