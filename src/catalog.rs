//! In-memory restaurant catalog: row storage and name lookup

use crate::error::{RecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single restaurant record, addressed by its load-order index.
///
/// Field names on the wire (JSON and the CSV artifact) keep the column names
/// of the training pipeline: `cost_clean`, `rating_clean`, `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Position in load order; assigned by the store, not read from the CSV.
    #[serde(rename = "id", skip_deserializing)]
    pub index: usize,
    pub name: String,
    pub location: String,
    pub cuisines: String,
    #[serde(rename = "cost_clean")]
    pub cost: f32,
    #[serde(rename = "rating_clean")]
    pub rating: f32,
    pub rest_type: String,
}

/// Filters for a catalog scan.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub location: Option<String>,
    pub cuisine: Option<String>,
    pub min_rating: Option<f32>,
    pub max_cost: Option<f32>,
    pub limit: usize,
}

/// Ordered, index-addressable restaurant catalog with an exact-name lookup.
///
/// Names need not be unique; the name map keeps one index per distinct name,
/// last-write-wins in load order.
#[derive(Debug)]
pub struct CatalogStore {
    rows: Vec<CatalogRow>,
    /// Exact name -> row index
    name_to_index: HashMap<String, usize>,
}

impl CatalogStore {
    /// Load the catalog from a CSV file with headers
    /// `name, location, cuisines, cost_clean, rating_clean, rest_type`.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load the catalog from any CSV reader (used by tests and embedders).
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let row: CatalogRow = record?;
            rows.push(row);
        }
        Ok(Self::from_rows(rows))
    }

    /// Build a catalog from already-materialized rows, reassigning indices
    /// to match storage order.
    pub fn from_rows(mut rows: Vec<CatalogRow>) -> Self {
        let mut name_to_index = HashMap::with_capacity(rows.len());
        for (index, row) in rows.iter_mut().enumerate() {
            row.index = index;
            name_to_index.insert(row.name.clone(), index);
        }
        Self { rows, name_to_index }
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Result<&CatalogRow> {
        self.rows.get(index).ok_or(RecError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// The number of rows in the catalog.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact (case-sensitive) name lookup.
    pub fn exact_index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// All rows in stored order (for analytics and resolver scans).
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// Scan the catalog for rows matching the search parameters.
    ///
    /// A row matches when the case-insensitive query is a substring of its
    /// name or its cuisines. The optional filters are conjunctive. Results
    /// keep stored order and are truncated to `limit`.
    pub fn search(&self, params: &SearchParams) -> Vec<&CatalogRow> {
        let query = params.query.to_lowercase();
        let location = params.location.as_ref().map(|l| l.to_lowercase());
        let cuisine = params.cuisine.as_ref().map(|c| c.to_lowercase());

        self.rows
            .iter()
            .filter(|row| {
                row.name.to_lowercase().contains(&query)
                    || row.cuisines.to_lowercase().contains(&query)
            })
            .filter(|row| match &location {
                Some(loc) => row.location.to_lowercase().contains(loc),
                None => true,
            })
            .filter(|row| match &cuisine {
                Some(c) => row.cuisines.to_lowercase().contains(c),
                None => true,
            })
            .filter(|row| match params.min_rating {
                Some(min) => row.rating >= min,
                None => true,
            })
            .filter(|row| match params.max_cost {
                Some(max) => row.cost <= max,
                None => true,
            })
            .take(params.limit)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(name: &str, location: &str, cuisines: &str, cost: f32, rating: f32) -> CatalogRow {
        CatalogRow {
            index: 0,
            name: name.to_string(),
            location: location.to_string(),
            cuisines: cuisines.to_string(),
            cost,
            rating,
            rest_type: "Casual Dining".to_string(),
        }
    }

    const CSV_DATA: &str = "\
name,location,cuisines,cost_clean,rating_clean,rest_type
Pizza Place,Indiranagar,Italian,10.0,4.0,Casual Dining
Pizza Palace,Koramangala,Italian,12.0,4.2,Casual Dining
Sushi Bar,Indiranagar,Japanese,20.0,4.5,Fine Dining
";

    #[test]
    fn test_from_reader() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);

        let row = store.get(1).unwrap();
        assert_eq!(row.index, 1);
        assert_eq!(row.name, "Pizza Palace");
        assert_eq!(row.cost, 12.0);
        assert_eq!(row.rating, 4.2);
    }

    #[test]
    fn test_missing_column_fails() {
        let bad = "name,location\nPizza Place,Indiranagar\n";
        let result = CatalogStore::from_reader(bad.as_bytes());
        assert!(matches!(result, Err(RecError::CsvError(_))));
    }

    #[test]
    fn test_exact_index_of() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        assert_eq!(store.exact_index_of("Sushi Bar"), Some(2));
        assert_eq!(store.exact_index_of("sushi bar"), None);
        assert_eq!(store.exact_index_of("Nonexistent"), None);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let store = CatalogStore::from_rows(vec![
            row("Empire", "HSR", "North Indian", 15.0, 4.1),
            row("Empire", "BTM", "North Indian", 14.0, 4.0),
        ]);
        assert_eq!(store.exact_index_of("Empire"), Some(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_out_of_range() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        assert!(matches!(
            store.get(3),
            Err(RecError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_search_by_name_and_cuisine() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        let params = SearchParams {
            query: "pizza".to_string(),
            location: None,
            cuisine: None,
            min_rating: None,
            max_cost: None,
            limit: 10,
        };
        let results = store.search(&params);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Pizza Place");

        let params = SearchParams {
            query: "japanese".to_string(),
            ..params
        };
        let results = store.search(&params);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sushi Bar");
    }

    #[test]
    fn test_search_filters_are_conjunctive() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        let params = SearchParams {
            query: "pizza".to_string(),
            location: Some("koramangala".to_string()),
            cuisine: None,
            min_rating: Some(4.1),
            max_cost: Some(15.0),
            limit: 10,
        };
        let results = store.search(&params);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Pizza Palace");
    }

    #[test]
    fn test_search_limit() {
        let store = CatalogStore::from_reader(CSV_DATA.as_bytes()).unwrap();
        let params = SearchParams {
            query: String::new(),
            location: None,
            cuisine: None,
            min_rating: None,
            max_cost: None,
            limit: 2,
        };
        assert_eq!(store.search(&params).len(), 2);
    }
}
