//! Observability metrics: recommendation latency and request counters.

use std::time::Duration;

/// Collects runtime metrics for the recommendation service.
#[derive(Debug)]
pub struct MetricsCollector {
    recommend_latencies_us: Vec<f64>,
    total_recommendations: u64,
    total_not_found: u64,
    total_searches: u64,
    total_analytics: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            recommend_latencies_us: Vec::new(),
            total_recommendations: 0,
            total_not_found: 0,
            total_searches: 0,
            total_analytics: 0,
        }
    }

    /// Record a served recommendation with its duration.
    pub fn record_recommendation(&mut self, duration: Duration) {
        self.total_recommendations += 1;
        self.recommend_latencies_us.push(duration.as_micros() as f64);
    }

    /// Record a recommendation query that resolved to nothing.
    pub fn record_not_found(&mut self) {
        self.total_not_found += 1;
    }

    /// Record a catalog search.
    pub fn record_search(&mut self) {
        self.total_searches += 1;
    }

    /// Record an analytics request.
    pub fn record_analytics(&mut self) {
        self.total_analytics += 1;
    }

    pub fn total_recommendations(&self) -> u64 {
        self.total_recommendations
    }

    pub fn total_not_found(&self) -> u64 {
        self.total_not_found
    }

    pub fn total_searches(&self) -> u64 {
        self.total_searches
    }

    pub fn total_analytics(&self) -> u64 {
        self.total_analytics
    }

    /// Average recommendation latency in microseconds.
    pub fn avg_recommend_latency_us(&self) -> f64 {
        if self.recommend_latencies_us.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.recommend_latencies_us.iter().sum();
        sum / self.recommend_latencies_us.len() as f64
    }

    /// Get a percentile of recommendation latency (e.g., 50.0, 95.0, 99.0).
    pub fn percentile_recommend_latency_us(&self, percentile: f64) -> f64 {
        if self.recommend_latencies_us.is_empty() {
            return 0.0;
        }

        let mut sorted = self.recommend_latencies_us.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let index = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
