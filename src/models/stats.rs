// src/models/stats.rs - Run-level statistics for the dedupe pipeline

use chrono::NaiveDateTime;

/// Aggregated statistics for a single preview run, printed in the final
/// summary block and useful when comparing runs after rule-table changes.
#[derive(Debug, Clone)]
pub struct DedupeRunStats {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub total_candidates: usize,
    pub skipped_malformed: usize,
    pub skipped_excluded: usize,
    pub deterministic_groups: usize,
    pub residual_names: usize,
    pub residual_groups: usize,
    pub total_groups: usize,
    pub total_duplicates: usize,
    pub fetch_time: f64,
    pub clustering_time: f64,
    pub residual_time: f64,
    pub total_processing_time: f64,
}

impl DedupeRunStats {
    pub fn new(run_id: String, run_timestamp: NaiveDateTime) -> Self {
        Self {
            run_id,
            run_timestamp,
            total_candidates: 0,
            skipped_malformed: 0,
            skipped_excluded: 0,
            deterministic_groups: 0,
            residual_names: 0,
            residual_groups: 0,
            total_groups: 0,
            total_duplicates: 0,
            fetch_time: 0.0,
            clustering_time: 0.0,
            residual_time: 0.0,
            total_processing_time: 0.0,
        }
    }
}
