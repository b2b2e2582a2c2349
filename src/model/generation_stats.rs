use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use uuid::Uuid;

/// Summary of one generation session, written out as the optional JSON report.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationStats {
    pub puzzle_id: Uuid,
    pub seed: u64,
    pub k: usize,
    pub diagonal: bool,
    pub clauses: usize,
    pub seed_attempts: usize,
    pub oracle_queries: usize,
    pub cells_removed: usize,
    pub cells_restored: usize,
    pub givens: usize,
    pub elapsed: Duration,
    #[serde_as(as = "TimestampSeconds")]
    pub generated_at: SystemTime,
}

impl GenerationStats {
    pub fn new(seed: u64, k: usize, diagonal: bool) -> Self {
        Self {
            puzzle_id: Uuid::new_v4(),
            seed,
            k,
            diagonal,
            clauses: 0,
            seed_attempts: 0,
            oracle_queries: 0,
            cells_removed: 0,
            cells_restored: 0,
            givens: 0,
            elapsed: Duration::default(),
            generated_at: SystemTime::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
