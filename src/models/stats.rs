use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the monthly statistics CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyStats {
    pub month: String,
    pub pull_requests: u32,
    pub new_contributors: u32,
    pub total_contributors: u32,
}

/// One row of the per-author CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorMonthStats {
    pub month: String,
    pub author: String,
    pub pull_requests: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyStats>,
    pub authors: Vec<AuthorMonthStats>,
    /// New authors per month, in the order of their first merge.
    pub new_contributors: BTreeMap<String, Vec<String>>,
    pub merged_total: usize,
    pub skipped: usize,
}

impl MonthlyReport {
    pub fn total_contributors(&self) -> u32 {
        self.months
            .last()
            .map(|m| m.total_contributors)
            .unwrap_or(0)
    }
}
