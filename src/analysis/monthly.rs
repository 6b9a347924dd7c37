use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

use crate::models::{AuthorMonthStats, MonthlyReport, MonthlyStats, PullRequest};

#[derive(Debug, Default, Clone, Copy)]
struct MonthTally {
    pull_requests: u32,
    new_contributors: u32,
}

/// Buckets merged pull requests by merge month and tracks first-time authors.
pub struct MonthlyAggregator {
    until: Option<DateTime<Utc>>,
}

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self { until: None }
    }

    /// Ignore pull requests merged after `until`.
    pub fn until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.until = until;
        self
    }

    pub fn aggregate(&self, pulls: &[PullRequest]) -> MonthlyReport {
        let mut merged: Vec<(DateTime<Utc>, &PullRequest)> = pulls
            .iter()
            .filter_map(|pr| pr.merged_at.map(|at| (at, pr)))
            .filter(|(at, _)| self.until.map_or(true, |until| *at <= until))
            .collect();
        // Stable, so same-instant merges keep listing order.
        merged.sort_by_key(|(at, _)| *at);

        let mut months: BTreeMap<String, MonthTally> = BTreeMap::new();
        let mut author_counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut new_contributors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for (at, pr) in &merged {
            let month = at.format("%Y-%m").to_string();
            let author = pr.author_login();

            let tally = months.entry(month.clone()).or_default();
            tally.pull_requests += 1;

            if seen.insert(author) {
                tally.new_contributors += 1;
                new_contributors
                    .entry(month.clone())
                    .or_default()
                    .push(author.to_string());
            }

            *author_counts
                .entry(month)
                .or_default()
                .entry(author.to_string())
                .or_insert(0) += 1;
        }

        let mut running_total = 0;
        let month_rows = months
            .into_iter()
            .map(|(month, tally)| {
                running_total += tally.new_contributors;
                MonthlyStats {
                    month,
                    pull_requests: tally.pull_requests,
                    new_contributors: tally.new_contributors,
                    total_contributors: running_total,
                }
            })
            .collect();

        let author_rows = author_counts
            .into_iter()
            .flat_map(|(month, authors)| {
                authors
                    .into_iter()
                    .map(move |(author, pull_requests)| AuthorMonthStats {
                        month: month.clone(),
                        author,
                        pull_requests,
                    })
            })
            .collect();

        MonthlyReport {
            months: month_rows,
            authors: author_rows,
            new_contributors,
            merged_total: merged.len(),
            skipped: pulls.len() - merged.len(),
        }
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
