use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::cutoff::Cutoff;
use crate::analysis::monthly::MonthlyAggregator;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::{Paginator, PullRequestQuery, PullRequestSource};
use crate::models::{MonthlyReport, PullRequest, RepoSlug};

#[derive(Debug, Clone)]
pub struct BackfillReport {
    pub kept: Vec<PullRequest>,
    pub pages: u32,
    pub scanned: usize,
}

pub struct ExportPipeline {
    source: Arc<dyn PullRequestSource>,
    config: PipelineConfig,
}

impl ExportPipeline {
    pub fn new(source: impl PullRequestSource + 'static, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Every pull request of the repository, any state, last updated at or before the cutoff.
    pub async fn backfill(&self, repo: &RepoSlug, cutoff: &Cutoff) -> Result<BackfillReport> {
        let query = PullRequestQuery::all(self.config.per_page);
        let mut paginator = Paginator::new(self.source.as_ref(), repo, &query);
        let pb = self.spinner("pages");

        tracing::info!("Backfilling {} up to {}", repo, cutoff.at());

        let mut kept = Vec::new();
        let mut scanned = 0;

        while let Some(page) = paginator.next_page().await? {
            let total = page.items.len();
            let before = kept.len();
            scanned += total;
            kept.extend(page.items.into_iter().filter(|pr| cutoff.keeps(pr)));

            tracing::info!("Page {}: kept {}/{}", page.number, kept.len() - before, total);
            pb.set_message(format!("page {}, {} kept", page.number, kept.len()));
            pb.inc(1);
        }

        pb.finish_and_clear();
        let pages = paginator.pages_requested();
        tracing::info!("Page {}: kept 0/0", pages);
        tracing::info!("Total pull requests kept: {}", kept.len());

        Ok(BackfillReport {
            kept,
            pages,
            scanned,
        })
    }

    /// Monthly contributor statistics over pull requests merged into `branch`.
    pub async fn monthly_stats(
        &self,
        repo: &RepoSlug,
        branch: &str,
        until: Option<DateTime<Utc>>,
    ) -> Result<MonthlyReport> {
        let query = PullRequestQuery::closed_into(branch, self.config.per_page);
        let mut paginator = Paginator::new(self.source.as_ref(), repo, &query);
        let pb = self.spinner("pages");

        tracing::info!("Collecting closed pull requests into {}:{}", repo, branch);

        let mut closed = Vec::new();
        while let Some(page) = paginator.next_page().await? {
            closed.extend(page.items);
            pb.set_message(format!("page {}, {} closed", page.number, closed.len()));
            pb.inc(1);
        }
        pb.finish_and_clear();

        let report = MonthlyAggregator::new().until(until).aggregate(&closed);
        tracing::info!(
            "{} merged of {} closed pull requests across {} months",
            report.merged_total,
            closed.len(),
            report.months.len()
        );

        Ok(report)
    }

    fn spinner(&self, unit: &str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] {{pos}} {} {{msg}}",
            unit
        );
        if let Ok(style) = ProgressStyle::default_spinner().template(&template) {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
