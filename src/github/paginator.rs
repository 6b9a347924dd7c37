use crate::error::Result;
use crate::github::source::{PullRequestQuery, PullRequestSource};
use crate::models::{PullRequest, RepoSlug};

pub struct Page {
    pub number: u32,
    pub items: Vec<PullRequest>,
}

/// Walks a listing page by page until the source returns an empty page.
pub struct Paginator<'a> {
    source: &'a dyn PullRequestSource,
    repo: &'a RepoSlug,
    query: &'a PullRequestQuery,
    next: u32,
    exhausted: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(
        source: &'a dyn PullRequestSource,
        repo: &'a RepoSlug,
        query: &'a PullRequestQuery,
    ) -> Self {
        Self {
            source,
            repo,
            query,
            next: 1,
            exhausted: false,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.exhausted {
            return Ok(None);
        }

        let number = self.next;
        tracing::debug!("Fetching page {} of {}", number, self.repo);
        let items = self
            .source
            .fetch_pull_requests(self.repo, self.query, number)
            .await?;

        if items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.next += 1;
        Ok(Some(Page { number, items }))
    }

    pub async fn fetch_all(mut self) -> Result<Vec<PullRequest>> {
        let mut all_items = Vec::new();
        while let Some(page) = self.next_page().await? {
            all_items.extend(page.items);
        }
        Ok(all_items)
    }

    /// Number of requests made so far, including the final empty one.
    pub fn pages_requested(&self) -> u32 {
        if self.exhausted {
            self.next
        } else {
            self.next - 1
        }
    }
}
