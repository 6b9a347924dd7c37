use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PullRequest, RepoSlug};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    Closed,
    All,
}

impl PullState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullState::Closed => "closed",
            PullState::All => "all",
        }
    }
}

/// Filters sent with every page request of a listing.
#[derive(Debug, Clone)]
pub struct PullRequestQuery {
    pub state: PullState,
    pub base: Option<String>,
    pub per_page: u32,
}

impl PullRequestQuery {
    pub fn all(per_page: u32) -> Self {
        Self {
            state: PullState::All,
            base: None,
            per_page,
        }
    }

    pub fn closed_into(branch: &str, per_page: u32) -> Self {
        Self {
            state: PullState::Closed,
            base: Some(branch.to_string()),
            per_page,
        }
    }

    /// Query string pairs, always oldest first.
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("state", self.state.as_str().to_string()),
            ("direction", "asc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(ref base) = self.base {
            params.push(("base", base.clone()));
        }
        params
    }
}

/// Anything that can serve one page of a repository's pull requests.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// `page` is 1-based. An empty result means there are no more pages.
    async fn fetch_pull_requests(
        &self,
        repo: &RepoSlug,
        query: &PullRequestQuery,
        page: u32,
    ) -> Result<Vec<PullRequest>>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Serves canned pages and records which pages were asked for.
    pub struct FakeSource {
        pages: Vec<Vec<PullRequest>>,
        pub requested: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        pub fn new(pages: Vec<Vec<PullRequest>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_pages(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PullRequestSource for FakeSource {
        async fn fetch_pull_requests(
            &self,
            _repo: &RepoSlug,
            _query: &PullRequestQuery,
            page: u32,
        ) -> Result<Vec<PullRequest>> {
            self.requested.lock().unwrap().push(page);
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }
}
