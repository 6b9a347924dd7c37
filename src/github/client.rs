use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tokio::time::{sleep, Duration};

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Error, Result};
use crate::github::rate_limiter::{header_number, seconds_until_reset, RateLimiter};
use crate::github::source::{PullRequestQuery, PullRequestSource};
use crate::models::{PullRequest, RepoSlug};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    max_retries: u32,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("prstats/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: DEFAULT_API_URL.to_string(),
            max_retries: 3,
        })
    }

    pub fn from_config(token: &str, config: &Config) -> Result<Self> {
        Ok(Self::new(token)?
            .with_base_url(&config.api_base_url)
            .with_rate_limiter(RateLimiter::with_requests_per_minute(
                config.requests_per_minute,
            ))
            .with_max_retries(config.max_retries))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub async fn list_pull_requests_page(
        &self,
        repo: &RepoSlug,
        query: &PullRequestQuery,
        page: u32,
    ) -> Result<Vec<PullRequest>> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_url, repo.owner, repo.name);
        let params = query.params(page);

        self.rate_limiter.wait().await;
        tracing::debug!("Fetching: {} page {}", url, page);

        let response = self.client.get(&url).query(&params).send().await?;
        self.rate_limiter.update_from_headers(response.headers()).await;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(repo.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unauthorized(format!("{} - {}", status, body)));
        }
        if (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            && header_number::<u32>(response.headers(), "x-ratelimit-remaining") == Some(0)
        {
            return Err(Error::RateLimited(seconds_until_reset(response.headers())));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to list pull requests for {}: {} - {}",
                repo, status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::ParseError(format!("page {} of {} pull requests: {}", page, repo, e))
        })
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn fetch_pull_requests(
        &self,
        repo: &RepoSlug,
        query: &PullRequestQuery,
        page: u32,
    ) -> Result<Vec<PullRequest>> {
        let mut attempt = 0;
        loop {
            match self.list_pull_requests_page(repo, query, page).await {
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Page {} failed ({}), retry {}/{}",
                        page,
                        e,
                        attempt,
                        self.max_retries
                    );
                    // The rate limiter already sleeps through an exhausted window.
                    if let Error::Network(_) = e {
                        sleep(Duration::from_secs(attempt as u64)).await;
                    }
                }
                result => return result,
            }
        }
    }
}
