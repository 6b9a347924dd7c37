use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login reported for pull requests whose author account was deleted.
pub const GHOST_LOGIN: &str = "ghost";

/// A pull request as returned by the list endpoint.
///
/// Only the fields the tool reads are typed; everything else the API sends is
/// kept in `extra` so a raw export writes the object back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    pub user: Option<PullRequestUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestUser {
    pub login: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    pub fn author_login(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.login.as_str())
            .unwrap_or(GHOST_LOGIN)
    }

    /// `YYYY-MM` of the merge, if merged.
    pub fn merge_month(&self) -> Option<String> {
        self.merged_at.map(|at| at.format("%Y-%m").to_string())
    }

    pub fn summarize(&self) -> PullRequestSummary {
        PullRequestSummary {
            number: self.number,
            title: self.title.clone(),
            author: self.author_login().to_string(),
            state: self.state.clone(),
            merged: self.is_merged(),
            merge_month: self.merge_month(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            merged_at: self.merged_at,
        }
    }
}

/// Reshaped record written by the summary export format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub state: String,
    pub merged: bool,
    pub merge_month: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}
