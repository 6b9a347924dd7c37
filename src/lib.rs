pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod export;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, PullRequestSource};
pub use analysis::{Cutoff, ExportPipeline};
