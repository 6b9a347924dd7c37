pub mod pull_request;
pub mod repository;
pub mod stats;

pub use pull_request::*;
pub use repository::*;
pub use stats::*;
