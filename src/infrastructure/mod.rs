pub mod cache;
pub mod github_api;

pub use cache::{Cache, cache_path};
pub use github_api::{ApiError, GitHubClient};
