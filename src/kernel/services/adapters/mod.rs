//! Service adapters: runtime specific implementations (HTTP/async IO).

pub mod completion;
pub mod github;
pub mod runtime;

pub use completion::HttpCompletionService;
pub use github::GitHubFetcher;
pub use runtime::{AppMessage, AsyncRuntime};
