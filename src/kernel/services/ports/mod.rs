//! Service ports: traits + data contracts.

pub mod completion;
pub mod remote;

use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use completion::{CompletionRequest, CompletionService};
pub use remote::{ClonedFile, RemoteError, RepoFetcher, RepoFileEntry, Result};
