//! AI 补全服务的端口契约。

use super::remote::Result;
use super::BoxFuture;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub message: String,
    pub persona: String,
}

pub trait CompletionService: Send + Sync {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String>>;
}
