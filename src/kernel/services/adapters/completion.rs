//! HTTP 补全服务适配器。
//!
//! 请求体 `{ "msg": ..., "persona": ... }`，响应体取 `reply` 字段；
//! 端点由宿主配置，核心不关心其背后接的是哪家模型。

use serde::Deserialize;

use crate::kernel::services::ports::{
    BoxFuture, CompletionRequest, CompletionService, RemoteError, Result,
};

#[derive(Debug, Deserialize)]
struct CompletionReply {
    reply: String,
}

pub struct HttpCompletionService {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl CompletionService for HttpCompletionService {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "msg": request.message,
                "persona": request.persona,
            });

            let response = self
                .http
                .post(&self.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|e| RemoteError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Status(status.as_u16()));
            }

            let reply: CompletionReply = response
                .json()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))?;
            Ok(reply.reply)
        })
    }
}
