use compact_str::CompactString;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::message::AppMessage;
use crate::kernel::services::ports::{
    ClonedFile, CompletionRequest, CompletionService, RepoFetcher,
};
use crate::kernel::Effect;

/// 单次克隆最多摄取的文件数。
const MAX_CLONE_FILES: usize = 10;

/// 摄取服务的异步侧：持有 tokio 运行时，把文件读取、仓库克隆、
/// 补全请求各自作为独立任务执行，完成结果经 mpsc 送回宿主循环。
/// 任务之间没有顺序保证；操作不支持取消，慢请求只是晚到。
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    repos: Arc<dyn RepoFetcher>,
    completions: Arc<dyn CompletionService>,
}

impl AsyncRuntime {
    pub fn new(
        tx: Sender<AppMessage>,
        repos: Arc<dyn RepoFetcher>,
        completions: Arc<dyn CompletionService>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            repos,
            completions,
        })
    }

    pub fn handle_effect(&self, effect: Effect) {
        match effect {
            Effect::ReadDroppedFile(path) => self.read_dropped_file(path),
            Effect::CloneRepo { owner, repo } => self.clone_repo(owner, repo),
            Effect::RequestCompletion { message, persona } => {
                self.request_completion(message, persona)
            }
        }
    }

    /// 拖放文件读取。每个文件是一个独立任务，完成顺序不定。
    pub fn read_dropped_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let name = path
                .file_name()
                .map(|s| CompactString::from(s.to_string_lossy().as_ref()))
                .unwrap_or_else(|| CompactString::const_new("untitled"));

            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes).into_owned();
                    let _ = tx.send(AppMessage::FileDropIngested { name, content });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::FileDropError {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// 克隆仓库：先取顶层列表，失败则整体中止；
    /// 成功后逐个抓取前 MAX_CLONE_FILES 个文件，单个失败不影响其余。
    pub fn clone_repo(&self, owner: String, repo: String) {
        let tx = self.tx.clone();
        let repos = self.repos.clone();
        self.runtime.spawn(async move {
            let entries = match repos.list_files(&owner, &repo).await {
                Ok(entries) => entries,
                Err(e) => {
                    let _ = tx.send(AppMessage::RepoCloneFailed {
                        repo,
                        error: e.to_string(),
                    });
                    return;
                }
            };

            let mut files = Vec::new();
            for entry in entries.into_iter().take(MAX_CLONE_FILES) {
                let content = match repos.fetch_file(&entry).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        tracing::warn!(path = %entry.path, error = %e, "file fetch failed");
                        None
                    }
                };
                files.push(ClonedFile {
                    name: entry.name,
                    path: entry.path,
                    content,
                });
            }

            let _ = tx.send(AppMessage::RepoCloned { repo, files });
        });
    }

    pub fn request_completion(&self, message: String, persona: String) {
        let tx = self.tx.clone();
        let completions = self.completions.clone();
        self.runtime.spawn(async move {
            let request = CompletionRequest { message, persona };
            match completions.complete(&request).await {
                Ok(reply) => {
                    let _ = tx.send(AppMessage::CompletionArrived { reply });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::CompletionFailed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
