//! 远程仓库抓取的端口契约。

use compact_str::CompactString;
use std::fmt;

use super::BoxFuture;

pub type Result<T> = std::result::Result<T, RemoteError>;

#[derive(Debug)]
pub enum RemoteError {
    /// 非成功 HTTP 响应；状态码原样上抛到错误行。
    Status(u16),
    Network(String),
    Decode(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Status(code) => write!(f, "HTTP {code}"),
            RemoteError::Network(e) => write!(f, "network error: {e}"),
            RemoteError::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// 目录列表中的一个文件条目。
#[derive(Debug, Clone)]
pub struct RepoFileEntry {
    pub name: CompactString,
    pub path: String,
    pub download_url: String,
}

/// 克隆完成后交给内核的单个文件。`content` 为 None 表示该文件
/// 的单独抓取失败，由内核替换为占位内容。
#[derive(Debug, Clone)]
pub struct ClonedFile {
    pub name: CompactString,
    pub path: String,
    pub content: Option<String>,
}

pub trait RepoFetcher: Send + Sync {
    /// 列出 `owner/repo` 顶层的文件条目（仅文件，不含目录）。
    fn list_files<'a>(&'a self, owner: &'a str, repo: &'a str)
        -> BoxFuture<'a, Result<Vec<RepoFileEntry>>>;

    fn fetch_file<'a>(&'a self, entry: &'a RepoFileEntry) -> BoxFuture<'a, Result<String>>;
}
