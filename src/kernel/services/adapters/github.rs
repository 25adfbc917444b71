//! GitHub contents API 适配器。
//!
//! 只消费一个端点：`GET /repos/{owner}/{repo}/contents` 的顶层列表，
//! 过滤出文件条目，再按 `download_url` 抓取原始文本。

use serde::Deserialize;

use crate::kernel::services::ports::{
    BoxFuture, RemoteError, RepoFetcher, RepoFileEntry, Result,
};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "vstudio/0.1";

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

pub struct GitHubFetcher {
    http: reqwest::Client,
}

impl GitHubFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for GitHubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFetcher for GitHubFetcher {
    fn list_files<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RepoFileEntry>>> {
        Box::pin(async move {
            let url = format!("{API_BASE}/repos/{owner}/{repo}/contents");
            let response = self
                .http
                .get(&url)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .send()
                .await
                .map_err(|e| RemoteError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Status(status.as_u16()));
            }

            let entries: Vec<ContentsEntry> = response
                .json()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))?;

            Ok(entries
                .into_iter()
                .filter(|entry| entry.kind == "file")
                .filter_map(|entry| {
                    entry.download_url.map(|download_url| RepoFileEntry {
                        name: entry.name.into(),
                        path: entry.path,
                        download_url,
                    })
                })
                .collect())
        })
    }

    fn fetch_file<'a>(&'a self, entry: &'a RepoFileEntry) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let response = self
                .http
                .get(&entry.download_url)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .send()
                .await
                .map_err(|e| RemoteError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Status(status.as_u16()));
            }

            response
                .text()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))
        })
    }
}
