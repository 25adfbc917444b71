use super::*;
use crate::kernel::services::ports::{
    BoxFuture, CompletionService, RemoteError, RepoFetcher, RepoFileEntry,
    Result as RemoteResult,
};
use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

struct StaticRepo {
    entries: Vec<RepoFileEntry>,
    failing_paths: Vec<&'static str>,
    listing_status: Option<u16>,
}

impl StaticRepo {
    fn with_files(count: usize, failing_paths: Vec<&'static str>) -> Self {
        let entries = (0..count)
            .map(|i| RepoFileEntry {
                name: format!("file{i}.rs").into(),
                path: format!("src/file{i}.rs"),
                download_url: format!("https://example.test/file{i}.rs"),
            })
            .collect();
        Self {
            entries,
            failing_paths,
            listing_status: None,
        }
    }

    fn failing_listing(status: u16) -> Self {
        Self {
            entries: Vec::new(),
            failing_paths: Vec::new(),
            listing_status: Some(status),
        }
    }
}

impl RepoFetcher for StaticRepo {
    fn list_files<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
    ) -> BoxFuture<'a, RemoteResult<Vec<RepoFileEntry>>> {
        Box::pin(async move {
            match self.listing_status {
                Some(status) => Err(RemoteError::Status(status)),
                None => Ok(self.entries.clone()),
            }
        })
    }

    fn fetch_file<'a>(&'a self, entry: &'a RepoFileEntry) -> BoxFuture<'a, RemoteResult<String>> {
        Box::pin(async move {
            if self.failing_paths.contains(&entry.path.as_str()) {
                Err(RemoteError::Status(500))
            } else {
                Ok(format!("content of {}", entry.path))
            }
        })
    }
}

struct EchoCompletion;

impl CompletionService for EchoCompletion {
    fn complete<'a>(
        &'a self,
        request: &'a crate::kernel::services::ports::CompletionRequest,
    ) -> BoxFuture<'a, RemoteResult<String>> {
        Box::pin(async move { Ok(format!("echo: {}", request.message)) })
    }
}

struct BrokenCompletion;

impl CompletionService for BrokenCompletion {
    fn complete<'a>(
        &'a self,
        _request: &'a crate::kernel::services::ports::CompletionRequest,
    ) -> BoxFuture<'a, RemoteResult<String>> {
        Box::pin(async move { Err(RemoteError::Status(502)) })
    }
}

fn runtime_with(
    repo: StaticRepo,
) -> (AsyncRuntime, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, Arc::new(repo), Arc::new(EchoCompletion)).unwrap();
    (runtime, rx)
}

#[test]
fn clone_caps_ingestion_at_ten_files() {
    let (runtime, rx) = runtime_with(StaticRepo::with_files(12, vec!["src/file3.rs"]));

    runtime.clone_repo("acme".into(), "widgets".into());

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::RepoCloned { repo, files } => {
            assert_eq!(repo, "widgets");
            assert_eq!(files.len(), 10);
            // 单个抓取失败只影响自己
            let broken = files.iter().find(|f| f.path == "src/file3.rs").unwrap();
            assert!(broken.content.is_none());
            assert!(files
                .iter()
                .filter(|f| f.path != "src/file3.rs")
                .all(|f| f.content.is_some()));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn listing_failure_aborts_whole_clone() {
    let (runtime, rx) = runtime_with(StaticRepo::failing_listing(404));

    runtime.clone_repo("acme".into(), "widgets".into());

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::RepoCloneFailed { repo, error } => {
            assert_eq!(repo, "widgets");
            assert_eq!(error, "HTTP 404");
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn dropped_file_is_read_asynchronously() {
    let (runtime, rx) = runtime_with(StaticRepo::with_files(0, Vec::new()));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "drop payload").unwrap();

    runtime.read_dropped_file(file.path().to_path_buf());

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::FileDropIngested { content, .. } => assert_eq!(content, "drop payload"),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn missing_dropped_file_reports_error() {
    let (runtime, rx) = runtime_with(StaticRepo::with_files(0, Vec::new()));

    runtime.read_dropped_file(PathBuf::from("/definitely/not/here.ts"));

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::FileDropError { name, .. } => assert_eq!(name, "here.ts"),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn completion_round_trip() {
    let (runtime, rx) = runtime_with(StaticRepo::with_files(0, Vec::new()));

    runtime.request_completion("hi".into(), "persona".into());

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::CompletionArrived { reply } => assert_eq!(reply, "echo: hi"),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn completion_failure_is_reported() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(
        tx,
        Arc::new(StaticRepo::with_files(0, Vec::new())),
        Arc::new(BrokenCompletion),
    )
    .unwrap();

    runtime.request_completion("hi".into(), "persona".into());

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        AppMessage::CompletionFailed { error } => assert_eq!(error, "HTTP 502"),
        other => panic!("unexpected message: {other:?}"),
    }
}
