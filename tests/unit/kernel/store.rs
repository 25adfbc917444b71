use super::*;
use crate::kernel::services::ports::ClonedFile;
use crate::kernel::{LineKind, WorkspaceState};
use crate::models::NodeId;

fn store_with_file(name: &str, content: &str) -> (Store, NodeId) {
    let mut state = WorkspaceState::new();
    let id = state.project.insert_root_file(name.into(), content.into());
    (Store::new(state), id)
}

fn system_lines(store: &Store) -> Vec<&str> {
    store
        .state()
        .terminal
        .lines()
        .iter()
        .filter(|line| line.kind == LineKind::System)
        .map(|line| line.text.as_str())
        .collect()
}

#[test]
fn open_file_creates_tab_and_activates() {
    let (mut store, id) = store_with_file("a.ts", "x");

    let result = store.dispatch(Action::OpenNode(id));
    assert!(result.state_changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.active_file(), Some(id));
}

#[test]
fn open_folder_toggles_expand_without_tab() {
    let mut state = WorkspaceState::new();
    let folder = state.project.insert_root_folder("repo".into());
    let mut store = Store::new(state);

    store.dispatch(Action::OpenNode(folder));
    assert!(store.state().project.is_expanded(folder));
    assert!(store.state().editor.tabs().is_empty());

    store.dispatch(Action::OpenNode(folder));
    assert!(!store.state().project.is_expanded(folder));
}

#[test]
fn edit_then_cat_reads_overlay_through_terminal() {
    let (mut store, id) = store_with_file("main.rs", "x");

    store.dispatch(Action::EditBuffer {
        id,
        text: "y".to_string(),
    });
    store.dispatch(Action::TerminalSubmit("cat main.rs".to_string()));

    let last = store.state().terminal.lines().last().unwrap();
    assert_eq!(last.kind, LineKind::Output);
    assert_eq!(last.text, "y");
}

#[test]
fn drop_files_fans_out_one_effect_per_path() {
    let mut store = Store::new(WorkspaceState::new());

    let result = store.dispatch(Action::DropFiles(vec![
        "a.ts".into(),
        "b.py".into(),
    ]));
    assert!(!result.state_changed);
    assert_eq!(result.effects.len(), 2);
    assert!(result
        .effects
        .iter()
        .all(|e| matches!(e, Effect::ReadDroppedFile(_))));
}

#[test]
fn ingested_drops_become_roots_and_tabs() {
    let mut store = Store::new(WorkspaceState::new());

    store.dispatch(Action::FileDropIngested {
        name: "a.ts".into(),
        content: "a".into(),
    });
    store.dispatch(Action::FileDropIngested {
        name: "b.py".into(),
        content: "b".into(),
    });

    let state = store.state();
    assert_eq!(state.project.roots().len(), 2);
    assert_eq!(state.editor.tabs().len(), 2);
    // 最后完成的摄取就是活动标签
    let last = *state.editor.tabs().last().unwrap();
    assert_eq!(state.editor.active(), Some(last));
    assert_eq!(state.project.name(last), Some("b.py"));
}

#[test]
fn repeated_ingestion_tolerates_duplicate_root_names() {
    let mut store = Store::new(WorkspaceState::new());

    for _ in 0..2 {
        store.dispatch(Action::FileDropIngested {
            name: "a.ts".into(),
            content: "a".into(),
        });
    }
    assert_eq!(store.state().project.roots().len(), 2);
}

#[test]
fn cloned_repo_assembles_folder_with_placeholders() {
    let mut store = Store::new(WorkspaceState::new());

    store.dispatch(Action::RepoCloned {
        repo: "widgets".to_string(),
        files: vec![
            ClonedFile {
                name: "README.md".into(),
                path: "README.md".into(),
                content: Some("# widgets".into()),
            },
            ClonedFile {
                name: "broken.rs".into(),
                path: "src/broken.rs".into(),
                content: None,
            },
        ],
    });

    let state = store.state();
    let folder = state.project.find_by_name_or_path("widgets").unwrap();
    assert!(state.project.is_folder(folder));
    assert!(state.project.is_expanded(folder));
    assert_eq!(state.project.children(folder).unwrap().count(), 2);

    let broken = state.project.find_by_name_or_path("src/broken.rs").unwrap();
    assert_eq!(
        state.project.content(broken),
        Some("// failed to fetch src/broken.rs")
    );

    assert!(system_lines(&store)
        .iter()
        .any(|line| line.contains("cloned widgets: 2 files")));
}

#[test]
fn clone_failure_surfaces_error_verbatim() {
    let mut store = Store::new(WorkspaceState::new());

    store.dispatch(Action::RepoCloneFailed {
        repo: "widgets".to_string(),
        error: "HTTP 404".to_string(),
    });

    assert!(store.state().project.roots().is_empty());
    assert!(system_lines(&store)
        .iter()
        .any(|line| line.contains("clone widgets failed: HTTP 404")));
}

#[test]
fn chat_submit_requests_completion() {
    let mut store = Store::new(WorkspaceState::new());

    let result = store.dispatch(Action::ChatSubmit("write me a parser".to_string()));
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::RequestCompletion { message, .. } if message == "write me a parser"
    ));
    assert_eq!(store.state().chat.transcript.len(), 1);
}

#[test]
fn failed_completion_appends_fixed_fallback() {
    let mut store = Store::new(WorkspaceState::new());

    store.dispatch(Action::ChatSubmit("hello".to_string()));
    store.dispatch(Action::CompletionFailed {
        error: "HTTP 500".to_string(),
    });

    let last = store.state().chat.transcript.last().unwrap();
    assert_eq!(last.role, ChatRole::Assistant);
    assert_eq!(last.text, CHAT_FALLBACK_REPLY);
}

#[test]
fn close_tab_through_store() {
    let (mut store, id) = store_with_file("a.ts", "x");
    store.dispatch(Action::OpenNode(id));

    assert!(store.dispatch(Action::CloseTab(id)).state_changed);
    assert_eq!(store.active_file(), None);
    // 再关一次是 no-op
    assert!(!store.dispatch(Action::CloseTab(id)).state_changed);
}
