use crate::models::{NodeId, NodeKind};

use super::state::CHAT_FALLBACK_REPLY;
use super::{terminal, Action, ChatRole, Effect, WorkspaceState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

/// 工作区控制器：状态的唯一拥有者。
///
/// 所有变更都经由 `dispatch` 串行执行；异步完成（文件读取、网络抓取）
/// 由运行时适配器送回消息后再次进入 `dispatch`，彼此之间没有并发。
pub struct Store {
    state: WorkspaceState,
}

impl Store {
    pub fn new(state: WorkspaceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn active_file(&self) -> Option<NodeId> {
        self.state.active_file()
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenNode(id) => match self.state.project.kind(id) {
                Some(NodeKind::Folder) => {
                    self.state.project.toggle_expand(id);
                    DispatchResult::changed(true)
                }
                Some(NodeKind::File) => {
                    DispatchResult::changed(self.state.editor.open_file(id))
                }
                None => {
                    tracing::warn!(?id, "open ignored: unknown node id");
                    DispatchResult::changed(false)
                }
            },
            Action::CloseTab(id) => DispatchResult::changed(self.state.editor.close(id)),
            Action::EditBuffer { id, text } => {
                self.state.buffers.set_content(id, text);
                DispatchResult::changed(true)
            }
            Action::TerminalSubmit(input) => {
                let changed = terminal::execute(
                    &input,
                    &self.state.project,
                    &self.state.buffers,
                    &mut self.state.terminal,
                );
                DispatchResult::changed(changed)
            }
            Action::ChatSubmit(message) => {
                if message.trim().is_empty() {
                    return DispatchResult::changed(false);
                }
                self.state.chat.push(ChatRole::User, message.clone());
                DispatchResult {
                    effects: vec![Effect::RequestCompletion {
                        message,
                        persona: self.state.chat.persona.clone(),
                    }],
                    state_changed: true,
                }
            }
            Action::DropFiles(paths) => DispatchResult {
                effects: paths.into_iter().map(Effect::ReadDroppedFile).collect(),
                state_changed: false,
            },
            Action::FileDropIngested { name, content } => {
                tracing::debug!(name = %name, bytes = content.len(), "file drop ingested");
                let id = self.state.project.insert_root_file(name, content);
                self.state.editor.open_file(id);
                DispatchResult::changed(true)
            }
            Action::FileDropFailed { name, error } => {
                tracing::warn!(name = %name, error = %error, "file drop failed");
                self.state
                    .terminal
                    .push_system(format!("failed to read {name}: {error}"));
                DispatchResult::changed(true)
            }
            Action::CloneRepo { owner, repo } => {
                self.state
                    .terminal
                    .push_system(format!("cloning {owner}/{repo}..."));
                DispatchResult {
                    effects: vec![Effect::CloneRepo { owner, repo }],
                    state_changed: true,
                }
            }
            Action::RepoCloned { repo, files } => {
                let count = files.len();
                let folder = self.state.project.insert_root_folder(repo.as_str().into());
                for file in files {
                    let content = file.content.unwrap_or_else(|| {
                        format!("// failed to fetch {}", file.path)
                    });
                    if let Err(e) = self.state.project.insert_child_file(
                        folder,
                        file.name.clone(),
                        file.path,
                        content,
                    ) {
                        tracing::debug!(name = %file.name, error = %e, "skipped cloned file");
                    }
                }
                self.state.project.expand(folder);
                self.state
                    .terminal
                    .push_system(format!("cloned {repo}: {count} files"));
                tracing::info!(repo = %repo, files = count, "repository cloned");
                DispatchResult::changed(true)
            }
            Action::RepoCloneFailed { repo, error } => {
                tracing::warn!(repo = %repo, error = %error, "repository clone failed");
                self.state
                    .terminal
                    .push_system(format!("clone {repo} failed: {error}"));
                DispatchResult::changed(true)
            }
            Action::CompletionArrived { reply } => {
                self.state.chat.push(ChatRole::Assistant, reply);
                DispatchResult::changed(true)
            }
            Action::CompletionFailed { error } => {
                tracing::warn!(error = %error, "completion request failed");
                self.state.chat.push(ChatRole::Assistant, CHAT_FALLBACK_REPLY);
                DispatchResult::changed(true)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
